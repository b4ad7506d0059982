use std::sync::Arc;

use log::{debug, info, trace, warn};

use attrib_shared::{
    AddOrUpdate, Catalog, ComponentManager, ComponentMessage, ComponentModified, HolderId, Remove,
    Replicate, SerdeErr, Value, Visibility,
};

use crate::{
    tracking::TrackingMap, transport::PacketSender, AttribServerError, ServerConfig,
    TrackerScopeMut, TrackerScopeRef,
};

/// Owns the live components of every holder with an active session and
/// decides which peer is told about which change
pub struct Server {
    pub(crate) config: ServerConfig,
    pub(crate) manager: ComponentManager,
    pub(crate) tracking: TrackingMap,
    sender: Box<dyn PacketSender>,
}

impl Server {
    /// Create a new Server. The catalog is locked: every component must be
    /// registered before this point.
    pub fn new<S: PacketSender + 'static>(
        server_config: ServerConfig,
        catalog: Arc<Catalog>,
        sender: S,
    ) -> Self {
        catalog.lock();
        info!(
            "Server started with {} components under namespace '{}'",
            catalog.len(),
            server_config.namespace
        );

        Self {
            config: server_config,
            manager: ComponentManager::new(catalog),
            tracking: TrackingMap::new(),
            sender: Box::new(sender),
        }
    }

    pub fn config(&self) -> &ServerConfig {
        &self.config
    }

    /// Read access to holder components. Mutations must go through the
    /// `Server` so they get synced.
    pub fn manager(&self) -> &ComponentManager {
        &self.manager
    }

    pub fn catalog(&self) -> &Arc<Catalog> {
        self.manager.catalog()
    }

    pub fn has_holder(&self, holder: &HolderId) -> bool {
        self.manager.holders().contains(holder)
    }

    pub fn holders(&self) -> Vec<HolderId> {
        self.manager.holders().holders()
    }

    // Components

    pub fn get_component<C: Clone + Send + Sync + 'static>(
        &self,
        holder: &HolderId,
        component_id: &str,
    ) -> Option<C> {
        self.manager.get_component::<C>(holder, component_id)
    }

    pub fn get(&self, holder: &HolderId, component_id: &str, descriptor_id: &str) -> Option<Value> {
        self.manager.get(holder, component_id, descriptor_id)
    }

    pub fn get_or<V: Into<Value>>(
        &self,
        holder: &HolderId,
        component_id: &str,
        descriptor_id: &str,
        fallback: V,
    ) -> Value {
        self.manager.get_or(holder, component_id, descriptor_id, fallback)
    }

    pub fn get_all(&self, holder: &HolderId) -> Vec<Box<dyn Replicate>> {
        self.manager.get_all(holder)
    }

    /// Mutates one component and syncs it. Returns false when the holder has
    /// no such component of type `C`.
    pub fn modify<C: Clone + Send + Sync + 'static, F: FnOnce(&mut C)>(
        &mut self,
        holder: &HolderId,
        component_id: &str,
        f: F,
    ) -> bool {
        match self.manager.modify::<C, F>(holder, component_id, f) {
            Some(modified) => {
                self.component_modified(&modified);
                true
            }
            None => false,
        }
    }

    /// Sets one field and syncs its component. `Ok(false)` when the holder
    /// has no such component.
    pub fn set<V: Into<Value>>(
        &mut self,
        holder: &HolderId,
        component_id: &str,
        descriptor_id: &str,
        value: V,
    ) -> Result<bool, AttribServerError> {
        match self.manager.set(holder, component_id, descriptor_id, value)? {
            Some(modified) => {
                self.component_modified(&modified);
                Ok(true)
            }
            None => Ok(false),
        }
    }

    /// Attaches a component to a live holder and syncs it like a
    /// modification
    pub fn insert_component(&mut self, holder: &HolderId, component: Box<dyn Replicate>) -> bool {
        match self.manager.insert_component(holder, component) {
            Some(modified) => {
                self.component_modified(&modified);
                true
            }
            None => false,
        }
    }

    /// Detaches a component. The holder's own connection is told; so is every
    /// tracker that mirrors it, when `broadcast_removals` is set.
    pub fn remove_component(&mut self, holder: &HolderId, component_id: &str) -> bool {
        if !self.manager.remove_component(holder, component_id) {
            return false;
        }

        let payload = encode_remove(holder, component_id);

        // without broadcast, trackers keep the stale copy until they stop
        // tracking
        if self.config.broadcast_removals {
            for tracker in self.tracking.forget_component(holder, component_id) {
                self.send_encoded(&tracker, &payload);
            }
        }
        self.send_encoded(holder, &payload);

        debug!("Removed '{}' from holder {}", component_id, holder);
        true
    }

    /// Sends the full state of every component to the holder's own
    /// connection, e.g. once it is ready to receive after session start
    pub fn send_all_to_self(&self, holder: &HolderId) {
        for (_, payload) in self.encode_all(holder, Visibility::All) {
            self.send_encoded(holder, &payload);
        }
    }

    // Tracking

    /// Returns a TrackerScopeRef, which is used to query which holders a
    /// given peer tracks
    pub fn tracker_scope(&self, tracker: &HolderId) -> TrackerScopeRef<'_> {
        TrackerScopeRef::new(self, tracker)
    }

    /// Returns a TrackerScopeMut, which is used to start or stop tracking
    /// holders for a given peer
    pub fn tracker_scope_mut(&mut self, tracker: &HolderId) -> TrackerScopeMut<'_> {
        TrackerScopeMut::new(self, tracker)
    }

    /// Every peer currently tracking `target`
    pub fn trackers_of(&self, target: &HolderId) -> Vec<HolderId> {
        self.tracking.trackers_of(target)
    }

    pub(crate) fn tracker_scope_has(&self, tracker: &HolderId, target: &HolderId) -> bool {
        self.tracking.is_tracking(tracker, target)
    }

    pub(crate) fn tracker_scope_targets(&self, tracker: &HolderId) -> Vec<HolderId> {
        self.tracking.targets_of(tracker)
    }

    pub(crate) fn tracker_scope_sent(&self, tracker: &HolderId, target: &HolderId) -> Vec<String> {
        self.tracking.sent_components(tracker, target)
    }

    // Sync

    /// Public fields go to every tracker, the full state goes to the holder
    /// itself
    fn component_modified(&mut self, modified: &ComponentModified) {
        let ComponentModified {
            holder,
            component_id,
            descriptor_id,
        } = modified;
        trace!(
            "Component '{}' of holder {} modified (descriptor: {:?})",
            component_id,
            holder,
            descriptor_id
        );

        let Some((full, public)) = self.manager.with_component(holder, component_id, |component| {
            let full = encode(holder, component, Visibility::All);
            let public = component
                .has_public_descriptor()
                .then(|| encode(holder, component, Visibility::PublicOnly));
            (full, public)
        }) else {
            return;
        };

        if let Some(public) = public {
            for tracker in self.tracking.trackers_of(holder) {
                if self.send_encoded(&tracker, &public) {
                    self.tracking.record_sent(&tracker, holder, component_id);
                }
            }
        }
        self.send_encoded(holder, &full);
    }

    /// Brings every tracker of `holder` in line with its current bag after
    /// the bag was swapped wholesale: a Remove for each mirrored component
    /// that is gone, then the public state of each component it has now
    pub(crate) fn resync_trackers(&mut self, holder: &HolderId) {
        let trackers = self.tracking.trackers_of(holder);
        if trackers.is_empty() {
            return;
        }
        let current = self.manager.component_ids(holder);
        let payloads = self.encode_all(holder, Visibility::PublicOnly);

        for tracker in trackers {
            for component_id in self.tracking.sent_components(&tracker, holder) {
                if current.contains(&component_id) {
                    continue;
                }
                self.tracking.forget_sent(&tracker, holder, &component_id);
                self.send_encoded(&tracker, &encode_remove(holder, &component_id));
            }
            for (component_id, payload) in &payloads {
                if self.send_encoded(&tracker, payload) {
                    self.tracking.record_sent(&tracker, holder, component_id);
                }
            }
        }
        debug!("Resynced holder {} to its trackers", holder);
    }

    /// One encoded AddOrUpdate per component of `holder`, in component id
    /// order. A component that fails to encode keeps its slot with the error.
    pub(crate) fn encode_all(
        &self,
        holder: &HolderId,
        visibility: Visibility,
    ) -> Vec<(String, Encoded)> {
        self.manager
            .holders()
            .with_bag(holder, |bag| {
                bag.iter()
                    .map(|component| {
                        (
                            component.id().to_string(),
                            encode(holder, component, visibility),
                        )
                    })
                    .collect()
            })
            .unwrap_or_default()
    }

    /// Fire and forget: failures are logged and dropped. Returns whether the
    /// transport took the payload.
    pub(crate) fn send(&self, to: &HolderId, payload: &[u8]) -> bool {
        match self.sender.send(to, payload) {
            Ok(()) => true,
            Err(error) => {
                warn!("Dropped {} byte payload: {}", payload.len(), error);
                false
            }
        }
    }

    /// Like `send`, but a message that could not be encoded is logged and
    /// skipped, so no peer ever gets a value different from the server's
    pub(crate) fn send_encoded(&self, to: &HolderId, payload: &Encoded) -> bool {
        match payload {
            Ok(payload) => self.send(to, payload),
            Err(error) => {
                warn!("Skipped message to {}: {}", to, error);
                false
            }
        }
    }
}

pub(crate) type Encoded = Result<Box<[u8]>, SerdeErr>;

fn encode(holder: &HolderId, component: &dyn Replicate, visibility: Visibility) -> Encoded {
    ComponentMessage::from(AddOrUpdate::new(*holder, component, visibility)).encode()
}

pub(crate) fn encode_remove(holder: &HolderId, component_id: &str) -> Encoded {
    ComponentMessage::from(Remove {
        holder: *holder,
        component_id: component_id.to_string(),
    })
    .encode()
}
