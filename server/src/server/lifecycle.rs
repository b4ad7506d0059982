use std::sync::Arc;

use log::{debug, info, warn};

use attrib_shared::{ComponentBag, Document, HolderId, Replicate, Visibility};

use super::server::encode_remove;
use crate::{AttribServerError, Server};

/// Session hooks the host calls as holders come and go
impl Server {
    /// Builds the holder's bag: one fresh instance per auto-apply component,
    /// with the persistent fields found under the namespace of `persisted`
    /// merged in before the bag becomes visible. A holder that is still live
    /// has its bag replaced.
    pub fn on_session_start(
        &mut self,
        holder: &HolderId,
        persisted: &Document,
    ) -> Result<(), AttribServerError> {
        let saved = persisted.compound(&self.config.namespace);
        let prototypes = self.catalog().auto_apply();
        let fill = |bag: &mut ComponentBag| {
            fill_defaults(bag, &prototypes);
            if let Some(saved) = saved {
                bag.decode(saved, true);
            }
        };

        let holders = self.manager.holders();
        if holders.contains(holder) {
            warn!("Session restarted for live holder {}, replacing its components", holder);
            holders.replace_with_init(*holder, fill)?;
        } else {
            holders.register_with_init(*holder, fill)?;
        }

        self.resync_trackers(holder);

        info!(
            "Session started for holder {} ({} components, persisted data: {})",
            holder,
            prototypes.len(),
            saved.is_some()
        );
        Ok(())
    }

    /// Evicts the holder's bag. Every peer tracking it is sent one Remove per
    /// component it mirrors, then every tracking relation the holder was part
    /// of is forgotten. Whatever was saved survives outside.
    pub fn on_session_end(&mut self, holder: &HolderId) {
        for tracker in self.tracking.trackers_of(holder) {
            if let Some(sent) = self.tracking.stop(&tracker, holder) {
                self.send_removes(&tracker, holder, sent);
            }
        }

        if self.manager.holders().remove(holder).is_none() {
            debug!("Session end for unknown holder {}", holder);
        }
        self.tracking.remove_holder(holder);
        info!("Session ended for holder {}", holder);
    }

    /// Gives `new` a deep copy of everything `old` holds, every field
    /// included. When `old` has no bag, `new` gets fresh auto-apply
    /// components instead. Peers already tracking `new` are resynced.
    pub fn on_clone(&mut self, old: &HolderId, new: &HolderId) -> Result<(), AttribServerError> {
        let holders = self.manager.holders();
        match holders.get(old) {
            Some(bag) => {
                holders.replace_with_init(*new, |target| *target = bag)?;
                debug!("Cloned components of holder {} onto {}", old, new);
            }
            None => {
                let prototypes = self.catalog().auto_apply();
                holders.replace_with_init(*new, |target| fill_defaults(target, &prototypes))?;
                debug!("Holder {} has no components, {} gets defaults", old, new);
            }
        }
        self.resync_trackers(new);
        Ok(())
    }

    /// `{ namespace: { component_id: { descriptor_id: value } } }` with
    /// persistent fields only. An unknown holder yields an empty namespace.
    pub fn on_save(&self, holder: &HolderId) -> Document {
        let mut document = Document::new();
        let root = document.compound_mut(&self.config.namespace);
        if self
            .manager
            .holders()
            .with_bag(holder, |bag| bag.encode(root, true))
            .is_none()
        {
            debug!("Saved nothing for unknown holder {}", holder);
        }
        document
    }

    /// Sends `tracker` the public state of every component `target` has, one
    /// message per component
    pub fn on_start_tracking(&mut self, tracker: &HolderId, target: &HolderId) {
        if !self.tracking.start(tracker, target) {
            debug!("{} already tracks {}, sending state again", tracker, target);
        }

        for (component_id, payload) in self.encode_all(target, Visibility::PublicOnly) {
            if self.send_encoded(tracker, &payload) {
                self.tracking.record_sent(tracker, target, &component_id);
            }
        }
    }

    /// Sends `tracker` one Remove per component of `target` it was sent
    pub fn on_stop_tracking(&mut self, tracker: &HolderId, target: &HolderId) {
        let Some(sent) = self.tracking.stop(tracker, target) else {
            debug!("{} was not tracking {}", tracker, target);
            return;
        };

        self.send_removes(tracker, target, sent);
    }

    fn send_removes<I: IntoIterator<Item = String>>(
        &self,
        tracker: &HolderId,
        target: &HolderId,
        component_ids: I,
    ) {
        for component_id in component_ids {
            self.send_encoded(tracker, &encode_remove(target, &component_id));
        }
    }
}

fn fill_defaults(bag: &mut ComponentBag, prototypes: &[Arc<dyn Replicate>]) {
    for prototype in prototypes {
        bag.insert(prototype.create());
    }
}
