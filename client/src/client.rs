use std::{collections::HashSet, sync::Arc};

use log::{info, trace, warn};

use attrib_shared::{
    Catalog, ComponentManager, ComponentMessage, Dispatcher, HolderId, IncomingQueue,
    MessageKind, Replicate, Value,
};

use crate::{
    mirror::{apply_add_or_update, apply_remove},
    AttribClientError, ClientConfig, ClientEvent,
};

type Outcome = Result<Option<ClientEvent>, AttribClientError>;

/// Mirror of the holder components the server has sent. Transports push raw
/// payloads into `incoming()` from any thread; `process_incoming` applies them
/// on the thread that owns the Client.
pub struct Client {
    config: ClientConfig,
    manager: ComponentManager,
    incoming: Arc<IncomingQueue>,
    dispatcher: Dispatcher<Outcome>,
}

impl Client {
    /// Create a new Client. The catalog must match the server's, and is
    /// locked here.
    pub fn new(client_config: ClientConfig, catalog: Arc<Catalog>) -> Self {
        catalog.lock();
        info!("Client started with {} components", catalog.len());

        let manager = ComponentManager::new(catalog);
        let mut dispatcher = Dispatcher::new();
        {
            let manager = manager.clone();
            dispatcher.register(MessageKind::AddOrUpdate, move |_, message| match message {
                ComponentMessage::AddOrUpdate(message) => apply_add_or_update(&manager, message),
                ComponentMessage::Remove(_) => Ok(None),
            });
        }
        {
            let manager = manager.clone();
            dispatcher.register(MessageKind::Remove, move |_, message| match message {
                ComponentMessage::Remove(message) => apply_remove(&manager, message),
                ComponentMessage::AddOrUpdate(_) => Ok(None),
            });
        }

        Self {
            config: client_config,
            manager,
            incoming: Arc::new(IncomingQueue::new()),
            dispatcher,
        }
    }

    pub fn config(&self) -> &ClientConfig {
        &self.config
    }

    /// Queue that transports push received payloads into
    pub fn incoming(&self) -> Arc<IncomingQueue> {
        self.incoming.clone()
    }

    /// Queues one payload received from `sender`
    pub fn receive(&self, sender: HolderId, payload: Box<[u8]>) {
        self.incoming.push(sender, payload);
    }

    /// Decodes and applies everything queued so far, in arrival order
    pub fn process_incoming(&mut self) -> Vec<ClientEvent> {
        let mut events = Vec::new();
        let mut violators = HashSet::new();

        for (sender, payload) in self.incoming.drain() {
            if violators.contains(&sender) {
                trace!("Skipping payload from {} after a protocol violation", sender);
                continue;
            }
            match self.apply(&sender, &payload) {
                Ok(Some(event)) => events.push(event),
                Ok(None) => {}
                Err(AttribClientError::Protocol(error)) => {
                    warn!("Protocol violation from {}: {}", sender, error);
                    if self.config.drop_on_protocol_violation {
                        violators.insert(sender);
                    }
                    events.push(ClientEvent::ProtocolViolation { sender, error });
                }
                Err(error) => warn!("Could not apply payload from {}: {}", sender, error),
            }
        }

        events
    }

    /// Decodes and applies one payload right away, bypassing the queue. Only
    /// call this on the thread that owns the Client.
    pub fn apply(&mut self, sender: &HolderId, payload: &[u8]) -> Outcome {
        let message = ComponentMessage::decode(self.manager.catalog(), payload)?;
        self.dispatcher.dispatch(sender, message).unwrap_or(Ok(None))
    }

    // Mirror

    pub fn manager(&self) -> &ComponentManager {
        &self.manager
    }

    pub fn holders(&self) -> Vec<HolderId> {
        self.manager.holders().holders()
    }

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

    pub fn get_all(&self, holder: &HolderId) -> Vec<Box<dyn Replicate>> {
        self.manager.get_all(holder)
    }

    pub fn component_ids(&self, holder: &HolderId) -> Vec<String> {
        self.manager.component_ids(holder)
    }

    /// Changes mirrored state locally. Nothing is sent; fields the server
    /// never carries keep these values across updates.
    pub fn modify<C: Clone + Send + Sync + 'static, F: FnOnce(&mut C)>(
        &self,
        holder: &HolderId,
        component_id: &str,
        f: F,
    ) -> bool {
        self.manager.modify::<C, F>(holder, component_id, f).is_some()
    }
}
