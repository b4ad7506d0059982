use std::collections::HashMap;

use log::warn;

use crate::{
    messages::{component_message::ComponentMessage, message_kind::MessageKind},
    types::HolderId,
};

type Handler<R> = Box<dyn FnMut(&HolderId, ComponentMessage) -> R + Send>;

/// Routes decoded messages to one handler per kind. Handlers always learn
/// which peer sent the message.
pub struct Dispatcher<R = ()> {
    handlers: HashMap<MessageKind, Handler<R>>,
}

impl<R> Dispatcher<R> {
    pub fn new() -> Self {
        Self {
            handlers: HashMap::new(),
        }
    }

    /// Installs the handler for `kind`, replacing any previous one
    pub fn register<F>(&mut self, kind: MessageKind, handler: F)
    where
        F: FnMut(&HolderId, ComponentMessage) -> R + Send + 'static,
    {
        if self.handlers.insert(kind, Box::new(handler)).is_some() {
            warn!("Replaced the handler for {:?}", kind);
        }
    }

    pub fn handles(&self, kind: MessageKind) -> bool {
        self.handlers.contains_key(&kind)
    }

    /// `None` when no handler is installed for the message's kind
    pub fn dispatch(&mut self, sender: &HolderId, message: ComponentMessage) -> Option<R> {
        let kind = message.kind();
        match self.handlers.get_mut(&kind) {
            Some(handler) => Some(handler(sender, message)),
            None => {
                warn!("No handler for {:?} from {}", kind, sender);
                None
            }
        }
    }
}

impl<R> Default for Dispatcher<R> {
    fn default() -> Self {
        Self::new()
    }
}
