/// In-memory transport for E2E testing
/// Routes server payloads straight into the incoming queue of the client that
/// owns the addressed holder

use std::{collections::HashMap, sync::Arc};

use parking_lot::Mutex;

use attrib_server::transport::{PacketSender, SendError};
use attrib_shared::{HolderId, IncomingQueue};

/// Sender id the clients see on every payload
pub const SERVER_ID: HolderId = HolderId::nil();

#[derive(Clone, Default)]
pub struct LocalTransport {
    routes: Arc<Mutex<HashMap<HolderId, Arc<IncomingQueue>>>>,
}

impl LocalTransport {
    pub fn new() -> Self {
        Self::default()
    }

    /// Delivers everything addressed to `holder` into `queue`
    pub fn connect(&self, holder: HolderId, queue: Arc<IncomingQueue>) {
        self.routes.lock().insert(holder, queue);
    }

    pub fn disconnect(&self, holder: &HolderId) {
        self.routes.lock().remove(holder);
    }
}

impl PacketSender for LocalTransport {
    fn send(&self, to: &HolderId, payload: &[u8]) -> Result<(), SendError> {
        match self.routes.lock().get(to) {
            Some(queue) => {
                queue.push(SERVER_ID, payload.into());
                Ok(())
            }
            None => Err(SendError::new(to, "no connection")),
        }
    }
}
