/// Captures every outbound payload so tests can assert on exactly what the
/// server sent, and to whom

use std::sync::Arc;

use parking_lot::Mutex;

use attrib_server::transport::{PacketSender, SendError};
use attrib_shared::{Catalog, ComponentMessage, HolderId, Value};

/// One decoded outbound message
#[derive(Clone, Debug, PartialEq)]
pub enum Sent {
    AddOrUpdate {
        to: HolderId,
        holder: HolderId,
        component_id: String,
        fields: Vec<(String, Value)>,
    },
    Remove {
        to: HolderId,
        holder: HolderId,
        component_id: String,
    },
}

impl Sent {
    pub fn to(&self) -> &HolderId {
        match self {
            Sent::AddOrUpdate { to, .. } | Sent::Remove { to, .. } => to,
        }
    }

    pub fn component_id(&self) -> &str {
        match self {
            Sent::AddOrUpdate { component_id, .. } | Sent::Remove { component_id, .. } => {
                component_id
            }
        }
    }

    pub fn is_remove(&self) -> bool {
        matches!(self, Sent::Remove { .. })
    }
}

#[derive(Clone, Default)]
pub struct RecordingSender {
    sent: Arc<Mutex<Vec<(HolderId, Box<[u8]>)>>>,
}

impl RecordingSender {
    pub fn new() -> Self {
        Self::default()
    }

    /// Raw payloads sent since the last call
    pub fn take_raw(&self) -> Vec<(HolderId, Box<[u8]>)> {
        std::mem::take(&mut *self.sent.lock())
    }

    /// Payloads sent since the last call, decoded against `catalog`
    pub fn take(&self, catalog: &Catalog) -> Vec<Sent> {
        self.take_raw()
            .into_iter()
            .map(|(to, payload)| match ComponentMessage::decode(catalog, &payload) {
                Ok(ComponentMessage::AddOrUpdate(message)) => Sent::AddOrUpdate {
                    to,
                    holder: message.holder,
                    component_id: message.component_id().to_string(),
                    fields: message
                        .fields
                        .iter()
                        .filter_map(|id| message.component.get(id).map(|value| (id.clone(), value)))
                        .collect(),
                },
                Ok(ComponentMessage::Remove(message)) => Sent::Remove {
                    to,
                    holder: message.holder,
                    component_id: message.component_id,
                },
                Err(error) => panic!("server sent an undecodable payload: {}", error),
            })
            .collect()
    }
}

impl PacketSender for RecordingSender {
    fn send(&self, to: &HolderId, payload: &[u8]) -> Result<(), SendError> {
        self.sent.lock().push((*to, payload.into()));
        Ok(())
    }
}
