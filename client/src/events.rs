use attrib_shared::{HolderId, ProtocolError};

/// What a call to `Client::process_incoming` changed in the mirror
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum ClientEvent {
    /// A component the mirror did not have arrived
    Inserted {
        holder: HolderId,
        component_id: String,
    },
    /// Fields of a mirrored component were overwritten
    Updated {
        holder: HolderId,
        component_id: String,
        fields: Vec<String>,
    },
    /// A mirrored component was dropped
    Removed {
        holder: HolderId,
        component_id: String,
    },
    /// A payload from `sender` was unusable. The host may drop the
    /// connection.
    ProtocolViolation {
        sender: HolderId,
        error: ProtocolError,
    },
}

impl ClientEvent {
    pub fn holder(&self) -> Option<&HolderId> {
        match self {
            ClientEvent::Inserted { holder, .. }
            | ClientEvent::Updated { holder, .. }
            | ClientEvent::Removed { holder, .. } => Some(holder),
            ClientEvent::ProtocolViolation { .. } => None,
        }
    }

    pub fn component_id(&self) -> Option<&str> {
        match self {
            ClientEvent::Inserted { component_id, .. }
            | ClientEvent::Updated { component_id, .. }
            | ClientEvent::Removed { component_id, .. } => Some(component_id),
            ClientEvent::ProtocolViolation { .. } => None,
        }
    }
}
