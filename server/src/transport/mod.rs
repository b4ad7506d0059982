use std::{fmt, sync::Arc};

use attrib_shared::HolderId;
use thiserror::Error;

/// A payload could not be handed to the transport
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("Failed to send to {to}: {reason}")]
pub struct SendError {
    pub to: HolderId,
    pub reason: String,
}

impl SendError {
    pub fn new<R: fmt::Display>(to: &HolderId, reason: R) -> Self {
        Self {
            to: *to,
            reason: reason.to_string(),
        }
    }
}

/// Outbound half of the byte transport. Delivery to one connection must be
/// in order; beyond that the server expects nothing.
pub trait PacketSender: Send + Sync {
    /// Queues `payload` for the connection owned by `to`
    fn send(&self, to: &HolderId, payload: &[u8]) -> Result<(), SendError>;
}

impl<S: PacketSender + ?Sized> PacketSender for Arc<S> {
    fn send(&self, to: &HolderId, payload: &[u8]) -> Result<(), SendError> {
        (**self).send(to, payload)
    }
}
