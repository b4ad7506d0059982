use attrib_shared::{ProtocolError, RegistryError};
use thiserror::Error;

/// Errors returned by the `Client` API
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum AttribClientError {
    /// The payload could not be decoded against the local catalog
    #[error("Protocol violation: {0}")]
    Protocol(#[from] ProtocolError),

    /// The mirror refused a new holder
    #[error("Holder registry error: {0}")]
    Registry(#[from] RegistryError),
}
