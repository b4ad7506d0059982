use attrib_shared::{ComponentError, RegistryError};
use thiserror::Error;

/// Errors returned by the `Server` API
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum AttribServerError {
    /// A field write did not match the component's schema
    #[error("Component error: {0}")]
    Component(#[from] ComponentError),

    /// The holder registry refused a bag
    #[error("Holder registry error: {0}")]
    Registry(#[from] RegistryError),
}
