use thiserror::Error;

/// Errors that can occur while writing to a `Registry`
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RegistryError {
    /// The key already has a value
    #[error("Key already registered: {key}")]
    AlreadyRegistered { key: String },

    /// `lock()` was called, no further writes are allowed
    #[error("Registry locked (no further registrations allowed)")]
    Locked,
}
