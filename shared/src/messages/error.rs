use attrib_serde::SerdeErr;
use thiserror::Error;

/// Errors that make an incoming payload unusable. Each one is fatal for the
/// message it was found in.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ProtocolError {
    /// The bytes do not form a well-formed message
    #[error("Malformed payload: {0}")]
    Serde(#[from] SerdeErr),

    /// The component id is not in the local catalog
    #[error("Unknown component '{component_id}'")]
    UnknownComponent { component_id: String },

    /// The component has no descriptor with this id
    #[error("Component '{component_id}' has no descriptor '{descriptor_id}'")]
    UnknownDescriptor {
        component_id: String,
        descriptor_id: String,
    },
}
