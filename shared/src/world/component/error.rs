use thiserror::Error;

use super::value::ValueKind;

/// Errors that can occur while building or accessing components
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ComponentError {
    /// A component was declared without an id
    #[error("Component id must not be empty")]
    EmptyId,

    /// Two descriptors of one component normalize to the same id
    #[error("Descriptor id '{descriptor_id}' declared twice in component '{component_id}'")]
    DuplicateDescriptor {
        component_id: String,
        descriptor_id: String,
    },

    /// No descriptor with this id exists on the component
    #[error("Component '{component_id}' has no descriptor '{descriptor_id}'")]
    UnknownDescriptor {
        component_id: String,
        descriptor_id: String,
    },

    /// A value of the wrong kind was handed to a descriptor
    #[error("Descriptor '{descriptor_id}' holds {expected} values, got {found}")]
    KindMismatch {
        descriptor_id: String,
        expected: ValueKind,
        found: ValueKind,
    },
}

/// Errors that can occur while building the component catalog
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CatalogError {
    /// Another component already uses this id
    #[error("Component '{component_id}' is already registered in the catalog")]
    Duplicate { component_id: String },

    /// The catalog was locked after startup
    #[error("Catalog is locked, components must be registered during startup")]
    Locked,

    /// The schema itself was invalid
    #[error(transparent)]
    Component(#[from] ComponentError),
}
