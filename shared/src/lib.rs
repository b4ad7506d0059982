//! # Attrib Shared
//! Component model, holder storage and sync messages shared between
//! attrib-server & attrib-client crates.

#![deny(trivial_numeric_casts, unstable_features, unused_import_braces)]

pub use attrib_serde::{
    check_string_length, ByteReader, ByteWrite, ByteWriter, Serde, SerdeErr, VarInt,
    MAX_STRING_BYTES,
};

mod messages;
mod registry;
mod types;
mod world;

pub use messages::{
    component_message::{AddOrUpdate, ComponentMessage, Remove, Visibility},
    dispatcher::Dispatcher,
    error::ProtocolError,
    incoming_queue::IncomingQueue,
    message_kind::MessageKind,
};
pub use registry::{Registry, RegistryError};
pub use types::HolderId;
pub use world::{
    component::{
        catalog::Catalog,
        descriptor::{Descriptor, DescriptorInfo},
        error::{CatalogError, ComponentError},
        replicate::{Instance, Replicate},
        schema::{ComponentSchema, ComponentSchemaBuilder},
        value::{FieldValue, Value, ValueKind},
    },
    component_manager::{ComponentManager, ComponentModified},
    document::{Document, Tag},
    holder::{ComponentBag, HolderRegistry},
};
