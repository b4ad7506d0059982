//! # Attrib Client
//! The receiving side of attrib. Queues payloads from the server, then
//! decodes and applies them to a local mirror of holder components on the
//! owning thread.

#![deny(
    trivial_casts,
    trivial_numeric_casts,
    unstable_features,
    unused_import_braces
)]

pub mod shared {
    pub use attrib_shared::{
        AddOrUpdate, Catalog, ComponentMessage, ComponentSchema, Descriptor, Document, HolderId,
        IncomingQueue, ProtocolError, Remove, Replicate, Value, ValueKind, Visibility,
    };
}

mod client;
mod client_config;
mod error;
mod events;
mod mirror;

pub use client::Client;
pub use client_config::ClientConfig;
pub use error::AttribClientError;
pub use events::ClientEvent;
