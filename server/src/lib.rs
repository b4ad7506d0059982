//! # Attrib Server
//! The authoritative side of attrib. Owns every holder's components, loads
//! and saves them through the lifecycle hooks, and syncs changes to the
//! holder's own connection and to the peers tracking it.

#![deny(
    trivial_casts,
    trivial_numeric_casts,
    unstable_features,
    unused_import_braces
)]

pub mod transport;
pub mod shared {
    pub use attrib_shared::{
        AddOrUpdate, Catalog, ComponentMessage, ComponentSchema, Descriptor, Document, HolderId,
        Remove, Replicate, Value, ValueKind, Visibility,
    };
}

mod error;
mod server;
mod tracker_scope;
mod tracking;

pub use error::AttribServerError;
pub use server::{Server, ServerConfig};
pub use tracker_scope::{TrackerScopeMut, TrackerScopeRef};
