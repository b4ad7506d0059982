use std::default::Default;

use serde::Deserialize;

/// Contains Config properties which will be used by the Server
#[derive(Clone, Debug, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    /// Root key of the persisted document under which every component
    /// sub-tree is stored
    pub namespace: String,
    /// When a component is removed from a holder, also send a Remove to every
    /// tracking peer that was sent that component
    pub broadcast_removals: bool,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            namespace: "attrib".to_string(),
            broadcast_removals: true,
        }
    }
}
