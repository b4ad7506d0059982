use std::default::Default;

use serde::Deserialize;

/// Contains Config properties which will be used by a Client
#[derive(Clone, Debug, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct ClientConfig {
    /// After a malformed or unknown message, skip whatever else that sender
    /// has queued in the same `process_incoming` call
    pub drop_on_protocol_violation: bool,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            drop_on_protocol_violation: true,
        }
    }
}
