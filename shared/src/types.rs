use std::fmt;

use attrib_serde::{ByteReader, ByteWrite, Serde, SerdeErr};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Stable opaque identifier of a session entity that owns components
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct HolderId(Uuid);

impl HolderId {
    pub fn new(uuid: Uuid) -> Self {
        Self(uuid)
    }

    pub fn random() -> Self {
        Self(Uuid::new_v4())
    }

    pub const fn from_u128(value: u128) -> Self {
        Self(Uuid::from_u128(value))
    }

    /// The all-zero id, for senders that are not holders themselves
    pub const fn nil() -> Self {
        Self(Uuid::nil())
    }

    pub fn uuid(&self) -> Uuid {
        self.0
    }
}

impl From<Uuid> for HolderId {
    fn from(uuid: Uuid) -> Self {
        Self(uuid)
    }
}

impl fmt::Display for HolderId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

// 16 raw bytes, most significant first
impl Serde for HolderId {
    fn ser(&self, writer: &mut dyn ByteWrite) {
        writer.write_bytes(self.0.as_bytes());
    }

    fn de(reader: &mut ByteReader) -> Result<Self, SerdeErr> {
        Ok(Self(Uuid::from_bytes(reader.read_array::<16>()?)))
    }
}
