use attrib_serde::{ByteReader, ByteWrite, Serde, SerdeErr};

/// Leading byte of every payload, multiplexing the message shapes over one
/// channel
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum MessageKind {
    AddOrUpdate,
    Remove,
}

impl MessageKind {
    pub fn to_u8(&self) -> u8 {
        match self {
            MessageKind::AddOrUpdate => 0,
            MessageKind::Remove => 1,
        }
    }

    pub fn from_u8(byte: u8) -> Option<Self> {
        match byte {
            0 => Some(MessageKind::AddOrUpdate),
            1 => Some(MessageKind::Remove),
            _ => None,
        }
    }
}

impl Serde for MessageKind {
    fn ser(&self, writer: &mut dyn ByteWrite) {
        writer.write_byte(self.to_u8());
    }

    fn de(reader: &mut ByteReader) -> Result<Self, SerdeErr> {
        let kind = reader.read_byte()?;
        Self::from_u8(kind).ok_or(SerdeErr::InvalidMessageKind { kind })
    }
}
