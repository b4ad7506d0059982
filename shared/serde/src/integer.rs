use crate::{byte_reader::ByteReader, byte_writer::ByteWrite, error::SerdeErr, serde::Serde};

const VAR_INT_MAX_BYTES: usize = 5;

/// Unsigned LEB128 integer, used for length prefixes
#[derive(Debug, Clone, Copy, Eq, PartialEq, Hash)]
pub struct VarInt(pub u32);

impl VarInt {
    pub fn get(&self) -> u32 {
        self.0
    }
}

impl From<u32> for VarInt {
    fn from(value: u32) -> Self {
        Self(value)
    }
}

impl Serde for VarInt {
    fn ser(&self, writer: &mut dyn ByteWrite) {
        let mut value = self.0;
        loop {
            let byte = (value & 0x7F) as u8;
            value >>= 7;
            if value == 0 {
                writer.write_byte(byte);
                return;
            }
            writer.write_byte(byte | 0x80);
        }
    }

    fn de(reader: &mut ByteReader) -> Result<Self, SerdeErr> {
        let mut output: u32 = 0;
        for index in 0..VAR_INT_MAX_BYTES {
            let byte = reader.read_byte()?;
            output |= u32::from(byte & 0x7F) << (7 * index);
            if byte & 0x80 == 0 {
                return Ok(Self(output));
            }
        }
        Err(SerdeErr::VarIntTooLong)
    }
}

impl Serde for u8 {
    fn ser(&self, writer: &mut dyn ByteWrite) {
        writer.write_byte(*self);
    }

    fn de(reader: &mut ByteReader) -> Result<Self, SerdeErr> {
        reader.read_byte()
    }
}

impl Serde for i32 {
    fn ser(&self, writer: &mut dyn ByteWrite) {
        writer.write_bytes(&self.to_be_bytes());
    }

    fn de(reader: &mut ByteReader) -> Result<Self, SerdeErr> {
        Ok(i32::from_be_bytes(reader.read_array::<4>()?))
    }
}

impl Serde for i64 {
    fn ser(&self, writer: &mut dyn ByteWrite) {
        writer.write_bytes(&self.to_be_bytes());
    }

    fn de(reader: &mut ByteReader) -> Result<Self, SerdeErr> {
        Ok(i64::from_be_bytes(reader.read_array::<8>()?))
    }
}
