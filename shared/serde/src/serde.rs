use crate::{
    byte_reader::ByteReader,
    byte_writer::ByteWrite,
    constants::MAX_STRING_BYTES,
    error::SerdeErr,
    integer::VarInt,
};

/// A type that can be written to and read from the wire
pub trait Serde: Sized {
    /// Writes the value into an outgoing byte stream
    fn ser(&self, writer: &mut dyn ByteWrite);

    /// Reads a value out of an incoming byte stream
    fn de(reader: &mut ByteReader) -> Result<Self, SerdeErr>;
}

/// Fails when `value` is longer than a reader accepts. Writers cannot fail,
/// so anything that may carry a long string checks it before writing.
pub fn check_string_length(value: &str) -> Result<(), SerdeErr> {
    if value.len() > MAX_STRING_BYTES {
        return Err(SerdeErr::StringTooLong {
            length: value.len(),
            max: MAX_STRING_BYTES,
        });
    }
    Ok(())
}

impl Serde for bool {
    fn ser(&self, writer: &mut dyn ByteWrite) {
        writer.write_byte(u8::from(*self));
    }

    fn de(reader: &mut ByteReader) -> Result<Self, SerdeErr> {
        match reader.read_byte()? {
            0 => Ok(false),
            1 => Ok(true),
            byte => Err(SerdeErr::InvalidBool { byte }),
        }
    }
}

impl Serde for String {
    /// Writes the whole string. Over `MAX_STRING_BYTES` the reader will
    /// refuse it, see `check_string_length`.
    fn ser(&self, writer: &mut dyn ByteWrite) {
        VarInt(self.len() as u32).ser(writer);
        writer.write_bytes(self.as_bytes());
    }

    fn de(reader: &mut ByteReader) -> Result<Self, SerdeErr> {
        let length = VarInt::de(reader)?.get() as usize;
        if length > MAX_STRING_BYTES {
            return Err(SerdeErr::StringTooLong {
                length,
                max: MAX_STRING_BYTES,
            });
        }
        let bytes = reader.read_bytes(length)?;
        std::str::from_utf8(bytes)
            .map(str::to_owned)
            .map_err(|_| SerdeErr::InvalidUtf8)
    }
}

/// `[count: i32][count x String]`
impl Serde for Vec<String> {
    fn ser(&self, writer: &mut dyn ByteWrite) {
        (self.len() as i32).ser(writer);
        for item in self {
            item.ser(writer);
        }
    }

    fn de(reader: &mut ByteReader) -> Result<Self, SerdeErr> {
        let count = i32::de(reader)?;
        if count < 0 {
            return Err(SerdeErr::NegativeLength { length: count });
        }
        // each string needs at least its one-byte length prefix
        let mut output = Vec::with_capacity((count as usize).min(reader.remaining()));
        for _ in 0..count {
            output.push(String::de(reader)?);
        }
        Ok(output)
    }
}
