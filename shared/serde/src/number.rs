use crate::{byte_reader::ByteReader, byte_writer::ByteWrite, error::SerdeErr, serde::Serde};

// IEEE-754 bit patterns, big-endian

impl Serde for f32 {
    fn ser(&self, writer: &mut dyn ByteWrite) {
        writer.write_bytes(&self.to_bits().to_be_bytes());
    }

    fn de(reader: &mut ByteReader) -> Result<Self, SerdeErr> {
        Ok(f32::from_bits(u32::from_be_bytes(reader.read_array::<4>()?)))
    }
}

impl Serde for f64 {
    fn ser(&self, writer: &mut dyn ByteWrite) {
        writer.write_bytes(&self.to_bits().to_be_bytes());
    }

    fn de(reader: &mut ByteReader) -> Result<Self, SerdeErr> {
        Ok(f64::from_bits(u64::from_be_bytes(reader.read_array::<8>()?)))
    }
}
