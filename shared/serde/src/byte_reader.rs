use crate::error::SerdeErr;

/// Cursor over an incoming byte buffer
pub struct ByteReader<'b> {
    buffer: &'b [u8],
    index: usize,
}

impl<'b> ByteReader<'b> {
    pub fn new(buffer: &'b [u8]) -> Self {
        Self { buffer, index: 0 }
    }

    pub fn remaining(&self) -> usize {
        self.buffer.len() - self.index
    }

    pub fn is_empty(&self) -> bool {
        self.remaining() == 0
    }

    pub fn read_byte(&mut self) -> Result<u8, SerdeErr> {
        let byte = *self.buffer.get(self.index).ok_or(SerdeErr::UnexpectedEnd {
            needed: 1,
            remaining: 0,
        })?;
        self.index += 1;
        Ok(byte)
    }

    pub fn read_bytes(&mut self, count: usize) -> Result<&'b [u8], SerdeErr> {
        let remaining = self.remaining();
        if count > remaining {
            return Err(SerdeErr::UnexpectedEnd {
                needed: count,
                remaining,
            });
        }
        let slice = &self.buffer[self.index..self.index + count];
        self.index += count;
        Ok(slice)
    }

    pub fn read_array<const N: usize>(&mut self) -> Result<[u8; N], SerdeErr> {
        let mut output = [0u8; N];
        output.copy_from_slice(self.read_bytes(N)?);
        Ok(output)
    }

    /// Fails with `TrailingBytes` if anything is left unread
    pub fn finish(&self) -> Result<(), SerdeErr> {
        match self.remaining() {
            0 => Ok(()),
            remaining => Err(SerdeErr::TrailingBytes { remaining }),
        }
    }
}
