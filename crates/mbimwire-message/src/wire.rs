//! Checked little-endian cursor over a raw message buffer.

use crate::error::{MessageError, Result};

pub(crate) struct Reader<'a> {
    src: &'a [u8],
    pos: usize,
}

impl<'a> Reader<'a> {
    pub(crate) fn new(src: &'a [u8]) -> Self {
        Self { src, pos: 0 }
    }

    fn take(&mut self, len: usize) -> Result<&'a [u8]> {
        let available = self.src.len() - self.pos;
        if available < len {
            return Err(MessageError::Truncated {
                needed: len - available,
                available,
            });
        }
        let slice = &self.src[self.pos..self.pos + len];
        self.pos += len;
        Ok(slice)
    }

    pub(crate) fn read_u32(&mut self) -> Result<u32> {
        let bytes = self.take(4)?;
        Ok(u32::from_le_bytes(bytes.try_into().unwrap()))
    }

    pub(crate) fn read_uuid(&mut self) -> Result<[u8; 16]> {
        let bytes = self.take(16)?;
        Ok(bytes.try_into().unwrap())
    }

    /// All bytes not yet consumed. Used for trailing payload buffers.
    pub(crate) fn rest(&mut self) -> &'a [u8] {
        let slice = &self.src[self.pos..];
        self.pos = self.src.len();
        slice
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_read_u32_le() {
        let mut reader = Reader::new(&[0x01, 0x00, 0x00, 0x80, 0xff]);
        assert_eq!(reader.read_u32().unwrap(), 0x8000_0001);
        assert_eq!(reader.rest(), &[0xff]);
    }

    #[test]
    fn test_truncated_read() {
        let mut reader = Reader::new(&[0x01, 0x02]);
        let err = reader.read_u32().unwrap_err();
        assert!(matches!(
            err,
            MessageError::Truncated {
                needed: 2,
                available: 2
            }
        ));
    }

    #[test]
    fn test_rest_after_reads() {
        let mut reader = Reader::new(&[0; 20]);
        reader.read_uuid().unwrap();
        assert_eq!(reader.rest().len(), 4);
        assert!(reader.rest().is_empty());
    }
}
