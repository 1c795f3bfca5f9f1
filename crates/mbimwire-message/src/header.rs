use bytes::{BufMut, BytesMut};

use crate::error::Result;
use crate::wire::Reader;

/// Fixed header leading every control message.
///
/// Wire format:
/// ```text
/// ┌─────────────────┬──────────────────┬──────────────────┐
/// │ MessageType     │ MessageLength    │ TransactionId    │
/// │ (4B LE)         │ (4B LE)          │ (4B LE)          │
/// └─────────────────┴──────────────────┴──────────────────┘
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MessageHeader {
    /// Raw message type value.
    pub message_type: u32,
    /// Declared total length of the message this header belongs to.
    pub message_length: u32,
    /// Transaction id correlating requests with their completions.
    pub transaction_id: u32,
}

impl MessageHeader {
    /// Wire size of the message header.
    pub const LEN: usize = 12;

    /// Append the header to `dst`.
    pub fn encode(&self, dst: &mut BytesMut) {
        dst.put_u32_le(self.message_type);
        dst.put_u32_le(self.message_length);
        dst.put_u32_le(self.transaction_id);
    }

    /// Parse the header from the front of `src`.
    pub fn decode(src: &[u8]) -> Result<Self> {
        Self::read(&mut Reader::new(src))
    }

    pub(crate) fn read(reader: &mut Reader<'_>) -> Result<Self> {
        Ok(Self {
            message_type: reader.read_u32()?,
            message_length: reader.read_u32()?,
            transaction_id: reader.read_u32()?,
        })
    }
}

/// Fragment sequencing header.
///
/// Present directly after the message header on fragmentable message types
/// and on every secondary fragment.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FragmentHeader {
    /// Total number of fragments making up the logical message.
    pub total_fragments: u32,
    /// Zero-based index of this fragment.
    pub current_fragment: u32,
}

impl FragmentHeader {
    /// Wire size of the fragment header.
    pub const LEN: usize = 8;

    /// Append the header to `dst`.
    pub fn encode(&self, dst: &mut BytesMut) {
        dst.put_u32_le(self.total_fragments);
        dst.put_u32_le(self.current_fragment);
    }

    /// Parse the header from the front of `src`.
    pub fn decode(src: &[u8]) -> Result<Self> {
        Self::read(&mut Reader::new(src))
    }

    pub(crate) fn read(reader: &mut Reader<'_>) -> Result<Self> {
        Ok(Self {
            total_fragments: reader.read_u32()?,
            current_fragment: reader.read_u32()?,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::MessageError;

    #[test]
    fn test_message_header_roundtrip() {
        let header = MessageHeader {
            message_type: 0x8000_0003,
            message_length: 2048,
            transaction_id: 42,
        };
        let mut buf = BytesMut::new();
        header.encode(&mut buf);
        assert_eq!(buf.len(), MessageHeader::LEN);
        assert_eq!(MessageHeader::decode(&buf).unwrap(), header);
    }

    #[test]
    fn test_message_header_layout() {
        let header = MessageHeader {
            message_type: 1,
            message_length: 16,
            transaction_id: 2,
        };
        let mut buf = BytesMut::new();
        header.encode(&mut buf);
        assert_eq!(
            buf.as_ref(),
            [1, 0, 0, 0, 16, 0, 0, 0, 2, 0, 0, 0]
        );
    }

    #[test]
    fn test_fragment_header_roundtrip() {
        let header = FragmentHeader {
            total_fragments: 5,
            current_fragment: 3,
        };
        let mut buf = BytesMut::new();
        header.encode(&mut buf);
        assert_eq!(buf.len(), FragmentHeader::LEN);
        assert_eq!(FragmentHeader::decode(&buf).unwrap(), header);
    }

    #[test]
    fn test_truncated_header() {
        let err = MessageHeader::decode(&[0; 8]).unwrap_err();
        assert!(matches!(err, MessageError::Truncated { .. }));
    }
}
