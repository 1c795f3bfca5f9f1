//! Secondary fragments.
//!
//! When a fragmentable message is split, fragment 0 is the message itself
//! with a truncated payload; fragments 1..N-1 are secondary fragments, which
//! carry only the two fixed headers and a slice of the payload:
//!
//! ```text
//! ┌────────────────────┬─────────────────────┬──────────────────┐
//! │ MessageHeader (12B)│ FragmentHeader (8B) │ Payload slice    │
//! └────────────────────┴─────────────────────┴──────────────────┘
//! ```
//!
//! The message type repeats the primary fragment's type so the receiver can
//! correlate fragments without extra state.

use bytes::{BufMut, Bytes, BytesMut};

use crate::error::{MessageError, Result};
use crate::header::{FragmentHeader, MessageHeader};
use crate::types::MessageType;
use crate::wire::Reader;

/// Fragment 1..N-1 of a fragmented control message.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SecondaryFragment {
    /// The primary fragment's message type, repeated on every fragment.
    pub message_type: MessageType,
    pub transaction_id: u32,
    pub total_fragments: u32,
    pub current_fragment: u32,
    /// The payload slice carried by this fragment.
    pub payload: Bytes,
}

impl SecondaryFragment {
    /// Fixed (non-payload) wire size of a secondary fragment.
    pub const STRUCT_LEN: usize = MessageHeader::LEN + FragmentHeader::LEN;

    /// Total serialized length in bytes.
    pub fn message_length(&self) -> u32 {
        (Self::STRUCT_LEN + self.payload.len()) as u32
    }

    /// Append the serialized fragment to `dst`.
    pub fn encode(&self, dst: &mut BytesMut) {
        dst.reserve(self.message_length() as usize);
        MessageHeader {
            message_type: self.message_type.raw(),
            message_length: self.message_length(),
            transaction_id: self.transaction_id,
        }
        .encode(dst);
        FragmentHeader {
            total_fragments: self.total_fragments,
            current_fragment: self.current_fragment,
        }
        .encode(dst);
        dst.put_slice(&self.payload);
    }

    /// Serialize into a fresh buffer.
    pub fn to_bytes(&self) -> Bytes {
        let mut buf = BytesMut::with_capacity(self.message_length() as usize);
        self.encode(&mut buf);
        buf.freeze()
    }

    /// Parse a secondary fragment belonging to an `expected_type` message.
    pub fn decode(expected_type: MessageType, src: &[u8]) -> Result<Self> {
        let mut reader = Reader::new(src);
        let header = MessageHeader::read(&mut reader)?;
        if header.message_type != expected_type.raw() {
            return Err(MessageError::TypeMismatch {
                expected: expected_type,
                found: header.message_type,
            });
        }
        let fragment = FragmentHeader::read(&mut reader)?;
        Ok(Self {
            message_type: expected_type,
            transaction_id: header.transaction_id,
            total_fragments: fragment.total_fragments,
            current_fragment: fragment.current_fragment,
            payload: Bytes::copy_from_slice(reader.rest()),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::schema;

    #[test]
    fn test_struct_len_matches_schema() {
        assert_eq!(
            SecondaryFragment::STRUCT_LEN,
            schema::COMMAND_FRAGMENT.struct_len()
        );
    }

    #[test]
    fn test_roundtrip() {
        let fragment = SecondaryFragment {
            message_type: MessageType::CommandDone,
            transaction_id: 17,
            total_fragments: 4,
            current_fragment: 2,
            payload: Bytes::from_static(b"middle of the buffer"),
        };
        let bytes = fragment.to_bytes();
        assert_eq!(
            bytes.len(),
            SecondaryFragment::STRUCT_LEN + fragment.payload.len()
        );
        assert_eq!(
            SecondaryFragment::decode(MessageType::CommandDone, &bytes).unwrap(),
            fragment
        );
    }

    #[test]
    fn test_decode_rejects_other_family() {
        let fragment = SecondaryFragment {
            message_type: MessageType::Command,
            transaction_id: 1,
            total_fragments: 2,
            current_fragment: 1,
            payload: Bytes::new(),
        };
        let err = SecondaryFragment::decode(MessageType::CommandDone, &fragment.to_bytes())
            .unwrap_err();
        assert!(matches!(err, MessageError::TypeMismatch { .. }));
    }
}
