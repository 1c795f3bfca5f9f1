use bytes::{Bytes, BytesMut};

use crate::error::{MessageError, Result};
use crate::header::MessageHeader;
use crate::schema::MessageSchema;

/// A concrete control message type with a static wire schema.
///
/// `message_length` is derived from content rather than stored, so an
/// encoded message's declared length always equals its serialized length.
/// The declared lengths arriving on the wire are validated where they
/// matter: at reassembly time, against the reassembled payload.
pub trait ControlMessage: Sized {
    /// The static field table describing this message's wire layout.
    const SCHEMA: &'static MessageSchema;

    /// Total serialized length in bytes.
    fn message_length(&self) -> u32;

    /// Append the serialized message to `dst`.
    fn encode(&self, dst: &mut BytesMut);

    /// Parse a message from a complete raw buffer.
    ///
    /// Fails with `TypeMismatch` if the leading header carries a different
    /// message type, and `Truncated` if the buffer ends mid-field. Trailing
    /// payload bytes are taken as-is; declared payload lengths are checked
    /// by the reassembler, not here.
    fn decode(src: &[u8]) -> Result<Self>;

    /// Serialize into a fresh buffer.
    fn to_bytes(&self) -> Bytes {
        let mut buf = BytesMut::with_capacity(self.message_length() as usize);
        self.encode(&mut buf);
        buf.freeze()
    }
}

pub(crate) fn check_type(header: &MessageHeader, schema: &MessageSchema) -> Result<()> {
    if header.message_type != schema.message_type.raw() {
        return Err(MessageError::TypeMismatch {
            expected: schema.message_type,
            found: header.message_type,
        });
    }
    Ok(())
}
