use crate::types::MessageType;

/// Errors that can occur while encoding or decoding control messages.
#[derive(Debug, thiserror::Error)]
pub enum MessageError {
    /// The buffer ended before a field could be read in full.
    #[error("truncated message (needed {needed} more bytes, {available} available)")]
    Truncated { needed: usize, available: usize },

    /// The message type in the header is not a known MBIM control type.
    #[error("unknown message type 0x{raw:08x}")]
    UnknownMessageType { raw: u32 },

    /// The header's message type does not match the type being decoded.
    #[error("message type mismatch (expected {expected}, found 0x{found:08x})")]
    TypeMismatch { expected: MessageType, found: u32 },

    /// A request-typed buffer was parsed in a response context, or vice versa.
    #[error("{found} is not valid in this direction")]
    WrongDirection { found: MessageType },
}

pub type Result<T> = std::result::Result<T, MessageError>;
