use mbimwire_message::{MessageError, MessageType};

/// Errors that can occur during fragmentation or reassembly.
///
/// Two families: usage errors (the caller asked for something the protocol
/// cannot express) and protocol assertion errors (the received fragments
/// contradict the primary header's declared values). Assertion errors carry
/// the governing MBIM specification clause in their message; they indicate a
/// non-conformant peer or corrupted transport data and are never retried at
/// this layer.
#[derive(Debug, thiserror::Error)]
pub enum FragError {
    /// The message exceeds the maximum transfer size but its type has no
    /// secondary fragment schema.
    #[error("no secondary fragment schema defined for {message_type}")]
    NotFragmentable { message_type: MessageType },

    /// The maximum fragment length cannot hold a fragment header plus at
    /// least one payload byte.
    #[error("max fragment length {max_fragment_length} too small (fixed headers need {struct_len} bytes)")]
    MaxFragmentTooSmall {
        max_fragment_length: usize,
        struct_len: usize,
    },

    /// Reassembly was invoked with no packets.
    #[error("no packets to reassemble")]
    NoPackets,

    /// The declared fragment count does not match the packets supplied.
    #[error("[mbim1.0:9.2] fragment count mismatch (header declares {declared}, received {actual})")]
    FragmentCountMismatch { declared: u32, actual: u32 },

    /// The declared payload length does not match the reassembled payload.
    #[error("[mbim1.0:9.2] payload length mismatch (header declares {declared} bytes, reassembled {actual})")]
    PayloadLengthMismatch { declared: u32, actual: usize },

    /// A packet could not be parsed as the expected message or fragment.
    #[error("message error: {0}")]
    Message(#[from] MessageError),
}

pub type Result<T> = std::result::Result<T, FragError>;
