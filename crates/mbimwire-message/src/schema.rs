//! Static wire-field schemas.
//!
//! Each control message type is described by an ordered table of
//! [`FieldDescriptor`]s: the field's wire format, its name, and the semantic
//! role it plays during fragmentation and reassembly. The tables are the
//! single source of truth for fixed struct lengths, and the
//! [`secondary_fragment_schema`] mapping records which message types may be
//! split across transfers.

use crate::types::MessageType;

/// Wire format of a single message field.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldFormat {
    /// 4-byte little-endian unsigned integer.
    U32,
    /// 16-byte device service identifier, carried verbatim.
    Uuid,
    /// Variable-length trailing payload buffer.
    Payload,
}

impl FieldFormat {
    /// Fixed wire width in bytes, or `None` for the variable payload.
    pub const fn fixed_len(self) -> Option<usize> {
        match self {
            Self::U32 => Some(4),
            Self::Uuid => Some(16),
            Self::Payload => None,
        }
    }
}

/// Semantic role a field plays in fragmentation and reassembly.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldRole {
    /// No codec-level meaning.
    Plain,
    /// Identifies the logical grouping (device service id, command id).
    PayloadId,
    /// Declared total serialized message length.
    TotalLen,
    /// Transaction id.
    TransactionId,
    /// Declared total fragment count.
    NumFragments,
    /// Declared length of the complete variable payload.
    PayloadLen,
}

/// One entry in a message type's ordered field table.
#[derive(Debug, Clone, Copy)]
pub struct FieldDescriptor {
    /// Field name as used in the MBIM specification.
    pub name: &'static str,
    /// Wire format.
    pub format: FieldFormat,
    /// Semantic role.
    pub role: FieldRole,
}

const fn field(name: &'static str, format: FieldFormat, role: FieldRole) -> FieldDescriptor {
    FieldDescriptor { name, format, role }
}

/// Static descriptor for one control message type.
#[derive(Debug)]
pub struct MessageSchema {
    /// The message type the table describes.
    pub message_type: MessageType,
    /// Ordered wire fields. A `Payload` field, if any, is last.
    pub fields: &'static [FieldDescriptor],
}

impl MessageSchema {
    /// Byte length of the fixed (non-payload) portion of the message.
    pub const fn struct_len(&self) -> usize {
        let mut len = 0;
        let mut i = 0;
        while i < self.fields.len() {
            if let Some(width) = self.fields[i].format.fixed_len() {
                len += width;
            }
            i += 1;
        }
        len
    }

    /// Whether the message ends in a variable-length payload buffer.
    pub const fn has_payload(&self) -> bool {
        let n = self.fields.len();
        n > 0 && matches!(self.fields[n - 1].format, FieldFormat::Payload)
    }

    /// Whether any field carries `role`.
    pub fn has_role(&self, role: FieldRole) -> bool {
        self.fields.iter().any(|f| f.role == role)
    }
}

use FieldFormat::{Payload, U32, Uuid};
use FieldRole::{NumFragments, PayloadId, PayloadLen, Plain, TotalLen, TransactionId};

/// OPEN request.
pub static OPEN: MessageSchema = MessageSchema {
    message_type: MessageType::Open,
    fields: &[
        field("MessageType", U32, Plain),
        field("MessageLength", U32, TotalLen),
        field("TransactionId", U32, TransactionId),
        field("MaxControlTransfer", U32, Plain),
    ],
};

/// CLOSE request.
pub static CLOSE: MessageSchema = MessageSchema {
    message_type: MessageType::Close,
    fields: &[
        field("MessageType", U32, Plain),
        field("MessageLength", U32, TotalLen),
        field("TransactionId", U32, TransactionId),
    ],
};

/// COMMAND request.
pub static COMMAND: MessageSchema = MessageSchema {
    message_type: MessageType::Command,
    fields: &[
        field("MessageType", U32, Plain),
        field("MessageLength", U32, TotalLen),
        field("TransactionId", U32, TransactionId),
        field("TotalFragments", U32, NumFragments),
        field("CurrentFragment", U32, Plain),
        field("DeviceServiceId", Uuid, PayloadId),
        field("CID", U32, PayloadId),
        field("CommandType", U32, Plain),
        field("InformationBufferLength", U32, PayloadLen),
        field("InformationBuffer", Payload, Plain),
    ],
};

/// HOST_ERROR request.
pub static HOST_ERROR: MessageSchema = MessageSchema {
    message_type: MessageType::HostError,
    fields: &[
        field("MessageType", U32, Plain),
        field("MessageLength", U32, TotalLen),
        field("TransactionId", U32, TransactionId),
        field("ErrorStatusCode", U32, Plain),
    ],
};

/// OPEN_DONE response.
pub static OPEN_DONE: MessageSchema = MessageSchema {
    message_type: MessageType::OpenDone,
    fields: &[
        field("MessageType", U32, Plain),
        field("MessageLength", U32, TotalLen),
        field("TransactionId", U32, TransactionId),
        field("Status", U32, Plain),
    ],
};

/// CLOSE_DONE response.
pub static CLOSE_DONE: MessageSchema = MessageSchema {
    message_type: MessageType::CloseDone,
    fields: &[
        field("MessageType", U32, Plain),
        field("MessageLength", U32, TotalLen),
        field("TransactionId", U32, TransactionId),
        field("Status", U32, Plain),
    ],
};

/// COMMAND_DONE response.
pub static COMMAND_DONE: MessageSchema = MessageSchema {
    message_type: MessageType::CommandDone,
    fields: &[
        field("MessageType", U32, Plain),
        field("MessageLength", U32, TotalLen),
        field("TransactionId", U32, TransactionId),
        field("TotalFragments", U32, NumFragments),
        field("CurrentFragment", U32, Plain),
        field("DeviceServiceId", Uuid, PayloadId),
        field("CID", U32, PayloadId),
        field("Status", U32, Plain),
        field("InformationBufferLength", U32, PayloadLen),
        field("InformationBuffer", Payload, Plain),
    ],
};

/// FUNCTION_ERROR response.
pub static FUNCTION_ERROR: MessageSchema = MessageSchema {
    message_type: MessageType::FunctionError,
    fields: &[
        field("MessageType", U32, Plain),
        field("MessageLength", U32, TotalLen),
        field("TransactionId", U32, TransactionId),
        field("ErrorStatusCode", U32, Plain),
    ],
};

/// INDICATE_STATUS response.
pub static INDICATE_STATUS: MessageSchema = MessageSchema {
    message_type: MessageType::IndicateStatus,
    fields: &[
        field("MessageType", U32, Plain),
        field("MessageLength", U32, TotalLen),
        field("TransactionId", U32, TransactionId),
        field("TotalFragments", U32, NumFragments),
        field("CurrentFragment", U32, Plain),
        field("DeviceServiceId", Uuid, PayloadId),
        field("CID", U32, PayloadId),
        field("InformationBufferLength", U32, PayloadLen),
        field("InformationBuffer", Payload, Plain),
    ],
};

// Fragments 1..N-1 of every fragmentable family share this shape.
const FRAGMENT_FIELDS: &[FieldDescriptor] = &[
    field("MessageType", U32, Plain),
    field("MessageLength", U32, TotalLen),
    field("TransactionId", U32, TransactionId),
    field("TotalFragments", U32, NumFragments),
    field("CurrentFragment", U32, Plain),
    field("Payload", Payload, Plain),
];

/// Secondary fragment of a COMMAND.
pub static COMMAND_FRAGMENT: MessageSchema = MessageSchema {
    message_type: MessageType::Command,
    fields: FRAGMENT_FIELDS,
};

/// Secondary fragment of a COMMAND_DONE.
pub static COMMAND_DONE_FRAGMENT: MessageSchema = MessageSchema {
    message_type: MessageType::CommandDone,
    fields: FRAGMENT_FIELDS,
};

/// Secondary fragment of an INDICATE_STATUS.
pub static INDICATE_STATUS_FRAGMENT: MessageSchema = MessageSchema {
    message_type: MessageType::IndicateStatus,
    fields: FRAGMENT_FIELDS,
};

/// The secondary-fragment schema registered for a primary message type.
///
/// Exactly COMMAND, COMMAND_DONE and INDICATE_STATUS can be fragmented;
/// every other type maps to `None`.
pub const fn secondary_fragment_schema(
    message_type: MessageType,
) -> Option<&'static MessageSchema> {
    match message_type {
        MessageType::Command => Some(&COMMAND_FRAGMENT),
        MessageType::CommandDone => Some(&COMMAND_DONE_FRAGMENT),
        MessageType::IndicateStatus => Some(&INDICATE_STATUS_FRAGMENT),
        _ => None,
    }
}
