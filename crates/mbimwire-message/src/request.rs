//! Host-to-function request messages.

use bytes::{BufMut, Bytes, BytesMut};

use crate::error::{MessageError, Result};
use crate::header::{FragmentHeader, MessageHeader};
use crate::message::{check_type, ControlMessage};
use crate::schema::{self, MessageSchema};
use crate::service::DeviceServiceId;
use crate::types::MessageType;
use crate::wire::Reader;

/// OPEN request: initializes the control channel and announces the host's
/// maximum control transfer size.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OpenMessage {
    pub transaction_id: u32,
    /// Largest control transfer the host accepts, in bytes.
    pub max_control_transfer: u32,
}

impl ControlMessage for OpenMessage {
    const SCHEMA: &'static MessageSchema = &schema::OPEN;

    fn message_length(&self) -> u32 {
        Self::SCHEMA.struct_len() as u32
    }

    fn encode(&self, dst: &mut BytesMut) {
        MessageHeader {
            message_type: Self::SCHEMA.message_type.raw(),
            message_length: self.message_length(),
            transaction_id: self.transaction_id,
        }
        .encode(dst);
        dst.put_u32_le(self.max_control_transfer);
    }

    fn decode(src: &[u8]) -> Result<Self> {
        let mut reader = Reader::new(src);
        let header = MessageHeader::read(&mut reader)?;
        check_type(&header, Self::SCHEMA)?;
        Ok(Self {
            transaction_id: header.transaction_id,
            max_control_transfer: reader.read_u32()?,
        })
    }
}

/// CLOSE request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CloseMessage {
    pub transaction_id: u32,
}

impl ControlMessage for CloseMessage {
    const SCHEMA: &'static MessageSchema = &schema::CLOSE;

    fn message_length(&self) -> u32 {
        Self::SCHEMA.struct_len() as u32
    }

    fn encode(&self, dst: &mut BytesMut) {
        MessageHeader {
            message_type: Self::SCHEMA.message_type.raw(),
            message_length: self.message_length(),
            transaction_id: self.transaction_id,
        }
        .encode(dst);
    }

    fn decode(src: &[u8]) -> Result<Self> {
        let mut reader = Reader::new(src);
        let header = MessageHeader::read(&mut reader)?;
        check_type(&header, Self::SCHEMA)?;
        Ok(Self {
            transaction_id: header.transaction_id,
        })
    }
}

/// COMMAND request: a device-service command with a variable information
/// buffer. The only fragmentable request type.
///
/// `information_buffer_length` declares the length of the complete
/// information buffer. On a monolithic message it equals
/// `information_buffer.len()`; on fragment 0 of a split message it still
/// declares the full length while `information_buffer` holds only the bytes
/// carried by that fragment.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommandMessage {
    pub transaction_id: u32,
    pub total_fragments: u32,
    pub current_fragment: u32,
    pub device_service_id: DeviceServiceId,
    pub cid: u32,
    /// `COMMAND_TYPE_QUERY` or `COMMAND_TYPE_SET`.
    pub command_type: u32,
    /// Declared length of the complete information buffer.
    pub information_buffer_length: u32,
    /// Information buffer bytes present in this message.
    pub information_buffer: Bytes,
}

impl CommandMessage {
    /// Build a monolithic (unfragmented) command.
    pub fn new(
        transaction_id: u32,
        device_service_id: DeviceServiceId,
        cid: u32,
        command_type: u32,
        information_buffer: impl Into<Bytes>,
    ) -> Self {
        let information_buffer = information_buffer.into();
        Self {
            transaction_id,
            total_fragments: 1,
            current_fragment: 0,
            device_service_id,
            cid,
            command_type,
            information_buffer_length: information_buffer.len() as u32,
            information_buffer,
        }
    }
}

impl ControlMessage for CommandMessage {
    const SCHEMA: &'static MessageSchema = &schema::COMMAND;

    fn message_length(&self) -> u32 {
        (Self::SCHEMA.struct_len() + self.information_buffer.len()) as u32
    }

    fn encode(&self, dst: &mut BytesMut) {
        dst.reserve(self.message_length() as usize);
        MessageHeader {
            message_type: Self::SCHEMA.message_type.raw(),
            message_length: self.message_length(),
            transaction_id: self.transaction_id,
        }
        .encode(dst);
        FragmentHeader {
            total_fragments: self.total_fragments,
            current_fragment: self.current_fragment,
        }
        .encode(dst);
        dst.put_slice(self.device_service_id.as_bytes());
        dst.put_u32_le(self.cid);
        dst.put_u32_le(self.command_type);
        dst.put_u32_le(self.information_buffer_length);
        dst.put_slice(&self.information_buffer);
    }

    fn decode(src: &[u8]) -> Result<Self> {
        let mut reader = Reader::new(src);
        let header = MessageHeader::read(&mut reader)?;
        check_type(&header, Self::SCHEMA)?;
        let fragment = FragmentHeader::read(&mut reader)?;
        let device_service_id = DeviceServiceId::from_bytes(reader.read_uuid()?);
        let cid = reader.read_u32()?;
        let command_type = reader.read_u32()?;
        let information_buffer_length = reader.read_u32()?;
        Ok(Self {
            transaction_id: header.transaction_id,
            total_fragments: fragment.total_fragments,
            current_fragment: fragment.current_fragment,
            device_service_id,
            cid,
            command_type,
            information_buffer_length,
            information_buffer: Bytes::copy_from_slice(reader.rest()),
        })
    }
}

/// HOST_ERROR request: the host reporting a protocol error to the function.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HostErrorMessage {
    pub transaction_id: u32,
    /// One of the `ERROR_*` codes in [`crate::status`].
    pub error_status_code: u32,
}

impl ControlMessage for HostErrorMessage {
    const SCHEMA: &'static MessageSchema = &schema::HOST_ERROR;

    fn message_length(&self) -> u32 {
        Self::SCHEMA.struct_len() as u32
    }

    fn encode(&self, dst: &mut BytesMut) {
        MessageHeader {
            message_type: Self::SCHEMA.message_type.raw(),
            message_length: self.message_length(),
            transaction_id: self.transaction_id,
        }
        .encode(dst);
        dst.put_u32_le(self.error_status_code);
    }

    fn decode(src: &[u8]) -> Result<Self> {
        let mut reader = Reader::new(src);
        let header = MessageHeader::read(&mut reader)?;
        check_type(&header, Self::SCHEMA)?;
        Ok(Self {
            transaction_id: header.transaction_id,
            error_status_code: reader.read_u32()?,
        })
    }
}

/// Any host-to-function message.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RequestMessage {
    Open(OpenMessage),
    Close(CloseMessage),
    Command(CommandMessage),
    HostError(HostErrorMessage),
}

impl RequestMessage {
    /// The message type tag of the wrapped message.
    pub fn message_type(&self) -> MessageType {
        match self {
            Self::Open(_) => MessageType::Open,
            Self::Close(_) => MessageType::Close,
            Self::Command(_) => MessageType::Command,
            Self::HostError(_) => MessageType::HostError,
        }
    }

    /// The wrapped message's transaction id.
    pub fn transaction_id(&self) -> u32 {
        match self {
            Self::Open(m) => m.transaction_id,
            Self::Close(m) => m.transaction_id,
            Self::Command(m) => m.transaction_id,
            Self::HostError(m) => m.transaction_id,
        }
    }

    /// Total serialized length in bytes.
    pub fn message_length(&self) -> u32 {
        match self {
            Self::Open(m) => m.message_length(),
            Self::Close(m) => m.message_length(),
            Self::Command(m) => m.message_length(),
            Self::HostError(m) => m.message_length(),
        }
    }

    /// Serialize into a fresh buffer.
    pub fn to_bytes(&self) -> Bytes {
        match self {
            Self::Open(m) => m.to_bytes(),
            Self::Close(m) => m.to_bytes(),
            Self::Command(m) => m.to_bytes(),
            Self::HostError(m) => m.to_bytes(),
        }
    }

    /// Parse a single raw buffer, discriminating on the header's type.
    pub fn parse(src: &[u8]) -> Result<Self> {
        let header = MessageHeader::decode(src)?;
        let message_type = MessageType::from_raw(header.message_type).ok_or(
            MessageError::UnknownMessageType {
                raw: header.message_type,
            },
        )?;
        match message_type {
            MessageType::Open => Ok(Self::Open(OpenMessage::decode(src)?)),
            MessageType::Close => Ok(Self::Close(CloseMessage::decode(src)?)),
            MessageType::Command => Ok(Self::Command(CommandMessage::decode(src)?)),
            MessageType::HostError => Ok(Self::HostError(HostErrorMessage::decode(src)?)),
            other => Err(MessageError::WrongDirection { found: other }),
        }
    }
}

impl From<OpenMessage> for RequestMessage {
    fn from(m: OpenMessage) -> Self {
        Self::Open(m)
    }
}

impl From<CloseMessage> for RequestMessage {
    fn from(m: CloseMessage) -> Self {
        Self::Close(m)
    }
}

impl From<CommandMessage> for RequestMessage {
    fn from(m: CommandMessage) -> Self {
        Self::Command(m)
    }
}

impl From<HostErrorMessage> for RequestMessage {
    fn from(m: HostErrorMessage) -> Self {
        Self::HostError(m)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::status::ERROR_NOT_OPENED;
    use crate::types::COMMAND_TYPE_QUERY;

    #[test]
    fn test_open_roundtrip() {
        let open = OpenMessage {
            transaction_id: 1,
            max_control_transfer: 4096,
        };
        let bytes = open.to_bytes();
        assert_eq!(bytes.len(), 16);
        assert_eq!(OpenMessage::decode(&bytes).unwrap(), open);
    }

    #[test]
    fn test_close_roundtrip() {
        let close = CloseMessage { transaction_id: 9 };
        let bytes = close.to_bytes();
        assert_eq!(bytes.len(), 12);
        assert_eq!(CloseMessage::decode(&bytes).unwrap(), close);
    }

    #[test]
    fn test_command_roundtrip() {
        let command = CommandMessage::new(
            7,
            DeviceServiceId::BASIC_CONNECT,
            3,
            COMMAND_TYPE_QUERY,
            Bytes::from_static(b"connect request body"),
        );
        let bytes = command.to_bytes();
        assert_eq!(
            bytes.len(),
            CommandMessage::SCHEMA.struct_len() + command.information_buffer.len()
        );
        assert_eq!(CommandMessage::decode(&bytes).unwrap(), command);
    }

    #[test]
    fn test_command_wire_layout() {
        let command = CommandMessage::new(
            0x0102_0304,
            DeviceServiceId::BASIC_CONNECT,
            1,
            COMMAND_TYPE_QUERY,
            Bytes::new(),
        );
        let bytes = command.to_bytes();
        // MessageType
        assert_eq!(&bytes[0..4], [0x03, 0, 0, 0]);
        // MessageLength == struct length for an empty buffer
        assert_eq!(&bytes[4..8], [48, 0, 0, 0]);
        // TransactionId, little-endian
        assert_eq!(&bytes[8..12], [0x04, 0x03, 0x02, 0x01]);
        // TotalFragments / CurrentFragment
        assert_eq!(&bytes[12..16], [1, 0, 0, 0]);
        assert_eq!(&bytes[16..20], [0, 0, 0, 0]);
        // DeviceServiceId carried verbatim
        assert_eq!(&bytes[20..36], DeviceServiceId::BASIC_CONNECT.as_bytes());
    }

    #[test]
    fn test_host_error_roundtrip() {
        let error = HostErrorMessage {
            transaction_id: 2,
            error_status_code: ERROR_NOT_OPENED,
        };
        let bytes = error.to_bytes();
        assert_eq!(HostErrorMessage::decode(&bytes).unwrap(), error);
    }

    #[test]
    fn test_decode_type_mismatch() {
        let close = CloseMessage { transaction_id: 1 }.to_bytes();
        let err = OpenMessage::decode(&close).unwrap_err();
        assert!(matches!(
            err,
            MessageError::TypeMismatch {
                expected: MessageType::Open,
                found: 2,
            }
        ));
    }

    #[test]
    fn test_parse_discriminates() {
        let command = CommandMessage::new(
            5,
            DeviceServiceId::SMS,
            2,
            COMMAND_TYPE_QUERY,
            Bytes::from_static(b"x"),
        );
        let parsed = RequestMessage::parse(&command.to_bytes()).unwrap();
        assert_eq!(parsed, RequestMessage::Command(command));
    }

    #[test]
    fn test_parse_rejects_response_type() {
        // OPEN_DONE header on the request side
        let mut buf = BytesMut::new();
        MessageHeader {
            message_type: 0x8000_0001,
            message_length: 16,
            transaction_id: 1,
        }
        .encode(&mut buf);
        buf.put_u32_le(0);
        let err = RequestMessage::parse(&buf).unwrap_err();
        assert!(matches!(
            err,
            MessageError::WrongDirection {
                found: MessageType::OpenDone
            }
        ));
    }

    #[test]
    fn test_parse_unknown_type() {
        let mut buf = BytesMut::new();
        MessageHeader {
            message_type: 0x7777_7777,
            message_length: 12,
            transaction_id: 1,
        }
        .encode(&mut buf);
        let err = RequestMessage::parse(&buf).unwrap_err();
        assert!(matches!(
            err,
            MessageError::UnknownMessageType { raw: 0x7777_7777 }
        ));
    }
}
