//! Function-to-host response messages.

use bytes::{BufMut, Bytes, BytesMut};

use crate::error::{MessageError, Result};
use crate::header::{FragmentHeader, MessageHeader};
use crate::message::{check_type, ControlMessage};
use crate::schema::{self, MessageSchema};
use crate::service::DeviceServiceId;
use crate::types::MessageType;
use crate::wire::Reader;

/// OPEN_DONE response.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OpenDoneMessage {
    pub transaction_id: u32,
    /// One of the `STATUS_*` codes in [`crate::status`].
    pub status: u32,
}

impl ControlMessage for OpenDoneMessage {
    const SCHEMA: &'static MessageSchema = &schema::OPEN_DONE;

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
        dst.put_u32_le(self.status);
    }

    fn decode(src: &[u8]) -> Result<Self> {
        let mut reader = Reader::new(src);
        let header = MessageHeader::read(&mut reader)?;
        check_type(&header, Self::SCHEMA)?;
        Ok(Self {
            transaction_id: header.transaction_id,
            status: reader.read_u32()?,
        })
    }
}

/// CLOSE_DONE response.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CloseDoneMessage {
    pub transaction_id: u32,
    pub status: u32,
}

impl ControlMessage for CloseDoneMessage {
    const SCHEMA: &'static MessageSchema = &schema::CLOSE_DONE;

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
        dst.put_u32_le(self.status);
    }

    fn decode(src: &[u8]) -> Result<Self> {
        let mut reader = Reader::new(src);
        let header = MessageHeader::read(&mut reader)?;
        check_type(&header, Self::SCHEMA)?;
        Ok(Self {
            transaction_id: header.transaction_id,
            status: reader.read_u32()?,
        })
    }
}

/// COMMAND_DONE response: completion of a COMMAND. Fragmentable.
///
/// As with [`crate::request::CommandMessage`], `information_buffer_length`
/// declares the length of the complete information buffer even when this
/// value was parsed from fragment 0 of a split message.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommandDoneMessage {
    pub transaction_id: u32,
    pub total_fragments: u32,
    pub current_fragment: u32,
    pub device_service_id: DeviceServiceId,
    pub cid: u32,
    pub status: u32,
    /// Declared length of the complete information buffer.
    pub information_buffer_length: u32,
    /// Information buffer bytes present in this message.
    pub information_buffer: Bytes,
}

impl CommandDoneMessage {
    /// Build a monolithic (unfragmented) completion.
    pub fn new(
        transaction_id: u32,
        device_service_id: DeviceServiceId,
        cid: u32,
        status: u32,
        information_buffer: impl Into<Bytes>,
    ) -> Self {
        let information_buffer = information_buffer.into();
        Self {
            transaction_id,
            total_fragments: 1,
            current_fragment: 0,
            device_service_id,
            cid,
            status,
            information_buffer_length: information_buffer.len() as u32,
            information_buffer,
        }
    }
}

impl ControlMessage for CommandDoneMessage {
    const SCHEMA: &'static MessageSchema = &schema::COMMAND_DONE;

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
        dst.put_u32_le(self.status);
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
        let status = reader.read_u32()?;
        let information_buffer_length = reader.read_u32()?;
        Ok(Self {
            transaction_id: header.transaction_id,
            total_fragments: fragment.total_fragments,
            current_fragment: fragment.current_fragment,
            device_service_id,
            cid,
            status,
            information_buffer_length,
            information_buffer: Bytes::copy_from_slice(reader.rest()),
        })
    }
}

/// FUNCTION_ERROR response: the function reporting a protocol error.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FunctionErrorMessage {
    pub transaction_id: u32,
    /// One of the `ERROR_*` codes in [`crate::status`].
    pub error_status_code: u32,
}

impl ControlMessage for FunctionErrorMessage {
    const SCHEMA: &'static MessageSchema = &schema::FUNCTION_ERROR;

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

/// INDICATE_STATUS response: an unsolicited device-service notification.
/// Fragmentable. Transaction id is 0 on unsolicited indications.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IndicateStatusMessage {
    pub transaction_id: u32,
    pub total_fragments: u32,
    pub current_fragment: u32,
    pub device_service_id: DeviceServiceId,
    pub cid: u32,
    /// Declared length of the complete information buffer.
    pub information_buffer_length: u32,
    /// Information buffer bytes present in this message.
    pub information_buffer: Bytes,
}

impl IndicateStatusMessage {
    /// Build a monolithic (unfragmented) indication.
    pub fn new(
        device_service_id: DeviceServiceId,
        cid: u32,
        information_buffer: impl Into<Bytes>,
    ) -> Self {
        let information_buffer = information_buffer.into();
        Self {
            transaction_id: 0,
            total_fragments: 1,
            current_fragment: 0,
            device_service_id,
            cid,
            information_buffer_length: information_buffer.len() as u32,
            information_buffer,
        }
    }
}

impl ControlMessage for IndicateStatusMessage {
    const SCHEMA: &'static MessageSchema = &schema::INDICATE_STATUS;

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
        let information_buffer_length = reader.read_u32()?;
        Ok(Self {
            transaction_id: header.transaction_id,
            total_fragments: fragment.total_fragments,
            current_fragment: fragment.current_fragment,
            device_service_id,
            cid,
            information_buffer_length,
            information_buffer: Bytes::copy_from_slice(reader.rest()),
        })
    }
}

/// Any function-to-host message.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ResponseMessage {
    OpenDone(OpenDoneMessage),
    CloseDone(CloseDoneMessage),
    CommandDone(CommandDoneMessage),
    FunctionError(FunctionErrorMessage),
    IndicateStatus(IndicateStatusMessage),
}

impl ResponseMessage {
    /// The message type tag of the wrapped message.
    pub fn message_type(&self) -> MessageType {
        match self {
            Self::OpenDone(_) => MessageType::OpenDone,
            Self::CloseDone(_) => MessageType::CloseDone,
            Self::CommandDone(_) => MessageType::CommandDone,
            Self::FunctionError(_) => MessageType::FunctionError,
            Self::IndicateStatus(_) => MessageType::IndicateStatus,
        }
    }

    /// The wrapped message's transaction id.
    pub fn transaction_id(&self) -> u32 {
        match self {
            Self::OpenDone(m) => m.transaction_id,
            Self::CloseDone(m) => m.transaction_id,
            Self::CommandDone(m) => m.transaction_id,
            Self::FunctionError(m) => m.transaction_id,
            Self::IndicateStatus(m) => m.transaction_id,
        }
    }

    /// Total serialized length in bytes.
    pub fn message_length(&self) -> u32 {
        match self {
            Self::OpenDone(m) => m.message_length(),
            Self::CloseDone(m) => m.message_length(),
            Self::CommandDone(m) => m.message_length(),
            Self::FunctionError(m) => m.message_length(),
            Self::IndicateStatus(m) => m.message_length(),
        }
    }

    /// Serialize into a fresh buffer.
    pub fn to_bytes(&self) -> Bytes {
        match self {
            Self::OpenDone(m) => m.to_bytes(),
            Self::CloseDone(m) => m.to_bytes(),
            Self::CommandDone(m) => m.to_bytes(),
            Self::FunctionError(m) => m.to_bytes(),
            Self::IndicateStatus(m) => m.to_bytes(),
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
            MessageType::OpenDone => Ok(Self::OpenDone(OpenDoneMessage::decode(src)?)),
            MessageType::CloseDone => Ok(Self::CloseDone(CloseDoneMessage::decode(src)?)),
            MessageType::CommandDone => Ok(Self::CommandDone(CommandDoneMessage::decode(src)?)),
            MessageType::FunctionError => {
                Ok(Self::FunctionError(FunctionErrorMessage::decode(src)?))
            }
            MessageType::IndicateStatus => {
                Ok(Self::IndicateStatus(IndicateStatusMessage::decode(src)?))
            }
            other => Err(MessageError::WrongDirection { found: other }),
        }
    }
}

impl From<OpenDoneMessage> for ResponseMessage {
    fn from(m: OpenDoneMessage) -> Self {
        Self::OpenDone(m)
    }
}

impl From<CloseDoneMessage> for ResponseMessage {
    fn from(m: CloseDoneMessage) -> Self {
        Self::CloseDone(m)
    }
}

impl From<CommandDoneMessage> for ResponseMessage {
    fn from(m: CommandDoneMessage) -> Self {
        Self::CommandDone(m)
    }
}

impl From<FunctionErrorMessage> for ResponseMessage {
    fn from(m: FunctionErrorMessage) -> Self {
        Self::FunctionError(m)
    }
}

impl From<IndicateStatusMessage> for ResponseMessage {
    fn from(m: IndicateStatusMessage) -> Self {
        Self::IndicateStatus(m)
    }
}
