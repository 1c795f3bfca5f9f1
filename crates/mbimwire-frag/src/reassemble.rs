//! Response and request reassembly.

use bytes::{BufMut, Bytes, BytesMut};
use mbimwire_message::{
    CommandDoneMessage, CommandMessage, ControlMessage, IndicateStatusMessage, MessageError,
    MessageHeader, MessageType, RequestMessage, ResponseMessage, SecondaryFragment,
};
use tracing::trace;

use crate::error::{FragError, Result};

/// Reassemble the raw transfer buffers of one logical response.
///
/// `packets` must hold every fragment of exactly one message, in fragment
/// order, primary first; the transport layer collects them by watching the
/// primary fragment's declared total. The reassembled message is normalized
/// to a monolithic one (`total_fragments = 1`, `current_fragment = 0`,
/// declared lengths matching content), so re-encoding it is valid.
///
/// Fails with a protocol assertion error if the declared fragment count or
/// payload length contradicts the packets supplied.
pub fn reassemble_response(packets: &[Bytes]) -> Result<ResponseMessage> {
    let (first, message_type) = discriminate(packets)?;
    if !message_type.is_response() {
        return Err(MessageError::WrongDirection {
            found: message_type,
        }
        .into());
    }

    match message_type {
        MessageType::CommandDone => {
            let mut primary = CommandDoneMessage::decode(first)?;
            primary.information_buffer = collect_payload(
                message_type,
                primary.total_fragments,
                primary.information_buffer_length,
                &primary.information_buffer,
                &packets[1..],
            )?;
            primary.total_fragments = 1;
            primary.current_fragment = 0;
            trace!(
                transaction_id = primary.transaction_id,
                message_length = primary.message_length(),
                "reassembled COMMAND_DONE"
            );
            Ok(ResponseMessage::CommandDone(primary))
        }
        MessageType::IndicateStatus => {
            let mut primary = IndicateStatusMessage::decode(first)?;
            primary.information_buffer = collect_payload(
                message_type,
                primary.total_fragments,
                primary.information_buffer_length,
                &primary.information_buffer,
                &packets[1..],
            )?;
            primary.total_fragments = 1;
            primary.current_fragment = 0;
            trace!(
                transaction_id = primary.transaction_id,
                message_length = primary.message_length(),
                "reassembled INDICATE_STATUS"
            );
            Ok(ResponseMessage::IndicateStatus(primary))
        }
        _ => {
            ensure_single(packets)?;
            Ok(ResponseMessage::parse(first)?)
        }
    }
}

/// Reassemble the raw transfer buffers of one logical request.
///
/// The device-role mirror of [`reassemble_response`]: COMMAND is the only
/// fragmentable request type.
pub fn reassemble_request(packets: &[Bytes]) -> Result<RequestMessage> {
    let (first, message_type) = discriminate(packets)?;
    if !message_type.is_request() {
        return Err(MessageError::WrongDirection {
            found: message_type,
        }
        .into());
    }

    match message_type {
        MessageType::Command => {
            let mut primary = CommandMessage::decode(first)?;
            primary.information_buffer = collect_payload(
                message_type,
                primary.total_fragments,
                primary.information_buffer_length,
                &primary.information_buffer,
                &packets[1..],
            )?;
            primary.total_fragments = 1;
            primary.current_fragment = 0;
            trace!(
                transaction_id = primary.transaction_id,
                message_length = primary.message_length(),
                "reassembled COMMAND"
            );
            Ok(RequestMessage::Command(primary))
        }
        _ => {
            ensure_single(packets)?;
            Ok(RequestMessage::parse(first)?)
        }
    }
}

fn discriminate(packets: &[Bytes]) -> Result<(&Bytes, MessageType)> {
    let first = packets.first().ok_or(FragError::NoPackets)?;
    let header = MessageHeader::decode(first)?;
    let message_type = MessageType::from_raw(header.message_type).ok_or(
        MessageError::UnknownMessageType {
            raw: header.message_type,
        },
    )?;
    trace!(
        message_type = %message_type,
        declared_length = header.message_length,
        packets = packets.len(),
        "reassembling"
    );
    Ok((first, message_type))
}

// A non-fragmentable type implicitly declares a single fragment.
fn ensure_single(packets: &[Bytes]) -> Result<()> {
    if packets.len() > 1 {
        return Err(FragError::FragmentCountMismatch {
            declared: 1,
            actual: packets.len() as u32,
        });
    }
    Ok(())
}

/// Concatenate the primary fragment's payload with each secondary packet's,
/// then check the two reassembly invariants: the declared fragment count
/// matches the packets supplied, and the declared payload length matches the
/// reassembled payload.
fn collect_payload(
    message_type: MessageType,
    declared_fragments: u32,
    declared_payload_len: u32,
    primary_payload: &Bytes,
    secondary_packets: &[Bytes],
) -> Result<Bytes> {
    let mut payload = BytesMut::with_capacity(declared_payload_len as usize);
    payload.put_slice(primary_payload);
    for packet in secondary_packets {
        let fragment = SecondaryFragment::decode(message_type, packet)?;
        payload.put_slice(&fragment.payload);
    }

    let actual_fragments = secondary_packets.len() as u32 + 1;
    if declared_fragments != actual_fragments {
        return Err(FragError::FragmentCountMismatch {
            declared: declared_fragments,
            actual: actual_fragments,
        });
    }
    if declared_payload_len as usize != payload.len() {
        return Err(FragError::PayloadLengthMismatch {
            declared: declared_payload_len,
            actual: payload.len(),
        });
    }
    Ok(payload.freeze())
}
