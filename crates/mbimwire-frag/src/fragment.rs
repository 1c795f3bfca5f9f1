//! Request fragmentation.

use bytes::Bytes;
use mbimwire_message::schema::secondary_fragment_schema;
use mbimwire_message::{
    CommandMessage, ControlMessage, MessageType, RequestMessage, SecondaryFragment,
};
use tracing::debug;

use crate::error::{FragError, Result};
use crate::plan::FragmentPlan;

/// Split a request into raw transfer buffers of at most
/// `max_fragment_length` bytes each, primary fragment first.
///
/// A message already shorter than `max_fragment_length` is returned as a
/// single buffer, byte-identical to its monolithic serialization. Larger
/// messages must be of a fragmentable type (COMMAND is the only fragmentable
/// request); anything else fails with [`FragError::NotFragmentable`].
pub fn fragment_request(
    message: &RequestMessage,
    max_fragment_length: usize,
) -> Result<Vec<Bytes>> {
    let monolithic = message.to_bytes();
    if monolithic.len() < max_fragment_length {
        return Ok(vec![monolithic]);
    }

    let command = match message {
        RequestMessage::Command(command) => command,
        other => {
            return Err(FragError::NotFragmentable {
                message_type: other.message_type(),
            })
        }
    };
    let secondary_schema = secondary_fragment_schema(MessageType::Command)
        .ok_or(FragError::NotFragmentable {
            message_type: MessageType::Command,
        })?;

    let payload = &command.information_buffer;
    let plan = FragmentPlan::new(
        payload.len(),
        max_fragment_length,
        CommandMessage::SCHEMA.struct_len(),
        secondary_schema.struct_len(),
    )?;
    let total_fragments = plan.total_fragments() as u32;

    let mut fragments = Vec::with_capacity(plan.total_fragments());

    let primary = CommandMessage {
        total_fragments,
        current_fragment: 0,
        information_buffer: payload.slice(..plan.primary_payload_len),
        ..command.clone()
    };
    fragments.push(primary.to_bytes());

    let mut offset = plan.primary_payload_len;
    for index in 1..=plan.num_secondary {
        let end = payload.len().min(offset + plan.secondary_capacity);
        let fragment = SecondaryFragment {
            message_type: MessageType::Command,
            transaction_id: command.transaction_id,
            total_fragments,
            current_fragment: index as u32,
            payload: payload.slice(offset..end),
        };
        fragments.push(fragment.to_bytes());
        offset = end;
    }

    debug!(
        transaction_id = command.transaction_id,
        total_fragments,
        max_fragment_length,
        payload_len = payload.len(),
        "fragmented command message"
    );
    Ok(fragments)
}

#[cfg(test)]
mod tests {
    use super::*;
    use mbimwire_message::types::COMMAND_TYPE_SET;
    use mbimwire_message::{DeviceServiceId, MessageHeader, OpenMessage};

    fn command(payload_len: usize) -> RequestMessage {
        CommandMessage::new(
            21,
            DeviceServiceId::BASIC_CONNECT,
            4,
            COMMAND_TYPE_SET,
            vec![0xa5u8; payload_len],
        )
        .into()
    }

    #[test]
    fn test_noop_below_threshold() {
        let message = command(100);
        let fragments = fragment_request(&message, 1024).unwrap();
        assert_eq!(fragments.len(), 1);
        assert_eq!(fragments[0], message.to_bytes());
    }

    #[test]
    fn test_fragment_counts_and_headers() {
        let message = command(10_000);
        let fragments = fragment_request(&message, 2048).unwrap();
        assert_eq!(fragments.len(), 5);

        for (index, fragment) in fragments.iter().enumerate() {
            assert!(fragment.len() <= 2048);
            let header = MessageHeader::decode(fragment).unwrap();
            assert_eq!(header.message_type, MessageType::Command.raw());
            assert_eq!(header.message_length as usize, fragment.len());
            assert_eq!(header.transaction_id, 21);

            let parsed = SecondaryFragment::decode(MessageType::Command, fragment);
            if index > 0 {
                let parsed = parsed.unwrap();
                assert_eq!(parsed.total_fragments, 5);
                assert_eq!(parsed.current_fragment as usize, index);
            }
        }

        // Non-last fragments fill the transfer completely.
        assert_eq!(fragments[0].len(), 2048);
        assert_eq!(fragments[3].len(), 2048);
        // The last fragment is exactly as large as its payload share.
        assert_eq!(fragments[4].len(), 20 + 1916);
    }

    #[test]
    fn test_primary_declares_full_payload_length() {
        let fragments = fragment_request(&command(10_000), 2048).unwrap();
        let primary = CommandMessage::decode(&fragments[0]).unwrap();
        assert_eq!(primary.information_buffer_length, 10_000);
        assert_eq!(primary.information_buffer.len(), 2000);
        assert_eq!(primary.total_fragments, 5);
        assert_eq!(primary.current_fragment, 0);
    }

    #[test]
    fn test_exact_fit_produces_single_full_fragment() {
        // message length == max goes through the fragmentation path but
        // needs no secondary fragments
        let message = command(2000);
        let fragments = fragment_request(&message, 2048).unwrap();
        assert_eq!(fragments.len(), 1);
        assert_eq!(fragments[0].len(), 2048);
        assert_eq!(fragments[0], message.to_bytes());
    }

    #[test]
    fn test_exact_division_last_fragment_is_full() {
        let message = command(2000 + 2 * 2028);
        let fragments = fragment_request(&message, 2048).unwrap();
        assert_eq!(fragments.len(), 3);
        assert_eq!(fragments[2].len(), 2048);
    }

    #[test]
    fn test_not_fragmentable() {
        let open = RequestMessage::Open(OpenMessage {
            transaction_id: 1,
            max_control_transfer: 64,
        });
        let err = fragment_request(&open, 8).unwrap_err();
        assert!(matches!(
            err,
            FragError::NotFragmentable {
                message_type: MessageType::Open
            }
        ));
    }

    #[test]
    fn test_max_too_small_for_command() {
        let err = fragment_request(&command(100), 40).unwrap_err();
        assert!(matches!(err, FragError::MaxFragmentTooSmall { .. }));
    }
}
