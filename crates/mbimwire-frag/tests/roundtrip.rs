//! Fragment/reassemble round-trip coverage.

use bytes::Bytes;
use mbimwire_frag::{fragment_request, reassemble_request, FragError};
use mbimwire_message::types::COMMAND_TYPE_QUERY;
use mbimwire_message::{
    CommandMessage, ControlMessage, DeviceServiceId, MessageHeader, MessageType, RequestMessage,
};
use proptest::prelude::*;

fn command(transaction_id: u32, payload: Vec<u8>) -> CommandMessage {
    CommandMessage::new(
        transaction_id,
        DeviceServiceId::BASIC_CONNECT,
        1,
        COMMAND_TYPE_QUERY,
        payload,
    )
}

#[test]
fn roundtrip_example_scenario() {
    // 10,000-byte payload over 2048-byte transfers: a 2000-byte primary
    // share and four secondaries, the last carrying 1916 bytes.
    let original = command(5, (0..=255u8).cycle().take(10_000).collect());
    let fragments = fragment_request(&original.clone().into(), 2048).unwrap();

    assert_eq!(fragments.len(), 5);
    assert_eq!(fragments[0].len(), 2048);
    assert_eq!(fragments[1].len(), 2048);
    assert_eq!(fragments[4].len(), 20 + 1916);

    let reassembled = reassemble_request(&fragments).unwrap();
    assert_eq!(reassembled, RequestMessage::Command(original));
}

#[test]
fn fragments_of_distinct_messages_do_not_mix() {
    let a = fragment_request(&command(1, vec![1; 5000]).into(), 1024).unwrap();
    let b = fragment_request(&command(2, vec![2; 3000]).into(), 1024).unwrap();

    // Supplying a's primary with b's secondaries trips the count check.
    let mut mixed: Vec<Bytes> = vec![a[0].clone()];
    mixed.extend(b[1..].iter().cloned());
    let err = reassemble_request(&mixed).unwrap_err();
    assert!(matches!(err, FragError::FragmentCountMismatch { .. }));
}

proptest! {
    #[test]
    fn prop_roundtrip(
        payload_len in 0usize..20_000,
        max_fragment_length in 64usize..4096,
        seed in any::<u8>(),
    ) {
        let payload: Vec<u8> = (0..payload_len).map(|i| (i as u8).wrapping_add(seed)).collect();
        let original = command(7, payload);
        let message = RequestMessage::Command(original.clone());

        let fragments = fragment_request(&message, max_fragment_length).unwrap();

        // Every fragment respects the transfer bound and declares its own
        // length accurately.
        for fragment in &fragments {
            prop_assert!(fragment.len() <= max_fragment_length);
            let header = MessageHeader::decode(fragment).unwrap();
            prop_assert_eq!(header.message_length as usize, fragment.len());
            prop_assert_eq!(header.message_type, MessageType::Command.raw());
        }

        let reassembled = reassemble_request(&fragments).unwrap();
        prop_assert_eq!(reassembled, RequestMessage::Command(original));
    }

    #[test]
    fn prop_fragment_count_law(
        payload_len in 2001usize..30_000,
        max_fragment_length in 128usize..2048,
    ) {
        let original = command(3, vec![0xc3; payload_len]);
        let message_length = original.message_length() as usize;
        let message = RequestMessage::Command(original);

        let fragments = fragment_request(&message, max_fragment_length).unwrap();

        if message_length < max_fragment_length {
            prop_assert_eq!(fragments.len(), 1);
        } else {
            let primary_capacity = max_fragment_length - 48;
            let secondary_capacity = max_fragment_length - 20;
            let remaining = payload_len - primary_capacity;
            let expected = 1 + remaining.div_ceil(secondary_capacity);
            prop_assert_eq!(fragments.len(), expected);

            // No fragment is ever empty of purpose: the last secondary
            // carries at least one payload byte.
            if expected > 1 {
                prop_assert!(fragments[expected - 1].len() > 20);
            }
        }
    }
}

#[test]
fn noop_fragmentation_is_byte_identical() {
    let original = command(11, vec![0xee; 100]);
    let message = RequestMessage::Command(original);
    let monolithic = message.to_bytes();
    let fragments = fragment_request(&message, 4096).unwrap();
    assert_eq!(fragments, vec![monolithic]);
}
