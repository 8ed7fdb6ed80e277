//! Payload round-trips and ceiling enforcement across the three overlay
//! protocols, exercised through the carrier-script codec the way a
//! protocol reader elsewhere in the ecosystem would see them.

use btc_tx_builder::payload::counterparty::{
    decode_counterparty, encode_counterparty_issuance, encode_counterparty_send,
    CounterpartyMessage,
};
use btc_tx_builder::payload::rune::{decode_rune_transfer, encode_rune_transfer};
use btc_tx_builder::payload::stamp::{decode_stamp, encode_stamp};
use btc_tx_builder::payload::extract_op_return;
use btc_tx_builder::types::{CounterpartyIssuance, CounterpartyTransfer, RuneTransfer, StampData};
use btc_tx_builder::{BuildError, OP_RETURN_MAX_SIZE};

#[test]
fn rune_round_trips_through_carrier_script() {
    let transfer = RuneTransfer {
        rune_id: "UNCOMMON.GOODS".to_string(),
        amount: 100_000,
        destination: String::new(),
    };
    let payload = encode_rune_transfer(&transfer).unwrap();
    let script = payload.to_script();

    let carried = extract_op_return(&script).unwrap();
    let decoded = decode_rune_transfer(&carried).unwrap();
    assert_eq!(decoded.rune_id, transfer.rune_id);
    assert_eq!(decoded.amount, transfer.amount);
}

#[test]
fn rune_size_boundary() {
    // tag (4) + id (12) + amount (8) = 24 bytes: comfortably inside the
    // ceiling.
    let ok = RuneTransfer {
        rune_id: "TWELVEBYTES!".to_string(),
        amount: u64::MAX,
        destination: String::new(),
    };
    assert!(encode_rune_transfer(&ok).is_ok());

    // A 70-byte identifier pushes the payload to 82 bytes.
    let too_big = RuneTransfer {
        rune_id: "R".repeat(70),
        amount: 1,
        destination: String::new(),
    };
    match encode_rune_transfer(&too_big).unwrap_err() {
        BuildError::PayloadTooLarge { len, max } => {
            assert_eq!(len, 82);
            assert_eq!(max, OP_RETURN_MAX_SIZE);
        }
        other => panic!("expected PayloadTooLarge, got {other:?}"),
    }
}

#[test]
fn stamp_round_trips_through_carrier_script() {
    let data = StampData {
        content: "gm".to_string(),
        content_type: "text/plain".to_string(),
        timestamp: Some(1_700_000_000_000),
    };
    let payload = encode_stamp(&data).unwrap();

    let carried = extract_op_return(&payload.to_script()).unwrap();
    let decoded = decode_stamp(&carried).unwrap();
    assert_eq!(decoded.content, "gm");
    assert_eq!(decoded.content_type, "text/plain");
    assert_eq!(decoded.timestamp, 1_700_000_000_000);
}

#[test]
fn stamp_over_ceiling_fails_not_truncates() {
    let data = StampData {
        content: "x".repeat(OP_RETURN_MAX_SIZE),
        content_type: "text/plain".to_string(),
        timestamp: Some(0),
    };
    assert!(matches!(
        encode_stamp(&data),
        Err(BuildError::PayloadTooLarge { .. })
    ));
}

#[test]
fn counterparty_send_round_trips_through_carrier_script() {
    let transfer = CounterpartyTransfer {
        asset: "PEPECASH".to_string(),
        quantity: 42,
        memo: Some("gm".to_string()),
        destination: String::new(),
    };
    let payload = encode_counterparty_send(&transfer).unwrap();

    let carried = extract_op_return(&payload.to_script()).unwrap();
    match decode_counterparty(&carried).unwrap() {
        CounterpartyMessage::Send {
            asset,
            quantity,
            memo,
        } => {
            assert_eq!(asset, "PEPECASH");
            assert_eq!(quantity, 42);
            assert_eq!(memo, "gm");
        }
        other => panic!("expected send, got {other:?}"),
    }
}

#[test]
fn counterparty_issuance_round_trips_through_carrier_script() {
    let issuance = CounterpartyIssuance {
        asset: "RUSTBITS".to_string(),
        quantity: 21_000_000,
        description: "ferrous".to_string(),
    };
    let payload = encode_counterparty_issuance(&issuance).unwrap();

    let carried = extract_op_return(&payload.to_script()).unwrap();
    match decode_counterparty(&carried).unwrap() {
        CounterpartyMessage::Issuance {
            asset,
            quantity,
            description,
        } => {
            assert_eq!(asset, "RUSTBITS");
            assert_eq!(quantity, 21_000_000);
            assert_eq!(description, "ferrous");
        }
        other => panic!("expected issuance, got {other:?}"),
    }
}

#[test]
fn decoders_reject_each_others_payloads() {
    let rune = encode_rune_transfer(&RuneTransfer {
        rune_id: "FOO".to_string(),
        amount: 1,
        destination: String::new(),
    })
    .unwrap();
    assert!(decode_stamp(rune.as_bytes()).is_err());
    assert!(decode_counterparty(rune.as_bytes()).is_err());

    let stamp = encode_stamp(&StampData {
        content: "x".to_string(),
        content_type: "text/plain".to_string(),
        timestamp: Some(0),
    })
    .unwrap();
    assert!(decode_rune_transfer(stamp.as_bytes()).is_err());
    assert!(decode_counterparty(stamp.as_bytes()).is_err());
}
