//! Counterparty-style asset payloads
//!
//! Sends and issuances serialize to compact JSON records distinguished by
//! their `op` field; quantities travel as decimal strings.

use serde::{Deserialize, Serialize};

use crate::error::BuildError;
use crate::payload::OpReturnPayload;
use crate::types::{CounterpartyIssuance, CounterpartyTransfer};

pub const COUNTERPARTY_PROTOCOL_ID: &str = "COUNTERPARTY";

const OP_SEND: &str = "send";
const OP_ISSUANCE: &str = "issuance";

#[derive(Debug, Serialize, Deserialize)]
struct CounterpartyRecord {
    p: String,
    op: String,
    asset: String,
    qty: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    memo: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    description: Option<String>,
}

pub fn encode_counterparty_send(
    transfer: &CounterpartyTransfer,
) -> Result<OpReturnPayload, BuildError> {
    if transfer.asset.is_empty() {
        return Err(BuildError::InvalidInput(
            "counterparty asset is empty".to_string(),
        ));
    }
    if transfer.quantity == 0 {
        return Err(BuildError::InvalidInput(
            "counterparty quantity must be non-zero".to_string(),
        ));
    }

    let record = CounterpartyRecord {
        p: COUNTERPARTY_PROTOCOL_ID.to_string(),
        op: OP_SEND.to_string(),
        asset: transfer.asset.clone(),
        qty: transfer.quantity.to_string(),
        memo: Some(transfer.memo.clone().unwrap_or_default()),
        description: None,
    };
    to_payload(&record)
}

pub fn encode_counterparty_issuance(
    issuance: &CounterpartyIssuance,
) -> Result<OpReturnPayload, BuildError> {
    if issuance.asset.is_empty() {
        return Err(BuildError::InvalidInput(
            "counterparty asset is empty".to_string(),
        ));
    }
    if issuance.quantity == 0 {
        return Err(BuildError::InvalidInput(
            "counterparty quantity must be non-zero".to_string(),
        ));
    }

    let record = CounterpartyRecord {
        p: COUNTERPARTY_PROTOCOL_ID.to_string(),
        op: OP_ISSUANCE.to_string(),
        asset: issuance.asset.clone(),
        qty: issuance.quantity.to_string(),
        memo: None,
        description: Some(issuance.description.clone()),
    };
    to_payload(&record)
}

fn to_payload(record: &CounterpartyRecord) -> Result<OpReturnPayload, BuildError> {
    let bytes = serde_json::to_vec(record).map_err(|e| {
        BuildError::InvalidInput(format!("counterparty serialization failed: {}", e))
    })?;
    OpReturnPayload::new("COUNTERPARTY", bytes)
}

/// Structured fields recovered from a Counterparty payload.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CounterpartyMessage {
    Send {
        asset: String,
        quantity: u64,
        memo: String,
    },
    Issuance {
        asset: String,
        quantity: u64,
        description: String,
    },
}

pub fn decode_counterparty(bytes: &[u8]) -> Result<CounterpartyMessage, BuildError> {
    let record: CounterpartyRecord = serde_json::from_slice(bytes)
        .map_err(|e| BuildError::InvalidInput(format!("malformed counterparty payload: {}", e)))?;
    if record.p != COUNTERPARTY_PROTOCOL_ID {
        return Err(BuildError::InvalidInput(
            "payload is not a counterparty record".to_string(),
        ));
    }
    let quantity: u64 = record
        .qty
        .parse()
        .map_err(|_| BuildError::InvalidInput("malformed counterparty quantity".to_string()))?;

    match record.op.as_str() {
        OP_SEND => Ok(CounterpartyMessage::Send {
            asset: record.asset,
            quantity,
            memo: record.memo.unwrap_or_default(),
        }),
        OP_ISSUANCE => Ok(CounterpartyMessage::Issuance {
            asset: record.asset,
            quantity,
            description: record.description.unwrap_or_default(),
        }),
        other => Err(BuildError::InvalidInput(format!(
            "unknown counterparty op: {}",
            other
        ))),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn send_round_trip() {
        let transfer = CounterpartyTransfer {
            asset: "PEPECASH".to_string(),
            quantity: 1_000,
            memo: Some("gm".to_string()),
            destination: "tb1q...".to_string(),
        };
        let payload = encode_counterparty_send(&transfer).unwrap();
        match decode_counterparty(payload.as_bytes()).unwrap() {
            CounterpartyMessage::Send {
                asset,
                quantity,
                memo,
            } => {
                assert_eq!(asset, "PEPECASH");
                assert_eq!(quantity, 1_000);
                assert_eq!(memo, "gm");
            }
            other => panic!("expected send, got {other:?}"),
        }
    }

    #[test]
    fn missing_memo_encodes_as_empty_string() {
        let transfer = CounterpartyTransfer {
            asset: "XCP".to_string(),
            quantity: 5,
            memo: None,
            destination: String::new(),
        };
        let payload = encode_counterparty_send(&transfer).unwrap();
        let json: serde_json::Value = serde_json::from_slice(payload.as_bytes()).unwrap();
        assert_eq!(json["memo"], "");
    }

    #[test]
    fn issuance_round_trip() {
        let issuance = CounterpartyIssuance {
            asset: "RUSTBITS".to_string(),
            quantity: 21_000_000,
            description: "ferrous".to_string(),
        };
        let payload = encode_counterparty_issuance(&issuance).unwrap();
        match decode_counterparty(payload.as_bytes()).unwrap() {
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
    fn quantity_travels_as_string() {
        let transfer = CounterpartyTransfer {
            asset: "XCP".to_string(),
            quantity: u64::MAX,
            memo: None,
            destination: String::new(),
        };
        let payload = encode_counterparty_send(&transfer).unwrap();
        let json: serde_json::Value = serde_json::from_slice(payload.as_bytes()).unwrap();
        assert_eq!(json["qty"], u64::MAX.to_string());
    }

    #[test]
    fn oversized_description_rejected() {
        let issuance = CounterpartyIssuance {
            asset: "X".to_string(),
            quantity: 1,
            description: "d".repeat(80),
        };
        assert!(matches!(
            encode_counterparty_issuance(&issuance),
            Err(BuildError::PayloadTooLarge { .. })
        ));
    }

    #[test]
    fn zero_quantity_rejected() {
        let transfer = CounterpartyTransfer {
            asset: "XCP".to_string(),
            quantity: 0,
            memo: None,
            destination: String::new(),
        };
        assert!(matches!(
            encode_counterparty_send(&transfer),
            Err(BuildError::InvalidInput(_))
        ));
    }
}
