//! Stamp message payload
//!
//! A stamp is a small structured record serialized to compact JSON. The
//! field names are part of the cross-implementation contract.

use chrono::Utc;
use serde::{Deserialize, Serialize};

use crate::error::BuildError;
use crate::payload::OpReturnPayload;
use crate::types::StampData;

pub const STAMP_PROTOCOL_ID: &str = "STAMP";

const STAMP_OP: &str = "stamp";

#[derive(Debug, Serialize, Deserialize, PartialEq, Eq)]
struct StampRecord {
    p: String,
    op: String,
    content: String,
    #[serde(rename = "contentType")]
    content_type: String,
    timestamp: i64,
}

/// Encode a stamp record.
///
/// Deterministic only when `data.timestamp` is supplied; with `None` the
/// current wall-clock time (unix millis) is captured, so the result is
/// size-bounded but not byte-reproducible.
pub fn encode_stamp(data: &StampData) -> Result<OpReturnPayload, BuildError> {
    if data.content.is_empty() {
        return Err(BuildError::InvalidInput(
            "stamp content is empty".to_string(),
        ));
    }
    if data.content_type.is_empty() {
        return Err(BuildError::InvalidInput(
            "stamp content type is empty".to_string(),
        ));
    }

    let record = StampRecord {
        p: STAMP_PROTOCOL_ID.to_string(),
        op: STAMP_OP.to_string(),
        content: data.content.clone(),
        content_type: data.content_type.clone(),
        timestamp: data
            .timestamp
            .unwrap_or_else(|| Utc::now().timestamp_millis()),
    };
    let bytes = serde_json::to_vec(&record)
        .map_err(|e| BuildError::InvalidInput(format!("stamp serialization failed: {}", e)))?;

    OpReturnPayload::new("STAMP", bytes)
}

/// Structured fields recovered from a stamp payload.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DecodedStamp {
    pub content: String,
    pub content_type: String,
    pub timestamp: i64,
}

pub fn decode_stamp(bytes: &[u8]) -> Result<DecodedStamp, BuildError> {
    let record: StampRecord = serde_json::from_slice(bytes)
        .map_err(|e| BuildError::InvalidInput(format!("malformed stamp payload: {}", e)))?;
    if record.p != STAMP_PROTOCOL_ID || record.op != STAMP_OP {
        return Err(BuildError::InvalidInput(
            "payload is not a stamp record".to_string(),
        ));
    }
    Ok(DecodedStamp {
        content: record.content,
        content_type: record.content_type,
        timestamp: record.timestamp,
    })
}
