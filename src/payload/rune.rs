//! Rune transfer payload
//!
//! Layout: the fixed protocol tag, the rune identifier's raw bytes, and the
//! transfer amount as an 8-byte big-endian integer. The identifier length is
//! the dominant practical constraint; oversized identifiers are rejected,
//! never clipped.

use crate::error::BuildError;
use crate::payload::OpReturnPayload;
use crate::types::RuneTransfer;

/// Tag at the start of every rune payload.
pub const RUNE_PROTOCOL_TAG: &[u8] = b"RUNE";

/// Width of the big-endian amount field.
const AMOUNT_BYTES: usize = 8;

pub fn encode_rune_transfer(transfer: &RuneTransfer) -> Result<OpReturnPayload, BuildError> {
    if transfer.rune_id.is_empty() {
        return Err(BuildError::InvalidInput("rune id is empty".to_string()));
    }
    if transfer.amount == 0 {
        return Err(BuildError::InvalidInput(
            "rune amount must be non-zero".to_string(),
        ));
    }

    let id = transfer.rune_id.as_bytes();
    let mut data = Vec::with_capacity(RUNE_PROTOCOL_TAG.len() + id.len() + AMOUNT_BYTES);
    data.extend_from_slice(RUNE_PROTOCOL_TAG);
    data.extend_from_slice(id);
    data.extend_from_slice(&transfer.amount.to_be_bytes());

    OpReturnPayload::new("RUNE", data)
}

/// Structured fields recovered from a rune payload.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DecodedRuneTransfer {
    pub rune_id: String,
    pub amount: u64,
}

pub fn decode_rune_transfer(bytes: &[u8]) -> Result<DecodedRuneTransfer, BuildError> {
    let rest = bytes
        .strip_prefix(RUNE_PROTOCOL_TAG)
        .ok_or_else(|| BuildError::InvalidInput("missing rune protocol tag".to_string()))?;
    if rest.len() <= AMOUNT_BYTES {
        return Err(BuildError::InvalidInput(
            "rune payload too short".to_string(),
        ));
    }

    let (id, amount) = rest.split_at(rest.len() - AMOUNT_BYTES);
    let rune_id = String::from_utf8(id.to_vec())
        .map_err(|_| BuildError::InvalidInput("rune id is not valid UTF-8".to_string()))?;
    let amount = u64::from_be_bytes(
        amount
            .try_into()
            .map_err(|_| BuildError::InvalidInput("malformed rune amount field".to_string()))?,
    );

    Ok(DecodedRuneTransfer { rune_id, amount })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn transfer(rune_id: &str, amount: u64) -> RuneTransfer {
        RuneTransfer {
            rune_id: rune_id.to_string(),
            amount,
            destination: "tb1q...".to_string(),
        }
    }

    #[test]
    fn round_trip() {
        let payload = encode_rune_transfer(&transfer("UNCOMMON.GOODS", 1_500)).unwrap();
        let decoded = decode_rune_transfer(payload.as_bytes()).unwrap();
        assert_eq!(decoded.rune_id, "UNCOMMON.GOODS");
        assert_eq!(decoded.amount, 1_500);
    }

    #[test]
    fn twelve_byte_id_fits() {
        // tag (4) + id (12) + amount (8) = 24 bytes, well under the ceiling
        let payload = encode_rune_transfer(&transfer("TWELVEBYTES!", u64::MAX)).unwrap();
        assert_eq!(payload.len(), 24);
    }

    #[test]
    fn seventy_byte_id_overflows() {
        let id = "R".repeat(70);
        let err = encode_rune_transfer(&transfer(&id, 1)).unwrap_err();
        assert!(matches!(
            err,
            BuildError::PayloadTooLarge { len: 82, max: 80 }
        ));
    }

    #[test]
    fn empty_id_rejected() {
        assert!(matches!(
            encode_rune_transfer(&transfer("", 1)),
            Err(BuildError::InvalidInput(_))
        ));
    }

    #[test]
    fn zero_amount_rejected() {
        assert!(matches!(
            encode_rune_transfer(&transfer("FOO", 0)),
            Err(BuildError::InvalidInput(_))
        ));
    }

    #[test]
    fn amount_is_big_endian_fixed_width() {
        let payload = encode_rune_transfer(&transfer("A", 0x0102)).unwrap();
        let bytes = payload.as_bytes();
        assert_eq!(&bytes[..4], b"RUNE");
        assert_eq!(&bytes[5..], &[0, 0, 0, 0, 0, 0, 0x01, 0x02]);
    }

    #[test]
    fn decode_rejects_foreign_tag() {
        assert!(matches!(
            decode_rune_transfer(b"STAMPxxxxxxxxxxx"),
            Err(BuildError::InvalidInput(_))
        ));
    }
}
