//! Error types for transaction build operations
//!
//! One tagged variant per failure class so callers can branch on kind
//! instead of string-matching messages.

use thiserror::Error;

#[derive(Error, Debug)]
pub enum BuildError {
    /// Malformed caller input (address, amount, key, fee rate). Checked
    /// eagerly, before any network or selection work.
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    /// Coin selection could not meet the target. Terminal for this attempt.
    #[error("Insufficient funds: have {available} sats, need {needed} sats")]
    InsufficientFunds { available: u64, needed: u64 },

    /// Protocol payload exceeds the OP_RETURN ceiling. Never truncated.
    #[error("Payload too large for OP_RETURN: {len} bytes (max {max})")]
    PayloadTooLarge { len: usize, max: usize },

    /// A referenced inscription or rune output is absent from the snapshot.
    #[error("Resource not found: {0}")]
    ResourceNotFound(String),

    #[error("Network error: {0}")]
    Network(String),

    #[error("Broadcast rejected: {0}")]
    BroadcastRejected(String),

    #[error("Signing error: {0}")]
    Signing(String),
}
