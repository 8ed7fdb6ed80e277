//! Shared data types for build operations
//!
//! Wire-facing types deserialize straight from the Esplora-style indexer
//! responses, so clients can consume them transparently.

use serde::{Deserialize, Serialize};

/// Unspent transaction output, tagged with overlay-protocol metadata.
///
/// Immutable once fetched; uniquely identified by `(txid, vout)`.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Utxo {
    pub txid: String,
    pub vout: u32,
    /// Value in satoshis
    pub value: u64,
    /// Locking script, hex encoded
    pub script_pubkey: String,
    #[serde(default)]
    pub is_inscription: bool,
    #[serde(default)]
    pub inscription_id: Option<String>,
    #[serde(default)]
    pub is_rune: bool,
    #[serde(default)]
    pub rune_id: Option<String>,
}

impl Utxo {
    /// Whether two snapshot entries reference the same on-chain output.
    pub fn same_outpoint(&self, other: &Utxo) -> bool {
        self.txid == other.txid && self.vout == other.vout
    }
}

/// Recommended fee-rate tiers in sat/vB, from `/fees/recommended`.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct FeeRates {
    #[serde(rename = "fastestFee")]
    pub fastest: u64,
    #[serde(rename = "halfHourFee")]
    pub half_hour: u64,
    #[serde(rename = "hourFee")]
    pub hour: u64,
}

/// A rune transfer request.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RuneTransfer {
    pub rune_id: String,
    pub amount: u64,
    pub destination: String,
}

/// An inscription transfer request. The inscription-bearing output is
/// located in the UTXO snapshot by its id.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct InscriptionTransfer {
    pub inscription_id: String,
    pub destination: String,
}

/// A stamp message to embed on-chain.
///
/// When `timestamp` (unix millis) is `None` the encoder captures wall-clock
/// time, making the payload size-bounded but not byte-reproducible.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StampData {
    pub content: String,
    pub content_type: String,
    #[serde(default)]
    pub timestamp: Option<i64>,
}

/// A Counterparty asset send request.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CounterpartyTransfer {
    pub asset: String,
    pub quantity: u64,
    #[serde(default)]
    pub memo: Option<String>,
    pub destination: String,
}

/// A Counterparty asset issuance request.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CounterpartyIssuance {
    pub asset: String,
    pub quantity: u64,
    pub description: String,
}

/// Durable artifact of a successful build: the signed transaction plus a
/// protocol-specific echo of what was transferred.
#[derive(Debug, Clone, Serialize)]
pub struct TransactionResult {
    pub tx_hex: String,
    pub txid: String,
    /// Fee actually paid, in satoshis
    pub fee: u64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub rune: Option<RuneTransfer>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub stamp: Option<StampData>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub counterparty: Option<CounterpartyTransfer>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub issuance: Option<CounterpartyIssuance>,
}

impl TransactionResult {
    pub fn new(tx_hex: String, txid: String, fee: u64) -> Self {
        Self {
            tx_hex,
            txid,
            fee,
            rune: None,
            stamp: None,
            counterparty: None,
            issuance: None,
        }
    }
}
