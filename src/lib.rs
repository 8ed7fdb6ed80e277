//! Multi-protocol Bitcoin transaction builder
//!
//! Constructs, signs and serializes Bitcoin transactions across the
//! overlay protocols that share one substrate: native value transfer,
//! ordinal inscription moves, rune transfers, stamp data carriers and
//! Counterparty-style asset messages.
//!
//! # Architecture
//!
//! - **Coin Selector**: chooses funding outputs under protocol exclusion
//!   rules, recomputing the fee as the input set grows
//! - **Payload Encoders**: bounded OP_RETURN records for the Rune, Stamp
//!   and Counterparty protocols
//! - **Assembler**: input/output ordering and dust-aware change handling
//! - **Signer**: per-input P2WPKH signing and serialization
//! - **Esplora client**: UTXO snapshots, fee tiers and broadcast
//!
//! # Example
//!
//! ```ignore
//! use btc_tx_builder::{BuilderConfig, TxBuilder};
//!
//! let builder = TxBuilder::new(BuilderConfig::from_env());
//!
//! let result = builder
//!     .build_transfer(&from, &to, 25_000, &wif, None)
//!     .await?;
//!
//! // Broadcasting is the caller's decision, not the builder's.
//! let txid = builder.client().broadcast(&result.tx_hex).await?;
//! ```

// Public modules
pub mod assemble;
pub mod builder;
pub mod config;
pub mod error;
pub mod esplora;
pub mod fee;
pub mod payload;
pub mod select;
pub mod signer;
pub mod types;
pub mod validate;

// Re-exports for convenience
pub use assemble::{Assembler, TransactionDraft, DUST_THRESHOLD};
pub use builder::TxBuilder;
pub use config::{BuilderConfig, InputKind};
pub use error::BuildError;
pub use esplora::EsploraClient;
pub use fee::FeeEstimator;
pub use payload::{OpReturnPayload, OP_RETURN_MAX_SIZE};
pub use select::{CoinSelector, ProtocolFilter, Selection};
pub use signer::{SignedTransaction, Signer};
pub use types::{
    CounterpartyIssuance, CounterpartyTransfer, FeeRates, InscriptionTransfer, RuneTransfer,
    StampData, TransactionResult, Utxo,
};

// Common result type
pub type Result<T> = std::result::Result<T, BuildError>;
