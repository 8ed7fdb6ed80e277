//! Build operations
//!
//! One facade over the pipeline shared by every protocol:
//! validate → fetch snapshot + fee tier → select → encode → assemble →
//! sign. Protocol-specific operations live in their own modules:
//!
//! - `btc.rs` - native value transfer and inscription transfer
//! - `rune.rs` - rune transfer
//! - `stamp.rs` - stamp data carrier
//! - `counterparty.rs` - counterparty send and issuance
//!
//! Each operation is a fresh, stateless computation over the UTXO snapshot
//! it fetched and returns the signed transaction without broadcasting it;
//! handing the hex to [`EsploraClient::broadcast`] is the caller's move.

pub mod btc;
pub mod counterparty;
pub mod rune;
pub mod stamp;

use crate::assemble::Assembler;
use crate::config::BuilderConfig;
use crate::error::BuildError;
use crate::esplora::EsploraClient;
use crate::fee::FeeEstimator;
use crate::select::CoinSelector;
use crate::signer::Signer;
use crate::validate;

/// Facade over the build pipeline.
///
/// Holds the immutable configuration and the Esplora collaborator; every
/// build constructs its own selector, assembler and signer from them, so
/// concurrent builds share no mutable state. Builds for one address do
/// race on the chain, though: two selections over overlapping snapshots
/// can spend the same outputs. Callers must re-fetch between builds for
/// the same address; no reservation layer exists here.
#[derive(Debug, Clone)]
pub struct TxBuilder {
    config: BuilderConfig,
    client: EsploraClient,
}

impl TxBuilder {
    pub fn new(config: BuilderConfig) -> Self {
        let client = EsploraClient::new(config.esplora_url.clone());
        Self { config, client }
    }

    pub fn config(&self) -> &BuilderConfig {
        &self.config
    }

    /// The Esplora collaborator, for broadcasting a built transaction.
    pub fn client(&self) -> &EsploraClient {
        &self.client
    }

    fn estimator(&self) -> FeeEstimator {
        FeeEstimator::new(self.config.input_kind)
    }

    fn selector(&self) -> CoinSelector {
        CoinSelector::new(self.estimator())
    }

    fn assembler(&self) -> Assembler {
        Assembler::new(self.estimator())
    }

    fn signer(&self) -> Signer {
        Signer::new()
    }

    /// Resolve the effective fee rate: the caller's explicit rate, or the
    /// half-hour tier when none was given. Bounds-checked either way.
    async fn resolve_fee_rate(&self, fee_rate: Option<u64>) -> Result<u64, BuildError> {
        let rate = match fee_rate {
            Some(rate) => rate,
            None => self.client.fetch_fee_rates().await?.half_hour,
        };
        validate::validate_fee_rate(rate)?;
        Ok(rate)
    }
}
