//! Esplora HTTP collaborator
//!
//! Thin client over the block-explorer API: UTXO snapshots, recommended
//! fee rates, and transaction broadcast. These calls are the only
//! suspension points of a build; everything between them is pure.

use crate::error::BuildError;
use crate::types::{FeeRates, Utxo};

#[derive(Debug, Clone)]
pub struct EsploraClient {
    base_url: String,
    client: reqwest::Client,
}

impl EsploraClient {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            client: reqwest::Client::new(),
        }
    }

    /// Fetch the unspent-output snapshot for an address.
    pub async fn fetch_utxos(&self, address: &str) -> Result<Vec<Utxo>, BuildError> {
        let url = format!("{}/address/{}/utxo", self.base_url, address);
        let response = self
            .client
            .get(&url)
            .send()
            .await
            .map_err(|e| BuildError::Network(e.to_string()))?;

        if !response.status().is_success() {
            return Err(BuildError::Network(format!(
                "UTXO fetch failed with status {}",
                response.status()
            )));
        }

        let utxos: Vec<Utxo> = response
            .json()
            .await
            .map_err(|e| BuildError::Network(e.to_string()))?;
        log::debug!("fetched {} UTXOs for {}", utxos.len(), address);
        Ok(utxos)
    }

    /// Fetch recommended fee-rate tiers.
    pub async fn fetch_fee_rates(&self) -> Result<FeeRates, BuildError> {
        let url = format!("{}/fees/recommended", self.base_url);
        let response = self
            .client
            .get(&url)
            .send()
            .await
            .map_err(|e| BuildError::Network(e.to_string()))?;

        if !response.status().is_success() {
            return Err(BuildError::Network(format!(
                "fee rate fetch failed with status {}",
                response.status()
            )));
        }

        response
            .json()
            .await
            .map_err(|e| BuildError::Network(e.to_string()))
    }

    /// Broadcast a serialized transaction, returning its txid.
    ///
    /// The effect is external and irreversible; rejection (fee too low,
    /// double-spend, malformed) surfaces as `BroadcastRejected` with the
    /// node's reason forwarded opaquely.
    pub async fn broadcast(&self, tx_hex: &str) -> Result<String, BuildError> {
        log::debug!("broadcasting transaction to {}/tx", self.base_url);
        let response = self
            .client
            .post(format!("{}/tx", self.base_url))
            .body(tx_hex.to_string())
            .send()
            .await
            .map_err(|e| BuildError::Network(e.to_string()))?;

        if !response.status().is_success() {
            let error_text = response
                .text()
                .await
                .unwrap_or_else(|_| "unknown error".to_string());
            return Err(BuildError::BroadcastRejected(error_text));
        }

        response
            .text()
            .await
            .map_err(|e| BuildError::Network(e.to_string()))
    }
}
