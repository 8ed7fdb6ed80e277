/// Builder configuration
///
/// Controls the Bitcoin network, the Esplora API endpoint, and the input
/// script kind assumed by fee estimation. Passed explicitly to each
/// component; there is no process-wide state.
use std::env;

use bitcoin::Network;

/// Script kind of the inputs a wallet spends, used for size estimation.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum InputKind {
    /// Native segwit key-spend input (compact).
    P2wpkh,
    /// Legacy-sized input, the pessimistic default.
    Legacy,
}

#[derive(Clone, Debug)]
pub struct BuilderConfig {
    /// Bitcoin network type
    pub network: Network,
    /// Esplora API base URL
    pub esplora_url: String,
    /// Input kind for virtual-size estimation
    pub input_kind: InputKind,
}

impl BuilderConfig {
    pub fn new(network: Network, esplora_url: impl Into<String>) -> Self {
        Self {
            network,
            esplora_url: esplora_url.into(),
            input_kind: InputKind::Legacy,
        }
    }

    /// Load configuration from environment variables
    ///
    /// - `BITCOIN_NETWORK`: "mainnet", "testnet", "signet" (default) or "regtest"
    /// - `ESPLORA_URL`: Esplora API endpoint (optional, has per-network defaults)
    pub fn from_env() -> Self {
        let network_str = env::var("BITCOIN_NETWORK")
            .unwrap_or_else(|_| "signet".to_string())
            .to_lowercase();

        let network = match network_str.as_str() {
            "mainnet" | "bitcoin" => Network::Bitcoin,
            "testnet" => Network::Testnet,
            "regtest" => Network::Regtest,
            "signet" | "" => Network::Signet,
            other => {
                log::warn!("Unknown network '{}', defaulting to Signet", other);
                Network::Signet
            }
        };

        let esplora_url =
            env::var("ESPLORA_URL").unwrap_or_else(|_| default_esplora_url(network).to_string());
        log::info!("Using {} via {}", network, esplora_url);

        Self {
            network,
            esplora_url,
            input_kind: InputKind::Legacy,
        }
    }

    pub fn with_input_kind(mut self, input_kind: InputKind) -> Self {
        self.input_kind = input_kind;
        self
    }
}

impl Default for BuilderConfig {
    /// Default configuration (Signet)
    fn default() -> Self {
        Self::new(Network::Signet, default_esplora_url(Network::Signet))
    }
}

fn default_esplora_url(network: Network) -> &'static str {
    match network {
        Network::Bitcoin => "https://mempool.space/api",
        Network::Testnet => "https://mempool.space/testnet/api",
        Network::Signet => "https://mempool.space/signet/api",
        _ => "http://localhost:3000",
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_is_signet() {
        let config = BuilderConfig::default();
        assert!(matches!(config.network, Network::Signet));
        assert_eq!(config.esplora_url, "https://mempool.space/signet/api");
        assert_eq!(config.input_kind, InputKind::Legacy);
    }

    #[test]
    fn regtest_defaults_to_local_endpoint() {
        assert_eq!(default_esplora_url(Network::Regtest), "http://localhost:3000");
    }

    #[test]
    fn input_kind_override() {
        let config = BuilderConfig::default().with_input_kind(InputKind::P2wpkh);
        assert_eq!(config.input_kind, InputKind::P2wpkh);
    }
}
