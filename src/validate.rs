//! Eager caller-input validation
//!
//! Addresses, amounts, keys and fee rates are checked before any network
//! or selection work, so a malformed request fails immediately and without
//! side effects.

use std::str::FromStr;

use bitcoin::{Address, Network, NetworkKind, PrivateKey};

use crate::error::BuildError;
use crate::fee::{MAX_FEE_RATE, MIN_FEE_RATE};

/// Parse an address and check it belongs to `network`.
pub fn parse_address(address: &str, network: Network) -> Result<Address, BuildError> {
    Address::from_str(address)
        .map_err(|e| BuildError::InvalidInput(format!("Invalid address: {}", e)))?
        .require_network(network)
        .map_err(|e| BuildError::InvalidInput(format!("Address network mismatch: {}", e)))
}

/// Parse a WIF private key and check it matches `network`.
pub fn parse_private_key(wif: &str, network: Network) -> Result<PrivateKey, BuildError> {
    let key = PrivateKey::from_wif(wif)
        .map_err(|e| BuildError::InvalidInput(format!("Invalid private key: {}", e)))?;
    if key.network != NetworkKind::from(network) {
        return Err(BuildError::InvalidInput(
            "Private key network mismatch".to_string(),
        ));
    }
    Ok(key)
}

pub fn validate_amount(amount_sats: u64) -> Result<(), BuildError> {
    if amount_sats == 0 {
        return Err(BuildError::InvalidInput(
            "Amount must be greater than zero".to_string(),
        ));
    }
    Ok(())
}

pub fn validate_fee_rate(fee_rate: u64) -> Result<(), BuildError> {
    if !(MIN_FEE_RATE..=MAX_FEE_RATE).contains(&fee_rate) {
        return Err(BuildError::InvalidInput(format!(
            "Fee rate {} sat/vB outside allowed range {}..={}",
            fee_rate, MIN_FEE_RATE, MAX_FEE_RATE
        )));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use bitcoin::secp256k1::Secp256k1;
    use bitcoin::CompressedPublicKey;

    fn key_and_address(network: Network) -> (PrivateKey, Address) {
        let secp = Secp256k1::new();
        let key = PrivateKey::from_slice(&[0x42; 32], network).unwrap();
        let pubkey = CompressedPublicKey::try_from(key.public_key(&secp)).unwrap();
        (key, Address::p2wpkh(&pubkey, network))
    }

    #[test]
    fn address_round_trips_through_parsing() {
        let (_, address) = key_and_address(Network::Signet);
        let parsed = parse_address(&address.to_string(), Network::Signet).unwrap();
        assert_eq!(parsed, address);
    }

    #[test]
    fn mainnet_address_rejected_on_regtest() {
        let (_, address) = key_and_address(Network::Bitcoin);
        let err = parse_address(&address.to_string(), Network::Regtest).unwrap_err();
        assert!(matches!(err, BuildError::InvalidInput(_)));
    }

    #[test]
    fn garbage_address_rejected() {
        assert!(matches!(
            parse_address("not-an-address", Network::Signet),
            Err(BuildError::InvalidInput(_))
        ));
    }

    #[test]
    fn wif_round_trips_through_parsing() {
        let (key, _) = key_and_address(Network::Signet);
        let parsed = parse_private_key(&key.to_wif(), Network::Signet).unwrap();
        assert_eq!(parsed.inner, key.inner);
    }

    #[test]
    fn mainnet_wif_rejected_on_testnet() {
        let (key, _) = key_and_address(Network::Bitcoin);
        assert!(matches!(
            parse_private_key(&key.to_wif(), Network::Testnet),
            Err(BuildError::InvalidInput(_))
        ));
    }

    #[test]
    fn zero_amount_rejected() {
        assert!(validate_amount(0).is_err());
        assert!(validate_amount(546).is_ok());
    }

    #[test]
    fn fee_rate_bounds_enforced() {
        assert!(validate_fee_rate(0).is_err());
        assert!(validate_fee_rate(1).is_ok());
        assert!(validate_fee_rate(500).is_ok());
        assert!(validate_fee_rate(501).is_err());
    }
}
