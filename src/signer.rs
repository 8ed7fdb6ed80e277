//! Per-input signing and finalization
//!
//! Produces ECDSA P2WPKH witnesses for every input of a draft using a
//! single private key, then serializes the finalized transaction. Nothing
//! is persisted; a failed input leaves no partially-signed state behind.

use bitcoin::consensus::encode::serialize_hex;
use bitcoin::hashes::Hash;
use bitcoin::secp256k1::{Message, Secp256k1};
use bitcoin::sighash::{EcdsaSighashType, SighashCache};
use bitcoin::{CompressedPublicKey, PrivateKey, ScriptBuf, Transaction};

use crate::assemble::TransactionDraft;
use crate::error::BuildError;

/// A finalized, serialized transaction and its identifier.
#[derive(Debug, Clone)]
pub struct SignedTransaction {
    pub tx: Transaction,
    pub tx_hex: String,
    pub txid: String,
}

#[derive(Debug, Clone, Copy, Default)]
pub struct Signer;

impl Signer {
    pub fn new() -> Self {
        Self
    }

    /// Sign every input of the draft with `private_key`.
    ///
    /// Each input's funding output must be a P2WPKH script controlled by
    /// the key; anything else fails with `Signing` before any witness is
    /// attached.
    pub fn sign(
        &self,
        draft: &TransactionDraft,
        private_key: &PrivateKey,
    ) -> Result<SignedTransaction, BuildError> {
        let secp = Secp256k1::new();
        let pubkey = CompressedPublicKey::from_private_key(&secp, private_key)
            .map_err(|e| BuildError::Signing(format!("invalid private key: {}", e)))?;
        let key_script = ScriptBuf::new_p2wpkh(&pubkey.wpubkey_hash());

        let tx = &draft.tx;
        let mut signatures = Vec::with_capacity(tx.input.len());

        for (input_index, input) in tx.input.iter().enumerate() {
            let utxo = draft
                .utxos
                .iter()
                .find(|u| {
                    u.txid
                        .parse::<bitcoin::Txid>()
                        .map(|txid| {
                            txid == input.previous_output.txid
                                && u.vout == input.previous_output.vout
                        })
                        .unwrap_or(false)
                })
                .ok_or_else(|| {
                    BuildError::Signing("funding output not found for input".to_string())
                })?;

            let funding_script = ScriptBuf::from_hex(&utxo.script_pubkey)
                .map_err(|e| BuildError::Signing(format!("invalid funding script: {}", e)))?;
            if !funding_script.is_p2wpkh() {
                return Err(BuildError::Signing(
                    "unsupported script type: only P2WPKH inputs can be signed".to_string(),
                ));
            }
            if funding_script != key_script {
                return Err(BuildError::Signing(format!(
                    "input {} is not controlled by the provided key",
                    input_index
                )));
            }

            let mut sighash_cache = SighashCache::new(tx);
            let sighash = sighash_cache
                .p2wpkh_signature_hash(
                    input_index,
                    &funding_script,
                    bitcoin::Amount::from_sat(utxo.value),
                    EcdsaSighashType::All,
                )
                .map_err(|e| BuildError::Signing(e.to_string()))?;

            let message = Message::from_digest(sighash.to_byte_array());
            let signature = secp.sign_ecdsa(&message, &private_key.inner);

            let mut sig_with_hashtype = signature.serialize_der().to_vec();
            sig_with_hashtype.push(EcdsaSighashType::All.to_u32() as u8);
            signatures.push(sig_with_hashtype);
        }

        let mut signed_tx = tx.clone();
        for (input, sig) in signed_tx.input.iter_mut().zip(signatures) {
            input.witness.push(sig);
            input.witness.push(pubkey.to_bytes());
        }

        let txid = signed_tx.compute_txid().to_string();
        let tx_hex = serialize_hex(&signed_tx);
        log::debug!("signed transaction {} ({} inputs)", txid, signed_tx.input.len());

        Ok(SignedTransaction {
            tx: signed_tx,
            tx_hex,
            txid,
        })
    }
}
