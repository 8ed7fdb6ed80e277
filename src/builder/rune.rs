//! Rune transfer operation

use crate::assemble::DUST_THRESHOLD;
use crate::error::BuildError;
use crate::payload::rune::encode_rune_transfer;
use crate::select::ProtocolFilter;
use crate::types::{RuneTransfer, TransactionResult, Utxo};
use crate::validate;

use super::TxBuilder;

impl TxBuilder {
    /// Transfer a rune to a new owner.
    ///
    /// The rune-bearing UTXO must move: it is seeded as input 0, the
    /// recipient receives a dust-value output that carries the rune
    /// forward, and the transfer record rides an OP_RETURN carrier. When
    /// the rune output's own value falls short of the dust output plus
    /// fee, plain inputs make up the difference.
    pub async fn build_rune_transfer(
        &self,
        from: &str,
        transfer: &RuneTransfer,
        private_key_wif: &str,
        fee_rate: Option<u64>,
    ) -> Result<TransactionResult, BuildError> {
        log::info!(
            "Building rune transfer: {} of {} to {}",
            transfer.amount,
            transfer.rune_id,
            transfer.destination
        );

        let network = self.config().network;
        let to_address = validate::parse_address(&transfer.destination, network)?;
        let change_address = validate::parse_address(from, network)?;
        let key = validate::parse_private_key(private_key_wif, network)?;

        let payload = encode_rune_transfer(transfer)?;
        log::debug!("rune carrier payload: {}", hex::encode(payload.as_bytes()));

        let utxos = self.client().fetch_utxos(from).await?;
        let rune_utxo = find_rune_utxo(&utxos, &transfer.rune_id)?;
        let fee_rate = self.resolve_fee_rate(fee_rate).await?;

        let selection = self.selector().select(
            &utxos,
            DUST_THRESHOLD,
            fee_rate,
            2,
            true,
            ProtocolFilter::plain(),
            Some(&rune_utxo),
        )?;
        let draft = self.assembler().assemble(
            selection,
            Some((&to_address, DUST_THRESHOLD)),
            Some(&payload),
            &change_address,
            fee_rate,
        )?;
        let signed = self.signer().sign(&draft, &key)?;

        log::info!(
            "Rune transfer built: txid {}, fee {} sats",
            signed.txid,
            draft.fee
        );
        let mut result = TransactionResult::new(signed.tx_hex, signed.txid, draft.fee);
        result.rune = Some(transfer.clone());
        Ok(result)
    }
}

fn find_rune_utxo(utxos: &[Utxo], rune_id: &str) -> Result<Utxo, BuildError> {
    utxos
        .iter()
        .find(|u| u.is_rune && u.rune_id.as_deref() == Some(rune_id))
        .cloned()
        .ok_or_else(|| {
            BuildError::ResourceNotFound(format!("Rune {} not in the UTXO snapshot", rune_id))
        })
}
