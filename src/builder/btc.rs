//! Native value transfer and inscription transfer operations

use crate::error::BuildError;
use crate::select::ProtocolFilter;
use crate::types::{InscriptionTransfer, TransactionResult, Utxo};
use crate::validate;

use super::TxBuilder;

impl TxBuilder {
    /// Send `amount_sats` to `to`, funded from `from`'s plain outputs.
    ///
    /// Inscription- and rune-bearing outputs are never consumed as
    /// fee-paying inputs; spending one here would destroy the overlay
    /// asset it carries.
    pub async fn build_transfer(
        &self,
        from: &str,
        to: &str,
        amount_sats: u64,
        private_key_wif: &str,
        fee_rate: Option<u64>,
    ) -> Result<TransactionResult, BuildError> {
        log::info!("Building transfer: {} sats from {} to {}", amount_sats, from, to);

        let network = self.config().network;
        let to_address = validate::parse_address(to, network)?;
        let change_address = validate::parse_address(from, network)?;
        validate::validate_amount(amount_sats)?;
        let key = validate::parse_private_key(private_key_wif, network)?;

        let utxos = self.client().fetch_utxos(from).await?;
        let fee_rate = self.resolve_fee_rate(fee_rate).await?;

        let selection = self.selector().select(
            &utxos,
            amount_sats,
            fee_rate,
            2,
            false,
            ProtocolFilter::plain(),
            None,
        )?;
        let draft = self.assembler().assemble(
            selection,
            Some((&to_address, amount_sats)),
            None,
            &change_address,
            fee_rate,
        )?;
        let signed = self.signer().sign(&draft, &key)?;

        log::info!("Transfer built: txid {}, fee {} sats", signed.txid, draft.fee);
        Ok(TransactionResult::new(signed.tx_hex, signed.txid, draft.fee))
    }

    /// Move the output bearing an inscription to a new owner.
    ///
    /// The inscription-bearing UTXO is always input 0 and its full value
    /// carries over to the recipient output, keeping the inscribed sats
    /// intact; additional plain inputs cover the fee.
    pub async fn build_inscription_transfer(
        &self,
        from: &str,
        transfer: &InscriptionTransfer,
        private_key_wif: &str,
        fee_rate: Option<u64>,
    ) -> Result<TransactionResult, BuildError> {
        log::info!(
            "Building inscription transfer: {} to {}",
            transfer.inscription_id,
            transfer.destination
        );

        let network = self.config().network;
        let to_address = validate::parse_address(&transfer.destination, network)?;
        let change_address = validate::parse_address(from, network)?;
        let key = validate::parse_private_key(private_key_wif, network)?;

        let utxos = self.client().fetch_utxos(from).await?;
        let inscription_utxo = find_inscription_utxo(&utxos, &transfer.inscription_id)?;
        let fee_rate = self.resolve_fee_rate(fee_rate).await?;

        let selection = self.selector().select(
            &utxos,
            inscription_utxo.value,
            fee_rate,
            2,
            false,
            ProtocolFilter::plain(),
            Some(&inscription_utxo),
        )?;
        let draft = self.assembler().assemble(
            selection,
            Some((&to_address, inscription_utxo.value)),
            None,
            &change_address,
            fee_rate,
        )?;
        let signed = self.signer().sign(&draft, &key)?;

        log::info!(
            "Inscription transfer built: txid {}, fee {} sats",
            signed.txid,
            draft.fee
        );
        Ok(TransactionResult::new(signed.tx_hex, signed.txid, draft.fee))
    }
}

fn find_inscription_utxo(utxos: &[Utxo], inscription_id: &str) -> Result<Utxo, BuildError> {
    utxos
        .iter()
        .find(|u| u.is_inscription && u.inscription_id.as_deref() == Some(inscription_id))
        .cloned()
        .ok_or_else(|| {
            BuildError::ResourceNotFound(format!(
                "Inscription {} not in the UTXO snapshot",
                inscription_id
            ))
        })
}
