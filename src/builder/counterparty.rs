//! Counterparty send and issuance operations

use crate::assemble::DUST_THRESHOLD;
use crate::error::BuildError;
use crate::payload::counterparty::{encode_counterparty_issuance, encode_counterparty_send};
use crate::select::ProtocolFilter;
use crate::types::{CounterpartyIssuance, CounterpartyTransfer, TransactionResult};
use crate::validate;

use super::TxBuilder;

impl TxBuilder {
    /// Send a counterparty asset to a new owner.
    ///
    /// The recipient receives a dust-value output marking the destination;
    /// the send record itself rides the OP_RETURN carrier.
    pub async fn build_counterparty_send(
        &self,
        from: &str,
        transfer: &CounterpartyTransfer,
        private_key_wif: &str,
        fee_rate: Option<u64>,
    ) -> Result<TransactionResult, BuildError> {
        log::info!(
            "Building counterparty send: {} of {} to {}",
            transfer.quantity,
            transfer.asset,
            transfer.destination
        );

        let network = self.config().network;
        let to_address = validate::parse_address(&transfer.destination, network)?;
        let change_address = validate::parse_address(from, network)?;
        let key = validate::parse_private_key(private_key_wif, network)?;

        let payload = encode_counterparty_send(transfer)?;
        log::debug!(
            "counterparty carrier payload: {}",
            hex::encode(payload.as_bytes())
        );

        let utxos = self.client().fetch_utxos(from).await?;
        let fee_rate = self.resolve_fee_rate(fee_rate).await?;

        let selection = self.selector().select(
            &utxos,
            DUST_THRESHOLD,
            fee_rate,
            2,
            true,
            ProtocolFilter::plain(),
            None,
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
            "Counterparty send built: txid {}, fee {} sats",
            signed.txid,
            draft.fee
        );
        let mut result = TransactionResult::new(signed.tx_hex, signed.txid, draft.fee);
        result.counterparty = Some(transfer.clone());
        Ok(result)
    }

    /// Issue a counterparty asset.
    ///
    /// Data-only like a stamp: the issuance record is the primary output,
    /// change returns to the issuer.
    pub async fn build_counterparty_issuance(
        &self,
        from: &str,
        issuance: &CounterpartyIssuance,
        private_key_wif: &str,
        fee_rate: Option<u64>,
    ) -> Result<TransactionResult, BuildError> {
        log::info!(
            "Building counterparty issuance: {} of {}",
            issuance.quantity,
            issuance.asset
        );

        let network = self.config().network;
        let change_address = validate::parse_address(from, network)?;
        let key = validate::parse_private_key(private_key_wif, network)?;

        let payload = encode_counterparty_issuance(issuance)?;

        let utxos = self.client().fetch_utxos(from).await?;
        let fee_rate = self.resolve_fee_rate(fee_rate).await?;

        let selection = self.selector().select(
            &utxos,
            DUST_THRESHOLD,
            fee_rate,
            1,
            true,
            ProtocolFilter::plain(),
            None,
        )?;
        let draft = self.assembler().assemble(
            selection,
            None,
            Some(&payload),
            &change_address,
            fee_rate,
        )?;
        let signed = self.signer().sign(&draft, &key)?;

        log::info!(
            "Counterparty issuance built: txid {}, fee {} sats",
            signed.txid,
            draft.fee
        );
        let mut result = TransactionResult::new(signed.tx_hex, signed.txid, draft.fee);
        result.issuance = Some(issuance.clone());
        Ok(result)
    }
}
