//! Stamp operation

use crate::assemble::DUST_THRESHOLD;
use crate::error::BuildError;
use crate::payload::stamp::encode_stamp;
use crate::select::ProtocolFilter;
use crate::types::{StampData, TransactionResult};
use crate::validate;

use super::TxBuilder;

impl TxBuilder {
    /// Embed a stamp message on-chain.
    ///
    /// Data-only transaction: the OP_RETURN carrier is the primary output
    /// and whatever remains above dust returns to the sender as change.
    pub async fn build_stamp(
        &self,
        from: &str,
        data: &StampData,
        private_key_wif: &str,
        fee_rate: Option<u64>,
    ) -> Result<TransactionResult, BuildError> {
        log::info!("Building stamp: {} ({})", data.content, data.content_type);

        let network = self.config().network;
        let change_address = validate::parse_address(from, network)?;
        let key = validate::parse_private_key(private_key_wif, network)?;

        let payload = encode_stamp(data)?;
        log::debug!("stamp carrier payload: {}", hex::encode(payload.as_bytes()));

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

        log::info!("Stamp built: txid {}, fee {} sats", signed.txid, draft.fee);
        let mut result = TransactionResult::new(signed.tx_hex, signed.txid, draft.fee);
        result.stamp = Some(data.clone());
        Ok(result)
    }
}
