//! Transaction draft assembly
//!
//! Combines a selection, the primary output, an optional OP_RETURN carrier
//! and a change output into a signable transaction. Ordering is a
//! protocol-visible contract: inputs keep selection order (the mandatory
//! protocol output is always input 0), the carrier output sits immediately
//! after the primary recipient output, change comes last.

use bitcoin::absolute::LockTime;
use bitcoin::blockdata::script::ScriptBuf;
use bitcoin::blockdata::witness::Witness;
use bitcoin::transaction::{OutPoint, Sequence, Version};
use bitcoin::{Address, Amount, Transaction, TxIn, TxOut};

use crate::error::BuildError;
use crate::fee::FeeEstimator;
use crate::payload::OpReturnPayload;
use crate::select::Selection;
use crate::types::Utxo;

/// Minimum economically rational output value in satoshis.
pub const DUST_THRESHOLD: u64 = 546;

/// An unsigned transaction plus the funding outputs backing each input and
/// the fee it pays.
///
/// Invariant: `sum(input values) - sum(output values) = fee >= 0`.
#[derive(Debug, Clone)]
pub struct TransactionDraft {
    pub tx: Transaction,
    /// Funding outputs, index-aligned with `tx.input`.
    pub utxos: Vec<Utxo>,
    pub fee: u64,
}

#[derive(Debug, Clone, Copy)]
pub struct Assembler {
    estimator: FeeEstimator,
}

impl Assembler {
    pub fn new(estimator: FeeEstimator) -> Self {
        Self { estimator }
    }

    /// Assemble a draft from selected inputs.
    ///
    /// `recipient` is the primary output; `None` for data-only transactions
    /// whose primary output is the carrier itself. The fee is re-derived
    /// from the final output shape rather than reusing the selector's
    /// estimate. Change above the dust threshold goes to `change_address`;
    /// at or below it, the excess is absorbed into the fee.
    pub fn assemble(
        &self,
        selection: Selection,
        recipient: Option<(&Address, u64)>,
        payload: Option<&OpReturnPayload>,
        change_address: &Address,
        fee_rate: u64,
    ) -> Result<TransactionDraft, BuildError> {
        let recipient_value = recipient.map(|(_, value)| value).unwrap_or(0);
        let planned_outputs = usize::from(recipient.is_some()) + 1;
        let fee = self.estimator.fee(
            selection.utxos.len(),
            planned_outputs,
            payload.is_some(),
            fee_rate,
        );

        let needed = recipient_value + fee;
        if selection.total < needed {
            return Err(BuildError::InsufficientFunds {
                available: selection.total,
                needed,
            });
        }

        let mut tx = Transaction {
            version: Version::TWO,
            lock_time: LockTime::ZERO,
            input: Vec::with_capacity(selection.utxos.len()),
            output: Vec::new(),
        };

        for utxo in &selection.utxos {
            tx.input.push(TxIn {
                previous_output: OutPoint {
                    txid: utxo
                        .txid
                        .parse()
                        .map_err(|e| BuildError::InvalidInput(format!("invalid txid: {}", e)))?,
                    vout: utxo.vout,
                },
                script_sig: ScriptBuf::new(),
                sequence: Sequence::MAX,
                witness: Witness::new(),
            });
        }

        if let Some((address, value)) = recipient {
            tx.output.push(TxOut {
                value: Amount::from_sat(value),
                script_pubkey: address.script_pubkey(),
            });
        }

        if let Some(payload) = payload {
            tx.output.push(TxOut {
                value: Amount::ZERO,
                script_pubkey: payload.to_script(),
            });
        }

        let change = selection.total - recipient_value - fee;
        let fee_paid = if change > DUST_THRESHOLD {
            tx.output.push(TxOut {
                value: Amount::from_sat(change),
                script_pubkey: change_address.script_pubkey(),
            });
            fee
        } else {
            // Sub-dust change is uneconomical to create; the excess goes
            // to the miner instead.
            fee + change
        };

        log::debug!(
            "assembled draft: {} inputs, {} outputs, {} sats fee",
            tx.input.len(),
            tx.output.len(),
            fee_paid
        );

        Ok(TransactionDraft {
            tx,
            utxos: selection.utxos,
            fee: fee_paid,
        })
    }
}
