//! Coin selection
//!
//! One parameterized selector serves every protocol: a `ProtocolFilter`
//! decides which snapshot entries are spendable as plain fee-paying inputs,
//! and an optional mandatory output (the inscription- or rune-bearing UTXO
//! that must move) is seeded into the selection ahead of the general pool.

use crate::error::BuildError;
use crate::fee::FeeEstimator;
use crate::types::Utxo;

/// Exclusion rules applied to the general candidate pool.
///
/// Outputs already bearing an inscription or rune must never be consumed as
/// plain fee-paying inputs; doing so would destroy the overlay asset.
#[derive(Debug, Clone, Copy, Default)]
pub struct ProtocolFilter {
    pub exclude_inscriptions: bool,
    pub exclude_runes: bool,
}

impl ProtocolFilter {
    /// Filter for plain spends: only untagged outputs are eligible.
    pub fn plain() -> Self {
        Self {
            exclude_inscriptions: true,
            exclude_runes: true,
        }
    }

    pub fn allows(&self, utxo: &Utxo) -> bool {
        if self.exclude_inscriptions && utxo.is_inscription {
            return false;
        }
        if self.exclude_runes && utxo.is_rune {
            return false;
        }
        true
    }
}

/// Successful selection: chosen outputs in selection order, their summed
/// value, and the fee estimated for the final input count.
///
/// Invariant: `total >= target + fee`.
#[derive(Debug, Clone)]
pub struct Selection {
    pub utxos: Vec<Utxo>,
    pub total: u64,
    pub fee: u64,
}

/// Greedy-descending coin selector.
///
/// Not globally optimal: predictability is preferred over minimal-waste
/// selection, and no long-term UTXO-pool shaping is attempted.
#[derive(Debug, Clone, Copy)]
pub struct CoinSelector {
    estimator: FeeEstimator,
}

impl CoinSelector {
    pub fn new(estimator: FeeEstimator) -> Self {
        Self { estimator }
    }

    /// Select outputs covering `target` plus the fee induced by the
    /// selection itself.
    ///
    /// `outputs` and `has_op_return` describe the planned transaction shape
    /// (recipient and change outputs, OP_RETURN carrier) so the fee grows
    /// with the input count as candidates are appended. The fee is
    /// recomputed on every iteration; the running total is never compared
    /// against a stale estimate.
    ///
    /// A `mandatory` output is seeded first (it becomes input 0) and is
    /// removed from the general pool by outpoint identity. Candidates
    /// rejected by `filter` are skipped. Exhausting the pool without
    /// reaching the target fails with `InsufficientFunds`; a partial
    /// selection is never returned.
    pub fn select(
        &self,
        candidates: &[Utxo],
        target: u64,
        fee_rate: u64,
        outputs: usize,
        has_op_return: bool,
        filter: ProtocolFilter,
        mandatory: Option<&Utxo>,
    ) -> Result<Selection, BuildError> {
        let mut pool: Vec<&Utxo> = candidates
            .iter()
            .filter(|u| filter.allows(u))
            .filter(|u| mandatory.map_or(true, |m| !u.same_outpoint(m)))
            .collect();
        // Stable sort keeps equal-value candidates in input order.
        pool.sort_by(|a, b| b.value.cmp(&a.value));

        let mut selected: Vec<Utxo> = Vec::new();
        let mut total: u64 = 0;

        if let Some(m) = mandatory {
            selected.push(m.clone());
            total = m.value;
            let fee = self.estimator.fee(1, outputs, has_op_return, fee_rate);
            if total >= target + fee {
                return Ok(Selection {
                    utxos: selected,
                    total,
                    fee,
                });
            }
        } else if let Some(largest) = pool.first() {
            // Single-input shortcut: the largest candidate alone, when it
            // covers target plus the one-input fee.
            let fee = self.estimator.fee(1, outputs, has_op_return, fee_rate);
            if largest.value >= target + fee {
                log::debug!(
                    "coin selection: single input {}:{} covers {} + {} fee",
                    largest.txid,
                    largest.vout,
                    target,
                    fee
                );
                return Ok(Selection {
                    utxos: vec![(*largest).clone()],
                    total: largest.value,
                    fee,
                });
            }
        }

        for utxo in &pool {
            selected.push((*utxo).clone());
            total += utxo.value;

            let fee = self
                .estimator
                .fee(selected.len(), outputs, has_op_return, fee_rate);
            if total >= target + fee {
                log::debug!(
                    "coin selection: {} inputs, {} sats selected, {} sats fee",
                    selected.len(),
                    total,
                    fee
                );
                return Ok(Selection {
                    utxos: selected,
                    total,
                    fee,
                });
            }
        }

        let fee = self
            .estimator
            .fee(selected.len().max(1), outputs, has_op_return, fee_rate);
        Err(BuildError::InsufficientFunds {
            available: total,
            needed: target + fee,
        })
    }
}
