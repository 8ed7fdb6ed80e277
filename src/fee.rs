//! Virtual-size and fee estimation
//!
//! The estimate is deterministic and pessimistic: it is computed from the
//! structural shape of the transaction (input count, output count, presence
//! of an OP_RETURN carrier) before the exact shape is final. Callers must
//! re-derive it whenever input or output counts change; a stale estimate
//! must never be carried across a selection/assembly loop.

use crate::config::InputKind;

/// Version, locktime and count fields.
pub const OVERHEAD_VSIZE: u64 = 10;
/// Legacy-sized input.
pub const LEGACY_INPUT_VSIZE: u64 = 148;
/// Native segwit key-spend input.
pub const P2WPKH_INPUT_VSIZE: u64 = 68;
/// Standard value-bearing output.
pub const OUTPUT_VSIZE: u64 = 34;
/// Zero-value OP_RETURN carrier output, sized for the 80-byte ceiling.
pub const OP_RETURN_VSIZE: u64 = 40;

/// Fee-rate sanity bounds in sat/vB, enforced during validation.
pub const MIN_FEE_RATE: u64 = 1;
pub const MAX_FEE_RATE: u64 = 500;

impl InputKind {
    pub fn input_vsize(self) -> u64 {
        match self {
            InputKind::P2wpkh => P2WPKH_INPUT_VSIZE,
            InputKind::Legacy => LEGACY_INPUT_VSIZE,
        }
    }
}

/// Structural size/fee estimator for one input kind.
#[derive(Debug, Clone, Copy)]
pub struct FeeEstimator {
    input_vsize: u64,
}

impl FeeEstimator {
    pub fn new(input_kind: InputKind) -> Self {
        Self {
            input_vsize: input_kind.input_vsize(),
        }
    }

    /// Estimated virtual size for a transaction of the given shape.
    pub fn vsize(&self, inputs: usize, outputs: usize, has_op_return: bool) -> u64 {
        let op_return = if has_op_return { OP_RETURN_VSIZE } else { 0 };
        OVERHEAD_VSIZE
            + inputs as u64 * self.input_vsize
            + outputs as u64 * OUTPUT_VSIZE
            + op_return
    }

    /// Estimated fee in satoshis at an integral sat/vB rate.
    ///
    /// Integer units throughout; with an integral rate the ceiling of
    /// `vsize * rate` is exact.
    pub fn fee(&self, inputs: usize, outputs: usize, has_op_return: bool, fee_rate: u64) -> u64 {
        self.vsize(inputs, outputs, has_op_return) * fee_rate
    }
}

impl Default for FeeEstimator {
    fn default() -> Self {
        Self::new(InputKind::Legacy)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn one_in_one_out_legacy() {
        let est = FeeEstimator::new(InputKind::Legacy);
        assert_eq!(est.vsize(1, 1, false), 192);
        assert_eq!(est.fee(1, 1, false, 5), 960);
    }

    #[test]
    fn op_return_adds_carrier_overhead() {
        let est = FeeEstimator::new(InputKind::Legacy);
        assert_eq!(est.vsize(1, 1, true), 192 + OP_RETURN_VSIZE);
    }

    #[test]
    fn p2wpkh_inputs_are_compact() {
        let legacy = FeeEstimator::new(InputKind::Legacy);
        let segwit = FeeEstimator::new(InputKind::P2wpkh);
        assert!(segwit.vsize(3, 2, false) < legacy.vsize(3, 2, false));
        assert_eq!(segwit.vsize(1, 2, false), 10 + 68 + 2 * 34);
    }

    #[test]
    fn fee_is_monotonic_in_counts() {
        let est = FeeEstimator::default();
        for inputs in 0..8 {
            for outputs in 0..8 {
                let base = est.fee(inputs, outputs, false, 7);
                assert!(est.fee(inputs + 1, outputs, false, 7) > base);
                assert!(est.fee(inputs, outputs + 1, false, 7) > base);
                assert!(est.fee(inputs, outputs, true, 7) > base);
            }
        }
    }

    #[test]
    fn zero_shape_is_overhead_only() {
        let est = FeeEstimator::default();
        assert_eq!(est.fee(0, 0, false, 3), OVERHEAD_VSIZE * 3);
    }
}
