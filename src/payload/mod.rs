//! OP_RETURN payload construction for the overlay protocols
//!
//! Each protocol encoder produces a bounded `OpReturnPayload` that is
//! embedded in a zero-value, unspendable carrier output. The byte layout is
//! a cross-implementation contract: protocol readers elsewhere in the
//! ecosystem parse these payloads, so encoding must never truncate —
//! oversized payloads are a hard failure.

pub mod counterparty;
pub mod rune;
pub mod stamp;

use bitcoin::opcodes::all::OP_RETURN;
use bitcoin::script::{Instruction, PushBytesBuf, Script, ScriptBuf};

use crate::error::BuildError;

/// Maximum standard OP_RETURN data size in bytes.
pub const OP_RETURN_MAX_SIZE: usize = 80;

/// A protocol payload ready for embedding, validated against the size
/// ceiling at construction.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OpReturnPayload {
    protocol: &'static str,
    data: PushBytesBuf,
}

impl OpReturnPayload {
    /// Wrap raw payload bytes, failing with `PayloadTooLarge` beyond the
    /// 80-byte ceiling.
    pub fn new(protocol: &'static str, data: Vec<u8>) -> Result<Self, BuildError> {
        let len = data.len();
        if len > OP_RETURN_MAX_SIZE {
            return Err(BuildError::PayloadTooLarge {
                len,
                max: OP_RETURN_MAX_SIZE,
            });
        }
        let data = PushBytesBuf::try_from(data).map_err(|_| BuildError::PayloadTooLarge {
            len,
            max: OP_RETURN_MAX_SIZE,
        })?;
        Ok(Self { protocol, data })
    }

    /// Short tag naming the overlay protocol, for logging and echoes.
    pub fn protocol(&self) -> &'static str {
        self.protocol
    }

    pub fn as_bytes(&self) -> &[u8] {
        self.data.as_bytes()
    }

    pub fn len(&self) -> usize {
        self.data.len()
    }

    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    /// The unspendable carrier script: `OP_RETURN <data>`.
    pub fn to_script(&self) -> ScriptBuf {
        ScriptBuf::new_op_return(&self.data)
    }
}

/// Extract the raw payload bytes from an OP_RETURN carrier script.
///
/// Counterpart to [`OpReturnPayload::to_script`], used by the protocol
/// decoders to recover structured fields from a transaction output.
pub fn extract_op_return(script: &Script) -> Result<Vec<u8>, BuildError> {
    if !script.is_op_return() {
        return Err(BuildError::InvalidInput(
            "script is not an OP_RETURN output".to_string(),
        ));
    }

    let mut instructions = script.instructions();
    match instructions.next() {
        Some(Ok(Instruction::Op(op))) if op == OP_RETURN => {}
        _ => {
            return Err(BuildError::InvalidInput(
                "malformed OP_RETURN script".to_string(),
            ))
        }
    }
    match instructions.next() {
        Some(Ok(Instruction::PushBytes(push))) => Ok(push.as_bytes().to_vec()),
        _ => Err(BuildError::InvalidInput(
            "OP_RETURN script carries no payload".to_string(),
        )),
    }
}
