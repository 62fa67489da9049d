//! The legacy Bitcoin consensus transaction encoding (versions 1 and 2).

use alloc::vec::Vec;

use crate::error::CmfError;
use crate::fixed;
use crate::script;

use super::{Lint, Transaction, TxIn, TxOut};

/// Parses a v1/v2 transaction. `bytes` includes the 4-byte version header.
pub fn parse(bytes: &[u8], lint: Lint) -> Result<Transaction, CmfError> {
    let length = bytes.len();
    let mut pos = 0usize;
    let version = fixed::read_u32(bytes, &mut pos)?;

    let in_count = fixed::read_compact_size(bytes, &mut pos)?;
    let mut inputs = Vec::with_capacity(in_count as usize);
    for _ in 0..in_count {
        let id_slice = bytes.get(pos..pos + 32).ok_or(CmfError::TruncatedInput)?;
        let mut prev_tx_id = [0u8; 32];
        // The wire bytes are reversed on read, matching
        // `original_source/Transaction.cpp`'s `parseTransactionV1`.
        for i in 0..32 {
            prev_tx_id[i] = id_slice[31 - i];
        }
        pos += 32;

        let prev_index = fixed::read_u32(bytes, &mut pos)?;

        let script_len = fixed::read_compact_size(bytes, &mut pos)? as usize;
        if script_len >= length - pos {
            return Err(CmfError::TruncatedInput);
        }
        let raw_script = bytes.get(pos..pos + script_len).ok_or(CmfError::TruncatedInput)?;
        let script_items = match script::split(raw_script) {
            Ok(items) => items,
            Err(e) => match lint {
                Lint::Strict => return Err(e),
                Lint::Lenient => Vec::new(),
            },
        };
        pos += script_len;

        let sequence = fixed::read_u32(bytes, &mut pos)?;
        inputs.push(TxIn {
            prev_tx_id,
            prev_index,
            sequence,
            script: raw_script.to_vec(),
            script_items,
        });

        if pos >= length {
            return Err(CmfError::TruncatedInput);
        }
    }

    let out_count = fixed::read_compact_size(bytes, &mut pos)?;
    if pos >= length {
        return Err(CmfError::TruncatedInput);
    }
    let mut outputs = Vec::with_capacity(out_count as usize);
    for _ in 0..out_count {
        let value = fixed::read_u64(bytes, &mut pos)?;
        let script_len = fixed::read_compact_size(bytes, &mut pos)? as usize;
        if script_len >= length - pos {
            return Err(CmfError::TruncatedInput);
        }
        let script = bytes.get(pos..pos + script_len).ok_or(CmfError::TruncatedInput)?.to_vec();
        pos += script_len;
        outputs.push(TxOut { value, script });

        if pos >= length {
            return Err(CmfError::TruncatedInput);
        }
    }

    if pos + 4 != length {
        return Err(CmfError::LengthMismatch);
    }
    let lock_time = fixed::read_u32(bytes, &mut pos)?;

    Ok(Transaction { version, inputs, outputs, lock_time, coinbase_message: Vec::new() })
}

/// Serializes a transaction in the legacy consensus encoding (4-byte version header,
/// vin, vout, nLockTime). Provided as the inverse of [`parse`] for round-tripping
/// tests; the v4 encoding is this crate's primary write path.
pub fn write(tx: &Transaction) -> Vec<u8> {
    let mut out = Vec::new();
    fixed::write_u32(&mut out, tx.version);
    fixed::write_compact_size(&mut out, tx.inputs.len() as u64);
    for input in &tx.inputs {
        let mut reversed = input.prev_tx_id;
        reversed.reverse();
        out.extend_from_slice(&reversed);
        fixed::write_u32(&mut out, input.prev_index);
        fixed::write_compact_size(&mut out, input.script.len() as u64);
        out.extend_from_slice(&input.script);
        fixed::write_u32(&mut out, input.sequence);
    }
    fixed::write_compact_size(&mut out, tx.outputs.len() as u64);
    for output in &tx.outputs {
        fixed::write_u64(&mut out, output.value);
        fixed::write_compact_size(&mut out, output.script.len() as u64);
        out.extend_from_slice(&output.script);
    }
    fixed::write_u32(&mut out, tx.lock_time);
    out
}
