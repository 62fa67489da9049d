//! Splits a raw Bitcoin script into its ordered push-data items.
//!
//! Only understands the pure-push opcode subset: direct pushes of 1-75 bytes, the
//! zero-length push (`OP_0`), and `OP_PUSHDATA1`/`OP_PUSHDATA2`/`OP_PUSHDATA4`. Any
//! other opcode means the script isn't a plain list of pushes and is rejected.

use alloc::vec::Vec;

use crate::error::CmfError;

const OP_PUSHDATA1: u8 = 76;
const OP_PUSHDATA2: u8 = 77;
const OP_PUSHDATA4: u8 = 78;

/// Splits `script` into its push-data items.
///
/// `original_source/Transaction.cpp`'s `TxIn::setScript` tests direct pushes with
/// `k > 0 && k < 75` (opcodes 1-74); this crate follows the specification's explicit
/// "opcode 1..75 (inclusive)" text instead, treating the original's narrower range as
/// an off-by-one bug rather than an intended restriction (see DESIGN.md).
pub fn split(script: &[u8]) -> Result<Vec<Vec<u8>>, CmfError> {
    let mut items = Vec::new();
    let mut pos = 0usize;

    while pos < script.len() {
        let opcode = script[pos];
        pos += 1;

        if opcode == 0 {
            items.push(Vec::new());
            continue;
        }
        if (1..=75).contains(&opcode) {
            let len = opcode as usize;
            let end = pos.checked_add(len).ok_or(CmfError::InvalidScriptForSplit)?;
            let chunk = script.get(pos..end).ok_or(CmfError::InvalidScriptForSplit)?;
            items.push(chunk.to_vec());
            pos = end;
            continue;
        }

        // OP_PUSHDATA1/2/4 lengths are read big-endian (most-significant length byte
        // first), matching `original_source/Transaction.cpp`'s `TxIn::setScript` --
        // unlike real Bitcoin consensus encoding, which is little-endian here.
        let width = match opcode {
            OP_PUSHDATA1 => 1usize,
            OP_PUSHDATA2 => 2usize,
            OP_PUSHDATA4 => 4usize,
            _ => return Err(CmfError::InvalidScriptForSplit),
        };
        let len_bytes = script.get(pos..pos + width).ok_or(CmfError::InvalidScriptForSplit)?;
        let mut len: usize = 0;
        for b in len_bytes {
            len = (len << 8) | (*b as usize);
        }
        pos += width;
        let end = pos.checked_add(len).ok_or(CmfError::InvalidScriptForSplit)?;
        let chunk = script.get(pos..end).ok_or(CmfError::InvalidScriptForSplit)?;
        items.push(chunk.to_vec());
        pos = end;
    }

    Ok(items)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn splits_direct_pushes() {
        let script = [0x01, 0xAB, 0x02, 0xCD, 0xEF];
        let items = split(&script).unwrap();
        assert_eq!(items, alloc::vec![alloc::vec![0xAB], alloc::vec![0xCD, 0xEF]]);
    }

    #[test]
    fn opcode_75_is_accepted() {
        let mut script = alloc::vec![75u8];
        script.extend(core::iter::repeat(0x11).take(75));
        let items = split(&script).unwrap();
        assert_eq!(items.len(), 1);
        assert_eq!(items[0].len(), 75);
    }

    #[test]
    fn zero_opcode_is_empty_push() {
        let script = [0x00];
        let items = split(&script).unwrap();
        assert_eq!(items, alloc::vec![Vec::new()]);
    }

    #[test]
    fn pushdata1_reads_length_byte() {
        let script = alloc::vec![OP_PUSHDATA1, 3, 0xAA, 0xBB, 0xCC];
        let items = split(&script).unwrap();
        assert_eq!(items, alloc::vec![alloc::vec![0xAA, 0xBB, 0xCC]]);
    }

    #[test]
    fn pushdata2_length_is_big_endian() {
        let mut script = alloc::vec![OP_PUSHDATA2, 0x00, 0x02];
        script.extend(core::iter::repeat(0x5A).take(2));
        let items = split(&script).unwrap();
        assert_eq!(items.len(), 1);
        assert_eq!(items[0].len(), 2);
    }

    #[test]
    fn non_push_opcode_is_rejected() {
        let script = [0x76]; // OP_DUP
        assert_eq!(split(&script).unwrap_err(), CmfError::InvalidScriptForSplit);
    }

    #[test]
    fn truncated_push_is_rejected() {
        let script = [0x05, 0x01, 0x02];
        assert_eq!(split(&script).unwrap_err(), CmfError::InvalidScriptForSplit);
    }
}
