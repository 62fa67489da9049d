use cmf_tx::Lint;

// script::split isn't part of the public API surface (it's an implementation detail
// of the transaction readers), so these scenarios exercise it indirectly through a
// legacy transaction whose single input carries the script under test.

fn wrap_as_legacy_tx(script: &[u8]) -> Vec<u8> {
    let mut out = Vec::new();
    out.extend_from_slice(&1u32.to_le_bytes()); // version
    out.push(1); // 1 input
    out.extend_from_slice(&[0u8; 32]); // prev tx id
    out.extend_from_slice(&0u32.to_le_bytes()); // prev index
    write_compact_size(&mut out, script.len() as u64);
    out.extend_from_slice(script);
    out.extend_from_slice(&0xFFFF_FFFFu32.to_le_bytes()); // sequence
    out.push(1); // 1 output
    out.extend_from_slice(&0u64.to_le_bytes()); // value
    out.push(0); // empty script
    out.extend_from_slice(&0u32.to_le_bytes()); // lock_time
    out
}

fn write_compact_size(out: &mut Vec<u8>, n: u64) {
    assert!(n < 253, "test scripts stay short");
    out.push(n as u8);
}

#[test]
fn plain_push_only_script_splits_cleanly() {
    let script = [0x01, 0xAB, 0x4C, 0x02, 0xCD, 0xEF]; // push(1), OP_PUSHDATA1 len=2
    let bytes = wrap_as_legacy_tx(&script);
    let (tx, diagnostics) = cmf_tx::Transaction::read(&bytes, Lint::Strict).unwrap();
    assert!(diagnostics.is_empty());
    assert_eq!(tx.inputs[0].script_items, vec![vec![0xAB], vec![0xCD, 0xEF]]);
}

#[test]
fn non_push_script_fails_strict_but_is_tolerated_leniently() {
    let script = [0x76, 0xa9]; // OP_DUP OP_HASH160: not a pure-push script
    let bytes = wrap_as_legacy_tx(&script);

    assert!(cmf_tx::Transaction::read(&bytes, Lint::Strict).is_err());

    let (tx, _) = cmf_tx::Transaction::read(&bytes, Lint::Lenient).unwrap();
    assert!(tx.inputs[0].script_items.is_empty());
    assert_eq!(tx.inputs[0].script, script);
}
