//! The logical transaction model and the version dispatch between the legacy
//! consensus encoding (v1/v2) and the CMF-based v4 encoding.

pub mod v1;
pub mod v4;

use alloc::vec::Vec;

use crate::diagnostics::Diagnostics;
use crate::error::CmfError;

/// One transaction input.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct TxIn {
    pub prev_tx_id: [u8; 32],
    pub prev_index: u32,
    pub sequence: u32,
    /// The raw, unsplit input script (only populated/used by the v1 encoding).
    pub script: Vec<u8>,
    /// The input script (or witness stack, for v4) split into push items.
    pub script_items: Vec<Vec<u8>>,
}

impl TxIn {
    pub fn with_prev_tx_id(prev_tx_id: [u8; 32]) -> Self {
        Self { prev_tx_id, ..Default::default() }
    }
}

/// One transaction output.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct TxOut {
    pub value: u64,
    pub script: Vec<u8>,
}

/// How strictly [`Transaction::read`] enforces the rules in SPEC_FULL.md §4.7.
///
/// `Strict` turns any accumulated anomaly into a [`CmfError::StrictValidation`].
/// `Lenient` returns a best-effort transaction together with the anomalies found, as
/// [`Diagnostics`].
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum Lint {
    Strict,
    Lenient,
}

/// A parsed or to-be-serialized transaction.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Transaction {
    pub version: u32,
    pub inputs: Vec<TxIn>,
    pub outputs: Vec<TxOut>,
    pub lock_time: u32,
    pub coinbase_message: Vec<u8>,
}

impl Transaction {
    /// Reads a transaction from its on-wire form, dispatching on the 4-byte header:
    /// version 1 or 2 selects the legacy consensus encoding, version 4 selects the
    /// CMF-based encoding. Any other header value (or non-zero padding bytes) is
    /// `UnknownVersion`.
    pub fn read(bytes: &[u8], lint: Lint) -> Result<(Transaction, Diagnostics), CmfError> {
        if bytes.len() <= 4 || bytes[1] != 0 || bytes[2] != 0 || bytes[3] != 0 {
            return Err(CmfError::UnknownVersion(header_word(bytes)));
        }
        match bytes[0] {
            1 | 2 => {
                let tx = v1::parse(bytes, lint)?;
                Ok((tx, Diagnostics::new()))
            }
            4 => v4::parse(&bytes[4..], lint),
            _ => Err(CmfError::UnknownVersion(header_word(bytes))),
        }
    }

    /// Serializes this transaction in the v4 CMF encoding. When `with_witness` is
    /// true the output includes every input's stack items and the `TxEnd`
    /// terminator; when false the output is exactly the signed body, a strict prefix
    /// of the `with_witness` form.
    pub fn write_v4(&self, with_witness: bool) -> Vec<u8> {
        v4::write(self, with_witness)
    }
}

fn header_word(bytes: &[u8]) -> u32 {
    let mut word = 0u32;
    for (i, b) in bytes.iter().take(4).enumerate() {
        word |= (*b as u32) << (8 * i);
    }
    word
}
