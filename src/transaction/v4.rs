//! The CMF-based v4 transaction encoding: a tagged message whose fields split into
//! a signed "body" (prev-outputs and outputs) and an unsigned "witness" section
//! (input stack items), terminated by `TxEnd`.

use alloc::vec::Vec;

use crate::diagnostics::Diagnostics;
use crate::error::{CmfError, StrictViolation};
use crate::message::builder::MessageBuilder;
use crate::message::parser::{MessageParser, ParseEvent};

use super::{Lint, Transaction, TxIn, TxOut};

const TX_END: u32 = 0;
const TX_IN_PREV_HASH: u32 = 1;
const TX_IN_PREV_INDEX: u32 = 2;
const TX_IN_PREV_HEIGHT: u32 = 3;
const TX_INPUT_STACK_ITEM: u32 = 4;
const TX_OUT_VALUE: u32 = 5;
const TX_OUT_SCRIPT: u32 = 6;
const LOCK_BY_BLOCK: u32 = 7;
const LOCK_BY_TIME: u32 = 8;
const COINBASE_MESSAGE: u32 = 9;
const SCRIPT_VERSION: u32 = 10;
const TX_INPUT_STACK_ITEM_CONTINUED: u32 = 11;
const RESERVED_RANGE_END: u32 = 19;

/// Parses the CMF body of a v4 transaction (the 4-byte version header has already
/// been stripped by [`super::Transaction::read`]).
pub fn parse(bytes: &[u8], lint: Lint) -> Result<(Transaction, Diagnostics), CmfError> {
    let mut parser = MessageParser::new(bytes);
    let mut inputs: Vec<TxIn> = Vec::new();
    let mut outputs: Vec<TxOut> = Vec::new();
    let mut coinbase_message = Vec::new();

    // -1 encoded as `None`: no TxInputStackItem group started yet.
    let mut input_script_count: Option<usize> = None;
    let mut stored_out_value = false;
    let mut stored_out_script = false;
    let mut out_value: u64 = 0;
    let mut in_body = true;
    let mut diagnostics = Diagnostics::new();

    loop {
        match parser.next()? {
            ParseEvent::EndOfDocument => break,
            ParseEvent::FoundTag => {}
        }
        let at = parser.consumed();
        let tag = parser.tag();

        match tag {
            TX_END => break,

            TX_IN_PREV_HASH => {
                note_body_tag(&mut diagnostics, in_body, lint, at)?;
                let id_bytes = parser.data()?.as_bytes().ok_or(CmfError::LengthMismatch)?.to_vec();
                if id_bytes.len() != 32 {
                    return Err(CmfError::LengthMismatch);
                }
                let mut prev_tx_id = [0u8; 32];
                prev_tx_id.copy_from_slice(&id_bytes);
                inputs.push(TxIn::with_prev_tx_id(prev_tx_id));
            }

            TX_IN_PREV_INDEX => {
                note_body_tag(&mut diagnostics, in_body, lint, at)?;
                let value = parser.data()?.as_u64().ok_or(CmfError::LengthMismatch)?;
                let last = inputs.last_mut().ok_or(CmfError::LengthMismatch)?;
                last.prev_index = value as u32;
            }

            TX_IN_PREV_HEIGHT => {
                // Accepted, never stored: the logical `TxIn` model has no prevHeight
                // field (see DESIGN.md, Open Question 3).
                let _ = parser.data()?;
            }

            TX_INPUT_STACK_ITEM | TX_INPUT_STACK_ITEM_CONTINUED => {
                in_body = false;
                if tag == TX_INPUT_STACK_ITEM {
                    input_script_count = Some(input_script_count.map_or(0, |c| c + 1));
                } else if input_script_count.is_none() {
                    report(&mut diagnostics, lint, StrictViolation::ContinuedStackItemWithoutStart, at)?;
                    input_script_count = Some(0);
                }
                let idx = input_script_count.expect("set above");
                if idx >= inputs.len() {
                    report(&mut diagnostics, lint, StrictViolation::TooManyStackItemGroups, at)?;
                } else {
                    let item = parser.data()?.as_bytes().ok_or(CmfError::LengthMismatch)?.to_vec();
                    inputs[idx].script_items.push(item);
                }
            }

            TX_OUT_VALUE => {
                note_body_tag(&mut diagnostics, in_body, lint, at)?;
                let value = parser.data()?.as_u64().ok_or(CmfError::LengthMismatch)?;
                if stored_out_script {
                    let last = outputs.last_mut().ok_or(CmfError::LengthMismatch)?;
                    last.value = value;
                    stored_out_script = false;
                    stored_out_value = false;
                } else {
                    out_value = value;
                    stored_out_value = true;
                }
            }

            TX_OUT_SCRIPT => {
                note_body_tag(&mut diagnostics, in_body, lint, at)?;
                let script = parser.data()?.as_bytes().ok_or(CmfError::LengthMismatch)?.to_vec();
                outputs.push(TxOut { script, value: out_value });
                if stored_out_value {
                    stored_out_value = false;
                } else {
                    stored_out_script = true;
                }
            }

            // Per-tx relative locks: accepted, not modelled on `Transaction` (the
            // spec's logical model carries only the absolute `nLockTime`).
            LOCK_BY_BLOCK | LOCK_BY_TIME => {
                let _ = parser.data()?;
            }

            COINBASE_MESSAGE => {
                note_body_tag(&mut diagnostics, in_body, lint, at)?;
                if !inputs.is_empty() {
                    report(&mut diagnostics, lint, StrictViolation::CoinbaseWithInputs, at)?;
                }
                coinbase_message = parser.data()?.as_bytes().ok_or(CmfError::LengthMismatch)?.to_vec();
            }

            // Accepted, not modelled: no field on `Transaction` carries it.
            SCRIPT_VERSION => {
                let _ = parser.data()?;
            }

            t if t <= RESERVED_RANGE_END => {
                // Reserved tags are always skippable-with-warning, regardless of Lint.
                diagnostics.push(StrictViolation::UnknownTag(t), at);
                let _ = parser.data();
            }

            t => {
                report(&mut diagnostics, lint, StrictViolation::UnknownTag(t), at)?;
                let _ = parser.data();
            }
        }
    }

    if outputs.is_empty() {
        report(&mut diagnostics, lint, StrictViolation::NoOutputs, parser.consumed())?;
    }
    if inputs.is_empty() && coinbase_message.is_empty() {
        report(&mut diagnostics, lint, StrictViolation::NoInputsOrCoinbase, parser.consumed())?;
    }

    let tx = Transaction { version: 4, inputs, outputs, lock_time: 0, coinbase_message };
    Ok((tx, diagnostics))
}

/// Records (and, under `Strict`, immediately fails on) a body-only tag arriving
/// after the witness section has begun.
fn note_body_tag(
    diagnostics: &mut Diagnostics,
    in_body: bool,
    lint: Lint,
    at: usize,
) -> Result<(), CmfError> {
    if !in_body {
        report(diagnostics, lint, StrictViolation::BodyTagAfterWitness, at)?;
    }
    Ok(())
}

/// Pushes `violation` to `diagnostics`; under `Strict` lint, immediately fails with
/// it instead of continuing.
fn report(
    diagnostics: &mut Diagnostics,
    lint: Lint,
    violation: StrictViolation,
    at: usize,
) -> Result<(), CmfError> {
    diagnostics.push(violation, at);
    if lint == Lint::Strict {
        return Err(CmfError::StrictValidation(violation));
    }
    Ok(())
}

/// Serializes `tx` as a v4 transaction, including its 4-byte version header.
///
/// With `with_witness = false`, the output is exactly the signed body (every
/// input's `TxInPrevHash`/`TxInPrevIndex`, then every output's
/// `TxOutScript`/`TxOutValue`). With `with_witness = true`, the witness stack items
/// and the `TxEnd` terminator are appended after the body -- `with_witness = false`
/// output is always a byte-for-byte prefix of the `with_witness = true` output.
pub fn write(tx: &Transaction, with_witness: bool) -> Vec<u8> {
    let mut out = alloc::vec![4u8, 0, 0, 0];
    let mut builder = MessageBuilder::new(Vec::new());

    for input in &tx.inputs {
        builder.bytes(TX_IN_PREV_HASH, &input.prev_tx_id).expect("Vec sink is infallible");
        if input.prev_index > 0 {
            builder.u64(TX_IN_PREV_INDEX, input.prev_index as u64).expect("Vec sink is infallible");
        }
    }
    for output in &tx.outputs {
        builder.bytes(TX_OUT_SCRIPT, &output.script).expect("Vec sink is infallible");
        builder.u64(TX_OUT_VALUE, output.value).expect("Vec sink is infallible");
    }

    if with_witness {
        for input in &tx.inputs {
            for (i, item) in input.script_items.iter().enumerate() {
                let tag = if i == 0 { TX_INPUT_STACK_ITEM } else { TX_INPUT_STACK_ITEM_CONTINUED };
                builder.bytes(tag, item).expect("Vec sink is infallible");
            }
        }
        builder.bool(TX_END, true).expect("Vec sink is infallible");
    }

    out.extend_from_slice(&builder.into_inner());
    out
}
