//! Iterates the tagged fields of a CMF message, lazily materializing
//! string/byte-array payloads.

use alloc::string::String;

use crate::error::CmfError;
use crate::tag;
use crate::value::{negate_magnitude, BorrowedBytes, Value, ValueType};
use crate::varint;

/// What [`MessageParser::next`] found.
#[derive(Debug, PartialEq, Eq)]
pub enum ParseEvent {
    FoundTag,
    EndOfDocument,
}

enum PendingPayload {
    None,
    Bytes { start: usize, len: usize },
    Str { start: usize, len: usize },
}

/// A forward-only, restartable cursor over a CMF message.
///
/// String/ByteArray payloads are not copied or UTF-8 validated until [`Self::data`]
/// is called: until then the parser only records their `(start, len)` span inside
/// `data`, which the parser borrows for its entire lifetime.
pub struct MessageParser<'a> {
    data: &'a [u8],
    position: usize,
    tag: u32,
    pending: PendingPayload,
    value: Option<ValueSlot<'a>>,
}

enum ValueSlot<'a> {
    UInt(u64),
    Int(i64),
    Bool(bool),
    Bytes(&'a [u8]),
}

impl<'a> MessageParser<'a> {
    pub fn new(data: &'a [u8]) -> Self {
        Self { data, position: 0, tag: 0, pending: PendingPayload::None, value: None }
    }

    /// Current byte offset into the input.
    pub fn consumed(&self) -> usize {
        self.position
    }

    /// Advances the cursor by `bytes` without decoding a field. For caller-directed
    /// skipping of a field whose value isn't needed.
    pub fn consume(&mut self, bytes: usize) {
        self.position += bytes;
    }

    /// The tag of the field last returned by [`Self::next`]. Valid only after a call
    /// to `next` returned [`ParseEvent::FoundTag`].
    pub fn tag(&self) -> u32 {
        self.tag
    }

    /// Advances to the next field.
    ///
    /// Returns `EndOfDocument` only when the cursor was already at the end of the
    /// input on entry. Any failure partway through a field (truncated framing byte,
    /// truncated varint, a declared length that overruns the buffer, or a reserved
    /// value type) is an `Error` with the cursor left exactly where it was at the
    /// start of this call -- the original C++ parser sometimes returned
    /// `EndOfDocument` here and didn't always restore its position; this crate always
    /// treats it as an error and always restores position (see DESIGN.md, Open
    /// Question 1).
    pub fn next(&mut self) -> Result<ParseEvent, CmfError> {
        let start = self.position;
        if start >= self.data.len() {
            return Ok(ParseEvent::EndOfDocument);
        }

        let framing = match tag::read(self.data, start) {
            Ok(f) => f,
            Err(e) => {
                self.position = start;
                return Err(e);
            }
        };
        self.tag = framing.tag;
        let mut cursor = start + framing.consumed;

        match framing.ty {
            ValueType::PositiveNumber | ValueType::NegativeNumber => {
                match varint::decode(self.data, &mut cursor) {
                    Ok(magnitude) => {
                        self.value = Some(if framing.ty == ValueType::PositiveNumber {
                            ValueSlot::UInt(magnitude)
                        } else {
                            ValueSlot::Int(negate_magnitude(magnitude))
                        });
                        self.pending = PendingPayload::None;
                        self.position = cursor;
                    }
                    Err(e) => {
                        self.position = start;
                        return Err(e);
                    }
                }
            }
            ValueType::ByteArray | ValueType::String => {
                let len = match varint::decode(self.data, &mut cursor) {
                    Ok(len) => len,
                    Err(e) => {
                        self.position = start;
                        return Err(e);
                    }
                };
                let len = len as usize;
                let payload_end = match cursor.checked_add(len) {
                    Some(end) if end <= self.data.len() => end,
                    _ => {
                        self.position = start;
                        return Err(CmfError::TruncatedInput);
                    }
                };
                self.pending = if framing.ty == ValueType::ByteArray {
                    PendingPayload::Bytes { start: cursor, len }
                } else {
                    PendingPayload::Str { start: cursor, len }
                };
                self.value = None;
                self.position = payload_end;
            }
            ValueType::BoolTrue | ValueType::BoolFalse => {
                self.value = Some(ValueSlot::Bool(framing.ty == ValueType::BoolTrue));
                self.pending = PendingPayload::None;
                self.position = cursor;
            }
        }

        Ok(ParseEvent::FoundTag)
    }

    /// Materializes the value of the field last returned by `next`. For
    /// String/ByteArray fields this is the first point at which the payload is
    /// copied out of (and, for strings, UTF-8 validated against) the input buffer.
    pub fn data(&mut self) -> Result<Value<'a>, CmfError> {
        match core::mem::replace(&mut self.pending, PendingPayload::None) {
            PendingPayload::None => Ok(match self.value.take() {
                Some(ValueSlot::UInt(v)) => Value::UInt(v),
                Some(ValueSlot::Int(v)) => Value::Int(v),
                Some(ValueSlot::Bool(v)) => Value::Bool(v),
                Some(ValueSlot::Bytes(b)) => Value::Bytes(BorrowedBytes::Borrowed(b)),
                None => return Err(CmfError::LengthMismatch),
            }),
            PendingPayload::Bytes { start, len } => {
                let slice = &self.data[start..start + len];
                Ok(Value::Bytes(BorrowedBytes::Borrowed(slice)))
            }
            PendingPayload::Str { start, len } => {
                let slice = &self.data[start..start + len];
                let s = core::str::from_utf8(slice).map_err(|_| CmfError::LengthMismatch)?;
                Ok(Value::Str(String::from(s)))
            }
        }
    }
}
