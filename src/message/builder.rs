//! Appends CMF fields to a byte sink, one field at a time.

use alloc::vec::Vec;

use crate::error::CmfError;
use crate::tag;
use crate::value::{signed_magnitude, ValueType};
use crate::varint;

/// A capability a [`MessageBuilder`] can append bytes to.
///
/// The original C++ builder wraps either an owned `QByteArray` or a caller-provided
/// `QIODevice*`; this crate is `no_std`-first, so the equivalent split is a minimal
/// trait with a blanket impl over `alloc::vec::Vec<u8>` rather than `std::io::Write`
/// (see DESIGN.md, Open Question 4).
pub trait Sink {
    type Error;

    fn write_all(&mut self, buf: &[u8]) -> Result<(), Self::Error>;
}

impl Sink for Vec<u8> {
    type Error = core::convert::Infallible;

    fn write_all(&mut self, buf: &[u8]) -> Result<(), Self::Error> {
        self.extend_from_slice(buf);
        Ok(())
    }
}

/// Builds a CMF message by appending one field at a time to a [`Sink`].
///
/// Each `add_*` call performs exactly one logical append: the framing byte (and
/// extended tag, if any), any varint length prefix, and the payload. The builder
/// keeps no state about fields already written.
pub struct MessageBuilder<S: Sink> {
    sink: S,
    scratch: Vec<u8>,
}

impl<S: Sink> MessageBuilder<S> {
    pub fn new(sink: S) -> Self {
        Self { sink, scratch: Vec::with_capacity(20) }
    }

    /// Consumes the builder, returning the underlying sink.
    pub fn into_inner(self) -> S {
        self.sink
    }

    fn flush_scratch(&mut self) -> Result<(), S::Error> {
        let result = self.sink.write_all(&self.scratch);
        self.scratch.clear();
        result
    }

    /// Appends an unsigned integer field.
    pub fn add_u64(&mut self, tag: u32, value: u64) -> Result<(), CmfError> {
        tag::write(&mut self.scratch, tag, ValueType::PositiveNumber)?;
        varint::encode(value, &mut self.scratch);
        Ok(())
    }

    /// Appends a signed integer field. Zero and positive values are written as
    /// `PositiveNumber`; negative values (including `i64::MIN`) as `NegativeNumber`.
    pub fn add_i64(&mut self, tag: u32, value: i64) -> Result<(), CmfError> {
        if value >= 0 {
            tag::write(&mut self.scratch, tag, ValueType::PositiveNumber)?;
            varint::encode(value as u64, &mut self.scratch);
        } else {
            tag::write(&mut self.scratch, tag, ValueType::NegativeNumber)?;
            varint::encode(signed_magnitude(value), &mut self.scratch);
        }
        Ok(())
    }

    /// Appends a byte-array field.
    pub fn add_bytes(&mut self, tag: u32, data: &[u8]) -> Result<(), CmfError> {
        tag::write(&mut self.scratch, tag, ValueType::ByteArray)?;
        varint::encode(data.len() as u64, &mut self.scratch);
        self.scratch.extend_from_slice(data);
        Ok(())
    }

    /// Appends a UTF-8 string field.
    pub fn add_str(&mut self, tag: u32, value: &str) -> Result<(), CmfError> {
        tag::write(&mut self.scratch, tag, ValueType::String)?;
        varint::encode(value.len() as u64, &mut self.scratch);
        self.scratch.extend_from_slice(value.as_bytes());
        Ok(())
    }

    /// Appends a boolean field.
    pub fn add_bool(&mut self, tag: u32, value: bool) -> Result<(), CmfError> {
        let ty = if value { ValueType::BoolTrue } else { ValueType::BoolFalse };
        tag::write(&mut self.scratch, tag, ty)?;
        Ok(())
    }

    /// Writes the currently-scratched field to the sink. Every `add_*` call above
    /// only stages bytes; call `commit` after each one (or use the `add`-prefixed
    /// convenience wrappers below, which commit automatically).
    pub fn commit(&mut self) -> Result<(), S::Error> {
        self.flush_scratch()
    }
}

/// Convenience wrappers that stage-and-commit a field in a single call. Preferred
/// over the raw `add_*`/`commit` pair unless the caller wants to batch writes.
impl<S: Sink> MessageBuilder<S> {
    pub fn u64(&mut self, tag: u32, value: u64) -> Result<(), BuilderError<S::Error>> {
        self.add_u64(tag, value).map_err(BuilderError::Cmf)?;
        self.commit().map_err(BuilderError::Sink)
    }

    pub fn i64(&mut self, tag: u32, value: i64) -> Result<(), BuilderError<S::Error>> {
        self.add_i64(tag, value).map_err(BuilderError::Cmf)?;
        self.commit().map_err(BuilderError::Sink)
    }

    pub fn bytes(&mut self, tag: u32, value: &[u8]) -> Result<(), BuilderError<S::Error>> {
        self.add_bytes(tag, value).map_err(BuilderError::Cmf)?;
        self.commit().map_err(BuilderError::Sink)
    }

    pub fn str(&mut self, tag: u32, value: &str) -> Result<(), BuilderError<S::Error>> {
        self.add_str(tag, value).map_err(BuilderError::Cmf)?;
        self.commit().map_err(BuilderError::Sink)
    }

    pub fn bool(&mut self, tag: u32, value: bool) -> Result<(), BuilderError<S::Error>> {
        self.add_bool(tag, value).map_err(BuilderError::Cmf)?;
        self.commit().map_err(BuilderError::Sink)
    }
}

/// Either a CMF framing error (bad tag) or an error from the underlying [`Sink`].
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum BuilderError<E> {
    Cmf(CmfError),
    Sink(E),
}

impl MessageBuilder<Vec<u8>> {
    /// Builds a message into a fresh owned buffer.
    pub fn new_owned() -> Self {
        Self::new(Vec::new())
    }
}
