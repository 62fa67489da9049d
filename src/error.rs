//! Error taxonomy shared by the varint codec, the CMF message layer and the
//! transaction readers/writers.

/// A single rule violated under [`crate::transaction::Lint::Strict`] validation.
///
/// Kept as a closed enum (rather than a formatted string) so callers can match on the
/// specific rule instead of parsing human-readable text.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum StrictViolation {
    /// A body-only tag (TxInPrevHash, TxInPrevIndex, TxOutValue, TxOutScript, ...)
    /// arrived after the witness section had already started.
    BodyTagAfterWitness,
    /// `TxInputStackItemContinued` arrived without a preceding `TxInputStackItem`.
    ContinuedStackItemWithoutStart,
    /// More `TxInputStackItem` tags were seen than inputs were declared.
    TooManyStackItemGroups,
    /// `CoinbaseMessage` was present while the transaction also had inputs.
    CoinbaseWithInputs,
    /// A tag number of 20 or higher was encountered (outside the reserved range).
    UnknownTag(u32),
    /// The transaction had no outputs.
    NoOutputs,
    /// The transaction had neither inputs nor a coinbase message.
    NoInputsOrCoinbase,
}

impl core::fmt::Display for StrictViolation {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            Self::BodyTagAfterWitness => write!(f, "body-only tag found after witness section began"),
            Self::ContinuedStackItemWithoutStart => {
                write!(f, "TxInputStackItemContinued without a preceding TxInputStackItem")
            }
            Self::TooManyStackItemGroups => write!(f, "more stack-item groups than declared inputs"),
            Self::CoinbaseWithInputs => write!(f, "coinbase message present alongside real inputs"),
            Self::UnknownTag(t) => write!(f, "unknown tag {} outside the reserved range", t),
            Self::NoOutputs => write!(f, "transaction has no outputs"),
            Self::NoInputsOrCoinbase => write!(f, "transaction has neither inputs nor a coinbase message"),
        }
    }
}

/// Errors produced anywhere in this crate: the varint codec, the CMF tag/type framer,
/// the message builder/parser, and the transaction readers/writers.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum CmfError {
    /// The input ended before a varint, field header, or fixed-width value was fully
    /// read.
    TruncatedInput,

    /// A varint consumed more than 9 bytes without terminating.
    VarintOverflow,

    /// A tag/type framing byte, or an extended tag, didn't decode to a legal field
    /// header (reserved `ValueType` 6/7, or an extended tag above 0xFFFF).
    MalformedTag,

    /// Trailing bytes were left over (or missing) after a structure that must consume
    /// exactly its declared length, such as a legacy transaction's final `nLockTime`.
    /// A payload or script simply overrunning the remaining input is `TruncatedInput`,
    /// not this.
    LengthMismatch,

    /// The 4-byte transaction header didn't name a supported version (1, 2, or 4), or
    /// its upper 3 bytes weren't zero.
    UnknownVersion(u32),

    /// A script byte sequence contained an opcode outside the pure-push subset the
    /// splitter understands.
    InvalidScriptForSplit,

    /// A rule from [`StrictViolation`] was broken while parsing under
    /// [`crate::transaction::Lint::Strict`].
    StrictValidation(StrictViolation),
}

impl core::fmt::Display for CmfError {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            Self::TruncatedInput => write!(f, "input ended before the current structure was complete"),
            Self::VarintOverflow => write!(f, "varint did not terminate within 9 bytes"),
            Self::MalformedTag => write!(f, "malformed tag/type framing"),
            Self::LengthMismatch => write!(f, "declared length did not match available/consumed bytes"),
            Self::UnknownVersion(v) => write!(f, "unsupported transaction version header: {:#010x}", v),
            Self::InvalidScriptForSplit => write!(f, "script contains a non-push opcode"),
            Self::StrictValidation(v) => write!(f, "strict validation failed: {}", v),
        }
    }
}

#[cfg(feature = "std")]
impl std::error::Error for CmfError {}
