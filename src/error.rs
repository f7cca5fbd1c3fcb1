//! Error types returned by the codec and the generator.

#[cfg(not(feature = "std"))]
use core as std;

use std::num::NonZeroU32;

/// Error parsing or constructing a UUIDv7 from an invalid representation.
#[derive(Clone, Eq, PartialEq, Hash, Debug, thiserror::Error)]
#[error("{}", .kind.message())]
pub struct ParseError {
    kind: ParseErrorKind,
}

/// Reason why a representation was rejected.
#[derive(Copy, Clone, Eq, PartialEq, Hash, Debug)]
#[non_exhaustive]
pub enum ParseErrorKind {
    /// Wrong length, misplaced hyphen, or a non-hexadecimal digit.
    InvalidFormat,

    /// The version nibble is not `7`.
    InvalidVersion,

    /// The variant bits are not `0b10`.
    InvalidVariant,

    /// A raw byte pointer was null.
    NullPointer,
}

impl ParseErrorKind {
    const fn message(&self) -> &'static str {
        match self {
            Self::InvalidFormat => "invalid UUIDv7 format",
            Self::InvalidVersion => "invalid UUIDv7 version",
            Self::InvalidVariant => "invalid UUIDv7 variant",
            Self::NullPointer => "input pointer is null",
        }
    }
}

impl ParseError {
    pub(crate) const fn new(kind: ParseErrorKind) -> Self {
        Self { kind }
    }

    /// Returns the reason of the failure.
    pub const fn kind(&self) -> ParseErrorKind {
        self.kind
    }
}

/// Error reported by a [`RandSource`](crate::RandSource) that could not produce secure random
/// bytes.
#[derive(Copy, Clone, Eq, PartialEq, Hash, Debug, thiserror::Error)]
#[error("secure random bytes unavailable: {message}")]
pub struct RandError {
    message: &'static str,
    code: Option<NonZeroU32>,
}

impl RandError {
    /// Creates an error with a static description and an optional backend error code.
    pub const fn new(message: &'static str, code: Option<NonZeroU32>) -> Self {
        Self { message, code }
    }

    /// Returns the backend-specific error code (e.g. OS `errno`), if any.
    pub const fn code(&self) -> Option<NonZeroU32> {
        self.code
    }
}

/// Error returned by the generator functions.
#[derive(Copy, Clone, Eq, PartialEq, Hash, Debug, thiserror::Error)]
#[non_exhaustive]
pub enum GenerateError {
    /// The random source failed. The generator state is left unchanged.
    #[error(transparent)]
    RandomnessUnavailable(#[from] RandError),

    /// The 74-bit counter reached its maximum within the current millisecond. The generator state
    /// stays saturated so that a call in a later millisecond succeeds.
    #[error("too many UUIDs generated in the same millisecond; sequence counter overflowed")]
    SequenceOverflow,
}

/// Union of every error this crate returns, for callers that mix parsing and generation.
#[derive(Clone, Eq, PartialEq, Hash, Debug, thiserror::Error)]
#[non_exhaustive]
pub enum Error {
    /// See [`ParseError`].
    #[error(transparent)]
    InvalidFormat(#[from] ParseError),

    /// See [`GenerateError::RandomnessUnavailable`].
    #[error(transparent)]
    RandomnessUnavailable(RandError),

    /// See [`GenerateError::SequenceOverflow`].
    #[error("too many UUIDs generated in the same millisecond; sequence counter overflowed")]
    SequenceOverflow,
}

impl From<GenerateError> for Error {
    fn from(src: GenerateError) -> Self {
        match src {
            GenerateError::RandomnessUnavailable(err) => Self::RandomnessUnavailable(err),
            GenerateError::SequenceOverflow => Self::SequenceOverflow,
        }
    }
}
