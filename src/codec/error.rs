//! Codec error types and the per-thread last-outcome register

use std::cell::Cell;
use std::fmt;

use thiserror::Error;

use crate::format::Family;

/// Encoder and unpacker errors
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum Error {
    /// Tag byte matches no recognized format
    #[error("unknown tag byte {tag:#04x} at offset {offset}")]
    UnknownTag {
        /// Offending tag byte
        tag: u8,
        /// Offset of the tag in the input
        offset: usize,
    },

    /// A required argument is missing or inconsistent
    #[error("invalid parameters: {reason}")]
    InvalidParameters {
        /// What was wrong with the arguments
        reason: &'static str,
    },

    /// Output region (or decode destination) is too small
    #[error("buffer too small: need {needed} bytes, got {available}")]
    OutputFull {
        /// Bytes the operation needs
        needed: usize,
        /// Bytes available
        available: usize,
    },

    /// Context exists but has no backing storage
    #[error("buffer storage not initialized")]
    UninitializedStorage,

    /// Read would run past the end of the input
    #[error("end of input: need {needed} bytes, {available} remaining")]
    EndOfInput {
        /// Bytes the read needs
        needed: usize,
        /// Bytes left in the input
        available: usize,
    },

    /// String payload is not valid UTF-8
    #[error("string payload is not valid UTF-8 (valid up to byte {valid_up_to})")]
    InvalidUtf8 {
        /// Length of the valid prefix
        valid_up_to: usize,
    },

    /// Decoded family conflicts with the requested filter
    #[error("unexpected type: expected {expected}, found {found}")]
    UnexpectedType {
        /// Family the caller asked for
        expected: Family,
        /// Family found on the wire
        found: Family,
    },
}

impl Error {
    /// Error code for this error
    #[must_use]
    pub const fn code(&self) -> ErrorCode {
        match self {
            Self::UnknownTag { .. } => ErrorCode::UnknownTag,
            Self::InvalidParameters { .. } => ErrorCode::InvalidParameters,
            Self::OutputFull { .. } => ErrorCode::OutputFull,
            Self::UninitializedStorage => ErrorCode::UninitializedStorage,
            Self::EndOfInput { .. } => ErrorCode::EndOfInput,
            Self::UnexpectedType { .. } | Self::InvalidUtf8 { .. } => ErrorCode::UnexpectedType,
        }
    }
}

/// Result type alias
pub type Result<T> = std::result::Result<T, Error>;

/// Outcome of the most recent codec operation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[repr(u8)]
pub enum ErrorCode {
    /// Success
    #[default]
    Ok = 0,
    /// Unknown tag byte
    UnknownTag = 1,
    /// Missing or inconsistent arguments
    InvalidParameters = 2,
    /// Output buffer too small
    OutputFull = 3,
    /// Storage not initialized
    UninitializedStorage = 4,
    /// End of input reached
    EndOfInput = 5,
    /// Unexpected value type
    UnexpectedType = 6,
}

impl ErrorCode {
    /// Convert to byte
    #[must_use]
    pub const fn as_u8(self) -> u8 {
        self as u8
    }

    /// Human-readable description of the code
    #[must_use]
    pub const fn message(self) -> &'static str {
        match self {
            Self::Ok => "no error",
            Self::UnknownTag => "unknown tag",
            Self::InvalidParameters => "invalid parameters",
            Self::OutputFull => "buffer is too short",
            Self::UninitializedStorage => "storage not initialized",
            Self::EndOfInput => "reached the end of the input",
            Self::UnexpectedType => "read an unexpected type",
        }
    }
}

impl fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.message())
    }
}

thread_local! {
    static LAST_ERROR: Cell<ErrorCode> = const { Cell::new(ErrorCode::Ok) };
}

/// Outcome of the last encoder or unpacker call made on this thread.
///
/// Overwritten by every call; read it immediately after the call of interest.
#[must_use]
pub fn last_error() -> ErrorCode {
    LAST_ERROR.with(Cell::get)
}

/// Message for [`last_error`].
#[must_use]
pub fn last_error_message() -> &'static str {
    last_error().message()
}

/// Store the outcome of `result` in the last-outcome register and pass it on.
pub(crate) fn record<T>(result: Result<T>) -> Result<T> {
    let code = match &result {
        Ok(_) => ErrorCode::Ok,
        Err(err) => err.code(),
    };
    LAST_ERROR.with(|cell| cell.set(code));
    result
}
