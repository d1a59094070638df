//! Error types for the session parser.

use thiserror::Error;

/// Result type for parser operations.
pub type Result<T> = std::result::Result<T, ParseError>;

/// Failures that abort a parse.
///
/// Malformed lines and unrecognized headers are not errors; they are skipped.
/// Only a value whose declared type cannot be honoured stops the parse.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ParseError {
    /// A `dword:` value whose payload is not a 32-bit hexadecimal number.
    #[error("invalid dword value for '{key}' on line {line}: {value:?}")]
    InvalidDword {
        /// 1-based line number in the input.
        line: usize,
        /// Key the value was assigned to.
        key: String,
        /// Payload text after the `dword:` prefix.
        value: String,
    },
}
