//! Typed error types for the putty-reg analyzer.
//!
//! Callers at the crate boundary can match on these instead of opaque
//! `anyhow` strings. [`crate::analyzer::PuttyAnalyzer::run`] logs them and
//! turns them into "no result".

use putty_reg_parser::ParseError;
use thiserror::Error;

/// Errors raised while analysing one file.
#[derive(Debug, Error)]
pub enum EnrichError {
    /// The content is neither UTF-8 nor BOM-marked UTF-16LE.
    #[error("content of '{0}' is not decodable text")]
    Decode(String),

    /// The export contained a value the parser could not type.
    #[error("parse error: {0}")]
    Parse(#[from] ParseError),

    /// Sessions could not be converted to JSON.
    #[error("serialization error: {0}")]
    Serialize(#[from] serde_json::Error),

    /// The configured header marker did not compile.
    #[error("invalid header marker: {0}")]
    Marker(#[from] regex::Error),

    /// The report artifact could not be stored.
    #[error("failed to store report artifact: {0}")]
    Store(#[source] std::io::Error),
}

/// Result type for analyzer operations.
pub type Result<T> = std::result::Result<T, EnrichError>;
