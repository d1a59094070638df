//! putty-reg: credential extraction from PuTTY registry exports.
//!
//! The parsing and rendering core lives in the `putty-reg-parser` crate and is
//! re-exported here. This crate adds everything around it: the prefilter that
//! decides whether a file is a PuTTY export, the enrichment envelope, report
//! artifact storage, configuration, logging and the CLI.

pub mod analyzer;
pub mod cli;
pub mod config;
pub mod debug;
pub mod enrichment;
pub mod error;
pub mod prefilter;
pub mod store;

pub use analyzer::PuttyAnalyzer;
pub use config::{Config, ConfigError};
pub use error::EnrichError;
pub use putty_reg_parser::{
    FieldValue, Fields, ParseError, Session, parse, render_full_dump, render_summary,
};
