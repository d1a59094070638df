//! Session extraction for PuTTY registry exports.
//!
//! PuTTY stores saved sessions under
//! `HKEY_CURRENT_USER\Software\SimonTatham\PuTTY\Sessions`. A `.reg` export of
//! that key is plain text; this crate turns it into typed session records and
//! renders them as a Markdown summary and a plaintext report.
//!
//! - [`parse`] reads export text into an ordered list of [`Session`]s
//! - [`render_summary`] lists the sessions that name a host
//! - [`render_full_dump`] lists every field of every session

pub mod error;
pub mod parser;
pub mod report;
pub mod types;

pub use error::{ParseError, Result};
pub use parser::{ParserState, parse};
pub use report::{render_full_dump, render_summary};
pub use types::{FieldValue, Fields, Session};
