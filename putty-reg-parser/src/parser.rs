//! Parser for PuTTY registry exports.
//!
//! Walks the export line by line and rebuilds one [`Session`] per
//! `[...\Sessions\<name>]` section. The parser is best-effort: comments,
//! blank lines, unrecognized headers and lines that are not `key=value` are
//! skipped without complaint.

use super::error::{ParseError, Result};
use super::types::{FieldValue, Session};
use regex::Regex;
use std::sync::LazyLock;

/// Captures the session name between `Sessions\` and the first `]`.
static SESSION_HEADER: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"Sessions\\(.+?)\]").expect("session header regex is a compile-time constant")
});

const COMMENT_MARKER: char = ';';
const DWORD_PREFIX: &str = "dword:";

/// Parse a registry export and return its sessions in section order.
///
/// Sections with no values are dropped. Duplicate session names produce
/// separate records.
///
/// # Errors
///
/// Returns [`ParseError::InvalidDword`] if a `dword:` payload is not valid
/// 32-bit hexadecimal. The whole parse is abandoned in that case.
pub fn parse(text: &str) -> Result<Vec<Session>> {
    text.lines()
        .enumerate()
        .try_fold(ParserState::new(), |state, (idx, line)| {
            state.feed_line(idx + 1, line)
        })
        .map(ParserState::finish)
}

/// Accumulator threaded through the lines of one export.
///
/// Holds the sessions finalized so far and the section currently being
/// filled, if any.
#[derive(Debug, Default)]
pub struct ParserState {
    sessions: Vec<Session>,
    current: Option<Session>,
}

impl ParserState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Sessions finalized so far, excluding the open one.
    pub fn finalized(&self) -> &[Session] {
        &self.sessions
    }

    /// The section currently accumulating values.
    pub fn current(&self) -> Option<&Session> {
        self.current.as_ref()
    }

    /// Consume one raw input line. `line_no` is 1-based and only used for
    /// error reporting.
    pub fn feed_line(mut self, line_no: usize, line: &str) -> Result<Self> {
        let line = line.trim();

        if line.is_empty() || line.starts_with(COMMENT_MARKER) {
            return Ok(self);
        }

        if line.starts_with('[') {
            match session_header(line) {
                Some(name) => {
                    self.flush();
                    self.current = Some(Session::new(name));
                }
                None => log::trace!("ignoring non-session header on line {}: {}", line_no, line),
            }
            return Ok(self);
        }

        let Some((key, raw_value)) = line.split_once('=') else {
            log::trace!("ignoring unrecognized line {}", line_no);
            return Ok(self);
        };

        let key = key.trim_matches('"');
        let value = parse_value(line_no, key, raw_value)?;

        match self.current.as_mut() {
            Some(session) => session.fields.insert(key, value),
            None => log::trace!("dropping value '{}' outside any session on line {}", key, line_no),
        }

        Ok(self)
    }

    /// Close the open section and return every finalized session.
    pub fn finish(mut self) -> Vec<Session> {
        self.flush();
        self.sessions
    }

    fn flush(&mut self) {
        if let Some(session) = self.current.take() {
            if session.fields.is_empty() {
                log::debug!("discarding empty session '{}'", session.session_name);
            } else {
                log::debug!(
                    "finalized session '{}' with {} fields",
                    session.session_name,
                    session.fields.len()
                );
                self.sessions.push(session);
            }
        }
    }
}

fn session_header(line: &str) -> Option<&str> {
    SESSION_HEADER
        .captures(line)
        .and_then(|caps| caps.get(1))
        .map(|m| m.as_str())
}

fn parse_value(line_no: usize, key: &str, raw: &str) -> Result<FieldValue> {
    match raw.strip_prefix(DWORD_PREFIX) {
        Some(hex) => u32::from_str_radix(hex, 16)
            .map(FieldValue::Dword)
            .map_err(|_| ParseError::InvalidDword {
                line: line_no,
                key: key.to_string(),
                value: hex.to_string(),
            }),
        None => Ok(FieldValue::Str(raw.trim_matches('"').to_string())),
    }
}
