//! Cheap checks that decide whether a file is worth parsing.
//!
//! A candidate must carry the configured extension, decode as text, and
//! contain the PuTTY registry key marker somewhere in its content.

use crate::config::Config;
use regex::Regex;
use std::borrow::Cow;

const UTF8_BOM: &[u8] = &[0xEF, 0xBB, 0xBF];
const UTF16LE_BOM: &[u8] = &[0xFF, 0xFE];

/// Decode file content as text.
///
/// `regedit` writes UTF-16LE with a byte-order mark; older exports (REGEDIT4)
/// and hand-edited files are UTF-8. Returns `None` for anything else.
pub fn decode_text(bytes: &[u8]) -> Option<Cow<'_, str>> {
    if let Some(rest) = bytes.strip_prefix(UTF16LE_BOM) {
        if rest.len() % 2 != 0 {
            return None;
        }
        let units = rest
            .chunks_exact(2)
            .map(|pair| u16::from_le_bytes([pair[0], pair[1]]));
        return char::decode_utf16(units)
            .collect::<Result<String, _>>()
            .ok()
            .map(Cow::Owned);
    }

    let bytes = bytes.strip_prefix(UTF8_BOM).unwrap_or(bytes);
    std::str::from_utf8(bytes).ok().map(Cow::Borrowed)
}

/// Text with no NUL characters.
pub fn is_plaintext(text: &str) -> bool {
    !text.contains('\0')
}

/// Compiled content/name checks built from [`Config`].
#[derive(Debug, Clone)]
pub struct Prefilter {
    marker: Regex,
    extension: String,
    require_plaintext: bool,
}

impl Prefilter {
    pub fn new(config: &Config) -> Result<Self, regex::Error> {
        let marker = Regex::new(&format!("(?i){}", regex::escape(&config.header_marker)))?;
        Ok(Self {
            marker,
            extension: config.file_extension.to_lowercase(),
            require_plaintext: config.require_plaintext,
        })
    }

    pub fn has_extension(&self, file_name: &str) -> bool {
        file_name.to_lowercase().ends_with(&self.extension)
    }

    pub fn has_marker(&self, text: &str) -> bool {
        self.marker.is_match(text)
    }

    /// Decide whether the analyzer should run on this file.
    pub fn should_process(&self, file_name: &str, bytes: &[u8]) -> bool {
        if !self.has_extension(file_name) {
            log::debug!("{}: skipped, extension is not {}", file_name, self.extension);
            return false;
        }

        let Some(text) = decode_text(bytes) else {
            log::debug!("{}: skipped, content is not text", file_name);
            return false;
        };

        if self.require_plaintext && !is_plaintext(&text) {
            log::debug!("{}: skipped, content is not plaintext", file_name);
            return false;
        }

        let should_run = self.has_marker(&text);
        log::debug!("{}: should_process = {}", file_name, should_run);
        should_run
    }
}
