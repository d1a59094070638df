//! Session record types produced by the parser.

use serde::ser::SerializeMap;
use serde::{Deserialize, Serialize, Serializer};

/// Field names PuTTY writes for the connection details the summary cares about.
pub const HOST_NAME: &str = "HostName";
pub const PORT_NUMBER: &str = "PortNumber";
pub const USER_NAME: &str = "UserName";
pub const PUBLIC_KEY_FILE: &str = "PublicKeyFile";

/// A typed registry value.
///
/// The variant is chosen purely from the textual encoding in the export:
/// `dword:` values become [`FieldValue::Dword`], everything else is a string.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum FieldValue {
    Str(String),
    Dword(u32),
}

impl FieldValue {
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Self::Str(s) => Some(s),
            Self::Dword(_) => None,
        }
    }

    pub fn as_dword(&self) -> Option<u32> {
        match self {
            Self::Dword(n) => Some(*n),
            Self::Str(_) => None,
        }
    }
}

impl std::fmt::Display for FieldValue {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Str(s) => write!(f, "{}", s),
            Self::Dword(n) => write!(f, "{}", n),
        }
    }
}

impl From<&str> for FieldValue {
    fn from(s: &str) -> Self {
        Self::Str(s.to_string())
    }
}

impl From<u32> for FieldValue {
    fn from(n: u32) -> Self {
        Self::Dword(n)
    }
}

/// Insertion-ordered field map.
///
/// Re-inserting an existing key overwrites the value but keeps the key at its
/// original position.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Fields {
    entries: Vec<(String, FieldValue)>,
}

impl Fields {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, key: impl Into<String>, value: FieldValue) {
        let key = key.into();
        match self.entries.iter_mut().find(|(k, _)| *k == key) {
            Some(entry) => entry.1 = value,
            None => self.entries.push((key, value)),
        }
    }

    pub fn get(&self, key: &str) -> Option<&FieldValue> {
        self.entries.iter().find(|(k, _)| k == key).map(|(_, v)| v)
    }

    pub fn contains_key(&self, key: &str) -> bool {
        self.get(key).is_some()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &FieldValue)> {
        self.entries.iter().map(|(k, v)| (k.as_str(), v))
    }
}

impl<'a> IntoIterator for &'a Fields {
    type Item = (&'a str, &'a FieldValue);
    type IntoIter = Box<dyn Iterator<Item = Self::Item> + 'a>;

    fn into_iter(self) -> Self::IntoIter {
        Box::new(self.iter())
    }
}

/// One saved PuTTY session extracted from a registry export.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Session {
    /// Path segment after `Sessions\` in the section header, kept verbatim
    /// (PuTTY percent-encodes spaces and other reserved characters here).
    pub session_name: String,
    /// Every value seen under the section, in first-seen order.
    pub fields: Fields,
}

impl Session {
    pub fn new(session_name: impl Into<String>) -> Self {
        Self {
            session_name: session_name.into(),
            fields: Fields::new(),
        }
    }

    pub fn get(&self, key: &str) -> Option<&FieldValue> {
        self.fields.get(key)
    }

    pub fn host_name(&self) -> Option<&FieldValue> {
        self.get(HOST_NAME)
    }

    pub fn port_number(&self) -> Option<&FieldValue> {
        self.get(PORT_NUMBER)
    }

    pub fn user_name(&self) -> Option<&FieldValue> {
        self.get(USER_NAME)
    }

    pub fn public_key_file(&self) -> Option<&FieldValue> {
        self.get(PUBLIC_KEY_FILE)
    }

    /// Sessions without a `HostName` cannot be connected to and carry no
    /// credential material worth reporting.
    pub fn has_host_name(&self) -> bool {
        self.fields.contains_key(HOST_NAME)
    }
}

/// Serializes flat: `{"session_name": ..., "<field>": <value>, ...}`.
impl Serialize for Session {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.fields.len() + 1))?;
        map.serialize_entry("session_name", &self.session_name)?;
        for (key, value) in &self.fields {
            map.serialize_entry(key, value)?;
        }
        map.end()
    }
}
