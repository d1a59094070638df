//! Result envelope handed back to the enrichment pipeline.
//!
//! These mirror the pipeline's JSON schema: a module returns an
//! [`EnrichmentResult`] holding raw results, zero or more [`Finding`]s, and
//! [`Transform`]s pointing at derived artifacts.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Broad classification of a finding.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FindingCategory {
    Credential,
    ExtractedHash,
    ExtractedData,
    Vulnerability,
    YaraMatch,
    Pii,
    Misc,
}

/// What produced a finding.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FindingOrigin {
    EnrichmentModule,
    Manual,
}

/// A rendered attachment shown alongside a finding.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FileObject {
    #[serde(rename = "type")]
    pub kind: String,
    pub metadata: Map<String, Value>,
}

/// A security-relevant result derived from a file.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Finding {
    pub category: FindingCategory,
    pub finding_name: String,
    pub origin_type: FindingOrigin,
    pub origin_name: String,
    pub object_id: String,
    pub severity: u8,
    pub raw_data: Value,
    pub data: Vec<FileObject>,
}

/// A derived artifact stored next to the source file.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Transform {
    #[serde(rename = "type")]
    pub kind: String,
    pub object_id: String,
    pub metadata: Map<String, Value>,
}

/// Everything one module produced for one file.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EnrichmentResult {
    pub module_name: String,
    pub dependencies: Vec<String>,
    pub results: Option<Value>,
    pub findings: Vec<Finding>,
    pub transforms: Vec<Transform>,
}

impl EnrichmentResult {
    pub fn new(module_name: impl Into<String>) -> Self {
        Self {
            module_name: module_name.into(),
            dependencies: Vec::new(),
            results: None,
            findings: Vec::new(),
            transforms: Vec::new(),
        }
    }

    /// True when nothing was extracted.
    pub fn is_empty(&self) -> bool {
        self.results.is_none() && self.findings.is_empty() && self.transforms.is_empty()
    }
}
