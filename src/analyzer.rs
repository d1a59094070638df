//! Enrichment module for PuTTY registry exports.
//!
//! Wires the prefilter, the session parser, both renderers and the artifact
//! store together and packages the outcome as an [`EnrichmentResult`].

use crate::config::Config;
use crate::enrichment::{
    EnrichmentResult, FileObject, Finding, FindingCategory, FindingOrigin, Transform,
};
use crate::error::{EnrichError, Result};
use crate::prefilter::{Prefilter, decode_text};
use crate::store::ArtifactStore;
use putty_reg_parser::{Session, parse, render_full_dump, render_summary};
use serde_json::{Map, Value, json};

/// Name the module reports itself as.
pub const MODULE_NAME: &str = "putty_parser";

/// Name of the credential finding raised for exports with host sessions.
pub const FINDING_NAME: &str = "putty_sessions_detected";

/// Runs the PuTTY session extraction against individual files.
pub struct PuttyAnalyzer<S: ArtifactStore> {
    config: Config,
    prefilter: Prefilter,
    store: S,
}

impl<S: ArtifactStore> PuttyAnalyzer<S> {
    pub fn new(config: Config, store: S) -> Result<Self> {
        let prefilter = Prefilter::new(&config)?;
        Ok(Self {
            config,
            prefilter,
            store,
        })
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    /// Whether this file looks like a PuTTY export.
    pub fn should_process(&self, file_name: &str, bytes: &[u8]) -> bool {
        self.prefilter.should_process(file_name, bytes)
    }

    /// Analyse one file, logging and swallowing any failure.
    pub fn run(&self, object_id: &str, file_name: &str, bytes: &[u8]) -> Option<EnrichmentResult> {
        match self.process(object_id, file_name, bytes) {
            Ok(result) => Some(result),
            Err(e) => {
                log::error!("Error processing PuTTY registry file {}: {}", file_name, e);
                None
            }
        }
    }

    /// Analyse one file.
    ///
    /// An export with no sessions yields an empty result. Sessions always
    /// produce raw results and a stored full report; a credential finding is
    /// added only when at least one session names a host.
    pub fn process(
        &self,
        object_id: &str,
        file_name: &str,
        bytes: &[u8],
    ) -> Result<EnrichmentResult> {
        let text = decode_text(bytes).ok_or_else(|| EnrichError::Decode(file_name.to_string()))?;
        let sessions = parse(&text)?;

        let mut result = EnrichmentResult::new(MODULE_NAME);
        if sessions.is_empty() {
            log::info!("{}: no PuTTY sessions found", file_name);
            return Ok(result);
        }
        log::info!("{}: extracted {} PuTTY sessions", file_name, sessions.len());

        let raw = json!({ "sessions": serde_json::to_value(&sessions)? });
        result.results = Some(raw.clone());

        let summary = render_summary(&sessions);
        if !summary.is_empty() {
            result.findings.push(self.build_finding(object_id, summary, raw));
        }

        result.transforms.push(self.store_report(file_name, &sessions)?);

        Ok(result)
    }

    fn build_finding(&self, object_id: &str, summary: String, raw_data: Value) -> Finding {
        let mut metadata = Map::new();
        metadata.insert("summary".to_string(), Value::String(summary));

        Finding {
            category: FindingCategory::Credential,
            finding_name: FINDING_NAME.to_string(),
            origin_type: FindingOrigin::EnrichmentModule,
            origin_name: MODULE_NAME.to_string(),
            object_id: object_id.to_string(),
            severity: self.config.finding_severity,
            raw_data,
            data: vec![FileObject {
                kind: "finding_summary".to_string(),
                metadata,
            }],
        }
    }

    fn store_report(&self, file_name: &str, sessions: &[Session]) -> Result<Transform> {
        let report = render_full_dump(sessions);
        let report_id = self
            .store
            .upload(report.as_bytes())
            .map_err(EnrichError::Store)?;

        let mut metadata = Map::new();
        metadata.insert(
            "file_name".to_string(),
            Value::String(format!("{}_analysis.txt", file_name)),
        );
        metadata.insert(
            "display_type_in_dashboard".to_string(),
            Value::String("monaco".to_string()),
        );
        metadata.insert("default_display".to_string(), Value::Bool(true));

        Ok(Transform {
            kind: "displayable_parsed".to_string(),
            object_id: report_id,
            metadata,
        })
    }
}
