//! End-to-end tests for the enrichment flow with an on-disk artifact store.

use putty_reg::analyzer::{FINDING_NAME, MODULE_NAME};
use putty_reg::enrichment::FindingCategory;
use putty_reg::store::LocalArtifactStore;
use putty_reg::{Config, PuttyAnalyzer};
use serde_json::json;
use std::fs;

const EXPORT: &str = "Windows Registry Editor Version 5.00\r\n\
\r\n\
[HKEY_CURRENT_USER\\Software\\SimonTatham\\PuTTY\\Sessions\\Default%20Settings]\r\n\
\"TermWidth\"=dword:00000050\r\n\
\r\n\
[HKEY_CURRENT_USER\\Software\\SimonTatham\\PuTTY\\Sessions\\web]\r\n\
\"HostName\"=\"web01.example.com\"\r\n\
\"PortNumber\"=dword:00000016\r\n\
\"UserName\"=\"deploy\"\r\n\
\"PublicKeyFile\"=\"C:\\\\keys\\\\deploy.ppk\"\r\n";

fn utf16le(text: &str) -> Vec<u8> {
    let mut bytes = vec![0xFF, 0xFE];
    for unit in text.encode_utf16() {
        bytes.extend_from_slice(&unit.to_le_bytes());
    }
    bytes
}

#[test]
fn test_analyze_export_end_to_end() {
    let dir = tempfile::tempdir().unwrap();
    let store = LocalArtifactStore::new(dir.path());
    let analyzer = PuttyAnalyzer::new(Config::default(), store).unwrap();

    assert!(analyzer.should_process("putty.reg", EXPORT.as_bytes()));
    let result = analyzer
        .run("obj-123", "putty.reg", EXPORT.as_bytes())
        .expect("analysis should succeed");

    assert_eq!(result.module_name, MODULE_NAME);
    let sessions = &result.results.as_ref().unwrap()["sessions"];
    assert_eq!(sessions.as_array().unwrap().len(), 2);
    assert_eq!(sessions[0]["session_name"], json!("Default%20Settings"));
    assert_eq!(sessions[0]["TermWidth"], json!(80));
    assert_eq!(sessions[1]["HostName"], json!("web01.example.com"));

    let finding = &result.findings[0];
    assert_eq!(finding.category, FindingCategory::Credential);
    assert_eq!(finding.finding_name, FINDING_NAME);
    assert_eq!(finding.raw_data, *result.results.as_ref().unwrap());
    let summary = finding.data[0].metadata["summary"].as_str().unwrap();
    assert!(summary.contains("## Session: web\n"));
    assert!(summary.contains("* **Key File**: C:\\\\keys\\\\deploy.ppk\n"));
    assert!(!summary.contains("Default%20Settings"));

    let transform = &result.transforms[0];
    assert_eq!(transform.kind, "displayable_parsed");
    assert_eq!(transform.metadata["display_type_in_dashboard"], json!("monaco"));
    assert_eq!(transform.metadata["default_display"], json!(true));

    let report = fs::read_to_string(dir.path().join(&transform.object_id)).unwrap();
    assert!(report.starts_with("   PuTTY Registry Analysis\n"));
    assert!(report.contains("   Session: Default%20Settings\n      TermWidth: 80\n"));
    assert!(report.contains("      UserName: deploy\n"));
}

#[test]
fn test_utf16_export_is_analyzed() {
    let dir = tempfile::tempdir().unwrap();
    let analyzer =
        PuttyAnalyzer::new(Config::default(), LocalArtifactStore::new(dir.path())).unwrap();
    let bytes = utf16le(EXPORT);

    assert!(analyzer.should_process("Putty.REG", &bytes));
    let result = analyzer.run("obj", "Putty.REG", &bytes).unwrap();
    assert_eq!(result.findings.len(), 1);
}

#[test]
fn test_result_serializes_to_pipeline_schema() {
    let dir = tempfile::tempdir().unwrap();
    let analyzer =
        PuttyAnalyzer::new(Config::default(), LocalArtifactStore::new(dir.path())).unwrap();
    let result = analyzer.run("obj", "putty.reg", EXPORT.as_bytes()).unwrap();

    let value = serde_json::to_value(&result).unwrap();
    assert_eq!(value["findings"][0]["category"], json!("credential"));
    assert_eq!(value["findings"][0]["origin_type"], json!("enrichment_module"));
    assert_eq!(value["findings"][0]["data"][0]["type"], json!("finding_summary"));
    assert_eq!(value["transforms"][0]["type"], json!("displayable_parsed"));
}

#[test]
fn test_bad_dword_yields_no_result() {
    let dir = tempfile::tempdir().unwrap();
    let analyzer =
        PuttyAnalyzer::new(Config::default(), LocalArtifactStore::new(dir.path())).unwrap();
    let text = "[HKEY_CURRENT_USER\\Software\\SimonTatham\\PuTTY\\Sessions\\x]\n\"PortNumber\"=dword:xyz\n";

    assert!(analyzer.run("obj", "putty.reg", text.as_bytes()).is_none());
    assert_eq!(fs::read_dir(dir.path()).unwrap().count(), 0);
}

#[test]
fn test_custom_extension_from_config() {
    let dir = tempfile::tempdir().unwrap();
    let config = Config {
        file_extension: ".txt".to_string(),
        ..Config::default()
    };
    let analyzer = PuttyAnalyzer::new(config, LocalArtifactStore::new(dir.path())).unwrap();
    assert!(analyzer.should_process("export.txt", EXPORT.as_bytes()));
    assert!(!analyzer.should_process("export.reg", EXPORT.as_bytes()));
}
