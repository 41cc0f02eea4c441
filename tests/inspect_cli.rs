use std::fs;

use clap::Parser;
use serde_json::{Value, json};
use teamcity_project_features::config::{CliArgs, FeatureToolConfig};
use teamcity_project_features::inspect;
use tempfile::tempdir;

fn run(argv: &[&str]) -> String {
    let cli = CliArgs::parse_from(argv);
    let config = FeatureToolConfig::from_env_and_args(cli).expect("config builds");
    inspect::run(&config).expect("run")
}

#[test]
fn render_yaml_options_to_json_body() {
    let dir = tempdir().expect("temp dir");
    let path = dir.path().join("vault.yaml");
    fs::write(
        &path,
        "displayName: Vault\nfailOnError: true\nvaultNamespace: admin\nsecretId: s3cr3t\n",
    )
    .unwrap();

    let out = run(&[
        "teamcity-feature",
        "render",
        "--project",
        "Root",
        "--options",
        path.to_str().unwrap(),
        "--id",
        "PROJECT_EXT_5",
        "--output",
        "json",
    ]);
    let body: Value = serde_json::from_str(&out).expect("json output");
    assert_eq!(body["id"], "PROJECT_EXT_5");
    assert_eq!(body["project_id"], "Root");
    assert_eq!(body["type"], "OAuthProvider");
    let props = body["properties"]["property"].as_array().expect("array");
    assert_eq!(props.len(), 9);
    assert_eq!(props[2], json!({"name": "fail-on-error", "value": "true"}));
    assert_eq!(props[4], json!({"name": "vault-namespace", "value": "admin"}));
    assert_eq!(props[7], json!({"name": "secure:secret-id", "value": "s3cr3t"}));
}

#[test]
fn load_json_record_prints_redacted_text() {
    let dir = tempdir().expect("temp dir");
    let path = dir.path().join("feature.json");
    let record = json!({
        "id": "PROJECT_EXT_9",
        "type": "OAuthProvider",
        "properties": {"property": [
            {"name": "displayName", "value": "GH"},
            {"name": "secure:secret-id", "value": "zxx775d03cbe80d301b"}
        ]}
    });
    fs::write(&path, serde_json::to_vec(&record).unwrap()).unwrap();

    let out = run(&[
        "teamcity-feature",
        "load",
        "--project",
        "Root",
        "--feature",
        path.to_str().unwrap(),
    ]);
    assert!(out.contains("id:      PROJECT_EXT_9"));
    assert!(out.contains("properties (9):"));
    assert!(out.contains("  displayName = GH"));
    assert!(out.contains("  secure:secret-id = \n"));
    assert!(!out.contains("zxx775d03cbe80d301b"));
}

#[test]
fn load_reports_malformed_boolean() {
    let dir = tempdir().expect("temp dir");
    let path = dir.path().join("feature.json");
    let record = json!({
        "type": "OAuthProvider",
        "properties": {"property": [{"name": "fail-on-error", "value": "yes"}]}
    });
    fs::write(&path, serde_json::to_vec(&record).unwrap()).unwrap();

    let cli = CliArgs::parse_from([
        "teamcity-feature",
        "load",
        "--project",
        "Root",
        "--feature",
        path.to_str().unwrap(),
    ]);
    let config = FeatureToolConfig::from_env_and_args(cli).expect("config builds");
    let err = inspect::run(&config).expect_err("malformed boolean");
    assert!(format!("{err}").contains("expected a boolean literal"));
}
