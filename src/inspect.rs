use std::fmt::Write as _;
use std::fs;
use std::path::Path;

use serde::Serialize;
use serde::de::DeserializeOwned;
use tracing::{debug, info_span};

use crate::config::{Action, FeatureToolConfig, OutputFormat};
use crate::error::Result;
use crate::feature::{ProjectFeature, ProjectFeatureJson, load_project_feature};
use crate::features::{OAuthProviderOptions, OAuthProviderSettings};

/// Feature record together with the project it belongs to.
#[derive(Debug, Clone, Serialize)]
pub struct FeatureReport {
    pub project_id: String,
    #[serde(flatten)]
    pub feature: ProjectFeatureJson,
}

impl FeatureReport {
    pub fn from_feature(feature: &dyn ProjectFeature) -> Self {
        Self {
            project_id: feature.project_id().to_string(),
            feature: ProjectFeatureJson::from_feature(feature),
        }
    }
}

/// Execute the configured action and return the rendered output.
pub fn run(config: &FeatureToolConfig) -> Result<String> {
    let span = info_span!(
        "feature",
        action = config.action.as_str(),
        project_id = %config.project_id
    );
    let _enter = span.enter();

    let report = match config.action {
        Action::Render => render(config)?,
        Action::Load => load(config)?,
    };
    debug!(
        kind = %report.feature.kind,
        properties = report.feature.properties.len(),
        "built feature report"
    );
    format_report(&report, config.output)
}

fn render(config: &FeatureToolConfig) -> Result<FeatureReport> {
    let options: OAuthProviderOptions = read_document(&config.input)?;
    let mut settings = OAuthProviderSettings::new(config.project_id.clone(), options);
    if let Some(id) = &config.feature_id {
        settings.set_id(id.clone());
    }
    Ok(FeatureReport::from_feature(&settings))
}

fn load(config: &FeatureToolConfig) -> Result<FeatureReport> {
    let record: ProjectFeatureJson = read_document(&config.input)?;
    let feature = load_project_feature(&config.project_id, &record)?;
    Ok(FeatureReport::from_feature(feature.as_ref()))
}

fn read_document<T: DeserializeOwned>(path: &Path) -> Result<T> {
    let data = fs::read_to_string(path)?;
    let is_yaml = path
        .extension()
        .and_then(|ext| ext.to_str())
        .is_some_and(|ext| ext.eq_ignore_ascii_case("yaml") || ext.eq_ignore_ascii_case("yml"));
    if is_yaml {
        Ok(serde_yaml_bw::from_str(&data)?)
    } else {
        Ok(serde_json::from_str(&data)?)
    }
}

pub fn format_report(report: &FeatureReport, format: OutputFormat) -> Result<String> {
    match format {
        OutputFormat::Json => Ok(format!("{}\n", serde_json::to_string_pretty(report)?)),
        OutputFormat::Yaml => Ok(serde_yaml_bw::to_string(report)?),
        OutputFormat::Text => Ok(format_text(report)),
    }
}

fn format_text(report: &FeatureReport) -> String {
    let feature = report.feature.redacted();
    let id = if feature.id.is_empty() {
        "<unassigned>"
    } else {
        feature.id.as_str()
    };

    let mut out = String::new();
    let _ = writeln!(out, "type:    {}", feature.kind);
    let _ = writeln!(out, "id:      {id}");
    let _ = writeln!(out, "project: {}", report.project_id);
    let _ = writeln!(out, "properties ({}):", feature.properties.len());
    for property in &feature.properties {
        let _ = writeln!(out, "  {} = {}", property.name, property.value);
    }
    out
}
