use std::io;
use std::str::ParseBoolError;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum FeatureError {
    #[error("property '{key}' holds '{value}', expected a boolean literal (true|false)")]
    MalformedBool {
        key: String,
        value: String,
        #[source]
        source: ParseBoolError,
    },

    #[error("unsupported project feature type '{0}'")]
    UnsupportedKind(String),

    #[error("configuration error: {0}")]
    Config(String),

    #[error("IO error: {0}")]
    Io(#[from] io::Error),

    #[error("JSON serialization error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("YAML serialization error: {0}")]
    Yaml(#[from] serde_yaml_bw::Error),

    #[error("telemetry initialization error: {0}")]
    Telemetry(String),
}

pub type Result<T> = std::result::Result<T, FeatureError>;
