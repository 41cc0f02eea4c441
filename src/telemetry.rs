use tracing::level_filters::LevelFilter;

use crate::config::FeatureToolConfig;
use crate::error::{FeatureError, Result};

/// Install the stderr fmt subscriber as the global default.
pub fn init(config: &FeatureToolConfig) -> Result<()> {
    let level = parse_level(&config.log_level)?;
    tracing_subscriber::fmt()
        .with_max_level(level)
        .with_target(false)
        .with_writer(std::io::stderr)
        .try_init()
        .map_err(|err| FeatureError::Telemetry(err.to_string()))
}

fn parse_level(value: &str) -> Result<LevelFilter> {
    value.trim().to_ascii_lowercase().parse().map_err(|_| {
        FeatureError::Config(format!(
            "invalid log level '{value}' (expected off|error|warn|info|debug|trace)"
        ))
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_level_names_case_insensitively() {
        assert_eq!(parse_level("DEBUG").expect("level"), LevelFilter::DEBUG);
        assert_eq!(parse_level(" off ").expect("level"), LevelFilter::OFF);
    }

    #[test]
    fn rejects_unknown_level() {
        let err = parse_level("chatty").unwrap_err();
        assert!(format!("{err}").contains("invalid log level"));
    }
}
