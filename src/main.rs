use anyhow::{Context, Result};
use clap::Parser;

use teamcity_project_features::{
    config::{CliArgs, FeatureToolConfig},
    inspect, telemetry,
};

fn main() -> Result<()> {
    let cli = CliArgs::parse();
    let config = FeatureToolConfig::from_env_and_args(cli).context("configuration error")?;
    telemetry::init(&config).context("initialize logging")?;

    let rendered = inspect::run(&config)
        .with_context(|| format!("{} failed for {}", config.action.as_str(), config.input.display()))?;
    print!("{rendered}");
    Ok(())
}
