use std::env;
use std::path::PathBuf;

use clap::{Args, Parser, Subcommand, ValueEnum};
use serde::{Deserialize, Serialize};

use crate::error::{FeatureError, Result};

/// Available CLI actions.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    Render,
    Load,
}

impl Action {
    pub fn as_str(&self) -> &'static str {
        match self {
            Action::Render => "render",
            Action::Load => "load",
        }
    }
}

/// Output format for CLI commands.
#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub enum OutputFormat {
    #[default]
    Text,
    Json,
    Yaml,
}

/// Flags shared by every command.
#[derive(Debug, Args)]
pub struct CommonArgs {
    /// Project the feature belongs to (defaults to $TEAMCITY_PROJECT_ID).
    #[arg(long)]
    pub project: Option<String>,

    /// Output format (text|json|yaml).
    #[arg(long, value_enum, default_value = "text")]
    pub output: OutputFormat,

    /// Log level for stderr diagnostics (defaults to $TEAMCITY_FEATURE_LOG or "warn").
    #[arg(long)]
    pub log_level: Option<String>,
}

#[derive(Debug, Args)]
pub struct RenderArgs {
    #[command(flatten)]
    pub common: CommonArgs,

    /// Declared OAuth provider options (.json, .yaml or .yml).
    #[arg(long)]
    pub options: PathBuf,

    /// Feature id to include in the request body, when updating an existing feature.
    #[arg(long)]
    pub id: Option<String>,
}

#[derive(Debug, Args)]
pub struct LoadArgs {
    #[command(flatten)]
    pub common: CommonArgs,

    /// Project feature record as returned by the server (.json, .yaml or .yml).
    #[arg(long)]
    pub feature: PathBuf,
}

/// Top-level CLI structure.
#[derive(Debug, Parser)]
#[command(
    name = "teamcity-feature",
    version,
    about = "Inspect how TeamCity project features map to REST property bags."
)]
pub struct CliArgs {
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Build the request body for declared OAuth provider options.
    Render(RenderArgs),
    /// Load a server feature record the way a refresh would.
    Load(LoadArgs),
}

/// Complete configuration used by the CLI.
#[derive(Debug, Clone)]
pub struct FeatureToolConfig {
    pub action: Action,
    pub project_id: String,
    pub input: PathBuf,
    pub feature_id: Option<String>,
    pub output: OutputFormat,
    pub log_level: String,
}

impl FeatureToolConfig {
    pub fn from_env_and_args(cli: CliArgs) -> Result<Self> {
        let (action, common, input, feature_id) = match cli.command {
            Command::Render(args) => (Action::Render, args.common, args.options, args.id),
            Command::Load(args) => (Action::Load, args.common, args.feature, None),
        };

        let project_id =
            resolve_project_id(common.project, env::var("TEAMCITY_PROJECT_ID").ok())?;

        if !input.exists() {
            return Err(FeatureError::Config(format!(
                "input file {} does not exist",
                input.display()
            )));
        }

        let log_level = common
            .log_level
            .or_else(|| env::var("TEAMCITY_FEATURE_LOG").ok())
            .unwrap_or_else(|| "warn".to_string());

        Ok(Self {
            action,
            project_id,
            input,
            feature_id: feature_id.filter(|id| !id.is_empty()),
            output: common.output,
            log_level,
        })
    }
}

/// Flag value first, then the environment fallback; blank ids are rejected.
fn resolve_project_id(flag: Option<String>, env_value: Option<String>) -> Result<String> {
    let project_id = flag
        .or(env_value)
        .map(|value| value.trim().to_string())
        .unwrap_or_default();
    if project_id.is_empty() {
        return Err(FeatureError::Config(
            "project id is required (--project or TEAMCITY_PROJECT_ID)".into(),
        ));
    }
    Ok(project_id)
}
