#![forbid(unsafe_code)]

pub mod config;
pub mod error;
pub mod feature;
pub mod features;
pub mod inspect;
pub mod properties;
pub mod telemetry;

pub use config::{Action, CliArgs, Command, FeatureToolConfig, OutputFormat};
pub use error::FeatureError;
pub use feature::{FeatureKind, ProjectFeature, ProjectFeatureJson, load_project_feature};
pub use features::{OAuthProviderOptions, OAuthProviderSettings};
pub use properties::{Properties, Property};
