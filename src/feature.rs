use std::fmt;

use serde::{Deserialize, Serialize};
use tracing::warn;

use crate::error::{FeatureError, Result};
use crate::features::oauth_provider;
use crate::properties::Properties;

/// Capability set shared by every project feature kind.
pub trait ProjectFeature: fmt::Debug + Send + Sync {
    /// Identifier assigned by the server; empty until the feature is created.
    fn id(&self) -> &str;
    fn set_id(&mut self, value: String);
    /// Type tag the server uses for this feature.
    fn kind(&self) -> &'static str;
    /// Project the feature is attached to.
    fn project_id(&self) -> &str;
    fn set_project_id(&mut self, value: String);
    /// Property bag sent to the server on create/update.
    fn properties(&self) -> Properties;
}

/// Project feature kinds this crate knows how to load.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FeatureKind {
    OAuthProvider,
}

impl FeatureKind {
    pub const ALL: [FeatureKind; 1] = [FeatureKind::OAuthProvider];

    pub fn as_str(&self) -> &'static str {
        match self {
            FeatureKind::OAuthProvider => "OAuthProvider",
        }
    }

    pub fn parse(value: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|kind| kind.as_str() == value)
    }
}

/// Project feature record as exchanged with the REST API.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProjectFeatureJson {
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub id: String,
    #[serde(rename = "type")]
    pub kind: String,
    #[serde(default)]
    pub properties: Properties,
}

impl ProjectFeatureJson {
    /// Request body for creating or updating `feature`.
    pub fn from_feature(feature: &dyn ProjectFeature) -> Self {
        Self {
            id: feature.id().to_string(),
            kind: feature.kind().to_string(),
            properties: feature.properties(),
        }
    }

    /// Same record with secure property values masked.
    pub fn redacted(&self) -> Self {
        Self {
            properties: self.properties.redacted(),
            ..self.clone()
        }
    }
}

/// Load a feature of any supported kind, dispatching on the record's type tag.
pub fn load_project_feature(
    project_id: &str,
    feature: &ProjectFeatureJson,
) -> Result<Box<dyn ProjectFeature>> {
    let Some(kind) = FeatureKind::parse(&feature.kind) else {
        warn!(
            project_id,
            feature_id = %feature.id,
            kind = %feature.kind,
            "unsupported project feature type"
        );
        return Err(FeatureError::UnsupportedKind(feature.kind.clone()));
    };

    match kind {
        FeatureKind::OAuthProvider => Ok(Box::new(oauth_provider::load(project_id, feature)?)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn kind_round_trips_through_tag() {
        for kind in FeatureKind::ALL {
            assert_eq!(FeatureKind::parse(kind.as_str()), Some(kind));
        }
        assert_eq!(FeatureKind::parse("oauthprovider"), None);
    }

    #[test]
    fn record_decodes_with_defaults() {
        let record: ProjectFeatureJson =
            serde_json::from_value(json!({"type": "OAuthProvider"})).expect("decode");
        assert!(record.id.is_empty());
        assert!(record.properties.is_empty());
    }

    #[test]
    fn record_requires_type_tag() {
        let err = serde_json::from_value::<ProjectFeatureJson>(json!({"id": "PROJECT_EXT_1"}))
            .expect_err("type is required");
        assert!(err.to_string().contains("type"));
    }

    #[test]
    fn unknown_kind_is_rejected() {
        let record = ProjectFeatureJson {
            id: "PROJECT_EXT_9".into(),
            kind: "versionedSettings".into(),
            properties: Properties::default(),
        };
        let err = load_project_feature("Root", &record).expect_err("unknown kind");
        assert!(matches!(err, FeatureError::UnsupportedKind(ref kind) if kind == "versionedSettings"));
    }
}
