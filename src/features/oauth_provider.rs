//! OAuth provider connection attached to a project (`OAuthProvider` feature).
//!
//! TeamCity stores every connection type (GitHub App, HashiCorp Vault, ...) as
//! the same feature kind; `providerType` selects which of the remaining
//! properties the server actually reads.

use std::fmt;

use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::error::{FeatureError, Result};
use crate::feature::{FeatureKind, ProjectFeature, ProjectFeatureJson};
use crate::properties::{Properties, Property};

pub const DISPLAY_NAME: &str = "displayName";
pub const ENDPOINT: &str = "endpoint";
pub const FAIL_ON_ERROR: &str = "fail-on-error";
pub const PARAMETER_NAMESPACE: &str = "namespace";
pub const VAULT_NAMESPACE: &str = "vault-namespace";
pub const PROVIDER_TYPE: &str = "providerType";
pub const ROLE_ID: &str = "role-id";
pub const SECRET_ID: &str = "secure:secret-id";
pub const URL: &str = "url";

/// Declared settings of an OAuth provider connection.
#[derive(Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct OAuthProviderOptions {
    pub display_name: String,
    pub endpoint: String,
    pub fail_on_error: bool,
    pub parameter_namespace: String,
    pub vault_namespace: String,
    pub provider_type: String,
    pub role_id: String,
    /// Write-only; the server never returns it.
    pub secret_id: String,
    pub url: String,
}

impl OAuthProviderOptions {
    pub fn redacted(&self) -> Self {
        Self {
            secret_id: if self.secret_id.is_empty() {
                String::new()
            } else {
                "******".to_string()
            },
            ..self.clone()
        }
    }
}

impl fmt::Debug for OAuthProviderOptions {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("OAuthProviderOptions")
            .field("display_name", &self.display_name)
            .field("endpoint", &self.endpoint)
            .field("fail_on_error", &self.fail_on_error)
            .field("parameter_namespace", &self.parameter_namespace)
            .field("vault_namespace", &self.vault_namespace)
            .field("provider_type", &self.provider_type)
            .field("role_id", &self.role_id)
            .field("secret_id", &self.redacted().secret_id)
            .field("url", &self.url)
            .finish()
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OAuthProviderSettings {
    id: String,
    project_id: String,
    pub options: OAuthProviderOptions,
}

impl OAuthProviderSettings {
    /// Settings declared for `project_id`, not yet created on the server.
    pub fn new(project_id: impl Into<String>, options: OAuthProviderOptions) -> Self {
        Self {
            id: String::new(),
            project_id: project_id.into(),
            options,
        }
    }
}

impl ProjectFeature for OAuthProviderSettings {
    fn id(&self) -> &str {
        &self.id
    }

    fn set_id(&mut self, value: String) {
        self.id = value;
    }

    fn kind(&self) -> &'static str {
        FeatureKind::OAuthProvider.as_str()
    }

    fn project_id(&self) -> &str {
        &self.project_id
    }

    fn set_project_id(&mut self, value: String) {
        self.project_id = value;
    }

    fn properties(&self) -> Properties {
        let options = &self.options;
        Properties::new([
            Property::new(DISPLAY_NAME, options.display_name.as_str()),
            Property::new(ENDPOINT, options.endpoint.as_str()),
            Property::new(FAIL_ON_ERROR, options.fail_on_error.to_string()),
            Property::new(PARAMETER_NAMESPACE, options.parameter_namespace.as_str()),
            Property::new(VAULT_NAMESPACE, options.vault_namespace.as_str()),
            Property::new(PROVIDER_TYPE, options.provider_type.as_str()),
            Property::new(ROLE_ID, options.role_id.as_str()),
            Property::new(SECRET_ID, options.secret_id.as_str()),
            Property::new(URL, options.url.as_str()),
        ])
    }
}

/// Rebuild settings from a server record. Absent string keys stay empty and
/// the secret is always cleared.
pub fn load(project_id: &str, feature: &ProjectFeatureJson) -> Result<OAuthProviderSettings> {
    let props = &feature.properties;
    let copy = |key: &str, field: &mut String| {
        if let Some(value) = props.get_ok(key) {
            *field = value.to_string();
        }
    };

    let mut options = OAuthProviderOptions::default();
    copy(DISPLAY_NAME, &mut options.display_name);
    copy(ENDPOINT, &mut options.endpoint);
    copy(PARAMETER_NAMESPACE, &mut options.parameter_namespace);
    copy(VAULT_NAMESPACE, &mut options.vault_namespace);
    copy(PROVIDER_TYPE, &mut options.provider_type);
    copy(ROLE_ID, &mut options.role_id);
    copy(URL, &mut options.url);

    if let Some(value) = props.get_ok(FAIL_ON_ERROR) {
        options.fail_on_error = value.parse::<bool>().map_err(|source| {
            warn!(
                project_id,
                feature_id = %feature.id,
                value,
                "rejecting non-boolean fail-on-error"
            );
            FeatureError::MalformedBool {
                key: FAIL_ON_ERROR.to_string(),
                value: value.to_string(),
                source,
            }
        })?;
    }

    let mut settings = OAuthProviderSettings {
        id: feature.id.clone(),
        project_id: project_id.to_string(),
        options,
    };
    clear_secret(&mut settings);

    debug!(
        project_id,
        feature_id = %settings.id,
        provider_type = %settings.options.provider_type,
        "loaded oauth provider settings"
    );
    Ok(settings)
}

// The server echoes secure properties blank or scrambled, never the real value.
fn clear_secret(settings: &mut OAuthProviderSettings) {
    settings.options.secret_id.clear();
}
