pub mod oauth_provider;

pub use oauth_provider::{OAuthProviderOptions, OAuthProviderSettings};
