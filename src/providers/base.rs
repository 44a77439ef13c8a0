use std::sync::Arc;

use super::github_provider::GitHubProvider;
use crate::config::GitHubConfig;

/// An OAuth provider the website sends users to for consent, and later asks
/// to turn the returned authorization code into an access token.
#[async_trait::async_trait]
pub trait OAuthProvider: Send + Sync {
    fn get_name(&self) -> &str;

    /// The consent URL the browser is redirected to. Makes no network call.
    fn authorization_url(&self) -> String;

    /// Exchanges an authorization code for an access token.
    ///
    /// Any failure (transport, provider rejection, missing token) is reported
    /// as an opaque error string.
    async fn exchange_code(&self, code: &str) -> Result<String, String>;
}

/// Create the OAuth provider for the configured GitHub application.
pub fn create_oauth_provider(config: &GitHubConfig) -> Result<Arc<dyn OAuthProvider>, String> {
    Ok(Arc::new(GitHubProvider::new(config)?))
}
