use std::time::Duration;

use reqwest::header::ACCEPT;
use reqwest::Url;
use serde::Deserialize;
use tracing::{debug, info};

use crate::config::GitHubConfig;
use crate::providers::OAuthProvider;

/// Body of the token endpoint's JSON response. GitHub answers rejected codes
/// with a 200 and an `error` field instead of an error status.
#[derive(Deserialize)]
struct TokenResponse {
    #[serde(default)]
    access_token: Option<String>,
    #[serde(default)]
    error: Option<String>,
    #[serde(default)]
    error_description: Option<String>,
}

/// Authorization-code flow against a GitHub OAuth application.
pub struct GitHubProvider {
    config: GitHubConfig,
    authorize_url: Url,
    token_url: Url,
    client: reqwest::Client,
}

impl GitHubProvider {
    /// Parses the endpoint URLs and builds the HTTP client used for every
    /// exchange. Fails on malformed URLs or if the client cannot be built.
    pub fn new(config: &GitHubConfig) -> Result<Self, String> {
        info!(
            "Creating GitHubProvider for client_id='{}', callback='{}'",
            config.client_id, config.callback_url
        );

        let authorize_url = Url::parse(&config.authorize_url)
            .map_err(|e| format!("Invalid authorize_url '{}': {}", config.authorize_url, e))?;
        let token_url = Url::parse(&config.token_url)
            .map_err(|e| format!("Invalid token_url '{}': {}", config.token_url, e))?;

        let client = reqwest::Client::builder()
            .timeout(Duration::from_millis(config.timeout_in_ms))
            .build()
            .map_err(|e| format!("Failed to build HTTP client: {}", e))?;

        Ok(Self {
            config: config.clone(),
            authorize_url,
            token_url,
            client,
        })
    }

    fn has_callback(&self) -> bool {
        !self.config.callback_url.is_empty()
    }
}

#[async_trait::async_trait]
impl OAuthProvider for GitHubProvider {
    fn get_name(&self) -> &str {
        "github"
    }

    fn authorization_url(&self) -> String {
        let mut url = self.authorize_url.clone();
        {
            let mut query = url.query_pairs_mut();
            query.append_pair("client_id", &self.config.client_id);
            if self.has_callback() {
                query.append_pair("redirect_uri", &self.config.callback_url);
            }
        }
        url.to_string()
    }

    async fn exchange_code(&self, code: &str) -> Result<String, String> {
        debug!("Exchanging authorization code at {}", self.token_url);

        let mut form = vec![
            ("client_id", self.config.client_id.as_str()),
            ("client_secret", self.config.client_secret.as_str()),
            ("code", code),
        ];
        if self.has_callback() {
            form.push(("redirect_uri", self.config.callback_url.as_str()));
        }

        let resp = self
            .client
            .post(self.token_url.clone())
            .header(ACCEPT, "application/json")
            .form(&form)
            .send()
            .await
            .map_err(|e| format!("Failed to call token endpoint: {}", e))?;

        let status = resp.status();
        if !status.is_success() {
            return Err(format!("Token endpoint returned status {}", status));
        }

        let body = resp
            .json::<TokenResponse>()
            .await
            .map_err(|e| format!("Failed to parse token response JSON: {}", e))?;

        if let Some(error) = body.error {
            return Err(match body.error_description {
                Some(description) => format!("{}: {}", error, description),
                None => error,
            });
        }

        match body.access_token {
            Some(token) if !token.trim().is_empty() => Ok(token),
            _ => Err("Token endpoint returned no access token".to_string()),
        }
    }
}
