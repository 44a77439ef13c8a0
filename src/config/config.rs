use figment::providers::{Format, Serialized, Yaml};
use figment::Figment;
use schemars::{schema_for, JsonSchema};
use serde::{Deserialize, Deserializer, Serialize};

use super::logging::LoggingConfig;

/// Environment variable pointing at the YAML config file.
pub const CONFIG_PATH_ENV: &str = "WEBSITE_CONFIG";
const DEFAULT_CONFIG_PATH: &str = "./config.yaml";

/// Environment variables that override values from the YAML file.
const ENV_KEYS: &[&str] = &[
    "TLS_CERT_FILE",
    "TLS_KEY_FILE",
    "GITHUB_CLIENT_ID",
    "GITHUB_CLIENT_SECRET",
    "OAUTH_CALLBACK_URL",
    "BIND_ADDRESS",
];

/// A top-level enum for versioned configurations.
#[derive(Deserialize, Serialize, JsonSchema)]
#[serde(tag = "version")]
pub enum Config {
    #[serde(rename = "1.0.0")]
    ConfigV1(ConfigV1),
}

/// Main config for v1.0.0: listener, TLS material, GitHub OAuth app and logging.
#[derive(Deserialize, Serialize, Debug, Clone, JsonSchema)]
pub struct ConfigV1 {
    #[serde(default = "default_bind_address")]
    pub bind_address: String,
    #[serde(default)]
    pub tls: TlsConfig,
    pub github: GitHubConfig,
    #[serde(default)]
    pub logging: LoggingConfig,
}

impl ConfigV1 {
    /// Checks the values the server cannot start without.
    ///
    /// Only the OAuth client credentials are checked here. The TLS files are
    /// checked when they are loaded, and an empty callback URL is allowed
    /// (the provider then falls back to the callback registered for the app).
    pub fn validate(&self) -> Result<(), String> {
        if self.github.client_id.trim().is_empty() || self.github.client_secret.trim().is_empty() {
            return Err("missing github client id/secret".to_string());
        }
        Ok(())
    }
}

/// Paths to the PEM encoded certificate chain and private key.
#[derive(Deserialize, Serialize, Debug, Clone, Default, JsonSchema)]
pub struct TlsConfig {
    #[serde(default)]
    pub cert_file: String,
    #[serde(default)]
    pub key_file: String,
}

/// The GitHub OAuth application the website exchanges codes for.
#[derive(Deserialize, Serialize, Debug, Clone, JsonSchema)]
pub struct GitHubConfig {
    #[serde(default, deserialize_with = "string_or_number")]
    #[schemars(with = "String")]
    pub client_id: String,
    #[serde(default, deserialize_with = "string_or_number")]
    #[schemars(with = "String")]
    pub client_secret: String,
    #[serde(default)]
    pub callback_url: String,
    #[serde(default = "default_authorize_url")]
    pub authorize_url: String,
    #[serde(default = "default_token_url")]
    pub token_url: String,
    #[serde(default = "default_timeout_in_ms")]
    pub timeout_in_ms: u64,
}

/// Accepts credentials that YAML reads as numbers (an all-digit client id).
fn string_or_number<'de, D: Deserializer<'de>>(deserializer: D) -> Result<String, D::Error> {
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Raw {
        String(String),
        Unsigned(u64),
        Signed(i64),
    }

    Ok(match Raw::deserialize(deserializer)? {
        Raw::String(s) => s,
        Raw::Unsigned(n) => n.to_string(),
        Raw::Signed(n) => n.to_string(),
    })
}

fn default_bind_address() -> String {
    "0.0.0.0:443".to_string()
}

fn default_authorize_url() -> String {
    "https://github.com/login/oauth/authorize".to_string()
}

fn default_token_url() -> String {
    "https://github.com/login/oauth/access_token".to_string()
}

fn default_timeout_in_ms() -> u64 {
    10_000
}

/// Maps a (lowercased) environment variable name onto its config key.
fn env_key(key: &str) -> String {
    match key {
        "tls_cert_file" => "tls.cert_file".to_string(),
        "tls_key_file" => "tls.key_file".to_string(),
        "github_client_id" => "github.client_id".to_string(),
        "github_client_secret" => "github.client_secret".to_string(),
        "oauth_callback_url" => "github.callback_url".to_string(),
        other => other.to_string(),
    }
}

/// Builds the figment used by [`load_config`]: the YAML file, then the
/// environment overrides, then the default version tag.
///
/// Environment values are merged verbatim as strings, so a numeric client
/// id or secret is never reinterpreted as a number.
pub fn build_figment(path: &str) -> Figment {
    let figment = Figment::new().merge(Yaml::file(path));
    ENV_KEYS
        .iter()
        .filter_map(|var| std::env::var(var).ok().map(|value| (*var, value)))
        .fold(figment, |figment, (var, value)| {
            figment.merge(Serialized::default(
                &env_key(&var.to_ascii_lowercase()),
                value,
            ))
        })
        .join(Serialized::default("version", "1.0.0"))
}

/// Extracts a [`ConfigV1`] from any figment.
pub fn extract_config(figment: &Figment) -> Result<ConfigV1, String> {
    match figment.extract::<Config>().map_err(|e| e.to_string())? {
        Config::ConfigV1(c) => Ok(c),
    }
}

/// Load config from the YAML file named by `WEBSITE_CONFIG` (default
/// "./config.yaml") merged with environment overrides. Exits on failure.
pub fn load_config() -> ConfigV1 {
    let path = std::env::var(CONFIG_PATH_ENV).unwrap_or_else(|_| DEFAULT_CONFIG_PATH.to_string());
    match extract_config(&build_figment(&path)) {
        Ok(cfg) => cfg,
        Err(e) => {
            eprintln!("failed to load conf: {}", e);
            std::process::exit(1);
        }
    }
}

/// Print the JSON schema for the configuration to stdout.
pub fn print_schema() {
    let schema = schema_for!(Config);
    match serde_json::to_string_pretty(&schema) {
        Ok(s) => println!("{}", s),
        Err(e) => eprintln!("failed to render schema: {}", e),
    }
}
