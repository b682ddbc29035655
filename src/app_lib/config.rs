//! Endpoint configuration for the backend API and the identity provider,
//! with defaults suited to local development and trimmed overrides. The
//! terminal front-end fills overrides from its arguments and environment.
//! Only the identity API key is sensitive; it is kept as a `SecretString`.

use secrecy::{ExposeSecret, SecretString};
use std::time::Duration;

pub const DEFAULT_API_BASE_URL: &str = "http://localhost:3001";
pub const DEFAULT_IDENTITY_BASE_URL: &str = "https://identitytoolkit.googleapis.com";
pub const DEFAULT_SECURE_TOKEN_BASE_URL: &str = "https://securetoken.googleapis.com";
/// Default request timeout applied to every HTTP call.
pub const DEFAULT_REQUEST_TIMEOUT: Duration = Duration::from_secs(10);

/// Client configuration shared by all adapters.
#[derive(Clone, Debug)]
pub struct AppConfig {
    pub api_base_url: String,
    pub identity_base_url: String,
    pub secure_token_base_url: String,
    pub identity_api_key: SecretString,
    pub request_timeout: Duration,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            api_base_url: DEFAULT_API_BASE_URL.to_string(),
            identity_base_url: DEFAULT_IDENTITY_BASE_URL.to_string(),
            secure_token_base_url: DEFAULT_SECURE_TOKEN_BASE_URL.to_string(),
            identity_api_key: SecretString::default(),
            request_timeout: DEFAULT_REQUEST_TIMEOUT,
        }
    }
}

impl AppConfig {
    /// Builds the default config and applies the given overrides.
    #[must_use]
    pub fn load(overrides: RuntimeOverrides) -> Self {
        let mut config = Self::default();
        apply_runtime_overrides(&mut config, overrides);
        config
    }

    /// True when an identity API key has been configured.
    #[must_use]
    pub fn has_identity_api_key(&self) -> bool {
        !self.identity_api_key.expose_secret().trim().is_empty()
    }
}

/// Optional values that replace the defaults. Blank values are ignored.
#[derive(Default)]
pub struct RuntimeOverrides {
    pub api_base_url: Option<String>,
    pub identity_base_url: Option<String>,
    pub secure_token_base_url: Option<String>,
    pub identity_api_key: Option<String>,
    pub request_timeout_seconds: Option<u64>,
}

fn apply_runtime_overrides(config: &mut AppConfig, runtime: RuntimeOverrides) {
    if let Some(value) = runtime.api_base_url.as_deref().and_then(normalize_runtime_value) {
        config.api_base_url = value;
    }
    if let Some(value) = runtime
        .identity_base_url
        .as_deref()
        .and_then(normalize_runtime_value)
    {
        config.identity_base_url = value;
    }
    if let Some(value) = runtime
        .secure_token_base_url
        .as_deref()
        .and_then(normalize_runtime_value)
    {
        config.secure_token_base_url = value;
    }
    if let Some(value) = runtime
        .identity_api_key
        .as_deref()
        .and_then(normalize_runtime_value)
    {
        config.identity_api_key = SecretString::from(value);
    }
    if let Some(seconds) = runtime.request_timeout_seconds.filter(|seconds| *seconds > 0) {
        config.request_timeout = Duration::from_secs(seconds);
    }
}

fn normalize_runtime_value(value: &str) -> Option<String> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        None
    } else {
        Some(trimmed.to_string())
    }
}
