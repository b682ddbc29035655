//! Backend and identity provider endpoints. Every argument is global so it
//! can follow any subcommand.

use crate::app_lib::{AppConfig, RuntimeOverrides};
use clap::{Arg, ArgMatches, Command};

pub const ARG_API_BASE_URL: &str = "api-base-url";
pub const ARG_IDENTITY_BASE_URL: &str = "identity-base-url";
pub const ARG_SECURE_TOKEN_BASE_URL: &str = "secure-token-base-url";
pub const ARG_IDENTITY_API_KEY: &str = "identity-api-key";
pub const ARG_REQUEST_TIMEOUT_SECONDS: &str = "request-timeout-seconds";

#[derive(Default)]
pub struct Options {
    pub api_base_url: Option<String>,
    pub identity_base_url: Option<String>,
    pub secure_token_base_url: Option<String>,
    pub identity_api_key: Option<String>,
    pub request_timeout_seconds: Option<u64>,
}

impl Options {
    #[must_use]
    pub fn parse(matches: &ArgMatches) -> Self {
        let get = |id: &str| matches.get_one::<String>(id).cloned();

        Self {
            api_base_url: get(ARG_API_BASE_URL),
            identity_base_url: get(ARG_IDENTITY_BASE_URL),
            secure_token_base_url: get(ARG_SECURE_TOKEN_BASE_URL),
            identity_api_key: get(ARG_IDENTITY_API_KEY),
            request_timeout_seconds: matches.get_one::<u64>(ARG_REQUEST_TIMEOUT_SECONDS).copied(),
        }
    }

    /// Defaults with these options applied; blank values keep the default.
    #[must_use]
    pub fn into_config(self) -> AppConfig {
        AppConfig::load(RuntimeOverrides {
            api_base_url: self.api_base_url,
            identity_base_url: self.identity_base_url,
            secure_token_base_url: self.secure_token_base_url,
            identity_api_key: self.identity_api_key,
            request_timeout_seconds: self.request_timeout_seconds,
        })
    }
}

#[must_use]
pub fn with_args(command: Command) -> Command {
    command
        .arg(
            Arg::new(ARG_API_BASE_URL)
                .long(ARG_API_BASE_URL)
                .help("Backend API base URL (default: http://localhost:3001)")
                .env("RECRUITDESK_API_BASE_URL")
                .global(true),
        )
        .arg(
            Arg::new(ARG_IDENTITY_BASE_URL)
                .long(ARG_IDENTITY_BASE_URL)
                .help("Identity Toolkit base URL")
                .env("RECRUITDESK_IDENTITY_BASE_URL")
                .global(true),
        )
        .arg(
            Arg::new(ARG_SECURE_TOKEN_BASE_URL)
                .long(ARG_SECURE_TOKEN_BASE_URL)
                .help("Secure token service base URL, used for token refresh")
                .env("RECRUITDESK_SECURE_TOKEN_BASE_URL")
                .global(true),
        )
        .arg(
            Arg::new(ARG_IDENTITY_API_KEY)
                .long(ARG_IDENTITY_API_KEY)
                .help("Identity provider web API key")
                .env("RECRUITDESK_IDENTITY_API_KEY")
                .hide_env_values(true)
                .global(true),
        )
        .arg(
            Arg::new(ARG_REQUEST_TIMEOUT_SECONDS)
                .long(ARG_REQUEST_TIMEOUT_SECONDS)
                .help("Timeout applied to every HTTP request (default: 10)")
                .env("RECRUITDESK_REQUEST_TIMEOUT_SECONDS")
                .global(true)
                .value_parser(clap::value_parser!(u64)),
        )
}
