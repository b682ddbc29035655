//! HTTP helpers for JSON APIs with consistent timeouts and error handling. Feature
//! clients use these helpers to avoid duplicating request setup and to keep a
//! predictable timeout policy. The helpers never log bodies; callers attach
//! credentials explicitly.

use super::{config::AppConfig, errors::AppError};
use reqwest::{Client, Method, RequestBuilder, Response, StatusCode};
use serde::{de::DeserializeOwned, Serialize};
use serde_json::Value;
use tracing::{debug, info_span, Instrument};
use url::Url;

/// Maximum number of error body characters surfaced to the UI.
const MAX_ERROR_CHARS: usize = 200;

/// JSON client bound to one base URL.
#[derive(Clone, Debug)]
pub struct ApiClient {
    http: Client,
    base_url: String,
}

impl ApiClient {
    /// Client for the backend REST API.
    ///
    /// # Errors
    /// Returns `AppError::Config` if the underlying HTTP client cannot be built.
    pub fn new(config: &AppConfig) -> Result<Self, AppError> {
        Self::with_base_url(config, &config.api_base_url)
    }

    /// Client for an explicit base URL, sharing the timeout policy of `config`.
    ///
    /// # Errors
    /// Returns `AppError::Config` if `base_url` is not an http(s) URL or the
    /// underlying HTTP client cannot be built.
    pub fn with_base_url(config: &AppConfig, base_url: &str) -> Result<Self, AppError> {
        validate_base_url(base_url)?;
        let http = Client::builder()
            .user_agent(crate::APP_USER_AGENT)
            .timeout(config.request_timeout)
            .build()
            .map_err(|err| AppError::Config(format!("Failed to build HTTP client: {err}")))?;

        Ok(Self {
            http,
            base_url: base_url.to_string(),
        })
    }

    #[must_use]
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Fetches JSON and fails on any non-success status.
    ///
    /// # Errors
    /// Returns an error on transport failure, non-success status, or undecodable body.
    pub async fn get_json<T: DeserializeOwned>(
        &self,
        path: &str,
        query: &[(&str, &str)],
    ) -> Result<T, AppError> {
        let request = self.request(Method::GET, path).query(query);
        let response = self.send(Method::GET, path, request).await?;
        handle_json_response(response).await
    }

    /// Fetches JSON and returns `None` on 404.
    ///
    /// # Errors
    /// Returns an error on transport failure, any other non-success status, or
    /// an undecodable body.
    pub async fn get_optional_json<T: DeserializeOwned>(
        &self,
        path: &str,
        query: &[(&str, &str)],
    ) -> Result<Option<T>, AppError> {
        let request = self.request(Method::GET, path).query(query);
        let response = self.send(Method::GET, path, request).await?;
        handle_optional_json_response(response).await
    }

    /// Posts JSON and parses a JSON response.
    ///
    /// # Errors
    /// Returns an error on transport failure, non-success status, or undecodable body.
    pub async fn post_json_response<B: Serialize + ?Sized, T: DeserializeOwned>(
        &self,
        path: &str,
        body: &B,
    ) -> Result<T, AppError> {
        let response = self.post_json_raw(path, &[], body).await?;
        handle_json_response(response).await
    }

    /// Puts JSON and parses a JSON response.
    ///
    /// # Errors
    /// Returns an error on transport failure, non-success status, or undecodable body.
    pub async fn put_json_response<B: Serialize + ?Sized, T: DeserializeOwned>(
        &self,
        path: &str,
        body: &B,
    ) -> Result<T, AppError> {
        let request = self.request(Method::PUT, path).json(body);
        let response = self.send(Method::PUT, path, request).await?;
        handle_json_response(response).await
    }

    /// Posts JSON and hands back the raw response for callers with their own
    /// error envelope.
    ///
    /// # Errors
    /// Returns an error only on transport failure.
    pub async fn post_json_raw<B: Serialize + ?Sized>(
        &self,
        path: &str,
        query: &[(&str, &str)],
        body: &B,
    ) -> Result<Response, AppError> {
        let request = self.request(Method::POST, path).query(query).json(body);
        self.send(Method::POST, path, request).await
    }

    /// Posts a url-encoded form and hands back the raw response.
    ///
    /// # Errors
    /// Returns an error only on transport failure.
    pub async fn post_form_raw<B: Serialize + ?Sized>(
        &self,
        path: &str,
        query: &[(&str, &str)],
        body: &B,
    ) -> Result<Response, AppError> {
        let request = self.request(Method::POST, path).query(query).form(body);
        self.send(Method::POST, path, request).await
    }

    fn request(&self, method: Method, path: &str) -> RequestBuilder {
        self.http
            .request(method, build_url_with_base(&self.base_url, path))
    }

    async fn send(
        &self,
        method: Method,
        path: &str,
        request: RequestBuilder,
    ) -> Result<Response, AppError> {
        let span = info_span!(
            "http.request",
            http.method = %method,
            url = %build_url_with_base(&self.base_url, path)
        );
        let response = request
            .send()
            .instrument(span)
            .await
            .map_err(map_request_error)?;
        debug!(status = response.status().as_u16(), path, "response received");
        Ok(response)
    }
}

fn validate_base_url(base_url: &str) -> Result<(), AppError> {
    let parsed = Url::parse(base_url.trim())
        .map_err(|err| AppError::Config(format!("Invalid base URL '{base_url}': {err}")))?;
    match parsed.scheme() {
        "http" | "https" => Ok(()),
        scheme => Err(AppError::Config(format!(
            "Unsupported scheme '{scheme}' in base URL '{base_url}'"
        ))),
    }
}

/// Builds a URL from an explicit base URL and the provided path.
pub(crate) fn build_url_with_base(base_url: &str, path: &str) -> String {
    let base = base_url.trim().trim_end_matches('/');
    let path = path.trim();

    if base.is_empty() {
        path.to_string()
    } else {
        format!("{}/{}", base, path.trim_start_matches('/'))
    }
}

/// Maps transport errors into user-facing `AppError` variants with timeout detection.
/// The URL is stripped because query strings may carry API keys.
fn map_request_error(err: reqwest::Error) -> AppError {
    let err = err.without_url();
    if err.is_timeout() {
        AppError::Timeout("Request timed out. Please try again.".to_string())
    } else if err.is_builder() {
        AppError::Serialization(format!("Failed to build request: {err}"))
    } else {
        AppError::Network(format!("Unable to reach the server: {err}"))
    }
}

/// Parses JSON responses and surfaces HTTP errors with sanitized bodies.
pub(crate) async fn handle_json_response<T: DeserializeOwned>(
    response: Response,
) -> Result<T, AppError> {
    if response.status().is_success() {
        response
            .json::<T>()
            .await
            .map_err(|err| AppError::Parse(format!("Failed to decode response: {err}")))
    } else {
        Err(http_error(response).await)
    }
}

/// Parses optional JSON responses and treats 404 as absent.
async fn handle_optional_json_response<T: DeserializeOwned>(
    response: Response,
) -> Result<Option<T>, AppError> {
    if response.status() == StatusCode::NOT_FOUND {
        return Ok(None);
    }
    handle_json_response(response).await.map(Some)
}

/// Converts a non-success response into `AppError::Http`.
pub(crate) async fn http_error(response: Response) -> AppError {
    let status = response.status().as_u16();
    let body = response.text().await.unwrap_or_default();
    AppError::Http {
        status,
        message: error_message(&body),
    }
}

/// Pulls `error` or `message` out of a JSON error body, falling back to the
/// sanitized text. Empty bodies yield an empty message.
fn error_message(body: &str) -> String {
    let from_json = serde_json::from_str::<Value>(body).ok().and_then(|value| {
        ["error", "message"].iter().find_map(|key| {
            value
                .get(key)
                .and_then(Value::as_str)
                .map(ToString::to_string)
        })
    });

    sanitize_body(from_json.as_deref().unwrap_or(body))
}

/// Sanitizes HTTP error bodies for user-facing messages by trimming and truncating.
fn sanitize_body(body: &str) -> String {
    body.trim().chars().take(MAX_ERROR_CHARS).collect()
}
