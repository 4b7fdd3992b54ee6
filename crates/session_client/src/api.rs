//! HTTP helpers for the JSON API with consistent timeouts and error
//! handling. Feature wrappers use these to avoid duplicating request setup
//! and to enforce a predictable timeout policy. The helpers do not store
//! tokens; callers attach the bearer credential per request.

use serde::{Serialize, de::DeserializeOwned};
use std::time::Duration;

use crate::errors::ClientError;

/// Default request timeout applied to all HTTP helpers.
const DEFAULT_TIMEOUT: Duration = Duration::from_secs(10);
/// Maximum number of error body characters surfaced to callers.
const MAX_ERROR_CHARS: usize = 200;

#[derive(Clone)]
pub struct ApiClient {
    http: reqwest::Client,
    base_url: String,
}

impl ApiClient {
    /// Build a client against `base_url`.
    ///
    /// # Errors
    ///
    /// Returns an error when the base URL is empty or the underlying HTTP
    /// client cannot be constructed.
    pub fn new(base_url: impl Into<String>) -> Result<Self, ClientError> {
        let base_url = base_url.into();
        if base_url.trim().is_empty() {
            return Err(ClientError::Config(
                "API base URL is not configured.".to_string(),
            ));
        }

        let http = reqwest::Client::builder()
            .timeout(DEFAULT_TIMEOUT)
            .build()
            .map_err(|err| ClientError::Config(format!("Failed to build HTTP client: {err}")))?;

        Ok(Self { http, base_url })
    }

    /// Fetch JSON, optionally with a bearer credential.
    ///
    /// # Errors
    ///
    /// Returns an error for network failures, timeouts, non-success
    /// statuses, or an undecodable body.
    pub async fn get_json<T: DeserializeOwned>(
        &self,
        path: &str,
        bearer: Option<&str>,
    ) -> Result<T, ClientError> {
        let request = with_bearer(self.http.get(self.url(path)), bearer);
        let response = request.send().await.map_err(map_request_error)?;
        handle_json_response(response).await
    }

    /// Post JSON and parse a JSON response.
    ///
    /// # Errors
    ///
    /// Same failure modes as [`ApiClient::get_json`].
    pub async fn post_json<B: Serialize, T: DeserializeOwned>(
        &self,
        path: &str,
        body: &B,
        bearer: Option<&str>,
    ) -> Result<T, ClientError> {
        let request = with_bearer(self.http.post(self.url(path)).json(body), bearer);
        let response = request.send().await.map_err(map_request_error)?;
        handle_json_response(response).await
    }

    /// Post an empty body and parse a JSON response, used for the refresh
    /// exchange where the bearer credential is the entire request.
    ///
    /// # Errors
    ///
    /// Same failure modes as [`ApiClient::get_json`].
    pub async fn post_empty<T: DeserializeOwned>(
        &self,
        path: &str,
        bearer: Option<&str>,
    ) -> Result<T, ClientError> {
        let request = with_bearer(self.http.post(self.url(path)), bearer);
        let response = request.send().await.map_err(map_request_error)?;
        handle_json_response(response).await
    }

    fn url(&self, path: &str) -> String {
        build_url_with_base(&self.base_url, path)
    }
}

fn with_bearer(builder: reqwest::RequestBuilder, bearer: Option<&str>) -> reqwest::RequestBuilder {
    match bearer {
        Some(token) => builder.bearer_auth(token),
        None => builder,
    }
}

/// Builds a URL from a base URL and the provided path.
fn build_url_with_base(base_url: &str, path: &str) -> String {
    let base = base_url.trim().trim_end_matches('/');
    let path = path.trim();

    if base.is_empty() {
        path.to_string()
    } else {
        format!("{}/{}", base, path.trim_start_matches('/'))
    }
}

/// Maps transport errors into `ClientError` variants with timeout detection.
fn map_request_error(err: reqwest::Error) -> ClientError {
    if err.is_timeout() {
        ClientError::Timeout("Request timed out. Please try again.".to_string())
    } else {
        ClientError::Network(format!("Unable to reach the server: {err}"))
    }
}

/// Parses JSON responses and surfaces HTTP errors with sanitized bodies.
async fn handle_json_response<T: DeserializeOwned>(
    response: reqwest::Response,
) -> Result<T, ClientError> {
    let status = response.status();
    if status.is_success() {
        response
            .json::<T>()
            .await
            .map_err(|err| ClientError::Parse(format!("Failed to decode response: {err}")))
    } else {
        let body = response.text().await.unwrap_or_default();
        Err(ClientError::Http {
            status: status.as_u16(),
            message: sanitize_body(body),
        })
    }
}

/// Sanitizes HTTP error bodies by trimming and truncating.
fn sanitize_body(body: String) -> String {
    let trimmed = body.trim();
    if trimmed.is_empty() {
        "Request failed.".to_string()
    } else {
        trimmed.chars().take(MAX_ERROR_CHARS).collect()
    }
}
