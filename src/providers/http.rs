//! Shared HTTP client for provider dispatchers
//!
//! One request, one response: there is no retry executor here. Non-success
//! statuses are mapped onto [`PollError`] with the provider's own error code
//! preserved when the body carries one.

use crate::error::{PollError, PollResult};
use crate::logging::{log_debug, log_error};
use reqwest::header::{HeaderMap, HeaderValue, AUTHORIZATION, CONTENT_TYPE};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Thin wrapper over `reqwest::Client` with provider error mapping
#[derive(Debug, Clone)]
pub struct HttpClient {
    client: reqwest::Client,
    timeout: Duration,
}

impl HttpClient {
    /// Build a client whose requests give up after `timeout`
    ///
    /// # Errors
    ///
    /// Returns [`PollError::ConfigurationError`] if the TLS backend cannot be
    /// initialised.
    pub fn new(timeout: Duration) -> PollResult<Self> {
        let client = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| {
                PollError::configuration_error(format!("Failed to build HTTP client: {e}"))
            })?;
        Ok(Self { client, timeout })
    }

    /// Headers for bearer-token APIs (OpenAI-compatible)
    pub fn bearer_headers(api_key: &str) -> PollResult<HeaderMap> {
        let mut headers = HeaderMap::new();

        headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));
        headers.insert(
            AUTHORIZATION,
            HeaderValue::from_str(&format!("Bearer {}", api_key.trim())).map_err(|e| {
                PollError::configuration_error(format!("Invalid API key format: {e}"))
            })?,
        );

        Ok(headers)
    }

    /// POST `body` as JSON to `url` and decode the JSON answer
    pub async fn post_json<B, R>(&self, url: &str, headers: &HeaderMap, body: &B) -> PollResult<R>
    where
        B: Serialize + ?Sized + Sync,
        R: DeserializeOwned,
    {
        log_debug!(url = %url, "Sending provider request");

        let response = self
            .client
            .post(url)
            .headers(headers.clone())
            .json(body)
            .send()
            .await
            .map_err(|e| self.transport_error(url, e))?;

        if !response.status().is_success() {
            return Err(handle_error_response(response).await);
        }

        parse_success_response(response).await
    }

    fn transport_error(&self, url: &str, error: reqwest::Error) -> PollError {
        log_error!(
            url = %url,
            error = %error,
            "HTTP request failed"
        );
        if error.is_timeout() {
            return PollError::timeout(self.timeout.as_secs());
        }
        PollError::request_failed(error.to_string(), None, Some(Box::new(error)))
    }
}

/// Error envelope shared by OpenAI-compatible and Anthropic APIs.
///
/// `code` may be a string (OpenAI, xAI) or a number (Gemini).
#[derive(Debug, Default, Deserialize)]
struct ErrorEnvelope {
    #[serde(default)]
    error: Option<ErrorBody>,
}

#[derive(Debug, Default, Deserialize)]
struct ErrorBody {
    #[serde(default)]
    message: Option<String>,
    #[serde(default)]
    code: Option<serde_json::Value>,
    #[serde(default, rename = "type")]
    kind: Option<String>,
}

/// Details pulled out of a provider error body
#[derive(Debug, Default, PartialEq)]
pub(crate) struct ProviderErrorDetails {
    pub message: Option<String>,
    pub code: Option<String>,
}

/// Extract message and native code from an error body.
///
/// Gemini wraps the envelope in a one-element array; both forms are accepted.
/// `error.code` wins over `error.type`.
pub(crate) fn parse_error_details(body: &str) -> ProviderErrorDetails {
    let envelope = serde_json::from_str::<serde_json::Value>(body)
        .ok()
        .map(|value| match value {
            serde_json::Value::Array(items) => items.into_iter().next().unwrap_or_default(),
            other => other,
        })
        .and_then(|value| serde_json::from_value::<ErrorEnvelope>(value).ok());

    let Some(error) = envelope.and_then(|e| e.error) else {
        return ProviderErrorDetails::default();
    };

    let code = match error.code {
        Some(serde_json::Value::String(s)) if !s.is_empty() => Some(s),
        Some(serde_json::Value::Number(n)) => Some(n.to_string()),
        _ => None,
    }
    .or(error.kind.filter(|k| !k.is_empty()));

    ProviderErrorDetails {
        message: error.message,
        code,
    }
}

/// Handle non-success HTTP responses
async fn handle_error_response(response: reqwest::Response) -> PollError {
    let status = response.status();
    let headers = response.headers().clone();
    let error_text = response
        .text()
        .await
        .unwrap_or_else(|_| "Unknown error".to_string());

    log_error!(
        status = %status,
        error_text = %error_text,
        "API error response"
    );

    let details = parse_error_details(&error_text);
    let message = details.message.unwrap_or(error_text);

    match status.as_u16() {
        401 | 403 => {
            PollError::authentication_failed(format!("API error {status}: {message}"), details.code)
        }
        429 => {
            let retry_after_seconds = headers
                .get("retry-after")
                .and_then(|h| h.to_str().ok())
                .and_then(|s| s.parse::<u64>().ok())
                .unwrap_or(60);

            PollError::rate_limit_exceeded(retry_after_seconds, details.code)
        }
        _ => PollError::request_failed(format!("API error {status}: {message}"), details.code, None),
    }
}

/// Parse a successful HTTP response body
async fn parse_success_response<R: DeserializeOwned>(response: reqwest::Response) -> PollResult<R> {
    let raw_body = response.text().await.map_err(|e| {
        log_error!(
            error = %e,
            "Failed to read response body"
        );
        PollError::response_parsing_error(format!("Failed to read response: {e}"))
    })?;

    serde_json::from_str(&raw_body).map_err(|e| {
        log_error!(
            error = %e,
            raw_body = %raw_body,
            "Failed to parse response"
        );
        PollError::response_parsing_error(format!("Invalid response: {e}"))
    })
}
