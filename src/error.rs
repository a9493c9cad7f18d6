//! Error types for polling operations.
//!
//! [`PollError`] covers every failure the poller can hit:
//! - Configuration errors (bad environment values, unreadable registry files)
//! - Request failures (network issues, provider errors, auth, rate limits)
//! - Storage failures while persisting a result
//!
//! Dispatch failures never escape a single target: they are folded into that
//! target's [`CallResult`](crate::CallResult) with a classification code (see
//! [`PollError::code`] and [`codes`]). Only storage and bootstrap errors are
//! reported to the caller as `Err`.
//!
//! # Example
//!
//! ```rust
//! use llm_poller::{PollError, codes};
//!
//! let err = PollError::request_failed("API error 500: boom", None, None);
//! assert_eq!(err.classification(), codes::API_ERROR);
//! ```

use crate::logging::{log_error, log_warn};
use std::path::PathBuf;
use thiserror::Error;

/// Classification codes written into a record's `error.code` field.
pub mod codes {
    /// The target had no credential; no request was made.
    pub const NO_API_KEY: &str = "NO_API_KEY";
    /// Generic dispatch failure when the provider supplied no code of its own.
    pub const API_ERROR: &str = "API_ERROR";
}

/// High-level categorization of errors for routing and handling decisions.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    /// External service failures (LLM providers, network issues).
    External,

    /// Internal failures (local storage, serialization).
    Internal,

    /// Client errors (invalid configuration, authentication).
    Client,

    /// Temporary failures such as rate limits and timeouts.
    Transient,
}

/// Severity level for logging decisions.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorSeverity {
    /// Action failed; the run may still be able to continue.
    Error,

    /// Unexpected but recoverable situation.
    Warning,
}

/// Convenient result type for poller operations.
pub type PollResult<T> = std::result::Result<T, PollError>;

/// Errors that can occur while polling providers.
///
/// Use the constructor methods, which log the error at creation:
///
/// ```rust
/// use llm_poller::PollError;
///
/// let err = PollError::configuration_error("POLLER_RECENCY_HOURS must be a number");
/// let err = PollError::rate_limit_exceeded(60, Some("rate_limit_exceeded".to_string()));
/// ```
///
/// | Variant | Category | Code |
/// |---------|----------|------|
/// | `UnsupportedProvider` | Client | `API_ERROR` |
/// | `ConfigurationError` | Client | `API_ERROR` |
/// | `RequestFailed` | External | provider code or `API_ERROR` |
/// | `ResponseParsingError` | External | `API_ERROR` |
/// | `RateLimitExceeded` | Transient | provider code or `API_ERROR` |
/// | `Timeout` | Transient | `API_ERROR` |
/// | `AuthenticationFailed` | Client | provider code or `API_ERROR` |
/// | `Storage` | Internal | n/a |
/// | `Serialization` | Internal | n/a |
#[derive(Error, Debug)]
pub enum PollError {
    /// No dispatcher is registered for the requested provider.
    #[error("Provider not supported: {provider}")]
    UnsupportedProvider {
        /// The provider name that was requested.
        provider: String,
    },

    /// Configuration is invalid or incomplete.
    #[error("Configuration error: {message}")]
    ConfigurationError {
        /// Description of the configuration problem.
        message: String,
    },

    /// The HTTP request failed, either in transport or with a non-success status.
    #[error("Request failed: {message}")]
    RequestFailed {
        /// Description of the failure.
        message: String,
        /// Provider-native error code, when the response carried one.
        code: Option<String>,
        /// The underlying error, if available.
        #[source]
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
    },

    /// The provider answered, but the body could not be parsed.
    #[error("Response parsing failed: {message}")]
    ResponseParsingError {
        /// Details about the parsing failure.
        message: String,
    },

    /// Provider rate limit exceeded.
    #[error("Rate limit exceeded, retry after {retry_after_seconds}s")]
    RateLimitExceeded {
        /// Wait time suggested by the provider.
        retry_after_seconds: u64,
        /// Provider-native error code, when the response carried one.
        code: Option<String>,
    },

    /// The network layer gave up waiting for the provider.
    #[error("Request timed out after {timeout_seconds}s")]
    Timeout {
        /// The timeout duration that was exceeded.
        timeout_seconds: u64,
    },

    /// Authentication with the provider failed.
    #[error("Authentication failed: {message}")]
    AuthenticationFailed {
        /// Details about the authentication failure.
        message: String,
        /// Provider-native error code, when the response carried one.
        code: Option<String>,
    },

    /// Reading or writing the results tree failed.
    #[error("Storage error at {}: {source}", path.display())]
    Storage {
        /// The file or directory involved.
        path: PathBuf,
        /// The underlying I/O error.
        #[source]
        source: std::io::Error,
    },

    /// A record could not be serialized.
    #[error("Serialization failed: {source}")]
    Serialization {
        /// The underlying serde error.
        #[source]
        source: serde_json::Error,
    },
}

impl PollError {
    /// Get the error category for routing and handling decisions.
    pub fn category(&self) -> ErrorCategory {
        match self {
            Self::UnsupportedProvider { .. } => ErrorCategory::Client,
            Self::ConfigurationError { .. } => ErrorCategory::Client,
            Self::RequestFailed { .. } => ErrorCategory::External,
            Self::ResponseParsingError { .. } => ErrorCategory::External,
            Self::RateLimitExceeded { .. } => ErrorCategory::Transient,
            Self::Timeout { .. } => ErrorCategory::Transient,
            Self::AuthenticationFailed { .. } => ErrorCategory::Client,
            Self::Storage { .. } => ErrorCategory::Internal,
            Self::Serialization { .. } => ErrorCategory::Internal,
        }
    }

    /// Get the error severity for logging.
    pub fn severity(&self) -> ErrorSeverity {
        match self {
            Self::ResponseParsingError { .. }
            | Self::RateLimitExceeded { .. }
            | Self::Timeout { .. } => ErrorSeverity::Warning,
            _ => ErrorSeverity::Error,
        }
    }

    /// Provider-native error code carried by this error, if any.
    pub fn code(&self) -> Option<&str> {
        match self {
            Self::RequestFailed { code, .. }
            | Self::RateLimitExceeded { code, .. }
            | Self::AuthenticationFailed { code, .. } => code.as_deref(),
            _ => None,
        }
    }

    /// Code recorded in a failed result: the provider's own code, else `API_ERROR`.
    pub fn classification(&self) -> &str {
        self.code().unwrap_or(codes::API_ERROR)
    }

    // =========================================================================
    // Constructor methods with automatic logging
    // =========================================================================

    pub fn unsupported_provider(provider: impl Into<String>) -> Self {
        let provider = provider.into();
        log_error!(
            provider = %provider,
            error_type = "unsupported_provider",
            "No dispatcher registered for provider"
        );
        Self::UnsupportedProvider { provider }
    }

    pub fn configuration_error(message: impl Into<String>) -> Self {
        let message = message.into();
        log_error!(
            error_type = "configuration_error",
            message = %message,
            "Poller configuration invalid"
        );
        Self::ConfigurationError { message }
    }

    pub fn request_failed(
        message: impl Into<String>,
        code: Option<String>,
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
    ) -> Self {
        let message = message.into();
        log_error!(
            error_type = "request_failed",
            message = %message,
            code = code.as_deref().unwrap_or("-"),
            has_source = source.is_some(),
            "Provider request failed"
        );
        Self::RequestFailed {
            message,
            code,
            source,
        }
    }

    pub fn response_parsing_error(message: impl Into<String>) -> Self {
        let message = message.into();
        log_warn!(
            error_type = "response_parsing_error",
            message = %message,
            "Provider response format invalid"
        );
        Self::ResponseParsingError { message }
    }

    pub fn rate_limit_exceeded(retry_after_seconds: u64, code: Option<String>) -> Self {
        log_warn!(
            error_type = "rate_limit_exceeded",
            retry_after_seconds = retry_after_seconds,
            "Provider rate limit exceeded"
        );
        Self::RateLimitExceeded {
            retry_after_seconds,
            code,
        }
    }

    pub fn timeout(timeout_seconds: u64) -> Self {
        log_warn!(
            error_type = "timeout",
            timeout_seconds = timeout_seconds,
            "Provider request timed out"
        );
        Self::Timeout { timeout_seconds }
    }

    pub fn authentication_failed(message: impl Into<String>, code: Option<String>) -> Self {
        let message = message.into();
        log_error!(
            error_type = "authentication_failed",
            message = %message,
            "Provider authentication failed"
        );
        Self::AuthenticationFailed { message, code }
    }

    pub fn storage(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        let path = path.into();
        log_error!(
            error_type = "storage",
            path = %path.display(),
            error = %source,
            "Results tree I/O failed"
        );
        Self::Storage { path, source }
    }

    pub fn serialization(source: serde_json::Error) -> Self {
        log_error!(
            error_type = "serialization",
            error = %source,
            "Record serialization failed"
        );
        Self::Serialization { source }
    }
}
