//! Outcome of a single dispatch attempt

use crate::core_types::target::ProviderTarget;
use crate::error::{codes, PollError};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Placeholder text recorded when a provider answers without any completion
pub const NO_RESPONSE: &str = "No response returned";

/// One completion returned by the provider
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OutputEntry {
    pub timestamp: DateTime<Utc>,
    pub content: String,
}

/// Why a dispatch produced no usable output
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CallError {
    pub timestamp: DateTime<Utc>,
    pub message: String,
    /// `NO_API_KEY`, `API_ERROR` or a provider-native code
    pub code: String,
}

impl CallError {
    pub fn missing_credential(timestamp: DateTime<Utc>) -> Self {
        Self {
            timestamp,
            message: "No API key provided".to_string(),
            code: codes::NO_API_KEY.to_string(),
        }
    }

    pub fn from_poll_error(error: &PollError, timestamp: DateTime<Utc>) -> Self {
        Self {
            timestamp,
            message: error.to_string(),
            code: error.classification().to_string(),
        }
    }
}

/// Result of one dispatch attempt against a [`ProviderTarget`].
///
/// Either `outputs` is non-empty or `error` is set, never both; the two
/// constructors are the only way to build one. `hash` stays empty until the
/// result is persisted.
#[derive(Debug, Clone, PartialEq)]
pub struct CallResult {
    pub target: ProviderTarget,
    pub outputs: Vec<OutputEntry>,
    pub error: Option<CallError>,
    pub hash: String,
    pub timestamp: DateTime<Utc>,
}

impl CallResult {
    pub fn success(target: ProviderTarget, content: String, timestamp: DateTime<Utc>) -> Self {
        Self {
            target,
            outputs: vec![OutputEntry { timestamp, content }],
            error: None,
            hash: String::new(),
            timestamp,
        }
    }

    pub fn failure(target: ProviderTarget, error: CallError) -> Self {
        let timestamp = error.timestamp;
        Self {
            target,
            outputs: Vec::new(),
            error: Some(error),
            hash: String::new(),
            timestamp,
        }
    }

    pub fn is_success(&self) -> bool {
        !self.outputs.is_empty() && self.error.is_none()
    }

    /// Classification code of the error, if the call failed
    pub fn error_code(&self) -> Option<&str> {
        self.error.as_ref().map(|e| e.code.as_str())
    }
}
