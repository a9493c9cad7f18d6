//! Provider targets: one (provider, model, prompt-set) unit of work.

use crate::error::PollError;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// LLM vendors the poller knows how to reach
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Provider {
    Xai,
    OpenAI,
    Anthropic,
    Gemini,
}

/// Request/response shape a provider speaks.
///
/// Dispatchers are selected by family, so every OpenAI-compatible vendor
/// shares one implementation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ProviderFamily {
    /// `POST {endpoint}/chat/completions` with system/user roles
    ChatCompletions,
    /// Anthropic Messages API, system instruction in a dedicated field
    Messages,
}

impl Provider {
    pub const ALL: [Provider; 4] = [
        Provider::Xai,
        Provider::OpenAI,
        Provider::Anthropic,
        Provider::Gemini,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Provider::Xai => "xai",
            Provider::OpenAI => "openai",
            Provider::Anthropic => "anthropic",
            Provider::Gemini => "gemini",
        }
    }

    pub fn family(&self) -> ProviderFamily {
        match self {
            Provider::Anthropic => ProviderFamily::Messages,
            Provider::Xai | Provider::OpenAI | Provider::Gemini => ProviderFamily::ChatCompletions,
        }
    }

    /// Base URL used when a target does not override it
    pub fn default_endpoint(&self) -> &'static str {
        match self {
            Provider::Xai => "https://api.x.ai/v1",
            Provider::OpenAI => "https://api.openai.com/v1",
            Provider::Anthropic => "https://api.anthropic.com",
            Provider::Gemini => "https://generativelanguage.googleapis.com/v1beta/openai",
        }
    }
}

impl fmt::Display for Provider {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Provider {
    type Err = PollError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "xai" | "grok" => Ok(Provider::Xai),
            "openai" => Ok(Provider::OpenAI),
            "anthropic" => Ok(Provider::Anthropic),
            "gemini" => Ok(Provider::Gemini),
            other => Err(PollError::unsupported_provider(other)),
        }
    }
}

/// A system/user prompt pair sent to the provider
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PromptPair {
    #[serde(rename = "systemPrompt")]
    pub system_prompt: String,
    #[serde(rename = "userPrompt")]
    pub user_prompt: String,
    /// When the pair was registered
    pub timestamp: DateTime<Utc>,
}

impl PromptPair {
    pub fn new(system_prompt: impl Into<String>, user_prompt: impl Into<String>) -> Self {
        Self {
            system_prompt: system_prompt.into(),
            user_prompt: user_prompt.into(),
            timestamp: Utc::now(),
        }
    }
}

/// Immutable description of one unit of work.
///
/// Built once at startup from the registry. `Debug` never prints the
/// credential.
#[derive(Clone, PartialEq)]
pub struct ProviderTarget {
    pub provider: Provider,
    pub model: String,
    /// Static secret; empty means unavailable
    pub credential: String,
    /// Overrides [`Provider::default_endpoint`]
    pub endpoint: Option<String>,
    pub inputs: Vec<PromptPair>,
}

impl ProviderTarget {
    pub fn new(
        provider: Provider,
        model: impl Into<String>,
        credential: impl Into<String>,
        inputs: Vec<PromptPair>,
    ) -> Self {
        Self {
            provider,
            model: model.into(),
            credential: credential.into(),
            endpoint: None,
            inputs,
        }
    }

    pub fn with_endpoint(mut self, endpoint: impl Into<String>) -> Self {
        self.endpoint = Some(endpoint.into());
        self
    }

    pub fn has_credential(&self) -> bool {
        !self.credential.trim().is_empty()
    }

    /// Base URL for requests, without a trailing slash
    pub fn resolved_endpoint(&self) -> &str {
        self.endpoint
            .as_deref()
            .unwrap_or_else(|| self.provider.default_endpoint())
            .trim_end_matches('/')
    }

    /// True when this target belongs to `provider` and, if given, one of `models`
    pub fn matches(&self, provider: Provider, models: Option<&[String]>) -> bool {
        self.provider == provider
            && models.map_or(true, |models| {
                models.iter().any(|m| m.eq_ignore_ascii_case(&self.model))
            })
    }
}

impl fmt::Debug for ProviderTarget {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ProviderTarget")
            .field("provider", &self.provider)
            .field("model", &self.model)
            .field("has_credential", &self.has_credential())
            .field("endpoint", &self.endpoint)
            .field("inputs", &self.inputs.len())
            .finish()
    }
}
