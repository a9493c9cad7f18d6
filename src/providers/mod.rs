//! Dispatch layer
//!
//! A [`Dispatcher`] performs exactly one request/response round trip for a
//! target and returns the completion text. Implementations are grouped by
//! [`ProviderFamily`]:
//!
//! ```text
//! http.rs              <- shared reqwest client and error mapping
//!    |          |
//! openai_compat.rs   anthropic/   <- one Dispatcher per family
//! ```
//!
//! [`dispatch`] wraps a dispatcher with the credential check and error
//! capture, so it always yields a [`CallResult`].

pub mod anthropic;
pub mod http;
pub mod openai_compat;

#[cfg(test)]
mod tests;

use crate::config::PollerConfig;
use crate::core_types::{CallError, CallResult, ProviderFamily, ProviderTarget};
use crate::error::{PollError, PollResult};
use crate::logging::{log_info, log_warn};
use chrono::Utc;
use std::collections::HashMap;
use std::sync::Arc;

pub use anthropic::AnthropicDispatcher;
pub use http::HttpClient;
pub use openai_compat::ChatCompletionsDispatcher;

/// One provider family's request construction and response normalization
#[async_trait::async_trait]
pub trait Dispatcher: Send + Sync {
    /// Family this dispatcher serves
    fn family(&self) -> ProviderFamily;

    /// Send the target's prompts and return the first textual completion.
    ///
    /// Called once per target; implementations must not retry.
    async fn complete(&self, target: &ProviderTarget) -> PollResult<String>;
}

/// Run one dispatch attempt and capture its outcome.
///
/// An empty credential yields a `NO_API_KEY` result without touching the
/// dispatcher. Any dispatcher error becomes a failed result.
pub async fn dispatch(dispatcher: &dyn Dispatcher, target: &ProviderTarget) -> CallResult {
    if let Some(rejected) = reject_without_credential(target) {
        return rejected;
    }

    let timestamp = Utc::now();
    match dispatcher.complete(target).await {
        Ok(content) => {
            log_info!(
                provider = %target.provider,
                model = %target.model,
                chars = content.len(),
                "Provider responded"
            );
            CallResult::success(target.clone(), content, timestamp)
        }
        Err(error) => {
            log_warn!(
                provider = %target.provider,
                model = %target.model,
                category = ?error.category(),
                error = %error,
                "Provider call failed"
            );
            CallResult::failure(
                target.clone(),
                CallError::from_poll_error(&error, timestamp),
            )
        }
    }
}

/// `NO_API_KEY` result for a target without a credential
fn reject_without_credential(target: &ProviderTarget) -> Option<CallResult> {
    if target.has_credential() {
        return None;
    }
    log_warn!(
        provider = %target.provider,
        model = %target.model,
        "No API key, skipping API call"
    );
    Some(CallResult::failure(
        target.clone(),
        CallError::missing_credential(Utc::now()),
    ))
}

/// Dispatchers keyed by provider family
#[derive(Clone, Default)]
pub struct DispatcherSet {
    dispatchers: HashMap<ProviderFamily, Arc<dyn Dispatcher>>,
}

impl DispatcherSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a dispatcher, replacing any previous one for its family
    pub fn with(mut self, dispatcher: Arc<dyn Dispatcher>) -> Self {
        self.dispatchers.insert(dispatcher.family(), dispatcher);
        self
    }

    /// The production set: chat completions plus Anthropic messages
    pub fn from_config(config: &PollerConfig) -> PollResult<Self> {
        let http = HttpClient::new(config.request_timeout)?;
        Ok(Self::new()
            .with(Arc::new(ChatCompletionsDispatcher::new(http.clone())))
            .with(Arc::new(AnthropicDispatcher::new(http, config.max_tokens))))
    }

    /// Dispatcher serving the target's provider
    pub fn for_target(&self, target: &ProviderTarget) -> PollResult<Arc<dyn Dispatcher>> {
        self.dispatchers
            .get(&target.provider.family())
            .cloned()
            .ok_or_else(|| PollError::unsupported_provider(target.provider.as_str()))
    }

    /// Select the dispatcher for `target` and run [`dispatch`]
    pub async fn dispatch(&self, target: &ProviderTarget) -> CallResult {
        if let Some(rejected) = reject_without_credential(target) {
            return rejected;
        }
        match self.for_target(target) {
            Ok(dispatcher) => dispatch(dispatcher.as_ref(), target).await,
            Err(error) => CallResult::failure(
                target.clone(),
                CallError::from_poll_error(&error, Utc::now()),
            ),
        }
    }
}

impl std::fmt::Debug for DispatcherSet {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("DispatcherSet")
            .field("families", &self.dispatchers.keys().collect::<Vec<_>>())
            .finish()
    }
}
