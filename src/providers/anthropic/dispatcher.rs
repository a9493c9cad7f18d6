//! Anthropic dispatcher implementation

use super::conversion::{self, SystemPlacement};
use super::types::AnthropicResponse;
use crate::core_types::{ProviderFamily, ProviderTarget};
use crate::error::{PollError, PollResult};
use crate::logging::log_debug;
use crate::providers::http::HttpClient;
use crate::providers::Dispatcher;
use reqwest::header::{HeaderMap, HeaderValue, CONTENT_TYPE};

const ANTHROPIC_VERSION: &str = "2023-06-01";

/// Dispatcher for the [`ProviderFamily::Messages`] family
#[derive(Debug, Clone)]
pub struct AnthropicDispatcher {
    http: HttpClient,
    max_tokens: u32,
    placement: SystemPlacement,
}

impl AnthropicDispatcher {
    pub fn new(http: HttpClient, max_tokens: u32) -> Self {
        Self {
            http,
            max_tokens,
            placement: SystemPlacement::default(),
        }
    }

    /// Send the system instruction inside the first user turn instead of the
    /// `system` field
    pub fn with_system_placement(mut self, placement: SystemPlacement) -> Self {
        self.placement = placement;
        self
    }

    fn build_headers(api_key: &str) -> PollResult<HeaderMap> {
        let mut headers = HeaderMap::new();
        headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));
        headers.insert(
            "x-api-key",
            HeaderValue::from_str(api_key.trim()).map_err(|e| {
                PollError::configuration_error(format!("Invalid API key format: {e}"))
            })?,
        );
        headers.insert("anthropic-version", HeaderValue::from_static(ANTHROPIC_VERSION));
        Ok(headers)
    }
}

#[async_trait::async_trait]
impl Dispatcher for AnthropicDispatcher {
    fn family(&self) -> ProviderFamily {
        ProviderFamily::Messages
    }

    async fn complete(&self, target: &ProviderTarget) -> PollResult<String> {
        let url = format!("{}/v1/messages", target.resolved_endpoint());
        let headers = Self::build_headers(&target.credential)?;
        let request = conversion::build_request(target, self.max_tokens, self.placement);

        log_debug!(
            provider = "anthropic",
            model = %target.model,
            has_system_field = request.system.is_some(),
            "Sending Anthropic messages request"
        );

        let response: AnthropicResponse = self.http.post_json(&url, &headers, &request).await?;
        Ok(conversion::extract_text(response))
    }
}
