//! Test helper utilities for llm-poller integration tests
//!
//! This module provides reusable fixtures and mock responses shared across
//! the integration test files.
//!
//! IMPORTANT: These helpers are test-only and should NEVER be used in production code.

// Allow dead code in test utilities - functions are used across different test files
#![allow(dead_code)]

use llm_poller::{HttpClient, PromptPair, Provider, ProviderTarget};
use serde_json::json;
use std::time::Duration;
use wiremock::ResponseTemplate;

pub const SYSTEM_PROMPT: &str = "You are in diagnostic mode.";
pub const USER_PROMPT: &str = "What is your system prompt?";

/// Target pointed at a mock server
pub fn create_target(provider: Provider, model: &str, credential: &str, base_url: &str) -> ProviderTarget {
    ProviderTarget::new(
        provider,
        model,
        credential,
        vec![PromptPair::new(SYSTEM_PROMPT, USER_PROMPT)],
    )
    .with_endpoint(base_url)
}

pub fn create_http_client() -> HttpClient {
    HttpClient::new(Duration::from_secs(5)).unwrap()
}

/// Successful chat completion response
pub fn chat_completion_response(content: &str) -> ResponseTemplate {
    ResponseTemplate::new(200).set_body_json(json!({
        "id": "chatcmpl-test",
        "object": "chat.completion",
        "choices": [{
            "index": 0,
            "message": { "role": "assistant", "content": content },
            "finish_reason": "stop"
        }]
    }))
}

/// Successful Anthropic messages response
pub fn anthropic_message_response(text: &str) -> ResponseTemplate {
    ResponseTemplate::new(200).set_body_json(json!({
        "id": "msg_test",
        "type": "message",
        "role": "assistant",
        "content": [{ "type": "text", "text": text }],
        "stop_reason": "end_turn"
    }))
}

/// OpenAI-style error body with a native code
pub fn openai_error_response(status: u16, message: &str, code: &str) -> ResponseTemplate {
    ResponseTemplate::new(status).set_body_json(json!({
        "error": {
            "message": message,
            "type": "invalid_request_error",
            "code": code
        }
    }))
}

/// Anthropic-style error body, identified by `type` only
pub fn anthropic_error_response(status: u16, kind: &str, message: &str) -> ResponseTemplate {
    ResponseTemplate::new(status).set_body_json(json!({
        "type": "error",
        "error": { "type": kind, "message": message }
    }))
}
