//! Prompt conversion into the Anthropic Messages format
//!
//! Anthropic has no `system` role inside `messages`. The first system
//! instruction goes into the dedicated `system` field; with
//! [`SystemPlacement::FirstTurn`] it is prepended to the first user turn
//! instead. System text of later prompt pairs is always folded into that
//! pair's user turn.

use super::types::{AnthropicContentBlock, AnthropicMessage, AnthropicRequest, AnthropicResponse};
use crate::core_types::{ProviderTarget, NO_RESPONSE};

/// Where the first system instruction is placed
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SystemPlacement {
    /// Dedicated top-level `system` field
    #[default]
    Field,
    /// Prepended to the first user turn
    FirstTurn,
}

/// Build the request body for a target
pub fn build_request(
    target: &ProviderTarget,
    max_tokens: u32,
    placement: SystemPlacement,
) -> AnthropicRequest {
    let mut system = None;
    let mut messages: Vec<AnthropicMessage> = Vec::new();

    for (index, pair) in target.inputs.iter().enumerate() {
        let has_system = !pair.system_prompt.trim().is_empty();
        let content = if index == 0 && has_system && placement == SystemPlacement::Field {
            system = Some(pair.system_prompt.clone());
            pair.user_prompt.clone()
        } else if has_system {
            format!("{}\n\n{}", pair.system_prompt, pair.user_prompt)
        } else {
            pair.user_prompt.clone()
        };

        push_user_turn(&mut messages, content);
    }

    AnthropicRequest {
        model: target.model.clone(),
        max_tokens,
        system,
        messages,
    }
}

/// Append a user turn, merging with a preceding user turn so roles alternate
fn push_user_turn(messages: &mut Vec<AnthropicMessage>, content: String) {
    match messages.last_mut() {
        Some(last) if last.role == "user" => {
            last.content.push_str("\n\n");
            last.content.push_str(&content);
        }
        _ => messages.push(AnthropicMessage {
            role: "user".to_string(),
            content,
        }),
    }
}

/// Join all text blocks, or the placeholder text when there are none
pub(super) fn extract_text(response: AnthropicResponse) -> String {
    let text = response
        .content
        .into_iter()
        .filter_map(|block| match block {
            AnthropicContentBlock::Text { text } => Some(text),
            AnthropicContentBlock::Other => None,
        })
        .collect::<Vec<_>>()
        .join("\n");

    if text.trim().is_empty() {
        NO_RESPONSE.to_string()
    } else {
        text
    }
}
