//! Anthropic Claude dispatcher
//!
//! Uses Anthropic's native Messages API, which keeps the system instruction
//! out of the message list.
//!
//! ## Module Organization
//!
//! - `types`: Request/response structures for the Anthropic API
//! - `conversion`: Prompt pairs to Anthropic request, response to text
//! - `dispatcher`: The [`Dispatcher`](crate::providers::Dispatcher) implementation

mod conversion;
mod dispatcher;
mod types;

#[cfg(test)]
mod tests;

pub use conversion::{build_request, SystemPlacement};
pub use dispatcher::AnthropicDispatcher;
pub use types::{AnthropicMessage, AnthropicRequest};
