//! Provider Tests Module
//!
//! Unit tests for the dispatch layer. HTTP round trips against a mock server
//! live in the `tests/` integration suite; here we cover request shapes,
//! error-body parsing and the dispatch wrapper.
//!
//! - `chat_completions` - OpenAI-compatible request building and response normalization
//! - `error_details` - provider error envelope parsing
//! - `dispatch` - credential gate, error capture and family routing

mod error_details;
