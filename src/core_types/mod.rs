//! Core types shared by every layer
//!
//! - `target` - providers, prompt pairs and the immutable unit of work
//! - `record` - the outcome of one dispatch attempt

pub mod record;
pub mod target;

pub use record::{CallError, CallResult, OutputEntry, NO_RESPONSE};
pub use target::{PromptPair, Provider, ProviderFamily, ProviderTarget};
