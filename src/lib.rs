//! # llm-poller
//!
//! Recency-gated fan-out poller for LLM providers (xAI, OpenAI, Anthropic,
//! Gemini).
//!
//! ## Key Features
//!
//! - **Fan-out**: every registered target is dispatched concurrently
//! - **Recency gate**: targets with a fresh successful result are skipped
//! - **Failure capture**: errors are recorded per target, never abort the run
//! - **Flat-file results**: one JSON record per (provider, model, UTC day)
//!
//! ## Example
//!
//! ```rust,no_run
//! use llm_poller::{Credentials, DispatcherSet, FileStore, Orchestrator, PollerConfig, Registry};
//! use std::sync::Arc;
//!
//! # async fn example() -> anyhow::Result<()> {
//! let config = PollerConfig::from_env()?;
//! let registry = Registry::builtin(&Credentials::from_env());
//!
//! let orchestrator = Orchestrator::new(
//!     Arc::new(FileStore::from_config(&config)),
//!     DispatcherSet::from_config(&config)?,
//! );
//! let report = orchestrator.run_all(registry.targets()).await;
//! println!("{} dispatched, {} skipped", report.results.len(), report.skipped.len());
//! # Ok(())
//! # }
//! ```

// Allow missing errors documentation - errors are self-documenting via type signatures
#![allow(clippy::missing_errors_doc)]

pub mod core_types;

// Logging utilities (re-exports tracing with log_* naming) - internal only
pub(crate) mod logging;

pub mod config;
pub mod error;
pub mod orchestrator;
pub mod providers;
pub mod registry;
pub mod storage;

#[cfg(test)]
pub mod tests;

pub use config::{Credentials, PollerConfig};
pub use error::{codes, ErrorCategory, ErrorSeverity, PollError, PollResult};
pub use logging::init_tracing;
pub use orchestrator::{
    find_target, targets_without_credentials, Orchestrator, PersistFailure, RunReport,
};
pub use providers::{
    dispatch, AnthropicDispatcher, ChatCompletionsDispatcher, Dispatcher, DispatcherSet,
    HttpClient,
};
pub use registry::{Registry, EXTRACTION_PROMPTS};
pub use storage::{Clock, FileStore, FixedClock, ResultStore, SystemClock};

pub use core_types::{
    CallError, CallResult, OutputEntry, PromptPair, Provider, ProviderFamily, ProviderTarget,
    NO_RESPONSE,
};
