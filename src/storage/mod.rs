//! Result storage
//!
//! The orchestrator talks to storage only through [`ResultStore`], so the flat
//! file tree ([`FileStore`]) can be swapped for another backend.
//!
//! Layout: `root/<provider>/<model>/<provider>_<model>_<YYYY-MM-DD>.json`,
//! one record per (provider, model, UTC day).

mod clock;
mod paths;
pub mod persist;
pub mod recency;

use crate::config::PollerConfig;
use crate::core_types::{CallResult, ProviderTarget};
use crate::error::PollResult;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::Duration;

pub use clock::{Clock, FixedClock, SystemClock};
pub use paths::{record_file_name, record_path, result_dir};
pub use persist::{content_hash, redact_credential, PersistedRecord};

/// Default recency window
pub const DEFAULT_WINDOW: Duration = Duration::from_secs(24 * 60 * 60);

/// Backing store for results and recency decisions
#[async_trait::async_trait]
pub trait ResultStore: Send + Sync {
    /// True when `target` already has a fresh successful result.
    ///
    /// Never fails: ambiguous or unreadable state answers `false`.
    async fn has_recent_success(&self, target: &ProviderTarget) -> bool;

    /// Fill in the result's hash and store it, returning where it went
    async fn persist(&self, result: &mut CallResult) -> PollResult<PathBuf>;
}

/// [`ResultStore`] over a directory tree of JSON records
#[derive(Debug, Clone)]
pub struct FileStore {
    root: PathBuf,
    clock: Arc<dyn Clock>,
    window: Duration,
}

impl FileStore {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self {
            root: root.into(),
            clock: Arc::new(SystemClock),
            window: DEFAULT_WINDOW,
        }
    }

    pub fn from_config(config: &PollerConfig) -> Self {
        Self::new(config.logs_dir.clone()).with_window(config.recency_window)
    }

    pub fn with_clock(mut self, clock: Arc<dyn Clock>) -> Self {
        self.clock = clock;
        self
    }

    pub fn with_window(mut self, window: Duration) -> Self {
        self.window = window;
        self
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Where today's record for `target` lives
    pub fn today_path(&self, target: &ProviderTarget) -> PathBuf {
        record_path(
            &self.root,
            target.provider,
            &target.model,
            self.clock.now().date_naive(),
        )
    }
}

#[async_trait::async_trait]
impl ResultStore for FileStore {
    async fn has_recent_success(&self, target: &ProviderTarget) -> bool {
        recency::has_recent_success(&self.root, target, self.clock.now(), self.window).await
    }

    async fn persist(&self, result: &mut CallResult) -> PollResult<PathBuf> {
        persist::write_record(&self.root, result, self.clock.now()).await
    }
}
