//! Fan-out orchestrator
//!
//! Two phases over an injected target list:
//!
//! 1. recency check for every target, concurrently; skipped targets drop out
//! 2. dispatch and persist the remaining targets, concurrently
//!
//! `join_all` keeps results in registration order while the futures complete
//! in any order. A failed dispatch is captured in its own [`CallResult`] and
//! never aborts the batch.

use crate::core_types::{CallResult, Provider, ProviderTarget};
use crate::error::PollError;
use crate::logging::{log_error, log_info, log_warn};
use crate::providers::DispatcherSet;
use crate::storage::ResultStore;
use futures_util::future::join_all;
use std::path::PathBuf;
use std::sync::Arc;

/// A result that was dispatched but could not be stored
#[derive(Debug)]
pub struct PersistFailure {
    pub provider: Provider,
    pub model: String,
    pub error: PollError,
}

/// Outcome of one orchestrated run
#[derive(Debug, Default)]
pub struct RunReport {
    /// Dispatched results in registration order
    pub results: Vec<CallResult>,
    /// `(provider, model)` of targets skipped by the recency check
    pub skipped: Vec<(Provider, String)>,
    /// Where each stored result was written
    pub saved: Vec<PathBuf>,
    pub persist_failures: Vec<PersistFailure>,
}

impl RunReport {
    pub fn is_clean(&self) -> bool {
        self.persist_failures.is_empty()
    }
}

/// Runs recency checks, dispatch and persistence across targets
pub struct Orchestrator {
    store: Arc<dyn ResultStore>,
    dispatchers: DispatcherSet,
}

impl Orchestrator {
    pub fn new(store: Arc<dyn ResultStore>, dispatchers: DispatcherSet) -> Self {
        Self { store, dispatchers }
    }

    /// Poll every target that has no fresh successful result
    pub async fn run_all(&self, targets: &[ProviderTarget]) -> RunReport {
        let selection = self.select_due(targets).await;

        log_info!(
            due = selection.due.len(),
            total = targets.len(),
            "Running providers"
        );

        self.execute(selection).await
    }

    /// Same as [`run_all`](Self::run_all), restricted to one provider and,
    /// optionally, a subset of its models
    pub async fn run_for_provider(
        &self,
        targets: &[ProviderTarget],
        provider: Provider,
        models: Option<&[String]>,
    ) -> RunReport {
        let selected: Vec<ProviderTarget> = targets
            .iter()
            .filter(|t| t.matches(provider, models))
            .cloned()
            .collect();

        if selected.is_empty() {
            log_warn!(provider = %provider, "No registered targets match");
            return RunReport::default();
        }

        let selection = self.select_due(&selected).await;
        log_info!(
            provider = %provider,
            due = selection.due.len(),
            total = selected.len(),
            "Running providers"
        );

        self.execute(selection).await
    }

    /// Phase one: recency checks. Returns targets to run and those skipped.
    async fn select_due<'a>(&self, targets: &'a [ProviderTarget]) -> Selection<'a> {
        let checks = targets.iter().map(|target| async move {
            let skip = self.store.has_recent_success(target).await;
            if skip {
                log_info!(
                    provider = %target.provider,
                    model = %target.model,
                    "Skipping, already run within the recency window"
                );
            }
            (target, skip)
        });

        let mut selection = Selection::default();
        for (target, skip) in join_all(checks).await {
            if skip {
                selection.skipped.push((target.provider, target.model.clone()));
            } else {
                selection.due.push(target);
            }
        }
        selection
    }

    /// Phase two: dispatch and persist each due target
    async fn execute(&self, selection: Selection<'_>) -> RunReport {
        let mut report = RunReport {
            skipped: selection.skipped,
            ..RunReport::default()
        };

        if selection.due.is_empty() {
            log_info!("No providers to run, all have fresh results");
            return report;
        }

        let runs = selection.due.into_iter().map(|target| self.run_target(target));
        for (result, stored) in join_all(runs).await {
            match stored {
                Ok(path) => report.saved.push(path),
                Err(error) => report.persist_failures.push(PersistFailure {
                    provider: result.target.provider,
                    model: result.target.model.clone(),
                    error,
                }),
            }
            report.results.push(result);
        }

        report
    }

    async fn run_target(&self, target: &ProviderTarget) -> (CallResult, Result<PathBuf, PollError>) {
        let mut result = self.dispatchers.dispatch(target).await;
        let stored = self.store.persist(&mut result).await;
        if let Err(error) = &stored {
            log_error!(
                provider = %target.provider,
                model = %target.model,
                error = %error,
                "Failed to persist result"
            );
        }
        (result, stored)
    }
}

#[derive(Default)]
struct Selection<'a> {
    due: Vec<&'a ProviderTarget>,
    skipped: Vec<(Provider, String)>,
}

/// First target for `provider`, optionally pinned to `model`
pub fn find_target<'a>(
    targets: &'a [ProviderTarget],
    provider: Provider,
    model: Option<&str>,
) -> Option<&'a ProviderTarget> {
    targets.iter().find(|t| {
        t.provider == provider && model.map_or(true, |m| t.model.eq_ignore_ascii_case(m))
    })
}

/// Targets that cannot be dispatched because their credential is missing.
///
/// They still run and record `NO_API_KEY`; this is a pre-flight report.
pub fn targets_without_credentials(targets: &[ProviderTarget]) -> Vec<&ProviderTarget> {
    let missing: Vec<&ProviderTarget> = targets.iter().filter(|t| !t.has_credential()).collect();
    for target in &missing {
        log_warn!(
            provider = %target.provider,
            model = %target.model,
            "Not available: no API key"
        );
    }
    missing
}
