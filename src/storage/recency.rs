//! Recency cache: decide from the results tree whether a target can be skipped.
//!
//! At most one fresh attempt per day, with a trailing window fallback:
//!
//! 1. No result directory, or an empty one: run.
//! 2. Today's record exists: skip only if it holds output and no error.
//! 3. Otherwise inspect the most recently modified record: skip only if it is
//!    younger than the window and holds output and no error.
//!
//! Any I/O or parse failure means "run". An error record never causes a
//! skip, so failures are retried on the next run.

use super::paths::{record_file_name, result_dir};
use crate::core_types::ProviderTarget;
use crate::error::{PollError, PollResult};
use crate::logging::{log_debug, log_info, log_warn};
use chrono::{DateTime, Utc};
use serde::Deserialize;
use std::path::{Path, PathBuf};
use std::time::{Duration, SystemTime};

/// Just enough of a persisted record to judge it.
///
/// Deliberately loose so records written by older tooling still parse.
#[derive(Debug, Deserialize)]
struct RecordSummary {
    #[serde(default)]
    outputs: Option<Vec<serde_json::Value>>,
    #[serde(default)]
    error: Option<serde_json::Value>,
}

impl RecordSummary {
    fn is_success(&self) -> bool {
        self.outputs.as_ref().is_some_and(|o| !o.is_empty()) && self.error.is_none()
    }
}

#[derive(Debug)]
struct RecordFile {
    name: String,
    path: PathBuf,
}

/// True when a successful result for `target` is recent enough to skip it
pub async fn has_recent_success(
    root: &Path,
    target: &ProviderTarget,
    now: DateTime<Utc>,
    window: Duration,
) -> bool {
    match check(root, target, now, window).await {
        Ok(skip) => skip,
        Err(error) => {
            log_warn!(
                provider = %target.provider,
                model = %target.model,
                error = %error,
                "Error checking recent runs, will run target"
            );
            false
        }
    }
}

async fn check(
    root: &Path,
    target: &ProviderTarget,
    now: DateTime<Utc>,
    window: Duration,
) -> PollResult<bool> {
    let dir = result_dir(root, target.provider, &target.model);
    let files = list_records(&dir).await?;

    log_debug!(
        dir = %dir.display(),
        files = files.len(),
        "Checking for recent runs"
    );

    if files.is_empty() {
        return Ok(false);
    }

    let today = record_file_name(target.provider, &target.model, now.date_naive());
    if let Some(file) = files.iter().find(|f| f.name == today) {
        let summary = read_summary(&file.path).await?;
        let skip = summary.is_success();
        log_info!(
            provider = %target.provider,
            model = %target.model,
            skip = skip,
            "Found today's record"
        );
        return Ok(skip);
    }

    let Some((newest, modified)) = newest_record(files).await? else {
        return Ok(false);
    };

    let age = now
        .signed_duration_since(modified)
        .to_std()
        .unwrap_or(Duration::ZERO);
    log_debug!(
        file = %newest.name,
        hours_since_last_run = age.as_secs_f64() / 3600.0,
        "Most recent record"
    );

    if age >= window {
        return Ok(false);
    }

    let skip = read_summary(&newest.path).await?.is_success();
    if skip {
        log_info!(
            provider = %target.provider,
            model = %target.model,
            "Successful run exists within the recency window"
        );
    }
    Ok(skip)
}

/// JSON records in `dir`; a missing directory has none
async fn list_records(dir: &Path) -> PollResult<Vec<RecordFile>> {
    let mut entries = match tokio::fs::read_dir(dir).await {
        Ok(entries) => entries,
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(Vec::new()),
        Err(e) => return Err(PollError::storage(dir, e)),
    };

    let mut files = Vec::new();
    while let Some(entry) = entries
        .next_entry()
        .await
        .map_err(|e| PollError::storage(dir, e))?
    {
        let name = entry.file_name().to_string_lossy().into_owned();
        if name.ends_with(".json") {
            files.push(RecordFile {
                name,
                path: entry.path(),
            });
        }
    }
    Ok(files)
}

/// The most recently modified record and its modification time
async fn newest_record(files: Vec<RecordFile>) -> PollResult<Option<(RecordFile, DateTime<Utc>)>> {
    let mut stamped = Vec::with_capacity(files.len());
    for file in files {
        let modified: SystemTime = tokio::fs::metadata(&file.path)
            .await
            .and_then(|meta| meta.modified())
            .map_err(|e| PollError::storage(&file.path, e))?;
        stamped.push((file, DateTime::<Utc>::from(modified)));
    }

    stamped.sort_by(|a, b| b.1.cmp(&a.1));
    Ok(stamped.into_iter().next())
}

async fn read_summary(path: &Path) -> PollResult<RecordSummary> {
    let raw = tokio::fs::read_to_string(path)
        .await
        .map_err(|e| PollError::storage(path, e))?;
    serde_json::from_str(&raw).map_err(|e| {
        PollError::response_parsing_error(format!("Unreadable record {}: {e}", path.display()))
    })
}
