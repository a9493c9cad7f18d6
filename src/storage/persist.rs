//! Result persister: hash, redact, write.

use super::paths::record_path;
use crate::core_types::{CallError, CallResult, OutputEntry, PromptPair, Provider};
use crate::error::{PollError, PollResult};
use crate::logging::log_info;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};
use std::path::{Path, PathBuf};

/// Characters of the credential kept in a persisted record
const VISIBLE_SUFFIX: usize = 5;
/// Shorter credentials are redacted entirely
const MIN_LEN_FOR_SUFFIX: usize = 12;
const REDACTION_MARKER: &str = "...";

/// On-disk form of a [`CallResult`].
///
/// Field names follow the existing logs tree so older records stay readable.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PersistedRecord {
    #[serde(rename = "modelProvider")]
    pub provider: Provider,
    #[serde(rename = "modelName")]
    pub model: String,
    /// Redacted, see [`redact_credential`]
    #[serde(rename = "apiKey")]
    pub credential: String,
    #[serde(rename = "baseURL", default, skip_serializing_if = "Option::is_none")]
    pub endpoint: Option<String>,
    pub inputs: Vec<PromptPair>,
    #[serde(default)]
    pub outputs: Vec<OutputEntry>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<CallError>,
    pub hash: String,
    /// When the record was written
    pub timestamp: DateTime<Utc>,
}

/// Hashed view of a result; field order is the canonical order
#[derive(Serialize)]
struct HashedContent<'a> {
    inputs: &'a [PromptPair],
    outputs: &'a [OutputEntry],
}

/// SHA-256 (lower-case hex) over the canonical JSON of `{inputs, outputs}`
pub fn content_hash(inputs: &[PromptPair], outputs: &[OutputEntry]) -> PollResult<String> {
    let canonical =
        serde_json::to_string(&HashedContent { inputs, outputs }).map_err(PollError::serialization)?;
    Ok(format!("{:x}", Sha256::digest(canonical.as_bytes())))
}

/// `"..."` followed by the last few characters of the credential
pub fn redact_credential(credential: &str) -> String {
    let chars: Vec<char> = credential.trim().chars().collect();
    if chars.len() < MIN_LEN_FOR_SUFFIX {
        return REDACTION_MARKER.to_string();
    }
    let suffix: String = chars[chars.len() - VISIBLE_SUFFIX..].iter().collect();
    format!("{REDACTION_MARKER}{suffix}")
}

impl PersistedRecord {
    pub fn from_result(result: &CallResult, written_at: DateTime<Utc>) -> Self {
        Self {
            provider: result.target.provider,
            model: result.target.model.clone(),
            credential: redact_credential(&result.target.credential),
            endpoint: result.target.endpoint.clone(),
            inputs: result.target.inputs.clone(),
            outputs: result.outputs.clone(),
            error: result.error.clone(),
            hash: result.hash.clone(),
            timestamp: written_at,
        }
    }
}

/// Fill in the result's hash and write it under `root`.
///
/// The path is deterministic per (provider, model, UTC day); an existing file
/// at that path is overwritten.
pub async fn write_record(
    root: &Path,
    result: &mut CallResult,
    now: DateTime<Utc>,
) -> PollResult<PathBuf> {
    result.hash = content_hash(&result.target.inputs, &result.outputs)?;

    let path = record_path(root, result.target.provider, &result.target.model, now.date_naive());
    if let Some(dir) = path.parent() {
        tokio::fs::create_dir_all(dir)
            .await
            .map_err(|e| PollError::storage(dir, e))?;
    }

    let record = PersistedRecord::from_result(result, now);
    let json = serde_json::to_string_pretty(&record).map_err(PollError::serialization)?;
    tokio::fs::write(&path, json)
        .await
        .map_err(|e| PollError::storage(&path, e))?;

    log_info!(
        provider = %result.target.provider,
        model = %result.target.model,
        path = %path.display(),
        success = result.is_success(),
        "Saved result"
    );

    Ok(path)
}
