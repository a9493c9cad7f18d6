use crate::core_types::Provider;
use chrono::NaiveDate;
use std::path::{Path, PathBuf};

/// Lower-cased path component; separators cannot escape the results tree
fn segment(raw: &str) -> String {
    raw.trim()
        .to_lowercase()
        .replace(['/', '\\'], "_")
}

/// `root/<provider>/<model>`
pub fn result_dir(root: &Path, provider: Provider, model: &str) -> PathBuf {
    root.join(provider.as_str()).join(segment(model))
}

/// `<provider>_<model>_<YYYY-MM-DD>.json`
pub fn record_file_name(provider: Provider, model: &str, date: NaiveDate) -> String {
    format!(
        "{}_{}_{}.json",
        provider.as_str(),
        segment(model),
        date.format("%Y-%m-%d")
    )
}

/// Full path of the record for one (provider, model, day)
pub fn record_path(root: &Path, provider: Provider, model: &str, date: NaiveDate) -> PathBuf {
    result_dir(root, provider, model).join(record_file_name(provider, model, date))
}
