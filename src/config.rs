use crate::core_types::Provider;
use crate::error::{PollError, PollResult};
use crate::logging::{log_debug, log_warn};
use std::path::PathBuf;
use std::time::Duration;

/// Runtime settings for a poll run
#[derive(Debug, Clone)]
pub struct PollerConfig {
    /// Root of the results tree
    pub logs_dir: PathBuf,
    /// How far back a successful result still counts as fresh
    pub recency_window: Duration,
    /// Per-request timeout applied by the HTTP client
    pub request_timeout: Duration,
    /// `max_tokens` sent to providers that require it (Anthropic)
    pub max_tokens: u32,
}

impl Default for PollerConfig {
    fn default() -> Self {
        Self {
            logs_dir: PathBuf::from("logs"),
            recency_window: Duration::from_secs(24 * 60 * 60),
            request_timeout: Duration::from_secs(120),
            max_tokens: 1024,
        }
    }
}

impl PollerConfig {
    /// Load configuration from environment variables, falling back to defaults
    ///
    /// Recognised variables: `LOGS_DIR`, `POLLER_RECENCY_HOURS`,
    /// `POLLER_REQUEST_TIMEOUT_SECS`, `POLLER_MAX_TOKENS`.
    ///
    /// # Errors
    ///
    /// Returns [`PollError::ConfigurationError`] if a numeric variable is set
    /// but is not a valid number.
    pub fn from_env() -> PollResult<Self> {
        let mut config = Self::default();

        if let Ok(dir) = std::env::var("LOGS_DIR") {
            if !dir.trim().is_empty() {
                config.logs_dir = PathBuf::from(dir);
            }
        }
        if let Some(hours) = parse_env::<u64>("POLLER_RECENCY_HOURS")? {
            config.recency_window = Self::window_from_hours(hours)?;
        }
        if let Some(secs) = parse_env::<u64>("POLLER_REQUEST_TIMEOUT_SECS")? {
            config.request_timeout = Duration::from_secs(secs);
        }
        if let Some(max_tokens) = parse_env::<u32>("POLLER_MAX_TOKENS")? {
            config.max_tokens = max_tokens;
        }

        log_debug!(
            logs_dir = %config.logs_dir.display(),
            recency_window_secs = config.recency_window.as_secs(),
            request_timeout_secs = config.request_timeout.as_secs(),
            max_tokens = config.max_tokens,
            "Poller configuration loaded"
        );

        Ok(config)
    }

    /// Recency window of `hours`; rejects values that overflow a `u64` of seconds
    pub fn window_from_hours(hours: u64) -> PollResult<Duration> {
        hours
            .checked_mul(60 * 60)
            .map(Duration::from_secs)
            .ok_or_else(|| {
                PollError::configuration_error(format!("Recency window of {hours} hours is too large"))
            })
    }
}

/// Parse an optional numeric environment variable
fn parse_env<T: std::str::FromStr>(key: &str) -> PollResult<Option<T>> {
    match std::env::var(key) {
        Ok(raw) if !raw.trim().is_empty() => raw.trim().parse::<T>().map(Some).map_err(|_| {
            PollError::configuration_error(format!("{key} must be a number, got '{raw}'"))
        }),
        _ => Ok(None),
    }
}

/// One static secret per provider. An empty string means "unavailable".
#[derive(Clone, Default)]
pub struct Credentials {
    pub xai: String,
    pub openai: String,
    pub anthropic: String,
    pub gemini: String,
}

impl Credentials {
    /// Environment variable holding each provider's key
    pub fn env_var(provider: Provider) -> &'static str {
        match provider {
            Provider::Xai => "GROK_API_KEY",
            Provider::OpenAI => "OPENAI_API_KEY",
            Provider::Anthropic => "ANTHROPIC_API_KEY",
            Provider::Gemini => "GEMINI_API_KEY",
        }
    }

    /// Read every provider key from the environment
    pub fn from_env() -> Self {
        let read = |provider| std::env::var(Self::env_var(provider)).unwrap_or_default();
        let credentials = Self {
            xai: read(Provider::Xai),
            openai: read(Provider::OpenAI),
            anthropic: read(Provider::Anthropic),
            gemini: read(Provider::Gemini),
        };

        let missing = credentials.missing();
        if !missing.is_empty() {
            log_warn!(
                missing = %missing.join(", "),
                "Missing API key environment variables; affected targets will record NO_API_KEY"
            );
        }

        credentials
    }

    pub fn for_provider(&self, provider: Provider) -> &str {
        match provider {
            Provider::Xai => &self.xai,
            Provider::OpenAI => &self.openai,
            Provider::Anthropic => &self.anthropic,
            Provider::Gemini => &self.gemini,
        }
    }

    /// Names of the environment variables that were not provided
    pub fn missing(&self) -> Vec<&'static str> {
        Provider::ALL
            .into_iter()
            .filter(|p| self.for_provider(*p).trim().is_empty())
            .map(Self::env_var)
            .collect()
    }
}

impl std::fmt::Debug for Credentials {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Credentials")
            .field("missing", &self.missing())
            .finish()
    }
}
