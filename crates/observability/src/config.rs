//! Logging configuration read from the environment.
//!
//! - `RUST_LOG`: filter directives, default `info`.
//! - `RECORDKEEP_LOG_FORMAT`: `json` (default), `pretty` or `compact`.

use core::str::FromStr;

use thiserror::Error;

pub const FORMAT_ENV: &str = "RECORDKEEP_LOG_FORMAT";
pub const FILTER_ENV: &str = "RUST_LOG";
pub const DEFAULT_FILTER: &str = "info";

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum LogFormat {
    #[default]
    Json,
    Pretty,
    Compact,
}

#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[error("unknown log format '{0}' (expected json, pretty or compact)")]
pub struct UnknownLogFormat(String);

impl FromStr for LogFormat {
    type Err = UnknownLogFormat;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "json" => Ok(LogFormat::Json),
            "pretty" => Ok(LogFormat::Pretty),
            "compact" => Ok(LogFormat::Compact),
            _ => Err(UnknownLogFormat(s.to_string())),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ObservabilityConfig {
    pub filter: String,
    pub format: LogFormat,
}

impl Default for ObservabilityConfig {
    fn default() -> Self {
        Self {
            filter: DEFAULT_FILTER.to_string(),
            format: LogFormat::default(),
        }
    }
}

impl ObservabilityConfig {
    pub fn from_env() -> Self {
        Self::from_vars(
            std::env::var(FILTER_ENV).ok().as_deref(),
            std::env::var(FORMAT_ENV).ok().as_deref(),
        )
    }

    /// Build from raw variable values; unset or blank values use defaults.
    pub fn from_vars(filter: Option<&str>, format: Option<&str>) -> Self {
        let filter = filter
            .map(str::trim)
            .filter(|f| !f.is_empty())
            .unwrap_or(DEFAULT_FILTER)
            .to_string();

        let format = match format.map(str::trim).filter(|f| !f.is_empty()) {
            None => LogFormat::default(),
            Some(raw) => raw.parse().unwrap_or_else(|err: UnknownLogFormat| {
                // No subscriber is installed yet, so this goes to stderr directly.
                eprintln!("{err}; falling back to json");
                LogFormat::default()
            }),
        };

        Self { filter, format }
    }
}
