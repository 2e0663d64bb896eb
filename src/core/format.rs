//! Output encoding selection
//!
//! Two encodings are supported:
//! - Json: one JSON object per record (default)
//! - Console: tab-separated, human-readable lines

use super::error::{LoggerError, Result};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

pub const JSON_LOG_FORMAT: &str = "json";
pub const CONSOLE_LOG_FORMAT: &str = "console";

/// Every token accepted by [`validate_format`], besides the empty string
pub const SUPPORTED_LOG_FORMATS: [&str; 2] = [JSON_LOG_FORMAT, CONSOLE_LOG_FORMAT];

/// Encoding of emitted log records
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LogFormat {
    /// Machine-readable JSON records
    ///
    /// Example: `{"level":"info","ts":"2024-03-15T10:30:00.123456+0000","msg":"started"}`
    #[default]
    Json,

    /// Human-readable tab-separated lines
    ///
    /// Example: `2024-03-15T10:30:00.123456+0000	info	started`
    Console,
}

impl LogFormat {
    pub fn as_str(&self) -> &'static str {
        match self {
            LogFormat::Json => JSON_LOG_FORMAT,
            LogFormat::Console => CONSOLE_LOG_FORMAT,
        }
    }
}

impl fmt::Display for LogFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for LogFormat {
    type Err = LoggerError;

    fn from_str(s: &str) -> Result<Self> {
        validate_format(s)
    }
}

/// The encoding used when none is requested
pub fn default_format() -> LogFormat {
    LogFormat::default()
}

/// Validate a user-supplied encoding token
///
/// `"json"` and `"console"` map to their encodings, the empty string maps to
/// [`default_format`]. Matching is exact; anything else is rejected.
///
/// # Example
///
/// ```
/// use rust_logs::{validate_format, LogFormat};
///
/// assert_eq!(validate_format("console").unwrap(), LogFormat::Console);
/// assert_eq!(validate_format("").unwrap(), LogFormat::Json);
/// assert!(validate_format("xml").is_err());
/// ```
pub fn validate_format(input: &str) -> Result<LogFormat> {
    match input {
        CONSOLE_LOG_FORMAT => Ok(LogFormat::Console),
        JSON_LOG_FORMAT => Ok(LogFormat::Json),
        "" => Ok(default_format()),
        other => Err(LoggerError::invalid_format(other, &SUPPORTED_LOG_FORMATS)),
    }
}
