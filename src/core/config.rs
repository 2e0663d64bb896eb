//! Logger configuration
//!
//! [`LoggerConfig`] is a plain value: build as many loggers from one as you
//! like, building never modifies it. [`default_logger_config`] returns the
//! baseline every factory starts from.

use super::encoder::EncoderConfig;
use super::error::Result;
use super::format::{default_format, LogFormat};
use super::log_context::{FieldValue, LogContext};
use super::log_level::{convert_to_level, LogLevel, DEFAULT_LOG_LEVEL};
use super::logger::Logger;
use super::output_paths::{merge_output_paths, STDERR_OUTPUT};
use super::sampling::SamplingConfig;
use serde::{Deserialize, Serialize};

/// Everything needed to build a [`Logger`]
///
/// Serialized field names are camelCase (`outputPaths`, `encoderConfig`, ...);
/// keys missing from a serialized config take their values from
/// [`default_logger_config`].
///
/// # Example
///
/// ```
/// use rust_logs::{LogFormat, LogLevel, LoggerConfig};
///
/// let config = LoggerConfig::default()
///     .with_level(LogLevel::Debug)
///     .with_format(LogFormat::Console)
///     .with_output_paths(vec!["/dev/null".to_string()]);
///
/// let logger = config.build().unwrap();
/// assert!(logger.enabled(LogLevel::Debug));
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct LoggerConfig {
    /// Minimum severity that is emitted
    pub level: LogLevel,

    /// Development mode attaches stack traces from `Warn` upwards instead of `Error`
    pub development: bool,

    /// Omit the caller element
    pub disable_caller: bool,

    /// Never attach stack traces
    pub disable_stacktrace: bool,

    /// `None` disables sampling
    pub sampling: Option<SamplingConfig>,

    pub encoding: LogFormat,

    pub encoder_config: EncoderConfig,

    /// Destinations for records
    pub output_paths: Vec<String>,

    /// Destinations for the logger's own write errors
    pub error_output_paths: Vec<String>,

    /// Fields added to every record
    pub initial_fields: LogContext,
}

/// The baseline configuration
///
/// JSON encoding at `info`, sampling 100 then every 100th per second, the
/// default encoder config, and `stderr` for both records and errors.
pub fn default_logger_config() -> LoggerConfig {
    LoggerConfig {
        level: convert_to_level(DEFAULT_LOG_LEVEL),
        development: false,
        disable_caller: false,
        disable_stacktrace: false,
        sampling: Some(SamplingConfig::default()),
        encoding: default_format(),
        encoder_config: EncoderConfig::default(),
        output_paths: vec![STDERR_OUTPUT.to_string()],
        error_output_paths: vec![STDERR_OUTPUT.to_string()],
        initial_fields: LogContext::new(),
    }
}

impl Default for LoggerConfig {
    fn default() -> Self {
        default_logger_config()
    }
}

impl LoggerConfig {
    /// Load a configuration from JSON
    pub fn from_json(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }

    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string(self)?)
    }

    /// Build a logger, opening every configured destination
    ///
    /// Fails with [`LoggerError::Construction`](super::LoggerError::Construction)
    /// when any destination cannot be opened.
    pub fn build(&self) -> Result<Logger> {
        Logger::from_config(self)
    }

    /// Deduplicate and sort both destination lists
    #[must_use]
    pub fn merge_output_paths(self) -> Self {
        merge_output_paths(self)
    }

    #[must_use]
    pub fn with_level(mut self, level: LogLevel) -> Self {
        self.level = level;
        self
    }

    #[must_use]
    pub fn with_format(mut self, format: LogFormat) -> Self {
        self.encoding = format;
        self
    }

    #[must_use]
    pub fn with_development(mut self, development: bool) -> Self {
        self.development = development;
        self
    }

    #[must_use]
    pub fn with_disable_caller(mut self, disable: bool) -> Self {
        self.disable_caller = disable;
        self
    }

    #[must_use]
    pub fn with_disable_stacktrace(mut self, disable: bool) -> Self {
        self.disable_stacktrace = disable;
        self
    }

    #[must_use]
    pub fn with_sampling(mut self, sampling: Option<SamplingConfig>) -> Self {
        self.sampling = sampling;
        self
    }

    #[must_use]
    pub fn with_encoder_config(mut self, encoder_config: EncoderConfig) -> Self {
        self.encoder_config = encoder_config;
        self
    }

    #[must_use]
    pub fn with_output_paths(mut self, paths: Vec<String>) -> Self {
        self.output_paths = paths;
        self
    }

    #[must_use]
    pub fn with_error_output_paths(mut self, paths: Vec<String>) -> Self {
        self.error_output_paths = paths;
        self
    }

    #[must_use]
    pub fn with_initial_field<K, V>(mut self, key: K, value: V) -> Self
    where
        K: Into<String>,
        V: Into<FieldValue>,
    {
        self.initial_fields.add_field(key, value);
        self
    }
}
