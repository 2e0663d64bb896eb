//! Ergonomic logger variant
//!
//! [`SugaredLogger`] wraps a [`Logger`] and trades a little speed for
//! convenience: `*f` methods take preformatted arguments, `*w` methods take a
//! message plus loose key/value pairs.
//!
//! ```
//! use rust_logs::{FieldValue, Logger};
//!
//! let sugar = Logger::noop().sugar();
//! sugar.infof(format_args!("listening on {}", 2379));
//! sugar.infow("request served", [("status", FieldValue::from(200)), ("path", "/v3/kv".into())]);
//! ```

use super::log_context::{FieldValue, LogContext};
use super::log_level::LogLevel;
use super::logger::Logger;
use std::fmt;

#[derive(Clone, Debug)]
pub struct SugaredLogger {
    base: Logger,
}

impl SugaredLogger {
    pub(crate) fn new(base: Logger) -> Self {
        Self { base }
    }

    /// The plain logger underneath
    pub fn desugar(&self) -> &Logger {
        &self.base
    }

    pub fn into_inner(self) -> Logger {
        self.base
    }

    #[must_use]
    pub fn named(&self, name: &str) -> Self {
        Self::new(self.base.named(name))
    }

    /// Child logger that adds the given pairs to every record
    #[must_use]
    pub fn with<I, K, V>(&self, keys_and_values: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<FieldValue>,
    {
        Self::new(self.base.with(keys_and_values.into_iter().collect()))
    }

    pub fn enabled(&self, level: LogLevel) -> bool {
        self.base.enabled(level)
    }

    #[track_caller]
    pub fn log(&self, level: LogLevel, message: impl Into<String>) {
        self.base.log(level, message);
    }

    #[track_caller]
    pub fn log_with_context(&self, level: LogLevel, message: impl Into<String>, context: LogContext) {
        self.base.log_with_context(level, message, context);
    }

    /// Format and log; arguments are only rendered when `level` is enabled
    #[track_caller]
    pub fn logf(&self, level: LogLevel, args: fmt::Arguments<'_>) {
        if self.base.enabled(level) {
            self.base.log(level, args.to_string());
        }
    }

    #[track_caller]
    pub fn logw<I, K, V>(&self, level: LogLevel, message: impl Into<String>, keys_and_values: I)
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<FieldValue>,
    {
        if self.base.enabled(level) {
            let context: LogContext = keys_and_values.into_iter().collect();
            self.base.log_with_context(level, message, context);
        }
    }

    #[track_caller]
    pub fn debugf(&self, args: fmt::Arguments<'_>) {
        self.logf(LogLevel::Debug, args);
    }

    #[track_caller]
    pub fn infof(&self, args: fmt::Arguments<'_>) {
        self.logf(LogLevel::Info, args);
    }

    #[track_caller]
    pub fn warnf(&self, args: fmt::Arguments<'_>) {
        self.logf(LogLevel::Warn, args);
    }

    #[track_caller]
    pub fn errorf(&self, args: fmt::Arguments<'_>) {
        self.logf(LogLevel::Error, args);
    }

    #[track_caller]
    pub fn fatalf(&self, args: fmt::Arguments<'_>) {
        self.logf(LogLevel::Fatal, args);
    }

    #[track_caller]
    pub fn debugw<I, K, V>(&self, message: impl Into<String>, keys_and_values: I)
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<FieldValue>,
    {
        self.logw(LogLevel::Debug, message, keys_and_values);
    }

    #[track_caller]
    pub fn infow<I, K, V>(&self, message: impl Into<String>, keys_and_values: I)
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<FieldValue>,
    {
        self.logw(LogLevel::Info, message, keys_and_values);
    }

    #[track_caller]
    pub fn warnw<I, K, V>(&self, message: impl Into<String>, keys_and_values: I)
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<FieldValue>,
    {
        self.logw(LogLevel::Warn, message, keys_and_values);
    }

    #[track_caller]
    pub fn errorw<I, K, V>(&self, message: impl Into<String>, keys_and_values: I)
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<FieldValue>,
    {
        self.logw(LogLevel::Error, message, keys_and_values);
    }

    #[track_caller]
    pub fn fatalw<I, K, V>(&self, message: impl Into<String>, keys_and_values: I)
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<FieldValue>,
    {
        self.logw(LogLevel::Fatal, message, keys_and_values);
    }

    pub fn sync(&self) -> super::error::Result<()> {
        self.base.sync()
    }
}

impl From<Logger> for SugaredLogger {
    fn from(base: Logger) -> Self {
        Self::new(base)
    }
}
