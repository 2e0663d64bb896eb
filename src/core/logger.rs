//! Main logger implementation

use super::{
    config::LoggerConfig,
    encoder::EncoderConfig,
    error::{LoggerError, Result},
    format::LogFormat,
    log_context::LogContext,
    log_entry::{Caller, LogEntry},
    log_level::LogLevel,
    metrics::LoggerMetrics,
    sampling::{LogSampler, SamplerMetrics},
    sink::Sink,
    sugar::SugaredLogger,
    timestamp::TimeEncoder,
};
use crate::sinks::open_sinks;
use parking_lot::{Mutex, RwLock};
use std::backtrace::Backtrace;
use std::fmt;
use std::panic::Location;
use std::sync::Arc;

/// State shared by a logger and every logger derived from it
struct LoggerCore {
    min_level: RwLock<LogLevel>,
    encoding: LogFormat,
    encoder: EncoderConfig,
    sampler: Option<LogSampler>,
    outputs: Mutex<Vec<Box<dyn Sink>>>,
    error_outputs: Mutex<Vec<Box<dyn Sink>>>,
    add_caller: bool,
    stacktrace_level: Option<LogLevel>,
    metrics: LoggerMetrics,
}

/// Structured logger
///
/// Cheap to clone. Clones, [`named`](Logger::named) children and
/// [`with`](Logger::with) children share outputs, sampler, metrics and the
/// level, so [`set_level`](Logger::set_level) on one is seen by all.
#[derive(Clone)]
pub struct Logger {
    core: Arc<LoggerCore>,
    name: Option<String>,
    fields: LogContext,
}

impl Logger {
    /// Build a logger, opening every destination named in `config`
    pub fn from_config(config: &LoggerConfig) -> Result<Self> {
        let outputs = open_sinks(&config.output_paths)?;
        let error_outputs = open_sinks(&config.error_output_paths)?;
        Ok(Self::with_sinks(config, outputs, error_outputs))
    }

    /// Build a logger writing to already opened sinks
    ///
    /// `output_paths` and `error_output_paths` of `config` are ignored.
    pub fn with_sinks(
        config: &LoggerConfig,
        outputs: Vec<Box<dyn Sink>>,
        error_outputs: Vec<Box<dyn Sink>>,
    ) -> Self {
        let stacktrace_level = if config.disable_stacktrace {
            None
        } else if config.development {
            Some(LogLevel::Warn)
        } else {
            Some(LogLevel::Error)
        };

        let core = LoggerCore {
            min_level: RwLock::new(config.level),
            encoding: config.encoding,
            encoder: config.encoder_config.clone(),
            sampler: config.sampling.clone().map(LogSampler::new),
            outputs: Mutex::new(outputs),
            error_outputs: Mutex::new(error_outputs),
            add_caller: !config.disable_caller,
            stacktrace_level,
            metrics: LoggerMetrics::new(),
        };

        Self {
            core: Arc::new(core),
            name: None,
            fields: config.initial_fields.clone(),
        }
    }

    /// A logger that writes nothing
    #[must_use]
    pub fn noop() -> Self {
        let config = LoggerConfig::default()
            .with_level(LogLevel::Fatal)
            .with_sampling(None)
            .with_disable_caller(true)
            .with_disable_stacktrace(true);
        Self::with_sinks(&config, Vec::new(), Vec::new())
    }

    /// Start from the default configuration
    ///
    /// # Example
    /// ```
    /// use rust_logs::prelude::*;
    ///
    /// let logger = Logger::builder()
    ///     .with_level(LogLevel::Debug)
    ///     .with_output_paths(vec!["/dev/null".to_string()])
    ///     .build()
    ///     .unwrap();
    /// ```
    #[must_use]
    pub fn builder() -> LoggerConfig {
        LoggerConfig::default()
    }

    /// Child logger whose name is appended to this one's, dot-separated
    #[must_use]
    pub fn named(&self, name: &str) -> Self {
        let name = match &self.name {
            Some(parent) if !name.is_empty() => format!("{}.{}", parent, name),
            Some(parent) => parent.clone(),
            None => name.to_string(),
        };
        Self {
            core: Arc::clone(&self.core),
            name: (!name.is_empty()).then_some(name),
            fields: self.fields.clone(),
        }
    }

    /// Child logger that adds `context` to every record
    #[must_use]
    pub fn with(&self, context: LogContext) -> Self {
        let mut fields = self.fields.clone();
        fields.extend(&context);
        Self {
            core: Arc::clone(&self.core),
            name: self.name.clone(),
            fields,
        }
    }

    pub fn name(&self) -> Option<&str> {
        self.name.as_deref()
    }

    pub fn level(&self) -> LogLevel {
        *self.core.min_level.read()
    }

    pub fn set_level(&self, level: LogLevel) {
        *self.core.min_level.write() = level;
    }

    #[inline]
    pub fn enabled(&self, level: LogLevel) -> bool {
        level >= self.level()
    }

    pub fn format(&self) -> LogFormat {
        self.core.encoding
    }

    /// Ergonomic variant sharing this logger's state
    #[must_use]
    pub fn sugar(&self) -> SugaredLogger {
        SugaredLogger::new(self.clone())
    }

    #[track_caller]
    pub fn log(&self, level: LogLevel, message: impl Into<String>) {
        self.log_with_context(level, message, LogContext::new());
    }

    /// Log with structured context fields
    #[track_caller]
    pub fn log_with_context(&self, level: LogLevel, message: impl Into<String>, context: LogContext) {
        if !self.enabled(level) {
            return;
        }

        let message = message.into();
        if let Some(ref sampler) = self.core.sampler {
            if !sampler.should_sample(level, &message) {
                self.core.metrics.record_sampled_out();
                return;
            }
        }

        let mut fields = self.fields.clone();
        fields.extend(&context);

        let mut entry = LogEntry::new(level, message)
            .with_name(self.name.clone())
            .with_context(fields);
        if self.core.add_caller {
            entry = entry.with_caller(Caller::from_location(Location::caller()));
        }
        if self.core.stacktrace_level.is_some_and(|min| level >= min) {
            entry = entry.with_stack(Backtrace::force_capture().to_string());
        }

        self.write_entry(&entry);

        if level == LogLevel::Fatal {
            if let Err(e) = self.sync() {
                self.core.report_error(&e);
            }
        }
    }

    fn write_entry(&self, entry: &LogEntry) {
        let record = self.core.encoder.encode(self.core.encoding, entry);

        let failures: Vec<LoggerError> = {
            let mut outputs = self.core.outputs.lock();
            outputs
                .iter_mut()
                .filter_map(|sink| write_isolated(sink.as_mut(), record.as_bytes()).err())
                .collect()
        };

        self.core.metrics.record_logged();
        for e in failures {
            self.core.metrics.record_write_error();
            self.core.report_error(&e);
        }
    }

    /// Flush every output and error output
    pub fn sync(&self) -> Result<()> {
        let mut first_error = None;
        for sink in self.core.outputs.lock().iter_mut() {
            if let Err(e) = sink.flush() {
                first_error.get_or_insert(e);
            }
        }
        for sink in self.core.error_outputs.lock().iter_mut() {
            if let Err(e) = sink.flush() {
                first_error.get_or_insert(e);
            }
        }
        match first_error {
            Some(e) => Err(e),
            None => Ok(()),
        }
    }

    /// Counters for this logger and everything derived from it
    pub fn metrics(&self) -> &LoggerMetrics {
        &self.core.metrics
    }

    /// Sampling counters, when sampling is enabled
    pub fn sampler_metrics(&self) -> Option<&SamplerMetrics> {
        self.core.sampler.as_ref().map(LogSampler::metrics)
    }

    #[inline]
    #[track_caller]
    pub fn debug(&self, message: impl Into<String>) {
        self.log(LogLevel::Debug, message);
    }

    #[inline]
    #[track_caller]
    pub fn info(&self, message: impl Into<String>) {
        self.log(LogLevel::Info, message);
    }

    #[inline]
    #[track_caller]
    pub fn warn(&self, message: impl Into<String>) {
        self.log(LogLevel::Warn, message);
    }

    #[inline]
    #[track_caller]
    pub fn error(&self, message: impl Into<String>) {
        self.log(LogLevel::Error, message);
    }

    /// Log at `Fatal` and flush; the process keeps running
    #[inline]
    #[track_caller]
    pub fn fatal(&self, message: impl Into<String>) {
        self.log(LogLevel::Fatal, message);
    }

    #[track_caller]
    pub fn debug_with_context(&self, message: impl Into<String>, context: LogContext) {
        self.log_with_context(LogLevel::Debug, message, context);
    }

    #[track_caller]
    pub fn info_with_context(&self, message: impl Into<String>, context: LogContext) {
        self.log_with_context(LogLevel::Info, message, context);
    }

    #[track_caller]
    pub fn warn_with_context(&self, message: impl Into<String>, context: LogContext) {
        self.log_with_context(LogLevel::Warn, message, context);
    }

    #[track_caller]
    pub fn error_with_context(&self, message: impl Into<String>, context: LogContext) {
        self.log_with_context(LogLevel::Error, message, context);
    }

    #[track_caller]
    pub fn fatal_with_context(&self, message: impl Into<String>, context: LogContext) {
        self.log_with_context(LogLevel::Fatal, message, context);
    }
}

impl LoggerCore {
    /// Report an internal failure to the error outputs, or stderr as a last resort
    fn report_error(&self, error: &LoggerError) {
        let line = format!(
            "{} write error: {}\n",
            TimeEncoder::Iso8601Micros.encode(&chrono::Utc::now()),
            error
        );

        let mut error_outputs = self.error_outputs.lock();
        let mut delivered = false;
        for sink in error_outputs.iter_mut() {
            if write_isolated(sink.as_mut(), line.as_bytes()).is_ok() {
                delivered = true;
            }
        }
        if !delivered {
            eprintln!("[LOGGER ERROR] {}", line.trim_end());
        }
    }
}

impl Drop for LoggerCore {
    fn drop(&mut self) {
        for sink in self.outputs.get_mut().iter_mut() {
            let _ = sink.flush();
        }
        for sink in self.error_outputs.get_mut().iter_mut() {
            let _ = sink.flush();
        }
    }
}

impl fmt::Debug for Logger {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Logger")
            .field("name", &self.name)
            .field("level", &self.level())
            .field("encoding", &self.core.encoding)
            .field("fields", &self.fields)
            .finish()
    }
}

/// Write one record, turning a panicking sink into an error
///
/// A sink that panics must not take the calling thread down with it, nor
/// stop the remaining sinks from receiving the record.
fn write_isolated(sink: &mut dyn Sink, record: &[u8]) -> Result<()> {
    match std::panic::catch_unwind(std::panic::AssertUnwindSafe(|| sink.write(record))) {
        Ok(result) => result,
        Err(panic_info) => {
            let panic_msg = if let Some(s) = panic_info.downcast_ref::<&str>() {
                s.to_string()
            } else if let Some(s) = panic_info.downcast_ref::<String>() {
                s.clone()
            } else {
                "Unknown panic".to_string()
            };
            Err(LoggerError::writer(format!(
                "sink '{}' panicked: {}",
                sink.name(),
                panic_msg
            )))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::sampling::SamplingConfig;
    use crate::sinks::MemorySink;

    fn memory_logger(config: &LoggerConfig) -> (Logger, MemorySink, MemorySink) {
        let out = MemorySink::new();
        let err = MemorySink::new();
        let logger = Logger::with_sinks(
            config,
            vec![Box::new(out.clone())],
            vec![Box::new(err.clone())],
        );
        (logger, out, err)
    }

    fn parse(line: &str) -> serde_json::Value {
        serde_json::from_str(line).expect("record is valid JSON")
    }

    struct FailingSink;

    impl Sink for FailingSink {
        fn write(&mut self, _record: &[u8]) -> Result<()> {
            Err(LoggerError::writer("simulated failure"))
        }

        fn flush(&mut self) -> Result<()> {
            Ok(())
        }

        fn name(&self) -> &str {
            "failing"
        }
    }

    struct PanickingSink;

    impl Sink for PanickingSink {
        fn write(&mut self, _record: &[u8]) -> Result<()> {
            panic!("sink exploded");
        }

        fn flush(&mut self) -> Result<()> {
            Ok(())
        }

        fn name(&self) -> &str {
            "panicking"
        }
    }

    #[test]
    fn test_level_filtering() {
        let (logger, out, _) = memory_logger(&LoggerConfig::default());

        logger.debug("hidden");
        logger.info("shown");
        logger.warn("also shown");

        let lines = out.lines();
        assert_eq!(lines.len(), 2);
        assert_eq!(parse(&lines[0])["msg"], "shown");
        assert_eq!(parse(&lines[1])["level"], "warn");
    }

    #[test]
    fn test_set_level_is_shared_by_clones() {
        let (logger, out, _) = memory_logger(&LoggerConfig::default());
        let child = logger.named("child");

        logger.set_level(LogLevel::Debug);
        assert_eq!(child.level(), LogLevel::Debug);
        child.debug("now visible");
        assert_eq!(out.lines().len(), 1);
    }

    #[test]
    fn test_caller_points_at_call_site() {
        let (logger, out, _) = memory_logger(&LoggerConfig::default());
        logger.info("where am I");

        let record = parse(&out.lines()[0]);
        let caller = record["caller"].as_str().unwrap();
        assert!(caller.starts_with("core/logger.rs:"), "caller was {}", caller);
    }

    #[test]
    fn test_disable_caller() {
        let config = LoggerConfig::default().with_disable_caller(true);
        let (logger, out, _) = memory_logger(&config);
        logger.info("no caller");
        assert!(parse(&out.lines()[0]).get("caller").is_none());
    }

    #[test]
    fn test_stacktrace_levels() {
        let (logger, out, _) = memory_logger(&LoggerConfig::default());
        logger.warn("no stack");
        logger.error("with stack");
        let lines = out.lines_json();
        assert!(lines[0].get("stacktrace").is_none());
        assert!(lines[1]["stacktrace"].is_string());

        let dev = LoggerConfig::default().with_development(true);
        let (logger, out, _) = memory_logger(&dev);
        logger.warn("stack in development");
        assert!(out.lines_json()[0]["stacktrace"].is_string());

        let off = LoggerConfig::default().with_disable_stacktrace(true);
        let (logger, out, _) = memory_logger(&off);
        logger.error("never");
        assert!(out.lines_json()[0].get("stacktrace").is_none());
    }

    #[test]
    fn test_named_and_with_fields() {
        let config = LoggerConfig::default().with_initial_field("service", "kv");
        let (logger, out, _) = memory_logger(&config);

        let child = logger
            .named("raft")
            .named("node")
            .with(LogContext::new().with_field("id", 3));
        child.info_with_context("elected", LogContext::new().with_field("term", 7));

        let record = parse(&out.lines()[0]);
        assert_eq!(record["logger"], "raft.node");
        assert_eq!(record["service"], "kv");
        assert_eq!(record["id"], 3);
        assert_eq!(record["term"], 7);
        assert_eq!(child.name(), Some("raft.node"));
        assert_eq!(logger.name(), None);
    }

    #[test]
    fn test_sampling_suppresses_repeats() {
        let config = LoggerConfig::default().with_sampling(Some(SamplingConfig::new(2, 0)));
        let (logger, out, _) = memory_logger(&config);

        for _ in 0..5 {
            logger.info("repeated");
        }
        logger.info("different");

        assert_eq!(out.lines().len(), 3);
        assert_eq!(logger.metrics().sampled_out(), 3);
        assert_eq!(logger.metrics().total_logged(), 3);
        assert_eq!(logger.sampler_metrics().map(|m| m.dropped_count()), Some(3));
    }

    #[test]
    fn test_no_sampling() {
        let config = LoggerConfig::default().with_sampling(None);
        let (logger, out, _) = memory_logger(&config);
        for _ in 0..250 {
            logger.info("same");
        }
        assert_eq!(out.lines().len(), 250);
        assert!(logger.sampler_metrics().is_none());
    }

    #[test]
    fn test_write_errors_reported_to_error_outputs() {
        let err = MemorySink::new();
        let out = MemorySink::new();
        let logger = Logger::with_sinks(
            &LoggerConfig::default(),
            vec![Box::new(FailingSink), Box::new(out.clone())],
            vec![Box::new(err.clone())],
        );

        logger.info("still delivered");

        assert_eq!(out.lines().len(), 1);
        assert_eq!(logger.metrics().write_errors(), 1);
        let report = err.contents();
        assert!(report.contains("write error"));
        assert!(report.contains("simulated failure"));
    }

    #[test]
    fn test_panicking_sink_is_isolated() {
        let err = MemorySink::new();
        let out = MemorySink::new();
        let logger = Logger::with_sinks(
            &LoggerConfig::default(),
            vec![Box::new(PanickingSink), Box::new(out.clone())],
            vec![Box::new(err.clone())],
        );

        logger.error("survives");

        assert_eq!(out.lines().len(), 1);
        assert!(err.contents().contains("sink exploded"));
    }

    #[test]
    fn test_console_encoding() {
        let config = LoggerConfig::default()
            .with_format(LogFormat::Console)
            .with_disable_caller(true);
        let (logger, out, _) = memory_logger(&config);
        logger.info_with_context("ready", LogContext::new().with_field("port", 80));

        let line = &out.lines()[0];
        let parts: Vec<&str> = line.split('\t').collect();
        assert_eq!(parts.len(), 4);
        assert_eq!(parts[1], "info");
        assert_eq!(parts[2], "ready");
        assert_eq!(parts[3], "{\"port\":80}");
    }

    #[test]
    fn test_fatal_does_not_exit() {
        let (logger, out, _) = memory_logger(&LoggerConfig::default());
        logger.fatal("unrecoverable");
        assert_eq!(parse(&out.lines()[0])["level"], "fatal");
    }

    #[test]
    fn test_noop_logger() {
        let logger = Logger::noop();
        logger.fatal("nobody hears this");
        assert!(logger.sync().is_ok());
        assert!(!logger.enabled(LogLevel::Error));
    }

    #[test]
    fn test_debug_output() {
        let logger = Logger::noop().named("quiet");
        let debug = format!("{:?}", logger);
        assert!(debug.contains("Logger"));
        assert!(debug.contains("quiet"));
    }

    trait JsonLines {
        fn lines_json(&self) -> Vec<serde_json::Value>;
    }

    impl JsonLines for MemorySink {
        fn lines_json(&self) -> Vec<serde_json::Value> {
            // stack traces are escaped inside the JSON string, one record per line
            self.lines().iter().map(|l| parse(l)).collect()
        }
    }
}
