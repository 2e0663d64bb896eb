//! # Rust Logs
//!
//! Process-wide structured logger setup.
//!
//! ## Features
//!
//! - **Two Encodings**: JSON records or tab-separated console lines
//! - **Validated Configuration**: encoding tokens and level names are checked up front
//! - **Sampling**: first 100 records per message per second, then every 100th
//! - **Global Registry**: install one logger and reach it from anywhere
//!
//! ## Example
//!
//! ```
//! use rust_logs::prelude::*;
//!
//! let format = validate_format("console")?;
//! let logger = LoggerConfig::default()
//!     .with_format(format)
//!     .with_level(LogLevel::Debug)
//!     .with_output_paths(vec!["stderr".to_string(), "/dev/null".to_string()])
//!     .merge_output_paths()
//!     .build()?;
//!
//! logger.debug("discarded, /dev/null won the merge");
//! # Ok::<(), LoggerError>(())
//! ```

pub mod core;
pub mod macros;
pub mod sinks;

pub use crate::core::global;

pub mod prelude {
    pub use crate::core::{
        create_default_logger, default_logger_config, init_global_logger,
        init_global_sugared_logger, merge_output_paths, validate_format, FieldValue, LogContext,
        LogFormat, LogLevel, Logger, LoggerConfig, LoggerError, Result, SamplingConfig, Sink,
        SugaredLogger,
    };
    pub use crate::sinks::MemorySink;
}

pub use crate::core::{
    convert_to_level, create_default_logger, default_format, default_logger_config,
    global_logger, global_sugared_logger, init_global_logger, init_global_sugared_logger,
    merge_output_paths, merge_paths, replace_globals, validate_format, Caller, CallerEncoder,
    DurationEncoder, EncoderConfig, FieldValue, LevelEncoder, LogContext, LogEntry, LogFormat,
    LogLevel, LogSampler, Logger, LoggerConfig, LoggerError, LoggerMetrics, Result,
    SamplerMetrics, SamplingConfig, Sink, SugaredLogger, TimeEncoder, CONSOLE_LOG_FORMAT,
    DEFAULT_LOG_LEVEL, DISCARD_OUTPUT, JSON_LOG_FORMAT, STDERR_OUTPUT, STDOUT_OUTPUT,
    SUPPORTED_LOG_FORMATS,
};
pub use sinks::{DiscardSink, FileSink, MemorySink, StderrSink, StdoutSink};
