//! Core logger types and traits

pub mod config;
pub mod encoder;
pub mod error;
pub mod format;
pub mod global;
pub mod log_context;
pub mod log_entry;
pub mod log_level;
pub mod logger;
pub mod metrics;
pub mod output_paths;
pub mod sampling;
pub mod sink;
pub mod sugar;
pub mod timestamp;

pub use config::{default_logger_config, LoggerConfig};
pub use encoder::{CallerEncoder, EncoderConfig, LevelEncoder};
pub use error::{LoggerError, Result};
pub use format::{
    default_format, validate_format, LogFormat, CONSOLE_LOG_FORMAT, JSON_LOG_FORMAT,
    SUPPORTED_LOG_FORMATS,
};
pub use global::{
    create_default_logger, global_logger, global_sugared_logger, init_global_logger,
    init_global_sugared_logger, replace_globals,
};
pub use log_context::{FieldValue, LogContext};
pub use log_entry::{Caller, LogEntry};
pub use log_level::{convert_to_level, LogLevel, DEFAULT_LOG_LEVEL};
pub use logger::Logger;
pub use metrics::LoggerMetrics;
pub use output_paths::{merge_output_paths, merge_paths, DISCARD_OUTPUT, STDERR_OUTPUT, STDOUT_OUTPUT};
pub use sampling::{LogSampler, SamplerMetrics, SamplingConfig};
pub use sink::Sink;
pub use sugar::SugaredLogger;
pub use timestamp::{DurationEncoder, TimeEncoder};
