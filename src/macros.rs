//! Formatting macros over [`Logger`](crate::Logger) and
//! [`SugaredLogger`](crate::SugaredLogger)
//!
//! The message is only formatted when the level is enabled. An optional
//! trailing `; key => value, ...` list attaches structured fields, the macro
//! counterpart of the sugared `*w` methods.
//!
//! # Examples
//!
//! ```
//! use rust_logs::prelude::*;
//! use rust_logs::{info, merge_paths, warn};
//!
//! let logger = default_logger_config()
//!     .with_output_paths(vec!["/dev/null".to_string()])
//!     .build()?;
//!
//! let paths = merge_paths(&["stderr", "stderr", "/var/log/kv.log"]);
//! info!(logger, "logger ready with {} outputs", paths.len());
//!
//! // Fields after the semicolon become structured context
//! warn!(logger, "unknown encoding {:?}, using json", "xml"; "requested" => "xml", "fallback" => true);
//! # Ok::<(), LoggerError>(())
//! ```

/// Log at an explicit level.
///
/// ```
/// # use rust_logs::prelude::*;
/// use rust_logs::{convert_to_level, log};
///
/// let logger = Logger::noop();
/// let level = convert_to_level("warning");
/// log!(logger, level, "level resolved from configuration");
/// log!(logger, LogLevel::Debug, "{} outputs merged", 2; "discard" => false);
/// ```
#[macro_export]
macro_rules! log {
    ($logger:expr, $level:expr, $fmt:literal $(, $arg:expr)* ; $($key:expr => $value:expr),+ $(,)?) => {{
        let logger = &$logger;
        let level = $level;
        if logger.enabled(level) {
            let context = $crate::LogContext::new()$(.with_field($key, $value))+;
            logger.log_with_context(level, format!($fmt $(, $arg)*), context);
        }
    }};
    ($logger:expr, $level:expr, $($arg:tt)+) => {{
        let logger = &$logger;
        let level = $level;
        if logger.enabled(level) {
            logger.log(level, format!($($arg)+));
        }
    }};
}

/// Log at `Debug`.
///
/// ```
/// # use rust_logs::prelude::*;
/// use rust_logs::debug;
///
/// let logger = Logger::noop();
/// debug!(logger, "opening output {}", "stderr");
/// ```
#[macro_export]
macro_rules! debug {
    ($logger:expr, $($arg:tt)+) => {
        $crate::log!($logger, $crate::LogLevel::Debug, $($arg)+)
    };
}

/// Log at `Info`.
///
/// ```
/// # use rust_logs::prelude::*;
/// use rust_logs::info;
///
/// let logger = Logger::noop();
/// info!(logger, "global logger installed"; "level" => "info");
/// ```
#[macro_export]
macro_rules! info {
    ($logger:expr, $($arg:tt)+) => {
        $crate::log!($logger, $crate::LogLevel::Info, $($arg)+)
    };
}

/// Log at `Warn`.
#[macro_export]
macro_rules! warn {
    ($logger:expr, $($arg:tt)+) => {
        $crate::log!($logger, $crate::LogLevel::Warn, $($arg)+)
    };
}

/// Log at `Error`.
///
/// ```
/// # use rust_logs::prelude::*;
/// use rust_logs::error;
///
/// let logger = Logger::noop();
/// if let Err(e) = validate_format("yaml") {
///     error!(logger, "rejected encoding: {}", e; "value" => "yaml");
/// }
/// ```
#[macro_export]
macro_rules! error {
    ($logger:expr, $($arg:tt)+) => {
        $crate::log!($logger, $crate::LogLevel::Error, $($arg)+)
    };
}

/// Log at `Fatal`; flushes but does not exit.
#[macro_export]
macro_rules! fatal {
    ($logger:expr, $($arg:tt)+) => {
        $crate::log!($logger, $crate::LogLevel::Fatal, $($arg)+)
    };
}
