//! Process-wide logger registry
//!
//! Code that cannot have a logger passed in reads the one installed here.
//! Installation replaces any previous logger under a write lock, so
//! concurrent initializers are serialized and the last one wins.
//!
//! # Example
//!
//! ```
//! use rust_logs::{global, Logger};
//!
//! // Until something is installed, `logger()` hands out a no-op logger
//! global::logger().info("goes nowhere");
//!
//! global::replace_globals(Logger::noop().named("app"));
//! assert!(global::global_logger().is_some());
//! ```

use super::config::default_logger_config;
use super::error::Result;
use super::log_level::LogLevel;
use super::logger::Logger;
use super::sugar::SugaredLogger;
use parking_lot::{const_rwlock, RwLock};

static GLOBAL_LOGGER: RwLock<Option<Logger>> = const_rwlock(None);

/// Build a logger from the default configuration at the given level
///
/// The default configuration is taken fresh for every call; only its level
/// is overridden.
pub fn create_default_logger(level: LogLevel) -> Result<Logger> {
    default_logger_config().with_level(level).build()
}

/// Build a default logger and install it as the global logger
///
/// On failure nothing is installed and the error is returned; whether that
/// is fatal is up to the caller.
pub fn init_global_logger(level: LogLevel) -> Result<Logger> {
    let logger = create_default_logger(level)?;
    replace_globals(logger.clone());
    Ok(logger)
}

/// Like [`init_global_logger`], returning the sugared form
pub fn init_global_sugared_logger(level: LogLevel) -> Result<SugaredLogger> {
    init_global_logger(level).map(|logger| logger.sugar())
}

/// Install `logger` globally, returning whatever was installed before
pub fn replace_globals(logger: Logger) -> Option<Logger> {
    GLOBAL_LOGGER.write().replace(logger)
}

/// The installed logger, if any
pub fn global_logger() -> Option<Logger> {
    GLOBAL_LOGGER.read().clone()
}

/// The installed logger in sugared form, if any
pub fn global_sugared_logger() -> Option<SugaredLogger> {
    global_logger().map(|logger| logger.sugar())
}

/// The installed logger, or a no-op logger when none is installed
pub fn logger() -> Logger {
    global_logger().unwrap_or_else(Logger::noop)
}

/// Sugared form of [`logger`]
pub fn sugared() -> SugaredLogger {
    logger().sugar()
}
