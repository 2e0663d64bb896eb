//! Sink implementations and destination resolution

pub mod console;
pub mod file;
pub mod memory;

pub use console::{DiscardSink, StderrSink, StdoutSink};
pub use file::FileSink;
pub use memory::MemorySink;

pub use crate::core::Sink;

use crate::core::{LoggerError, Result, DISCARD_OUTPUT, STDERR_OUTPUT, STDOUT_OUTPUT};

/// Open the sink named by a destination identifier
///
/// `stderr`, `stdout` and `/dev/null` are recognised by name; `file://` URLs
/// and bare strings are opened as files in append mode. Other URL schemes
/// are rejected.
pub fn open_sink(path: &str) -> Result<Box<dyn Sink>> {
    match path {
        STDERR_OUTPUT => Ok(Box::new(StderrSink::new())),
        STDOUT_OUTPUT => Ok(Box::new(StdoutSink::new())),
        DISCARD_OUTPUT => Ok(Box::new(DiscardSink::new())),
        "" => Err(LoggerError::config("sink", "empty output path")),
        _ => {
            if let Some(file_path) = path.strip_prefix("file://") {
                return Ok(Box::new(FileSink::new(file_path)?));
            }
            if let Some((scheme, _)) = path.split_once("://") {
                return Err(LoggerError::config(
                    "sink",
                    format!("unsupported output scheme '{}'", scheme),
                ));
            }
            Ok(Box::new(FileSink::new(path)?))
        }
    }
}

/// Open every destination of a list, failing on the first one that cannot be opened
pub fn open_sinks<S: AsRef<str>>(paths: &[S]) -> Result<Vec<Box<dyn Sink>>> {
    paths
        .iter()
        .map(|path| {
            let path = path.as_ref();
            open_sink(path).map_err(|e| LoggerError::construction(path, e))
        })
        .collect()
}
