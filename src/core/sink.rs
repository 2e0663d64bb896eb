//! Sink trait for log output destinations

use super::error::Result;

/// A destination that receives encoded records
///
/// Each call to `write` carries one complete record, line ending included.
pub trait Sink: Send + Sync {
    fn write(&mut self, record: &[u8]) -> Result<()>;
    fn flush(&mut self) -> Result<()>;
    fn name(&self) -> &str;
}
