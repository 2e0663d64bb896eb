//! Output destination identifiers and destination-list normalisation

use super::config::LoggerConfig;
use std::collections::BTreeSet;

/// Standard error stream
pub const STDERR_OUTPUT: &str = "stderr";
/// Standard output stream
pub const STDOUT_OUTPUT: &str = "stdout";
/// Discards all output; overrides every other entry of its list
pub const DISCARD_OUTPUT: &str = "/dev/null";

/// Deduplicate and sort one destination list
///
/// If [`DISCARD_OUTPUT`] appears anywhere, the result is exactly
/// `["/dev/null"]`. Otherwise the distinct entries come back in ascending
/// order, so equal sets always produce equal lists.
///
/// # Example
///
/// ```
/// use rust_logs::merge_paths;
///
/// let paths = vec!["b".to_string(), "a".to_string(), "a".to_string(), "c".to_string()];
/// assert_eq!(merge_paths(&paths), vec!["a", "b", "c"]);
///
/// let paths = vec!["stderr".to_string(), "/dev/null".to_string()];
/// assert_eq!(merge_paths(&paths), vec!["/dev/null"]);
/// ```
pub fn merge_paths<S: AsRef<str>>(paths: &[S]) -> Vec<String> {
    let unique: BTreeSet<&str> = paths.iter().map(AsRef::as_ref).collect();
    if unique.contains(DISCARD_OUTPUT) {
        return vec![DISCARD_OUTPUT.to_string()];
    }
    unique.into_iter().map(str::to_string).collect()
}

/// Normalise both destination lists of a configuration
///
/// `output_paths` and `error_output_paths` are merged independently with
/// [`merge_paths`]; every other field is returned untouched.
pub fn merge_output_paths(mut config: LoggerConfig) -> LoggerConfig {
    config.output_paths = merge_paths(&config.output_paths);
    config.error_output_paths = merge_paths(&config.error_output_paths);
    config
}
