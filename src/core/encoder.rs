//! Record encoding
//!
//! Turns a [`LogEntry`] into one output line, either as a JSON object or as a
//! tab-separated console line, using the field names and element encoders of
//! an [`EncoderConfig`].

use super::format::LogFormat;
use super::log_context::{FieldValue, LogContext};
use super::log_entry::{Caller, LogEntry};
use super::log_level::LogLevel;
use super::timestamp::{DurationEncoder, TimeEncoder};
use serde::{Deserialize, Serialize};

/// How the level element is rendered
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum LevelEncoder {
    /// `info`
    #[default]
    Lowercase,
    /// `info`, coloured in console output
    LowercaseColor,
    /// `INFO`
    Capital,
    /// `INFO`, coloured in console output
    CapitalColor,
}

impl LevelEncoder {
    /// Render `level`; colour codes are only emitted when `colorize` is set
    pub fn encode(&self, level: LogLevel, colorize: bool) -> String {
        let text = match self {
            LevelEncoder::Lowercase | LevelEncoder::LowercaseColor => level.as_str(),
            LevelEncoder::Capital | LevelEncoder::CapitalColor => level.as_capital_str(),
        };
        if colorize && self.is_colored() {
            return paint(text, level);
        }
        text.to_string()
    }

    pub fn is_colored(&self) -> bool {
        matches!(self, LevelEncoder::LowercaseColor | LevelEncoder::CapitalColor)
    }
}

#[cfg(feature = "console")]
fn paint(text: &str, level: LogLevel) -> String {
    use colored::Colorize;
    text.color(level.color_code()).to_string()
}

#[cfg(not(feature = "console"))]
fn paint(text: &str, _level: LogLevel) -> String {
    text.to_string()
}

/// How the caller element is rendered
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CallerEncoder {
    /// `core/logger.rs:42`
    #[default]
    Short,
    /// `src/core/logger.rs:42`
    Full,
}

impl CallerEncoder {
    pub fn encode(&self, caller: &Caller) -> String {
        match self {
            CallerEncoder::Short => caller.trimmed_path(),
            CallerEncoder::Full => caller.full_path(),
        }
    }
}

/// Field names and element encoders shared by both output encodings
///
/// An empty key drops that element from the output.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct EncoderConfig {
    pub time_key: String,
    pub level_key: String,
    pub name_key: String,
    pub caller_key: String,
    pub message_key: String,
    pub stacktrace_key: String,
    pub line_ending: String,
    pub level_encoder: LevelEncoder,
    pub time_encoder: TimeEncoder,
    pub duration_encoder: DurationEncoder,
    pub caller_encoder: CallerEncoder,
}

impl Default for EncoderConfig {
    fn default() -> Self {
        Self {
            time_key: "ts".to_string(),
            level_key: "level".to_string(),
            name_key: "logger".to_string(),
            caller_key: "caller".to_string(),
            message_key: "msg".to_string(),
            stacktrace_key: "stacktrace".to_string(),
            line_ending: "\n".to_string(),
            level_encoder: LevelEncoder::Lowercase,
            time_encoder: TimeEncoder::Iso8601Micros,
            duration_encoder: DurationEncoder::String,
            caller_encoder: CallerEncoder::Short,
        }
    }
}

impl EncoderConfig {
    /// Encode `entry` as one line, line ending included
    pub fn encode(&self, format: LogFormat, entry: &LogEntry) -> String {
        match format {
            LogFormat::Json => self.encode_json(entry),
            LogFormat::Console => self.encode_console(entry),
        }
    }

    fn encode_json(&self, entry: &LogEntry) -> String {
        let mut out = JsonObject::new();

        if !self.level_key.is_empty() {
            out.string(&self.level_key, &self.level_encoder.encode(entry.level, false));
        }
        if !self.time_key.is_empty() {
            let ts = self.time_encoder.encode(&entry.timestamp);
            if self.time_encoder.is_numeric() {
                out.raw(&self.time_key, &ts);
            } else {
                out.string(&self.time_key, &ts);
            }
        }
        if let (false, Some(name)) = (self.name_key.is_empty(), &entry.logger_name) {
            out.string(&self.name_key, name);
        }
        if let (false, Some(caller)) = (self.caller_key.is_empty(), &entry.caller) {
            out.string(&self.caller_key, &self.caller_encoder.encode(caller));
        }
        if !self.message_key.is_empty() {
            out.string(&self.message_key, &entry.message);
        }
        self.write_fields(&mut out, &entry.context);
        if let (false, Some(stack)) = (self.stacktrace_key.is_empty(), &entry.stack) {
            out.string(&self.stacktrace_key, stack);
        }

        let mut line = out.finish();
        line.push_str(&self.line_ending);
        line
    }

    fn encode_console(&self, entry: &LogEntry) -> String {
        let mut elements: Vec<String> = Vec::with_capacity(6);

        if !self.time_key.is_empty() {
            elements.push(self.time_encoder.encode(&entry.timestamp));
        }
        if !self.level_key.is_empty() {
            elements.push(self.level_encoder.encode(entry.level, true));
        }
        if let (false, Some(name)) = (self.name_key.is_empty(), &entry.logger_name) {
            elements.push(name.clone());
        }
        if let (false, Some(caller)) = (self.caller_key.is_empty(), &entry.caller) {
            elements.push(self.caller_encoder.encode(caller));
        }
        if !self.message_key.is_empty() {
            elements.push(entry.sanitized_message());
        }
        if !entry.context.is_empty() {
            let mut fields = JsonObject::new();
            self.write_fields(&mut fields, &entry.context);
            elements.push(fields.finish());
        }

        let mut line = elements.join("\t");
        if let (false, Some(stack)) = (self.stacktrace_key.is_empty(), &entry.stack) {
            line.push('\n');
            line.push_str(stack);
        }
        line.push_str(&self.line_ending);
        line
    }

    fn write_fields(&self, out: &mut JsonObject, context: &LogContext) {
        for (key, value) in context.fields() {
            match value {
                FieldValue::Duration(d) => {
                    let encoded = self.duration_encoder.encode(*d);
                    if self.duration_encoder.is_numeric() {
                        out.raw(key, &encoded);
                    } else {
                        out.string(key, &encoded);
                    }
                }
                other => out.raw(key, &other.to_json_value().to_string()),
            }
        }
    }
}

/// Insertion-ordered JSON object writer
struct JsonObject {
    buf: String,
    empty: bool,
}

impl JsonObject {
    fn new() -> Self {
        Self {
            buf: String::from("{"),
            empty: true,
        }
    }

    fn key(&mut self, key: &str) {
        if !self.empty {
            self.buf.push(',');
        }
        self.empty = false;
        self.buf.push_str(&json_string(key));
        self.buf.push(':');
    }

    fn string(&mut self, key: &str, value: &str) {
        self.key(key);
        self.buf.push_str(&json_string(value));
    }

    fn raw(&mut self, key: &str, value: &str) {
        self.key(key);
        self.buf.push_str(value);
    }

    fn finish(mut self) -> String {
        self.buf.push('}');
        self.buf
    }
}

fn json_string(s: &str) -> String {
    serde_json::Value::from(s).to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{TimeZone, Utc};
    use std::time::Duration;

    fn entry(level: LogLevel, message: &str) -> LogEntry {
        let mut entry = LogEntry::new(level, message);
        entry.timestamp = Utc.with_ymd_and_hms(2024, 3, 15, 10, 30, 0).unwrap()
            + chrono::Duration::microseconds(123456);
        entry
    }

    #[test]
    fn test_default_encoder_config() {
        let config = EncoderConfig::default();
        assert_eq!(config.time_key, "ts");
        assert_eq!(config.message_key, "msg");
        assert_eq!(config.level_encoder, LevelEncoder::Lowercase);
        assert_eq!(config.time_encoder, TimeEncoder::Iso8601Micros);
        assert_eq!(config.caller_encoder, CallerEncoder::Short);
    }

    #[test]
    fn test_json_record_layout() {
        let config = EncoderConfig::default();
        let entry = entry(LogLevel::Info, "server started")
            .with_name(Some("etcd".to_string()))
            .with_caller(Caller {
                file: "src/server/main.rs",
                line: 12,
            })
            .with_context(LogContext::new().with_field("port", 2379));

        let line = config.encode(LogFormat::Json, &entry);
        assert_eq!(
            line,
            "{\"level\":\"info\",\"ts\":\"2024-03-15T10:30:00.123456+0000\",\"logger\":\"etcd\",\
             \"caller\":\"server/main.rs:12\",\"msg\":\"server started\",\"port\":2379}\n"
        );
    }

    #[test]
    fn test_json_escapes_message() {
        let config = EncoderConfig::default();
        let line = config.encode(LogFormat::Json, &entry(LogLevel::Warn, "a \"quoted\"\nline"));
        let parsed: serde_json::Value = serde_json::from_str(line.trim_end()).unwrap();
        assert_eq!(parsed["msg"], "a \"quoted\"\nline");
        assert_eq!(parsed["level"], "warn");
    }

    #[test]
    fn test_json_numeric_time_and_empty_keys() {
        let config = EncoderConfig {
            time_encoder: TimeEncoder::EpochMillis,
            level_key: String::new(),
            ..EncoderConfig::default()
        };
        let line = config.encode(LogFormat::Json, &entry(LogLevel::Info, "x"));
        let parsed: serde_json::Value = serde_json::from_str(line.trim_end()).unwrap();
        assert_eq!(parsed["ts"], serde_json::json!(1710498600123_i64));
        assert!(parsed.get("level").is_none());
    }

    #[test]
    fn test_console_record_layout() {
        let config = EncoderConfig::default();
        let entry = entry(LogLevel::Error, "disk\tfull")
            .with_context(LogContext::new().with_field("free", 0));

        let line = config.encode(LogFormat::Console, &entry);
        assert_eq!(
            line,
            "2024-03-15T10:30:00.123456+0000\terror\tdisk\\tfull\t{\"free\":0}\n"
        );
    }

    #[test]
    fn test_console_stacktrace_on_next_line() {
        let config = EncoderConfig::default();
        let entry = entry(LogLevel::Error, "boom").with_stack("frame 0\nframe 1".to_string());
        let line = config.encode(LogFormat::Console, &entry);
        assert!(line.ends_with("\tboom\nframe 0\nframe 1\n"));
    }

    #[test]
    fn test_duration_fields_use_duration_encoder() {
        let mut config = EncoderConfig::default();
        let entry = entry(LogLevel::Info, "took")
            .with_context(LogContext::new().with_field("elapsed", Duration::from_millis(1500)));

        let line = config.encode(LogFormat::Json, &entry);
        assert!(line.contains("\"elapsed\":\"1.5s\""));

        config.duration_encoder = DurationEncoder::Millis;
        let line = config.encode(LogFormat::Json, &entry);
        assert!(line.contains("\"elapsed\":1500"));
    }

    #[test]
    fn test_level_encoders() {
        assert_eq!(LevelEncoder::Lowercase.encode(LogLevel::Warn, true), "warn");
        assert_eq!(LevelEncoder::Capital.encode(LogLevel::Warn, false), "WARN");
        assert_eq!(LevelEncoder::CapitalColor.encode(LogLevel::Fatal, false), "FATAL");
        assert!(LevelEncoder::LowercaseColor.is_colored());
    }

    #[test]
    fn test_encoder_config_serde_defaults() {
        let config: EncoderConfig =
            serde_json::from_str(r#"{"messageKey":"message","levelEncoder":"capital"}"#).unwrap();
        assert_eq!(config.message_key, "message");
        assert_eq!(config.level_encoder, LevelEncoder::Capital);
        assert_eq!(config.time_key, "ts");
    }
}
