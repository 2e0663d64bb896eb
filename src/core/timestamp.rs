//! Time and duration encoders
//!
//! Controls how record timestamps and duration-valued fields are rendered.
//! The default time encoder produces ISO 8601 timestamps with microsecond
//! precision and a colon-free offset: `2024-03-15T10:30:00.123456+0000`.

use chrono::{DateTime, SecondsFormat, Utc};
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// strftime pattern of [`TimeEncoder::Iso8601Micros`]
pub const ISO8601_MICROS_PATTERN: &str = "%Y-%m-%dT%H:%M:%S%.6f%z";

/// Timestamp encoding options
///
/// # Examples
///
/// ```
/// use rust_logs::TimeEncoder;
/// use chrono::{TimeZone, Utc};
///
/// let ts = Utc.with_ymd_and_hms(2024, 3, 15, 10, 30, 0).unwrap();
/// assert_eq!(TimeEncoder::Iso8601Micros.encode(&ts), "2024-03-15T10:30:00.000000+0000");
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TimeEncoder {
    /// ISO 8601 with microseconds and numeric offset: `2024-03-15T10:30:00.123456+0000`
    #[default]
    Iso8601Micros,

    /// ISO 8601 with milliseconds: `2024-03-15T10:30:00.123+0000`
    Iso8601,

    /// RFC 3339 with second precision: `2024-03-15T10:30:00Z`
    Rfc3339,

    /// RFC 3339 with nanoseconds: `2024-03-15T10:30:00.123456000Z`
    Rfc3339Nano,

    /// Floating-point seconds since the Unix epoch: `1710498600.123456`
    Epoch,

    /// Integer milliseconds since the Unix epoch
    EpochMillis,

    /// Integer nanoseconds since the Unix epoch
    EpochNanos,

    /// Any strftime-compatible pattern
    Custom(String),
}

impl TimeEncoder {
    #[must_use]
    pub fn encode(&self, datetime: &DateTime<Utc>) -> String {
        match self {
            TimeEncoder::Iso8601Micros => datetime.format(ISO8601_MICROS_PATTERN).to_string(),
            TimeEncoder::Iso8601 => datetime.format("%Y-%m-%dT%H:%M:%S%.3f%z").to_string(),
            TimeEncoder::Rfc3339 => datetime.to_rfc3339_opts(SecondsFormat::Secs, true),
            TimeEncoder::Rfc3339Nano => datetime.to_rfc3339_opts(SecondsFormat::Nanos, true),
            TimeEncoder::Epoch => {
                let secs = datetime.timestamp() as f64
                    + f64::from(datetime.timestamp_subsec_micros()) / 1_000_000.0;
                secs.to_string()
            }
            TimeEncoder::EpochMillis => datetime.timestamp_millis().to_string(),
            TimeEncoder::EpochNanos => datetime
                .timestamp_nanos_opt()
                .unwrap_or_else(|| datetime.timestamp_micros().saturating_mul(1_000))
                .to_string(),
            TimeEncoder::Custom(pattern) => datetime.format(pattern).to_string(),
        }
    }

    /// Whether the encoded value is a bare number (unquoted in JSON)
    #[must_use]
    pub fn is_numeric(&self) -> bool {
        matches!(
            self,
            TimeEncoder::Epoch | TimeEncoder::EpochMillis | TimeEncoder::EpochNanos
        )
    }
}

/// Encoding options for duration-valued fields
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DurationEncoder {
    /// Compact unit string: `1.5s`, `250ms`, `2m3s`
    #[default]
    String,
    /// Floating-point seconds
    Seconds,
    /// Integer milliseconds
    Millis,
    /// Integer nanoseconds
    Nanos,
}

impl DurationEncoder {
    #[must_use]
    pub fn encode(&self, duration: Duration) -> String {
        match self {
            DurationEncoder::String => duration_string(duration),
            DurationEncoder::Seconds => duration.as_secs_f64().to_string(),
            DurationEncoder::Millis => duration.as_millis().to_string(),
            DurationEncoder::Nanos => duration.as_nanos().to_string(),
        }
    }

    #[must_use]
    pub fn is_numeric(&self) -> bool {
        !matches!(self, DurationEncoder::String)
    }
}

fn duration_string(duration: Duration) -> String {
    let nanos = duration.as_nanos();
    if nanos == 0 {
        return "0s".to_string();
    }
    if nanos < 1_000 {
        return format!("{}ns", nanos);
    }
    if nanos < 1_000_000 {
        return format!("{}µs", scaled(nanos, 1_000));
    }
    if nanos < 1_000_000_000 {
        return format!("{}ms", scaled(nanos, 1_000_000));
    }

    let total_secs = duration.as_secs();
    let hours = total_secs / 3600;
    let minutes = (total_secs % 3600) / 60;
    let secs_nanos = u128::from(total_secs % 60) * 1_000_000_000
        + u128::from(duration.subsec_nanos());
    let secs = scaled(secs_nanos, 1_000_000_000);

    if hours > 0 {
        format!("{}h{}m{}s", hours, minutes, secs)
    } else if minutes > 0 {
        format!("{}m{}s", minutes, secs)
    } else {
        format!("{}s", secs)
    }
}

/// `value / unit` as a decimal with trailing zeros trimmed
fn scaled(value: u128, unit: u128) -> String {
    let whole = value / unit;
    let frac = value % unit;
    if frac == 0 {
        return whole.to_string();
    }
    let width = unit.to_string().len() - 1;
    let digits = format!("{:0width$}", frac, width = width);
    format!("{}.{}", whole, digits.trim_end_matches('0'))
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn fixed_datetime() -> DateTime<Utc> {
        // 2024-03-15 10:30:00.123456 UTC
        Utc.with_ymd_and_hms(2024, 3, 15, 10, 30, 0)
            .single()
            .expect("valid datetime")
            + chrono::Duration::microseconds(123456)
    }

    #[test]
    fn test_iso8601_micros_format() {
        let result = TimeEncoder::Iso8601Micros.encode(&fixed_datetime());
        assert_eq!(result, "2024-03-15T10:30:00.123456+0000");
    }

    #[test]
    fn test_iso8601_micros_keeps_trailing_zeros() {
        let dt = Utc.with_ymd_and_hms(2024, 3, 15, 10, 30, 0).unwrap()
            + chrono::Duration::microseconds(500_000);
        assert_eq!(
            TimeEncoder::Iso8601Micros.encode(&dt),
            "2024-03-15T10:30:00.500000+0000"
        );
    }

    #[test]
    fn test_iso8601_millis_format() {
        let result = TimeEncoder::Iso8601.encode(&fixed_datetime());
        assert_eq!(result, "2024-03-15T10:30:00.123+0000");
    }

    #[test]
    fn test_rfc3339_formats() {
        assert_eq!(
            TimeEncoder::Rfc3339.encode(&fixed_datetime()),
            "2024-03-15T10:30:00Z"
        );
        assert_eq!(
            TimeEncoder::Rfc3339Nano.encode(&fixed_datetime()),
            "2024-03-15T10:30:00.123456000Z"
        );
    }

    #[test]
    fn test_epoch_formats() {
        let dt = fixed_datetime();
        assert_eq!(TimeEncoder::EpochMillis.encode(&dt), "1710498600123");
        assert_eq!(TimeEncoder::EpochNanos.encode(&dt), "1710498600123456000");

        let secs: f64 = TimeEncoder::Epoch.encode(&dt).parse().unwrap();
        assert!((secs - 1710498600.123456).abs() < 1e-3);
    }

    #[test]
    fn test_custom_format() {
        let encoder = TimeEncoder::Custom("%Y/%m/%d %H:%M".to_string());
        assert_eq!(encoder.encode(&fixed_datetime()), "2024/03/15 10:30");
    }

    #[test]
    fn test_is_numeric() {
        assert!(!TimeEncoder::Iso8601Micros.is_numeric());
        assert!(!TimeEncoder::Rfc3339.is_numeric());
        assert!(TimeEncoder::Epoch.is_numeric());
        assert!(TimeEncoder::EpochMillis.is_numeric());
        assert!(!TimeEncoder::Custom("%s".to_string()).is_numeric());
    }

    #[test]
    fn test_time_encoder_serde() {
        let json = serde_json::to_string(&TimeEncoder::Iso8601Micros).unwrap();
        assert_eq!(json, "\"iso8601micros\"");
        let encoder: TimeEncoder = serde_json::from_str(r#"{"custom":"%Y"}"#).unwrap();
        assert_eq!(encoder, TimeEncoder::Custom("%Y".to_string()));
    }

    #[test]
    fn test_duration_string() {
        let enc = DurationEncoder::String;
        assert_eq!(enc.encode(Duration::ZERO), "0s");
        assert_eq!(enc.encode(Duration::from_nanos(750)), "750ns");
        assert_eq!(enc.encode(Duration::from_nanos(1_500)), "1.5µs");
        assert_eq!(enc.encode(Duration::from_millis(250)), "250ms");
        assert_eq!(enc.encode(Duration::from_millis(1_500)), "1.5s");
        assert_eq!(enc.encode(Duration::from_secs(123)), "2m3s");
        assert_eq!(enc.encode(Duration::from_secs(3600)), "1h0m0s");
    }

    #[test]
    fn test_duration_numeric() {
        let d = Duration::from_millis(1_500);
        assert_eq!(DurationEncoder::Seconds.encode(d), "1.5");
        assert_eq!(DurationEncoder::Millis.encode(d), "1500");
        assert_eq!(DurationEncoder::Nanos.encode(d), "1500000000");
        assert!(DurationEncoder::Millis.is_numeric());
        assert!(!DurationEncoder::String.is_numeric());
    }
}
