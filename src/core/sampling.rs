//! Log sampling for high-volume call sites
//!
//! Bounds log volume by rate-limiting repeated records. Within every tick
//! (one second by default) each `(level, message)` pair may emit its
//! first `initial` records unconditionally; after that only every
//! `thereafter`-th record passes.
//!
//! # Example
//!
//! ```
//! use rust_logs::{LogLevel, LogSampler, SamplingConfig};
//!
//! let sampler = LogSampler::new(SamplingConfig::new(2, 3));
//! let passed: Vec<bool> = (0..8).map(|_| sampler.should_sample(LogLevel::Info, "tick")).collect();
//! assert_eq!(passed, vec![true, true, false, false, true, false, false, true]);
//! ```

use super::log_level::LogLevel;
use parking_lot::Mutex;
use serde::{Deserialize, Serialize};
use std::sync::atomic::{AtomicU64, Ordering};
use std::time::{Duration, Instant};

/// Records per key that always pass within one tick
pub const DEFAULT_SAMPLING_INITIAL: u64 = 100;
/// After the initial burst, one record in this many passes
pub const DEFAULT_SAMPLING_THEREAFTER: u64 = 100;
/// Length of one sampling window
pub const DEFAULT_SAMPLING_TICK: Duration = Duration::from_secs(1);

/// Configuration for log sampling
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SamplingConfig {
    /// Records per key emitted unconditionally in each tick
    pub initial: u64,

    /// Every `thereafter`-th record per key is emitted once `initial` is used
    /// up; `0` drops everything past the initial burst
    pub thereafter: u64,

    /// Window after which per-key counters start over
    #[serde(with = "tick_millis")]
    pub tick: Duration,
}

impl Default for SamplingConfig {
    fn default() -> Self {
        Self {
            initial: DEFAULT_SAMPLING_INITIAL,
            thereafter: DEFAULT_SAMPLING_THEREAFTER,
            tick: DEFAULT_SAMPLING_TICK,
        }
    }
}

impl SamplingConfig {
    pub fn new(initial: u64, thereafter: u64) -> Self {
        Self {
            initial,
            thereafter,
            ..Default::default()
        }
    }

    #[must_use]
    pub fn with_tick(mut self, tick: Duration) -> Self {
        self.tick = tick;
        self
    }
}

mod tick_millis {
    use serde::{Deserialize, Deserializer, Serializer};
    use std::time::Duration;

    pub fn serialize<S: Serializer>(tick: &Duration, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_u64(u64::try_from(tick.as_millis()).unwrap_or(u64::MAX))
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Duration, D::Error> {
        u64::deserialize(deserializer).map(Duration::from_millis)
    }
}

/// Metrics for sampling observability
///
/// # Example
///
/// ```
/// use rust_logs::SamplerMetrics;
///
/// let metrics = SamplerMetrics::new();
/// assert_eq!(metrics.sampled_count(), 0);
/// assert_eq!(metrics.dropped_count(), 0);
/// ```
#[derive(Debug)]
pub struct SamplerMetrics {
    /// Number of records that passed sampling
    sampled_count: AtomicU64,

    /// Number of records dropped by sampling
    dropped_count: AtomicU64,
}

impl SamplerMetrics {
    /// Create new metrics with all counters at zero
    pub const fn new() -> Self {
        Self {
            sampled_count: AtomicU64::new(0),
            dropped_count: AtomicU64::new(0),
        }
    }

    #[inline]
    pub fn sampled_count(&self) -> u64 {
        self.sampled_count.load(Ordering::Relaxed)
    }

    #[inline]
    pub fn dropped_count(&self) -> u64 {
        self.dropped_count.load(Ordering::Relaxed)
    }

    #[inline]
    pub fn total_count(&self) -> u64 {
        self.sampled_count() + self.dropped_count()
    }

    #[inline]
    pub(crate) fn record_sampled(&self) {
        self.sampled_count.fetch_add(1, Ordering::Relaxed);
    }

    #[inline]
    pub(crate) fn record_dropped(&self) {
        self.dropped_count.fetch_add(1, Ordering::Relaxed);
    }

    /// Share of records that passed; 1.0 before any record was seen
    pub fn effective_sample_rate(&self) -> f64 {
        let total = self.total_count();
        if total == 0 {
            1.0
        } else {
            self.sampled_count() as f64 / total as f64
        }
    }
}

impl Default for SamplerMetrics {
    fn default() -> Self {
        Self::new()
    }
}

/// Counter slots per level
///
/// Messages are mapped onto slots by hash, so memory stays fixed however
/// many distinct messages are logged. Messages sharing a slot share a budget.
pub const SAMPLING_SLOTS_PER_LEVEL: usize = 4096;

/// Counter for one slot in the current tick
#[derive(Debug, Clone, Copy)]
struct Counter {
    window_start: Option<Instant>,
    count: u64,
}

impl Counter {
    const EMPTY: Counter = Counter {
        window_start: None,
        count: 0,
    };

    fn increment(&mut self, now: Instant, tick: Duration) -> u64 {
        match self.window_start {
            Some(start) if now.duration_since(start) < tick => {}
            _ => {
                self.window_start = Some(now);
                self.count = 0;
            }
        }
        self.count += 1;
        self.count
    }
}

/// Log sampler keyed by level and message hash
///
/// Thread-safe: counters live behind a single mutex, metrics are atomic.
pub struct LogSampler {
    config: SamplingConfig,
    counters: Mutex<Vec<Counter>>,
    metrics: SamplerMetrics,
}

impl LogSampler {
    pub fn new(config: SamplingConfig) -> Self {
        Self {
            config,
            counters: Mutex::new(vec![
                Counter::EMPTY;
                LogLevel::ALL.len() * SAMPLING_SLOTS_PER_LEVEL
            ]),
            metrics: SamplerMetrics::new(),
        }
    }

    /// Decide whether a record should be emitted
    pub fn should_sample(&self, level: LogLevel, message: &str) -> bool {
        self.should_sample_at(level, message, Instant::now())
    }

    fn should_sample_at(&self, level: LogLevel, message: &str, now: Instant) -> bool {
        let n = self.counters.lock()[slot(level, message)].increment(now, self.config.tick);

        let sample = n <= self.config.initial
            || (self.config.thereafter > 0
                && (n - self.config.initial) % self.config.thereafter == 0);

        if sample {
            self.metrics.record_sampled();
        } else {
            self.metrics.record_dropped();
        }
        sample
    }

    pub fn metrics(&self) -> &SamplerMetrics {
        &self.metrics
    }

    pub fn config(&self) -> &SamplingConfig {
        &self.config
    }
}

/// Index of the counter for `(level, message)`
fn slot(level: LogLevel, message: &str) -> usize {
    let hash = fnv32a(message) as usize % SAMPLING_SLOTS_PER_LEVEL;
    level as usize * SAMPLING_SLOTS_PER_LEVEL + hash
}

/// 32-bit FNV-1a
fn fnv32a(s: &str) -> u32 {
    const OFFSET: u32 = 2_166_136_261;
    const PRIME: u32 = 16_777_619;
    s.bytes()
        .fold(OFFSET, |hash, byte| (hash ^ u32::from(byte)).wrapping_mul(PRIME))
}

impl std::fmt::Debug for LogSampler {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("LogSampler")
            .field("config", &self.config)
            .field("metrics", &self.metrics)
            .finish()
    }
}
