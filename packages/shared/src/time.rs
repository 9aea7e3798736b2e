//! Time-related utilities with clock abstraction for testability.

use chrono::{DateTime, FixedOffset, Local, Utc};

/// Clock trait for dependency injection and testing
pub trait Clock: Send + Sync {
    /// Get current Unix timestamp (milliseconds)
    fn now_millis(&self) -> i64;
}

/// System clock implementation (uses actual system time)
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now_millis(&self) -> i64 {
        Utc::now().timestamp_millis()
    }
}

/// Fixed clock implementation for testing (returns a fixed time)
#[derive(Debug, Clone, Copy)]
pub struct FixedClock {
    fixed_time: i64,
}

impl FixedClock {
    /// Create a new fixed clock with the given timestamp
    pub fn new(fixed_time_millis: i64) -> Self {
        Self {
            fixed_time: fixed_time_millis,
        }
    }
}

impl Clock for FixedClock {
    fn now_millis(&self) -> i64 {
        self.fixed_time
    }
}

/// UTC offset of the machine the client runs on.
pub fn local_offset() -> FixedOffset {
    *Local::now().offset()
}

/// Format a Unix timestamp (milliseconds) as `HH:MM:SS` at the given offset.
///
/// Timestamps chrono cannot represent are shown as `--:--:--`.
pub fn timestamp_to_clock_time(timestamp_millis: i64, offset: FixedOffset) -> String {
    match DateTime::from_timestamp_millis(timestamp_millis) {
        Some(dt) => dt.with_timezone(&offset).format("%H:%M:%S").to_string(),
        None => "--:--:--".to_string(),
    }
}
