use crate::artifacts::log::TIMESTAMP_FORMAT;
use anyhow::Context;
use chrono::{NaiveDateTime, Timelike};

/// Time source for commit timestamps
pub trait Clock {
    fn now(&self) -> NaiveDateTime;
}

/// Local wall-clock time, truncated to whole seconds
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> NaiveDateTime {
        let now = chrono::Local::now().naive_local();
        now.with_nanosecond(0).unwrap_or(now)
    }
}

/// Clock pinned to a single instant
#[derive(Debug, Clone, Copy)]
pub struct FixedClock(NaiveDateTime);

impl FixedClock {
    pub fn new(at: NaiveDateTime) -> Self {
        FixedClock(at)
    }

    /// Parse a `%Y-%m-%d %H:%M:%S` timestamp
    pub fn try_parse(raw: &str) -> anyhow::Result<Self> {
        let at = NaiveDateTime::parse_from_str(raw.trim(), TIMESTAMP_FORMAT)
            .with_context(|| format!("invalid date '{}', expected {}", raw, TIMESTAMP_FORMAT))?;
        Ok(FixedClock(at))
    }
}

impl Clock for FixedClock {
    fn now(&self) -> NaiveDateTime {
        self.0
    }
}
