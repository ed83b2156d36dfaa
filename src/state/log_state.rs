//! System log state
//!
//! Append-only, timestamped log shown in the terminal's log pane, plus
//! the pool of routine messages the background generator draws from.

use chrono::{DateTime, Local};
use rand::seq::SliceRandom;
use rand::Rng;

/// Maximum number of entries kept in memory
pub const MAX_LOG_ENTRIES: usize = 500;

/// Translation keys of routine background messages
pub const ROUTINE_LOG_KEYS: &[&str] = &[
    "logs.containmentCheck",
    "logs.monitoring",
    "logs.personnelShift",
    "logs.backupOperational",
    "logs.scanningAnomalies",
    "logs.securitySweep",
];

/// Translation key of the occasional anomaly warning
pub const ANOMALY_LOG_KEY: &str = "logs.anomalyDetected";

/// Translation keys logged once at startup
pub const STARTUP_LOG_KEYS: &[&str] = &["logs.systemInit", "logs.databaseOnline", "logs.securityActive"];

/// Log entry level
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogLevel {
    Info,
    Warning,
}

/// A single log line
#[derive(Debug, Clone)]
pub struct LogEntry {
    /// Monotonic sequence number, never reused
    pub seq: u64,
    pub timestamp: DateTime<Local>,
    pub level: LogLevel,
    pub message: String,
}

/// Bounded in-memory log
#[derive(Debug, Clone)]
pub struct SystemLog {
    entries: Vec<LogEntry>,
    next_seq: u64,
    capacity: usize,
}

impl Default for SystemLog {
    fn default() -> Self {
        Self::with_capacity(MAX_LOG_ENTRIES)
    }
}

impl SystemLog {
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            entries: Vec::new(),
            next_seq: 0,
            capacity: capacity.max(1),
        }
    }

    /// Append a message, dropping the oldest entry when full
    pub fn push(&mut self, message: impl Into<String>, level: LogLevel) -> u64 {
        let seq = self.next_seq;
        self.next_seq += 1;
        self.entries.push(LogEntry {
            seq,
            timestamp: Local::now(),
            level,
            message: message.into(),
        });
        if self.entries.len() > self.capacity {
            let excess = self.entries.len() - self.capacity;
            self.entries.drain(..excess);
        }
        seq
    }

    pub fn entries(&self) -> &[LogEntry] {
        &self.entries
    }

    #[cfg(test)]
    pub fn last(&self) -> Option<&LogEntry> {
        self.entries.last()
    }

    #[cfg(test)]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    #[cfg(test)]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Sequence number the next entry will get
    pub fn next_seq(&self) -> u64 {
        self.next_seq
    }

    /// Entries with a sequence number at or after `seq`
    pub fn entries_since(&self, seq: u64) -> impl Iterator<Item = &LogEntry> {
        self.entries.iter().filter(move |e| e.seq >= seq)
    }
}

/// Pick a routine message key
pub fn routine_log_key<R: Rng + ?Sized>(rng: &mut R) -> &'static str {
    ROUTINE_LOG_KEYS
        .choose(rng)
        .copied()
        .unwrap_or(ROUTINE_LOG_KEYS[0])
}

/// Whether a warning tick should emit the anomaly warning
pub fn should_warn<R: Rng + ?Sized>(rng: &mut R, threshold: f64) -> bool {
    rng.gen::<f64>() > threshold
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    #[test]
    fn test_push_and_capacity() {
        let mut log = SystemLog::with_capacity(2);
        log.push("one", LogLevel::Info);
        log.push("two", LogLevel::Info);
        log.push("three", LogLevel::Warning);

        assert_eq!(log.len(), 2);
        assert_eq!(log.entries()[0].message, "two");
        assert_eq!(log.last().unwrap().level, LogLevel::Warning);
        assert_eq!(log.next_seq(), 3);
    }

    #[test]
    fn test_entries_since() {
        let mut log = SystemLog::default();
        log.push("a", LogLevel::Info);
        let mark = log.next_seq();
        log.push("b", LogLevel::Info);
        log.push("c", LogLevel::Info);

        let messages: Vec<_> = log.entries_since(mark).map(|e| e.message.as_str()).collect();
        assert_eq!(messages, vec!["b", "c"]);
    }

    #[test]
    fn test_routine_key_from_pool() {
        let mut rng = StdRng::seed_from_u64(7);
        for _ in 0..20 {
            assert!(ROUTINE_LOG_KEYS.contains(&routine_log_key(&mut rng)));
        }
    }

    #[test]
    fn test_should_warn_bounds() {
        let mut rng = StdRng::seed_from_u64(7);
        assert!(!should_warn(&mut rng, 1.0));
        assert!(should_warn(&mut rng, -1.0));
    }
}
