//! System log pane

use crate::state::{LogEntry, LogLevel, SystemLog};

/// Format one entry as `[HH:MM:SS] message`, warnings flagged with `!`
pub fn format_log_entry(entry: &LogEntry) -> String {
    let marker = match entry.level {
        LogLevel::Info => "",
        LogLevel::Warning => "! ",
    };
    format!(
        "[{}] {}{}",
        entry.timestamp.format("%H:%M:%S"),
        marker,
        entry.message
    )
}

/// The last `count` entries, oldest first
pub fn render_log_tail(log: &SystemLog, count: usize) -> String {
    let entries = log.entries();
    let start = entries.len().saturating_sub(count);
    entries[start..]
        .iter()
        .map(format_log_entry)
        .collect::<Vec<_>>()
        .join("\n")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_warning() {
        let mut log = SystemLog::default();
        log.push("Anomaly", LogLevel::Warning);
        let line = format_log_entry(log.last().unwrap());
        assert!(line.starts_with('['));
        assert!(line.ends_with("] ! Anomaly"));
    }

    #[test]
    fn test_tail() {
        let mut log = SystemLog::default();
        for n in 0..5 {
            log.push(format!("line {}", n), LogLevel::Info);
        }
        let tail = render_log_tail(&log, 2);
        assert_eq!(tail.lines().count(), 2);
        assert!(tail.ends_with("line 4"));
        assert_eq!(render_log_tail(&log, 50).lines().count(), 5);
    }
}
