//! Fixtures shared by the log dashboard tests.

use chrono::{DateTime, Duration, Utc};
use contracts::enums::log_level::LogLevel;
use contracts::system::logs::record::{LogId, LogRecord};
use contracts::system::logs::response::LogStats;

pub fn base_time() -> DateTime<Utc> {
    DateTime::parse_from_rfc3339("2024-03-15T12:00:00Z")
        .unwrap()
        .with_timezone(&Utc)
}

/// Record whose timestamp moves back one second per id, newest first
pub fn record(id: i64, level: &str, service: &str, message: &str) -> LogRecord {
    LogRecord {
        id: LogId::Int(id),
        timestamp: base_time() - Duration::seconds(id),
        level: LogLevel::from_code(level),
        service: service.to_string(),
        message: message.to_string(),
        data: None,
    }
}

/// `count` records with ids starting at `first`, all from `service`
pub fn page(first: i64, count: usize, service: &str) -> Vec<LogRecord> {
    (0..count as i64)
        .map(|i| record(first + i, "info", service, "line"))
        .collect()
}

pub fn stats_for(records: &[LogRecord]) -> LogStats {
    let mut stats = LogStats {
        total_logs: records.len() as u64,
        last_log: records.first().cloned(),
        ..Default::default()
    };
    for r in records {
        *stats.levels.entry(r.level.code().to_string()).or_insert(0) += 1;
        *stats.services.entry(r.service.clone()).or_insert(0) += 1;
    }
    stats
}
