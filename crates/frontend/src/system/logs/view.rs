//! What the rendering layer receives: published snapshots and per-row data.

use chrono::{DateTime, Utc};
use contracts::enums::log_level::LogLevel;
use contracts::system::logs::record::LogRecord;
use contracts::system::logs::response::LogStats;

use super::filter::FilterCriteria;
use super::orchestrator::LoadPhase;
use crate::shared::date_utils::{format_datetime, format_relative};

/// Snapshot pushed to subscribers after every state change
#[derive(Debug, Clone, Default, PartialEq)]
pub struct DashboardView {
    /// Filtered view, working-set order
    pub logs: Vec<LogRecord>,
    /// Size of the unfiltered working set
    pub loaded: usize,
    /// Backend total from the last list call, if reported
    pub backend_total: Option<u64>,
    pub stats: Option<LogStats>,
    pub service_options: Vec<String>,
    pub criteria: FilterCriteria,
    /// Show the "load more" control
    pub has_more: bool,
    pub phase: LoadPhase,
    /// Last load failure; replaces the list until the next successful load
    pub error: Option<String>,
    pub appending: bool,
    pub clearing: bool,
}

/// Header value for "time since last log"
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LastLog {
    NoneYet,
    Ago(String),
}

impl LastLog {
    pub fn label(&self) -> &str {
        match self {
            LastLog::NoneYet => "None yet",
            LastLog::Ago(age) => age,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HeaderSummary {
    pub total: u64,
    pub errors: u64,
    pub warnings: u64,
    pub last_log: LastLog,
    pub top_services: Vec<(String, u64)>,
}

impl HeaderSummary {
    pub fn from_stats(stats: Option<&LogStats>, now: DateTime<Utc>) -> Self {
        let Some(stats) = stats else {
            return Self {
                total: 0,
                errors: 0,
                warnings: 0,
                last_log: LastLog::NoneYet,
                top_services: Vec::new(),
            };
        };
        Self {
            total: stats.total_logs,
            errors: stats.count_for(&LogLevel::Error),
            warnings: stats.count_for(&LogLevel::Warning),
            last_log: match &stats.last_log {
                Some(last) => LastLog::Ago(format_relative(&last.timestamp, now)),
                None => LastLog::NoneYet,
            },
            top_services: stats.top_services(),
        }
    }
}

/// Everything one list row shows
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LogRow {
    pub key: String,
    pub level: String,
    /// CSS modifier, `log-level--<code>` for known levels
    pub level_class: String,
    pub timestamp: String,
    pub age: String,
    pub service: String,
    pub message: String,
    /// Pretty-printed payload, absent when there is nothing to show
    pub data: Option<String>,
}

impl LogRow {
    pub fn from_record(record: &LogRecord, now: DateTime<Utc>) -> Self {
        let level_class = match record.level {
            LogLevel::Other(_) => "log-level log-level--other".to_string(),
            ref known => format!("log-level log-level--{}", known.code()),
        };
        Self {
            key: record.id.to_string(),
            level: record.level.code().to_string(),
            level_class,
            timestamp: format_datetime(&record.timestamp),
            age: format_relative(&record.timestamp, now),
            service: record.service.clone(),
            message: record.message.clone(),
            data: record
                .payload()
                .and_then(|value| serde_json::to_string_pretty(value).ok()),
        }
    }
}
