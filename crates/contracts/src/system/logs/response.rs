use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use super::record::LogRecord;
use crate::enums::log_level::LogLevel;

/// `GET /logs?limit=N`
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct LogListResponse {
    pub logs: Vec<LogRecord>,
    /// Total number of records stored on the backend
    #[serde(default)]
    pub total: Option<u64>,
    #[serde(default)]
    pub returned: Option<u64>,
    #[serde(default)]
    pub limit: Option<u64>,
    #[serde(default)]
    pub offset: Option<u64>,
}

/// `GET /stats`
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct LogStats {
    #[serde(default)]
    pub total_logs: u64,
    #[serde(default)]
    pub levels: BTreeMap<String, u64>,
    /// Top services by record count
    #[serde(default)]
    pub services: BTreeMap<String, u64>,
    #[serde(default)]
    pub last_log: Option<LogRecord>,
}

impl LogStats {
    pub fn count_for(&self, level: &LogLevel) -> u64 {
        self.levels.get(level.code()).copied().unwrap_or(0)
    }

    /// Services ordered by count, busiest first
    pub fn top_services(&self) -> Vec<(String, u64)> {
        let mut services: Vec<(String, u64)> = self
            .services
            .iter()
            .map(|(name, count)| (name.clone(), *count))
            .collect();
        services.sort_by(|a, b| b.1.cmp(&a.1).then_with(|| a.0.cmp(&b.0)));
        services
    }
}

/// `POST /logs` (201)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AppendLogResponse {
    #[serde(default)]
    pub success: bool,
    pub log: LogRecord,
}

/// `DELETE /logs/clear`
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ClearLogsResponse {
    #[serde(default)]
    pub success: bool,
    #[serde(default)]
    pub message: String,
}

/// `GET /health`
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct HealthResponse {
    pub status: String,
    #[serde(default)]
    pub database: String,
    #[serde(default)]
    pub timestamp: Option<String>,
    #[serde(default)]
    pub error: Option<String>,
}

impl HealthResponse {
    pub fn is_ok(&self) -> bool {
        self.status == "ok"
    }
}

/// Body the backend sends with any non-2xx status
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub error: String,
}
