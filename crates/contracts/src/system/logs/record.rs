use chrono::{DateTime, Utc};
use serde::{Deserialize, Deserializer, Serialize};
use std::fmt;

use crate::enums::log_level::LogLevel;

/// Backend-assigned identifier of a log record.
///
/// Treated as opaque: the current backend hands out integers, but string ids
/// decode just as well.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(untagged)]
pub enum LogId {
    Int(i64),
    Text(String),
}

impl fmt::Display for LogId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LogId::Int(id) => write!(f, "{}", id),
            LogId::Text(id) => f.write_str(id),
        }
    }
}

/// One log record as returned by the backend. Never mutated on the client.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LogRecord {
    pub id: LogId,
    pub timestamp: DateTime<Utc>,
    pub level: LogLevel,
    #[serde(default = "default_service", deserialize_with = "service_or_unknown")]
    pub service: String,
    #[serde(default, deserialize_with = "string_or_empty")]
    pub message: String,
    #[serde(default)]
    pub data: Option<serde_json::Value>,
}

fn default_service() -> String {
    "unknown".to_string()
}

// The backend stores whatever the client posted, including an explicit null.
fn service_or_unknown<'de, D: Deserializer<'de>>(deserializer: D) -> Result<String, D::Error> {
    Ok(Option::<String>::deserialize(deserializer)?.unwrap_or_else(default_service))
}

fn string_or_empty<'de, D: Deserializer<'de>>(deserializer: D) -> Result<String, D::Error> {
    Ok(Option::<String>::deserialize(deserializer)?.unwrap_or_default())
}

impl LogRecord {
    /// Structured payload, if it carries anything worth showing.
    ///
    /// `null`, `{}` and `[]` all count as "no data".
    pub fn payload(&self) -> Option<&serde_json::Value> {
        match self.data.as_ref()? {
            serde_json::Value::Null => None,
            serde_json::Value::Object(map) if map.is_empty() => None,
            serde_json::Value::Array(items) if items.is_empty() => None,
            value => Some(value),
        }
    }
}
