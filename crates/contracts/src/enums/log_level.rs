use serde::{Deserialize, Serialize};
use std::fmt;

/// Severity of a log record.
///
/// The backend stores the level as free text, so anything outside the four
/// known values is kept verbatim in `Other` instead of failing to decode.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum LogLevel {
    Debug,
    Info,
    Warning,
    Error,
    Other(String),
}

impl LogLevel {
    /// Wire code of the level
    pub fn code(&self) -> &str {
        match self {
            LogLevel::Debug => "debug",
            LogLevel::Info => "info",
            LogLevel::Warning => "warning",
            LogLevel::Error => "error",
            LogLevel::Other(code) => code.as_str(),
        }
    }

    /// Human readable label for filters and badges
    pub fn display_name(&self) -> &str {
        match self {
            LogLevel::Debug => "Debug",
            LogLevel::Info => "Info",
            LogLevel::Warning => "Warning",
            LogLevel::Error => "Error",
            LogLevel::Other(code) => code.as_str(),
        }
    }

    /// The levels the backend is known to emit
    pub fn all() -> Vec<LogLevel> {
        vec![
            LogLevel::Debug,
            LogLevel::Info,
            LogLevel::Warning,
            LogLevel::Error,
        ]
    }

    pub fn from_code(code: &str) -> Self {
        match code {
            "debug" => LogLevel::Debug,
            "info" => LogLevel::Info,
            "warning" => LogLevel::Warning,
            "error" => LogLevel::Error,
            other => LogLevel::Other(other.to_string()),
        }
    }
}

impl From<String> for LogLevel {
    fn from(code: String) -> Self {
        match code.as_str() {
            "debug" | "info" | "warning" | "error" => LogLevel::from_code(&code),
            _ => LogLevel::Other(code),
        }
    }
}

impl From<LogLevel> for String {
    fn from(level: LogLevel) -> Self {
        match level {
            LogLevel::Other(code) => code,
            known => known.code().to_string(),
        }
    }
}

impl fmt::Display for LogLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}
