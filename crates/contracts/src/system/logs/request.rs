use serde::{Deserialize, Serialize};

use crate::enums::log_level::LogLevel;

/// Body of `POST /logs`. The backend assigns `id` and `timestamp`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LogDraft {
    pub level: LogLevel,
    pub service: String,
    pub message: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub data: Option<serde_json::Value>,
}

impl LogDraft {
    pub fn new(level: LogLevel, service: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            level,
            service: service.into(),
            message: message.into(),
            data: None,
        }
    }

    pub fn with_data(mut self, data: serde_json::Value) -> Self {
        self.data = Some(data);
        self
    }

    /// Validate before sending
    pub fn validate(&self) -> Result<(), String> {
        if self.level.code().trim().is_empty() {
            return Err("Log level must not be empty".into());
        }
        if self.service.trim().is_empty() {
            return Err("Service must not be empty".into());
        }
        if self.message.trim().is_empty() {
            return Err("Message must not be empty".into());
        }
        Ok(())
    }
}
