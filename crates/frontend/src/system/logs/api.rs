//! Backend gateway: the five log-backend endpoints behind one trait.

use async_trait::async_trait;
use contracts::system::logs::record::LogRecord;
use contracts::system::logs::request::LogDraft;
use contracts::system::logs::response::{
    AppendLogResponse, ClearLogsResponse, ErrorResponse, HealthResponse, LogListResponse, LogStats,
};
use gloo_net::http::{Request, Response};
use serde::de::DeserializeOwned;
use thiserror::Error;

use crate::shared::api_utils::api_url;

/// Any failure talking to the backend: network, non-2xx status, bad body.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{message}")]
pub struct TransportError {
    pub message: String,
    /// HTTP status, when the backend answered at all
    pub status: Option<u16>,
}

impl TransportError {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            status: None,
        }
    }

    /// Error for a non-2xx answer.
    ///
    /// Prefers the backend's own `{"error": ...}` message, else falls back to
    /// `"<fallback> (HTTP <status>)"`.
    pub fn from_status(status: u16, body: &str, fallback: &str) -> Self {
        let message = serde_json::from_str::<ErrorResponse>(body)
            .ok()
            .map(|e| e.error)
            .filter(|e| !e.trim().is_empty())
            .unwrap_or_else(|| format!("{} (HTTP {})", fallback, status));
        Self {
            message,
            status: Some(status),
        }
    }
}

/// The backend operations the dashboard needs.
///
/// No retries and no timeouts here; callers decide what a failure means.
#[async_trait(?Send)]
pub trait LogGateway {
    /// `GET /logs?limit=N`
    async fn list_logs(&self, limit: usize) -> Result<LogListResponse, TransportError>;

    /// `GET /stats`
    async fn get_stats(&self) -> Result<LogStats, TransportError>;

    /// `POST /logs`, returns the record as stored by the backend
    async fn append_log(&self, draft: &LogDraft) -> Result<LogRecord, TransportError>;

    /// `DELETE /logs/clear`
    async fn clear_all(&self) -> Result<ClearLogsResponse, TransportError>;

    /// `GET /health`
    async fn health(&self) -> Result<HealthResponse, TransportError>;
}

/// [`LogGateway`] over HTTP via `gloo-net`
#[derive(Debug, Clone)]
pub struct HttpLogGateway {
    base: String,
}

impl HttpLogGateway {
    pub fn new(base: impl Into<String>) -> Self {
        Self { base: base.into() }
    }

    fn url(&self, path: &str) -> String {
        api_url(&self.base, path)
    }
}

async fn read_json<T: DeserializeOwned>(
    response: Response,
    fallback: &str,
) -> Result<T, TransportError> {
    if !response.ok() {
        let status = response.status();
        let body = response.text().await.unwrap_or_default();
        return Err(TransportError::from_status(status, &body, fallback));
    }

    response
        .json()
        .await
        .map_err(|e| TransportError::new(format!("Failed to parse response: {}", e)))
}

fn send_failed(e: gloo_net::Error) -> TransportError {
    TransportError::new(format!("Failed to send request: {}", e))
}

#[async_trait(?Send)]
impl LogGateway for HttpLogGateway {
    async fn list_logs(&self, limit: usize) -> Result<LogListResponse, TransportError> {
        let response = Request::get(&self.url(&format!("/logs?limit={}", limit.max(1))))
            .send()
            .await
            .map_err(send_failed)?;

        read_json(response, "Failed to load logs").await
    }

    async fn get_stats(&self) -> Result<LogStats, TransportError> {
        let response = Request::get(&self.url("/stats"))
            .send()
            .await
            .map_err(send_failed)?;

        read_json(response, "Failed to load stats").await
    }

    async fn append_log(&self, draft: &LogDraft) -> Result<LogRecord, TransportError> {
        draft.validate().map_err(TransportError::new)?;

        let response = Request::post(&self.url("/logs"))
            .json(draft)
            .map_err(|e| TransportError::new(format!("Failed to serialize request: {}", e)))?
            .send()
            .await
            .map_err(send_failed)?;

        let created: AppendLogResponse = read_json(response, "Failed to add log").await?;
        Ok(created.log)
    }

    async fn clear_all(&self) -> Result<ClearLogsResponse, TransportError> {
        let response = Request::delete(&self.url("/logs/clear"))
            .send()
            .await
            .map_err(send_failed)?;

        read_json(response, "Failed to clear logs").await
    }

    async fn health(&self) -> Result<HealthResponse, TransportError> {
        let response = Request::get(&self.url("/health"))
            .send()
            .await
            .map_err(send_failed)?;

        // The health endpoint answers 500 with a full body when the database is down.
        if response.status() == 500 {
            if let Ok(body) = response.json::<HealthResponse>().await {
                return Ok(body);
            }
            return Err(TransportError {
                message: "Backend unhealthy (HTTP 500)".to_string(),
                status: Some(500),
            });
        }
        read_json(response, "Health check failed").await
    }
}
