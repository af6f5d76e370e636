use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde_json::json;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum TrackerError {
    #[error("{0}")]
    Validation(String),
    #[error("Job not found")]
    NotFound,
    #[error("store error: {0}")]
    Store(String),
    #[error("store unreachable: {0}")]
    Unhealthy(String),
    /// write path failure, answered as a client error
    #[error("{message}: {detail}")]
    Rejected { message: String, detail: String },
    #[error("request failed: {0}")]
    Network(String),
    #[error("server responded {status}")]
    Status { status: u16 },
    #[error("configuration error: {0}")]
    Config(String),
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
    #[error("json error: {0}")]
    Json(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, TrackerError>;

impl TrackerError {
    /// Turns a bad body or a store failure into the 400 answer the write routes give.
    pub fn rejected(self, message: &str) -> Self {
        match self {
            TrackerError::Validation(detail) | TrackerError::Store(detail) => TrackerError::Rejected {
                message: message.to_string(),
                detail,
            },
            other => other,
        }
    }

    pub fn status(&self) -> StatusCode {
        match self {
            TrackerError::Validation(_) | TrackerError::Rejected { .. } => StatusCode::BAD_REQUEST,
            TrackerError::NotFound => StatusCode::NOT_FOUND,
            _ => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl From<sqlx::Error> for TrackerError {
    fn from(e: sqlx::Error) -> Self {
        TrackerError::Store(e.to_string())
    }
}

impl From<sqlx::migrate::MigrateError> for TrackerError {
    fn from(e: sqlx::migrate::MigrateError) -> Self {
        TrackerError::Store(e.to_string())
    }
}

impl From<reqwest::Error> for TrackerError {
    fn from(e: reqwest::Error) -> Self {
        TrackerError::Network(e.to_string())
    }
}

impl From<validator::ValidationErrors> for TrackerError {
    fn from(e: validator::ValidationErrors) -> Self {
        TrackerError::Validation(e.to_string())
    }
}

impl From<config::ConfigError> for TrackerError {
    fn from(e: config::ConfigError) -> Self {
        TrackerError::Config(e.to_string())
    }
}

impl IntoResponse for TrackerError {
    fn into_response(self) -> Response {
        let status = self.status();
        let body = match &self {
            TrackerError::Validation(detail) => json!({ "message": detail }),
            TrackerError::NotFound => json!({ "message": "Job not found" }),
            TrackerError::Rejected { message, detail } => json!({
                "message": message,
                "error": detail,
            }),
            TrackerError::Store(_) => json!({ "message": "Server error while fetching jobs" }),
            TrackerError::Unhealthy(detail) => json!({
                "message": "Job store unreachable",
                "error": detail,
            }),
            other => json!({ "message": "Server error", "error": other.to_string() }),
        };
        if status.is_server_error() {
            tracing::error!("request failed: {}", &self);
        } else {
            tracing::warn!("request rejected: {}", &self);
        }
        (status, Json(body)).into_response()
    }
}
