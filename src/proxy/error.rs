use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
};
use thiserror::Error;

/// Every way a `/api/get-monitors` call can fail. Each variant is terminal
/// for the request; nothing is retried.
#[derive(Error, Debug)]
pub enum ProxyError {
    /// API key is not configured; upstream was never contacted
    #[error("{0}")]
    Configuration(String),

    /// UptimeRobot answered with a non-2xx status
    #[error("UptimeRobot API error: {status} - {body}")]
    Upstream { status: u16, body: String },

    /// Malformed inbound JSON, network failure, malformed upstream JSON
    #[error("Internal server error: {0}")]
    Unexpected(String),
}

impl ProxyError {
    pub fn missing_api_key(var_name: &str) -> Self {
        Self::Configuration(format!(
            "UptimeRobot API key is not configured. Set the {} environment variable.",
            var_name
        ))
    }

    pub fn status_code(&self) -> StatusCode {
        match self {
            Self::Configuration(_) | Self::Unexpected(_) => StatusCode::INTERNAL_SERVER_ERROR,
            Self::Upstream { status, .. } => {
                StatusCode::from_u16(*status).unwrap_or(StatusCode::BAD_GATEWAY)
            }
        }
    }
}

impl From<reqwest::Error> for ProxyError {
    fn from(e: reqwest::Error) -> Self {
        Self::Unexpected(e.to_string())
    }
}

impl From<serde_json::Error> for ProxyError {
    fn from(e: serde_json::Error) -> Self {
        Self::Unexpected(e.to_string())
    }
}

impl IntoResponse for ProxyError {
    fn into_response(self) -> Response {
        (self.status_code(), self.to_string()).into_response()
    }
}
