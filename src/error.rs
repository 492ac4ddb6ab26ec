use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;

#[derive(Debug, thiserror::Error)]
pub enum WheelError {
    #[error("Invalid wheel ID")]
    InvalidId,

    #[error("Wheel not found")]
    NotFound,

    #[error("Corrupted wheel data: {0}")]
    Corrupted(String),

    #[error("KV not available: {0}")]
    StoreUnavailable(String),

    #[error("No active participants to choose from")]
    NoActiveParticipants,

    #[error("Invalid request: {0}")]
    InvalidRequest(String),

    #[error("Configuration error: {0}")]
    Configuration(String),
}

pub type Result<T> = std::result::Result<T, WheelError>;

#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub error: String,
    pub message: String,
    pub code: u16,
}

impl ErrorResponse {
    pub fn new(error: &str, message: &str, code: u16) -> Self {
        Self {
            error: error.to_string(),
            message: message.to_string(),
            code,
        }
    }

    pub fn from_wheel_error(err: &WheelError) -> Self {
        match err {
            WheelError::InvalidId => Self::new("invalid_id", "Invalid wheel ID", 400),
            WheelError::NotFound => Self::new("not_found", "Wheel not found", 404),
            WheelError::Corrupted(_) => Self::new("corrupted", "Corrupted wheel data", 500),
            WheelError::StoreUnavailable(_) => {
                Self::new("store_unavailable", "KV not available", 500)
            }
            WheelError::NoActiveParticipants => Self::new(
                "no_active_participants",
                "Every participant has already been picked",
                409,
            ),
            WheelError::InvalidRequest(msg) => Self::new("bad_request", msg, 400),
            WheelError::Configuration(msg) => Self::new("configuration_error", msg, 500),
        }
    }
}

impl IntoResponse for WheelError {
    fn into_response(self) -> Response {
        match &self {
            WheelError::Corrupted(detail) => {
                tracing::error!(detail = %detail, "Stored wheel could not be decoded");
            }
            WheelError::StoreUnavailable(detail) => {
                tracing::error!(detail = %detail, "Key-value store unavailable");
            }
            WheelError::Configuration(detail) => {
                tracing::error!(detail = %detail, "Configuration error");
            }
            _ => {}
        }

        let body = ErrorResponse::from_wheel_error(&self);
        let status =
            StatusCode::from_u16(body.code).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);

        (status, Json(body)).into_response()
    }
}
