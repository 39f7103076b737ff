use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use thiserror::Error;
use tracing::{error, info};

use super::dto::ErrorDto;

pub const NO_DATA_MESSAGE: &str = "Geen data gevonden";
pub const INTERNAL_ERROR_MESSAGE: &str = "Interne serverfout";

#[derive(Debug, Error)]
pub enum ApiError {
    #[error("no readings stored")]
    NoDataFound,
    /// Connection and query failures alike.
    #[error("store error: {0}")]
    Store(#[from] sqlx::Error),
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        // Driver errors stay in the log; callers only get a fixed message.
        let (status, message) = match &self {
            ApiError::NoDataFound => {
                info!("No readings stored yet");
                (StatusCode::NOT_FOUND, NO_DATA_MESSAGE)
            }
            ApiError::Store(e) => {
                error!(error = %e, "Failed to read latest reading");
                (StatusCode::INTERNAL_SERVER_ERROR, INTERNAL_ERROR_MESSAGE)
            }
        };
        (status, Json(ErrorDto::new(message))).into_response()
    }
}
