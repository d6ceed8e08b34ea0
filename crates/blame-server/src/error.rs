use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use news_feed::FeedError;
use tracing::error;

use crate::model::ErrorResponse;

#[derive(Debug, thiserror::Error)]
pub enum AppError {
    #[error(transparent)]
    Feed(#[from] FeedError),

    #[error("config error: {0}")]
    Config(String),

    #[error("io error: {0}")]
    Io(#[from] std::io::Error),

    #[error("json error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("headline source unavailable: {0}")]
    Source(String),
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        error!(error = %self, "request failed");
        (
            StatusCode::INTERNAL_SERVER_ERROR,
            Json(ErrorResponse::new(self.to_string())),
        )
            .into_response()
    }
}
