// src/error.rs
use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use thiserror::Error;

use crate::message::ChatResponse;

#[derive(Debug, Error)]
pub enum AppError {
    #[error("bad request: {0}")]
    BadRequest(String),

    #[error("backend responded with status: {0}")]
    BackendStatus(StatusCode),

    #[error("transport error: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("invalid configuration: {0}")]
    Config(String),
}

impl IntoResponse for AppError {
    // Every failure looks the same to the caller.
    fn into_response(self) -> Response {
        tracing::error!(error = %self, "chat proxy failed");
        (StatusCode::INTERNAL_SERVER_ERROR, Json(ChatResponse::fallback())).into_response()
    }
}
