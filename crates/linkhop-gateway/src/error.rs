use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use linkhop_core::{InvalidLinkError, ShortenerError};
use thiserror::Error;
use tracing::error;

use crate::model::ErrorResponse;

pub type Result<T> = std::result::Result<T, AppError>;

pub const NOT_FOUND_DETAIL: &str = "Short link not found :(";
pub const INTERNAL_SERVER_ERROR_BODY: &str = "Internal Server Error";

#[derive(Debug, Error)]
pub enum AppError {
    #[error(transparent)]
    InvalidLink(#[from] InvalidLinkError),
    #[error("short link not found")]
    NotFound,
    #[error(transparent)]
    Shortener(#[from] ShortenerError),
    #[error("destination is not a valid Location header: {0}")]
    MalformedDestination(String),
}

/// The generic failure response; never carries internal details.
pub fn internal_server_error() -> Response {
    (StatusCode::INTERNAL_SERVER_ERROR, INTERNAL_SERVER_ERROR_BODY).into_response()
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        match self {
            AppError::InvalidLink(e) => (
                StatusCode::UNPROCESSABLE_ENTITY,
                Json(ErrorResponse {
                    detail: format!("Invalid link: {}", e.link),
                }),
            )
                .into_response(),
            AppError::NotFound => (
                StatusCode::NOT_FOUND,
                Json(ErrorResponse {
                    detail: NOT_FOUND_DETAIL.to_string(),
                }),
            )
                .into_response(),
            other => {
                error!(error = %other, "request failed");
                internal_server_error()
            }
        }
    }
}
