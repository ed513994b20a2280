//! Unified error handling for admin.

use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use multilingual_core::LocaleError;
use serde::Serialize;
use thiserror::Error;

use crate::bigcommerce::BigCommerceError;
use crate::services::TranslationError;

/// Application-level error type for the admin API.
#[derive(Debug, Error)]
pub enum AppError {
    /// BigCommerce API operation failed.
    #[error("BigCommerce error: {0}")]
    BigCommerce(#[from] BigCommerceError),

    /// Saving a translation failed.
    #[error("Translation error: {0}")]
    Translation(#[from] TranslationError<BigCommerceError>),

    /// Invalid locale code in a path or body.
    #[error("Invalid locale: {0}")]
    Locale(#[from] LocaleError),

    /// Resource not found.
    #[error("Not found: {0}")]
    NotFound(String),

    /// Bad request from client.
    #[error("Bad request: {0}")]
    BadRequest(String),

    /// Internal server error.
    #[error("Internal error: {0}")]
    Internal(String),
}

#[derive(Serialize)]
struct ErrorResponse {
    error: String,
    /// Writes applied before a translation save failed.
    #[serde(skip_serializing_if = "Option::is_none")]
    applied: Option<usize>,
    #[serde(skip_serializing_if = "Option::is_none")]
    total: Option<usize>,
}

impl AppError {
    fn status(&self) -> StatusCode {
        match self {
            Self::BigCommerce(e) if e.is_not_found() => StatusCode::NOT_FOUND,
            Self::Translation(e) if e.backend_error().is_not_found() => StatusCode::NOT_FOUND,
            Self::BigCommerce(_) | Self::Translation(_) => StatusCode::BAD_GATEWAY,
            Self::NotFound(_) => StatusCode::NOT_FOUND,
            Self::Locale(_) | Self::BadRequest(_) => StatusCode::BAD_REQUEST,
            Self::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status();

        // Log server errors with Sentry
        if status.is_server_error() {
            let event_id = sentry::capture_error(&self);
            tracing::error!(
                error = %self,
                sentry_event_id = %event_id,
                "Admin request error"
            );
        }

        // Don't expose internal error details to clients
        let error = match &self {
            Self::Internal(_) => "Internal server error".to_string(),
            _ if status == StatusCode::BAD_GATEWAY => "External service error".to_string(),
            _ => self.to_string(),
        };

        let (applied, total) = match &self {
            Self::Translation(TranslationError::Apply(e)) => (Some(e.applied), Some(e.total)),
            _ => (None, None),
        };

        (
            status,
            Json(ErrorResponse {
                error,
                applied,
                total,
            }),
        )
            .into_response()
    }
}
