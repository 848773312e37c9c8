// SPDX-FileCopyrightText: 2026 SchickSMS Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Mapping of [`SmsError`] onto HTTP responses.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use schicksms_core::SmsError;
use serde::Serialize;

/// Error response body.
#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    /// Always `false`, mirroring the success flag of normal responses.
    pub success: bool,
    /// Error description suitable for operators.
    pub error: String,
}

/// Handler error wrapper.
#[derive(Debug)]
pub struct ApiError(pub SmsError);

impl From<SmsError> for ApiError {
    fn from(e: SmsError) -> Self {
        Self(e)
    }
}

impl ApiError {
    pub fn status_code(&self) -> StatusCode {
        match &self.0 {
            SmsError::Validation(_) => StatusCode::BAD_REQUEST,
            SmsError::NotFound(_) => StatusCode::NOT_FOUND,
            SmsError::Command(_) => StatusCode::BAD_GATEWAY,
            SmsError::Config(_)
            | SmsError::Io { .. }
            | SmsError::Storage { .. }
            | SmsError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        if status.is_server_error() {
            tracing::error!(error = %self.0, "request failed");
        } else {
            tracing::debug!(error = %self.0, "request rejected");
        }
        let body = ErrorResponse {
            success: false,
            error: self.0.operator_message(),
        };
        (status, Json(body)).into_response()
    }
}
