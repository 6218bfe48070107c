//! Error-to-HTTP response conversion.
//!
//! Implements `IntoResponse` for [`folio_core::Error`] so that route handlers
//! can return `Result<T, AppError>` and use `?` on core results.

use axum::extract::multipart::MultipartRejection;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde_json::json;

use crate::middleware::request_id::RequestId;

/// Message returned for every 5xx; details only go to the log.
pub const SERVER_ERROR_MESSAGE: &str = "Internal server error";

/// Wrapper so we can implement `IntoResponse` for an external type.
#[derive(Debug)]
pub struct AppError {
    inner: folio_core::Error,
    request_id: Option<String>,
}

impl AppError {
    /// Wrap `inner`, tagging it with the id of the request being served.
    pub fn new(inner: folio_core::Error) -> Self {
        Self {
            inner,
            request_id: RequestId::current().map(|id| id.0),
        }
    }

    pub fn with_request_id(mut self, id: String) -> Self {
        self.request_id = Some(id);
        self
    }

    /// Text shown to the client.
    fn public_message(&self) -> String {
        use folio_core::Error;
        match &self.inner {
            Error::Unauthorized(msg) | Error::Validation(msg) | Error::Conflict(msg) => msg.clone(),
            Error::NotFound { .. } => self.inner.to_string(),
            _ => SERVER_ERROR_MESSAGE.to_string(),
        }
    }
}

impl From<folio_core::Error> for AppError {
    fn from(e: folio_core::Error) -> Self {
        Self::new(e)
    }
}

impl From<MultipartRejection> for AppError {
    fn from(rejection: MultipartRejection) -> Self {
        Self::new(folio_core::Error::Validation(format!(
            "Malformed multipart body: {}",
            rejection.body_text()
        )))
    }
}

/// The `{"success": false, "error": ...}` envelope shared by every failure.
pub fn error_response(status: StatusCode, message: &str, request_id: Option<&str>) -> Response {
    let mut body = json!({
        "success": false,
        "error": message,
    });
    if let Some(id) = request_id {
        body["request_id"] = json!(id);
    }
    (status, axum::Json(body)).into_response()
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = StatusCode::from_u16(self.inner.http_status())
            .unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);

        if status.is_server_error() {
            tracing::error!(
                status = %status,
                error = %self.inner,
                request_id = self.request_id.as_deref().unwrap_or("-"),
                "Server error in API handler"
            );
        }

        error_response(status, &self.public_message(), self.request_id.as_deref())
    }
}
