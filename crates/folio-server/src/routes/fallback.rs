//! JSON answers for requests no handler accepts.

use axum::extract::OriginalUri;
use axum::http::StatusCode;
use axum::response::Response;

use crate::error::{error_response, AppError};
use crate::middleware::request_id::RequestId;

/// Unknown path under `/api`.
pub async fn not_found(OriginalUri(uri): OriginalUri) -> AppError {
    folio_core::Error::not_found("route", uri.path()).into()
}

/// Known path, unsupported method (e.g. `PUT /api/images/home`).
pub async fn method_not_allowed() -> Response {
    let id = RequestId::current();
    error_response(
        StatusCode::METHOD_NOT_ALLOWED,
        "Method not allowed",
        id.as_ref().map(|id| id.0.as_str()),
    )
}
