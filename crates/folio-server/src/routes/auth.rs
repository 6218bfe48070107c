//! Admin login.

use axum::extract::rejection::JsonRejection;
use axum::extract::State;
use axum::Json;
use serde::{Deserialize, Serialize};

use crate::context::AppContext;
use crate::error::AppError;

/// Login request payload. Missing fields read as empty strings and simply
/// fail to match; so does a body that is not JSON at all.
#[derive(Debug, Default, Deserialize, utoipa::ToSchema)]
pub struct LoginRequest {
    #[serde(default)]
    pub username: String,
    #[serde(default)]
    pub password: String,
}

/// The authenticated user, without the password.
#[derive(Debug, Serialize, utoipa::ToSchema)]
pub struct UserResponse {
    pub id: i64,
    pub username: String,
    pub role: String,
}

/// Login response.
#[derive(Debug, Serialize, utoipa::ToSchema)]
pub struct LoginResponse {
    pub success: bool,
    pub user: UserResponse,
}

/// POST /api/login
#[utoipa::path(
    post,
    path = "/api/login",
    request_body = LoginRequest,
    responses(
        (status = 200, description = "Login successful", body = LoginResponse),
        (status = 401, description = "Invalid credentials"),
        (status = 500, description = "Database failure")
    )
)]
pub async fn login(
    State(ctx): State<AppContext>,
    payload: Result<Json<LoginRequest>, JsonRejection>,
) -> Result<Json<LoginResponse>, AppError> {
    // An unreadable body carries no credentials, so it can only fail to match.
    let payload = payload.map(|Json(p)| p).unwrap_or_else(|rejection| {
        tracing::debug!(error = %rejection.body_text(), "Unreadable login body");
        LoginRequest::default()
    });

    let conn = folio_db::pool::get_conn(&ctx.db)?;

    let user =
        folio_db::queries::users::find_by_credentials(&conn, &payload.username, &payload.password)?
            .ok_or_else(|| folio_core::Error::Unauthorized("Invalid credentials".into()))?;

    tracing::info!(user_id = user.id, "Admin login");

    Ok(Json(LoginResponse {
        success: true,
        user: UserResponse {
            id: user.id,
            username: user.username,
            role: user.role,
        },
    }))
}
