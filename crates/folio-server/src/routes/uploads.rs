//! Multipart upload endpoints.
//!
//! The file travels in the `image` field; the update endpoint also reads
//! an optional `type` text field.

use axum::extract::multipart::MultipartRejection;
use axum::extract::{Multipart, Path, State};
use axum::Json;
use folio_core::Error;
use folio_storage::UploadedFile;
use serde::Serialize;

use crate::context::AppContext;
use crate::error::AppError;
use crate::upload;

const FILE_FIELD: &str = "image";
const TYPE_FIELD: &str = "type";

/// Response to both upload endpoints.
#[derive(Debug, Serialize, utoipa::ToSchema)]
pub struct UploadResponse {
    pub success: bool,
    /// Signed read URL of the stored object.
    pub url: String,
}

/// OpenAPI description of the multipart body.
#[allow(dead_code)]
#[derive(serde::Deserialize, utoipa::ToSchema)]
pub struct UploadForm {
    #[schema(value_type = String, format = Binary)]
    image: Vec<u8>,
    /// Slot type; only read by `PUT /api/images/{id}`.
    #[serde(rename = "type")]
    slot_type: Option<String>,
}

/// Fields pulled out of a multipart body.
#[derive(Debug, Default)]
struct UploadParts {
    file: Option<UploadedFile>,
    slot_type: Option<String>,
}

async fn read_parts(mut multipart: Multipart) -> Result<UploadParts, Error> {
    let malformed = |e: axum::extract::multipart::MultipartError| {
        Error::Validation(format!("Malformed multipart body: {}", e.body_text()))
    };

    let mut parts = UploadParts::default();
    while let Some(field) = multipart.next_field().await.map_err(malformed)? {
        let name = field.name().map(str::to_owned);
        match name.as_deref() {
            Some(FILE_FIELD) => {
                let original_name = field.file_name().unwrap_or_default().to_string();
                let content_type = field
                    .content_type()
                    .unwrap_or("application/octet-stream")
                    .to_string();
                let bytes = field.bytes().await.map_err(malformed)?;

                // Browsers send an empty, unnamed part when no file was picked.
                if original_name.is_empty() && bytes.is_empty() {
                    continue;
                }
                parts.file = Some(UploadedFile {
                    bytes,
                    original_name,
                    content_type,
                });
            }
            Some(TYPE_FIELD) => {
                parts.slot_type = Some(field.text().await.map_err(malformed)?);
            }
            _ => {}
        }
    }
    Ok(parts)
}

/// POST /api/images/upload
#[utoipa::path(
    post,
    path = "/api/images/upload",
    request_body(content_type = "multipart/form-data", content = UploadForm),
    responses(
        (status = 200, description = "Stored", body = UploadResponse),
        (status = 400, description = "No file in the request"),
        (status = 500, description = "Object store failure")
    )
)]
pub async fn upload_image(
    State(ctx): State<AppContext>,
    multipart: Result<Multipart, MultipartRejection>,
) -> Result<Json<UploadResponse>, AppError> {
    let file = read_parts(multipart?)
        .await?
        .file
        .ok_or_else(|| Error::Validation("No file uploaded".into()))?;

    let url = upload::upload(&ctx, file).await?;
    Ok(Json(UploadResponse { success: true, url }))
}

/// PUT /api/images/{id}
#[utoipa::path(
    put,
    path = "/api/images/{id}",
    params(("id" = i64, Path, description = "Image ID")),
    request_body(content_type = "multipart/form-data", content = UploadForm),
    responses(
        (status = 200, description = "Row now points at the new object", body = UploadResponse),
        (status = 400, description = "No file in the request"),
        (status = 404, description = "Image not found; the upload is kept"),
        (status = 500, description = "Object store or database failure")
    )
)]
pub async fn update_image(
    State(ctx): State<AppContext>,
    Path(id): Path<String>,
    multipart: Result<Multipart, MultipartRejection>,
) -> Result<Json<UploadResponse>, AppError> {
    let id: i64 = id
        .parse()
        .map_err(|_| Error::Validation("Invalid image ID".into()))?;
    let parts = read_parts(multipart?).await?;

    let url = upload::update_image(&ctx, id, parts.slot_type, parts.file).await?;
    Ok(Json(UploadResponse { success: true, url }))
}
