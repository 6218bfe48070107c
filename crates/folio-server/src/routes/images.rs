//! Read-only image endpoints.

use axum::extract::{Path, State};
use axum::Json;
use folio_core::{Error, Page};
use folio_db::queries::images;
use serde::Serialize;

use crate::context::AppContext;
use crate::error::AppError;
use crate::gallery::{AboutImages, HomeImages, ImageResponse, WorkImages};

/// Body of the page-scoped lookup.
#[derive(Debug, Serialize, utoipa::ToSchema)]
pub struct PageImageResponse {
    pub image: ImageResponse,
}

fn parse_id(raw: &str) -> Result<i64, Error> {
    raw.parse()
        .map_err(|_| Error::Validation("Invalid image ID".into()))
}

/// GET /api/images/home
#[utoipa::path(
    get,
    path = "/api/images/home",
    responses((status = 200, description = "Home page slots", body = HomeImages))
)]
pub async fn home(State(ctx): State<AppContext>) -> Result<Json<HomeImages>, AppError> {
    let conn = folio_db::pool::get_conn(&ctx.db)?;
    let records = images::list_images_by_page(&conn, Page::Home.as_str())?;
    Ok(Json(HomeImages::from_records(&records)))
}

/// GET /api/images/about
#[utoipa::path(
    get,
    path = "/api/images/about",
    responses((status = 200, description = "About page slots", body = AboutImages))
)]
pub async fn about(State(ctx): State<AppContext>) -> Result<Json<AboutImages>, AppError> {
    let conn = folio_db::pool::get_conn(&ctx.db)?;
    let records = images::list_images_by_page(&conn, Page::About.as_str())?;
    Ok(Json(AboutImages::from_records(&records)))
}

/// GET /api/images/work
///
/// Unlike home and about, an untagged work page is a 404.
#[utoipa::path(
    get,
    path = "/api/images/work",
    responses(
        (status = 200, description = "Work page columns", body = WorkImages),
        (status = 404, description = "No images tagged with the work page")
    )
)]
pub async fn work(State(ctx): State<AppContext>) -> Result<Json<WorkImages>, AppError> {
    let conn = folio_db::pool::get_conn(&ctx.db)?;
    let records = images::list_images_by_page(&conn, Page::Work.as_str())?;
    if records.is_empty() {
        return Err(Error::not_found("images for page", Page::Work).into());
    }
    Ok(Json(WorkImages::from_records(&records)))
}

/// GET /api/images/{id}
#[utoipa::path(
    get,
    path = "/api/images/{id}",
    params(("id" = i64, Path, description = "Image ID")),
    responses(
        (status = 200, description = "Image row", body = ImageResponse),
        (status = 404, description = "Image not found")
    )
)]
pub async fn get_by_id(
    State(ctx): State<AppContext>,
    Path(id): Path<String>,
) -> Result<Json<ImageResponse>, AppError> {
    let id = parse_id(&id)?;
    let conn = folio_db::pool::get_conn(&ctx.db)?;
    let record = images::get_image(&conn, id)?.ok_or_else(|| Error::not_found("image", id))?;
    Ok(Json(ImageResponse::from_model(&record)))
}

/// GET /api/images/{page}/{id}
///
/// The page is checked against the lookup allow-list before anything else.
#[utoipa::path(
    get,
    path = "/api/images/{page}/{id}",
    params(
        ("page" = String, Path, description = "Page name; only `work` is accepted"),
        ("id" = i64, Path, description = "Image ID")
    ),
    responses(
        (status = 200, description = "Image row", body = PageImageResponse),
        (status = 400, description = "Page not allowed"),
        (status = 404, description = "Image not found on page")
    )
)]
pub async fn get_by_page_and_id(
    State(ctx): State<AppContext>,
    Path((page, id)): Path<(String, String)>,
) -> Result<Json<PageImageResponse>, AppError> {
    let page = page
        .parse::<Page>()
        .ok()
        .filter(Page::allows_lookup)
        .ok_or_else(|| Error::Validation(format!("Invalid page '{page}'")))?;
    let id = parse_id(&id)?;

    let conn = folio_db::pool::get_conn(&ctx.db)?;
    let record = images::get_image_on_page(&conn, page.as_str(), id)?
        .ok_or_else(|| Error::not_found("image", id))?;

    Ok(Json(PageImageResponse {
        image: ImageResponse::from_model(&record),
    }))
}
