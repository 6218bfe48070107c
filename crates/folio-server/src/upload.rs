//! Upload and slot-update sequences.
//!
//! Both operations push the file to the object store first. An update then
//! touches the database in separate statements: verify the row, optionally
//! clear the current home slider, write the new url and type. Nothing is
//! rolled back; a failure after the upload leaves the stored object
//! orphaned, which is logged with its key.

use folio_core::{slot, Error, Page, Result};
use folio_db::queries::images;
use folio_storage::{store_and_sign, UploadedFile};

use crate::context::AppContext;

/// Store `file` and return a signed read URL. No database access.
pub async fn upload(ctx: &AppContext, file: UploadedFile) -> Result<String> {
    let stored = store_and_sign(
        ctx.storage.as_ref(),
        ctx.key_prefix(),
        ctx.signed_url_ttl(),
        file,
    )
    .await?;
    tracing::info!(key = %stored.key, "Uploaded image");
    Ok(stored.url)
}

/// Replace the image of row `id` and set its slot type.
///
/// `slot_type` of `None` clears the type. Setting `"slider"` first clears
/// the type of every home-page row currently typed `"slider"`.
pub async fn update_image(
    ctx: &AppContext,
    id: i64,
    slot_type: Option<String>,
    file: Option<UploadedFile>,
) -> Result<String> {
    let file = file.ok_or_else(|| Error::Validation("No file uploaded".into()))?;

    let stored = store_and_sign(
        ctx.storage.as_ref(),
        ctx.key_prefix(),
        ctx.signed_url_ttl(),
        file,
    )
    .await?;

    if let Err(e) = write_row(ctx, id, slot_type.as_deref(), &stored.url) {
        tracing::warn!(
            key = %stored.key,
            image_id = id,
            error = %e,
            "Image update failed after upload; stored object is orphaned"
        );
        return Err(e);
    }

    tracing::info!(key = %stored.key, image_id = id, slot_type = ?slot_type, "Updated image");
    Ok(stored.url)
}

fn write_row(ctx: &AppContext, id: i64, slot_type: Option<&str>, url: &str) -> Result<()> {
    let conn = folio_db::pool::get_conn(&ctx.db)?;

    if images::get_image(&conn, id)?.is_none() {
        return Err(Error::not_found("image", id));
    }

    if slot_type == Some(slot::SLIDER) {
        let cleared = images::clear_slot_on_page(&conn, Page::Home.as_str(), slot::SLIDER)?;
        tracing::debug!(cleared, "Cleared previous home slider");
    }

    if !images::update_image(&conn, id, url, slot_type)? {
        return Err(Error::not_found("image", id));
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use bytes::Bytes;
    use folio_core::config::Config;
    use folio_storage::MemoryObjectStore;
    use std::sync::Arc;

    fn setup() -> (AppContext, Arc<MemoryObjectStore>) {
        let storage = Arc::new(MemoryObjectStore::new("test"));
        let ctx = AppContext::new(
            folio_db::pool::init_memory_pool().unwrap(),
            Config::default(),
            storage.clone(),
        );
        (ctx, storage)
    }

    fn file(name: &str) -> UploadedFile {
        UploadedFile {
            bytes: Bytes::from_static(b"\x89PNG"),
            original_name: name.into(),
            content_type: "image/png".into(),
        }
    }

    #[tokio::test]
    async fn upload_does_not_touch_database() {
        let (ctx, storage) = setup();
        let url = upload(&ctx, file("a.png")).await.unwrap();
        assert!(url.starts_with("memory://test/images/"));
        assert_eq!(storage.len(), 1);

        let conn = folio_db::pool::get_conn(&ctx.db).unwrap();
        let rows: i64 = conn
            .query_row("SELECT COUNT(*) FROM images", [], |r| r.get(0))
            .unwrap();
        assert_eq!(rows, 0);
    }

    #[tokio::test]
    async fn missing_file_writes_nothing() {
        let (ctx, storage) = setup();
        let row = {
            let conn = folio_db::pool::get_conn(&ctx.db).unwrap();
            images::create_image(&conn, "old", Some("footer"), &["home"]).unwrap()
        };

        let err = update_image(&ctx, row.id, Some("slider".into()), None).await.unwrap_err();
        assert!(matches!(err, Error::Validation(_)));
        assert!(storage.is_empty());

        let conn = folio_db::pool::get_conn(&ctx.db).unwrap();
        assert_eq!(images::get_image(&conn, row.id).unwrap().unwrap(), row);
    }

    #[tokio::test]
    async fn missing_row_orphans_the_upload() {
        let (ctx, storage) = setup();
        let err = update_image(&ctx, 404, Some("column1".into()), Some(file("x.png")))
            .await
            .unwrap_err();
        assert!(matches!(err, Error::NotFound { .. }));
        assert_eq!(storage.len(), 1);
    }

    #[tokio::test]
    async fn storage_failure_skips_database() {
        let (ctx, storage) = setup();
        storage.fail_puts(true);
        let row = {
            let conn = folio_db::pool::get_conn(&ctx.db).unwrap();
            images::create_image(&conn, "old", Some("footer"), &["home"]).unwrap()
        };

        let err = update_image(&ctx, row.id, Some("slider".into()), Some(file("x.png")))
            .await
            .unwrap_err();
        assert_eq!(err.http_status(), 500);

        let conn = folio_db::pool::get_conn(&ctx.db).unwrap();
        assert_eq!(images::get_image(&conn, row.id).unwrap().unwrap().url, "old");
    }

    #[tokio::test]
    async fn slider_moves_to_new_row() {
        let (ctx, _) = setup();
        let (old, new) = {
            let conn = folio_db::pool::get_conn(&ctx.db).unwrap();
            (
                images::create_image(&conn, "a", Some("slider"), &["home"]).unwrap(),
                images::create_image(&conn, "b", Some("feature-work"), &["home"]).unwrap(),
            )
        };

        let url = update_image(&ctx, new.id, Some("slider".into()), Some(file("s.png")))
            .await
            .unwrap();

        let conn = folio_db::pool::get_conn(&ctx.db).unwrap();
        let sliders: Vec<_> = images::list_images_by_page(&conn, "home")
            .unwrap()
            .into_iter()
            .filter(|r| r.has_slot("slider"))
            .collect();
        assert_eq!(sliders.len(), 1);
        assert_eq!(sliders[0].id, new.id);
        assert_eq!(sliders[0].url, url);
        assert!(images::get_image(&conn, old.id).unwrap().unwrap().slot_type.is_none());
    }

    #[tokio::test]
    async fn non_slider_update_leaves_slider_alone() {
        let (ctx, _) = setup();
        let (slider, other) = {
            let conn = folio_db::pool::get_conn(&ctx.db).unwrap();
            (
                images::create_image(&conn, "a", Some("slider"), &["home"]).unwrap(),
                images::create_image(&conn, "b", Some("footer"), &["home"]).unwrap(),
            )
        };

        update_image(&ctx, other.id, Some("logos-brand".into()), Some(file("l.png")))
            .await
            .unwrap();

        let conn = folio_db::pool::get_conn(&ctx.db).unwrap();
        assert!(images::get_image(&conn, slider.id).unwrap().unwrap().has_slot("slider"));
        assert!(images::get_image(&conn, other.id).unwrap().unwrap().has_slot("logos-brand"));
    }
}
