//! Image row queries.
//!
//! Page membership is tested with `json_each` over the `page` JSON array.
//! Rows whose `page` column is not valid JSON belong to no page.

use folio_core::{Error, Result};
use rusqlite::{Connection, OptionalExtension};

use crate::models::ImageRecord;

const COLS: &str = "id, url, type, page";

// CASE guarantees `json_each` never sees a malformed column.
const ON_PAGE: &str = "CASE WHEN json_valid(images.page) \
     THEN EXISTS (SELECT 1 FROM json_each(images.page) WHERE json_each.value = ?1) \
     ELSE 0 END";

/// Insert a new image row tagged with `pages`.
pub fn create_image(
    conn: &Connection,
    url: &str,
    slot_type: Option<&str>,
    pages: &[&str],
) -> Result<ImageRecord> {
    let mut tags: Vec<String> = Vec::with_capacity(pages.len());
    for page in pages {
        if !tags.iter().any(|t| t == page) {
            tags.push(page.to_string());
        }
    }
    let pages_json = serde_json::to_string(&tags).map_err(|e| Error::Internal(e.to_string()))?;

    conn.execute(
        "INSERT INTO images (url, type, page) VALUES (?1, ?2, ?3)",
        rusqlite::params![url, slot_type, pages_json],
    )
    .map_err(|e| Error::database(e.to_string()))?;

    Ok(ImageRecord {
        id: conn.last_insert_rowid(),
        url: url.to_string(),
        slot_type: slot_type.map(String::from),
        pages: tags,
    })
}

/// List every image tagged with `page`, ordered by id.
pub fn list_images_by_page(conn: &Connection, page: &str) -> Result<Vec<ImageRecord>> {
    let q = format!("SELECT {COLS} FROM images WHERE {ON_PAGE} ORDER BY id ASC");
    let mut stmt = conn.prepare(&q).map_err(|e| Error::database(e.to_string()))?;
    let rows = stmt
        .query_map([page], ImageRecord::from_row)
        .map_err(|e| Error::database(e.to_string()))?
        .collect::<std::result::Result<Vec<_>, _>>()
        .map_err(|e| Error::database(e.to_string()))?;
    Ok(rows)
}

/// Get an image by primary key.
pub fn get_image(conn: &Connection, id: i64) -> Result<Option<ImageRecord>> {
    let q = format!("SELECT {COLS} FROM images WHERE id = ?1");
    conn.query_row(&q, [id], ImageRecord::from_row)
        .optional()
        .map_err(|e| Error::database(e.to_string()))
}

/// Get an image by primary key, only if it is tagged with `page`.
pub fn get_image_on_page(conn: &Connection, page: &str, id: i64) -> Result<Option<ImageRecord>> {
    let q = format!("SELECT {COLS} FROM images WHERE id = ?2 AND {ON_PAGE}");
    conn.query_row(&q, rusqlite::params![page, id], ImageRecord::from_row)
        .optional()
        .map_err(|e| Error::database(e.to_string()))
}

/// Clear the slot type of every row on `page` currently typed `slot_type`.
///
/// Returns the number of rows cleared. This runs as its own statement; it
/// is not transactional with any later update.
pub fn clear_slot_on_page(conn: &Connection, page: &str, slot_type: &str) -> Result<usize> {
    let q = format!("UPDATE images SET type = NULL WHERE type = ?2 AND {ON_PAGE}");
    conn.execute(&q, rusqlite::params![page, slot_type])
        .map_err(|e| Error::database(e.to_string()))
}

/// Point a row at a new URL and slot type. Returns true if a row was updated.
pub fn update_image(
    conn: &Connection,
    id: i64,
    url: &str,
    slot_type: Option<&str>,
) -> Result<bool> {
    let n = conn
        .execute(
            "UPDATE images SET url = ?1, type = ?2 WHERE id = ?3",
            rusqlite::params![url, slot_type, id],
        )
        .map_err(|e| Error::database(e.to_string()))?;
    Ok(n > 0)
}
