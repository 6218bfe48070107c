//! Rust structs mapping to database tables.
//!
//! Each model implements `from_row` for constructing itself from a
//! `rusqlite::Row`.

// ---------------------------------------------------------------------------
// User
// ---------------------------------------------------------------------------

/// An admin account. The password column is stored and compared verbatim.
#[derive(Debug, Clone)]
pub struct User {
    pub id: i64,
    pub username: String,
    pub password: String,
    pub role: String,
}

impl User {
    pub fn from_row(row: &rusqlite::Row) -> rusqlite::Result<Self> {
        Ok(Self {
            id: row.get(0)?,
            username: row.get(1)?,
            password: row.get(2)?,
            role: row.get(3)?,
        })
    }
}

// ---------------------------------------------------------------------------
// ImageRecord
// ---------------------------------------------------------------------------

/// A row of the `images` table.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImageRecord {
    pub id: i64,
    pub url: String,
    /// Slot type; `None` once a slider reset has cleared it.
    pub slot_type: Option<String>,
    /// Page tags this image is visible on.
    pub pages: Vec<String>,
}

impl ImageRecord {
    pub fn from_row(row: &rusqlite::Row) -> rusqlite::Result<Self> {
        let pages_json: String = row.get(3)?;
        Ok(Self {
            id: row.get(0)?,
            url: row.get(1)?,
            slot_type: row.get(2)?,
            pages: serde_json::from_str(&pages_json).unwrap_or_default(),
        })
    }

    /// Whether the row's slot type is exactly `slot`.
    pub fn has_slot(&self, slot: &str) -> bool {
        self.slot_type.as_deref() == Some(slot)
    }

    /// Whether the row is tagged with `page`.
    pub fn on_page(&self, page: &str) -> bool {
        self.pages.iter().any(|p| p == page)
    }
}
