//! User queries.

use folio_core::{Error, Result};
use rusqlite::{Connection, OptionalExtension};

use crate::models::User;

/// Create a new user and return it.
pub fn create_user(conn: &Connection, username: &str, password: &str, role: &str) -> Result<User> {
    conn.execute(
        "INSERT INTO users (username, password, role) VALUES (?1, ?2, ?3)",
        rusqlite::params![username, password, role],
    )
    .map_err(|e| {
        if e.to_string().contains("UNIQUE constraint failed") {
            Error::Conflict(format!("Username '{username}' already exists"))
        } else {
            Error::database(e.to_string())
        }
    })?;

    Ok(User {
        id: conn.last_insert_rowid(),
        username: username.to_string(),
        password: password.to_string(),
        role: role.to_string(),
    })
}

/// Find the user whose username and password both match exactly.
pub fn find_by_credentials(conn: &Connection, username: &str, password: &str) -> Result<Option<User>> {
    conn.query_row(
        "SELECT id, username, password, role FROM users WHERE username = ?1 AND password = ?2",
        [username, password],
        User::from_row,
    )
    .optional()
    .map_err(|e| Error::database(e.to_string()))
}
