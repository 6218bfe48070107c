//! Route handlers for the HTTP API.

pub mod auth;
pub mod fallback;
pub mod health;
pub mod images;
pub mod uploads;
