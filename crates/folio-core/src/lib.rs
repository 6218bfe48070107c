//! folio-core: shared errors, configuration, and the page/slot vocabulary.
//!
//! This crate is the foundational dependency for all other folio-* crates.
//! It carries no I/O beyond reading the config file.

pub mod config;
pub mod error;
pub mod page;

// Re-export the most commonly used items at the crate root.
pub use error::{Error, Result};
pub use page::{slot, Page};
