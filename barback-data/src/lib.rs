//! Import and persistence for the Barback catalogue.
//!
//! Responsibilities:
//! - Parse TheCocktailDB `{"drinks": [...]}` exports into core cocktails.
//! - Write cocktails, favourite edges, places and reviews into the SQLite
//!   catalogue read by `barback_core::SqliteCatalogStore`.
//!
//! Boundaries:
//! - Ranking lives in `barback-scorer`; this crate never scores.
//! - The schema is owned by `barback_core::CATALOG_SCHEMA`.

#![forbid(unsafe_code)]

mod import;
mod sqlite;

pub use import::{ImportError, import_drinks_file, parse_drinks};
pub use sqlite::{
    PersistCatalogError, add_favourite, add_review, persist_catalog_to_sqlite, remove_favourite,
    remove_review, update_review,
};
