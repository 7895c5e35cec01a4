//! Domain logic for the GameZone catalog.
//!
//! Everything here is free of I/O: search predicates, page arithmetic,
//! form validation, and spreadsheet rendering. The `db` and `api` crates
//! build on top of it.

pub mod error;
pub mod export;
pub mod game;
pub mod pagination;
pub mod search;
pub mod types;
