//! Core contracts for coalsynth.
//!
//! This crate defines the fixed input schema (header lines, sentinel and
//! NULL token), the SQL table layouts the tool writes, and the literal
//! values used to render `INSERT` statements.

pub mod error;
pub mod schema;
pub mod types;

pub use error::{Error, Result};
pub use schema::{
    BLEND_HEADER, BLEND_TABLE, COAL_MOVEMENT_TABLE, MOVEMENT_HEADER, NULL_TOKEN, SENTINEL,
    STOCKPILE_HEADER, STOCKPILE_TABLE, Section, TableLayout,
};
pub use types::{InsertStatement, SqlValue};

/// Number of per-row value columns (stockpile1..10, Coal1..10) in the
/// Stockpile and Blend tables.
pub const VALUE_COLUMNS: usize = 10;
