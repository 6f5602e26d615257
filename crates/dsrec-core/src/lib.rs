#![forbid(unsafe_code)]
//! dsrec-core: record types, dataset-name sanitizer, query fields, and config.
//!
//! Pure data and validation; no database access lives here. Storage crates
//! build statements from the types in this crate (`DatasetName`, `Schema`,
//! `GroupField`/`SortField`/`SortOrder`) and never from raw caller strings.

pub mod config;
pub mod error;
pub mod ident;
pub mod prelude;
pub mod query;
pub mod record;
pub mod schema;
pub mod types;

pub use error::{Error, Result};
pub use ident::{sanitize, DatasetName};
pub use query::{GroupField, SortField, SortOrder};
pub use record::{NewRecord, Record};
