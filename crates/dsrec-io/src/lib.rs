#![forbid(unsafe_code)]
//! dsrec-io: relational backends for dataset tables.
//!
//! A generic `TableBackend` trait (DDL, parameterized DML, row queries, table
//! introspection) is implemented by `SqliteBackend`. Statement text is built
//! only in `sql`, from sanitized `DatasetName`s and closed field enums.

pub mod backend;
pub mod error;
pub mod sql;

pub use backend::{build_backend_from_config, SqliteBackend, TableBackend};
pub use error::{Error, Result};
