#![forbid(unsafe_code)]
//! dsrec: named datasets of fixed-shape employee records.
//!
//! Re-exports the workspace crates under one roof:
//! - `model`: records, the dataset-name sanitizer, query fields, config
//! - `io`: the `TableBackend` trait and the SQLite backend
//! - `store`: `DatasetStore`, the record service

pub use dsrec_core as model;
pub use dsrec_io as io;
pub use dsrec_store as store;

pub use dsrec_core::{sanitize, DatasetName, GroupField, NewRecord, Record, SortField, SortOrder};
pub use dsrec_store::{DatasetStore, Error, ErrorKind, GroupedRecords, Result};
