#![forbid(unsafe_code)]
//! dsrec-store: the dataset record service.
//!
//! `DatasetStore` validates dataset names and records, provisions a table per
//! dataset on first insert, maps primary-key collisions to `DuplicateRecord`,
//! and answers single-field group/sort queries. Routing, response envelopes,
//! and status mapping belong to the caller; it gets typed values or an
//! [`Error`] whose `kind()` it can map.

pub mod error;
pub mod metrics;
pub mod store;

pub use error::{Error, ErrorKind, Result};
pub use store::{DatasetStore, GroupedRecords};
