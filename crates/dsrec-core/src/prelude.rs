//! Convenient re-exports for downstream crates.

pub use crate::config::{BackendConfig, JournalMode, StoreConfig};
pub use crate::error::{Error, Result};
pub use crate::ident::{sanitize, DatasetName};
pub use crate::query::{GroupField, SortField, SortOrder};
pub use crate::record::{NewRecord, Record};
pub use crate::schema::{DataType, Field, Schema};
pub use crate::types::{Row, Scalar};
