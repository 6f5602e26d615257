//! Table backends implementing [`TableBackend`].
//!
//! - `sqlite`: bundled SQLite, on a file or in memory.
//!
//! `build_backend_from_config` chooses the backend from the configured URI
//! scheme (`memory://`, `sqlite://`, `file://`, or a bare path).

mod sqlite;
pub use sqlite::SqliteBackend;

use dsrec_core::config::BackendConfig;
use dsrec_core::ident::DatasetName;
use dsrec_core::types::{Row, Scalar};

use crate::error::{Error, Result};

/// Generic tabular storage used by the record store.
///
/// Implementations must report a primary-key collision as
/// [`Error::PrimaryKeyConflict`] and every other failure as
/// [`Error::Storage`]. Each call runs as its own backend-managed statement;
/// nothing here spans calls.
pub trait TableBackend: Send + Sync {
    /// Execute a literal DDL statement (no parameters).
    fn execute_ddl(&self, sql: &str) -> Result<()>;

    /// Execute a DML statement with bound parameters; returns rows affected.
    fn execute(&self, sql: &str, params: &[Scalar]) -> Result<usize>;

    /// Run a query with bound parameters and return every row in the order
    /// the backend produced them.
    fn query(&self, sql: &str, params: &[Scalar]) -> Result<Vec<Row>>;

    /// Whether a table for `table` exists.
    fn table_exists(&self, table: &DatasetName) -> Result<bool>;
}

/// Build the correct backend using the provided configuration.
pub fn build_backend_from_config(cfg: &BackendConfig) -> Result<Box<dyn TableBackend>> {
    match cfg.scheme() {
        Some("memory") => Ok(Box::new(SqliteBackend::open_in_memory()?)),
        Some("sqlite") | Some("file") | None => {
            // Treat the URI as file:// or a bare path.
            Ok(Box::new(SqliteBackend::open_with_config(cfg)?))
        }
        Some(other) => Err(Error::Config(format!(
            "unsupported backend scheme '{other}'"
        ))),
    }
}
