use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex, MutexGuard};
use std::time::Duration;

use rusqlite::types::Value;
use rusqlite::{ffi, params_from_iter, Connection, OpenFlags};

use dsrec_core::config::{BackendConfig, JournalMode, DEFAULT_BUSY_TIMEOUT_MS};
use dsrec_core::ident::DatasetName;
use dsrec_core::types::{Row, Scalar};

use super::TableBackend;
use crate::error::{Error, Result};
use crate::sql;

/// SQLite-backed table storage. Clones share one connection guarded by a
/// mutex, so statements from different threads are serialized.
#[derive(Clone)]
pub struct SqliteBackend {
    connection: Arc<Mutex<Connection>>,
    path: Option<PathBuf>,
}

impl SqliteBackend {
    /// Open (creating if needed) a database file with default settings.
    pub fn open(path: impl AsRef<Path>) -> Result<Self> {
        Self::open_file(path.as_ref(), DEFAULT_BUSY_TIMEOUT_MS, JournalMode::default())
    }

    /// Open the database file named by `cfg.root`.
    pub fn open_with_config(cfg: &BackendConfig) -> Result<Self> {
        Self::open_file(Path::new(&cfg.root), cfg.busy_timeout_ms, cfg.journal_mode)
    }

    /// A private database that lives as long as this backend and its clones.
    pub fn open_in_memory() -> Result<Self> {
        let connection = Connection::open_in_memory().map_err(map_err)?;
        Ok(Self {
            connection: Arc::new(Mutex::new(connection)),
            path: None,
        })
    }

    fn open_file(path: &Path, busy_timeout_ms: u64, journal_mode: JournalMode) -> Result<Self> {
        if path.as_os_str().is_empty() {
            return Err(Error::Config("database path is empty".into()));
        }
        if path.is_dir() {
            return Err(Error::Config(format!(
                "database path {} is a directory",
                path.display()
            )));
        }
        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            std::fs::create_dir_all(parent)
                .map_err(|e| Error::Storage(format!("mkparent: {e}")))?;
        }

        let flags = OpenFlags::SQLITE_OPEN_READ_WRITE
            | OpenFlags::SQLITE_OPEN_CREATE
            | OpenFlags::SQLITE_OPEN_FULL_MUTEX;
        let connection = Connection::open_with_flags(path, flags).map_err(map_err)?;
        connection
            .busy_timeout(Duration::from_millis(busy_timeout_ms))
            .map_err(map_err)?;
        // journal_mode answers with the mode now in effect.
        let _mode: String = connection
            .query_row(
                &format!("PRAGMA journal_mode = {}", journal_mode.pragma_value()),
                [],
                |row| row.get(0),
            )
            .map_err(map_err)?;

        #[cfg(feature = "tracing")]
        tracing::debug!(path = %path.display(), journal_mode = journal_mode.pragma_value(), "opened sqlite backend");

        Ok(Self {
            connection: Arc::new(Mutex::new(connection)),
            path: Some(path.to_path_buf()),
        })
    }

    /// Database file, or `None` for an in-memory backend.
    pub fn path(&self) -> Option<&Path> {
        self.path.as_deref()
    }

    fn lock(&self) -> Result<MutexGuard<'_, Connection>> {
        self.connection
            .lock()
            .map_err(|_| Error::Storage("sqlite connection mutex poisoned".into()))
    }
}

impl TableBackend for SqliteBackend {
    fn execute_ddl(&self, sql: &str) -> Result<()> {
        self.lock()?.execute_batch(sql).map_err(map_err)
    }

    fn execute(&self, sql: &str, params: &[Scalar]) -> Result<usize> {
        self.lock()?
            .execute(sql, params_from_iter(params.iter().map(to_value)))
            .map_err(map_err)
    }

    fn query(&self, sql: &str, params: &[Scalar]) -> Result<Vec<Row>> {
        let conn = self.lock()?;
        let mut stmt = conn.prepare(sql).map_err(map_err)?;
        let width = stmt.column_count();
        let rows = stmt
            .query_map(params_from_iter(params.iter().map(to_value)), |row| {
                (0..width)
                    .map(|i| row.get::<_, Value>(i).map(from_value))
                    .collect::<rusqlite::Result<Row>>()
            })
            .map_err(map_err)?;
        let rows = rows.collect::<rusqlite::Result<Vec<Row>>>().map_err(map_err)?;
        Ok(rows)
    }

    fn table_exists(&self, table: &DatasetName) -> Result<bool> {
        let count: i64 = self
            .lock()?
            .query_row(sql::TABLE_EXISTS, [table.as_str()], |row| row.get(0))
            .map_err(map_err)?;
        Ok(count > 0)
    }
}

fn to_value(scalar: &Scalar) -> Value {
    match scalar {
        Scalar::Null => Value::Null,
        Scalar::Bool(b) => Value::Integer(i64::from(*b)),
        Scalar::I32(v) => Value::Integer(i64::from(*v)),
        Scalar::I64(v) => Value::Integer(*v),
        Scalar::F64(v) => Value::Real(*v),
        Scalar::Str(s) => Value::Text(s.clone()),
        Scalar::Bin(b) => Value::Blob(b.clone()),
    }
}

fn from_value(value: Value) -> Scalar {
    match value {
        Value::Null => Scalar::Null,
        Value::Integer(v) => Scalar::I64(v),
        Value::Real(v) => Scalar::F64(v),
        Value::Text(s) => Scalar::Str(s),
        Value::Blob(b) => Scalar::Bin(b),
    }
}

/// Primary-key collisions are the only failure given their own variant.
fn map_err(err: rusqlite::Error) -> Error {
    match err {
        rusqlite::Error::SqliteFailure(e, _)
            if e.extended_code == ffi::SQLITE_CONSTRAINT_PRIMARYKEY =>
        {
            Error::PrimaryKeyConflict
        }
        other => Error::Storage(other.to_string()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use dsrec_core::schema::Schema;

    fn table(name: &str) -> DatasetName {
        DatasetName::parse(name).unwrap()
    }

    fn provisioned(name: &str) -> (SqliteBackend, DatasetName) {
        let backend = SqliteBackend::open_in_memory().unwrap();
        let t = table(name);
        backend
            .execute_ddl(&sql::create_table(&t, &Schema::record()))
            .unwrap();
        (backend, t)
    }

    fn row(id: i64, name: &str, age: i32, dept: &str) -> Vec<Scalar> {
        vec![
            Scalar::I64(id),
            Scalar::Str(name.into()),
            Scalar::I32(age),
            Scalar::Str(dept.into()),
        ]
    }

    #[test]
    fn insert_and_select_roundtrip_types() {
        let (backend, t) = provisioned("emp");
        let schema = Schema::record();
        let n = backend
            .execute(&sql::insert(&t, &schema), &row(1, "John", 30, "Eng"))
            .unwrap();
        assert_eq!(n, 1);

        let rows = backend.query(&sql::select_all(&t, &schema), &[]).unwrap();
        assert_eq!(
            rows,
            vec![vec![
                Scalar::I64(1),
                Scalar::Str("John".into()),
                Scalar::I64(30),
                Scalar::Str("Eng".into()),
            ]]
        );
    }

    #[test]
    fn primary_key_collision_is_distinct() {
        let (backend, t) = provisioned("emp");
        let insert = sql::insert(&t, &Schema::record());
        backend.execute(&insert, &row(1, "John", 30, "Eng")).unwrap();
        let err = backend.execute(&insert, &row(1, "Jane", 25, "Ops")).unwrap_err();
        assert!(matches!(err, Error::PrimaryKeyConflict), "{err:?}");
    }

    #[test]
    fn other_constraints_are_storage_errors() {
        let (backend, t) = provisioned("emp");
        let insert = sql::insert(&t, &Schema::record());
        let long_dept = "d".repeat(51);
        let err = backend
            .execute(&insert, &row(1, "John", 30, &long_dept))
            .unwrap_err();
        assert!(matches!(err, Error::Storage(_)), "{err:?}");

        let mut null_name = row(2, "x", 1, "y");
        null_name[1] = Scalar::Null;
        let err = backend.execute(&insert, &null_name).unwrap_err();
        assert!(matches!(err, Error::Storage(_)), "{err:?}");
    }

    #[test]
    fn table_exists_ignores_case() {
        let (backend, _) = provisioned("Emp_A");
        assert!(backend.table_exists(&table("Emp_A")).unwrap());
        assert!(backend.table_exists(&table("emp_a")).unwrap());
        assert!(!backend.table_exists(&table("emp_b")).unwrap());
    }

    #[test]
    fn missing_table_query_fails() {
        let backend = SqliteBackend::open_in_memory().unwrap();
        let err = backend
            .query(&sql::select_all(&table("nope"), &Schema::record()), &[])
            .unwrap_err();
        assert!(err.to_string().contains("no such table"), "{err}");
    }

    #[test]
    fn clones_share_the_database() {
        let (backend, t) = provisioned("shared");
        let other = backend.clone();
        assert!(other.table_exists(&t).unwrap());
        assert!(other.path().is_none());
    }
}
