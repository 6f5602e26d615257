//! Dataset names are checked before any backend access.

mod test_data_gen;

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

use dsrec_core::ident::{sanitize, DatasetName};
use dsrec_core::types::{Row, Scalar};
use dsrec_io::{SqliteBackend, TableBackend};
use dsrec_store::{DatasetStore, Error, ErrorKind};
use test_data_gen::record;

/// Wraps a real backend and counts every call that reaches it.
struct CountingBackend {
    inner: SqliteBackend,
    calls: Arc<AtomicUsize>,
}

impl CountingBackend {
    fn new(calls: Arc<AtomicUsize>) -> Self {
        Self {
            inner: SqliteBackend::open_in_memory().expect("in-memory sqlite"),
            calls,
        }
    }

    fn hit(&self) {
        self.calls.fetch_add(1, Ordering::SeqCst);
    }
}

impl TableBackend for CountingBackend {
    fn execute_ddl(&self, sql: &str) -> dsrec_io::Result<()> {
        self.hit();
        self.inner.execute_ddl(sql)
    }

    fn execute(&self, sql: &str, params: &[Scalar]) -> dsrec_io::Result<usize> {
        self.hit();
        self.inner.execute(sql, params)
    }

    fn query(&self, sql: &str, params: &[Scalar]) -> dsrec_io::Result<Vec<Row>> {
        self.hit();
        self.inner.query(sql, params)
    }

    fn table_exists(&self, table: &DatasetName) -> dsrec_io::Result<bool> {
        self.hit();
        self.inner.table_exists(table)
    }
}

fn counting_store() -> (DatasetStore, Arc<AtomicUsize>) {
    let calls = Arc::new(AtomicUsize::new(0));
    let store = DatasetStore::new(Box::new(CountingBackend::new(calls.clone())));
    (store, calls)
}

const HOSTILE_NAMES: [&str; 8] = [
    "emp; DROP TABLE emp",
    "emp-1",
    "emp 1",
    "",
    "emp\"",
    "emp'--",
    "schema.emp",
    "émp",
];

#[test]
fn test_sanitize_accepts_word_characters() {
    for name in ["emp", "EMP_2024", "_", "2024", "a_b_c", "x"] {
        assert_eq!(sanitize(name).unwrap(), name);
    }
}

#[test]
fn test_sanitize_rejects_everything_else() {
    for name in HOSTILE_NAMES {
        let err = sanitize(name).unwrap_err();
        assert_eq!(err.to_string(), "Invalid dataset name", "name {name:?}");
    }
    assert!(sanitize("emp\n").is_err());
    assert!(sanitize("\u{0}").is_err());
}

#[test]
fn test_hostile_names_never_reach_backend() {
    let (store, calls) = counting_store();

    for name in HOSTILE_NAMES {
        let errors = [
            store
                .insert_record(name, &record(1, "John", 30, "Engineering"))
                .unwrap_err(),
            store.group_by(name, "department").unwrap_err(),
            store.sort_by(name, "age", "asc").unwrap_err(),
            store.ensure_dataset(name).unwrap_err(),
            store.dataset_exists(name).unwrap_err(),
        ];
        for err in errors {
            assert_eq!(err, Error::InvalidIdentifier, "name {name:?}");
        }
    }

    assert_eq!(calls.load(Ordering::SeqCst), 0);
}

#[test]
fn test_unsupported_field_and_order_never_reach_backend() {
    let (store, calls) = counting_store();

    let err = store.group_by("emp", "salary").unwrap_err();
    assert_eq!(err.kind(), ErrorKind::UnsupportedField);
    let err = store.sort_by("emp", "salary", "asc").unwrap_err();
    assert_eq!(err.kind(), ErrorKind::UnsupportedField);
    let err = store.sort_by("emp", "age", "up").unwrap_err();
    assert_eq!(err.kind(), ErrorKind::UnsupportedOrder);

    let err = store
        .insert_record("emp", &record(1, "", 30, "Engineering"))
        .unwrap_err();
    assert_eq!(err.kind(), ErrorKind::Validation);

    assert_eq!(calls.load(Ordering::SeqCst), 0);
}

#[test]
fn test_valid_names_reach_backend() {
    let (store, calls) = counting_store();
    store
        .insert_record("emp", &record(1, "John", 30, "Engineering"))
        .unwrap();
    // Provisioning plus the insert itself.
    assert_eq!(calls.load(Ordering::SeqCst), 2);
}

#[test]
fn test_hostile_payload_values_are_stored_verbatim() {
    let (store, _) = counting_store();
    let payload = "Robert'); DROP TABLE emp;--";
    store
        .insert_record("emp", &record(1, payload, 30, "Engineering"))
        .unwrap();
    let rows = store.sort_by("emp", "name", "asc").unwrap();
    assert_eq!(rows.len(), 1);
    assert_eq!(rows[0].name, payload);
    assert!(store.dataset_exists("emp").unwrap());
}

#[test]
fn test_keyword_and_numeric_names_are_usable() {
    let (store, _) = counting_store();
    for name in ["order", "select", "2024"] {
        store
            .insert_record(name, &record(1, "John", 30, "Engineering"))
            .unwrap();
        assert_eq!(store.sort_by(name, "age", "desc").unwrap().len(), 1);
    }
}

#[test]
fn test_dataset_name_parse_matches_sanitize() {
    assert_eq!(DatasetName::parse("emp").unwrap().as_str(), "emp");
    assert!(DatasetName::parse("emp-1").is_err());
    let parsed: DatasetName = "Emp_1".parse().unwrap();
    assert_eq!(parsed.to_string(), "Emp_1");
}
