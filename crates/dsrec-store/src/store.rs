//! `DatasetStore`: CRUD-lite over dynamically named tables.
//!
//! Every public operation checks its inputs in a fixed order (dataset name,
//! then field, then order) before touching the backend. Inserts run as two
//! independent statements, `CREATE TABLE IF NOT EXISTS` then `INSERT`; a
//! failure between them leaves an empty table behind, which the next insert
//! simply reuses.

use std::collections::HashMap;

use dsrec_core::config::{BackendConfig, StoreConfig};
use dsrec_core::ident::DatasetName;
use dsrec_core::query::{GroupField, SortField, SortOrder};
use dsrec_core::record::{NewRecord, Record};
use dsrec_core::schema::Schema;
use dsrec_io::{build_backend_from_config, sql, TableBackend};

use crate::error::{Error, Result};
use crate::metrics::emit_op;

/// Records partitioned by group key. Key order is unspecified.
pub type GroupedRecords = HashMap<String, Vec<Record>>;

pub struct DatasetStore {
    backend: Box<dyn TableBackend>,
    schema: Schema,
}

impl DatasetStore {
    pub fn new(backend: Box<dyn TableBackend>) -> Self {
        Self {
            backend,
            schema: Schema::record(),
        }
    }

    /// Open the backend selected by `cfg`.
    pub fn open(cfg: &StoreConfig) -> Result<Self> {
        Self::open_backend(&cfg.backend_config())
    }

    pub fn open_backend(cfg: &BackendConfig) -> Result<Self> {
        Ok(Self::new(build_backend_from_config(cfg)?))
    }

    /// A store over a private in-memory database.
    pub fn in_memory() -> Result<Self> {
        Self::open_backend(&BackendConfig::memory())
    }

    /// Validate and insert one record, creating the dataset's table if absent.
    ///
    /// Fails with `InvalidIdentifier`, `Validation` (name, then age, then
    /// department), or `DuplicateRecord` when `id` is already present in this
    /// dataset. Other backend failures come back as `Storage`.
    pub fn insert_record(&self, dataset: &str, record: &NewRecord) -> Result<()> {
        let table = DatasetName::parse(dataset)?;
        let record = record.validate()?;
        self.ensure_table(&table)?;

        let stmt = sql::insert(&table, &self.schema);
        match self.backend.execute(&stmt, &record.params()) {
            Ok(_) => {
                emit_op("insert", &table, &[("id", record.id.to_string())]);
                Ok(())
            }
            Err(dsrec_io::Error::PrimaryKeyConflict) => {
                emit_op("insert_duplicate", &table, &[("id", record.id.to_string())]);
                Err(Error::DuplicateRecord {
                    id: record.id,
                    dataset: dataset.to_string(),
                })
            }
            Err(e) => Err(e.into()),
        }
    }

    /// Group every record of `dataset` by `field` (`department` or `age`,
    /// any case). Age keys are decimal strings; within a group records keep
    /// the order storage returned them in.
    pub fn group_by(&self, dataset: &str, field: &str) -> Result<GroupedRecords> {
        let table = DatasetName::parse(dataset)?;
        let field: GroupField = field.parse()?;
        self.group_records(&table, field)
    }

    pub fn group_records(&self, table: &DatasetName, field: GroupField) -> Result<GroupedRecords> {
        let records = self.read(&sql::select_all(table, &self.schema))?;
        let total = records.len();

        let mut groups = GroupedRecords::new();
        for record in records {
            groups
                .entry(record.group_key(field))
                .or_default()
                .push(record);
        }

        emit_op(
            "group_by",
            table,
            &[
                ("field", field.to_string()),
                ("rows", total.to_string()),
                ("groups", groups.len().to_string()),
            ],
        );
        Ok(groups)
    }

    /// Every record of `dataset` ordered by `field` (`age`, `name`, or
    /// `department`) in `order` (`asc`/`desc`), both case-insensitive.
    /// Strings compare lexicographically, ages numerically; ties keep
    /// storage order.
    pub fn sort_by(&self, dataset: &str, field: &str, order: &str) -> Result<Vec<Record>> {
        let table = DatasetName::parse(dataset)?;
        let field: SortField = field.parse()?;
        let order: SortOrder = order.parse()?;
        self.sort_records(&table, field, order)
    }

    pub fn sort_records(
        &self,
        table: &DatasetName,
        field: SortField,
        order: SortOrder,
    ) -> Result<Vec<Record>> {
        let stmt = sql::select_ordered(table, &self.schema, field, order);
        let records = self.read(&stmt)?;
        emit_op(
            "sort_by",
            table,
            &[
                ("field", field.to_string()),
                ("order", order.to_string()),
                ("rows", records.len().to_string()),
            ],
        );
        Ok(records)
    }

    /// Create the dataset's table if it does not exist. Idempotent; never
    /// touches existing rows.
    pub fn ensure_dataset(&self, dataset: &str) -> Result<()> {
        let table = DatasetName::parse(dataset)?;
        self.ensure_table(&table)
    }

    /// Whether `dataset` has been provisioned.
    pub fn dataset_exists(&self, dataset: &str) -> Result<bool> {
        let table = DatasetName::parse(dataset)?;
        Ok(self.backend.table_exists(&table)?)
    }

    fn ensure_table(&self, table: &DatasetName) -> Result<()> {
        self.backend
            .execute_ddl(&sql::create_table(table, &self.schema))?;
        emit_op("ensure_table", table, &[]);
        Ok(())
    }

    fn read(&self, stmt: &str) -> Result<Vec<Record>> {
        self.backend
            .query(stmt, &[])?
            .into_iter()
            .map(|row| Record::from_row(&row).map_err(Error::from))
            .collect()
    }
}
