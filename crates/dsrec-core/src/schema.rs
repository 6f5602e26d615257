//! Logical table schema. Pure data; rendered into DDL by `dsrec-io::sql`.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum DataType {
    Boolean,
    Int32,
    Int64,
    Float64,
    Utf8,
    Binary,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Field {
    pub name: String,
    pub data_type: DataType,
    pub nullable: bool,
    /// Upper bound on character length for `Utf8` columns.
    pub max_len: Option<usize>,
    pub primary_key: bool,
}

impl Field {
    pub fn new(name: impl Into<String>, data_type: DataType, nullable: bool) -> Self {
        Self {
            name: name.into(),
            data_type,
            nullable,
            max_len: None,
            primary_key: false,
        }
    }

    pub fn with_max_len(mut self, max_len: usize) -> Self {
        self.max_len = Some(max_len);
        self
    }

    pub fn primary_key(mut self) -> Self {
        self.primary_key = true;
        self.nullable = false;
        self
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Schema {
    pub fields: Vec<Field>,
}

/// Max length of `name` in the record table.
pub const NAME_MAX_LEN: usize = 100;
/// Max length of `department` in the record table.
pub const DEPARTMENT_MAX_LEN: usize = 50;

impl Schema {
    pub fn new(fields: Vec<Field>) -> Self {
        Self { fields }
    }

    /// The fixed shape of every dataset table: `(id, name, age, department)`.
    pub fn record() -> Self {
        Self::new(vec![
            Field::new("id", DataType::Int64, false).primary_key(),
            Field::new("name", DataType::Utf8, false).with_max_len(NAME_MAX_LEN),
            Field::new("age", DataType::Int32, false),
            Field::new("department", DataType::Utf8, false).with_max_len(DEPARTMENT_MAX_LEN),
        ])
    }

    pub fn field(&self, idx: usize) -> Option<&Field> {
        self.fields.get(idx)
    }

    pub fn index_of(&self, name: &str) -> Option<usize> {
        self.fields.iter().position(|f| f.name == name)
    }

    pub fn len(&self) -> usize {
        self.fields.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    /// Comma-separated column names in declaration order.
    pub fn column_list(&self) -> String {
        self.fields
            .iter()
            .map(|f| f.name.as_str())
            .collect::<Vec<_>>()
            .join(", ")
    }
}
