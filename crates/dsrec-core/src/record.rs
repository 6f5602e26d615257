//! The fixed four-field employee record.
//!
//! `NewRecord` is what a caller submits: every field except `id` may be
//! missing. `validate` turns it into a `Record`, which is the only shape
//! written to or read from storage.

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};
use crate::query::GroupField;
use crate::types::Scalar;

pub const NAME_REQUIRED: &str = "Name is required and cannot be blank";
pub const AGE_REQUIRED: &str = "Age is required and cannot be null";
pub const DEPARTMENT_REQUIRED: &str = "Department is required and cannot be blank";

#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Record {
    pub id: i64,
    pub name: String,
    pub age: i32,
    pub department: String,
}

impl Record {
    pub fn new(id: i64, name: impl Into<String>, age: i32, department: impl Into<String>) -> Self {
        Self {
            id,
            name: name.into(),
            age,
            department: department.into(),
        }
    }

    /// Statement parameters in `Schema::record()` column order.
    pub fn params(&self) -> Vec<Scalar> {
        vec![
            Scalar::I64(self.id),
            Scalar::Str(self.name.clone()),
            Scalar::I32(self.age),
            Scalar::Str(self.department.clone()),
        ]
    }

    /// Map a storage row selected as `id, name, age, department`.
    pub fn from_row(row: &[Scalar]) -> Result<Self> {
        let [id, name, age, department] = row else {
            return Err(Error::RowShape(format!(
                "expected 4 columns, got {}",
                row.len()
            )));
        };
        let id = id
            .as_i64()
            .ok_or_else(|| Error::RowShape(format!("id: expected integer, got {id:?}")))?;
        let age = age
            .as_i64()
            .ok_or_else(|| Error::RowShape(format!("age: expected integer, got {age:?}")))?;
        let age = i32::try_from(age)
            .map_err(|_| Error::RowShape(format!("age: {age} out of range")))?;
        let name = name
            .as_str()
            .ok_or_else(|| Error::RowShape(format!("name: expected text, got {name:?}")))?;
        let department = department.as_str().ok_or_else(|| {
            Error::RowShape(format!("department: expected text, got {department:?}"))
        })?;
        Ok(Self::new(id, name, age, department))
    }

    /// Grouping key; ages are keyed by their decimal rendering.
    pub fn group_key(&self, field: GroupField) -> String {
        match field {
            GroupField::Department => self.department.clone(),
            GroupField::Age => self.age.to_string(),
        }
    }
}

/// A record as submitted for insertion, before validation.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewRecord {
    pub id: i64,
    pub name: Option<String>,
    pub age: Option<i32>,
    pub department: Option<String>,
}

impl NewRecord {
    pub fn new(id: i64) -> Self {
        Self {
            id,
            ..Default::default()
        }
    }

    pub fn name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    pub fn age(mut self, age: i32) -> Self {
        self.age = Some(age);
        self
    }

    pub fn department(mut self, department: impl Into<String>) -> Self {
        self.department = Some(department.into());
        self
    }

    /// Parse the JSON body `{"id": .., "name": .., "age": .., "department": ..}`.
    pub fn from_json(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }

    /// Check required fields in the order name, age, department and stop at
    /// the first failure. Values are stored as given, not trimmed.
    pub fn validate(&self) -> Result<Record> {
        let name = non_blank(self.name.as_deref()).ok_or(Error::Validation(NAME_REQUIRED))?;
        let age = self.age.ok_or(Error::Validation(AGE_REQUIRED))?;
        let department = non_blank(self.department.as_deref())
            .ok_or(Error::Validation(DEPARTMENT_REQUIRED))?;
        Ok(Record::new(self.id, name, age, department))
    }
}

impl From<Record> for NewRecord {
    fn from(r: Record) -> Self {
        Self {
            id: r.id,
            name: Some(r.name),
            age: Some(r.age),
            department: Some(r.department),
        }
    }
}

fn non_blank(s: Option<&str>) -> Option<&str> {
    s.filter(|s| !s.trim().is_empty())
}
