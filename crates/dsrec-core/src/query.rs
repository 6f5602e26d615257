//! Closed sets of fields and directions that may drive a generated clause.
//!
//! Caller input is parsed into these enums (case-insensitively) before any
//! statement text is built; the column names rendered into SQL come from
//! `column()`, never from the input string.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};

pub const UNSUPPORTED_GROUP_BY: &str = "Unsupported groupBy field";
pub const UNSUPPORTED_SORT_BY: &str = "Unsupported sortBy field or field provided does not exist";

/// Fields a dataset can be grouped by.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum GroupField {
    Department,
    Age,
}

impl GroupField {
    pub const fn column(self) -> &'static str {
        match self {
            GroupField::Department => "department",
            GroupField::Age => "age",
        }
    }
}

impl FromStr for GroupField {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_lowercase().as_str() {
            "department" => Ok(GroupField::Department),
            "age" => Ok(GroupField::Age),
            _ => Err(Error::UnsupportedField(UNSUPPORTED_GROUP_BY)),
        }
    }
}

impl fmt::Display for GroupField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.column())
    }
}

/// Fields a dataset can be sorted by.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SortField {
    Age,
    Name,
    Department,
}

impl SortField {
    pub const fn column(self) -> &'static str {
        match self {
            SortField::Age => "age",
            SortField::Name => "name",
            SortField::Department => "department",
        }
    }
}

impl FromStr for SortField {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_lowercase().as_str() {
            "age" => Ok(SortField::Age),
            "name" => Ok(SortField::Name),
            "department" => Ok(SortField::Department),
            _ => Err(Error::UnsupportedField(UNSUPPORTED_SORT_BY)),
        }
    }
}

impl fmt::Display for SortField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.column())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SortOrder {
    #[default]
    Asc,
    Desc,
}

impl SortOrder {
    /// SQL keyword for an `ORDER BY` clause.
    pub const fn keyword(self) -> &'static str {
        match self {
            SortOrder::Asc => "ASC",
            SortOrder::Desc => "DESC",
        }
    }
}

impl FromStr for SortOrder {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_lowercase().as_str() {
            "asc" => Ok(SortOrder::Asc),
            "desc" => Ok(SortOrder::Desc),
            _ => Err(Error::UnsupportedOrder),
        }
    }
}

impl fmt::Display for SortOrder {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SortOrder::Asc => f.write_str("asc"),
            SortOrder::Desc => f.write_str("desc"),
        }
    }
}
