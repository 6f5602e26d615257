//! Dataset-name sanitizer.
//!
//! A dataset name becomes a table identifier, so it is the one caller string
//! that ever lands inside SQL text. It must match `^[a-zA-Z0-9_]+$` (ASCII
//! only, at least one character). `DatasetName` can only be built through
//! [`sanitize`], and the statement builders in `dsrec-io` accept nothing else.

use std::fmt;
use std::str::FromStr;

use serde::Serialize;

use crate::error::{Error, Result};

/// Return `name` unchanged if it is a valid dataset identifier.
pub fn sanitize(name: &str) -> Result<&str> {
    if is_identifier(name) {
        Ok(name)
    } else {
        Err(Error::InvalidIdentifier)
    }
}

fn is_identifier(name: &str) -> bool {
    !name.is_empty()
        && name
            .bytes()
            .all(|b| b.is_ascii_alphanumeric() || b == b'_')
}

/// A dataset name that has passed [`sanitize`].
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(transparent)]
pub struct DatasetName(String);

impl DatasetName {
    pub fn parse(name: &str) -> Result<Self> {
        sanitize(name).map(|s| Self(s.to_string()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl FromStr for DatasetName {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        Self::parse(s)
    }
}

impl AsRef<str> for DatasetName {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for DatasetName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}
