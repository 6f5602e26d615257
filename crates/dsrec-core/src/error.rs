use thiserror::Error;

/// Canonical result for core.
pub type Result<T> = std::result::Result<T, Error>;

/// Errors raised before any storage access: names, records, query fields.
///
/// The `Display` text of the caller-facing variants is the exact message a
/// transport layer renders, so it must not be reworded.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum Error {
    #[error("Invalid dataset name")]
    InvalidIdentifier,

    #[error("{0}")]
    Validation(&'static str),

    #[error("{0}")]
    UnsupportedField(&'static str),

    #[error("Unsupported order type (asc/desc)")]
    UnsupportedOrder,

    /// A storage row did not have the shape of a `Record`.
    #[error("Row shape error: {0}")]
    RowShape(String),

    #[error("Invalid configuration: {0}")]
    Config(String),

    #[error("Record encoding error: {0}")]
    Encoding(String),
}

impl From<serde_json::Error> for Error {
    fn from(e: serde_json::Error) -> Self {
        Error::Encoding(e.to_string())
    }
}
