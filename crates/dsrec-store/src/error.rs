use thiserror::Error;

/// Result type local to dsrec-store.
pub type Result<T> = std::result::Result<T, Error>;

/// Failures of the record service. Everything except `Storage` and `Config`
/// is detected before or instead of a write and is never retried.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum Error {
    #[error("Invalid dataset name")]
    InvalidIdentifier,

    #[error("{0}")]
    Validation(&'static str),

    #[error("Record with ID {id} already exists in dataset '{dataset}'")]
    DuplicateRecord { id: i64, dataset: String },

    #[error("{0}")]
    UnsupportedField(&'static str),

    #[error("Unsupported order type (asc/desc)")]
    UnsupportedOrder,

    /// Untranslated backend failure.
    #[error("{0}")]
    Storage(String),

    #[error("Invalid configuration: {0}")]
    Config(String),
}

/// Fieldless discriminant of [`Error`] for status mapping.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    InvalidIdentifier,
    Validation,
    DuplicateRecord,
    UnsupportedField,
    UnsupportedOrder,
    Storage,
    Config,
}

impl ErrorKind {
    pub const fn as_str(self) -> &'static str {
        match self {
            ErrorKind::InvalidIdentifier => "invalid_identifier",
            ErrorKind::Validation => "validation",
            ErrorKind::DuplicateRecord => "duplicate_record",
            ErrorKind::UnsupportedField => "unsupported_field",
            ErrorKind::UnsupportedOrder => "unsupported_order",
            ErrorKind::Storage => "storage",
            ErrorKind::Config => "config",
        }
    }

    /// Whether the caller's input was at fault (as opposed to the backend).
    pub const fn is_client_error(self) -> bool {
        !matches!(self, ErrorKind::Storage | ErrorKind::Config)
    }
}

impl Error {
    pub fn kind(&self) -> ErrorKind {
        match self {
            Error::InvalidIdentifier => ErrorKind::InvalidIdentifier,
            Error::Validation(_) => ErrorKind::Validation,
            Error::DuplicateRecord { .. } => ErrorKind::DuplicateRecord,
            Error::UnsupportedField(_) => ErrorKind::UnsupportedField,
            Error::UnsupportedOrder => ErrorKind::UnsupportedOrder,
            Error::Storage(_) => ErrorKind::Storage,
            Error::Config(_) => ErrorKind::Config,
        }
    }
}

impl From<dsrec_core::Error> for Error {
    fn from(e: dsrec_core::Error) -> Self {
        use dsrec_core::Error as Core;
        match e {
            Core::InvalidIdentifier => Error::InvalidIdentifier,
            Core::Validation(msg) => Error::Validation(msg),
            Core::UnsupportedField(msg) => Error::UnsupportedField(msg),
            Core::UnsupportedOrder => Error::UnsupportedOrder,
            Core::Config(msg) => Error::Config(msg),
            other @ (Core::RowShape(_) | Core::Encoding(_)) => Error::Storage(other.to_string()),
        }
    }
}

impl From<dsrec_io::Error> for Error {
    fn from(e: dsrec_io::Error) -> Self {
        match e {
            dsrec_io::Error::Config(msg) => Error::Config(msg),
            other => Error::Storage(other.to_string()),
        }
    }
}
