use thiserror::Error;

/// Result type local to dsrec-io.
pub type Result<T> = std::result::Result<T, Error>;

#[derive(Debug, Error)]
pub enum Error {
    /// An insert collided with an existing primary key.
    #[error("primary key conflict")]
    PrimaryKeyConflict,

    /// Any other backend failure (connectivity, other constraints, SQL errors).
    #[error("storage error: {0}")]
    Storage(String),

    #[error("invalid backend configuration: {0}")]
    Config(String),
}
