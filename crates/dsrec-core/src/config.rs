//! Store configuration that the CLI and embedding services serialize/deserialize.

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};

/// Default busy timeout for the database connection (ms).
pub const DEFAULT_BUSY_TIMEOUT_MS: u64 = 5_000;

/// `SQLite` journal mode for file databases.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum JournalMode {
    #[default]
    Wal,
    Delete,
}

impl JournalMode {
    pub const fn pragma_value(self) -> &'static str {
        match self {
            JournalMode::Wal => "wal",
            JournalMode::Delete => "delete",
        }
    }

    pub fn parse(s: &str) -> Result<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "wal" => Ok(JournalMode::Wal),
            "delete" => Ok(JournalMode::Delete),
            other => Err(Error::Config(format!("unknown journal mode '{other}'"))),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct StoreConfig {
    /// Database file used when no URI is configured.
    pub database_path: String,

    /// Optional backend URI (e.g., `memory://`, `sqlite:///var/lib/dsrec.db`).
    pub database_uri: Option<String>,

    pub busy_timeout_ms: u64,

    pub journal_mode: JournalMode,
}

/// Resolved backend selection handed to `dsrec-io`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BackendConfig {
    pub uri: Option<String>,
    /// Filesystem path of the database, or the URI remainder for
    /// non-file schemes.
    pub root: String,
    pub busy_timeout_ms: u64,
    pub journal_mode: JournalMode,
}

impl BackendConfig {
    pub fn scheme(&self) -> Option<&str> {
        self.uri
            .as_deref()
            .and_then(|uri| uri.split_once("://"))
            .map(|(scheme, _)| scheme.trim())
            .filter(|s| !s.is_empty())
    }

    /// In-memory backend, mostly for tests.
    pub fn memory() -> Self {
        StoreConfig {
            database_uri: Some("memory://".into()),
            ..Default::default()
        }
        .backend_config()
    }
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self {
            database_path: "dsrec.db".into(),
            database_uri: None,
            busy_timeout_ms: DEFAULT_BUSY_TIMEOUT_MS,
            journal_mode: JournalMode::default(),
        }
    }
}

impl StoreConfig {
    /// Build config from environment variables with sensible defaults.
    ///
    /// Environment variables:
    /// - `DSREC_DATABASE_PATH`: database file path
    /// - `DSREC_DATABASE_URI`: backend URI (overrides the path)
    /// - `DSREC_BUSY_TIMEOUT_MS`: busy timeout in milliseconds
    /// - `DSREC_JOURNAL_MODE`: `wal` or `delete`
    pub fn from_env() -> Self {
        Self::from_vars(|key| std::env::var(key).ok())
    }

    /// Same as [`from_env`](Self::from_env) with an injectable lookup.
    /// Unparsable values are ignored.
    pub fn from_vars(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let mut cfg = Self::default();

        if let Some(s) = lookup("DSREC_DATABASE_PATH") {
            cfg.database_path = s;
        }

        if let Some(s) = lookup("DSREC_DATABASE_URI") {
            cfg.database_uri = Some(s);
        }

        if let Some(s) = lookup("DSREC_BUSY_TIMEOUT_MS") {
            if let Ok(v) = s.parse::<u64>() {
                cfg.busy_timeout_ms = v;
            }
        }

        if let Some(s) = lookup("DSREC_JOURNAL_MODE") {
            if let Ok(v) = JournalMode::parse(&s) {
                cfg.journal_mode = v;
            }
        }

        cfg
    }

    /// Produce the backend selection used by the IO layer.
    pub fn backend_config(&self) -> BackendConfig {
        let uri = self
            .database_uri
            .as_deref()
            .map(str::trim)
            .filter(|u| !u.is_empty())
            .map(str::to_string);

        let root = match uri.as_deref().and_then(|u| u.split_once("://")) {
            Some(("file", rest)) | Some(("sqlite", rest)) if !rest.is_empty() => {
                file_uri_to_path(rest)
            }
            Some((_, rest)) if !rest.is_empty() => rest.trim_end_matches('/').to_string(),
            _ => self.database_path.clone(),
        };

        BackendConfig {
            uri,
            root,
            busy_timeout_ms: self.busy_timeout_ms,
            journal_mode: self.journal_mode,
        }
    }
}

fn file_uri_to_path(rest: &str) -> String {
    if rest.starts_with('/') {
        rest.to_string()
    } else {
        format!("/{}", rest)
    }
}
