//! dsrec CLI: insert and query dataset records.
//!
//! A thin collaborator over `DatasetStore`: it parses arguments, renders
//! results as JSON on stdout, and renders failures as a JSON error object on
//! stderr with a non-zero exit status.

use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};

use clap::{ArgAction, Parser, Subcommand};
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::Level;

use dsrec_core::config::{JournalMode, StoreConfig};
use dsrec_core::record::{NewRecord, Record};
use dsrec_store::{DatasetStore, ErrorKind};

#[derive(Parser)]
#[command(name = "dsrec")]
#[command(about = "Named datasets of employee records: insert, group, sort", long_about = None)]
struct Cli {
    /// YAML config file (database_path, database_uri, busy_timeout_ms, journal_mode)
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Database file (overrides config and environment)
    #[arg(long, global = true)]
    db: Option<String>,

    /// Backend URI, e.g. memory:// or sqlite:///var/lib/dsrec.db (overrides config)
    #[arg(long, global = true)]
    uri: Option<String>,

    /// Log verbosity on stderr (-v info, -vv debug, -vvv trace)
    #[arg(short, long, action = ArgAction::Count, global = true)]
    verbose: u8,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Insert one record, creating the dataset on first use
    Insert {
        dataset: String,

        #[arg(long, required_unless_present = "json")]
        id: Option<i64>,

        #[arg(long)]
        name: Option<String>,

        #[arg(long, allow_negative_numbers = true)]
        age: Option<i32>,

        #[arg(long)]
        department: Option<String>,

        /// Full record as JSON instead of individual flags
        #[arg(long, conflicts_with_all = ["id", "name", "age", "department"])]
        json: Option<String>,
    },

    /// Group or sort the records of a dataset
    Query {
        dataset: String,

        /// Group by `department` or `age` (takes precedence over --sort-by)
        #[arg(long)]
        group_by: Option<String>,

        /// Sort by `age`, `name` or `department`
        #[arg(long)]
        sort_by: Option<String>,

        /// Sort direction, `asc` or `desc`
        #[arg(long, default_value = "asc")]
        order: String,
    },

    /// Print whether a dataset has been provisioned
    Exists { dataset: String },
}

#[derive(Debug, Error)]
enum CliError {
    #[error(transparent)]
    Store(#[from] dsrec_store::Error),

    #[error("{0}")]
    Usage(String),

    #[error("config: {0}")]
    Config(String),
}

impl CliError {
    fn kind(&self) -> &'static str {
        match self {
            CliError::Store(e) => e.kind().as_str(),
            CliError::Usage(_) => "usage",
            CliError::Config(_) => "config",
        }
    }

    fn exit_code(&self) -> i32 {
        match self {
            CliError::Store(e) if !e.kind().is_client_error() => 2,
            CliError::Config(_) => 2,
            _ => 1,
        }
    }
}

/// Optional settings from a `--config` YAML file.
#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
struct ConfigFile {
    database_path: Option<String>,
    database_uri: Option<String>,
    busy_timeout_ms: Option<u64>,
    journal_mode: Option<JournalMode>,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct InsertResponse<'a> {
    message: &'static str,
    dataset: &'a str,
    record_id: i64,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct GroupedResponse {
    grouped_records: BTreeMap<String, Vec<Record>>,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct SortedResponse {
    sorted_records: Vec<Record>,
}

#[derive(Serialize)]
struct ErrorResponse<'a> {
    error: String,
    kind: &'a str,
}

fn main() {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    let result = resolve_config(&cli).and_then(|cfg| {
        tracing::debug!(?cfg, "resolved configuration");
        let store = DatasetStore::open(&cfg)?;
        execute(&store, &cli.command)
    });

    match result {
        Ok(out) => println!("{out}"),
        Err(e) => {
            let body = ErrorResponse {
                error: e.to_string(),
                kind: e.kind(),
            };
            match serde_json::to_string(&body) {
                Ok(json) => eprintln!("{json}"),
                Err(_) => eprintln!("Error: {e}"),
            }
            std::process::exit(e.exit_code());
        }
    }
}

fn init_tracing(verbose: u8) {
    let level = match verbose {
        0 => Level::WARN,
        1 => Level::INFO,
        2 => Level::DEBUG,
        _ => Level::TRACE,
    };
    // A subscriber may already be installed when embedded; keep that one.
    let _ = tracing_subscriber::fmt()
        .with_max_level(level)
        .with_writer(std::io::stderr)
        .try_init();
}

/// Defaults, then environment, then the YAML file, then command-line flags.
fn resolve_config(cli: &Cli) -> Result<StoreConfig, CliError> {
    let mut cfg = StoreConfig::from_env();
    if let Some(path) = &cli.config {
        let file = load_config_file(path)?;
        apply_file_config(&mut cfg, &file);
    }
    if let Some(db) = &cli.db {
        cfg.database_path = db.clone();
        cfg.database_uri = None;
    }
    if let Some(uri) = &cli.uri {
        cfg.database_uri = Some(uri.clone());
    }
    Ok(cfg)
}

fn load_config_file(path: &Path) -> Result<ConfigFile, CliError> {
    let text = fs::read_to_string(path)
        .map_err(|e| CliError::Config(format!("{}: {e}", path.display())))?;
    parse_config_file(&text)
}

fn parse_config_file(text: &str) -> Result<ConfigFile, CliError> {
    if text.trim().is_empty() {
        return Ok(ConfigFile::default());
    }
    serde_yaml::from_str(text).map_err(|e| CliError::Config(e.to_string()))
}

fn apply_file_config(cfg: &mut StoreConfig, file: &ConfigFile) {
    if let Some(path) = &file.database_path {
        cfg.database_path = path.clone();
    }
    if let Some(uri) = &file.database_uri {
        cfg.database_uri = Some(uri.clone());
    }
    if let Some(ms) = file.busy_timeout_ms {
        cfg.busy_timeout_ms = ms;
    }
    if let Some(mode) = file.journal_mode {
        cfg.journal_mode = mode;
    }
}

fn execute(store: &DatasetStore, command: &Commands) -> Result<String, CliError> {
    match command {
        Commands::Insert {
            dataset,
            id,
            name,
            age,
            department,
            json,
        } => {
            let record = match (json, id) {
                (Some(json), _) => NewRecord::from_json(json)
                    .map_err(|e| CliError::Usage(format!("invalid --json record: {e}")))?,
                (None, Some(id)) => NewRecord {
                    id: *id,
                    name: name.clone(),
                    age: *age,
                    department: department.clone(),
                },
                (None, None) => return Err(CliError::Usage("--id is required".into())),
            };
            store.insert_record(dataset, &record)?;
            render(&InsertResponse {
                message: "Record added successfully",
                dataset,
                record_id: record.id,
            })
        }
        Commands::Query {
            dataset,
            group_by,
            sort_by,
            order,
        } => {
            if let Some(field) = group_by {
                let grouped = store.group_by(dataset, field)?;
                render(&GroupedResponse {
                    grouped_records: grouped.into_iter().collect(),
                })
            } else if let Some(field) = sort_by {
                let sorted = store.sort_by(dataset, field, order)?;
                render(&SortedResponse {
                    sorted_records: sorted,
                })
            } else {
                Err(CliError::Usage("Missing groupBy or sortBy parameter".into()))
            }
        }
        Commands::Exists { dataset } => Ok(store.dataset_exists(dataset)?.to_string()),
    }
}

fn render<T: Serialize>(value: &T) -> Result<String, CliError> {
    serde_json::to_string(value).map_err(|e| CliError::Usage(e.to_string()))
}
