use std::{io, path::PathBuf};

use crate::date;
use crate::types::EntityId;
use thiserror::Error;

#[allow(clippy::module_name_repetitions)]
#[derive(Error, Debug)]
pub enum TrackerError {
    #[error("Unable to load the application configuration file {path:?}")]
    ApplicationConfig { path: PathBuf, source: io::Error },
    #[error("Unable to parse contents of {path}")]
    TomlParse {
        path: PathBuf,
        source: toml::de::Error,
    },
    #[error("Unable to create configuration file {path}")]
    ConfigFileCreation { path: PathBuf },
    #[error("Unable to open DBMS in file {path}: {reason}")]
    OpenDbms { path: String, reason: String },
    #[error("SQL dbms error: {0}")]
    Sql(String),
    #[error("Directory creation failed")]
    CreateDir(#[from] io::Error),
    #[error("Unable to (de)serialize timer record: {0}")]
    Serialization(String),
    #[error("Could not make sense of input: {0}")]
    BadInput(String),
    #[error("Mutex locking error")]
    LockPoisoned,
    #[error("A timer is already running for entity {0}")]
    EntityAlreadyRunning(EntityId),
}

impl From<rusqlite::Error> for TrackerError {
    fn from(err: rusqlite::Error) -> Self {
        TrackerError::Sql(format!("Sqlite error {err}"))
    }
}

impl From<serde_json::Error> for TrackerError {
    fn from(err: serde_json::Error) -> Self {
        TrackerError::Serialization(format!("{err}"))
    }
}

impl From<date::Error> for TrackerError {
    fn from(err: date::Error) -> Self {
        TrackerError::BadInput(format!("{err}"))
    }
}
