use crate::error::TrackerError;
use crate::repository::memory::InMemoryTimerStore;
use crate::repository::sqlite;
use crate::repository::sqlite::sqlite_timer_store::SqliteTimerStore;
use crate::repository::timer_store::TimerStore;
use crate::repository::SharedSqliteConnection;
use log::debug;
use rusqlite::Connection;
use std::path::PathBuf;
use std::sync::{Arc, Mutex};

/// Represents parameters for initializing the timer storage
pub enum DatabaseConfig {
    /// SQLite database with a specific file path
    SqliteOnDisk { path: PathBuf },

    /// SQLite database that runs entirely in memory
    SqliteInMemory,

    /// Plain map in memory, no SQL involved
    Memory,
}

pub struct DatabaseManager {
    connection: Option<SharedSqliteConnection>,
}

impl DatabaseManager {
    /// Creates a new `DatabaseManager` based on the provided configuration.
    ///
    /// # Errors
    ///
    /// Returns an error if the database can not be opened or the schema not created.
    pub fn new(config: &DatabaseConfig) -> Result<Self, TrackerError> {
        let connection = match config {
            // SQLite (on-disk)
            DatabaseConfig::SqliteOnDisk { path } => {
                debug!("Opening timer store {}", path.to_string_lossy());
                Some(sqlite::create_connection(path)?)
            }

            // SQLite (in-memory)
            DatabaseConfig::SqliteInMemory => Some(Connection::open_in_memory()?),

            DatabaseConfig::Memory => None,
        };

        let connection = connection.map(|c| Arc::new(Mutex::new(c)));

        if let Some(connection) = &connection {
            sqlite::create_schema(connection)?;
        }

        Ok(Self { connection })
    }

    /// Provide access to the shared database connection, if any.
    pub(crate) fn get_connection(&self) -> Option<SharedSqliteConnection> {
        self.connection.clone()
    }

    /// Creates the timer store backed by whatever this manager was configured with
    #[must_use]
    pub fn create_timer_store(&self) -> Arc<dyn TimerStore> {
        match self.get_connection() {
            Some(connection) => Arc::new(SqliteTimerStore::new(connection)),
            None => Arc::new(InMemoryTimerStore::new()),
        }
    }
}
