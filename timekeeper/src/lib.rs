use crate::clock::{Clock, SystemClock};
use crate::error::TrackerError;
use crate::repository::database_manager::{DatabaseConfig, DatabaseManager};
use crate::service::timer::ElapsedTimeTracker;
use config::AppConfiguration;
use log::debug;
use std::path::PathBuf;
use std::sync::Arc;

pub mod clock;
pub mod config;
pub mod date;
pub mod error;
pub mod repository;
pub mod service;

pub mod types;

pub struct ApplicationRuntime {
    config: AppConfiguration,
    #[allow(dead_code)]
    database_manager: DatabaseManager,
    pub timer_service: Arc<ElapsedTimeTracker>,
}

impl ApplicationRuntime {
    /// Creates a new instance of `ApplicationRuntime` from the configuration file.
    ///
    /// # Returns
    ///
    /// If successful, returns an `ApplicationRuntime` with the timer records kept in the
    /// Sqlite file named by the configuration. A missing configuration file is not an
    /// error, the defaults are used instead.
    ///
    /// # Errors
    ///
    /// - Returns an error if the configuration file exists but can not be read or parsed.
    /// - Returns an error if the timer store can not be opened.
    pub fn new() -> Result<Self, TrackerError> {
        ApplicationRuntimeBuilder::new().build()
    }

    #[must_use]
    pub fn config(&self) -> &AppConfiguration {
        &self.config
    }

    #[must_use]
    pub fn timer_service(&self) -> Arc<ElapsedTimeTracker> {
        self.timer_service.clone()
    }
}

#[derive(Default)]
pub struct ApplicationRuntimeBuilder {
    config: Option<AppConfiguration>,
    store_path: Option<PathBuf>,
    db_config: Option<DatabaseConfig>,
    clock: Option<Arc<dyn Clock>>,
}

impl ApplicationRuntimeBuilder {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Uses this configuration rather than the one on disk
    #[must_use]
    pub fn with_config(mut self, config: AppConfiguration) -> Self {
        self.config = Some(config);
        self
    }

    /// Keeps the timer records in this Sqlite file, overriding the configuration
    #[must_use]
    pub fn with_store_path(mut self, path: impl Into<PathBuf>) -> Self {
        self.store_path = Some(path.into());
        self
    }

    /// Keeps the timer records in an in-memory Sqlite database
    #[must_use]
    pub fn use_in_memory_db(mut self) -> Self {
        self.db_config = Some(DatabaseConfig::SqliteInMemory);
        self
    }

    /// Keeps the timer records in a plain map, bypassing Sqlite altogether
    #[must_use]
    pub fn use_memory_store(mut self) -> Self {
        self.db_config = Some(DatabaseConfig::Memory);
        self
    }

    #[must_use]
    pub fn with_clock(mut self, clock: Arc<dyn Clock>) -> Self {
        self.clock = Some(clock);
        self
    }

    /// Builds the runtime.
    ///
    /// # Errors
    ///
    /// Returns an error if the configuration can not be loaded or the store can not be opened.
    pub fn build(self) -> Result<ApplicationRuntime, TrackerError> {
        let config = match self.config {
            Some(config) => config,
            None if self.db_config.is_some() => AppConfiguration::default(),
            None => config::load_or_default()?,
        };

        let db_config = self.db_config.unwrap_or_else(|| {
            let path = self
                .store_path
                .unwrap_or_else(|| PathBuf::from(&config.application_data.timer_store));
            DatabaseConfig::SqliteOnDisk { path }
        });
        let database_manager = DatabaseManager::new(&db_config)?;

        let clock = self
            .clock
            .unwrap_or_else(|| Arc::new(SystemClock) as Arc<dyn Clock>);
        let timer_service = Arc::new(ElapsedTimeTracker::new(
            database_manager.create_timer_store(),
            clock,
        ));
        debug!("Application runtime created");

        Ok(ApplicationRuntime {
            config,
            database_manager,
            timer_service,
        })
    }
}
