use crate::error::TrackerError;
use anyhow::Result;
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use std::fs::{self, File};
use std::io::{self, Read, Write};
use std::path::{Path, PathBuf};

/// Application configuration struct
/// Holds where the timer records are kept and how often the display is refreshed
#[derive(Serialize, Deserialize, Debug, PartialEq, Clone, Default)]
pub struct AppConfiguration {
    /// This will ensure that the filename is created, even if the Toml file
    /// does not have an `application_data` section
    #[serde(default)]
    pub application_data: ApplicationData,

    #[serde(default)]
    pub display: DisplaySettings,
}

/// Holds the configuration for the `application_data` section of the Toml file
#[derive(Serialize, Deserialize, Debug, PartialEq, Clone)]
pub struct ApplicationData {
    /// The path to the local timer data store
    pub timer_store: String,
}

impl Default for ApplicationData {
    fn default() -> Self {
        ApplicationData {
            timer_store: timer_store_file().to_string_lossy().to_string(),
        }
    }
}

/// Holds the configuration for the `display` section of the Toml file
#[derive(Serialize, Deserialize, Debug, PartialEq, Clone)]
pub struct DisplaySettings {
    /// Milliseconds between two refreshes of a running timer
    #[serde(default = "default_tick_millis")]
    pub tick_millis: u64,
}

impl Default for DisplaySettings {
    fn default() -> Self {
        DisplaySettings {
            tick_millis: default_tick_millis(),
        }
    }
}

fn default_tick_millis() -> u64 {
    1000
}

/// Filename holding the application configuration parameters
#[must_use]
pub fn configuration_file() -> PathBuf {
    project_dirs().map_or_else(
        || PathBuf::from("timekeeper.toml"),
        |dirs| dirs.preference_dir().join("timekeeper.toml"),
    )
}

/// Filename of the Sqlite DBMS holding the local timer records
#[must_use]
pub fn timer_store_file() -> PathBuf {
    project_dirs().map_or_else(
        || PathBuf::from("timers.db"),
        |dirs| dirs.data_dir().join("timers.db"),
    )
}

#[allow(clippy::missing_errors_doc)]
pub fn load() -> Result<AppConfiguration, TrackerError> {
    read(&configuration_file())
}

/// Loads the configuration file, falling back to the defaults if there is none
#[allow(clippy::missing_errors_doc)]
pub fn load_or_default() -> Result<AppConfiguration, TrackerError> {
    match load() {
        Ok(config) => Ok(config),
        Err(TrackerError::ApplicationConfig { source, .. })
            if source.kind() == io::ErrorKind::NotFound =>
        {
            Ok(AppConfiguration::default())
        }
        Err(e) => Err(e),
    }
}

#[allow(clippy::missing_errors_doc)]
pub fn save(cfg: &AppConfiguration) -> Result<()> {
    create_configuration_file(cfg, &configuration_file())
}

#[allow(clippy::missing_errors_doc)]
pub fn remove() -> io::Result<()> {
    fs::remove_file(configuration_file().as_path())
}

#[allow(clippy::missing_errors_doc)]
pub fn application_config_to_string(cfg: &AppConfiguration) -> Result<String> {
    Ok(toml::to_string::<AppConfiguration>(cfg)?)
}

fn project_dirs() -> Option<ProjectDirs> {
    ProjectDirs::from("com", "masterman", "timekeeper")
}

/// Reads the `Application` configuration struct from the supplied TOML file
fn read(path: &Path) -> Result<AppConfiguration, TrackerError> {
    let mut file = File::open(path).map_err(|source| TrackerError::ApplicationConfig {
        path: path.into(),
        source,
    })?;
    let mut contents = String::new();
    file.read_to_string(&mut contents)
        .map_err(|source| TrackerError::ApplicationConfig {
            path: path.into(),
            source,
        })?;
    toml::from_str::<AppConfiguration>(&contents).map_err(|source| TrackerError::TomlParse {
        path: path.into(),
        source,
    })
}

fn create_configuration_file(cfg: &AppConfiguration, path: &Path) -> Result<()> {
    if let Some(directory) = path.parent() {
        if !directory.as_os_str().is_empty() && !directory.try_exists()? {
            fs::create_dir_all(directory)?;
        }
    }

    let mut file = File::create(path).map_err(|_src_err| TrackerError::ConfigFileCreation {
        path: path.to_path_buf(),
    })?;
    let toml = application_config_to_string(cfg)?;
    file.write_all(toml.as_bytes())?;

    Ok(())
}
