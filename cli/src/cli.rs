use std::fmt::{self, Formatter};
use std::path::PathBuf;

use clap::{Args, Parser, Subcommand, ValueEnum};
use timekeeper::types::EntityId;

#[derive(Copy, Clone, PartialEq, Eq, PartialOrd, Ord, ValueEnum, Debug)]
pub(crate) enum LogLevel {
    Debug,
    Info,
    Warn,
    Error,
}

impl fmt::Display for LogLevel {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        match self {
            LogLevel::Debug => write!(f, "debug"),
            LogLevel::Info => write!(f, "info"),
            LogLevel::Warn => write!(f, "warn"),
            LogLevel::Error => write!(f, "error"),
        }
    }
}

#[derive(Parser)]
/// Timekeeper - track the time spent on tasks and goals
///
/// Timers are identified by the numeric id of the task or goal they track and are kept
/// in a local database, so a running timer keeps counting while the program is not running.
///
/// Durations may be given as HH:MM:SS, MM:SS, plain seconds or with units, i.e. 1h30m.
#[command(author, version, about)] // Read from Cargo.toml
pub(crate) struct Opts {
    #[command(subcommand)]
    pub cmd: Command,

    #[arg(global = true, short, long)]
    pub verbosity: Option<LogLevel>,

    /// Use this timer database rather than the configured one
    #[arg(global = true, long)]
    pub store: Option<PathBuf>,
}

#[derive(Subcommand)]
pub(crate) enum Command {
    /// Start the timer of a task or goal
    Start(Start),
    /// Stop the timer of a task or goal
    Stop(Stop),
    /// Show the time spent on one or all tracked entities
    Status(Status),
    /// Continuously display a timer until interrupted
    Watch(Watch),
    /// Fold the local time into a new total and forget it locally
    Sync(Synchronisation),
    /// Remove the local timer of a task or goal
    Discard(Discard),
    /// Subcommands for configuration
    Config(Config),
}

#[derive(Args)]
pub(crate) struct Start {
    /// Id of the task or goal
    pub id: EntityId,
    /// Stop any other running timer rather than refusing to start
    #[arg(short, long)]
    pub switch: bool,
}

#[derive(Args)]
pub(crate) struct Stop {
    /// Id of the task or goal
    pub id: EntityId,
}

#[derive(Args)]
pub(crate) struct Status {
    /// Id of the task or goal, all tracked entities if omitted
    pub id: Option<EntityId>,
    /// Time already recorded remotely for the entity
    #[arg(short, long, requires = "id")]
    pub baseline: Option<String>,
}

#[derive(Args)]
pub(crate) struct Watch {
    /// Id of the task or goal
    pub id: EntityId,
    /// Time already recorded remotely for the entity
    #[arg(short, long)]
    pub baseline: Option<String>,
}

#[derive(Args)]
pub(crate) struct Synchronisation {
    /// Id of the task or goal
    pub id: EntityId,
    /// Time recorded remotely before this synchronisation
    #[arg(short, long, required = true)]
    pub baseline: String,
}

#[derive(Args)]
pub(crate) struct Discard {
    /// Id of the task or goal
    pub id: EntityId,
}

#[derive(Args)]
pub(crate) struct Config {
    #[command(subcommand)]
    pub cmd: ConfigCommand,
}

/// Create, modify or list the configuration file.
#[derive(Subcommand, Clone)]
pub(crate) enum ConfigCommand {
    /// Update the configuration file
    Update(UpdateConfiguration),
    /// write current configuration to standard output
    List,
    /// Remove the current configuration
    Remove,
}

#[derive(Args, Clone)]
pub(crate) struct UpdateConfiguration {
    /// Path of the Sqlite file holding the timers
    #[arg(long)]
    pub timer_store: Option<String>,
    /// Milliseconds between two refreshes of `watch`
    #[arg(long)]
    pub tick_millis: Option<u64>,
}
