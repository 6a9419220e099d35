//! # The Timekeeper Command Line Utility
//!
//! Keeps a locally persisted timer per task or goal. A running timer keeps counting
//! while the program is not running and is brought up to date the next time it is read.
//!
//! ## Usage Examples
//!
//! Start and stop the timer of task 42:
//! ```bash
//! timekeeper start 42
//! timekeeper stop 42
//! ```
//!
//! Only one timer runs at a time; switch from whatever runs to task 43:
//! ```bash
//! timekeeper start 43 --switch
//! ```
//!
//! Watch task 43, which has 2h30m recorded remotely already:
//! ```bash
//! timekeeper watch 43 --baseline 2h30m
//! ```
//!
//! Compute the new total of task 43 and forget the local time:
//! ```bash
//! timekeeper sync 43 --baseline 02:30:00
//! ```
//!
//! Point the tool at another timer database:
//! ```bash
//! timekeeper config update --timer-store /path/to/timers.db
//! ```
//!
use clap::Parser;
use cli::{Command, LogLevel, Opts};
use commands::{configuration, status, sync, timer, watch};
use env_logger::Env;
use log::debug;
use std::env;
use std::fs::File;
use std::path::PathBuf;
use std::process::exit;

use timekeeper::{error::TrackerError, ApplicationRuntime, ApplicationRuntimeBuilder};

mod cli;
mod commands;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let opts: Opts = Opts::parse();

    configure_logging(&opts); // Handles the -v option

    match opts.cmd {
        Command::Start(start) => {
            match timer::start_timer(&get_runtime(opts.store), start.id, start.switch) {
                Ok(_) => {}
                Err(TrackerError::EntityAlreadyRunning(_)) => exit(2),
                Err(e) => return Err(e.into()),
            }
        }
        Command::Stop(stop) => {
            timer::stop_timer(&get_runtime(opts.store), stop.id);
        }
        Command::Status(status) => {
            status::execute(&get_runtime(opts.store), &status);
        }
        Command::Watch(watch) => {
            watch::execute(&get_runtime(opts.store), &watch).await?;
        }
        Command::Sync(sync_cmd) => {
            sync::execute(&get_runtime(opts.store), &sync_cmd);
        }
        Command::Discard(discard) => {
            timer::discard_timer(&get_runtime(opts.store), discard.id);
        }
        Command::Config(config) => {
            configuration::execute(config.cmd);
        }
    }

    Ok(())
}

/// Creates the runtime from the configuration file, or exits explaining why it could not
fn get_runtime(store: Option<PathBuf>) -> ApplicationRuntime {
    let mut builder = ApplicationRuntimeBuilder::new();
    if let Some(path) = store {
        builder = builder.with_store_path(path);
    }

    match builder.build() {
        Ok(runtime) => runtime,
        Err(err) => {
            match err {
                TrackerError::TomlParse { .. } | TrackerError::ApplicationConfig { .. } => {
                    eprintln!("Unable to read the configuration: '{err}'. Use 'timekeeper config update' to rewrite it");
                }
                _ => {
                    eprintln!("Failed to create runtime: '{err}'");
                }
            }

            exit(1);
        }
    }
}

fn configure_logging(opts: &Opts) {
    let mut tmp_dir = env::temp_dir();
    tmp_dir.push("timekeeper.log");

    if opts.verbosity.is_some() {
        println!("Logging to {}", &tmp_dir.to_string_lossy());
    }

    let mut builder = env_logger::Builder::from_env(Env::default().default_filter_or(
        opts.verbosity.map_or("warn", |lvl| match lvl {
            LogLevel::Debug => "debug",
            LogLevel::Info => "info",
            LogLevel::Warn => "warn",
            LogLevel::Error => "error",
        }),
    ));

    // If the log file can not be created, log to stderr instead
    if let Ok(file) = File::create(&tmp_dir) {
        builder.target(env_logger::Target::Pipe(Box::new(file)));
    }
    builder.init();
    debug!("Logging started");
}
