use rusqlite::Connection;
use std::sync::{Arc, Mutex};

// The key-value contract the tracker persists its records through.
pub mod timer_store;

// Store implementations and the manager handing them out.
pub mod database_manager;
pub mod memory;
pub(crate) mod sqlite;

/// A thread-safe, shared connection to an ``SQLite`` database,
/// used across multiple repository layers.
pub(crate) type SharedSqliteConnection = Arc<Mutex<Connection>>;
