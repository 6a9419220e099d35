use crate::error::TrackerError;
use crate::repository::timer_store::TimerStore;
use crate::repository::SharedSqliteConnection;
use chrono::Utc;
use log::debug;
use rusqlite::{params, OptionalExtension};

pub struct SqliteTimerStore {
    connection: SharedSqliteConnection,
}

/// SQL statement to create the `timer_store` table.
const CREATE_TIMER_STORE_TABLE_SQL: &str = r"
    CREATE TABLE IF NOT EXISTS timer_store (
        key varchar(64) primary key not null,
        value text not null,
        updated datetime
    );
";

/// Creates the `timer_store` table in the database.
pub(crate) fn create_timer_store_table(
    connection: &SharedSqliteConnection,
) -> Result<(), TrackerError> {
    let conn = connection.lock().map_err(|_| TrackerError::LockPoisoned)?;
    conn.execute_batch(CREATE_TIMER_STORE_TABLE_SQL)?;
    Ok(())
}

impl SqliteTimerStore {
    pub(crate) fn new(connection: SharedSqliteConnection) -> Self {
        Self { connection }
    }
}

impl TimerStore for SqliteTimerStore {
    fn get(&self, key: &str) -> Result<Option<String>, TrackerError> {
        let conn = self
            .connection
            .lock()
            .map_err(|_| TrackerError::LockPoisoned)?;

        let value = conn
            .query_row(
                "SELECT value FROM timer_store WHERE key = ?",
                params![key],
                |row| row.get::<_, String>(0),
            )
            .optional()?;
        Ok(value)
    }

    fn set(&self, key: &str, value: &str) -> Result<(), TrackerError> {
        debug!("Storing {key}: {value}");
        let conn = self
            .connection
            .lock()
            .map_err(|_| TrackerError::LockPoisoned)?;

        conn.execute(
            r"INSERT INTO timer_store (key, value, updated)
              VALUES (?1, ?2, ?3)
              ON CONFLICT(key) DO UPDATE SET value = excluded.value, updated = excluded.updated",
            params![key, value, Utc::now()],
        )?;
        Ok(())
    }

    fn remove(&self, key: &str) -> Result<(), TrackerError> {
        let conn = self
            .connection
            .lock()
            .map_err(|_| TrackerError::LockPoisoned)?;

        let rows_affected = conn.execute("DELETE FROM timer_store WHERE key = ?", params![key])?;
        debug!("Removed {rows_affected} row(s) for {key}");
        Ok(())
    }

    fn keys(&self) -> Result<Vec<String>, TrackerError> {
        let conn = self
            .connection
            .lock()
            .map_err(|_| TrackerError::LockPoisoned)?;

        let mut stmt = conn.prepare("SELECT key FROM timer_store ORDER BY key")?;
        let key_iter = stmt.query_map([], |row| row.get::<_, String>(0))?;

        let mut keys = Vec::new();
        for key in key_iter {
            keys.push(key?);
        }
        Ok(keys)
    }
}
