//! In-memory timer store.
//!
//! Nothing survives the process; used by tests and by runtimes configured
//! without a database file.

use std::collections::BTreeMap;
use std::sync::Mutex;

use crate::error::TrackerError;
use crate::repository::timer_store::TimerStore;

#[derive(Debug, Default)]
pub struct InMemoryTimerStore {
    entries: Mutex<BTreeMap<String, String>>,
}

impl InMemoryTimerStore {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }
}

impl TimerStore for InMemoryTimerStore {
    fn get(&self, key: &str) -> Result<Option<String>, TrackerError> {
        let entries = self.entries.lock().map_err(|_| TrackerError::LockPoisoned)?;
        Ok(entries.get(key).cloned())
    }

    fn set(&self, key: &str, value: &str) -> Result<(), TrackerError> {
        let mut entries = self.entries.lock().map_err(|_| TrackerError::LockPoisoned)?;
        entries.insert(key.to_string(), value.to_string());
        Ok(())
    }

    fn remove(&self, key: &str) -> Result<(), TrackerError> {
        let mut entries = self.entries.lock().map_err(|_| TrackerError::LockPoisoned)?;
        entries.remove(key);
        Ok(())
    }

    fn keys(&self) -> Result<Vec<String>, TrackerError> {
        let entries = self.entries.lock().map_err(|_| TrackerError::LockPoisoned)?;
        Ok(entries.keys().cloned().collect())
    }
}
