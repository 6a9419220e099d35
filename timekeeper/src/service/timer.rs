use crate::clock::Clock;
use crate::date;
use crate::repository::timer_store::TimerStore;
use crate::types::{EntityId, TimerRecord};
use chrono::{DateTime, Utc};
use log::{debug, info, warn};
use std::sync::Arc;

/// Keeps a running total of the time spent on each entity, persisted through a
/// [`TimerStore`] so that it survives restarts.
///
/// None of the operations fail. A record which can not be read or parsed is
/// treated as missing and a failed write is logged and otherwise ignored; the
/// returned record is still correct for the current process.
pub struct ElapsedTimeTracker {
    store: Arc<dyn TimerStore>,
    clock: Arc<dyn Clock>,
}

impl ElapsedTimeTracker {
    /// Creates a new tracker persisting through `store` and reading time from `clock`
    pub fn new(store: Arc<dyn TimerStore>, clock: Arc<dyn Clock>) -> Self {
        Self { store, clock }
    }

    pub fn now(&self) -> DateTime<Utc> {
        self.clock.now()
    }

    /// Renders seconds as `HH:MM:SS`, see [`date::format_elapsed`]
    #[must_use]
    pub fn format_elapsed(&self, total_seconds: i64) -> String {
        date::format_elapsed(total_seconds)
    }

    /// Loads the record of `entity_id`, bringing a running timer up to date.
    ///
    /// The whole seconds which passed since the record was last updated are
    /// folded into the accumulated seconds and the result is written back,
    /// which covers any period nobody was watching the timer.
    pub fn load_record(&self, entity_id: EntityId) -> Option<TimerRecord> {
        self.load_record_at(entity_id, self.now())
    }

    fn load_record_at(&self, entity_id: EntityId, now: DateTime<Utc>) -> Option<TimerRecord> {
        let mut record = self.read(entity_id)?;
        if record.is_running {
            let folded = record.catch_up(now);
            if folded > 0 {
                debug!("Caught up {folded}s for entity {entity_id}");
                self.write(&record);
            }
        }
        Some(record)
    }

    /// Starts a session for `entity_id`.
    ///
    /// Starting a running timer leaves it alone, the original start time is kept.
    pub fn start_session(&self, entity_id: EntityId) -> TimerRecord {
        let now = self.now();
        let mut record = match self.load_record(entity_id) {
            Some(record) if record.is_running => {
                debug!("Timer for entity {entity_id} is already running");
                return record;
            }
            Some(record) => record,
            None => TimerRecord::new(entity_id, now),
        };

        record.start_time = now;
        record.last_update_time = now;
        record.is_running = true;
        self.write(&record);

        info!(
            "Started timer for entity {entity_id}, {}s accumulated",
            record.accumulated_seconds
        );
        record
    }

    /// Stops the session of `entity_id`, returns `None` if the entity has no record.
    ///
    /// All running time up to now is folded into the accumulated seconds
    /// before the timer is flagged as stopped, so a stopped record always holds
    /// the complete local total.
    pub fn stop_session(&self, entity_id: EntityId) -> Option<TimerRecord> {
        let mut record = self.read(entity_id)?;
        if !record.is_running {
            debug!("Timer for entity {entity_id} is not running");
            return Some(record);
        }

        let now = self.now();
        let session = record.current_session_seconds(now);
        record.catch_up(now);
        record.is_running = false;
        record.last_update_time = now;
        self.write(&record);

        info!(
            "Stopped timer for entity {entity_id} after {session}s, {}s accumulated",
            record.accumulated_seconds
        );
        Some(record)
    }

    /// Length of the current session of `record`, zero when it is not running
    #[must_use]
    pub fn current_session_seconds(&self, record: &TimerRecord) -> i64 {
        record.current_session_seconds(self.now())
    }

    /// Forgets the locally accumulated time after the total has been saved remotely.
    ///
    /// `baseline_seconds` is the total the remote side now holds. Only call this
    /// once that save has been confirmed, otherwise local time is lost. A running
    /// session keeps running and counts on from now.
    pub fn reconcile_with_baseline(&self, entity_id: EntityId, baseline_seconds: i64) -> TimerRecord {
        let now = self.now();
        let record = self
            .load_record_at(entity_id, now)
            .unwrap_or_else(|| TimerRecord::new(entity_id, now));

        debug!(
            "Reconciling entity {entity_id}: dropping {}s local, baseline is {baseline_seconds}s",
            record.accumulated_seconds
        );
        self.reset_local_time(record, now)
    }

    /// Adds the local time of `entity_id` to `baseline_seconds` and reconciles
    /// against that sum, returning the new total along with the record.
    ///
    /// The total and the reset are computed at the same instant, so no second
    /// is counted twice or dropped in between.
    pub fn synchronise(&self, entity_id: EntityId, baseline_seconds: i64) -> (i64, TimerRecord) {
        let now = self.now();
        let record = self
            .load_record_at(entity_id, now)
            .unwrap_or_else(|| TimerRecord::new(entity_id, now));

        let total = baseline_seconds.max(0).saturating_add(record.elapsed_seconds(now));
        debug!(
            "Synchronising entity {entity_id}: {}s local on top of {baseline_seconds}s",
            record.elapsed_seconds(now)
        );
        (total, self.reset_local_time(record, now))
    }

    fn reset_local_time(&self, mut record: TimerRecord, now: DateTime<Utc>) -> TimerRecord {
        record.accumulated_seconds = 0;
        if record.is_running {
            record.last_update_time = now.max(record.start_time);
        }
        self.write(&record);
        record
    }

    /// Local time spent on `entity_id` since the last reconciliation
    pub fn elapsed_seconds(&self, entity_id: EntityId) -> i64 {
        self.load_record(entity_id)
            .map_or(0, |record| record.elapsed_seconds(self.now()))
    }

    /// The total to display for `entity_id`: the remote baseline plus the local time
    pub fn time_spent(&self, entity_id: EntityId, baseline_seconds: i64) -> i64 {
        self.total_seconds(self.load_record(entity_id).as_ref(), baseline_seconds)
    }

    /// Like [`Self::time_spent`] for a record already loaded
    #[must_use]
    pub fn total_seconds(&self, record: Option<&TimerRecord>, baseline_seconds: i64) -> i64 {
        let local = record.map_or(0, |record| record.elapsed_seconds(self.now()));
        baseline_seconds.max(0).saturating_add(local)
    }

    /// Removes the record of `entity_id`, returning it as it was
    pub fn discard(&self, entity_id: EntityId) -> Option<TimerRecord> {
        let record = self.load_record(entity_id);
        if let Err(e) = self.store.remove(&entity_id.storage_key()) {
            warn!("Unable to remove timer record for entity {entity_id}: {e}");
        }
        record
    }

    /// Every readable record, ordered by entity id
    pub fn records(&self) -> Vec<TimerRecord> {
        let keys = match self.store.keys() {
            Ok(keys) => keys,
            Err(e) => {
                warn!("Unable to list timer records: {e}");
                return Vec::new();
            }
        };

        let mut records: Vec<TimerRecord> = keys
            .iter()
            .filter_map(|key| EntityId::from_storage_key(key))
            .filter_map(|entity_id| self.load_record(entity_id))
            .collect();
        records.sort_by_key(|r| r.entity_id);
        records
    }

    /// The records of all currently running timers
    pub fn running_records(&self) -> Vec<TimerRecord> {
        self.records()
            .into_iter()
            .filter(TimerRecord::is_running)
            .collect()
    }

    fn read(&self, entity_id: EntityId) -> Option<TimerRecord> {
        let raw = match self.store.get(&entity_id.storage_key()) {
            Ok(raw) => raw?,
            Err(e) => {
                warn!("Unable to read timer record for entity {entity_id}: {e}");
                return None;
            }
        };

        match TimerRecord::from_json(&raw) {
            Ok(record) if record.entity_id == entity_id && record.is_consistent() => {
                Some(record)
            }
            Ok(record) => {
                warn!("Ignoring inconsistent timer record for entity {entity_id}: {record:?}");
                None
            }
            Err(e) => {
                warn!("Ignoring unparseable timer record for entity {entity_id}: {e}");
                None
            }
        }
    }

    fn write(&self, record: &TimerRecord) {
        let json = match record.to_json() {
            Ok(json) => json,
            Err(e) => {
                warn!("Unable to serialize timer record {record:?}: {e}");
                return;
            }
        };
        if let Err(e) = self.store.set(&record.entity_id.storage_key(), &json) {
            warn!(
                "Unable to persist timer record for entity {}: {e}",
                record.entity_id
            );
        }
    }
}
