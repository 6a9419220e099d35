use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt::{self, Display, Formatter};
use std::str::FromStr;

/// Prefix of the key under which a timer record is persisted
pub const STORAGE_KEY_PREFIX: &str = "timer-";

/// Identifies the task or goal a timer is tracking.
#[derive(Debug, Copy, Clone, Serialize, Deserialize, Eq, PartialEq, PartialOrd, Ord, Hash)]
#[serde(transparent)]
pub struct EntityId(pub i64);

impl EntityId {
    #[must_use]
    pub fn new(id: i64) -> Self {
        EntityId(id)
    }

    #[must_use]
    pub fn value(&self) -> i64 {
        self.0
    }

    /// The key this entity's record is stored under, i.e. `timer-42`
    #[must_use]
    pub fn storage_key(&self) -> String {
        format!("{STORAGE_KEY_PREFIX}{}", self.0)
    }

    /// Recovers the entity id from a storage key, `None` for foreign keys
    #[must_use]
    pub fn from_storage_key(key: &str) -> Option<Self> {
        key.strip_prefix(STORAGE_KEY_PREFIX)
            .and_then(|id| id.parse().ok())
            .map(EntityId)
    }
}

impl Display for EntityId {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl FromStr for EntityId {
    type Err = std::num::ParseIntError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        s.trim().parse::<i64>().map(EntityId)
    }
}

impl From<i64> for EntityId {
    fn from(value: i64) -> Self {
        EntityId(value)
    }
}

/// The two states of a timer
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub enum TimerState {
    Stopped,
    Running,
}

/// Persisted bookkeeping for the time spent on a single entity.
///
/// `accumulated_seconds` holds every second folded in up to
/// `last_update_time`. While the timer runs, the seconds after
/// `last_update_time` are still pending and are folded in by the next
/// catch-up or stop. Timestamps are stored as milliseconds since the epoch.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct TimerRecord {
    pub entity_id: EntityId,

    /// When the current session began, only meaningful while running
    #[serde(with = "chrono::serde::ts_milliseconds")]
    pub start_time: DateTime<Utc>,

    pub accumulated_seconds: i64,

    pub is_running: bool,

    /// When the record was last brought up to date
    #[serde(with = "chrono::serde::ts_milliseconds")]
    pub last_update_time: DateTime<Utc>,
}

impl TimerRecord {
    /// A stopped record with nothing accumulated
    #[must_use]
    pub fn new(entity_id: EntityId, now: DateTime<Utc>) -> Self {
        Self {
            entity_id,
            start_time: now,
            accumulated_seconds: 0,
            is_running: false,
            last_update_time: now,
        }
    }

    #[must_use]
    pub fn is_running(&self) -> bool {
        self.is_running
    }

    #[must_use]
    pub fn state(&self) -> TimerState {
        if self.is_running {
            TimerState::Running
        } else {
            TimerState::Stopped
        }
    }

    /// Length of the running session in whole seconds, zero when stopped
    #[must_use]
    pub fn current_session_seconds(&self, now: DateTime<Utc>) -> i64 {
        if self.is_running {
            whole_seconds_between(self.start_time, now)
        } else {
            0
        }
    }

    /// Whole seconds run since `last_update_time` which have not been folded
    /// into `accumulated_seconds` yet
    #[must_use]
    pub fn unfolded_seconds(&self, now: DateTime<Utc>) -> i64 {
        if self.is_running {
            whole_seconds_between(self.last_update_time, now)
        } else {
            0
        }
    }

    /// Total local time spent on the entity as seen at `now`
    #[must_use]
    pub fn elapsed_seconds(&self, now: DateTime<Utc>) -> i64 {
        self.accumulated_seconds
            .saturating_add(self.unfolded_seconds(now))
    }

    /// Folds the pending whole seconds into `accumulated_seconds`.
    ///
    /// `last_update_time` moves forward by exactly the folded amount, so a
    /// sub-second remainder stays pending instead of being dropped.
    /// Returns the number of seconds folded.
    pub fn catch_up(&mut self, now: DateTime<Utc>) -> i64 {
        let folded = self.unfolded_seconds(now);
        if folded > 0 {
            self.accumulated_seconds = self.accumulated_seconds.saturating_add(folded);
            self.last_update_time += chrono::Duration::seconds(folded);
        }
        folded
    }

    /// False when the record breaks an invariant no update of ours can produce:
    /// negative accumulated time, or a running session updated before it started
    #[must_use]
    pub fn is_consistent(&self) -> bool {
        self.accumulated_seconds >= 0 && !(self.is_running && self.start_time > self.last_update_time)
    }

    #[allow(clippy::missing_errors_doc)]
    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string(self)
    }

    #[allow(clippy::missing_errors_doc)]
    pub fn from_json(s: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(s)
    }
}

/// Truncated whole seconds from `from` to `to`, clamped at zero
fn whole_seconds_between(from: DateTime<Utc>, to: DateTime<Utc>) -> i64 {
    (to - from).num_seconds().max(0)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Duration, TimeZone};

    fn t0() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 3, 1, 9, 0, 0).unwrap()
    }

    fn running_record() -> TimerRecord {
        TimerRecord {
            is_running: true,
            ..TimerRecord::new(EntityId(7), t0())
        }
    }

    #[test]
    fn test_new_record_is_stopped() {
        let record = TimerRecord::new(EntityId(7), t0());
        assert_eq!(record.state(), TimerState::Stopped);
        assert_eq!(record.accumulated_seconds, 0);
        assert_eq!(record.current_session_seconds(t0() + Duration::hours(1)), 0);
        assert_eq!(record.elapsed_seconds(t0() + Duration::hours(1)), 0);
    }

    #[test]
    fn test_session_seconds_are_truncated() {
        let record = running_record();
        let now = t0() + Duration::milliseconds(4_999);
        assert_eq!(record.current_session_seconds(now), 4);
    }

    #[test]
    fn test_clock_going_backwards_yields_zero() {
        let record = running_record();
        assert_eq!(record.current_session_seconds(t0() - Duration::seconds(30)), 0);
        assert_eq!(record.unfolded_seconds(t0() - Duration::seconds(30)), 0);
    }

    #[test]
    fn test_catch_up_keeps_sub_second_remainder() {
        let mut record = running_record();

        assert_eq!(record.catch_up(t0() + Duration::milliseconds(1_500)), 1);
        assert_eq!(record.last_update_time, t0() + Duration::seconds(1));

        // The half second left over above completes the next second
        assert_eq!(record.catch_up(t0() + Duration::milliseconds(2_000)), 1);
        assert_eq!(record.accumulated_seconds, 2);
        assert_eq!(record.start_time, t0());
    }

    #[test]
    fn test_huge_accumulated_time_saturates() {
        let mut record = TimerRecord {
            accumulated_seconds: i64::MAX - 5,
            ..running_record()
        };
        let now = t0() + Duration::seconds(10);

        assert_eq!(record.elapsed_seconds(now), i64::MAX);
        assert_eq!(record.catch_up(now), 10);
        assert_eq!(record.accumulated_seconds, i64::MAX);
    }

    #[test]
    fn test_consistency() {
        assert!(running_record().is_consistent());

        let negative = TimerRecord {
            accumulated_seconds: -1,
            ..running_record()
        };
        assert!(!negative.is_consistent());

        let updated_before_start = TimerRecord {
            last_update_time: t0() - Duration::seconds(1),
            ..running_record()
        };
        assert!(!updated_before_start.is_consistent());

        // Only meaningful while running
        let stopped = TimerRecord {
            is_running: false,
            ..updated_before_start
        };
        assert!(stopped.is_consistent());
    }

    #[test]
    fn test_json_uses_camel_case_and_millis() {
        let record = running_record();
        let json = record.to_json().unwrap();

        assert!(json.contains("\"entityId\":7"));
        assert!(json.contains("\"isRunning\":true"));
        assert!(json.contains(&format!("\"startTime\":{}", t0().timestamp_millis())));

        let parsed = TimerRecord::from_json(&json).unwrap();
        assert_eq!(parsed, record);
    }

    #[test]
    fn test_storage_key() {
        assert_eq!(EntityId(42).storage_key(), "timer-42");
        assert_eq!(EntityId::from_storage_key("timer-42"), Some(EntityId(42)));
        assert_eq!(EntityId::from_storage_key("settings"), None);
        assert_eq!("  17 ".parse::<EntityId>().unwrap(), EntityId(17));
    }
}
