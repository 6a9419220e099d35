// timekeeper/tests/test_helpers/fixtures.rs

use chrono::{DateTime, Duration, TimeZone, Utc};
use timekeeper::types::{EntityId, TimerRecord};

/// Constants for test data
pub const TEST_TASK: EntityId = EntityId(1001);
#[allow(dead_code)]
pub const TEST_GOAL: EntityId = EntityId(2002);

/// The instant every test clock starts at
pub fn start_of_test() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2024, 6, 3, 9, 0, 0).unwrap()
}

/// Creates a record as a previous process would have left it
#[allow(dead_code)]
pub fn create_test_record(
    entity_id: EntityId,
    accumulated_seconds: i64,
    running_since: Option<DateTime<Utc>>,
) -> TimerRecord {
    let started = running_since.unwrap_or_else(|| start_of_test() - Duration::hours(1));
    TimerRecord {
        entity_id,
        start_time: started,
        accumulated_seconds,
        is_running: running_since.is_some(),
        last_update_time: started,
    }
}
