// timekeeper/tests/failing_store_test.rs
//
// The tracker must keep working, with degraded accuracy, when its store fails.

use std::sync::Arc;

use mockall::mock;
use mockall::predicate::eq;
use timekeeper::clock::ManualClock;
use timekeeper::error::TrackerError;
use timekeeper::repository::timer_store::TimerStore;
use timekeeper::service::timer::ElapsedTimeTracker;

mod test_helpers;
use test_helpers::fixtures::{create_test_record, start_of_test, TEST_TASK};

mock! {
    pub Store {}

    impl TimerStore for Store {
        fn get(&self, key: &str) -> Result<Option<String>, TrackerError>;
        fn set(&self, key: &str, value: &str) -> Result<(), TrackerError>;
        fn remove(&self, key: &str) -> Result<(), TrackerError>;
        fn keys(&self) -> Result<Vec<String>, TrackerError>;
    }
}

fn tracker_with(store: MockStore) -> (ElapsedTimeTracker, Arc<ManualClock>) {
    let _ = env_logger::builder().is_test(true).try_init();
    let clock = Arc::new(ManualClock::new(start_of_test()));
    (ElapsedTimeTracker::new(Arc::new(store), clock.clone()), clock)
}

#[test]
fn test_read_failure_is_a_cache_miss() {
    let mut store = MockStore::new();
    store
        .expect_get()
        .returning(|_| Err(TrackerError::Sql("disk I/O error".to_string())));
    store.expect_set().returning(|_, _| Ok(()));

    let (tracker, _) = tracker_with(store);

    assert!(tracker.load_record(TEST_TASK).is_none());
    assert!(tracker.stop_session(TEST_TASK).is_none());
    assert_eq!(tracker.elapsed_seconds(TEST_TASK), 0);

    let started = tracker.start_session(TEST_TASK);
    assert!(started.is_running);
    assert_eq!(started.accumulated_seconds, 0);
}

#[test]
fn test_write_failure_still_returns_record() {
    let mut store = MockStore::new();
    store.expect_get().returning(|_| Ok(None));
    store
        .expect_set()
        .with(eq(TEST_TASK.storage_key()), mockall::predicate::always())
        .times(1)
        .returning(|_, _| Err(TrackerError::LockPoisoned));

    let (tracker, _) = tracker_with(store);

    let started = tracker.start_session(TEST_TASK);
    assert!(started.is_running);
    assert_eq!(started.start_time, start_of_test());
}

#[test]
fn test_stop_folds_even_if_write_fails() {
    let running = create_test_record(TEST_TASK, 40, Some(start_of_test()));
    let json = running.to_json().unwrap();

    let mut store = MockStore::new();
    store.expect_get().returning(move |_| Ok(Some(json.clone())));
    store
        .expect_set()
        .returning(|_, _| Err(TrackerError::Sql("read-only database".to_string())));

    let (tracker, clock) = tracker_with(store);
    clock.advance_secs(20);

    let stopped = tracker.stop_session(TEST_TASK).expect("Record should exist");
    assert!(!stopped.is_running);
    assert_eq!(stopped.accumulated_seconds, 60);
}

#[test]
fn test_listing_failure_yields_no_records() {
    let mut store = MockStore::new();
    store
        .expect_keys()
        .returning(|| Err(TrackerError::Sql("no such table".to_string())));

    let (tracker, _) = tracker_with(store);
    assert!(tracker.records().is_empty());
    assert!(tracker.running_records().is_empty());
}

#[test]
fn test_discard_failure_is_swallowed() {
    let mut store = MockStore::new();
    store.expect_get().returning(|_| Ok(None));
    store
        .expect_remove()
        .times(1)
        .returning(|_| Err(TrackerError::LockPoisoned));

    let (tracker, _) = tracker_with(store);
    assert!(tracker.discard(TEST_TASK).is_none());
}
