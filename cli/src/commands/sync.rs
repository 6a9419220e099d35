use log::info;
use timekeeper::date::format_elapsed;
use timekeeper::types::TimerRecord;
use timekeeper::ApplicationRuntime;

use crate::cli::Synchronisation;
use crate::commands::baseline_or_exit;

/// Folds the local time of an entity into a new total.
///
/// The new total is written to standard output for whoever records it remotely,
/// after which the local time is dropped; from here on the timer only counts the
/// time spent after this synchronisation.
pub(crate) fn execute(runtime: &ApplicationRuntime, sync: &Synchronisation) -> (i64, TimerRecord) {
    let baseline = baseline_or_exit(Some(sync.baseline.as_str()));
    let tracker = runtime.timer_service();

    let (total, record) = tracker.synchronise(sync.id, baseline);
    info!("Synchronised {}: total is now {total}s", sync.id);

    println!("{}\t{total}\t{}", sync.id, format_elapsed(total));
    if record.is_running {
        eprintln!("Timer for {} is still running", sync.id);
    }
    (total, record)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{TimeZone, Utc};
    use std::sync::Arc;
    use timekeeper::clock::ManualClock;
    use timekeeper::types::EntityId;
    use timekeeper::ApplicationRuntimeBuilder;

    #[test]
    fn test_sync_adds_local_time_and_resets_it() {
        let clock = Arc::new(ManualClock::new(
            Utc.with_ymd_and_hms(2024, 2, 1, 12, 0, 0).unwrap(),
        ));
        let runtime = ApplicationRuntimeBuilder::new()
            .use_memory_store()
            .with_clock(clock.clone())
            .build()
            .unwrap();

        let tracker = runtime.timer_service();
        tracker.start_session(EntityId(3));
        clock.advance_secs(125);

        let (total, record) = execute(
            &runtime,
            &Synchronisation {
                id: EntityId(3),
                baseline: "01:00:00".to_string(),
            },
        );
        assert_eq!(total, 3725);
        assert_eq!(record.accumulated_seconds, 0);
        assert!(record.is_running);
        assert_eq!(tracker.time_spent(EntityId(3), total), 3725);
    }
}
