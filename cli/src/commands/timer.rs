use log::debug;
use timekeeper::date::format_elapsed;
use timekeeper::error::TrackerError;
use timekeeper::types::{EntityId, TimerRecord};
use timekeeper::ApplicationRuntime;

/// Starts the timer of `id`.
///
/// Only one timer may run at a time. If another entity is running, starting is
/// refused unless `switch` is set, in which case the other timer is stopped first.
pub(crate) fn start_timer(
    runtime: &ApplicationRuntime,
    id: EntityId,
    switch: bool,
) -> Result<TimerRecord, TrackerError> {
    let tracker = runtime.timer_service();

    let others: Vec<TimerRecord> = tracker
        .running_records()
        .into_iter()
        .filter(|r| r.entity_id != id)
        .collect();

    if let Some(other) = others.first() {
        if !switch {
            eprintln!(
                "The timer for {} is running, {} so far. Use --switch to stop it and start {id}",
                other.entity_id,
                format_elapsed(other.elapsed_seconds(tracker.now()))
            );
            return Err(TrackerError::EntityAlreadyRunning(other.entity_id));
        }
        for other in &others {
            debug!("Switching from {} to {id}", other.entity_id);
            if let Some(stopped) = tracker.stop_session(other.entity_id) {
                println!(
                    "Stopped timer for {}, time spent: {}",
                    stopped.entity_id,
                    format_elapsed(stopped.accumulated_seconds)
                );
            }
        }
    }

    let record = tracker.start_session(id);
    println!(
        "Timer for {id} running since {}, time spent: {}",
        record.start_time.with_timezone(&chrono::Local).format("%Y-%m-%d %H:%M"),
        format_elapsed(record.elapsed_seconds(tracker.now()))
    );
    Ok(record)
}

pub(crate) fn stop_timer(runtime: &ApplicationRuntime, id: EntityId) -> Option<TimerRecord> {
    match runtime.timer_service().stop_session(id) {
        Some(record) => {
            println!(
                "Stopped timer for {id}, time spent: {}",
                format_elapsed(record.accumulated_seconds)
            );
            Some(record)
        }
        None => {
            println!("No timer for {id}");
            None
        }
    }
}

pub(crate) fn discard_timer(runtime: &ApplicationRuntime, id: EntityId) -> Option<TimerRecord> {
    match runtime.timer_service().discard(id) {
        Some(record) => {
            println!(
                "Timer for {id} discarded, {} of local time dropped",
                format_elapsed(record.accumulated_seconds)
            );
            Some(record)
        }
        None => {
            println!("No timer to discard for {id}");
            None
        }
    }
}
