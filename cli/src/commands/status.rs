use chrono::{DateTime, Local, Utc};
use timekeeper::date::format_elapsed;
use timekeeper::types::{EntityId, TimerRecord, TimerState};
use timekeeper::ApplicationRuntime;

use crate::cli::Status;
use crate::commands::baseline_or_exit;

pub(crate) fn execute(runtime: &ApplicationRuntime, status: &Status) {
    match status.id {
        Some(id) => entity_status(runtime, id, baseline_or_exit(status.baseline.as_deref())),
        None => all_entities_report(runtime),
    }
}

fn entity_status(runtime: &ApplicationRuntime, id: EntityId, baseline: i64) {
    let tracker = runtime.timer_service();
    let record = tracker.load_record(id);
    let total = tracker.total_seconds(record.as_ref(), baseline);

    match record {
        Some(record) => {
            println!(
                "{id}: {} ({})",
                format_elapsed(total),
                describe(&record, tracker.now())
            );
            if baseline > 0 {
                println!(
                    "  {} recorded remotely, {} local",
                    format_elapsed(baseline),
                    format_elapsed(record.elapsed_seconds(tracker.now()))
                );
            }
        }
        None => println!("{id}: {} (no local timer)", format_elapsed(total)),
    }
}

fn all_entities_report(runtime: &ApplicationRuntime) {
    let tracker = runtime.timer_service();
    let records = tracker.records();
    if records.is_empty() {
        println!("No timers. Use 'timekeeper start <ID>' to start one");
        return;
    }

    let now = tracker.now();
    println!("{:>10}  {:>10}  {:<8}  {}", "Id", "Local", "State", "Session");
    for record in &records {
        println!("{}", report_line(record, now));
    }
}

fn report_line(record: &TimerRecord, now: DateTime<Utc>) -> String {
    let (state, session) = match record.state() {
        TimerState::Running => (
            "running",
            format_elapsed(record.current_session_seconds(now)),
        ),
        TimerState::Stopped => ("stopped", String::new()),
    };
    format!(
        "{:>10}  {:>10}  {:<8}  {}",
        record.entity_id.to_string(),
        format_elapsed(record.elapsed_seconds(now)),
        state,
        session
    )
}

fn describe(record: &TimerRecord, now: DateTime<Utc>) -> String {
    match record.state() {
        TimerState::Running => format!(
            "running since {}, this session {}",
            record.start_time.with_timezone(&Local).format("%H:%M"),
            format_elapsed(record.current_session_seconds(now))
        ),
        TimerState::Stopped => "stopped".to_string(),
    }
}
