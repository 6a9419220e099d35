use std::io::{self, Write};
use std::time::Duration;

use log::{debug, info};
use timekeeper::date::format_elapsed;
use timekeeper::service::timer::ElapsedTimeTracker;
use timekeeper::types::EntityId;
use timekeeper::ApplicationRuntime;

use crate::cli::Watch;
use crate::commands::baseline_or_exit;

/// Redraws the time spent on an entity on every tick until Ctrl-C is pressed.
///
/// Every tick reads the record afresh, so the display catches up by itself after the
/// machine has been asleep or the process suspended.
pub(crate) async fn execute(runtime: &ApplicationRuntime, watch: &Watch) -> io::Result<()> {
    let baseline = baseline_or_exit(watch.baseline.as_deref());
    let tick = Duration::from_millis(runtime.config().display.tick_millis.max(50));
    let tracker = runtime.timer_service();

    info!("Watching {} every {}ms", watch.id, tick.as_millis());
    let mut ticker = tokio::time::interval(tick);
    ticker.set_missed_tick_behavior(tokio::time::MissedTickBehavior::Skip);

    let ctrl_c = tokio::signal::ctrl_c();
    tokio::pin!(ctrl_c);

    let mut stdout = io::stdout();
    loop {
        tokio::select! {
            _ = ticker.tick() => {
                write!(stdout, "\r{}", render_line(&tracker, watch.id, baseline))?;
                stdout.flush()?;
            }
            _ = &mut ctrl_c => {
                debug!("Interrupted, leaving watch");
                writeln!(stdout)?;
                return Ok(());
            }
        }
    }
}

fn render_line(tracker: &ElapsedTimeTracker, id: EntityId, baseline: i64) -> String {
    let record = tracker.load_record(id);
    let total = tracker.total_seconds(record.as_ref(), baseline);
    let state = match record {
        Some(record) if record.is_running => "running",
        Some(_) => "stopped",
        None => "no timer",
    };
    format!("{id} {} {state:<8}", format_elapsed(total))
}
