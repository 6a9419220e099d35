use std::process::exit;

use timekeeper::date;
use timekeeper::error::TrackerError;

pub(crate) mod configuration;
pub(crate) mod status;
pub(crate) mod sync;
pub(crate) mod timer;
pub(crate) mod watch;

/// Parses a duration given on the command line, zero when none was given
pub(crate) fn parse_baseline(baseline: Option<&str>) -> Result<i64, TrackerError> {
    match baseline {
        Some(s) => Ok(date::parse_elapsed(s)?),
        None => Ok(0),
    }
}

/// Like [`parse_baseline`], exiting with a hint if the duration makes no sense
pub(crate) fn baseline_or_exit(baseline: Option<&str>) -> i64 {
    match parse_baseline(baseline) {
        Ok(seconds) => seconds,
        Err(err) => {
            eprintln!("Error: {err}");
            eprintln!("Please use one of these formats:");
            eprintln!("  - Hours, minutes and seconds (e.g., '02:30:00')");
            eprintln!("  - Minutes and seconds (e.g., '45:00')");
            eprintln!("  - Seconds (e.g., '9000')");
            eprintln!("  - Units (e.g., '2h30m')");
            exit(1);
        }
    }
}
