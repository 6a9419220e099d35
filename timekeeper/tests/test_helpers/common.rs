use std::sync::Arc;
use timekeeper::clock::ManualClock;
use timekeeper::{error::TrackerError, ApplicationRuntime, ApplicationRuntimeBuilder};

use super::fixtures::start_of_test;

#[allow(dead_code)]
/// Creates a test runtime with an in-memory database and a clock the test controls
pub fn create_test_runtime() -> Result<(Arc<ApplicationRuntime>, Arc<ManualClock>), TrackerError> {
    let clock = Arc::new(ManualClock::new(start_of_test()));

    let runtime = ApplicationRuntimeBuilder::new()
        .use_in_memory_db()
        .with_clock(clock.clone())
        .build()?;

    Ok((Arc::new(runtime), clock))
}
