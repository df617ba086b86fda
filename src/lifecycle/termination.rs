//! Execution of escalator termination schedules.
//!
//! Each schedule gets its own detached task: sleep for the delay, then hand
//! the exit code to a [`Terminator`]. Tasks are neither cancelled nor
//! deduplicated; whichever fires first ends the process.

use std::sync::Arc;

use tokio::task::JoinHandle;

use crate::escalator::TerminationSchedule;
use crate::observability::metrics;

/// The action a fired schedule performs.
pub trait Terminator: Send + Sync {
    fn terminate(&self, exit_code: i32);
}

/// Exits the process.
#[derive(Debug, Default, Clone, Copy)]
pub struct ProcessExit;

impl Terminator for ProcessExit {
    fn terminate(&self, exit_code: i32) {
        tracing::error!(exit_code, "Server shutting down");
        std::process::exit(exit_code);
    }
}

/// Spawn the delayed termination. The returned handle may be dropped.
pub fn schedule(schedule: TerminationSchedule, terminator: Arc<dyn Terminator>) -> JoinHandle<()> {
    metrics::record_termination_scheduled();
    tokio::spawn(async move {
        tokio::time::sleep(schedule.delay).await;
        terminator.terminate(schedule.exit_code);
    })
}
