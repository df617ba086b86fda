//! Escalator subsystem: progressive deterrence on repeated invocations.
//!
//! # Data Flow
//! ```text
//! dispatch (distinguished verb on health-check path)
//!     → Escalator::invoke
//!         → counter.rs (advance, n = count after increment)
//!         → table.rs (row_for(n))
//!         → n = 4: store.remove_store_file(), label picked from outcome
//!     → Invocation { response, termination: Option<TerminationSchedule> }
//!     → handler writes response, harness executes the schedule
//! ```
//!
//! # Design Decisions
//! - The count is the state; there is no reset
//! - The escalator never returns an error; every fault maps to a table row
//! - Termination is returned as a value, never executed here

pub mod counter;
pub mod table;

use std::sync::Arc;
use std::time::Duration;

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde::Serialize;

use crate::store::Store;

pub use counter::{counter_for, InvocationCounter, RacyCounter, SerializedCounter};
pub use table::{row_for, ResponseRow, RowEffect};

/// Escalator-triggered termination always exits with this code.
pub const TERMINATION_EXIT_CODE: i32 = 1;

/// Response produced for a single invocation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EscalationResponse {
    pub status: u16,
    pub label: &'static str,
    pub message: &'static str,
}

#[derive(Serialize)]
struct EscalationBody<'a> {
    status: &'a str,
    message: &'a str,
}

impl From<&ResponseRow> for EscalationResponse {
    fn from(row: &ResponseRow) -> Self {
        Self {
            status: row.status,
            label: row.label,
            message: row.message,
        }
    }
}

impl IntoResponse for EscalationResponse {
    fn into_response(self) -> Response {
        let status =
            StatusCode::from_u16(self.status).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);
        let body = EscalationBody {
            status: self.label,
            message: self.message,
        };
        (status, Json(body)).into_response()
    }
}

/// Deferred process termination. Fire-once; never cancelled or deduplicated.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TerminationSchedule {
    pub delay: Duration,
    pub exit_code: i32,
}

/// Outcome of one call to [`Escalator::invoke`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Invocation {
    /// Count after incrementing.
    pub count: u64,
    pub response: EscalationResponse,
    pub termination: Option<TerminationSchedule>,
}

/// Progressive-deterrence state machine for the distinguished verb.
///
/// Holds the invocation counter and the store whose file it destroys on the
/// fourth call.
pub struct Escalator {
    counter: Arc<dyn InvocationCounter>,
    store: Arc<dyn Store>,
    termination_delay: Duration,
}

impl Escalator {
    /// Create an escalator. `termination_delay` goes into every schedule it emits.
    pub fn new(
        counter: Arc<dyn InvocationCounter>,
        store: Arc<dyn Store>,
        termination_delay: Duration,
    ) -> Self {
        Self {
            counter,
            store,
            termination_delay,
        }
    }

    /// Number of invocations observed so far.
    pub fn count(&self) -> u64 {
        self.counter.current()
    }

    /// Advance the counter and compute this invocation's response and effect.
    pub async fn invoke(&self) -> Invocation {
        let count = self.counter.advance();
        tracing::info!(count, "GOAT call");

        let row = row_for(count);
        let (response, termination) = match row.effect {
            RowEffect::None => (EscalationResponse::from(row), None),
            RowEffect::DestroyStore { on_failure } => {
                tracing::warn!(count, "GOAT is enraged, attempting to delete database");
                match self.store.remove_store_file().await {
                    Ok(()) => {
                        tracing::warn!(count, "Database deleted");
                        (EscalationResponse::from(row), None)
                    }
                    Err(e) => {
                        tracing::error!(count, error = %e, "Failed to delete database");
                        (EscalationResponse::from(on_failure), None)
                    }
                }
            }
            RowEffect::Terminate => {
                tracing::error!(
                    count,
                    label = row.label,
                    delay_ms = self.termination_delay.as_millis() as u64,
                    "GOAT is done, scheduling server shutdown"
                );
                let schedule = TerminationSchedule {
                    delay: self.termination_delay,
                    exit_code: TERMINATION_EXIT_CODE,
                };
                (EscalationResponse::from(row), Some(schedule))
            }
        };

        Invocation {
            count,
            response,
            termination,
        }
    }
}
