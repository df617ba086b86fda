//! Escalator handler.
//!
//! The request body is ignored. The escalator's status, label and message go
//! out unchanged; any termination it asks for is handed to the terminator.

use axum::response::{IntoResponse, Response};

use crate::http::server::AppState;
use crate::lifecycle::termination;
use crate::observability::metrics;

/// Run one escalator invocation and schedule any termination it asks for.
pub async fn invoke(state: &AppState) -> Response {
    let invocation = state.escalator.invoke().await;
    metrics::record_escalation(invocation.response.label);

    if let Some(plan) = invocation.termination {
        termination::schedule(plan, state.terminator.clone());
    }

    invocation.response.into_response()
}
