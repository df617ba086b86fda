//! Per-request access logging.
//!
//! Emits one line per request once the response is known: method, path,
//! status, elapsed time and request id. Also feeds the request metrics.

use std::time::Instant;

use axum::{body::Body, http::Request, middleware::Next, response::Response};

use crate::http::request::request_id_of;
use crate::observability::metrics;

pub async fn log_request(request: Request<Body>, next: Next) -> Response {
    let start = Instant::now();
    let method = request.method().to_string();
    let path = request.uri().path().to_string();
    let request_id = request_id_of(&request);

    tracing::debug!(request_id = %request_id, method = %method, path = %path, "Started");

    let response = next.run(request).await;

    let status = response.status().as_u16();
    tracing::info!(
        request_id = %request_id,
        method = %method,
        path = %path,
        status,
        elapsed_ms = start.elapsed().as_secs_f64() * 1000.0,
        "Completed"
    );
    metrics::record_request(&method, status, start);

    response
}
