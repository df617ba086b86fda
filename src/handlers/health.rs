use axum::response::Response;
use serde::Serialize;
use time::format_description::well_known::Rfc3339;
use time::OffsetDateTime;

use crate::http::response::json;

#[derive(Debug, Serialize)]
struct HealthBody {
    status: &'static str,
    message: &'static str,
    timestamp: String,
}

/// Plain GET health check. The only honest endpoint.
pub fn check() -> Response {
    let timestamp = OffsetDateTime::now_utc()
        .format(&Rfc3339)
        .unwrap_or_default();

    json(
        200,
        HealthBody {
            status: "OK",
            message: "Server is running normally.",
            timestamp,
        },
    )
}
