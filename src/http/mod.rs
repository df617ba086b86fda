//! HTTP protocol handling subsystem.
//!
//! # Data Flow
//! ```text
//! TCP connection
//!     → request.rs (assign/propagate x-request-id)
//!     → middleware/logging.rs (one access line per request)
//!     → server.rs (dispatch: Dispatcher::classify → handler)
//!     → response.rs (JSON bodies with arbitrary status codes)
//!     → Send to client
//! ```

pub mod middleware;
pub mod request;
pub mod response;
pub mod server;

pub use request::X_REQUEST_ID;
pub use server::{AppState, HttpServer};
