//! Strange Errors Server Library
//!
//! An HTTP API that answers with deliberately wrong status codes, plus an
//! escalating health check reachable through a non-standard method.

pub mod config;
pub mod escalator;
pub mod handlers;
pub mod http;
pub mod lifecycle;
pub mod observability;
pub mod routing;
pub mod store;

pub use config::schema::ServerConfig;
pub use escalator::Escalator;
pub use http::HttpServer;
pub use lifecycle::{Shutdown, Terminator};
