//! Routing subsystem.
//!
//! # Data Flow
//! ```text
//! Incoming Request (method, path)
//!     → router.rs (Dispatcher::classify)
//!     → matcher.rs (evaluate match conditions)
//!     → Return: Route (Escalator, a resource route, MethodNotAllowed or NotFound)
//! ```
//!
//! # Design Decisions
//! - Routes compiled at startup, immutable at runtime
//! - Fixed route set; no path templating
//! - The dispatcher never rewrites a handler's response

pub mod matcher;
pub mod router;

pub use router::{Dispatcher, InvalidVerb, Route};
