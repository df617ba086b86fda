//! Lifecycle management subsystem.
//!
//! # Data Flow
//! ```text
//! Startup (startup.rs):
//!     Open store → Build server → Bind listener → Serve
//!
//! Shutdown (shutdown.rs):
//!     Signal received → Stop accepting → Drain connections → Exit
//!
//! Signals (signals.rs):
//!     SIGTERM/SIGINT → Trigger graceful shutdown
//!
//! Termination (termination.rs):
//!     Escalator schedule → delayed task → Terminator (process exit, code 1)
//! ```

pub mod shutdown;
pub mod signals;
pub mod startup;
pub mod termination;

pub use shutdown::Shutdown;
pub use termination::{ProcessExit, Terminator};
