pub mod logging;

pub use logging::log_request;
