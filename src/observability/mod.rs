//! Observability subsystem.
//!
//! - logging.rs: `tracing` subscriber with an `EnvFilter`
//! - request spans come from `tower_http::trace` in `http::server`, keyed by
//!   the `x-request-id` header

pub mod logging;

pub use logging::init_logging;
