//! Upstream forwarding subsystem.
//!
//! # Data Flow
//! ```text
//! ForwardRequest (method, path, query, body)
//!     → target.rs (ENVIRONMENT → live/demo base URL)
//!     → auth.rs (API_KEY/API_SECRET → Authorization header)
//!     → forwarder.rs (outbound call, 15s timeout)
//!     → ForwardResponse (status, body) or ProxyError
//! ```

pub mod auth;
pub mod forwarder;
pub mod target;

pub use auth::{build_auth_header, Credentials};
pub use forwarder::{ForwardRequest, ForwardResponse, Forwarder, SharedEnv};
pub use target::{resolve_upstream, Environment};
