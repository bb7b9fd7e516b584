//! HTTP protocol handling subsystem.
//!
//! # Data Flow
//! ```text
//! TCP connection (loopback)
//!     → server.rs (Axum setup, middleware)
//!     → request.rs (request ID)
//!     → routing (route table: 404 / 405 / match)
//!     → upstream::Forwarder
//!     → response.rs (error envelope) or relayed upstream body
//! ```

pub mod request;
pub mod response;
pub mod server;

pub use request::{MakeRequestUuidV4, RequestIdExt, X_REQUEST_ID};
pub use response::{ProxyError, JSON_CONTENT_TYPE};
pub use server::HttpServer;
