//! Trading 212 same-origin forwarding proxy.
//!
//! # Architecture Overview
//!
//! ```text
//!   Browser ──▶ http::server ──▶ routing ──▶ upstream::Forwarder ──▶ live/demo API
//!      ▲         (request id,     (route      (ENVIRONMENT, API_KEY,
//!      │          tracing)         table)      API_SECRET read per request)
//!      └──────── status + body, Content-Type: application/json ◀──┘
//! ```

pub mod config;
pub mod http;
pub mod lifecycle;
pub mod observability;
pub mod routing;
pub mod upstream;

pub use config::schema::ProxyConfig;
pub use http::HttpServer;
pub use lifecycle::Shutdown;
pub use upstream::Forwarder;
