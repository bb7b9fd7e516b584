//! Configuration management subsystem.
//!
//! # Data Flow
//! ```text
//! defaults
//!     → loader.rs (optional TOML file, PORT env, CLI overrides)
//!     → validation.rs (semantic checks)
//!     → ProxyConfig (validated, immutable)
//!     → shared via Arc with the server
//!
//! Per request:
//!     env.rs (API_KEY, API_SECRET, ENVIRONMENT) → upstream::Forwarder
//! ```
//!
//! # Design Decisions
//! - Startup settings are immutable once loaded
//! - Credentials and the environment selector are never cached
//! - All fields have defaults to allow minimal configs

pub mod env;
pub mod loader;
pub mod schema;
pub mod validation;

pub use env::{MemoryEnv, ReadEnv, SystemEnv};
pub use loader::{resolve_config, ConfigError, Overrides};
pub use schema::{ListenerConfig, ProxyConfig, TimeoutConfig, UpstreamConfig};
