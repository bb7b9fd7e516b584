//! Process environment access.
//!
//! Request-time settings are read through [`ReadEnv`] so the forwarder can be
//! driven by an in-memory environment in tests.

use std::collections::HashMap;
use std::env;
use std::sync::RwLock;

pub const API_KEY: &str = "API_KEY";
pub const API_SECRET: &str = "API_SECRET";
pub const ENVIRONMENT: &str = "ENVIRONMENT";
pub const PORT: &str = "PORT";

pub trait ReadEnv {
    fn var(&self, key: &str) -> Result<String, env::VarError>;
}

/// Zero-sized type, delegates to `std::env`.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemEnv;

impl ReadEnv for SystemEnv {
    #[inline]
    fn var(&self, key: &str) -> Result<String, env::VarError> {
        env::var(key)
    }
}

/// Won't touch the global process environment.
///
/// Backed by a `RwLock` so it can be shared with a running server and
/// mutated between requests.
#[derive(Debug, Default)]
pub struct MemoryEnv {
    vars: RwLock<HashMap<String, String>>,
}

impl MemoryEnv {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with(self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.set(key, value);
        self
    }

    pub fn set(&self, key: impl Into<String>, value: impl Into<String>) {
        if let Ok(mut vars) = self.vars.write() {
            vars.insert(key.into(), value.into());
        }
    }

    pub fn remove(&self, key: &str) {
        if let Ok(mut vars) = self.vars.write() {
            vars.remove(key);
        }
    }
}

impl ReadEnv for MemoryEnv {
    fn var(&self, key: &str) -> Result<String, env::VarError> {
        self.vars
            .read()
            .ok()
            .and_then(|vars| vars.get(key).cloned())
            .ok_or(env::VarError::NotPresent)
    }
}
