//! Basic-auth header synthesis from `API_KEY` / `API_SECRET`.

use std::fmt;

use base64::Engine as _;

use crate::config::env::{self, ReadEnv};

/// API key pair. Both halves are trimmed and non-empty.
#[derive(Clone, PartialEq, Eq)]
pub struct Credentials {
    key: String,
    secret: String,
}

impl Credentials {
    /// Returns `None` if either value is empty after trimming.
    pub fn new(key: &str, secret: &str) -> Option<Self> {
        let (key, secret) = (key.trim(), secret.trim());
        if key.is_empty() || secret.is_empty() {
            return None;
        }
        Some(Self {
            key: key.to_string(),
            secret: secret.to_string(),
        })
    }

    /// Missing variables count as empty.
    pub fn from_env<E: ReadEnv + ?Sized>(env: &E) -> Option<Self> {
        let key = env.var(env::API_KEY).unwrap_or_default();
        let secret = env.var(env::API_SECRET).unwrap_or_default();
        Self::new(&key, &secret)
    }

    /// `Basic base64(key:secret)`.
    pub fn header_value(&self) -> String {
        let raw = format!("{}:{}", self.key, self.secret);
        let encoded = base64::engine::general_purpose::STANDARD.encode(raw.as_bytes());
        format!("Basic {encoded}")
    }
}

impl fmt::Debug for Credentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Credentials")
            .field("key", &self.key)
            .field("secret", &"<redacted>")
            .finish()
    }
}

/// Authorization header value for the current environment, or `None` when
/// credentials are absent.
pub fn build_auth_header<E: ReadEnv + ?Sized>(env: &E) -> Option<String> {
    Credentials::from_env(env).map(|c| c.header_value())
}
