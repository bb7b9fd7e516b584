//! Live/demo upstream selection.

use std::fmt;

use crate::config::env::{self, ReadEnv};
use crate::config::schema::UpstreamConfig;

/// Which brokerage environment requests are sent to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Environment {
    Live,
    #[default]
    Demo,
}

impl Environment {
    /// Only `live` (any case, surrounding whitespace ignored) selects
    /// [`Environment::Live`]; everything else falls back to demo.
    pub fn parse(raw: &str) -> Self {
        if raw.trim().eq_ignore_ascii_case("live") {
            Self::Live
        } else {
            Self::Demo
        }
    }

    /// Read `ENVIRONMENT`, defaulting to demo when unset.
    pub fn from_env<E: ReadEnv + ?Sized>(env: &E) -> Self {
        env.var(env::ENVIRONMENT)
            .map(|raw| Self::parse(&raw))
            .unwrap_or_default()
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Live => "live",
            Self::Demo => "demo",
        }
    }

    pub fn base_url<'a>(&self, upstream: &'a UpstreamConfig) -> &'a str {
        match self {
            Self::Live => &upstream.live_url,
            Self::Demo => &upstream.demo_url,
        }
    }
}

impl fmt::Display for Environment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Resolve the base URL for the current `ENVIRONMENT`. Re-read on every call.
pub fn resolve_upstream<'a, E: ReadEnv + ?Sized>(
    env: &E,
    upstream: &'a UpstreamConfig,
) -> (Environment, &'a str) {
    let environment = Environment::from_env(env);
    (environment, environment.base_url(upstream))
}
