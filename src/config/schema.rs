//! Configuration schema definitions.
//!
//! Only startup-time settings live here. Credentials and the live/demo
//! selector are request-time values read through [`ReadEnv`](super::env::ReadEnv).

use serde::{Deserialize, Serialize};

/// Root configuration for the proxy.
#[derive(Debug, Clone, Deserialize, Serialize, Default, PartialEq)]
#[serde(default)]
pub struct ProxyConfig {
    /// Listener configuration (host, port).
    pub listener: ListenerConfig,

    /// Upstream base URLs for the two environments.
    pub upstream: UpstreamConfig,

    /// Outbound call timeouts.
    pub timeouts: TimeoutConfig,
}

/// Listener configuration.
#[derive(Debug, Clone, Deserialize, Serialize, PartialEq)]
#[serde(default)]
pub struct ListenerConfig {
    /// Interface to bind. Loopback unless explicitly overridden.
    pub host: String,

    /// Listen port.
    pub port: u16,
}

impl ListenerConfig {
    /// `host:port`, suitable for `TcpListener::bind`.
    pub fn bind_address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

impl Default for ListenerConfig {
    fn default() -> Self {
        Self {
            host: "127.0.0.1".to_string(),
            port: 8765,
        }
    }
}

/// Upstream base URLs.
#[derive(Debug, Clone, Deserialize, Serialize, PartialEq)]
#[serde(default)]
pub struct UpstreamConfig {
    /// Base URL used when `ENVIRONMENT=live`.
    pub live_url: String,

    /// Base URL used for every other `ENVIRONMENT` value.
    pub demo_url: String,
}

pub const LIVE_BASE_URL: &str = "https://live.trading212.com/api/v0";
pub const DEMO_BASE_URL: &str = "https://demo.trading212.com/api/v0";

impl Default for UpstreamConfig {
    fn default() -> Self {
        Self {
            live_url: LIVE_BASE_URL.to_string(),
            demo_url: DEMO_BASE_URL.to_string(),
        }
    }
}

impl UpstreamConfig {
    /// Strip trailing slashes so `base + path` never doubles them.
    pub fn normalized(mut self) -> Self {
        self.live_url = self.live_url.trim_end_matches('/').to_string();
        self.demo_url = self.demo_url.trim_end_matches('/').to_string();
        self
    }
}

/// Timeout configuration for the outbound call.
#[derive(Debug, Clone, Deserialize, Serialize, PartialEq)]
#[serde(default)]
pub struct TimeoutConfig {
    /// Connection establishment timeout in seconds.
    pub connect_secs: u64,

    /// Total time allowed for the upstream request/response in seconds.
    pub upstream_secs: u64,
}

impl Default for TimeoutConfig {
    fn default() -> Self {
        Self {
            connect_secs: 15,
            upstream_secs: 15,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = ProxyConfig::default();
        assert_eq!(config.listener.bind_address(), "127.0.0.1:8765");
        assert_eq!(config.upstream.live_url, LIVE_BASE_URL);
        assert_eq!(config.upstream.demo_url, DEMO_BASE_URL);
        assert_eq!(config.timeouts.upstream_secs, 15);
    }

    #[test]
    fn test_partial_toml_keeps_defaults() {
        let config: ProxyConfig = toml::from_str(
            r#"
            [listener]
            port = 9000
            "#,
        )
        .unwrap();
        assert_eq!(config.listener.host, "127.0.0.1");
        assert_eq!(config.listener.port, 9000);
        assert_eq!(config.upstream, UpstreamConfig::default());
    }

    #[test]
    fn test_normalized_strips_trailing_slash() {
        let upstream = UpstreamConfig {
            live_url: "http://127.0.0.1:1/api/v0/".into(),
            demo_url: "http://127.0.0.1:2/api/v0".into(),
        }
        .normalized();
        assert_eq!(upstream.live_url, "http://127.0.0.1:1/api/v0");
        assert_eq!(upstream.demo_url, "http://127.0.0.1:2/api/v0");
    }
}
