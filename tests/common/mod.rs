//! Shared utilities for integration testing.

use std::net::SocketAddr;
use std::sync::Arc;

use httpmock::MockServer;
use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tokio::net::{TcpListener, TcpStream};

use t212_proxy::config::{MemoryEnv, ProxyConfig};
use t212_proxy::http::HttpServer;
use t212_proxy::lifecycle::Shutdown;

/// Base URL on a mock server, shaped like the real API root.
#[allow(dead_code)]
pub fn api_base(server: &MockServer) -> String {
    format!("{}/api/v0", server.base_url())
}

/// A loopback address nothing listens on.
#[allow(dead_code)]
pub async fn closed_port_url() -> String {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    drop(listener);
    format!("http://{addr}/api/v0")
}

/// A running proxy bound to an ephemeral loopback port.
pub struct TestProxy {
    pub addr: SocketAddr,
    #[allow(dead_code)]
    pub env: Arc<MemoryEnv>,
    shutdown: Shutdown,
}

impl TestProxy {
    pub fn url(&self, path: &str) -> String {
        format!("http://{}{}", self.addr, path)
    }

    /// Send a request line as-is, bypassing client-side path normalization.
    /// Returns the response status code.
    #[allow(dead_code)]
    pub async fn raw_status(&self, method: &str, target: &str) -> u16 {
        let mut stream = TcpStream::connect(self.addr).await.unwrap();
        let request = format!(
            "{method} {target} HTTP/1.1\r\nHost: {}\r\nConnection: close\r\n\r\n",
            self.addr
        );
        stream.write_all(request.as_bytes()).await.unwrap();

        let mut response = Vec::new();
        stream.read_to_end(&mut response).await.unwrap();
        String::from_utf8_lossy(&response)
            .split(' ')
            .nth(1)
            .and_then(|code| code.parse().ok())
            .expect("malformed status line")
    }
}

impl Drop for TestProxy {
    fn drop(&mut self) {
        self.shutdown.trigger();
    }
}

/// Config whose live and demo URLs point at the given bases.
pub fn config_for(live_url: &str, demo_url: &str) -> ProxyConfig {
    let mut config = ProxyConfig::default();
    config.upstream.live_url = live_url.to_string();
    config.upstream.demo_url = demo_url.to_string();
    config
}

pub async fn start_proxy(config: ProxyConfig, env: MemoryEnv) -> TestProxy {
    let env = Arc::new(env);
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();

    let shutdown = Shutdown::new();
    let server = HttpServer::new(config, env.clone()).unwrap();
    let server_shutdown = shutdown.subscribe();
    tokio::spawn(async move {
        let _ = server.run(listener, server_shutdown).await;
    });

    TestProxy {
        addr,
        env,
        shutdown,
    }
}

/// Proxy whose live and demo upstreams are both `server`.
#[allow(dead_code)]
pub async fn start_proxy_for(server: &MockServer, env: MemoryEnv) -> TestProxy {
    let base = api_base(server);
    start_proxy(config_for(&base, &base), env).await
}

pub fn client() -> reqwest::Client {
    reqwest::Client::builder()
        .pool_max_idle_per_host(0)
        .no_proxy()
        .build()
        .unwrap()
}

#[allow(dead_code)]
pub fn credentials_env() -> MemoryEnv {
    MemoryEnv::new()
        .with("API_KEY", "abc")
        .with("API_SECRET", "xyz")
}
