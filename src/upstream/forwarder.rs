//! Request forwarding to the brokerage API.
//!
//! One inbound request becomes one outbound request: same method, same path
//! under the resolved base URL, same raw query string, and for POST the same
//! body. The upstream status and body come back untouched.

use std::error::Error as _;
use std::sync::Arc;
use std::time::Duration;

use axum::body::Bytes;
use axum::http::{header, Method, StatusCode};
use axum::response::{IntoResponse, Response};

use crate::config::env::ReadEnv;
use crate::config::schema::{ProxyConfig, UpstreamConfig};
use crate::http::response::{ProxyError, JSON_CONTENT_TYPE};
use crate::upstream::auth::build_auth_header;
use crate::upstream::target::{resolve_upstream, Environment};

/// Environment handle shared by every request.
pub type SharedEnv = Arc<dyn ReadEnv + Send + Sync>;

/// Inbound request as seen by the forwarder.
#[derive(Debug, Clone)]
pub struct ForwardRequest {
    pub method: Method,
    pub path: String,
    /// Raw query string without the leading `?`.
    pub query: Option<String>,
    pub body: Bytes,
}

impl ForwardRequest {
    pub fn new(method: Method, path: impl Into<String>) -> Self {
        Self {
            method,
            path: path.into(),
            query: None,
            body: Bytes::new(),
        }
    }

    pub fn with_query(mut self, query: Option<&str>) -> Self {
        self.query = query.filter(|q| !q.is_empty()).map(str::to_string);
        self
    }

    pub fn with_body(mut self, body: Bytes) -> Self {
        self.body = body;
        self
    }
}

/// Upstream result relayed verbatim.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ForwardResponse {
    pub status: StatusCode,
    pub body: Bytes,
}

impl IntoResponse for ForwardResponse {
    fn into_response(self) -> Response {
        (
            self.status,
            [(header::CONTENT_TYPE, JSON_CONTENT_TYPE)],
            self.body,
        )
            .into_response()
    }
}

/// Stateless forwarder. Cloning is cheap; the HTTP client pools internally.
#[derive(Clone)]
pub struct Forwarder {
    client: reqwest::Client,
    upstream: UpstreamConfig,
    env: SharedEnv,
}

impl Forwarder {
    pub fn new(config: &ProxyConfig, env: SharedEnv) -> Result<Self, reqwest::Error> {
        let request_timeout = Duration::from_secs(config.timeouts.upstream_secs);
        let connect_timeout =
            Duration::from_secs(config.timeouts.connect_secs).min(request_timeout);

        let client = reqwest::Client::builder()
            .connect_timeout(connect_timeout)
            .timeout(request_timeout)
            .build()?;

        Ok(Self {
            client,
            upstream: config.upstream.clone().normalized(),
            env,
        })
    }

    /// Full outbound URL for `path` and the environment it was resolved from.
    pub fn upstream_url(&self, path: &str, query: Option<&str>) -> (Environment, String) {
        let (environment, base) = resolve_upstream(self.env.as_ref(), &self.upstream);
        let url = match query {
            Some(q) if !q.is_empty() => format!("{base}{path}?{q}"),
            _ => format!("{base}{path}"),
        };
        (environment, url)
    }

    /// Relay one request. Non-2xx upstream statuses are not errors.
    pub async fn forward(&self, request: ForwardRequest) -> Result<ForwardResponse, ProxyError> {
        let (environment, url) = self.upstream_url(&request.path, request.query.as_deref());

        let Some(auth) = build_auth_header(self.env.as_ref()) else {
            tracing::warn!(path = %request.path, "API_KEY or API_SECRET not set");
            return Err(ProxyError::CredentialsMissing);
        };

        tracing::debug!(
            method = %request.method,
            path = %request.path,
            environment = %environment,
            "Forwarding request"
        );

        let mut outbound = self
            .client
            .request(request.method.clone(), &url)
            .header(header::AUTHORIZATION, auth)
            .header(header::CONTENT_TYPE, JSON_CONTENT_TYPE);
        if request.method == Method::POST {
            outbound = outbound.body(request.body);
        }

        let response = outbound.send().await.map_err(|e| transport_error(&url, e))?;
        let status = response.status();
        let body = response.bytes().await.map_err(|e| transport_error(&url, e))?;

        tracing::debug!(
            method = %request.method,
            path = %request.path,
            status = status.as_u16(),
            bytes = body.len(),
            "Upstream responded"
        );

        Ok(ForwardResponse { status, body })
    }
}

fn transport_error(url: &str, err: reqwest::Error) -> ProxyError {
    // reqwest's top-level message omits the cause (refused, timed out, DNS).
    let mut message = err.to_string();
    let mut source = err.source();
    while let Some(cause) = source {
        message.push_str(": ");
        message.push_str(&cause.to_string());
        source = cause.source();
    }
    tracing::error!(url = %url, timeout = err.is_timeout(), error = %message, "Upstream request failed");
    ProxyError::Transport(message)
}
