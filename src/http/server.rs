//! HTTP server setup and configuration.
//!
//! # Responsibilities
//! - Create Axum Router with the proxy handler as the catch-all
//! - Wire up middleware (request ID, tracing)
//! - Dispatch requests through the route table
//! - Hand matched requests to the forwarder

use std::sync::Arc;

use axum::{
    body::{Body, Bytes},
    extract::{rejection::BytesRejection, State},
    http::{Method, Request, Uri},
    response::{IntoResponse, Response},
    Router,
};
use tokio::net::TcpListener;
use tokio::sync::broadcast;
use tower::ServiceBuilder;
use tower_http::{
    request_id::{PropagateRequestIdLayer, SetRequestIdLayer},
    trace::TraceLayer,
};

use crate::config::ProxyConfig;
use crate::http::request::{MakeRequestUuidV4, RequestIdExt, X_REQUEST_ID};
use crate::http::response::ProxyError;
use crate::lifecycle::signals::wait_for_shutdown;
use crate::routing::{RouteMatch, Router as ProxyRouter};
use crate::upstream::{ForwardRequest, Forwarder, SharedEnv};

/// Application state injected into handlers.
#[derive(Clone)]
pub struct AppState {
    pub router: Arc<ProxyRouter>,
    pub forwarder: Forwarder,
}

/// HTTP server for the proxy.
pub struct HttpServer {
    router: Router,
}

impl HttpServer {
    /// Create a new HTTP server. `env` supplies credentials and the
    /// environment selector on every request.
    pub fn new(config: ProxyConfig, env: SharedEnv) -> Result<Self, reqwest::Error> {
        let state = AppState {
            router: Arc::new(ProxyRouter::equity()),
            forwarder: Forwarder::new(&config, env)?,
        };

        let router = Self::build_router(state);
        Ok(Self { router })
    }

    /// Build the Axum router with all middleware layers.
    fn build_router(state: AppState) -> Router {
        Router::new()
            .fallback(proxy_handler)
            .with_state(state)
            .layer(
                ServiceBuilder::new()
                    .layer(SetRequestIdLayer::new(X_REQUEST_ID, MakeRequestUuidV4))
                    .layer(TraceLayer::new_for_http().make_span_with(
                        |request: &Request<Body>| {
                            tracing::info_span!(
                                "request",
                                method = %request.method(),
                                path = %request.uri().path(),
                                request_id = %request.request_id(),
                            )
                        },
                    ))
                    .layer(PropagateRequestIdLayer::new(X_REQUEST_ID)),
            )
    }

    /// Run the server until Ctrl-C or until `shutdown` fires.
    pub async fn run(
        self,
        listener: TcpListener,
        shutdown: broadcast::Receiver<()>,
    ) -> Result<(), std::io::Error> {
        let addr = listener.local_addr()?;
        tracing::info!(address = %addr, "HTTP server starting");

        axum::serve(listener, self.router)
            .with_graceful_shutdown(wait_for_shutdown(shutdown))
            .await?;

        tracing::info!("HTTP server stopped");
        Ok(())
    }
}

/// Main proxy handler. Looks up the route and forwards matched requests.
async fn proxy_handler(
    State(state): State<AppState>,
    method: Method,
    uri: Uri,
    body: Result<Bytes, BytesRejection>,
) -> Response {
    let path = uri.path();

    let route = match state.router.match_request(&method, path) {
        RouteMatch::Matched(route) => route,
        RouteMatch::MethodNotAllowed(route) => {
            tracing::debug!(method = %method, path = %path, route = %route.name, "Method not allowed");
            return ProxyError::MethodNotAllowed {
                allow: route.methods.clone(),
            }
            .into_response();
        }
        RouteMatch::NotFound => {
            tracing::debug!(path = %path, "No route matched");
            return ProxyError::NotFound.into_response();
        }
    };

    tracing::debug!(route = %route.name, "Route matched");

    let body = match body {
        Ok(body) => body,
        Err(rejection) => {
            tracing::warn!(path = %path, status = %rejection.status(), "Request body rejected");
            return ProxyError::BodyRejected {
                status: rejection.status(),
                message: rejection.body_text(),
            }
            .into_response();
        }
    };

    let request = ForwardRequest::new(method, path)
        .with_query(uri.query())
        .with_body(body);

    match state.forwarder.forward(request).await {
        Ok(response) => response.into_response(),
        Err(e) => e.into_response(),
    }
}
