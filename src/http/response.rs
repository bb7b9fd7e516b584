//! Response handling and error mapping.
//!
//! Every failure that ends a request is a [`ProxyError`], rendered as
//! `{"error": "<message>"}` with a JSON content type.

use axum::http::{header, HeaderValue, Method, StatusCode};
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde_json::json;

pub const JSON_CONTENT_TYPE: &str = "application/json";

#[derive(Debug, thiserror::Error)]
pub enum ProxyError {
    /// Checked before any outbound call is made.
    #[error("API_KEY and API_SECRET must be set")]
    CredentialsMissing,

    /// Timeout, DNS, refused connection, TLS or body read failure.
    #[error("{0}")]
    Transport(String),

    /// Inbound body could not be buffered (too large, aborted).
    #[error("{message}")]
    BodyRejected { status: StatusCode, message: String },

    #[error("not found")]
    NotFound,

    #[error("method not allowed")]
    MethodNotAllowed { allow: Vec<Method> },
}

impl ProxyError {
    pub fn status(&self) -> StatusCode {
        match self {
            Self::CredentialsMissing => StatusCode::INTERNAL_SERVER_ERROR,
            Self::Transport(_) => StatusCode::BAD_GATEWAY,
            Self::BodyRejected { status, .. } => *status,
            Self::NotFound => StatusCode::NOT_FOUND,
            Self::MethodNotAllowed { .. } => StatusCode::METHOD_NOT_ALLOWED,
        }
    }
}

impl IntoResponse for ProxyError {
    fn into_response(self) -> Response {
        let mut response =
            (self.status(), Json(json!({ "error": self.to_string() }))).into_response();

        if let Self::MethodNotAllowed { allow } = &self {
            let allow = allow
                .iter()
                .map(Method::as_str)
                .collect::<Vec<_>>()
                .join(", ");
            if let Ok(value) = HeaderValue::from_str(&allow) {
                response.headers_mut().insert(header::ALLOW, value);
            }
        }
        response
    }
}
