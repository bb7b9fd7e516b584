//! Route table lookup.
//!
//! # Design Decisions
//! - Immutable after construction (thread-safe without locks)
//! - First route whose path matches wins; its method list decides 405
//! - Explicit NotFound rather than silent default

use axum::http::Method;

use crate::routing::matcher::{ExactPathMatcher, Matcher, PathPrefixMatcher};

/// Fixed GET-only account and portfolio endpoints.
pub const FIXED_GET_PATHS: [(&str, &str); 3] = [
    ("account_summary", "/equity/account/summary"),
    ("account_cash", "/equity/account/cash"),
    ("positions", "/equity/positions"),
];

pub const EQUITY_PREFIX: &str = "/equity/";

/// A compiled route.
#[derive(Debug)]
pub struct Route {
    /// Route identifier for logging.
    pub name: String,
    pub methods: Vec<Method>,
    matcher: Box<dyn Matcher>,
}

impl Route {
    pub fn new(name: impl Into<String>, methods: Vec<Method>, matcher: Box<dyn Matcher>) -> Self {
        Self {
            name: name.into(),
            methods,
            matcher,
        }
    }
}

/// Result of a route lookup.
#[derive(Debug)]
pub enum RouteMatch<'a> {
    Matched(&'a Route),
    MethodNotAllowed(&'a Route),
    NotFound,
}

#[derive(Debug)]
pub struct Router {
    routes: Vec<Route>,
}

impl Router {
    pub fn new(routes: Vec<Route>) -> Self {
        Self { routes }
    }

    /// The `/equity/...` forwarding table.
    pub fn equity() -> Self {
        let mut routes: Vec<Route> = FIXED_GET_PATHS
            .iter()
            .map(|(name, path)| {
                Route::new(*name, vec![Method::GET], Box::new(ExactPathMatcher::new(*path)))
            })
            .collect();
        routes.push(Route::new(
            "equity",
            vec![Method::GET, Method::POST, Method::DELETE],
            Box::new(PathPrefixMatcher::new(EQUITY_PREFIX)),
        ));
        Self::new(routes)
    }

    pub fn match_request(&self, method: &Method, path: &str) -> RouteMatch<'_> {
        match self.routes.iter().find(|r| r.matcher.matches(path)) {
            Some(route) if route.methods.contains(method) => RouteMatch::Matched(route),
            Some(route) => RouteMatch::MethodNotAllowed(route),
            None => RouteMatch::NotFound,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn matched_name(router: &Router, method: Method, path: &str) -> Option<String> {
        match router.match_request(&method, path) {
            RouteMatch::Matched(route) => Some(route.name.clone()),
            _ => None,
        }
    }

    #[test]
    fn test_fixed_paths_match_get() {
        let router = Router::equity();
        assert_eq!(
            matched_name(&router, Method::GET, "/equity/positions").as_deref(),
            Some("positions")
        );
        assert_eq!(
            matched_name(&router, Method::GET, "/equity/account/cash").as_deref(),
            Some("account_cash")
        );
        assert_eq!(
            matched_name(&router, Method::GET, "/equity/account/summary").as_deref(),
            Some("account_summary")
        );
    }

    #[test]
    fn test_fixed_paths_are_get_only() {
        let router = Router::equity();
        for method in [Method::POST, Method::DELETE] {
            match router.match_request(&method, "/equity/positions") {
                RouteMatch::MethodNotAllowed(route) => assert_eq!(route.methods, vec![Method::GET]),
                other => panic!("expected 405, got {other:?}"),
            }
        }
    }

    #[test]
    fn test_wildcard_accepts_get_post_delete() {
        let router = Router::equity();
        for method in [Method::GET, Method::POST, Method::DELETE] {
            assert_eq!(
                matched_name(&router, method, "/equity/orders/123").as_deref(),
                Some("equity")
            );
        }
        assert!(matches!(
            router.match_request(&Method::PUT, "/equity/orders/123"),
            RouteMatch::MethodNotAllowed(_)
        ));
    }

    #[test]
    fn test_outside_equity_not_found() {
        let router = Router::equity();
        for path in [
            "/",
            "/equity",
            "/equity/",
            "/history/orders",
            "/equityx/orders",
            "/equity/../admin",
            "/equity/%2e%2e/%2e%2e/admin",
            "/equity/%2E%2e/positions",
        ] {
            assert!(
                matches!(router.match_request(&Method::GET, path), RouteMatch::NotFound),
                "{path}"
            );
        }
    }
}
