//! Path matching logic.
//!
//! # Design Decisions
//! - Path matching is case-sensitive
//! - No regex: exact and prefix comparisons only
//! - Dot segments (`.`, `..`, and their `%2e` forms) never match a prefix,
//!   since URL parsing would resolve them out of the prefix

/// Trait for matching request paths against a route pattern.
pub trait Matcher: Send + Sync + std::fmt::Debug {
    /// Returns true if the path matches this pattern.
    fn matches(&self, path: &str) -> bool;
}

/// Matches one path exactly.
#[derive(Debug, Clone)]
pub struct ExactPathMatcher {
    path: String,
}

impl ExactPathMatcher {
    pub fn new(path: impl Into<String>) -> Self {
        Self { path: path.into() }
    }
}

impl Matcher for ExactPathMatcher {
    fn matches(&self, path: &str) -> bool {
        path == self.path
    }
}

/// Matches any path under a prefix with a non-empty remainder,
/// i.e. `/equity/{*subpath}`. Remainders containing dot segments are rejected.
#[derive(Debug, Clone)]
pub struct PathPrefixMatcher {
    prefix: String,
}

impl PathPrefixMatcher {
    pub fn new(prefix: impl Into<String>) -> Self {
        Self {
            prefix: prefix.into(),
        }
    }
}

impl Matcher for PathPrefixMatcher {
    fn matches(&self, path: &str) -> bool {
        path.strip_prefix(self.prefix.as_str())
            .is_some_and(|rest| !rest.is_empty() && !has_dot_segment(rest))
    }
}

/// True if any `/`-separated segment is `.` or `..`, with `%2e` (any case)
/// counted as a dot.
pub fn has_dot_segment(path: &str) -> bool {
    path.split('/').any(|segment| {
        let decoded = segment.to_ascii_lowercase().replace("%2e", ".");
        decoded == "." || decoded == ".."
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_exact_matcher() {
        let matcher = ExactPathMatcher::new("/equity/positions");
        assert!(matcher.matches("/equity/positions"));
        assert!(!matcher.matches("/equity/positions/"));
        assert!(!matcher.matches("/Equity/positions"));
    }

    #[test]
    fn test_prefix_matcher_requires_subpath() {
        let matcher = PathPrefixMatcher::new("/equity/");
        assert!(matcher.matches("/equity/orders"));
        assert!(matcher.matches("/equity/orders/limit"));
        assert!(!matcher.matches("/equity/"));
        assert!(!matcher.matches("/equity"));
        assert!(!matcher.matches("/history/orders"));
    }

    #[test]
    fn test_prefix_matcher_rejects_dot_segments() {
        let matcher = PathPrefixMatcher::new("/equity/");
        for path in [
            "/equity/../admin",
            "/equity/orders/../../admin",
            "/equity/./orders",
            "/equity/%2e%2e/%2e%2e/admin",
            "/equity/%2E%2E/admin",
            "/equity/.%2e/admin",
            "/equity/%2e",
        ] {
            assert!(!matcher.matches(path), "{path}");
        }
        assert!(matcher.matches("/equity/orders/..hidden"));
        assert!(matcher.matches("/equity/v1.2/orders"));
    }
}
