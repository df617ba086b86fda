//! Request matching primitives.
//!
//! # Responsibilities
//! - Match the method token (exact, case-sensitive)
//! - Match the path exactly or by prefix (case-sensitive)
//! - Combine conditions with AND semantics
//!
//! # Design Decisions
//! - Method tokens are case-sensitive (RFC 9110), so `goat` is not `GOAT`
//! - No regex or path templates

use axum::http::Method;

/// Trait for matching a request's method and path against a condition.
pub trait Matcher: Send + Sync + std::fmt::Debug {
    fn matches(&self, method: &Method, path: &str) -> bool;
}

/// Matches one method token.
#[derive(Debug, Clone)]
pub struct MethodMatcher {
    method: Method,
}

impl MethodMatcher {
    /// Create a matcher for one method token.
    pub fn new(method: Method) -> Self {
        Self { method }
    }
}

impl Matcher for MethodMatcher {
    fn matches(&self, method: &Method, _path: &str) -> bool {
        *method == self.method
    }
}

/// Matches one exact path.
#[derive(Debug, Clone)]
pub struct ExactPathMatcher {
    path: String,
}

impl ExactPathMatcher {
    /// Create a matcher for one exact path.
    pub fn new(path: impl Into<String>) -> Self {
        Self { path: path.into() }
    }
}

impl Matcher for ExactPathMatcher {
    fn matches(&self, _method: &Method, path: &str) -> bool {
        path == self.path
    }
}

/// Matches the request path prefix.
#[derive(Debug, Clone)]
pub struct PathPrefixMatcher {
    prefix: String,
}

impl PathPrefixMatcher {
    /// Create a matcher for a path prefix.
    pub fn new(prefix: impl Into<String>) -> Self {
        Self {
            prefix: prefix.into(),
        }
    }

    /// The remainder of `path` after the prefix, if it matches.
    pub fn strip<'a>(&self, path: &'a str) -> Option<&'a str> {
        path.strip_prefix(self.prefix.as_str())
    }
}

impl Matcher for PathPrefixMatcher {
    fn matches(&self, _method: &Method, path: &str) -> bool {
        path.starts_with(&self.prefix)
    }
}

/// Combines multiple matchers with AND semantics.
#[derive(Debug)]
pub struct AndMatcher {
    matchers: Vec<Box<dyn Matcher>>,
}

impl AndMatcher {
    /// Create a matcher that requires all of `matchers`.
    pub fn new(matchers: Vec<Box<dyn Matcher>>) -> Self {
        Self { matchers }
    }
}

impl Matcher for AndMatcher {
    fn matches(&self, method: &Method, path: &str) -> bool {
        self.matchers.iter().all(|m| m.matches(method, path))
    }
}
