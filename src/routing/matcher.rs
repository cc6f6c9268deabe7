//! Path matching primitives.
//!
//! # Responsibilities
//! - Match a literal path prefix (case-sensitive)
//! - Match any of a fixed prefix set
//! - Match a path subtree (the path itself or anything below it)
//!
//! # Design Decisions
//! - Matchers see only the path string; headers and host never affect routing
//! - No regex and no normalization of `..` or duplicate slashes

/// Trait for matching a request path against a condition.
pub trait Matcher: Send + Sync + std::fmt::Debug {
    /// Returns true if the path matches this condition.
    fn matches(&self, path: &str) -> bool;
}

/// Matches a literal path prefix.
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
        path.starts_with(&self.prefix)
    }
}

/// Matches when any prefix in the set matches (OR semantics).
#[derive(Debug, Clone)]
pub struct AnyPrefixMatcher {
    prefixes: Vec<PathPrefixMatcher>,
}

impl AnyPrefixMatcher {
    pub fn new<I, S>(prefixes: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            prefixes: prefixes.into_iter().map(PathPrefixMatcher::new).collect(),
        }
    }
}

impl Matcher for AnyPrefixMatcher {
    fn matches(&self, path: &str) -> bool {
        self.prefixes.iter().any(|m| m.matches(path))
    }
}

/// Matches `root` exactly or any path under `root/`.
///
/// `/iteration1` and `/iteration1/x` match, `/iteration10` does not.
#[derive(Debug, Clone)]
pub struct SubtreeMatcher {
    root: String,
    nested: String,
}

impl SubtreeMatcher {
    pub fn new(root: impl Into<String>) -> Self {
        let root = root.into();
        let nested = format!("{}/", root.trim_end_matches('/'));
        Self { root, nested }
    }
}

impl Matcher for SubtreeMatcher {
    fn matches(&self, path: &str) -> bool {
        path == self.root || path.starts_with(&self.nested)
    }
}
