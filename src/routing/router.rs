//! Path classification.
//!
//! # Responsibilities
//! - Decide, from the path alone, what the edge does with a request
//! - Evaluate rules in a fixed order; first match wins
//! - Fall back to the model origin instead of a dead-end 404
//!
//! # Design Decisions
//! - Immutable after construction (shared via `Arc`, no locks)
//! - O(n) prefix scan over a handful of rules

use std::fmt;

use crate::routing::matcher::{AnyPrefixMatcher, Matcher, SubtreeMatcher};
use crate::routing::rewrite::canonical_api_path;

/// Legacy snapshot mount served straight from the asset store.
pub const ARCHIVE_ROOT: &str = "/iteration1";

/// Prefixes handled by the model origin.
pub const MODEL_PREFIXES: &[&str] = &["/api/gemini-classify", "/api/gemini-rewrite"];

/// Prefixes handled by the core business origin.
pub const CORE_PREFIXES: &[&str] = &[
    "/api/emotion",
    "/api/emotion_analysis",
    "/api/posts",
    "/api/moderate",
    "/api/v3",
    "/api/swagger",
    "/api/docs",
];

/// What the edge does with one request.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RouteDecision {
    /// Answer with the archived `/iteration1/index.html`.
    ServeStaticArchive,
    /// Not an API path; hand to the static asset service untouched.
    PassThroughToAssets,
    /// Forward to `API_ORIGIN`.
    ProxyToModelOrigin,
    /// Forward to `CORE_ORIGIN`.
    ProxyToCoreOrigin,
}

impl RouteDecision {
    /// Stable label for logs and metrics.
    pub fn as_str(&self) -> &'static str {
        match self {
            RouteDecision::ServeStaticArchive => "static_archive",
            RouteDecision::PassThroughToAssets => "assets",
            RouteDecision::ProxyToModelOrigin => "model_origin",
            RouteDecision::ProxyToCoreOrigin => "core_origin",
        }
    }
}

impl fmt::Display for RouteDecision {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug)]
struct Rule {
    matcher: Box<dyn Matcher>,
    decision: RouteDecision,
}

/// Ordered path classifier.
#[derive(Debug)]
pub struct Router {
    archive: SubtreeMatcher,
    rules: Vec<Rule>,
    fallback: RouteDecision,
}

impl Router {
    /// Build the MoodLens routing table.
    pub fn new() -> Self {
        let rules = vec![
            Rule {
                matcher: Box::new(AnyPrefixMatcher::new(MODEL_PREFIXES.iter().copied())),
                decision: RouteDecision::ProxyToModelOrigin,
            },
            Rule {
                matcher: Box::new(AnyPrefixMatcher::new(CORE_PREFIXES.iter().copied())),
                decision: RouteDecision::ProxyToCoreOrigin,
            },
        ];

        Self {
            archive: SubtreeMatcher::new(ARCHIVE_ROOT),
            rules,
            fallback: RouteDecision::ProxyToModelOrigin,
        }
    }

    /// Classify a request path.
    pub fn classify(&self, path: &str) -> RouteDecision {
        if self.archive.matches(path) {
            return RouteDecision::ServeStaticArchive;
        }

        let Some(api_path) = canonical_api_path(path) else {
            return RouteDecision::PassThroughToAssets;
        };

        self.rules
            .iter()
            .find(|rule| rule.matcher.matches(api_path))
            .map(|rule| rule.decision)
            .unwrap_or(self.fallback)
    }
}

impl Default for Router {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_archive_wins() {
        let router = Router::new();
        assert_eq!(router.classify("/iteration1"), RouteDecision::ServeStaticArchive);
        assert_eq!(router.classify("/iteration1/"), RouteDecision::ServeStaticArchive);
        assert_eq!(
            router.classify("/iteration1/api/posts"),
            RouteDecision::ServeStaticArchive
        );
    }

    #[test]
    fn test_non_api_paths_pass_through() {
        let router = Router::new();
        for path in ["/", "/index.html", "/api", "/apis/x", "/iteration10", "/i3/api", "/i3/other"] {
            assert_eq!(router.classify(path), RouteDecision::PassThroughToAssets, "{path}");
        }
    }

    #[test]
    fn test_model_prefixes() {
        let router = Router::new();
        assert_eq!(
            router.classify("/api/gemini-classify/x"),
            RouteDecision::ProxyToModelOrigin
        );
        assert_eq!(
            router.classify("/api/gemini-rewrite"),
            RouteDecision::ProxyToModelOrigin
        );
    }

    #[test]
    fn test_core_prefixes() {
        let router = Router::new();
        for path in [
            "/api/emotion/questionnaire",
            "/api/emotion_analysis/run",
            "/api/posts/get-all",
            "/api/moderate/check",
            "/api/v3/api-docs",
            "/api/swagger-ui/index.html",
            "/api/docs",
            "/i3/api/moderate/check",
        ] {
            assert_eq!(router.classify(path), RouteDecision::ProxyToCoreOrigin, "{path}");
        }
    }

    #[test]
    fn test_unknown_api_path_falls_back_to_model() {
        let router = Router::new();
        assert_eq!(router.classify("/api/health"), RouteDecision::ProxyToModelOrigin);
        assert_eq!(router.classify("/api/"), RouteDecision::ProxyToModelOrigin);
    }

    #[test]
    fn test_case_sensitive() {
        let router = Router::new();
        assert_eq!(router.classify("/API/posts"), RouteDecision::PassThroughToAssets);
        assert_eq!(router.classify("/api/Posts"), RouteDecision::ProxyToModelOrigin);
    }
}
