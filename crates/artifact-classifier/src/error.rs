//! Errors raised while building classifier rule tables.

/// A rule table or policy list that cannot be used.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum RuleError {
    #[error("filter markers must not be empty strings")]
    EmptyFilterMarker,

    #[error("docker cruft tokens must not be empty strings")]
    EmptyCruftToken,

    #[error("default variant tag must not be empty")]
    EmptyDefaultTag,

    #[error("repository '{repository}': rule {index} has an empty tag")]
    EmptyTag { repository: String, index: usize },

    #[error("repository '{repository}': rule {index} has no substrings to match")]
    EmptyPredicate { repository: String, index: usize },

    #[error("repository '{repository}': rule {index} contains an empty substring")]
    EmptySubstring { repository: String, index: usize },

    #[error("repository '{repository}': rule {index} can never match, rule {by} matches first")]
    ShadowedRule {
        repository: String,
        index: usize,
        by: usize,
    },

    #[error("repository '{repository}': fallback tag must not be empty")]
    EmptyFallback { repository: String },

    #[error("unknown grouping mode '{0}' (expected product, variant or product_and_variant)")]
    UnknownGroupBy(String),
}
