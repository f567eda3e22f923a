//! Built-in defaults (layer 1)
//!
//! Every key the tool understands, with the value used when no file or flag
//! says otherwise.

use artifact_classifier::{GroupBy, RepositoryRules, VariantRules, DEFAULT_DOCKER_CRUFT};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Organization assumed when neither a flag nor the environment names one.
pub const DEFAULT_ORG: &str = "hashicorp";

/// Built-in default configuration values
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BuiltinDefaults {
    /// Grouping key (default: "product")
    pub group_by: GroupBy,

    /// Variant tag for repositories without rules (default: "all")
    pub default_variant: String,

    /// Sidecar markers on top of `.json`, `.sig`, `_SHA256SUMS` (default: none)
    pub extra_filter_markers: Vec<String>,

    /// Docker platform tokens stripped before the version
    pub docker_cruft: Vec<String>,

    /// Fallback organization (default: "hashicorp")
    pub default_org: String,

    /// Variant rules per repository
    pub repositories: BTreeMap<String, RepositoryRules>,
}

impl Default for BuiltinDefaults {
    fn default() -> Self {
        let variants = VariantRules::builtin();
        Self {
            group_by: GroupBy::Product,
            default_variant: variants.default_tag,
            extra_filter_markers: Vec::new(),
            docker_cruft: DEFAULT_DOCKER_CRUFT.iter().map(|s| s.to_string()).collect(),
            default_org: DEFAULT_ORG.to_string(),
            repositories: variants.repositories,
        }
    }
}

impl BuiltinDefaults {
    /// Convert to JSON Value for merging
    pub fn to_value(&self) -> serde_json::Value {
        serde_json::json!({
            "group_by": self.group_by,
            "default_variant": self.default_variant,
            "extra_filter_markers": self.extra_filter_markers,
            "docker_cruft": self.docker_cruft,
            "default_org": self.default_org,
            "repositories": self.repositories,
        })
    }
}
