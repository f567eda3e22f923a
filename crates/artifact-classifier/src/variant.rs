//! Per-repository variant rules.
//!
//! A variant is a build flavor inside one repository (enterprise, FIPS,
//! HSM, control plane). Which flavor a filename belongs to is decided by an
//! ordered rule table keyed by repository. Repositories without flavors get
//! the default tag for every artifact.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use crate::error::RuleError;

/// Tag given to artifacts of repositories without flavor rules.
pub const DEFAULT_VARIANT: &str = "all";

/// One `(predicate, tag)` entry.
///
/// The predicate holds when every substring in `contains` occurs in the
/// filename.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct VariantRule {
    pub contains: Vec<String>,
    pub tag: String,
}

impl VariantRule {
    pub fn new(contains: &[&str], tag: &str) -> Self {
        Self {
            contains: contains.iter().map(|s| s.to_string()).collect(),
            tag: tag.to_string(),
        }
    }

    pub fn matches(&self, filename: &str) -> bool {
        self.contains.iter().all(|s| filename.contains(s.as_str()))
    }

    fn is_subset_of(&self, other: &VariantRule) -> bool {
        self.contains.iter().all(|s| other.contains.contains(s))
    }
}

/// Ordered rules for one repository.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RepositoryRules {
    /// Evaluated top to bottom; first match wins. Combined flavors must be
    /// listed before the single flavors they contain, `validate` rejects a
    /// rule that an earlier one shadows.
    #[serde(default)]
    pub rules: Vec<VariantRule>,

    /// Tag for filenames no rule matches. Without it those filenames are
    /// reported as unclassified.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub fallback: Option<String>,
}

impl RepositoryRules {
    pub fn new(rules: Vec<VariantRule>) -> Self {
        Self {
            rules,
            fallback: None,
        }
    }

    pub fn with_fallback(mut self, tag: &str) -> Self {
        self.fallback = Some(tag.to_string());
        self
    }
}

/// The full rule table.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct VariantRules {
    pub default_tag: String,

    #[serde(default)]
    pub repositories: BTreeMap<String, RepositoryRules>,
}

impl Default for VariantRules {
    fn default() -> Self {
        Self::builtin()
    }
}

impl VariantRules {
    /// An empty table: every repository gets `default_tag`.
    pub fn new(default_tag: &str) -> Self {
        Self {
            default_tag: default_tag.to_string(),
            repositories: BTreeMap::new(),
        }
    }

    /// Rules for the repositories whose artifacts need flavor grouping.
    pub fn builtin() -> Self {
        Self::new(DEFAULT_VARIANT)
            .with_repository(
                "vault-enterprise",
                RepositoryRules::new(vec![
                    VariantRule::new(&["hsm", "fips"], "ent.hsm.fips"),
                    VariantRule::new(&["hsm"], "ent.hsm"),
                    VariantRule::new(&["fips"], "ent.fips"),
                    VariantRule::new(&["ent"], "ent"),
                ]),
            )
            .with_repository(
                "consul-k8s",
                RepositoryRules::new(vec![
                    VariantRule::new(&["control-plane"], "consul-k8s-control-plane"),
                    // consul-k8s only publishes the control plane as an image
                    VariantRule::new(&["docker"], "consul-k8s-control-plane"),
                    VariantRule::new(&["consul-k8s"], "consul-k8s"),
                ]),
            )
    }

    pub fn with_repository(mut self, repository: &str, rules: RepositoryRules) -> Self {
        self.repositories.insert(repository.to_string(), rules);
        self
    }

    pub fn rules_for(&self, repository: &str) -> Option<&RepositoryRules> {
        self.repositories.get(repository)
    }

    /// Variant tag for `filename` in `repository`.
    ///
    /// `None` means the repository has rules and none of them (nor a
    /// fallback) applies.
    pub fn classify(&self, filename: &str, repository: &str) -> Option<&str> {
        let Some(repo) = self.repositories.get(repository) else {
            return Some(&self.default_tag);
        };

        repo.rules
            .iter()
            .find(|rule| rule.matches(filename))
            .map(|rule| rule.tag.as_str())
            .or(repo.fallback.as_deref())
    }

    pub fn validate(&self) -> Result<(), RuleError> {
        if self.default_tag.is_empty() {
            return Err(RuleError::EmptyDefaultTag);
        }

        for (repository, repo) in &self.repositories {
            for (index, rule) in repo.rules.iter().enumerate() {
                let repository = repository.clone();
                if rule.tag.is_empty() {
                    return Err(RuleError::EmptyTag { repository, index });
                }
                if rule.contains.is_empty() {
                    return Err(RuleError::EmptyPredicate { repository, index });
                }
                if rule.contains.iter().any(String::is_empty) {
                    return Err(RuleError::EmptySubstring { repository, index });
                }
                // an earlier rule with a subset of these substrings always matches first
                let shadowed_by = repo.rules[..index]
                    .iter()
                    .position(|earlier| earlier.is_subset_of(rule));
                if let Some(by) = shadowed_by {
                    return Err(RuleError::ShadowedRule {
                        repository,
                        index,
                        by,
                    });
                }
            }
            if repo.fallback.as_deref() == Some("") {
                return Err(RuleError::EmptyFallback {
                    repository: repository.clone(),
                });
            }
        }

        Ok(())
    }
}
