//! Typed view of the merged configuration.

use artifact_classifier::{ArtifactFilter, ClassifierConfig, GroupBy, RepositoryRules, VariantRules};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use super::effective::ConfigError;

/// Settings after all layers are merged.
///
/// Unknown keys are rejected so a misspelled key in a config file fails
/// loudly instead of being ignored.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Settings {
    pub group_by: GroupBy,
    pub default_variant: String,
    #[serde(default)]
    pub extra_filter_markers: Vec<String>,
    pub docker_cruft: Vec<String>,
    pub default_org: String,
    #[serde(default)]
    pub repositories: BTreeMap<String, RepositoryRules>,
}

impl Settings {
    /// Build and validate the classifier policy.
    pub fn to_classifier_config(&self) -> Result<ClassifierConfig, ConfigError> {
        let mut variants = VariantRules::new(&self.default_variant);
        variants.repositories = self.repositories.clone();

        let config = ClassifierConfig {
            group_by: self.group_by,
            filter: ArtifactFilter::with_extra_markers(self.extra_filter_markers.iter().cloned())?,
            docker_cruft: self.docker_cruft.clone(),
            variants,
        };
        config.validate()?;
        Ok(config)
    }
}
