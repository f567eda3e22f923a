//! Canonical product naming and variant grouping for release artifacts.
//!
//! Build pipelines name their outputs inconsistently: debs use
//! `name_version_arch.deb`, RPMs use `name-version-release.arch.rpm`, Docker
//! tarballs interleave platform tokens before the version. The classifier
//! turns each raw filename into a canonical `<name>_<version>` product name,
//! assigns a repository-specific variant tag, and groups the artifacts.
//!
//! Problems with individual filenames are returned as diagnostics; a batch
//! never fails because of one stray file.

mod correct;
mod error;
mod filter;
mod format;
mod group;
mod result;
mod semver;
mod variant;

pub use correct::{canonicalize, correct_product_name, Correction, DEFAULT_DOCKER_CRUFT};
pub use error::RuleError;
pub use filter::{ArtifactFilter, DEFAULT_FILTER_MARKERS};
pub use format::Format;
pub use group::{GroupBy, GroupedResult, GroupingOutcome};
pub use result::{ArtifactDecision, Diagnostic, DiagnosticReason};
pub use semver::{locate, SemverSpan};
pub use variant::{RepositoryRules, VariantRule, VariantRules, DEFAULT_VARIANT};

use tracing::{debug, info, warn};

/// Policy the classifier runs with.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClassifierConfig {
    pub group_by: GroupBy,
    pub filter: ArtifactFilter,
    pub docker_cruft: Vec<String>,
    pub variants: VariantRules,
}

impl Default for ClassifierConfig {
    fn default() -> Self {
        Self {
            group_by: GroupBy::default(),
            filter: ArtifactFilter::default(),
            docker_cruft: DEFAULT_DOCKER_CRUFT.iter().map(|s| s.to_string()).collect(),
            variants: VariantRules::builtin(),
        }
    }
}

impl ClassifierConfig {
    pub fn validate(&self) -> Result<(), RuleError> {
        if self.docker_cruft.iter().any(String::is_empty) {
            return Err(RuleError::EmptyCruftToken);
        }
        self.variants.validate()
    }
}

/// The classification pipeline: filter, detect format, locate the version,
/// correct the product name, classify the variant, group.
///
/// Immutable once built, so one instance can serve any number of
/// repositories.
#[derive(Debug, Clone)]
pub struct ArtifactClassifier {
    config: ClassifierConfig,
}

impl ArtifactClassifier {
    pub fn new(config: ClassifierConfig) -> Result<Self, RuleError> {
        config.validate()?;
        Ok(Self { config })
    }

    pub fn config(&self) -> &ClassifierConfig {
        &self.config
    }

    /// Run every stage on one filename and report what each decided.
    pub fn classify_artifact(&self, repository: &str, filename: &str) -> ArtifactDecision {
        let mut decision = ArtifactDecision::new(filename);

        if let Some(marker) = self.config.filter.rejects(filename) {
            debug!(filename, marker, "skipping release sidecar");
            decision.filtered_by = Some(marker.to_string());
            return decision;
        }

        let format = Format::detect(filename);
        decision.format = Some(format);

        let Some(span) = semver::locate(filename, format) else {
            info!(filename, "no semantic version found");
            decision.diagnostics.push(DiagnosticReason::UnrecognizedVersion);
            return decision;
        };
        decision.version = Some(span.version(filename).to_string());

        let correction = correct_product_name(filename, format, &span, &self.config.docker_cruft);
        if correction.failed {
            warn!(filename, %format, "could not correct product name, using it as found");
            decision.diagnostics.push(DiagnosticReason::CorrectionFailed {
                format,
                product_name: correction.product_name.clone(),
            });
        }
        decision.product_name = Some(correction.product_name);

        match self.config.variants.classify(filename, repository) {
            Some(tag) => decision.variant = Some(tag.to_string()),
            None => {
                warn!(filename, repository, "no variant rule matched");
                decision.diagnostics.push(DiagnosticReason::UnclassifiedArtifact {
                    repository: repository.to_string(),
                });
            }
        }

        decision
    }

    /// Group a repository's complete artifact list.
    pub fn group<S: AsRef<str>>(&self, repository: &str, filenames: &[S]) -> GroupingOutcome {
        self.group_by(repository, filenames, self.config.group_by)
    }

    /// Group with an explicit key instead of the configured one.
    pub fn group_by<S: AsRef<str>>(
        &self,
        repository: &str,
        filenames: &[S],
        group_by: GroupBy,
    ) -> GroupingOutcome {
        let mut outcome = GroupingOutcome::new(repository, group_by);

        for filename in filenames {
            let filename = filename.as_ref();
            let decision = self.classify_artifact(repository, filename);

            if decision.filtered_by.is_some() {
                outcome.filtered.push(filename.to_string());
                continue;
            }

            let grouped = decision.is_grouped();
            for reason in decision.diagnostics {
                outcome.diagnostics.push(Diagnostic {
                    filename: filename.to_string(),
                    reason,
                });
            }

            if !grouped {
                continue;
            }
            if let (Some(product), Some(variant)) = (&decision.product_name, &decision.variant) {
                outcome.insert(group_by.key(product, variant), filename);
            }
        }

        debug!(
            repository,
            groups = outcome.groups.len(),
            grouped = outcome.grouped_count(),
            filtered = outcome.filtered.len(),
            diagnostics = outcome.diagnostics.len(),
            "grouped artifacts"
        );

        outcome
    }
}
