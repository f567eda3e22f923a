//! Release metadata - canonical product names and variant groups for
//! release artifacts
//!
//! This crate wraps the `artifact-classifier` engine with the pieces a CI
//! job needs: layered configuration, build context from the CI
//! environment, and JSON/human reports.

pub mod config;
pub mod context;
pub mod report;

pub use artifact_classifier::{
    ArtifactClassifier, ArtifactDecision, ArtifactFilter, ClassifierConfig, Diagnostic,
    DiagnosticReason, Format, GroupBy, GroupedResult, GroupingOutcome, RepositoryRules, RuleError,
    VariantRule, VariantRules,
};
pub use config::{ConfigError, EffectiveConfig};
pub use context::{BuildContext, ContextError, ContextInputs, EnvSnapshot};
pub use report::{ExplainOutput, GroupingReport};
