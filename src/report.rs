//! Report output for grouping and explain runs
//!
//! Both reports render as pretty JSON for automation and as plain text for
//! people reading CI logs.

use artifact_classifier::{
    ArtifactDecision, DiagnosticReason, GroupBy, GroupedResult, GroupingOutcome, RepositoryRules,
};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

use crate::context::BuildContext;

/// Counts shown at the top of a grouping report.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct ReportSummary {
    pub input: usize,
    pub grouped: usize,
    pub filtered: usize,
    pub diagnostics: usize,
    /// Distinct artifacts with at least one diagnostic.
    pub flagged: usize,
    pub groups: usize,
}

/// A diagnostic flattened for output.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct ReportDiagnostic {
    pub filename: String,
    pub code: String,
    pub message: String,
}

/// Output of the `group` command.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GroupingReport {
    pub generated_at: DateTime<Utc>,
    pub context: BuildContext,
    pub group_by: GroupBy,
    pub summary: ReportSummary,
    pub groups: GroupedResult,
    pub diagnostics: Vec<ReportDiagnostic>,
    pub filtered: Vec<String>,
}

impl GroupingReport {
    pub fn new(context: BuildContext, input: usize, outcome: GroupingOutcome) -> Self {
        let diagnostics: Vec<ReportDiagnostic> = outcome
            .diagnostics
            .iter()
            .map(|d| ReportDiagnostic {
                filename: d.filename.clone(),
                code: d.reason.to_code(),
                message: describe(&d.reason),
            })
            .collect();

        let flagged: BTreeSet<&str> = diagnostics.iter().map(|d| d.filename.as_str()).collect();

        let summary = ReportSummary {
            input,
            grouped: outcome.grouped_count(),
            filtered: outcome.filtered.len(),
            diagnostics: diagnostics.len(),
            flagged: flagged.len(),
            groups: outcome.groups.len(),
        };

        Self {
            generated_at: Utc::now(),
            context,
            group_by: outcome.group_by,
            summary,
            groups: outcome.groups,
            diagnostics,
            filtered: outcome.filtered,
        }
    }

    pub fn has_diagnostics(&self) -> bool {
        !self.diagnostics.is_empty()
    }

    /// Format as JSON
    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(self)
    }

    /// Format as human-readable text
    pub fn to_human(&self) -> String {
        let mut lines = Vec::new();

        lines.push(format!(
            "Repository: {}/{}",
            self.context.org, self.context.repository
        ));
        if let Some(ref branch) = self.context.branch {
            lines.push(format!("Branch: {}", branch));
        }
        if let Some(ref sha) = self.context.sha {
            lines.push(format!("Revision: {}", sha));
        }
        lines.push(format!("Grouped by: {}", self.group_by));
        lines.push(format!(
            "Artifacts: {} in, {} grouped, {} filtered, {} flagged ({} diagnostics)",
            self.summary.input,
            self.summary.grouped,
            self.summary.filtered,
            self.summary.flagged,
            self.summary.diagnostics
        ));

        for (key, artifacts) in &self.groups {
            lines.push(String::new());
            lines.push(format!("{} ({})", key, artifacts.len()));
            for artifact in artifacts {
                lines.push(format!("  {}", artifact));
            }
        }

        if !self.diagnostics.is_empty() {
            lines.push(String::new());
            lines.push("Diagnostics:".to_string());
            for d in &self.diagnostics {
                lines.push(format!("  - {}: {}", d.filename, d.message));
            }
        }

        lines.join("\n")
    }
}

/// Output of the `explain` command.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ExplainOutput {
    pub repository: String,
    pub decision: ArtifactDecision,

    /// Rules the repository's artifacts are checked against. None when the
    /// repository uses the default tag.
    pub repository_rules: Option<RepositoryRules>,

    pub default_variant: String,
    pub explanation: String,
}

impl ExplainOutput {
    pub fn new(
        repository: &str,
        decision: ArtifactDecision,
        repository_rules: Option<RepositoryRules>,
        default_variant: &str,
    ) -> Self {
        let explanation = Self::generate_explanation(&decision);
        Self {
            repository: repository.to_string(),
            decision,
            repository_rules,
            default_variant: default_variant.to_string(),
            explanation,
        }
    }

    fn generate_explanation(decision: &ArtifactDecision) -> String {
        let mut lines = vec![format!("Artifact: {}", decision.filename), String::new()];

        if let Some(ref marker) = decision.filtered_by {
            lines.push(format!("Decision: FILTERED (contains '{}')", marker));
            return lines.join("\n");
        }

        lines.push(format!(
            "Decision: {}",
            if decision.is_grouped() { "GROUPED" } else { "EXCLUDED" }
        ));
        lines.push(String::new());

        if let Some(format) = decision.format {
            lines.push(format!("Format: {}", format));
        }
        if let Some(ref version) = decision.version {
            lines.push(format!("Version: {}", version));
        }
        if let Some(ref product) = decision.product_name {
            lines.push(format!("Product: {}", product));
        }
        if let Some(ref variant) = decision.variant {
            lines.push(format!("Variant: {}", variant));
        }

        if !decision.diagnostics.is_empty() {
            lines.push(String::new());
            lines.push("Diagnostics:".to_string());
            for reason in &decision.diagnostics {
                lines.push(format!("  - {}", describe(reason)));
            }
        }

        lines.join("\n")
    }

    /// Format as JSON
    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(self)
    }

    /// Format as human-readable text
    pub fn to_human(&self) -> String {
        let mut output = self.explanation.clone();
        output.push_str(&format!("\n\n--- Variant Rules ({}) ---\n", self.repository));

        match self.repository_rules {
            Some(ref repo) => {
                for (i, rule) in repo.rules.iter().enumerate() {
                    output.push_str(&format!(
                        "{}. [{}] -> {}\n",
                        i + 1,
                        rule.contains.join(" + "),
                        rule.tag
                    ));
                }
                match repo.fallback {
                    Some(ref fallback) => output.push_str(&format!("otherwise -> {}\n", fallback)),
                    None => output.push_str("otherwise -> unclassified\n"),
                }
            }
            None => output.push_str(&format!("every artifact -> {}\n", self.default_variant)),
        }

        output
    }
}

/// Format a diagnostic for human reading
fn describe(reason: &DiagnosticReason) -> String {
    match reason {
        DiagnosticReason::UnrecognizedVersion => {
            "No MAJOR.MINOR.PATCH version in the filename".to_string()
        }
        DiagnosticReason::CorrectionFailed {
            format,
            product_name,
        } => format!(
            "Could not find the {} name/version delimiter, using '{}' as found",
            format, product_name
        ),
        DiagnosticReason::UnclassifiedArtifact { repository } => {
            format!("No variant rule of '{}' matches", repository)
        }
    }
}
