//! Per-artifact decisions and diagnostics.

use serde::{Deserialize, Serialize};

use crate::format::Format;

/// Why a filename needs attention.
///
/// Diagnostics never abort a batch. Only `CorrectionFailed` leaves the
/// artifact in the grouped result.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(tag = "type", content = "detail")]
pub enum DiagnosticReason {
    /// No `MAJOR.MINOR.PATCH` in the filename.
    #[serde(rename = "UNRECOGNIZED_VERSION")]
    UnrecognizedVersion,

    /// The format's name/version delimiter was missing; the name was used
    /// uncorrected.
    #[serde(rename = "CORRECTION_FAILED")]
    CorrectionFailed { format: Format, product_name: String },

    /// No variant rule of the repository matched.
    #[serde(rename = "UNCLASSIFIED_ARTIFACT")]
    UnclassifiedArtifact { repository: String },
}

impl DiagnosticReason {
    /// Get a machine-readable string representation.
    pub fn to_code(&self) -> String {
        match self {
            DiagnosticReason::UnrecognizedVersion => "UNRECOGNIZED_VERSION".to_string(),
            DiagnosticReason::CorrectionFailed { format, .. } => {
                format!("CORRECTION_FAILED:{}", format)
            }
            DiagnosticReason::UnclassifiedArtifact { repository } => {
                format!("UNCLASSIFIED_ARTIFACT:{}", repository)
            }
        }
    }

    /// Whether the artifact is left out of the grouped result.
    pub fn excludes_artifact(&self) -> bool {
        !matches!(self, DiagnosticReason::CorrectionFailed { .. })
    }
}

/// A diagnostic tied to the filename that produced it.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Diagnostic {
    pub filename: String,
    pub reason: DiagnosticReason,
}

impl Diagnostic {
    pub fn to_code(&self) -> String {
        format!("{}:{}", self.filename, self.reason.to_code())
    }
}

/// Everything the pipeline decided about one filename.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct ArtifactDecision {
    pub filename: String,

    /// Sidecar marker that filtered the filename out.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub filtered_by: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub format: Option<Format>,

    /// Version with its suffix as found in the filename.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub version: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub product_name: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub variant: Option<String>,

    #[serde(default)]
    pub diagnostics: Vec<DiagnosticReason>,
}

impl ArtifactDecision {
    pub(crate) fn new(filename: &str) -> Self {
        Self {
            filename: filename.to_string(),
            filtered_by: None,
            format: None,
            version: None,
            product_name: None,
            variant: None,
            diagnostics: Vec::new(),
        }
    }

    /// True when the artifact lands in a group.
    pub fn is_grouped(&self) -> bool {
        self.filtered_by.is_none()
            && self.product_name.is_some()
            && self.variant.is_some()
            && !self.diagnostics.iter().any(DiagnosticReason::excludes_artifact)
    }
}
