//! Artifact filter for release sidecar files.

use serde::Serialize;

use crate::error::RuleError;

/// Substrings marking metadata, signature and checksum sidecars.
pub const DEFAULT_FILTER_MARKERS: &[&str] = &[".json", ".sig", "_SHA256SUMS"];

/// Drops filenames that are not distributable artifacts.
///
/// The default markers are always present; configuration can only add to
/// them.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ArtifactFilter {
    markers: Vec<String>,
}

impl Default for ArtifactFilter {
    fn default() -> Self {
        Self {
            markers: DEFAULT_FILTER_MARKERS.iter().map(|m| m.to_string()).collect(),
        }
    }
}

impl ArtifactFilter {
    /// Default markers plus `extra`, in that order, without duplicates.
    pub fn with_extra_markers<I, S>(extra: I) -> Result<Self, RuleError>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let mut filter = Self::default();
        for marker in extra {
            let marker = marker.into();
            if marker.is_empty() {
                return Err(RuleError::EmptyFilterMarker);
            }
            if !filter.markers.contains(&marker) {
                filter.markers.push(marker);
            }
        }
        Ok(filter)
    }

    /// The marker that rejects `filename`, if any.
    pub fn rejects(&self, filename: &str) -> Option<&str> {
        self.markers
            .iter()
            .find(|m| filename.contains(m.as_str()))
            .map(String::as_str)
    }

    pub fn markers(&self) -> &[String] {
        &self.markers
    }
}
