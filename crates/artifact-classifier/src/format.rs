//! Packaging format detection.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Packaging format of a release artifact.
///
/// The format decides which separator ends the version run and which
/// correction rule turns the raw name into a canonical product name.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Format {
    /// RPM package (`name-version-release.arch.rpm`).
    Rpm,
    /// Docker image tarball (`name_default_os_arch_version_sha.docker.tar`).
    DockerArchive,
    /// Everything else: debs, zips, plain tarballs.
    Generic,
}

impl Format {
    /// Detect the format from substrings of the filename.
    ///
    /// This is a substring test, not an extension parse. `rpm` wins over
    /// `docker`, so a name carrying both tokens is treated as an RPM.
    pub fn detect(filename: &str) -> Self {
        if filename.contains("rpm") {
            Format::Rpm
        } else if filename.contains("docker") {
            Format::DockerArchive
        } else {
            Format::Generic
        }
    }

    /// Short lowercase name used in diagnostic codes.
    pub fn as_str(&self) -> &'static str {
        match self {
            Format::Rpm => "rpm",
            Format::DockerArchive => "docker",
            Format::Generic => "generic",
        }
    }
}

impl fmt::Display for Format {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
