//! Product name correction.
//!
//! Each packaging format spells `<name>_<version>` a little differently.
//! The correctors rewrite the name/version delimiter to `_`, drop Docker
//! platform tokens, and finally normalize the version suffix.

use serde::{Deserialize, Serialize};

use crate::format::Format;
use crate::semver::{self, SemverSpan};

/// Docker filename tokens that sit between the product name and the version.
///
/// Teams that change their image naming add their token here (or in the
/// `docker_cruft` config key).
pub const DEFAULT_DOCKER_CRUFT: &[&str] = &["default", "release", "release-default", "ubi"];

/// Outcome of correcting one filename.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Correction {
    /// Canonical product name, e.g. `consul_1.13.0-dev`.
    pub product_name: String,

    /// True when the format rule could not find its delimiter and the
    /// name was passed through uncorrected.
    pub failed: bool,
}

/// Correct the name/version portion of `filename` for its format.
pub fn correct_product_name(
    filename: &str,
    format: Format,
    span: &SemverSpan,
    docker_cruft: &[String],
) -> Correction {
    let candidate = span.through_version(filename);

    let (name, failed) = match format {
        Format::Generic => (candidate.to_string(), false),
        Format::Rpm => match correct_rpm(candidate, span.anchor_start) {
            Some(name) => (name, false),
            None => (candidate.to_string(), true),
        },
        Format::DockerArchive => (correct_docker(candidate, docker_cruft), false),
    };

    Correction {
        product_name: canonicalize(&name),
        failed,
    }
}

/// Post-processing shared by every format.
///
/// `~` pre-release markers become `-`, and a trailing `-1` package
/// revision is stripped once.
pub fn canonicalize(name: &str) -> String {
    let name = name.replace('~', "-");
    match name.strip_suffix("-1") {
        Some(stripped) => stripped.to_string(),
        None => name,
    }
}

/// RPMs put `-` between name and version. Only the delimiter nearest the
/// version matters since names like `vault-enterprise-hsm` contain `-` too.
///
/// Returns `None` when there is no delimiter before the version.
fn correct_rpm(candidate: &str, anchor_start: usize) -> Option<String> {
    let delimiter = candidate[..anchor_start].rfind(|c| c == '-' || c == '_')?;

    let mut name = String::with_capacity(candidate.len());
    name.push_str(&candidate[..delimiter]);
    name.push('_');
    name.push_str(&candidate[delimiter + 1..]);
    Some(name)
}

/// Drop platform tokens from `name_default_linux_amd64_1.2.3`.
///
/// Once a cruft token is seen, it and every token up to the next one
/// carrying a semver anchor are removed.
fn correct_docker(candidate: &str, cruft: &[String]) -> String {
    let mut tokens: Vec<&str> = candidate.split('_').collect();

    let mut i = 0;
    while i < tokens.len() {
        if cruft.iter().any(|c| c == tokens[i]) {
            while i < tokens.len() && !semver::has_anchor(tokens[i]) {
                tokens[i] = "";
                i += 1;
            }
        }
        i += 1;
    }

    tokens
        .into_iter()
        .filter(|t| !t.is_empty())
        .collect::<Vec<_>>()
        .join("_")
}
