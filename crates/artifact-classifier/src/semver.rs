//! Semver locator.
//!
//! Finds the first `MAJOR.MINOR.PATCH` anchor in a filename and the run of
//! version characters that follows it (`~dev`, `+ent.hsm`, `-1`, ...). The
//! run stops at the separator that introduces the architecture or file
//! extension, which depends on the packaging format.

use regex_lite::Regex;
use std::sync::OnceLock;

use crate::format::Format;

/// Semver core without leading zeros (except the literal `0`).
const ANCHOR_PATTERN: &str = r"(0|[1-9][0-9]*)\.(0|[1-9][0-9]*)\.(0|[1-9][0-9]*)";

fn anchor_regex() -> &'static Regex {
    static ANCHOR: OnceLock<Regex> = OnceLock::new();
    ANCHOR.get_or_init(|| Regex::new(ANCHOR_PATTERN).expect("semver anchor pattern compiles"))
}

/// Byte offsets of a located version inside a filename.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SemverSpan {
    /// Start of `MAJOR`.
    pub anchor_start: usize,
    /// End of `PATCH`.
    pub anchor_end: usize,
    /// End of the trailing pre-release/build run.
    pub end: usize,
}

impl SemverSpan {
    /// The version including its suffix, e.g. `1.13.0~dev-1`.
    pub fn version<'a>(&self, filename: &'a str) -> &'a str {
        &filename[self.anchor_start..self.end]
    }

    /// The bare `MAJOR.MINOR.PATCH` anchor.
    pub fn anchor<'a>(&self, filename: &'a str) -> &'a str {
        &filename[self.anchor_start..self.anchor_end]
    }

    /// Everything from the start of the filename through the version run.
    ///
    /// This is the candidate the product name correctors work on.
    pub fn through_version<'a>(&self, filename: &'a str) -> &'a str {
        &filename[..self.end]
    }
}

/// True when `s` contains a semver anchor anywhere.
pub fn has_anchor(s: &str) -> bool {
    anchor_regex().is_match(s)
}

/// Locate the first semver anchor and its trailing version run.
///
/// Returns `None` when the filename carries no `MAJOR.MINOR.PATCH`.
pub fn locate(filename: &str, format: Format) -> Option<SemverSpan> {
    let anchor = anchor_regex().find(filename)?;
    let (anchor_start, anchor_end) = (anchor.start(), anchor.end());

    let (limit, separator) = match format {
        Format::Rpm => (rpm_arch_boundary(filename, anchor_end), None),
        Format::DockerArchive | Format::Generic => (filename.len(), Some('_')),
    };

    let end = filename[anchor_end..limit]
        .char_indices()
        .find(|&(_, c)| Some(c) == separator || !is_version_char(c))
        .map(|(offset, _)| anchor_end + offset)
        .unwrap_or(limit);

    Some(SemverSpan {
        anchor_start,
        anchor_end,
        end,
    })
}

fn is_version_char(c: char) -> bool {
    c.is_ascii_alphanumeric() || matches!(c, '.' | '+' | '~' | '-')
}

/// Architecture names rpm puts between the release and `.rpm`.
const RPM_ARCHES: &[&str] = &[
    "noarch", "src", "x86_64", "i386", "i486", "i586", "i686", "athlon", "aarch64", "arm64",
    "armv6hl", "armv7hl", "armv7l", "armhfp", "ppc", "ppc64", "ppc64le", "s390", "s390x",
    "riscv64", "mips", "mipsel", "mips64", "mips64el", "loongarch64",
];

/// Offset of the `.` that opens the architecture token of an RPM name.
///
/// `consul-1.13.0~dev-1.aarch64.rpm` has its boundary before `aarch64`.
/// Without a known arch token after the last dot (`tool-1.2.3+ent.hsm.rpm`)
/// the whole stem is version.
fn rpm_arch_boundary(filename: &str, anchor_end: usize) -> usize {
    let stem = filename.strip_suffix(".rpm").unwrap_or(filename);
    match stem.rfind('.') {
        Some(dot) if dot >= anchor_end && RPM_ARCHES.contains(&&stem[dot + 1..]) => dot,
        _ => stem.len(),
    }
}
