//! Grouping keys and the grouped result.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;

use crate::error::RuleError;
use crate::result::Diagnostic;

/// Grouping key to artifacts, in input order. Duplicates are kept.
pub type GroupedResult = BTreeMap<String, Vec<String>>;

/// Which key artifacts are grouped under.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum GroupBy {
    /// Canonical product name, e.g. `vault_1.12.0-dev1+ent.hsm`.
    #[default]
    Product,
    /// Variant tag, e.g. `ent.hsm`.
    Variant,
    /// `<variant>/<product>`.
    ProductAndVariant,
}

impl GroupBy {
    pub fn key(&self, product_name: &str, variant: &str) -> String {
        match self {
            GroupBy::Product => product_name.to_string(),
            GroupBy::Variant => variant.to_string(),
            GroupBy::ProductAndVariant => format!("{}/{}", variant, product_name),
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            GroupBy::Product => "product",
            GroupBy::Variant => "variant",
            GroupBy::ProductAndVariant => "product_and_variant",
        }
    }
}

impl fmt::Display for GroupBy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for GroupBy {
    type Err = RuleError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "product" => Ok(GroupBy::Product),
            "variant" => Ok(GroupBy::Variant),
            "product_and_variant" => Ok(GroupBy::ProductAndVariant),
            other => Err(RuleError::UnknownGroupBy(other.to_string())),
        }
    }
}

/// Result of running the pipeline over one repository's artifact list.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct GroupingOutcome {
    pub repository: String,
    pub group_by: GroupBy,
    pub groups: GroupedResult,

    /// Non-fatal problems, in input order.
    #[serde(default)]
    pub diagnostics: Vec<Diagnostic>,

    /// Sidecar files dropped by the artifact filter.
    #[serde(default)]
    pub filtered: Vec<String>,
}

impl GroupingOutcome {
    pub fn new(repository: &str, group_by: GroupBy) -> Self {
        Self {
            repository: repository.to_string(),
            group_by,
            groups: GroupedResult::new(),
            diagnostics: Vec::new(),
            filtered: Vec::new(),
        }
    }

    pub(crate) fn insert(&mut self, key: String, filename: &str) {
        self.groups.entry(key).or_default().push(filename.to_string());
    }

    /// Number of artifacts placed in groups.
    pub fn grouped_count(&self) -> usize {
        self.groups.values().map(Vec::len).sum()
    }

    /// True when no diagnostics were recorded.
    pub fn is_clean(&self) -> bool {
        self.diagnostics.is_empty()
    }

    pub fn diagnostic_codes(&self) -> Vec<String> {
        self.diagnostics.iter().map(Diagnostic::to_code).collect()
    }
}
