//! Build context resolution
//!
//! The repository identifier the classifier needs, plus the branch, commit
//! and run that produced the artifacts, come from explicit flags first and
//! the CI environment second. The environment is captured once at startup
//! into an [`EnvSnapshot`] and passed in, so resolution is a pure function
//! and tests never touch process state.
//!
//! Precedence per field:
//!
//! | field      | 1st          | 2nd                               | 3rd                      |
//! |------------|--------------|-----------------------------------|--------------------------|
//! | branch     | `--branch`   | `GITHUB_HEAD_REF`                 | `GITHUB_REF` minus `refs/heads/` |
//! | sha        | `--sha`      | `GITHUB_SHA`                      |                          |
//! | org        | `--org`      | owner in `GITHUB_REPOSITORY`      | config `default_org`     |
//! | repository | `--repository` | name in `GITHUB_REPOSITORY`     | error                    |
//! | run_id     | `--run-id`   | `GITHUB_RUN_ID`                   |                          |

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Process environment captured at startup.
///
/// Empty values count as unset.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct EnvSnapshot {
    vars: BTreeMap<String, String>,
}

impl EnvSnapshot {
    pub fn capture() -> Self {
        Self {
            vars: std::env::vars().collect(),
        }
    }

    pub fn from_pairs<I, K, V>(pairs: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<String>,
    {
        Self {
            vars: pairs
                .into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        }
    }

    pub fn get(&self, key: &str) -> Option<&str> {
        self.vars
            .get(key)
            .map(String::as_str)
            .filter(|v| !v.is_empty())
    }
}

/// Values given explicitly on the command line.
#[derive(Debug, Clone, Default)]
pub struct ContextInputs {
    pub branch: Option<String>,
    pub sha: Option<String>,
    pub org: Option<String>,
    pub repository: Option<String>,
    pub run_id: Option<String>,
}

/// Where the artifacts came from.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BuildContext {
    pub repository: String,
    pub org: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub branch: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sha: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub run_id: Option<String>,
}

/// Build context errors
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ContextError {
    #[error("no repository given: pass --repository or set GITHUB_REPOSITORY")]
    MissingRepository,

    #[error("GITHUB_REPOSITORY must look like 'owner/name', got '{0}'")]
    MalformedRepository(String),
}

impl BuildContext {
    pub fn resolve(
        inputs: &ContextInputs,
        env: &EnvSnapshot,
        default_org: &str,
    ) -> Result<Self, ContextError> {
        let explicit = |value: &Option<String>| -> Option<String> {
            value.as_deref().filter(|v| !v.is_empty()).map(str::to_string)
        };

        let github_repository = match env.get("GITHUB_REPOSITORY") {
            Some(full) => match full.split_once('/') {
                Some((owner, name)) if !owner.is_empty() && !name.is_empty() => {
                    Some((owner.to_string(), name.to_string()))
                }
                _ => None,
            },
            None => None,
        };

        let repository = match explicit(&inputs.repository) {
            Some(repository) => repository,
            None => match (&github_repository, env.get("GITHUB_REPOSITORY")) {
                (Some((_, name)), _) => name.clone(),
                (None, Some(raw)) => return Err(ContextError::MalformedRepository(raw.to_string())),
                (None, None) => return Err(ContextError::MissingRepository),
            },
        };

        let org = explicit(&inputs.org)
            .or_else(|| github_repository.as_ref().map(|(owner, _)| owner.clone()))
            .unwrap_or_else(|| default_org.to_string());

        let branch = explicit(&inputs.branch)
            .or_else(|| env.get("GITHUB_HEAD_REF").map(str::to_string))
            .or_else(|| {
                env.get("GITHUB_REF")
                    .map(|r| r.strip_prefix("refs/heads/").unwrap_or(r).to_string())
            });

        let sha = explicit(&inputs.sha).or_else(|| env.get("GITHUB_SHA").map(str::to_string));
        let run_id =
            explicit(&inputs.run_id).or_else(|| env.get("GITHUB_RUN_ID").map(str::to_string));

        Ok(Self {
            repository,
            org,
            branch,
            sha,
            run_id,
        })
    }
}
