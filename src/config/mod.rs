//! Configuration layers
//!
//! Implements the 4-layer configuration merge:
//! 1. Built-in defaults
//! 2. Host/user config (~/.config/release-metadata/config.toml)
//! 3. Repo config (.release/classifier.toml)
//! 4. CLI flags

mod defaults;
mod effective;
mod merge;
mod settings;

pub use defaults::{BuiltinDefaults, DEFAULT_ORG};
pub use effective::{ConfigError, ConfigOrigin, ConfigSource, EffectiveConfig, SCHEMA_ID};
pub use merge::{merge_into, merge_layers};
pub use settings::Settings;

use std::path::PathBuf;

use crate::context::EnvSnapshot;

/// Repo config path, relative to the working directory.
pub const DEFAULT_REPO_CONFIG: &str = ".release/classifier.toml";

/// Host config path under `$HOME`, if `HOME` is set.
pub fn default_host_config_path(env: &EnvSnapshot) -> Option<PathBuf> {
    env.get("HOME")
        .map(|home| PathBuf::from(home).join(".config/release-metadata/config.toml"))
}
