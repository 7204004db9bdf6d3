//! Static configuration defaults loaded from `config.toml`.
//!
//! The config file holds machine-level defaults (tool paths, the personal
//! suffix, the feature base). Mutable per-project state lives in the
//! [`crate::settings`] store, which takes precedence over these values.

use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::Result;

/// Lane configuration, typically at `<config dir>/lane/config.toml`.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    /// General settings.
    #[serde(default)]
    pub general: GeneralConfig,

    /// External tool locations.
    #[serde(default)]
    pub tools: ToolsConfig,

    /// Branch-naming settings.
    #[serde(default)]
    pub branch: BranchConfig,
}

impl Config {
    /// Load config from a TOML file. A missing file yields the defaults.
    ///
    /// # Errors
    /// Returns error if the file exists but can't be read or parsed.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        if !path.exists() {
            return Ok(Self::default());
        }

        let content = fs::read_to_string(path)?;
        let config: Self = toml::from_str(&content)?;
        Ok(config)
    }
}

/// General Lane settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GeneralConfig {
    /// Remote that pushes and branch listings go through.
    #[serde(default = "default_remote")]
    pub remote: String,
}

impl Default for GeneralConfig {
    fn default() -> Self {
        Self { remote: default_remote() }
    }
}

fn default_remote() -> String {
    "origin".into()
}

/// Paths of the external CLIs Lane drives.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ToolsConfig {
    /// Path to the `gh` binary; discovered on `$PATH` when unset.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub gh_path: Option<String>,

    /// Path to the network-gate CLI; the gate is skipped when unset and
    /// nothing is found on `$PATH`.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub gate_path: Option<String>,
}

/// Branch-naming defaults.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct BranchConfig {
    /// Personal suffix stripped when deriving companion branch names.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub personal_suffix: Option<String>,

    /// Default base ref for new feature branches.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub feature_base: Option<String>,
}
