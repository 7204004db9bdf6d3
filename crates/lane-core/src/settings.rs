//! Workflow settings persistence.
//!
//! A flat string-to-string store behind the [`SettingsRepository`] trait, so
//! policy code receives settings by injection instead of reaching into a
//! global. Per-project values are namespaced with a [`ProjectKey`] derived
//! from the remote URL (or the project path for remoteless checkouts).

use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};

use directories::ProjectDirs;
use xxhash_rust::xxh3::xxh3_64;

use crate::config::Config;
use crate::error::{Error, Result};

/// Environment variable overriding the settings file location.
/// Integration tests point this at a temp file.
pub const SETTINGS_PATH_ENV: &str = "LANE_SETTINGS_PATH";

const KEY_PROJECT_URL: &str = "project_url";
const KEY_LAST_TARGET_BRANCH: &str = "last_target_branch";
const KEY_FEATURE_BASE_BRANCH: &str = "feature_base_branch";
const KEY_PERSONAL_SUFFIX: &str = "personal_branch_suffix";
const KEY_GH_PATH: &str = "gh_path";
const KEY_GATE_PATH: &str = "gate_path";

const DEFAULT_FEATURE_BASE: &str = "origin/main";

/// String key-value settings store.
///
/// Implementations persist however they like; [`JsonFileSettings`] is the
/// production one, tests use an in-memory map.
pub trait SettingsRepository {
    /// Read a value. A missing or unreadable store reads as absent.
    fn get(&self, key: &str) -> Option<String>;

    /// Write a value.
    ///
    /// # Errors
    /// Returns an error when the store cannot be persisted.
    fn set(&self, key: &str, value: &str) -> Result<()>;

    /// Delete a value, if present.
    ///
    /// # Errors
    /// Returns an error when the store cannot be persisted.
    fn remove(&self, key: &str) -> Result<()>;
}

/// Per-project namespace component for settings keys.
///
/// Derived from the remote URL when the repository has one, else from the
/// project path, hashed so keys stay short and path-separator free.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProjectKey(String);

impl ProjectKey {
    /// Derive the key for a project.
    #[must_use]
    pub fn derive(remote_url: Option<&str>, project_path: &Path) -> Self {
        let input = match remote_url {
            Some(url) if !url.trim().is_empty() => url.trim().to_string(),
            _ => project_path.to_string_lossy().into_owned(),
        };
        Self(format!("{:016x}", xxh3_64(input.as_bytes())))
    }

    /// The hex digest.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

/// JSON-file-backed settings store.
///
/// The whole store is one flat object of string values; every operation
/// re-reads the file so concurrent lane invocations see each other's writes.
#[derive(Debug, Clone)]
pub struct JsonFileSettings {
    path: PathBuf,
}

impl JsonFileSettings {
    /// Open a store at an explicit path.
    #[must_use]
    pub const fn new(path: PathBuf) -> Self {
        Self { path }
    }

    /// Open the default store: `$LANE_SETTINGS_PATH` when set, otherwise
    /// `settings.json` under the platform config directory.
    ///
    /// # Errors
    /// Returns [`Error::NoSettingsDir`] when the platform reports no home.
    pub fn open_default() -> Result<Self> {
        if let Ok(path) = std::env::var(SETTINGS_PATH_ENV) {
            return Ok(Self::new(PathBuf::from(path)));
        }
        let dirs = ProjectDirs::from("dev", "lane", "lane").ok_or(Error::NoSettingsDir)?;
        Ok(Self::new(dirs.config_dir().join("settings.json")))
    }

    /// Path of the backing file.
    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }

    fn load(&self) -> Result<BTreeMap<String, String>> {
        if !self.path.exists() {
            return Ok(BTreeMap::new());
        }
        let content = fs::read_to_string(&self.path)?;
        serde_json::from_str(&content).map_err(|e| Error::SettingsParse {
            file: self.path.clone(),
            message: e.to_string(),
        })
    }

    fn save(&self, map: &BTreeMap<String, String>) -> Result<()> {
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent)?;
        }
        let content = serde_json::to_string_pretty(map)?;
        fs::write(&self.path, content)?;
        Ok(())
    }
}

impl SettingsRepository for JsonFileSettings {
    fn get(&self, key: &str) -> Option<String> {
        self.load().ok()?.remove(key)
    }

    fn set(&self, key: &str, value: &str) -> Result<()> {
        let mut map = self.load().unwrap_or_default();
        map.insert(key.to_string(), value.to_string());
        self.save(&map)
    }

    fn remove(&self, key: &str) -> Result<()> {
        let mut map = self.load().unwrap_or_default();
        if map.remove(key).is_some() {
            self.save(&map)?;
        }
        Ok(())
    }
}

/// Settings addressable through [`WorkflowSettings`], for generic
/// read/clear access (the `lane config` surface).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SettingName {
    /// Project web URL (per project).
    ProjectUrl,
    /// Last manually chosen PR target (per project).
    LastTargetBranch,
    /// Base ref for new feature branches (per project).
    FeatureBaseBranch,
    /// Personal branch suffix (global).
    PersonalSuffix,
    /// Path to the `gh` binary (global).
    GhPath,
    /// Path to the network-gate CLI (global).
    GatePath,
}

/// Typed view over a settings store for one project.
///
/// Resolution order for values that also exist in the config file:
/// store first, then config, then the hardcoded default.
pub struct WorkflowSettings<'a, S: SettingsRepository + ?Sized> {
    store: &'a S,
    config: &'a Config,
    project: ProjectKey,
}

impl<'a, S: SettingsRepository + ?Sized> WorkflowSettings<'a, S> {
    /// Bind a store and config to a project.
    #[must_use]
    pub const fn new(store: &'a S, config: &'a Config, project: ProjectKey) -> Self {
        Self { store, config, project }
    }

    fn project_key(&self, base: &str) -> String {
        format!("{base}_{}", self.project.as_str())
    }

    fn storage_key(&self, name: SettingName) -> String {
        match name {
            SettingName::ProjectUrl => self.project_key(KEY_PROJECT_URL),
            SettingName::LastTargetBranch => self.project_key(KEY_LAST_TARGET_BRANCH),
            SettingName::FeatureBaseBranch => self.project_key(KEY_FEATURE_BASE_BRANCH),
            SettingName::PersonalSuffix => KEY_PERSONAL_SUFFIX.to_string(),
            SettingName::GhPath => KEY_GH_PATH.to_string(),
            SettingName::GatePath => KEY_GATE_PATH.to_string(),
        }
    }

    /// Clear a setting, reverting it to config/default resolution.
    ///
    /// # Errors
    /// Propagates store persistence failures.
    pub fn unset(&self, name: SettingName) -> Result<()> {
        self.store.remove(&self.storage_key(name))
    }

    /// The project's web URL (used for compare and workflow links).
    #[must_use]
    pub fn project_url(&self) -> Option<String> {
        self.store
            .get(&self.project_key(KEY_PROJECT_URL))
            .map(|u| u.trim().trim_end_matches('/').to_string())
            .filter(|u| !u.is_empty())
    }

    /// Persist the project's web URL.
    ///
    /// # Errors
    /// Propagates store persistence failures.
    pub fn set_project_url(&self, url: &str) -> Result<()> {
        self.store.set(&self.project_key(KEY_PROJECT_URL), url)
    }

    /// Last manually selected PR target branch.
    #[must_use]
    pub fn last_target_branch(&self) -> Option<String> {
        self.store
            .get(&self.project_key(KEY_LAST_TARGET_BRANCH))
            .filter(|b| !b.is_empty())
    }

    /// Remember the PR target the user picked.
    ///
    /// # Errors
    /// Propagates store persistence failures.
    pub fn set_last_target_branch(&self, branch: &str) -> Result<()> {
        self.store.set(&self.project_key(KEY_LAST_TARGET_BRANCH), branch)
    }

    /// Base ref that new feature branches are cut from.
    #[must_use]
    pub fn feature_base_branch(&self) -> String {
        self.store
            .get(&self.project_key(KEY_FEATURE_BASE_BRANCH))
            .filter(|b| !b.is_empty())
            .or_else(|| self.config.branch.feature_base.clone())
            .unwrap_or_else(|| DEFAULT_FEATURE_BASE.to_string())
    }

    /// Change the feature base branch.
    ///
    /// # Errors
    /// Propagates store persistence failures.
    pub fn set_feature_base_branch(&self, branch: &str) -> Result<()> {
        self.store.set(&self.project_key(KEY_FEATURE_BASE_BRANCH), branch)
    }

    /// Personal branch suffix stripped during companion derivation. Global,
    /// not per-project.
    #[must_use]
    pub fn personal_suffix(&self) -> Option<String> {
        self.store
            .get(KEY_PERSONAL_SUFFIX)
            .or_else(|| self.config.branch.personal_suffix.clone())
            .filter(|s| !s.trim().is_empty())
    }

    /// Set the personal branch suffix.
    ///
    /// # Errors
    /// Propagates store persistence failures.
    pub fn set_personal_suffix(&self, suffix: &str) -> Result<()> {
        self.store.set(KEY_PERSONAL_SUFFIX, suffix)
    }

    /// Configured path to the `gh` binary.
    #[must_use]
    pub fn gh_path(&self) -> Option<String> {
        self.store
            .get(KEY_GH_PATH)
            .or_else(|| self.config.tools.gh_path.clone())
            .filter(|p| !p.trim().is_empty())
    }

    /// Set the `gh` binary path.
    ///
    /// # Errors
    /// Propagates store persistence failures.
    pub fn set_gh_path(&self, path: &str) -> Result<()> {
        self.store.set(KEY_GH_PATH, path)
    }

    /// Configured path to the network-gate CLI.
    #[must_use]
    pub fn gate_path(&self) -> Option<String> {
        self.store
            .get(KEY_GATE_PATH)
            .or_else(|| self.config.tools.gate_path.clone())
            .filter(|p| !p.trim().is_empty())
    }

    /// Set the network-gate CLI path.
    ///
    /// # Errors
    /// Propagates store persistence failures.
    pub fn set_gate_path(&self, path: &str) -> Result<()> {
        self.store.set(KEY_GATE_PATH, path)
    }
}
