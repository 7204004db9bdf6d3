//! `lane config` - read and change workflow settings.

use anyhow::Result;

use lane_core::SettingName;

use super::utils::Workspace;
use super::{ConfigAction, SettingKey};
use crate::output;

const UNSET: &str = "(unset)";

/// Run the config command.
pub fn run(action: &ConfigAction) -> Result<()> {
    let ws = Workspace::open()?;
    let settings = ws.settings();

    match action {
        ConfigAction::Get { key } => {
            let value = read(&ws, *key);
            output::essential(value.as_deref().unwrap_or(UNSET));
        }
        ConfigAction::Set { key, value } => {
            let value = value.trim();
            match key {
                SettingKey::ProjectUrl => settings.set_project_url(value)?,
                SettingKey::LastTarget => settings.set_last_target_branch(value)?,
                SettingKey::FeatureBase => settings.set_feature_base_branch(value)?,
                SettingKey::Suffix => settings.set_personal_suffix(value)?,
                SettingKey::GhPath => settings.set_gh_path(value)?,
                SettingKey::GatePath => settings.set_gate_path(value)?,
            }
            output::success(&format!("set {}", key_label(*key)));
        }
        ConfigAction::Unset { key } => {
            settings.unset(setting_name(*key))?;
            output::success(&format!("cleared {}", key_label(*key)));
        }
        ConfigAction::List => {
            for key in [
                SettingKey::ProjectUrl,
                SettingKey::LastTarget,
                SettingKey::FeatureBase,
                SettingKey::Suffix,
                SettingKey::GhPath,
                SettingKey::GatePath,
            ] {
                let value = read(&ws, key);
                output::detail(&format!(
                    "{:<13} {}",
                    key_label(key),
                    value.as_deref().unwrap_or(UNSET)
                ));
            }
            output::info(&format!("store: {}", ws.store.path().display()));
        }
    }

    Ok(())
}

fn read(ws: &Workspace, key: SettingKey) -> Option<String> {
    let settings = ws.settings();
    match key {
        SettingKey::ProjectUrl => settings.project_url(),
        SettingKey::LastTarget => settings.last_target_branch(),
        SettingKey::FeatureBase => Some(settings.feature_base_branch()),
        SettingKey::Suffix => settings.personal_suffix(),
        SettingKey::GhPath => settings.gh_path(),
        SettingKey::GatePath => settings.gate_path(),
    }
}

const fn setting_name(key: SettingKey) -> SettingName {
    match key {
        SettingKey::ProjectUrl => SettingName::ProjectUrl,
        SettingKey::LastTarget => SettingName::LastTargetBranch,
        SettingKey::FeatureBase => SettingName::FeatureBaseBranch,
        SettingKey::Suffix => SettingName::PersonalSuffix,
        SettingKey::GhPath => SettingName::GhPath,
        SettingKey::GatePath => SettingName::GatePath,
    }
}

const fn key_label(key: SettingKey) -> &'static str {
    match key {
        SettingKey::ProjectUrl => "project-url",
        SettingKey::LastTarget => "last-target",
        SettingKey::FeatureBase => "feature-base",
        SettingKey::Suffix => "suffix",
        SettingKey::GhPath => "gh-path",
        SettingKey::GatePath => "gate-path",
    }
}
