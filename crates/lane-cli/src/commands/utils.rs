//! Shared command helpers: opening the workspace and its collaborators.

use anyhow::{Context, Result};
use directories::ProjectDirs;
use tracing::debug;

use lane_core::{Companion, Config, JsonFileSettings, ProjectKey, WorkflowSettings};
use lane_gh::GhCli;
use lane_git::netgate::NetGate;
use lane_git::{GateCli, GitBackend, GitCli};

/// Environment variable overriding the config file location (tests).
const CONFIG_PATH_ENV: &str = "LANE_CONFIG_PATH";

/// Everything a command needs: the git backend, the settings store, the
/// config defaults and the project key binding them together.
pub struct Workspace {
    pub git: GitCli,
    pub store: JsonFileSettings,
    pub config: Config,
    pub project: ProjectKey,
}

impl Workspace {
    /// Open the workspace for the current directory.
    ///
    /// # Errors
    /// Fails outside a git repository or when config/settings locations are
    /// unusable.
    pub fn open() -> Result<Self> {
        let cwd = std::env::current_dir().context("cannot determine current directory")?;
        let git = GitCli::discover(&cwd).context("not inside a git repository")?;

        let config = load_config().context("failed to load config")?;
        let git = git.with_remote(config.general.remote.clone());

        let store = JsonFileSettings::open_default().context("failed to open settings store")?;
        let project = ProjectKey::derive(git.remote_url().as_deref(), git.workdir());
        debug!(workdir = %git.workdir().display(), project = project.as_str(), "workspace opened");

        Ok(Self { git, store, config, project })
    }

    /// Typed settings view bound to this project.
    #[must_use]
    pub fn settings(&self) -> WorkflowSettings<'_, JsonFileSettings> {
        WorkflowSettings::new(&self.store, &self.config, self.project.clone())
    }

    /// Companion-name derivation honoring the configured personal suffix.
    #[must_use]
    pub fn companion(&self) -> Companion {
        Companion::new(self.settings().personal_suffix().as_deref())
    }

    /// Network gate for push operations.
    #[must_use]
    pub fn gate(&self) -> NetGate<GateCli> {
        NetGate::discover(self.settings().gate_path().as_deref(), self.git.workdir())
    }

    /// GitHub CLI client.
    #[must_use]
    pub fn gh(&self) -> GhCli {
        GhCli::new(self.git.workdir(), self.settings().gh_path().as_deref())
    }
}

fn load_config() -> lane_core::Result<Config> {
    if let Ok(path) = std::env::var(CONFIG_PATH_ENV) {
        return Config::load(path);
    }
    let Some(dirs) = ProjectDirs::from("dev", "lane", "lane") else {
        return Ok(Config::default());
    };
    Config::load(dirs.config_dir().join("config.toml"))
}

/// Ask a yes/no question. Skips the prompt with `assume_yes`; declines on
/// non-interactive terminals, which must opt in with `--yes`.
pub fn confirm(message: &str, assume_yes: bool) -> bool {
    if assume_yes {
        return true;
    }
    if !crate::output::is_interactive() {
        return false;
    }
    inquire::Confirm::new(message)
        .with_default(false)
        .prompt()
        .unwrap_or(false)
}
