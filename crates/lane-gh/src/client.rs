//! PR backend implemented over the external `gh` CLI.

use std::path::PathBuf;
use std::sync::OnceLock;

use regex::Regex;
use tracing::debug;

use lane_git::exec;
use lane_git::CmdOutput;

use crate::traits::PrBackend;

/// [`PrBackend`] implementation shelling out to `gh`.
#[derive(Debug, Clone)]
pub struct GhCli {
    workdir: PathBuf,
    gh: Option<PathBuf>,
}

impl GhCli {
    /// Build a client for a repository directory, resolving the `gh` binary
    /// from the configured path or `$PATH`.
    #[must_use]
    pub fn new(workdir: impl Into<PathBuf>, configured_path: Option<&str>) -> Self {
        let gh = configured_path
            .map(PathBuf::from)
            .filter(|p| p.exists())
            .or_else(|| which::which("gh").ok());
        match &gh {
            Some(p) => debug!(path = %p.display(), "using gh"),
            None => debug!("gh binary not found"),
        }
        Self {
            workdir: workdir.into(),
            gh,
        }
    }

    /// Whether a usable `gh` binary was found.
    #[must_use]
    pub const fn is_available(&self) -> bool {
        self.gh.is_some()
    }
}

impl PrBackend for GhCli {
    fn create_pr(&self, title: &str, body: &str, source: &str, target: &str) -> CmdOutput {
        let Some(gh) = &self.gh else {
            return CmdOutput::spawn_failure(
                "GitHub CLI (gh) not found - install it or set `lane config set gh-path <path>`",
            );
        };
        exec::run(
            &self.workdir,
            &gh.to_string_lossy(),
            &[
                "pr", "create", "--title", title, "--body", body, "--base", target, "--head",
                source,
            ],
        )
    }
}

fn pr_url_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    #[allow(clippy::expect_used)]
    RE.get_or_init(|| Regex::new(r"https://github\.com/[^\s]+/pull/\d+").expect("static regex"))
}

/// Pull the PR URL out of `gh pr create` output, if present.
#[must_use]
pub fn extract_pr_url(text: &str) -> Option<String> {
    pr_url_re().find(text).map(|m| m.as_str().to_string())
}

/// Whether the backend refused because a PR for the branch already exists.
/// `gh` still prints the existing PR's URL in that message.
#[must_use]
pub fn pr_already_exists(out: &CmdOutput) -> bool {
    out.output.contains("already exists")
}
