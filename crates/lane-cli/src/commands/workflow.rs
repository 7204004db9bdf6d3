//! `lane workflow` - print the dev-deploy workflow page URL.

use anyhow::{Context, Result};

use lane_core::project;
use lane_git::GitBackend;

use super::utils::Workspace;
use crate::output;
use crate::services;

/// Run the workflow command.
pub fn run() -> Result<()> {
    let ws = Workspace::open()?;
    let settings = ws.settings();

    let project_url = services::ensure_project_url(&ws.git, &settings)
        .context("no project URL known - set one with `lane config set project-url <url>`")?;

    if let Some(branch) = ws.git.current_branch() {
        output::info(&format!("current branch: {branch}"));
    }
    output::essential(&project::deploy_workflow_url(&project_url));

    Ok(())
}
