//! `lane pr` - create a pull request with workflow checks.

use anyhow::{bail, Context, Result};

use lane_core::rebase::RebasePhase;
use lane_core::{branch, project};

use super::utils::{confirm, Workspace};
use super::PrArgs;
use crate::output;
use crate::services::{Advisory, PrPlan, PrService};

/// Run the pr command.
pub fn run(args: &PrArgs) -> Result<()> {
    let ws = Workspace::open()?;
    let settings = ws.settings();
    let gh = ws.gh();
    let service = PrService::new(&ws.git, &gh, &settings);

    let plan = service.plan(args.source.as_deref(), args.target.as_deref())?;
    branch::validate_branch_name(&plan.source)?;

    for advisory in &plan.advisories {
        render_advisory(advisory);
    }

    let target = select_target(&plan, args)?;
    branch::validate_branch_name(&target)?;

    if args.web {
        let url = plan
            .project_url
            .as_deref()
            .map(|base| project::compare_url(base, &target, &plan.source))
            .context("no project URL known - set one with `lane config set project-url <url>`")?;
        output::essential(&url);
        return Ok(());
    }

    if !gh.is_available() {
        // No gh binary: fall back to the compare page like --web.
        output::warn("GitHub CLI (gh) not found - printing the compare URL instead");
        let url = service
            .compare_url(&plan, &target)
            .context("no project URL known - set one with `lane config set project-url <url>`")?;
        output::essential(&url);
        return Ok(());
    }

    let question = format!("Create PR {} -> {}?", plan.source, target);
    if !confirm(&question, args.yes) {
        output::info("aborted");
        return Ok(());
    }

    let title = args.title.clone().unwrap_or_else(|| plan.source.clone());
    let spinner = output::spinner("creating pull request...");
    let outcome = service.create(&plan.source, &target, &title);
    spinner.finish_and_clear();

    if let Some(err) = outcome.error {
        bail!("PR creation failed: {err}");
    }
    if outcome.created {
        output::success(&format!("created PR {} -> {}", plan.source, target));
    } else {
        output::info("a PR for this branch already exists");
    }
    match outcome.url {
        Some(url) => output::essential(&url),
        None => {
            if let Some(url) = service.compare_url(&plan, &target) {
                output::detail(&url);
            }
        }
    }

    Ok(())
}

fn render_advisory(advisory: &Advisory) {
    match advisory {
        Advisory::SourceNotPushed { branch, has_remote, unpushed } => {
            if *has_remote {
                output::warn(&format!(
                    "'{branch}' has {unpushed} unpushed commit(s) - run `lane push` first"
                ));
            } else {
                output::warn(&format!("'{branch}' was never pushed - run `lane push` first"));
            }
        }
        Advisory::RebaseNeeded { target } => {
            output::warn(&format!(
                "source branch is behind {target} - consider `lane rebase` first"
            ));
        }
        Advisory::RebaseInProgress { phase } => match phase {
            RebasePhase::UnresolvedConflicts => {
                output::warn("a rebase is parked on unresolved conflicts - resolve them first");
            }
            RebasePhase::ResolvedUncommitted | RebasePhase::Idle => {
                output::warn("a rebase is parked - run `lane rebase --continue`");
            }
        },
        Advisory::UnconventionalName { branch } => {
            output::warn(&format!("'{branch}' doesn't follow the naming convention - double-check it"));
        }
        Advisory::TargetMissing { target, base } => {
            output::warn(&format!(
                "target '{target}' doesn't exist remotely - create it with `lane feature --name {target} --base {base}`"
            ));
        }
    }
}

/// Pick the target: an explicit flag wins, otherwise the proposed one is
/// offered interactively with the remote list to choose from.
fn select_target(plan: &PrPlan, args: &PrArgs) -> Result<String> {
    if let Some(target) = args.target.as_deref() {
        return Ok(target.trim().to_string());
    }

    let candidates = plan.branches.targets();
    if candidates.is_empty() {
        bail!("no remote branches to target - push a branch first");
    }

    let proposed = plan.target.clone();
    if args.yes || !output::is_interactive() {
        return proposed.context("no target could be resolved - pass --target");
    }

    let start = proposed
        .as_deref()
        .and_then(|p| candidates.iter().position(|c| c == p))
        .unwrap_or(0);
    let choice = inquire::Select::new("Target branch:", candidates.to_vec())
        .with_starting_cursor(start)
        .prompt()
        .context("no target selected")?;
    Ok(choice)
}
