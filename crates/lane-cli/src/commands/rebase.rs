//! `lane rebase` - rebase the current branch onto its target, and continue
//! parked rebases.

use anyhow::{bail, Context, Result};

use lane_core::rebase::RebasePhase;
use lane_core::{resolve_target, BranchSet};
use lane_git::GitBackend;

use super::utils::{confirm, Workspace};
use super::RebaseArgs;
use crate::output;
use crate::services::{ContinueOutcome, RebaseOutcome, RebaseService, StatusService};

/// Run the rebase command.
pub fn run(args: &RebaseArgs) -> Result<()> {
    let ws = Workspace::open()?;
    let service = RebaseService::new(&ws.git);
    let branch = ws.git.current_branch().context("not on a branch")?;

    if args.continue_ {
        return run_continue(&ws, &service, &branch, args.yes);
    }

    match service.phase() {
        RebasePhase::Idle => {}
        RebasePhase::UnresolvedConflicts => {
            bail!("a rebase is already in progress with unresolved conflicts")
        }
        RebasePhase::ResolvedUncommitted => {
            bail!("a rebase is already in progress - run `lane rebase --continue`")
        }
    }

    let branches = BranchSet::from_lists(ws.git.local_branches(), ws.git.remote_branches());
    let settings = ws.settings();
    let target = match args.target.clone() {
        Some(t) => t,
        None => resolve_target(
            &branch,
            branches.targets(),
            settings.last_target_branch().as_deref(),
            &ws.companion(),
        )
        .context("no target branch could be resolved - pass --target")?,
    };

    let status = StatusService::new(&ws.git);
    if !status.branch_needs_rebase(&branch, &target, branches.has_remote(&branch)) {
        output::info(&format!(
            "'{branch}' already contains origin/{target} - no rebase needed"
        ));
        return Ok(());
    }

    let question = format!("'{branch}' is behind {target} - rebase now?");
    if !confirm(&question, args.yes) {
        output::info("aborted");
        return Ok(());
    }

    let spinner = output::spinner(&format!("rebasing onto origin/{target}..."));
    let outcome = service.rebase_onto_target(&branch, &target)?;
    spinner.finish_and_clear();

    match outcome {
        RebaseOutcome::UpToDate => output::info(&format!("'{branch}' is already up to date")),
        RebaseOutcome::Rebased => output::success(&format!("rebased '{branch}' onto origin/{target}")),
        RebaseOutcome::Conflict => {
            output::warn("rebase stopped on conflicts");
            output::info("resolve the conflicted files, then run `lane rebase --continue`");
        }
        RebaseOutcome::Failed(msg) => bail!("rebase failed: {msg}"),
    }

    Ok(())
}

fn run_continue<G: GitBackend>(
    ws: &Workspace,
    service: &RebaseService<'_, G>,
    branch: &str,
    yes: bool,
) -> Result<()> {
    match service.phase() {
        RebasePhase::Idle => bail!("no rebase in progress"),
        RebasePhase::UnresolvedConflicts => {
            bail!("conflicts are not fully resolved yet - finish resolving them first")
        }
        RebasePhase::ResolvedUncommitted => {}
    }

    let question =
        format!("Commit the resolved conflicts and force-push '{branch}' (with lease)?");
    if !confirm(&question, yes) {
        output::info("aborted");
        return Ok(());
    }

    let spinner = output::spinner("continuing rebase...");
    let outcome = service.continue_and_push(branch, &ws.gate());
    spinner.finish_and_clear();

    match outcome {
        ContinueOutcome::Pushed => {
            output::success(&format!("rebase finished and '{branch}' force-pushed (with lease)"));
        }
        ContinueOutcome::Conflict => {
            output::warn("the next commit hit conflicts too");
            output::info("resolve them, then run `lane rebase --continue` again");
        }
        ContinueOutcome::ContinueFailed(msg) => bail!("rebase --continue failed: {msg}"),
        ContinueOutcome::PushFailed(msg) => bail!("rebase finished but the push failed: {msg}"),
    }

    Ok(())
}
