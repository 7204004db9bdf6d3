//! `lane push` - push with interactive rejection handling.

use anyhow::{bail, Context, Result};

use lane_core::branch::validate_branch_name;
use lane_core::push::{ConflictChoice, PushState};
use lane_git::{CancelToken, GitBackend};

use super::utils::{confirm, Workspace};
use super::PushArgs;
use crate::output;
use crate::services::PushService;

const CHOICE_REBASE: &str = "Rebase onto the remote branch (you haven't pulled its latest commits)";
const CHOICE_FORCE: &str = "Force-push with lease (you already rebased locally)";

/// Run the push command.
pub fn run(args: &PushArgs) -> Result<()> {
    let ws = Workspace::open()?;
    let branch = match args.branch.clone() {
        Some(b) => b,
        None => ws
            .git
            .current_branch()
            .context("not on a branch and no branch argument given")?,
    };
    validate_branch_name(&branch)?;

    let gate = ws.gate();

    if args.force {
        if !confirm(&format!("Force-push '{branch}' (with lease)?"), args.yes) {
            output::info("aborted");
            return Ok(());
        }
        let spinner = output::spinner(&format!("force-pushing {branch}..."));
        let out = gate.with_network(|| ws.git.force_push_with_lease(&branch));
        spinner.finish_and_clear();
        if !out.is_success() {
            bail!("force-push failed: {}", out.err_msg());
        }
        output::success(&format!("force-pushed '{branch}' (with lease)"));
        return Ok(());
    }

    if !confirm(&format!("Push '{branch}'?"), args.yes) {
        output::info("aborted");
        return Ok(());
    }

    let token = CancelToken::new();
    let spinner = output::spinner(&format!("pushing {branch}..."));
    let report = PushService::new(&ws.git).push_with_resolution(&branch, &token, &gate, || {
        spinner.finish_and_clear();
        prompt_choice()
    });
    spinner.finish_and_clear();

    match report.state {
        PushState::Success => output::success(&report.detail),
        PushState::ConflictDetected => {
            output::warn(&report.detail);
            output::info("resolve the conflicted files, then run `lane rebase --continue`");
        }
        PushState::Rejected => output::warn(&report.detail),
        _ => bail!("push failed: {}", report.detail),
    }

    Ok(())
}

/// The binary rejected-push choice. Escaping the prompt abandons the
/// operation; a fresh `lane push` is always a new attempt.
fn prompt_choice() -> Option<ConflictChoice> {
    output::warn("push rejected - the remote branch has commits you don't have locally");
    if !output::is_interactive() {
        return None;
    }
    let selection = inquire::Select::new(
        "How do you want to resolve it?",
        vec![CHOICE_REBASE, CHOICE_FORCE],
    )
    .prompt()
    .ok()?;

    match selection {
        CHOICE_REBASE => Some(ConflictChoice::Rebase),
        CHOICE_FORCE => Some(ConflictChoice::ForcePush),
        _ => None,
    }
}
