//! `lane status` - workflow status of the current branch.

use anyhow::Result;

use lane_core::rebase::RebasePhase;

use super::utils::Workspace;
use crate::output;
use crate::services::StatusService;

/// Run the status command.
pub fn run(json: bool) -> Result<()> {
    let ws = Workspace::open()?;
    let settings = ws.settings();
    let report = StatusService::new(&ws.git)
        .report(&ws.companion(), settings.last_target_branch().as_deref());

    if json {
        output::essential(&serde_json::to_string_pretty(&report)?);
        return Ok(());
    }

    match report.current_branch.as_deref() {
        Some(branch) => output::info(&format!("on {} [{}]", branch, report.kind)),
        None => output::warn("not on a branch (detached HEAD)"),
    }

    if let Some(target) = report.proposed_target.as_deref() {
        output::info(&format!("proposed PR target: {target}"));
    } else {
        output::warn("no PR target available - no remote branches");
    }

    if !report.has_remote {
        output::warn("branch has no remote counterpart - run `lane push`");
    } else if report.unpushed > 0 {
        output::warn(&format!(
            "{} unpushed commit(s) - run `lane push`",
            report.unpushed
        ));
    }

    if report.needs_rebase {
        if let Some(target) = report.proposed_target.as_deref() {
            output::warn(&format!(
                "branch is behind {target} - run `lane rebase` first"
            ));
        }
    }

    match report.rebase_phase {
        RebasePhase::Idle => {}
        RebasePhase::UnresolvedConflicts => {
            output::warn("rebase conflicts not resolved - fix them, then `lane rebase --continue`");
        }
        RebasePhase::ResolvedUncommitted => {
            output::warn("rebase conflicts resolved - run `lane rebase --continue` to commit and push");
        }
    }

    Ok(())
}
