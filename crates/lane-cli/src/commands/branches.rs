//! `lane branches` - list the local/remote/source branch sets.

use anyhow::Result;

use lane_core::BranchSet;
use lane_git::GitBackend;

use super::utils::Workspace;
use crate::output;

/// Run the branches command.
pub fn run(json: bool) -> Result<()> {
    let ws = Workspace::open()?;
    let set = BranchSet::from_lists(ws.git.local_branches(), ws.git.remote_branches());

    if json {
        output::essential(&serde_json::to_string_pretty(&set)?);
        return Ok(());
    }

    let current = ws.git.current_branch().unwrap_or_default();
    for branch in &set.source {
        let mut line = output::branch_line(branch, *branch == current);
        if !set.has_remote(branch) {
            line.push_str("  (local only)");
        } else if !set.has_local(branch) {
            line.push_str("  (remote only)");
        }
        output::detail(&line);
    }
    output::info(&format!(
        "{} local, {} remote, {} total",
        set.local.len(),
        set.remote.len(),
        set.source.len()
    ));

    Ok(())
}
