//! Rebase service: ancestry-checked rebases and the continue-after-conflicts
//! flow.

use anyhow::{bail, Result};

use lane_core::rebase::RebasePhase;
use lane_git::netgate::{GateControl, NetGate};
use lane_git::GitBackend;

/// Outcome of starting a rebase.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RebaseOutcome {
    /// Nothing to do - the source already contains the target.
    UpToDate,
    /// Rebase completed cleanly.
    Rebased,
    /// Rebase stopped on conflicts; manual resolution required.
    Conflict,
    /// Rebase failed for another reason.
    Failed(String),
}

/// Outcome of `--continue` after resolving conflicts.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ContinueOutcome {
    /// Rebase finished and the branch was force-pushed (with lease).
    Pushed,
    /// Still conflicted - more resolution needed.
    Conflict,
    /// `git rebase --continue` failed.
    ContinueFailed(String),
    /// The rebase finished but the push didn't.
    PushFailed(String),
}

/// Service for rebase operations with an injected git backend.
pub struct RebaseService<'a, G: GitBackend> {
    git: &'a G,
}

impl<'a, G: GitBackend> RebaseService<'a, G> {
    /// Create a new rebase service.
    #[must_use]
    pub const fn new(git: &'a G) -> Self {
        Self { git }
    }

    /// Current conflict phase of any parked rebase.
    #[must_use]
    pub fn phase(&self) -> RebasePhase {
        RebasePhase::derive(
            self.git.is_rebase_in_progress(),
            self.git.has_unresolved_conflicts(),
        )
    }

    /// Rebase `source` onto `origin/<target>`.
    ///
    /// # Errors
    /// Fails when `source` is not the checked-out branch - rebasing a branch
    /// out from under the working tree is never what the user wants.
    pub fn rebase_onto_target(&self, source: &str, target: &str) -> Result<RebaseOutcome> {
        if self.git.current_branch().as_deref() != Some(source) {
            bail!("switch to '{source}' before rebasing it");
        }

        let target_ref = format!("{}/{target}", self.git.remote_name());
        let out = self.git.rebase_onto(&target_ref);

        Ok(if out.is_success() {
            if out.is_up_to_date() {
                RebaseOutcome::UpToDate
            } else {
                RebaseOutcome::Rebased
            }
        } else if out.has_conflict() {
            RebaseOutcome::Conflict
        } else {
            RebaseOutcome::Failed(out.err_msg())
        })
    }

    /// Continue a parked rebase and force-push the result.
    ///
    /// The editor is suppressed by the backend so the in-flight commit
    /// message is used as-is; the push runs inside the network gate.
    pub fn continue_and_push<C: GateControl>(
        &self,
        branch: &str,
        gate: &NetGate<C>,
    ) -> ContinueOutcome {
        let out = self.git.rebase_continue();
        if !out.is_success() {
            if out.has_conflict() {
                return ContinueOutcome::Conflict;
            }
            return ContinueOutcome::ContinueFailed(out.err_msg());
        }

        let push = gate.with_network(|| self.git.force_push_with_lease(branch));
        if push.is_success() {
            ContinueOutcome::Pushed
        } else {
            ContinueOutcome::PushFailed(push.err_msg())
        }
    }
}
