//! Status service: a read-only report of the current branch's workflow state.

use serde::Serialize;

use lane_core::rebase::{needs_rebase, Ancestry, RebasePhase};
use lane_core::{resolve_target, BranchKind, BranchSet, Companion};
use lane_git::GitBackend;

/// Everything `lane status` shows, in one serializable value.
#[derive(Debug, Clone, Serialize)]
pub struct StatusReport {
    /// Checked-out branch, when on one.
    pub current_branch: Option<String>,
    /// Workflow category of the current branch.
    pub kind: BranchKind,
    /// Whether the current branch has a remote counterpart.
    pub has_remote: bool,
    /// Commits not yet on the remote counterpart.
    pub unpushed: u32,
    /// The target `lane pr` would propose.
    pub proposed_target: Option<String>,
    /// Whether the current branch is behind the proposed target.
    pub needs_rebase: bool,
    /// In-progress rebase conflict phase.
    pub rebase_phase: RebasePhase,
    /// Whether a parked rebase has an in-flight commit recorded
    /// (`.git/REBASE_HEAD`), i.e. something will need pushing afterwards.
    pub rebase_commit_pending: bool,
    /// The local/remote/source branch triple.
    pub branches: BranchSet,
}

/// Service computing the status report from an injected git backend.
pub struct StatusService<'a, G: GitBackend> {
    git: &'a G,
}

impl<'a, G: GitBackend> StatusService<'a, G> {
    /// Create a new status service.
    #[must_use]
    pub const fn new(git: &'a G) -> Self {
        Self { git }
    }

    /// Build the report.
    #[must_use]
    pub fn report(&self, companion: &Companion, last_target: Option<&str>) -> StatusReport {
        let branches =
            BranchSet::from_lists(self.git.local_branches(), self.git.remote_branches());
        let current_branch = self.git.current_branch();
        let current = current_branch.as_deref().unwrap_or("");

        let kind = BranchKind::classify(current);
        let has_remote = branches.has_remote(current);
        let unpushed = if current.is_empty() {
            0
        } else {
            self.git.unpushed_count(current, has_remote)
        };

        let proposed_target = resolve_target(current, branches.targets(), last_target, companion);
        let needs_rebase = proposed_target
            .as_deref()
            .is_some_and(|target| self.branch_needs_rebase(current, target, has_remote));

        let rebase_phase = RebasePhase::derive(
            self.git.is_rebase_in_progress(),
            self.git.has_unresolved_conflicts(),
        );
        let rebase_commit_pending = rebase_phase != RebasePhase::Idle && self.git.has_rebase_head();

        StatusReport {
            current_branch,
            kind,
            has_remote,
            unpushed,
            proposed_target,
            needs_rebase,
            rebase_phase,
            rebase_commit_pending,
            branches,
        }
    }

    /// Ancestry-based rebase check for an explicit source/target pair.
    #[must_use]
    pub fn branch_needs_rebase(&self, source: &str, target: &str, source_has_remote: bool) -> bool {
        if source.is_empty() || target.is_empty() {
            return false;
        }
        let target_ref = format!("{}/{target}", self.git.remote_name());
        let ancestry = if self.git.is_ancestor(&target_ref, source) {
            Ancestry::Ancestor
        } else {
            Ancestry::NotAncestor
        };
        needs_rebase(source, target, source_has_remote, ancestry)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::services::test_mocks::MockGit;

    #[test]
    fn report_for_feat_branch_with_feature_target() {
        let git = MockGit::new()
            .with_current_branch("feat/pay")
            .with_local(&["feat/pay", "main"])
            .with_remote(&["feature-pay", "main", "feat/pay"])
            .with_unpushed("feat/pay", 2);

        let report = StatusService::new(&git).report(&Companion::default(), None);
        assert_eq!(report.current_branch.as_deref(), Some("feat/pay"));
        assert_eq!(report.kind, BranchKind::Feat);
        assert_eq!(report.proposed_target.as_deref(), Some("feature-pay"));
        assert!(report.has_remote);
        assert_eq!(report.unpushed, 2);
        assert!(!report.needs_rebase);
        assert_eq!(report.rebase_phase, RebasePhase::Idle);
    }

    #[test]
    fn behind_target_needs_rebase() {
        let git = MockGit::new()
            .with_current_branch("feat/pay")
            .with_remote(&["feature-pay", "feat/pay"])
            .with_ancestry("origin/feature-pay", "feat/pay", false);

        let report = StatusService::new(&git).report(&Companion::default(), None);
        assert!(report.needs_rebase);
    }

    #[test]
    fn local_only_branch_never_needs_rebase() {
        let git = MockGit::new()
            .with_current_branch("feat/pay")
            .with_remote(&["feature-pay"])
            .with_ancestry("origin/feature-pay", "feat/pay", false);

        let report = StatusService::new(&git).report(&Companion::default(), None);
        assert!(!report.needs_rebase);
        assert!(!report.has_remote);
    }

    #[test]
    fn rebase_phase_reported() {
        let git = MockGit::new().with_rebase_in_progress(true, true);
        let report = StatusService::new(&git).report(&Companion::default(), None);
        assert_eq!(report.rebase_phase, RebasePhase::UnresolvedConflicts);
        assert!(report.rebase_commit_pending);

        let git = MockGit::new().with_rebase_in_progress(true, false);
        let report = StatusService::new(&git).report(&Companion::default(), None);
        assert_eq!(report.rebase_phase, RebasePhase::ResolvedUncommitted);

        let git = MockGit::new();
        let report = StatusService::new(&git).report(&Companion::default(), None);
        assert!(!report.rebase_commit_pending);
    }

    #[test]
    fn empty_names_fail_safe() {
        let git = MockGit::new();
        let service = StatusService::new(&git);
        assert!(!service.branch_needs_rebase("", "main", true));
        assert!(!service.branch_needs_rebase("feat/x", "", true));
    }
}
