//! Feature service: cut a feature aggregation branch and push it.

use lane_core::{BranchSet, Companion};
use lane_git::netgate::{GateControl, NetGate};
use lane_git::{CancelToken, GitBackend};

/// Outcome of creating a feature branch.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FeatureOutcome {
    /// Branch created and pushed.
    Created {
        /// Branch sets rebuilt after the push.
        branches: BranchSet,
    },
    /// A local branch with that name already exists; caller decides whether
    /// to retry with `overwrite`.
    ExistsLocally,
    /// Deleting the stale local branch failed.
    DeleteFailed(String),
    /// `git branch <name> <base>` failed.
    CreateFailed(String),
    /// Branch created but the push failed.
    PushFailed(String),
}

/// Service for feature branch creation with injected dependencies.
pub struct FeatureService<'a, G: GitBackend> {
    git: &'a G,
}

impl<'a, G: GitBackend> FeatureService<'a, G> {
    /// Create a new feature service.
    #[must_use]
    pub const fn new(git: &'a G) -> Self {
        Self { git }
    }

    /// Default feature name derived from the current feat branch, when the
    /// current branch is one.
    #[must_use]
    pub fn default_name(&self, companion: &Companion) -> Option<String> {
        let current = self.git.current_branch()?;
        lane_core::branch::is_feat(&current).then(|| companion.feat_to_feature(&current))
    }

    /// Create `name` from `base` (a ref like `origin/main`) and push it.
    ///
    /// With `overwrite`, an existing local branch of the same name is
    /// force-deleted first - the caller is expected to have confirmed that.
    pub fn create_and_push<C: GateControl>(
        &self,
        name: &str,
        base: &str,
        overwrite: bool,
        token: &CancelToken,
        gate: &NetGate<C>,
    ) -> FeatureOutcome {
        let exists = self.git.local_branches().iter().any(|b| b == name);
        if exists {
            if !overwrite {
                return FeatureOutcome::ExistsLocally;
            }
            let deleted = self.git.delete_branch(name, true);
            if !deleted.is_success() {
                return FeatureOutcome::DeleteFailed(deleted.err_msg());
            }
        }

        let created = self.git.create_branch(name, base);
        if !created.is_success() {
            return FeatureOutcome::CreateFailed(created.err_msg());
        }

        let pushed = gate.with_network(|| self.git.push_cancelable(name, token));
        if !pushed.is_success() {
            return FeatureOutcome::PushFailed(pushed.err_msg());
        }

        FeatureOutcome::Created {
            branches: BranchSet::from_lists(
                self.git.local_branches(),
                self.git.remote_branches(),
            ),
        }
    }
}
