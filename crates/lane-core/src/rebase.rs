//! Rebase necessity decision and in-progress conflict phases.

/// Outcome of an ancestry query (`git merge-base --is-ancestor`, where
/// exit code 0 means "is ancestor").
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Ancestry {
    /// `origin/<target>` is an ancestor of the source branch.
    Ancestor,
    /// The target tip is not contained in the source history.
    NotAncestor,
}

/// Decide whether `source` should be rebased onto `origin/<target>`.
///
/// Fail-safe: empty names never demand a rebase. Otherwise a rebase is needed
/// when the target tip is missing from the source history and the source has a
/// remote counterpart (a purely local branch will simply be pushed fresh).
#[must_use]
pub fn needs_rebase(source: &str, target: &str, source_has_remote: bool, ancestry: Ancestry) -> bool {
    if source.is_empty() || target.is_empty() {
        return false;
    }
    source_has_remote && ancestry == Ancestry::NotAncestor
}

/// Phase of an in-progress rebase, derived from the marker directories and
/// conflict state that the git backend reports.
#[derive(Debug, Clone, Copy, PartialEq, Eq, serde::Serialize)]
#[serde(rename_all = "snake_case")]
pub enum RebasePhase {
    /// No rebase in progress.
    Idle,
    /// Rebase in progress with unresolved conflict markers in the index.
    UnresolvedConflicts,
    /// Conflicts resolved but the rebase still needs `--continue` and a push.
    ResolvedUncommitted,
}

impl RebasePhase {
    /// Derive the phase from backend facts.
    #[must_use]
    pub const fn derive(rebase_in_progress: bool, has_unresolved_conflicts: bool) -> Self {
        match (rebase_in_progress, has_unresolved_conflicts) {
            (false, _) => Self::Idle,
            (true, true) => Self::UnresolvedConflicts,
            (true, false) => Self::ResolvedUncommitted,
        }
    }
}
