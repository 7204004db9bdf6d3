//! The local/remote/source branch triple.
//!
//! Services rebuild this value after any push or branch creation and hand the
//! fresh copy to the presentation layer - there is no observer wiring, just
//! rebuild-and-render.

use serde::Serialize;

/// Snapshot of the branches relevant to one workflow operation.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct BranchSet {
    /// Local branch names, sorted ascending.
    pub local: Vec<String>,
    /// Remote branch names (without the `origin/` prefix), sorted ascending.
    pub remote: Vec<String>,
    /// Union of local and remote, sorted ascending - the PR source candidates.
    pub source: Vec<String>,
}

impl BranchSet {
    /// Build the triple from raw branch lists. Input order does not matter;
    /// all three lists come out sorted and deduplicated.
    #[must_use]
    pub fn from_lists(local: Vec<String>, remote: Vec<String>) -> Self {
        let mut local = local;
        local.sort();
        local.dedup();

        let mut remote = remote;
        remote.sort();
        remote.dedup();

        let mut source: Vec<String> = local.iter().chain(remote.iter()).cloned().collect();
        source.sort();
        source.dedup();

        Self { local, remote, source }
    }

    /// Whether `branch` has a remote counterpart.
    #[must_use]
    pub fn has_remote(&self, branch: &str) -> bool {
        !branch.is_empty() && self.remote.iter().any(|b| b == branch)
    }

    /// Whether `branch` exists locally.
    #[must_use]
    pub fn has_local(&self, branch: &str) -> bool {
        !branch.is_empty() && self.local.iter().any(|b| b == branch)
    }

    /// PR target candidates: the remote list.
    #[must_use]
    pub fn targets(&self) -> &[String] {
        &self.remote
    }
}
