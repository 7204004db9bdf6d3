//! Trait abstraction for git operations.
//!
//! Services depend on [`GitBackend`] instead of [`crate::GitCli`] so tests
//! can substitute mocks and dry-run implementations.

use std::path::Path;

use crate::exec::{CancelToken, CmdOutput};

/// Git repository operations, as performed by the external `git` CLI.
///
/// Query methods return plain facts; mutating methods return the child
/// process result for substring classification by the caller. All calls are
/// synchronous and blocking.
pub trait GitBackend {
    /// The repository working directory.
    fn workdir(&self) -> &Path;

    /// Name of the remote all operations go through (normally `origin`).
    fn remote_name(&self) -> &str;

    // === Repository facts ===

    /// Name of the checked-out branch. Falls back to the rebase head when a
    /// rebase is in progress; `None` on detached HEAD with no rebase.
    fn current_branch(&self) -> Option<String>;

    /// Local branch names.
    fn local_branches(&self) -> Vec<String>;

    /// Remote branch names with the remote prefix stripped.
    fn remote_branches(&self) -> Vec<String>;

    /// Fetch URL of the default remote.
    fn remote_url(&self) -> Option<String>;

    /// Commits on `branch` that its remote counterpart doesn't have; when no
    /// counterpart exists, every commit on the branch counts.
    fn unpushed_count(&self, branch: &str, has_remote: bool) -> u32;

    /// Whether `ancestor` (a ref, e.g. `origin/main`) is an ancestor of
    /// `descendant`.
    fn is_ancestor(&self, ancestor: &str, descendant: &str) -> bool;

    // === Branch mutation ===

    /// Create `name` at `from` without checking it out. Refused when the
    /// local branch already exists.
    fn create_branch(&self, name: &str, from: &str) -> CmdOutput;

    /// Delete a local branch (`-d`, or `-D` when `force`).
    fn delete_branch(&self, name: &str, force: bool) -> CmdOutput;

    // === Push ===

    /// `git push -u <remote> <branch>`.
    fn push(&self, branch: &str) -> CmdOutput;

    /// Push, polling the token and killing the child on cancellation.
    fn push_cancelable(&self, branch: &str, token: &CancelToken) -> CmdOutput;

    /// `git push --force-with-lease <remote> <branch>`.
    fn force_push_with_lease(&self, branch: &str) -> CmdOutput;

    // === Rebase ===

    /// Rebase the current branch onto `target` (a ref such as
    /// `origin/main`).
    fn rebase_onto(&self, target: &str) -> CmdOutput;

    /// `git rebase --continue` with the editor suppressed so the in-flight
    /// commit message is taken as-is.
    fn rebase_continue(&self) -> CmdOutput;

    // === Rebase / conflict markers ===

    /// Whether `.git/rebase-merge` or `.git/rebase-apply` exists.
    fn is_rebase_in_progress(&self) -> bool;

    /// Branch recorded in `rebase-merge/head-name`, if any.
    fn rebase_head_branch(&self) -> Option<String>;

    /// Whether `git status --porcelain` reports conflict entries.
    fn has_unresolved_conflicts(&self) -> bool;

    /// Whether `.git/REBASE_HEAD` exists and is non-empty.
    fn has_rebase_head(&self) -> bool;
}
