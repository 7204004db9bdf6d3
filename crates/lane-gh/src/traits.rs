//! Trait abstraction for the PR-hosting backend.

use lane_git::CmdOutput;

/// PR operations, as performed by the external `gh` CLI.
///
/// Like the git backend, failures are reported as a [`CmdOutput`] for
/// substring classification rather than as errors.
pub trait PrBackend {
    /// Create a pull request from `source` into `target`.
    fn create_pr(&self, title: &str, body: &str, source: &str, target: &str) -> CmdOutput;
}
