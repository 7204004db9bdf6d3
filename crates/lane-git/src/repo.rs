//! Git backend implemented over the external `git` CLI.
//!
//! Every operation is one `git` invocation returning an exit code and the
//! combined output text. A handful of facts (rebase in progress, rebase head)
//! are read straight from marker files under `.git/` because git exposes them
//! nowhere else while a rebase is stopped.

use std::fs;
use std::path::{Path, PathBuf};

use tracing::debug;

use crate::error::{Error, Result};
use crate::exec::{self, CancelToken, CmdOutput};
use crate::traits::GitBackend;

const HEAD_REF_PREFIX: &str = "ref: refs/heads/";

/// [`GitBackend`] implementation shelling out to `git`.
#[derive(Debug, Clone)]
pub struct GitCli {
    workdir: PathBuf,
    remote: String,
}

impl GitCli {
    /// Wrap an existing repository working directory.
    #[must_use]
    pub fn new(workdir: impl Into<PathBuf>) -> Self {
        Self {
            workdir: workdir.into(),
            remote: "origin".to_string(),
        }
    }

    /// Walk up from `path` looking for a `.git` directory.
    ///
    /// # Errors
    /// Returns [`Error::MissingWorkdir`] when `path` doesn't exist and
    /// [`Error::NotARepository`] when no ancestor contains `.git`.
    pub fn discover(path: impl Into<PathBuf>) -> Result<Self> {
        let start = path.into();
        if !start.exists() {
            return Err(Error::MissingWorkdir(start));
        }
        let mut current = Some(start.as_path());
        while let Some(dir) = current {
            if dir.join(".git").is_dir() {
                return Ok(Self::new(dir));
            }
            current = dir.parent();
        }
        Err(Error::NotARepository(start))
    }

    /// Use a remote other than `origin`.
    #[must_use]
    pub fn with_remote(mut self, remote: impl Into<String>) -> Self {
        self.remote = remote.into();
        self
    }

    fn git(&self, args: &[&str]) -> CmdOutput {
        exec::run(&self.workdir, "git", args)
    }

    fn git_dir(&self) -> PathBuf {
        self.workdir.join(".git")
    }

    /// Commit id at the tip of a branch.
    #[must_use]
    pub fn branch_tip(&self, branch: &str) -> Option<String> {
        if branch.is_empty() {
            return None;
        }
        let out = self.git(&["rev-parse", branch]);
        (out.is_success() && !out.output.is_empty()).then_some(out.output)
    }

    /// Parse `.git/HEAD` directly: the symbolic-ref form yields the branch
    /// name, a detached HEAD yields the abbreviated commit id.
    fn head_from_file(&self) -> Option<String> {
        let content = fs::read_to_string(self.git_dir().join("HEAD")).ok()?;
        let content = content.trim();
        if let Some(branch) = content.strip_prefix(HEAD_REF_PREFIX) {
            return Some(branch.to_string());
        }
        content.get(..7).map(ToString::to_string)
    }
}

impl GitBackend for GitCli {
    fn workdir(&self) -> &Path {
        &self.workdir
    }

    fn remote_name(&self) -> &str {
        &self.remote
    }

    fn current_branch(&self) -> Option<String> {
        let out = self.git(&["branch", "--show-current"]);
        if out.is_success() && !out.output.is_empty() {
            return Some(out.output);
        }

        // During a rebase --show-current prints nothing; the branch being
        // rebased is recorded in the marker directory.
        if self.is_rebase_in_progress() {
            if let Some(branch) = self.rebase_head_branch() {
                return Some(branch);
            }
        }

        self.head_from_file()
    }

    fn local_branches(&self) -> Vec<String> {
        let out = self.git(&["branch"]);
        if !out.is_success() {
            return Vec::new();
        }
        out.output
            .lines()
            .filter_map(|line| {
                let name = line.replace('*', "");
                let name = name.trim();
                (!name.is_empty()).then(|| name.to_string())
            })
            .collect()
    }

    fn remote_branches(&self) -> Vec<String> {
        let out = self.git(&["branch", "-r"]);
        if !out.is_success() {
            return Vec::new();
        }
        let prefix = format!("{}/", self.remote);
        out.output
            .lines()
            .filter_map(|line| {
                let branch = line.trim();
                // Skip symbolic entries like "origin/HEAD -> origin/main".
                if branch.is_empty() || branch.contains("->") {
                    return None;
                }
                Some(branch.strip_prefix(&prefix).unwrap_or(branch).to_string())
            })
            .collect()
    }

    fn remote_url(&self) -> Option<String> {
        let out = self.git(&["remote", "get-url", &self.remote]);
        (out.is_success() && !out.output.is_empty()).then_some(out.output)
    }

    fn unpushed_count(&self, branch: &str, has_remote: bool) -> u32 {
        if branch.is_empty() {
            return 0;
        }
        let range = format!("{}/{branch}..{branch}", self.remote);
        let out = if has_remote {
            self.git(&["rev-list", &range, "--count"])
        } else {
            self.git(&["rev-list", branch, "--count"])
        };
        out.output.parse().unwrap_or(0)
    }

    fn is_ancestor(&self, ancestor: &str, descendant: &str) -> bool {
        self.git(&["merge-base", "--is-ancestor", ancestor, descendant])
            .is_success()
    }

    fn create_branch(&self, name: &str, from: &str) -> CmdOutput {
        if self.local_branches().iter().any(|b| b == name) {
            return CmdOutput::spawn_failure(format!("branch '{name}' already exists locally"));
        }
        self.git(&["branch", name, from])
    }

    fn delete_branch(&self, name: &str, force: bool) -> CmdOutput {
        let flag = if force { "-D" } else { "-d" };
        self.git(&["branch", flag, name])
    }

    fn push(&self, branch: &str) -> CmdOutput {
        self.git(&["push", "-u", &self.remote, branch])
    }

    fn push_cancelable(&self, branch: &str, token: &CancelToken) -> CmdOutput {
        exec::run_cancelable(
            &self.workdir,
            "git",
            &["push", "-u", &self.remote, branch],
            token,
        )
    }

    fn force_push_with_lease(&self, branch: &str) -> CmdOutput {
        self.git(&["push", "--force-with-lease", &self.remote, branch])
    }

    fn rebase_onto(&self, target: &str) -> CmdOutput {
        self.git(&["rebase", target])
    }

    fn rebase_continue(&self) -> CmdOutput {
        // GIT_EDITOR=true skips the message editor so the rebase commits the
        // in-flight message untouched.
        exec::run_with_env(
            &self.workdir,
            "git",
            &["rebase", "--continue"],
            &[("GIT_EDITOR", "true")],
        )
    }

    fn is_rebase_in_progress(&self) -> bool {
        let git_dir = self.git_dir();
        git_dir.join("rebase-merge").exists() || git_dir.join("rebase-apply").exists()
    }

    fn rebase_head_branch(&self) -> Option<String> {
        let head_name = self.git_dir().join("rebase-merge").join("head-name");
        let content = fs::read_to_string(head_name).ok()?;
        let branch = content.trim().replace("refs/heads/", "");
        (!branch.is_empty()).then_some(branch)
    }

    fn has_unresolved_conflicts(&self) -> bool {
        let out = self.git(&["status", "--porcelain"]);
        if !out.is_success() {
            return false;
        }
        out.output.lines().any(|line| {
            line.starts_with("UU ") || line.starts_with("AA ") || line.starts_with("DU ")
        })
    }

    fn has_rebase_head(&self) -> bool {
        let rebase_head = self.git_dir().join("REBASE_HEAD");
        match fs::read_to_string(rebase_head) {
            Ok(content) => !content.trim().is_empty(),
            Err(e) => {
                debug!(error = %e, "no REBASE_HEAD marker");
                false
            }
        }
    }
}
