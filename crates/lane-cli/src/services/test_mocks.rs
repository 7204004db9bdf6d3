//! Mock implementations for testing services.
//!
//! These mocks implement the traits from lane-git, lane-gh and lane-core to
//! enable unit testing of service logic without real repositories or child
//! processes.

use std::cell::RefCell;
use std::collections::HashMap;
use std::path::{Path, PathBuf};

use lane_core::settings::SettingsRepository;
use lane_core::Result as CoreResult;
use lane_gh::PrBackend;
use lane_git::{CancelToken, CmdOutput, GitBackend};

/// Mock implementation of `GitBackend` for testing.
pub struct MockGit {
    pub workdir: PathBuf,
    pub current_branch: RefCell<Option<String>>,
    pub local: RefCell<Vec<String>>,
    pub remote: RefCell<Vec<String>>,
    pub remote_url: RefCell<Option<String>>,
    pub ancestors: RefCell<HashMap<(String, String), bool>>,
    pub unpushed: RefCell<HashMap<String, u32>>,
    pub push_output: RefCell<CmdOutput>,
    pub force_push_output: RefCell<CmdOutput>,
    pub rebase_output: RefCell<CmdOutput>,
    pub rebase_continue_output: RefCell<CmdOutput>,
    pub rebase_in_progress: RefCell<bool>,
    pub unresolved_conflicts: RefCell<bool>,
    pub pushed_branches: RefCell<Vec<String>>,
    pub deleted_branches: RefCell<Vec<String>>,
}

impl Default for MockGit {
    fn default() -> Self {
        Self::new()
    }
}

impl MockGit {
    pub fn new() -> Self {
        Self {
            workdir: PathBuf::from("/mock"),
            current_branch: RefCell::new(Some("main".to_string())),
            local: RefCell::new(vec!["main".to_string()]),
            remote: RefCell::new(vec!["main".to_string()]),
            remote_url: RefCell::new(None),
            ancestors: RefCell::new(HashMap::new()),
            unpushed: RefCell::new(HashMap::new()),
            push_output: RefCell::new(CmdOutput::new(0, "pushed")),
            force_push_output: RefCell::new(CmdOutput::new(0, "forced")),
            rebase_output: RefCell::new(CmdOutput::new(0, "Successfully rebased")),
            rebase_continue_output: RefCell::new(CmdOutput::new(0, "continued")),
            rebase_in_progress: RefCell::new(false),
            unresolved_conflicts: RefCell::new(false),
            pushed_branches: RefCell::new(Vec::new()),
            deleted_branches: RefCell::new(Vec::new()),
        }
    }

    pub fn with_current_branch(self, name: &str) -> Self {
        *self.current_branch.borrow_mut() = Some(name.to_string());
        self
    }

    pub fn with_local(self, branches: &[&str]) -> Self {
        *self.local.borrow_mut() = branches.iter().map(ToString::to_string).collect();
        self
    }

    pub fn with_remote(self, branches: &[&str]) -> Self {
        *self.remote.borrow_mut() = branches.iter().map(ToString::to_string).collect();
        self
    }

    #[allow(dead_code)]
    pub fn with_remote_url(self, url: &str) -> Self {
        *self.remote_url.borrow_mut() = Some(url.to_string());
        self
    }

    /// Record the result of `is_ancestor(ancestor, descendant)`.
    #[allow(dead_code)]
    pub fn with_ancestry(self, ancestor: &str, descendant: &str, is_ancestor: bool) -> Self {
        self.ancestors
            .borrow_mut()
            .insert((ancestor.to_string(), descendant.to_string()), is_ancestor);
        self
    }

    #[allow(dead_code)]
    pub fn with_unpushed(self, branch: &str, count: u32) -> Self {
        self.unpushed.borrow_mut().insert(branch.to_string(), count);
        self
    }

    #[allow(dead_code)]
    pub fn with_push_output(self, out: CmdOutput) -> Self {
        *self.push_output.borrow_mut() = out;
        self
    }

    #[allow(dead_code)]
    pub fn with_force_push_output(self, out: CmdOutput) -> Self {
        *self.force_push_output.borrow_mut() = out;
        self
    }

    #[allow(dead_code)]
    pub fn with_rebase_output(self, out: CmdOutput) -> Self {
        *self.rebase_output.borrow_mut() = out;
        self
    }

    #[allow(dead_code)]
    pub fn with_rebase_continue_output(self, out: CmdOutput) -> Self {
        *self.rebase_continue_output.borrow_mut() = out;
        self
    }

    #[allow(dead_code)]
    pub fn with_rebase_in_progress(self, in_progress: bool, unresolved: bool) -> Self {
        *self.rebase_in_progress.borrow_mut() = in_progress;
        *self.unresolved_conflicts.borrow_mut() = unresolved;
        self
    }
}

impl GitBackend for MockGit {
    fn workdir(&self) -> &Path {
        &self.workdir
    }

    fn remote_name(&self) -> &str {
        "origin"
    }

    fn current_branch(&self) -> Option<String> {
        self.current_branch.borrow().clone()
    }

    fn local_branches(&self) -> Vec<String> {
        self.local.borrow().clone()
    }

    fn remote_branches(&self) -> Vec<String> {
        self.remote.borrow().clone()
    }

    fn remote_url(&self) -> Option<String> {
        self.remote_url.borrow().clone()
    }

    fn unpushed_count(&self, branch: &str, _has_remote: bool) -> u32 {
        self.unpushed.borrow().get(branch).copied().unwrap_or(0)
    }

    fn is_ancestor(&self, ancestor: &str, descendant: &str) -> bool {
        self.ancestors
            .borrow()
            .get(&(ancestor.to_string(), descendant.to_string()))
            .copied()
            // Unconfigured pairs read as "already contained" so tests only
            // opt in to rebase-needed scenarios explicitly.
            .unwrap_or(true)
    }

    fn create_branch(&self, name: &str, _from: &str) -> CmdOutput {
        let mut local = self.local.borrow_mut();
        if local.iter().any(|b| b == name) {
            return CmdOutput::spawn_failure(format!("branch '{name}' already exists locally"));
        }
        local.push(name.to_string());
        CmdOutput::new(0, "")
    }

    fn delete_branch(&self, name: &str, _force: bool) -> CmdOutput {
        self.local.borrow_mut().retain(|b| b != name);
        self.deleted_branches.borrow_mut().push(name.to_string());
        CmdOutput::new(0, "")
    }

    fn push(&self, branch: &str) -> CmdOutput {
        self.pushed_branches.borrow_mut().push(branch.to_string());
        let out = self.push_output.borrow().clone();
        if out.is_success() && !self.remote.borrow().iter().any(|b| b == branch) {
            self.remote.borrow_mut().push(branch.to_string());
        }
        out
    }

    fn push_cancelable(&self, branch: &str, _token: &CancelToken) -> CmdOutput {
        self.push(branch)
    }

    fn force_push_with_lease(&self, branch: &str) -> CmdOutput {
        self.pushed_branches.borrow_mut().push(branch.to_string());
        self.force_push_output.borrow().clone()
    }

    fn rebase_onto(&self, _target: &str) -> CmdOutput {
        self.rebase_output.borrow().clone()
    }

    fn rebase_continue(&self) -> CmdOutput {
        self.rebase_continue_output.borrow().clone()
    }

    fn is_rebase_in_progress(&self) -> bool {
        *self.rebase_in_progress.borrow()
    }

    fn rebase_head_branch(&self) -> Option<String> {
        if *self.rebase_in_progress.borrow() {
            self.current_branch.borrow().clone()
        } else {
            None
        }
    }

    fn has_unresolved_conflicts(&self) -> bool {
        *self.unresolved_conflicts.borrow()
    }

    fn has_rebase_head(&self) -> bool {
        *self.rebase_in_progress.borrow()
    }
}

/// Mock implementation of `PrBackend` for testing.
pub struct MockPr {
    pub output: RefCell<CmdOutput>,
    pub created: RefCell<Vec<(String, String)>>,
}

impl Default for MockPr {
    fn default() -> Self {
        Self::new()
    }
}

impl MockPr {
    pub fn new() -> Self {
        Self {
            output: RefCell::new(CmdOutput::new(0, "https://github.com/org/repo/pull/7")),
            created: RefCell::new(Vec::new()),
        }
    }

    #[allow(dead_code)]
    pub fn with_output(self, out: CmdOutput) -> Self {
        *self.output.borrow_mut() = out;
        self
    }
}

impl PrBackend for MockPr {
    fn create_pr(&self, _title: &str, _body: &str, source: &str, target: &str) -> CmdOutput {
        self.created
            .borrow_mut()
            .push((source.to_string(), target.to_string()));
        self.output.borrow().clone()
    }
}

/// In-memory settings repository.
pub struct MockSettings {
    values: RefCell<HashMap<String, String>>,
}

impl Default for MockSettings {
    fn default() -> Self {
        Self::new()
    }
}

impl MockSettings {
    pub fn new() -> Self {
        Self {
            values: RefCell::new(HashMap::new()),
        }
    }
}

impl SettingsRepository for MockSettings {
    fn get(&self, key: &str) -> Option<String> {
        self.values.borrow().get(key).cloned()
    }

    fn set(&self, key: &str, value: &str) -> CoreResult<()> {
        self.values
            .borrow_mut()
            .insert(key.to_string(), value.to_string());
        Ok(())
    }

    fn remove(&self, key: &str) -> CoreResult<()> {
        self.values.borrow_mut().remove(key);
        Ok(())
    }
}
