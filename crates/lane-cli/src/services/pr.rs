//! PR service: plan and create pull requests.
//!
//! The plan step mirrors what the workflow needs checked before a PR makes
//! sense: is the source pushed, is it behind its target, is a rebase parked
//! midway, do the names follow the convention. The command layer renders the
//! advisories; nothing here touches the terminal.

use anyhow::{bail, Result};

use lane_core::rebase::RebasePhase;
use lane_core::settings::SettingsRepository;
use lane_core::{project, resolve_target, BranchKind, BranchSet, Companion, WorkflowSettings};
use lane_gh::{extract_pr_url, pr_already_exists, PrBackend};
use lane_git::GitBackend;

use super::status::StatusService;

/// A condition worth surfacing before the PR is created.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Advisory {
    /// The source branch has no remote counterpart or unpushed commits.
    SourceNotPushed {
        branch: String,
        has_remote: bool,
        unpushed: u32,
    },
    /// The source is behind the target and should be rebased first.
    RebaseNeeded { target: String },
    /// A rebase is parked; phase says whether conflicts remain.
    RebaseInProgress { phase: RebasePhase },
    /// A branch name doesn't follow the team convention.
    UnconventionalName { branch: String },
    /// The chosen feature target exists nowhere yet and would need creating.
    TargetMissing { target: String, base: String },
}

/// The checked inputs for one PR.
#[derive(Debug, Clone)]
pub struct PrPlan {
    /// Source branch.
    pub source: String,
    /// Source classification.
    pub source_kind: BranchKind,
    /// Proposed or overridden target.
    pub target: Option<String>,
    /// Branch sets backing the source/target candidate lists.
    pub branches: BranchSet,
    /// Conditions to surface before creating.
    pub advisories: Vec<Advisory>,
    /// Project web URL for compare links, when known.
    pub project_url: Option<String>,
}

/// What came out of a create attempt.
#[derive(Debug, Clone)]
pub struct PrOutcome {
    /// The PR URL, when one could be recovered from the backend output.
    pub url: Option<String>,
    /// Whether a new PR was created (false when one already existed).
    pub created: bool,
    /// Failure detail when neither happened.
    pub error: Option<String>,
}

/// Service for PR planning and creation with injected dependencies.
pub struct PrService<'a, G, P, S>
where
    G: GitBackend,
    P: PrBackend,
    S: SettingsRepository + ?Sized,
{
    git: &'a G,
    pr: &'a P,
    settings: &'a WorkflowSettings<'a, S>,
}

impl<'a, G, P, S> PrService<'a, G, P, S>
where
    G: GitBackend,
    P: PrBackend,
    S: SettingsRepository + ?Sized,
{
    /// Create a new PR service.
    #[must_use]
    pub const fn new(git: &'a G, pr: &'a P, settings: &'a WorkflowSettings<'a, S>) -> Self {
        Self { git, pr, settings }
    }

    /// Build the plan for a PR from `source` (default: current branch) into
    /// `target` (default: resolved).
    ///
    /// # Errors
    /// Fails when no source branch can be determined.
    pub fn plan(&self, source: Option<&str>, target: Option<&str>) -> Result<PrPlan> {
        let branches =
            BranchSet::from_lists(self.git.local_branches(), self.git.remote_branches());

        let source = match source {
            Some(s) => s.trim().to_string(),
            None => match self.git.current_branch() {
                Some(b) => b,
                None => bail!("not on a branch and no --source given"),
            },
        };
        if source.is_empty() {
            bail!("source branch name is empty");
        }

        let companion = Companion::new(self.settings.personal_suffix().as_deref());
        let last_target = self.settings.last_target_branch();
        let target = target.map(str::to_string).or_else(|| {
            resolve_target(&source, branches.targets(), last_target.as_deref(), &companion)
        });

        let mut advisories = Vec::new();
        let status = StatusService::new(self.git);

        let phase = RebasePhase::derive(
            self.git.is_rebase_in_progress(),
            self.git.has_unresolved_conflicts(),
        );
        if phase != RebasePhase::Idle {
            advisories.push(Advisory::RebaseInProgress { phase });
        }

        let has_remote = branches.has_remote(&source);
        if let Some(t) = target.as_deref() {
            if phase == RebasePhase::Idle && status.branch_needs_rebase(&source, t, has_remote) {
                advisories.push(Advisory::RebaseNeeded { target: t.to_string() });
            }
        }

        let unpushed = self.git.unpushed_count(&source, has_remote);
        if !has_remote || unpushed > 0 {
            advisories.push(Advisory::SourceNotPushed {
                branch: source.clone(),
                has_remote,
                unpushed,
            });
        }

        let source_kind = BranchKind::classify(&source);

        // A feat branch whose derived feature branch was never pushed gets a
        // hint to create it, whether or not it was picked as the target.
        let mut flagged_missing = None;
        if source_kind == BranchKind::Feat {
            let derived = companion.feat_to_feature(&source);
            if !branches.has_remote(&derived) {
                advisories.push(Advisory::TargetMissing {
                    target: derived.clone(),
                    base: self.settings.feature_base_branch(),
                });
                flagged_missing = Some(derived);
            }
        }

        if let Some(t) = target.as_deref() {
            let target_kind = BranchKind::classify(t);
            // Mirror checks: an unconventional name on either side is worth a
            // look when the other side follows the convention.
            if target_kind.is_recognized() && !source_kind.is_recognized() {
                advisories.push(Advisory::UnconventionalName { branch: source.clone() });
            }
            if source_kind.is_recognized() && !target_kind.is_recognized() {
                advisories.push(Advisory::UnconventionalName { branch: t.to_string() });
            }

            if target_kind == BranchKind::Feature
                && !branches.has_remote(t)
                && flagged_missing.as_deref() != Some(t)
            {
                advisories.push(Advisory::TargetMissing {
                    target: t.to_string(),
                    base: self.settings.feature_base_branch(),
                });
            }
        }

        let project_url = super::ensure_project_url(self.git, self.settings);

        Ok(PrPlan {
            source,
            source_kind,
            target,
            branches,
            advisories,
            project_url,
        })
    }

    /// Create the PR, remembering the chosen target for next time.
    #[must_use]
    pub fn create(&self, source: &str, target: &str, title: &str) -> PrOutcome {
        let _ = self.settings.set_last_target_branch(target);

        let out = self.pr.create_pr(title, "", source, target);
        if out.is_success() {
            return PrOutcome {
                url: extract_pr_url(&out.output),
                created: true,
                error: None,
            };
        }
        if pr_already_exists(&out) {
            // gh prints the existing PR's URL in the refusal message.
            return PrOutcome {
                url: extract_pr_url(&out.output),
                created: false,
                error: None,
            };
        }
        PrOutcome {
            url: None,
            created: false,
            error: Some(out.err_msg()),
        }
    }

    /// Compare URL fallback for `--web` or when `gh` is unavailable.
    #[must_use]
    pub fn compare_url(&self, plan: &PrPlan, target: &str) -> Option<String> {
        plan.project_url
            .as_deref()
            .map(|url| project::compare_url(url, target, &plan.source))
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::services::test_mocks::{MockGit, MockPr, MockSettings};
    use lane_core::{Config, ProjectKey};
    use lane_git::CmdOutput;
    use std::path::Path;

    fn settings_fixture<'a>(
        store: &'a MockSettings,
        config: &'a Config,
    ) -> WorkflowSettings<'a, MockSettings> {
        WorkflowSettings::new(store, config, ProjectKey::derive(Some("url"), Path::new("/p")))
    }

    #[test]
    fn plan_proposes_feature_target_for_feat_source() {
        let git = MockGit::new()
            .with_current_branch("feat/pay")
            .with_local(&["feat/pay", "main"])
            .with_remote(&["feature-pay", "main", "feat/pay"]);
        let pr = MockPr::new();
        let store = MockSettings::new();
        let config = Config::default();
        let settings = settings_fixture(&store, &config);

        let plan = PrService::new(&git, &pr, &settings).plan(None, None).unwrap();
        assert_eq!(plan.source, "feat/pay");
        assert_eq!(plan.target.as_deref(), Some("feature-pay"));
        assert!(plan.advisories.is_empty());
    }

    #[test]
    fn plan_flags_unpushed_source() {
        let git = MockGit::new()
            .with_current_branch("feat/pay")
            .with_remote(&["feature-pay"])
            .with_unpushed("feat/pay", 3);
        let pr = MockPr::new();
        let store = MockSettings::new();
        let config = Config::default();
        let settings = settings_fixture(&store, &config);

        let plan = PrService::new(&git, &pr, &settings).plan(None, None).unwrap();
        assert!(plan.advisories.iter().any(|a| matches!(
            a,
            Advisory::SourceNotPushed { has_remote: false, unpushed: 3, .. }
        )));
    }

    #[test]
    fn plan_flags_rebase_needed() {
        let git = MockGit::new()
            .with_current_branch("feat/pay")
            .with_remote(&["feature-pay", "feat/pay"])
            .with_ancestry("origin/feature-pay", "feat/pay", false);
        let pr = MockPr::new();
        let store = MockSettings::new();
        let config = Config::default();
        let settings = settings_fixture(&store, &config);

        let plan = PrService::new(&git, &pr, &settings).plan(None, None).unwrap();
        assert!(plan
            .advisories
            .iter()
            .any(|a| matches!(a, Advisory::RebaseNeeded { target } if target == "feature-pay")));
    }

    #[test]
    fn plan_flags_parked_rebase_instead_of_rebase_needed() {
        let git = MockGit::new()
            .with_current_branch("feat/pay")
            .with_remote(&["feature-pay", "feat/pay"])
            .with_ancestry("origin/feature-pay", "feat/pay", false)
            .with_rebase_in_progress(true, true);
        let pr = MockPr::new();
        let store = MockSettings::new();
        let config = Config::default();
        let settings = settings_fixture(&store, &config);

        let plan = PrService::new(&git, &pr, &settings).plan(None, None).unwrap();
        assert!(plan.advisories.iter().any(|a| matches!(
            a,
            Advisory::RebaseInProgress { phase: RebasePhase::UnresolvedConflicts }
        )));
        assert!(!plan.advisories.iter().any(|a| matches!(a, Advisory::RebaseNeeded { .. })));
    }

    #[test]
    fn plan_flags_missing_feature_target() {
        let git = MockGit::new()
            .with_current_branch("feat/pay")
            .with_remote(&["main", "feat/pay"]);
        let pr = MockPr::new();
        let store = MockSettings::new();
        let config = Config::default();
        let settings = settings_fixture(&store, &config);

        let plan = PrService::new(&git, &pr, &settings)
            .plan(None, Some("feature-pay"))
            .unwrap();
        assert!(plan.advisories.iter().any(|a| matches!(
            a,
            Advisory::TargetMissing { target, base }
                if target == "feature-pay" && base == "origin/main"
        )));
    }

    #[test]
    fn plan_hints_missing_feature_even_without_explicit_target() {
        let git = MockGit::new()
            .with_current_branch("feat/pay")
            .with_remote(&["main", "feat/pay"]);
        let pr = MockPr::new();
        let store = MockSettings::new();
        let config = Config::default();
        let settings = settings_fixture(&store, &config);

        let plan = PrService::new(&git, &pr, &settings).plan(None, None).unwrap();
        let missing: Vec<_> = plan
            .advisories
            .iter()
            .filter(|a| matches!(a, Advisory::TargetMissing { target, .. } if target == "feature-pay"))
            .collect();
        assert_eq!(missing.len(), 1);
    }

    #[test]
    fn plan_flags_unconventional_source() {
        let git = MockGit::new()
            .with_current_branch("scratch")
            .with_remote(&["main"]);
        let pr = MockPr::new();
        let store = MockSettings::new();
        let config = Config::default();
        let settings = settings_fixture(&store, &config);

        let plan = PrService::new(&git, &pr, &settings).plan(None, Some("main")).unwrap();
        assert!(plan
            .advisories
            .iter()
            .any(|a| matches!(a, Advisory::UnconventionalName { branch } if branch == "scratch")));
    }

    #[test]
    fn create_remembers_target_and_extracts_url() {
        let git = MockGit::new();
        let pr = MockPr::new();
        let store = MockSettings::new();
        let config = Config::default();
        let settings = settings_fixture(&store, &config);

        let service = PrService::new(&git, &pr, &settings);
        let outcome = service.create("feat/pay", "feature-pay", "feat/pay");
        assert!(outcome.created);
        assert_eq!(outcome.url.as_deref(), Some("https://github.com/org/repo/pull/7"));
        assert_eq!(settings.last_target_branch().as_deref(), Some("feature-pay"));
        assert_eq!(pr.created.borrow().len(), 1);
    }

    #[test]
    fn create_surfaces_existing_pr() {
        let git = MockGit::new();
        let pr = MockPr::new().with_output(CmdOutput::new(
            1,
            "a pull request for branch \"feat/pay\" already exists:\n\
             https://github.com/org/repo/pull/99",
        ));
        let store = MockSettings::new();
        let config = Config::default();
        let settings = settings_fixture(&store, &config);

        let outcome = PrService::new(&git, &pr, &settings).create("feat/pay", "feature-pay", "t");
        assert!(!outcome.created);
        assert!(outcome.error.is_none());
        assert_eq!(outcome.url.as_deref(), Some("https://github.com/org/repo/pull/99"));
    }

    #[test]
    fn create_reports_failure() {
        let git = MockGit::new();
        let pr = MockPr::new().with_output(CmdOutput::new(1, "gh: some API error"));
        let store = MockSettings::new();
        let config = Config::default();
        let settings = settings_fixture(&store, &config);

        let outcome = PrService::new(&git, &pr, &settings).create("feat/pay", "feature-pay", "t");
        assert!(!outcome.created);
        assert_eq!(outcome.error.as_deref(), Some("gh: some API error"));
        assert!(outcome.url.is_none());
    }
}
