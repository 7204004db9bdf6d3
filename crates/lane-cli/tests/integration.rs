//! Integration tests for the lane CLI.
//!
//! These run the real binary against throwaway git repositories, with the
//! settings store and config file redirected into the temp directory so the
//! user's real configuration is never touched.

#![allow(clippy::expect_used, clippy::unwrap_used)]

use assert_cmd::Command;
use predicates::prelude::*;
use serial_test::serial;
use std::fs;
use std::path::Path;
use std::process::Command as StdCommand;
use tempfile::TempDir;

/// Helper to create a git repository in a temp directory.
fn setup_git_repo() -> TempDir {
    let temp = TempDir::new().expect("Failed to create temp dir");
    git(temp.path(), &["init"]);
    git(temp.path(), &["config", "user.email", "test@example.com"]);
    git(temp.path(), &["config", "user.name", "Test User"]);

    fs::write(temp.path().join("README.md"), "# Test Repo\n").expect("Failed to write README");
    git(temp.path(), &["add", "."]);
    git(temp.path(), &["commit", "-m", "Initial commit"]);
    git(temp.path(), &["branch", "-M", "main"]);

    temp
}

/// Add a bare "origin" remote with main pushed, so remote branch listings
/// have content.
fn add_origin(repo: &TempDir) -> TempDir {
    let bare = TempDir::new().expect("Failed to create bare dir");
    StdCommand::new("git")
        .args(["init", "--bare"])
        .current_dir(&bare)
        .output()
        .expect("Failed to init bare repo");

    git(
        repo.path(),
        &["remote", "add", "origin", &bare.path().to_string_lossy()],
    );
    git(repo.path(), &["push", "-u", "origin", "main"]);
    bare
}

fn git(dir: &Path, args: &[&str]) {
    let out = StdCommand::new("git")
        .args(args)
        .current_dir(dir)
        .output()
        .expect("Failed to run git");
    assert!(out.status.success(), "git {args:?} failed: {out:?}");
}

/// Helper to get a lane command isolated from the user's settings.
fn lane(repo: &TempDir) -> Command {
    let mut cmd = Command::new(env!("CARGO_BIN_EXE_lane"));
    cmd.current_dir(repo.path())
        .env("LANE_SETTINGS_PATH", repo.path().join("lane-settings.json"))
        .env("LANE_CONFIG_PATH", repo.path().join("lane-config.toml"))
        .env("LANE_LOG", "error");
    cmd
}

// ============================================================================
// Basic CLI tests
// ============================================================================

#[test]
fn test_version_flag() {
    Command::new(env!("CARGO_BIN_EXE_lane"))
        .arg("--version")
        .assert()
        .success()
        .stdout(predicate::str::contains("lane"));
}

#[test]
fn test_help_flag() {
    Command::new(env!("CARGO_BIN_EXE_lane"))
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("pr"))
        .stdout(predicate::str::contains("push"))
        .stdout(predicate::str::contains("rebase"))
        .stdout(predicate::str::contains("feature"))
        .stdout(predicate::str::contains("branches"))
        .stdout(predicate::str::contains("status"));
}

#[test]
fn test_completions_bash() {
    Command::new(env!("CARGO_BIN_EXE_lane"))
        .args(["completions", "bash"])
        .assert()
        .success()
        .stdout(predicate::str::contains("lane"));
}

#[test]
fn test_outside_repo_fails() {
    let temp = TempDir::new().unwrap();
    let mut cmd = Command::new(env!("CARGO_BIN_EXE_lane"));
    cmd.current_dir(temp.path())
        .env("LANE_SETTINGS_PATH", temp.path().join("s.json"))
        .env("LANE_CONFIG_PATH", temp.path().join("c.toml"));
    // The temp dir may live under a checkout in exotic setups; only assert
    // the failure shape when discovery really fails.
    let assert = cmd.arg("branches").assert();
    let output = assert.get_output().clone();
    if !output.status.success() {
        assert.failure().stderr(predicate::str::contains("git repository"));
    }
}

// ============================================================================
// Branch listing and status
// ============================================================================

#[test]
#[serial]
fn test_branches_lists_local() {
    let repo = setup_git_repo();
    git(repo.path(), &["branch", "feat/pay"]);

    lane(&repo)
        .arg("branches")
        .assert()
        .success()
        .stdout(predicate::str::contains("main"))
        .stdout(predicate::str::contains("feat/pay"))
        .stdout(predicate::str::contains("local only"));
}

#[test]
#[serial]
fn test_branches_json() {
    let repo = setup_git_repo();

    lane(&repo)
        .args(["branches", "--json"])
        .assert()
        .success()
        .stdout(predicate::str::contains("\"local\""))
        .stdout(predicate::str::contains("\"remote\""))
        .stdout(predicate::str::contains("\"source\""));
}

#[test]
#[serial]
fn test_status_reports_current_branch() {
    let repo = setup_git_repo();
    let _bare = add_origin(&repo);
    git(repo.path(), &["checkout", "-b", "feat/pay"]);

    lane(&repo)
        .arg("status")
        .assert()
        .success()
        .stdout(predicate::str::contains("feat/pay"))
        .stdout(predicate::str::contains("feat"));
}

#[test]
#[serial]
fn test_status_json_shape() {
    let repo = setup_git_repo();
    let _bare = add_origin(&repo);

    lane(&repo)
        .args(["status", "--json"])
        .assert()
        .success()
        .stdout(predicate::str::contains("\"current_branch\""))
        .stdout(predicate::str::contains("\"proposed_target\""))
        .stdout(predicate::str::contains("\"rebase_phase\""));
}

// ============================================================================
// Config
// ============================================================================

#[test]
#[serial]
fn test_config_set_get_unset() {
    let repo = setup_git_repo();

    lane(&repo)
        .args(["config", "get", "feature-base"])
        .assert()
        .success()
        .stdout(predicate::str::contains("origin/main"));

    lane(&repo)
        .args(["config", "set", "feature-base", "origin/develop"])
        .assert()
        .success();

    lane(&repo)
        .args(["config", "get", "feature-base"])
        .assert()
        .success()
        .stdout(predicate::str::contains("origin/develop"));

    lane(&repo)
        .args(["config", "unset", "feature-base"])
        .assert()
        .success();

    lane(&repo)
        .args(["config", "get", "feature-base"])
        .assert()
        .success()
        .stdout(predicate::str::contains("origin/main"));
}

#[test]
#[serial]
fn test_config_list() {
    let repo = setup_git_repo();

    lane(&repo)
        .args(["config", "set", "suffix", "wjl"])
        .assert()
        .success();

    lane(&repo)
        .args(["config", "list"])
        .assert()
        .success()
        .stdout(predicate::str::contains("project-url"))
        .stdout(predicate::str::contains("suffix"))
        .stdout(predicate::str::contains("wjl"));
}

#[test]
#[serial]
fn test_config_file_provides_defaults() {
    let repo = setup_git_repo();
    fs::write(
        repo.path().join("lane-config.toml"),
        "[branch]\npersonal_suffix = \"cfg\"\n",
    )
    .unwrap();

    lane(&repo)
        .args(["config", "get", "suffix"])
        .assert()
        .success()
        .stdout(predicate::str::contains("cfg"));
}

// ============================================================================
// PR and push flows (non-interactive paths)
// ============================================================================

#[test]
#[serial]
fn test_pr_web_prints_compare_url() {
    let repo = setup_git_repo();
    let _bare = add_origin(&repo);
    git(repo.path(), &["checkout", "-b", "dev-checkout"]);
    git(repo.path(), &["push", "-u", "origin", "dev-checkout"]);

    lane(&repo)
        .args(["pr", "--web", "--yes", "--source", "dev-checkout"])
        .args(["--target", "main"])
        .assert()
        .success()
        .stdout(predicate::str::contains("/compare/main...dev-checkout"));
}

#[test]
#[serial]
fn test_pr_without_remote_branches_fails() {
    let repo = setup_git_repo();

    lane(&repo)
        .args(["pr", "--yes"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("no remote branches"));
}

#[test]
#[serial]
fn test_push_without_confirmation_aborts() {
    let repo = setup_git_repo();
    let _bare = add_origin(&repo);

    // Non-interactive and no --yes: the command declines to push.
    lane(&repo)
        .arg("push")
        .assert()
        .success()
        .stdout(predicate::str::contains("aborted"));
}

#[test]
#[serial]
fn test_push_yes_pushes_to_origin() {
    let repo = setup_git_repo();
    let _bare = add_origin(&repo);
    git(repo.path(), &["checkout", "-b", "feat/pay"]);

    lane(&repo)
        .args(["push", "--yes"])
        .assert()
        .success()
        .stdout(predicate::str::contains("pushed 'feat/pay'"));

    // The remote branch now exists.
    lane(&repo)
        .arg("branches")
        .assert()
        .success()
        .stdout(predicate::str::contains("feat/pay"));
}

#[test]
#[serial]
fn test_rebase_up_to_date_is_noop() {
    let repo = setup_git_repo();
    let _bare = add_origin(&repo);
    git(repo.path(), &["checkout", "-b", "dev-checkout"]);
    git(repo.path(), &["push", "-u", "origin", "dev-checkout"]);

    lane(&repo)
        .args(["rebase", "--yes", "--target", "main"])
        .assert()
        .success()
        .stdout(predicate::str::contains("no rebase needed"));
}

#[test]
#[serial]
fn test_rebase_continue_without_rebase_fails() {
    let repo = setup_git_repo();

    lane(&repo)
        .args(["rebase", "--continue"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("no rebase in progress"));
}

#[test]
#[serial]
fn test_feature_creates_and_pushes() {
    let repo = setup_git_repo();
    let _bare = add_origin(&repo);
    git(repo.path(), &["checkout", "-b", "feat/pay"]);

    lane(&repo)
        .args(["feature", "--yes", "--base", "main", "--name", "feature-pay"])
        .assert()
        .success()
        .stdout(predicate::str::contains("created and pushed 'feature-pay'"));

    lane(&repo)
        .arg("branches")
        .assert()
        .success()
        .stdout(predicate::str::contains("feature-pay"));
}

#[test]
#[serial]
fn test_workflow_prints_url() {
    let repo = setup_git_repo();

    lane(&repo)
        .args(["config", "set", "project-url", "https://github.com/org/repo"])
        .assert()
        .success();

    lane(&repo)
        .arg("workflow")
        .assert()
        .success()
        .stdout(predicate::str::contains(
            "https://github.com/org/repo/actions/workflows/dev_deploy_manual.yml",
        ));
}
