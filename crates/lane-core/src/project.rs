//! Project URL derivation and link building.

use std::sync::OnceLock;

use regex::Regex;

fn token_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    #[allow(clippy::expect_used)]
    RE.get_or_init(|| Regex::new(r"https://[^@/]+@github\.com").expect("static regex"))
}

/// Strip embedded credentials from an HTTPS remote URL.
///
/// `https://ghp_xxx@github.com/org/repo.git` becomes
/// `https://github.com/org/repo.git`; URLs without credentials pass through.
#[must_use]
pub fn scrub_remote_token(url: &str) -> String {
    token_re().replace_all(url, "https://github.com").into_owned()
}

/// Derive the browsable project URL from a git remote URL.
///
/// Scrubs credentials, trims whitespace and trailing slashes, and drops a
/// trailing `.git` suffix.
#[must_use]
pub fn repo_url_to_project_url(remote_url: &str) -> String {
    let scrubbed = scrub_remote_token(remote_url);
    let trimmed = scrubbed.trim().trim_end_matches('/');
    trimmed.strip_suffix(".git").unwrap_or(trimmed).to_string()
}

/// Compare URL for a prospective PR: `<project>/compare/<target>...<source>`.
#[must_use]
pub fn compare_url(project_url: &str, target: &str, source: &str) -> String {
    format!("{}/compare/{target}...{source}", project_url.trim_end_matches('/'))
}

/// URL of the manual dev-deploy workflow run page.
#[must_use]
pub fn deploy_workflow_url(project_url: &str) -> String {
    format!(
        "{}/actions/workflows/dev_deploy_manual.yml",
        project_url.trim_end_matches('/')
    )
}
