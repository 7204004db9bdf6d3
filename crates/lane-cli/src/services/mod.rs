//! Service layer for business logic with dependency injection.
//!
//! Services encapsulate the workflow decisions and accept trait-based
//! dependencies (`GitBackend`, `PrBackend`, `SettingsRepository`), keeping
//! terminal I/O out so the logic is testable against mocks.

pub mod feature;
pub mod pr;
pub mod push;
pub mod rebase;
pub mod status;

#[cfg(test)]
pub mod test_mocks;

pub use feature::{FeatureOutcome, FeatureService};
pub use pr::{Advisory, PrOutcome, PrPlan, PrService};
pub use push::{PushReport, PushService};
pub use rebase::{ContinueOutcome, RebaseOutcome, RebaseService};
pub use status::{StatusReport, StatusService};

use lane_core::project;
use lane_core::settings::SettingsRepository;
use lane_core::WorkflowSettings;
use lane_git::GitBackend;

/// Project web URL: the stored value, or one derived from the remote URL and
/// cached for next time.
pub fn ensure_project_url<G, S>(git: &G, settings: &WorkflowSettings<'_, S>) -> Option<String>
where
    G: GitBackend,
    S: SettingsRepository + ?Sized,
{
    if let Some(url) = settings.project_url() {
        return Some(url);
    }
    let remote = git.remote_url()?;
    let derived = project::repo_url_to_project_url(&remote);
    if derived.is_empty() {
        return None;
    }
    // Best-effort cache; a read-only settings file shouldn't block PR links.
    let _ = settings.set_project_url(&derived);
    Some(derived)
}
