//! Default PR target branch resolution.
//!
//! Pure decision logic: given the source branch, the remote branch set, and
//! the last manually chosen target, propose the branch a PR should target.
//! Kept free of any git or UI state so the rule order is directly testable.

use crate::branch::{is_feat, is_fix, BranchKind};
use crate::companion::Companion;

/// Resolve the default target branch for a PR from `source`.
///
/// Rule order, first match wins:
/// 1. feat source whose derived feature branch exists remotely
/// 2. fix source: derived feature branch, then derived dev branch
/// 3. dev source targets `main` when it exists remotely
/// 4. the last manually selected target, when still present remotely
/// 5. the first remote branch in ascending order
///
/// Returns `None` only when the remote set is empty.
#[must_use]
pub fn resolve_target(
    source: &str,
    remote_branches: &[String],
    last_target: Option<&str>,
    companion: &Companion,
) -> Option<String> {
    let exists = |name: &str| remote_branches.iter().any(|b| b == name);

    if is_feat(source) {
        let feature = companion.feat_to_feature(source);
        if exists(&feature) {
            return Some(feature);
        }
    }

    if is_fix(source) {
        for candidate in [companion.fix_to_feature(source), companion.fix_to_dev(source)] {
            if exists(&candidate) {
                return Some(candidate);
            }
        }
    }

    if BranchKind::classify(source) == BranchKind::Dev && exists("main") {
        return Some("main".to_string());
    }

    if let Some(last) = last_target {
        if !last.is_empty() && exists(last) {
            return Some(last.to_string());
        }
    }

    remote_branches.iter().min().cloned()
}
