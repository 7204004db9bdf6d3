//! Branch name classification and validation.
//!
//! Branch names fall into workflow categories by prefix: `feat/` and `fix/`
//! are individual working branches, `feature-` and `dev-` are aggregation
//! branches, and `main`/`develop`/`master` are the canonical long-lived
//! branches. Everything else is [`BranchKind::Other`].

use std::fmt;

use crate::error::Error;

/// Workflow category of a branch name.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, serde::Serialize)]
#[serde(rename_all = "lowercase")]
pub enum BranchKind {
    /// Working branch for a single feature (`feat/...`).
    Feat,
    /// Working branch for a single fix (`fix/...`).
    Fix,
    /// Integration branch for fixes (`dev-...`).
    Dev,
    /// Aggregation branch collecting feat branches (`feature-...`).
    Feature,
    /// The `main` branch.
    Main,
    /// The `develop` branch.
    Develop,
    /// The `master` branch.
    Master,
    /// No recognized prefix or canonical name.
    Other,
}

/// Prefixes checked in descending length so the longest known prefix wins.
const PREFIXES: &[(&str, BranchKind)] = &[
    ("feature-", BranchKind::Feature),
    ("feat/", BranchKind::Feat),
    ("fix/", BranchKind::Fix),
    ("dev-", BranchKind::Dev),
];

impl BranchKind {
    /// Classify a branch name by longest known prefix, then by canonical
    /// literal name. No trimming or case folding happens here - callers are
    /// expected to hand in already-trimmed names.
    #[must_use]
    pub fn classify(name: &str) -> Self {
        for (prefix, kind) in PREFIXES {
            if name.starts_with(prefix) {
                return *kind;
            }
        }
        match name {
            "main" => Self::Main,
            "develop" => Self::Develop,
            "master" => Self::Master,
            _ => Self::Other,
        }
    }

    /// Whether this name follows one of the recognized conventions.
    #[must_use]
    pub const fn is_recognized(self) -> bool {
        !matches!(self, Self::Other)
    }
}

impl fmt::Display for BranchKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            Self::Feat => "feat",
            Self::Fix => "fix",
            Self::Dev => "dev",
            Self::Feature => "feature",
            Self::Main => "main",
            Self::Develop => "develop",
            Self::Master => "master",
            Self::Other => "other",
        };
        write!(f, "{label}")
    }
}

/// Check a branch name for feat classification.
#[must_use]
pub fn is_feat(name: &str) -> bool {
    BranchKind::classify(name) == BranchKind::Feat
}

/// Check a branch name for fix classification.
#[must_use]
pub fn is_fix(name: &str) -> bool {
    BranchKind::classify(name) == BranchKind::Fix
}

/// Check a branch name for feature classification.
#[must_use]
pub fn is_feature(name: &str) -> bool {
    BranchKind::classify(name) == BranchKind::Feature
}

/// Validate a branch name before it is handed to a child `git` process.
///
/// This is deliberately stricter than git's own ref rules: names travel into
/// `std::process::Command` arguments, so shell metacharacters are rejected
/// outright even though no shell is involved.
///
/// # Errors
/// Returns [`Error::InvalidBranchName`] with the offending reason.
pub fn validate_branch_name(name: &str) -> Result<(), Error> {
    let fail = |reason: String| Error::InvalidBranchName {
        name: name.to_string(),
        reason,
    };

    if name.is_empty() {
        return Err(fail("branch name cannot be empty".into()));
    }
    if name.starts_with('/') || name.ends_with('/') {
        return Err(fail("branch name cannot start or end with '/'".into()));
    }
    if name.starts_with('.') || name.ends_with('.') {
        return Err(fail("branch name cannot start or end with '.'".into()));
    }
    if name.contains("..") {
        return Err(fail("branch name cannot contain '..'".into()));
    }
    if name.contains("//") {
        return Err(fail("branch name cannot contain '//'".into()));
    }
    for c in name.chars() {
        if c.is_ascii_control() {
            return Err(fail("branch name cannot contain control characters".into()));
        }
        if matches!(c, ' ' | '~' | '^' | ':' | '?' | '*' | '[') {
            return Err(fail(format!("branch name cannot contain '{c}'")));
        }
        if matches!(
            c,
            '$' | ';' | '|' | '&' | '>' | '<' | '`' | '\\' | '"' | '\'' | '(' | ')' | '!'
        ) {
            return Err(fail(format!("branch name cannot contain '{c}'")));
        }
    }
    Ok(())
}
