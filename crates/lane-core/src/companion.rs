//! Companion branch name derivation.
//!
//! A feat branch `feat/payment_hqd` has a companion aggregation branch
//! `feature-payment`; a fix branch `fix/login` targets `dev-login` (or a
//! `feature-login` branch when one exists). Deriving the companion name
//! replaces the category prefix, strips one trailing personal suffix, and
//! normalizes separators.

const FEAT_PREFIX: &str = "feat/";
const FIX_PREFIX: &str = "fix/";
const FEATURE_PREFIX: &str = "feature-";
const DEV_PREFIX: &str = "dev-";

/// Suffix that predates the configurable one and is always stripped.
const BUILTIN_SUFFIX: &str = "hqd";

/// Derives companion branch names.
///
/// Holds the list of personal suffixes to strip: the historical builtin
/// `hqd` plus an optional user-configured suffix.
#[derive(Debug, Clone)]
pub struct Companion {
    suffixes: Vec<String>,
}

impl Companion {
    /// Build a derivation with the builtin suffix and, when non-empty, the
    /// user's configured personal suffix.
    #[must_use]
    pub fn new(personal_suffix: Option<&str>) -> Self {
        let mut suffixes = vec![BUILTIN_SUFFIX.to_string()];
        if let Some(s) = personal_suffix {
            let s = s.trim();
            if !s.is_empty() && s != BUILTIN_SUFFIX {
                suffixes.push(s.to_string());
            }
        }
        Self { suffixes }
    }

    /// `feat/x` -> `feature-x`.
    #[must_use]
    pub fn feat_to_feature(&self, name: &str) -> String {
        self.derive(name, FEAT_PREFIX, FEATURE_PREFIX)
    }

    /// `fix/x` -> `feature-x`.
    #[must_use]
    pub fn fix_to_feature(&self, name: &str) -> String {
        self.derive(name, FIX_PREFIX, FEATURE_PREFIX)
    }

    /// `fix/x` -> `dev-x`.
    #[must_use]
    pub fn fix_to_dev(&self, name: &str) -> String {
        self.derive(name, FIX_PREFIX, DEV_PREFIX)
    }

    /// Prefix replacement, then at most one suffix strip, then separator
    /// normalization. A name without the expected prefix only gets the
    /// separator pass - the category is left unchanged. That asymmetry is
    /// inherited behavior; see DESIGN.md.
    fn derive(&self, name: &str, prefix: &str, replacement: &str) -> String {
        let renamed = match name.strip_prefix(prefix) {
            Some(rest) => {
                let mut renamed = format!("{replacement}{rest}");
                for suffix in &self.suffixes {
                    if let Some(stripped) = strip_trailing_suffix(&renamed, suffix) {
                        renamed = stripped;
                        break;
                    }
                }
                renamed
            }
            None => name.to_string(),
        };
        renamed.replace(['/', '_'], "-")
    }
}

impl Default for Companion {
    fn default() -> Self {
        Self::new(None)
    }
}

/// Remove a trailing `_suffix` or `-suffix` segment, if present.
fn strip_trailing_suffix(name: &str, suffix: &str) -> Option<String> {
    for sep in ['_', '-'] {
        let tail = format!("{sep}{suffix}");
        if let Some(stripped) = name.strip_suffix(tail.as_str()) {
            return Some(stripped.to_string());
        }
    }
    None
}
