//! # lane-gh
//!
//! GitHub CLI integration for Lane: PR creation through the external `gh`
//! binary, with PR URLs recovered from its output by pattern matching.

mod client;
mod traits;

pub use client::{extract_pr_url, pr_already_exists, GhCli};
pub use traits::PrBackend;
