//! # lane-core
//!
//! Pure policy for the Lane branch workflow: branch classification, companion
//! name derivation, PR target resolution, rebase decisions, the push-conflict
//! state machine, and the injected settings repository. Nothing in this crate
//! spawns a process or touches a terminal.

pub mod branch;
pub mod branchset;
pub mod companion;
pub mod config;
pub mod error;
pub mod project;
pub mod push;
pub mod rebase;
pub mod resolve;
pub mod settings;

pub use branch::BranchKind;
pub use branchset::BranchSet;
pub use companion::Companion;
pub use config::Config;
pub use error::{Error, Result};
pub use push::{ConflictChoice, PushEvent, PushState};
pub use rebase::{needs_rebase, Ancestry, RebasePhase};
pub use resolve::resolve_target;
pub use settings::{JsonFileSettings, ProjectKey, SettingName, SettingsRepository, WorkflowSettings};
