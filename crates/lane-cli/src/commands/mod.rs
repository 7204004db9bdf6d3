//! CLI definition and command implementations.

pub mod branches;
pub mod completions;
pub mod config;
pub mod feature;
pub mod pr;
pub mod push;
pub mod rebase;
pub mod status;
pub mod utils;
pub mod workflow;

use clap::{Args, Parser, Subcommand, ValueEnum};
use clap_complete::Shell;

/// Branch workflow automation over git and gh.
#[derive(Parser)]
#[command(
    name = "lane",
    version,
    about = "Branch workflow automation for feat/feature teams",
    long_about = "Lane automates a feat -> feature / fix -> dev branch workflow:\n\
                  pushing with rejection handling, rebase assistance, and PR\n\
                  creation through the GitHub CLI."
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Create a pull request from the current branch
    Pr(PrArgs),
    /// Push a branch, resolving rejections interactively
    Push(PushArgs),
    /// Rebase the current branch onto its target branch
    Rebase(RebaseArgs),
    /// Create a feature aggregation branch and push it
    Feature(FeatureArgs),
    /// List local, remote and source branches
    Branches {
        /// Output as JSON
        #[arg(long)]
        json: bool,
    },
    /// Show the workflow status of the current branch
    Status {
        /// Output as JSON
        #[arg(long)]
        json: bool,
    },
    /// Read or change lane settings
    Config {
        #[command(subcommand)]
        action: ConfigAction,
    },
    /// Print the dev-deploy workflow page URL for this project
    Workflow,
    /// Generate shell completions
    Completions {
        /// Shell to generate completions for
        shell: Shell,
    },
}

#[derive(Args)]
pub struct PrArgs {
    /// Source branch (default: current branch)
    #[arg(long)]
    pub source: Option<String>,

    /// Target branch (default: resolved from the source branch)
    #[arg(long)]
    pub target: Option<String>,

    /// PR title (default: the source branch name)
    #[arg(long)]
    pub title: Option<String>,

    /// Print the compare URL instead of creating the PR with gh
    #[arg(long)]
    pub web: bool,

    /// Skip confirmation prompts
    #[arg(short = 'y', long)]
    pub yes: bool,
}

#[derive(Args)]
pub struct PushArgs {
    /// Branch to push (default: current branch)
    pub branch: Option<String>,

    /// Force-push with lease instead of a normal push
    #[arg(long)]
    pub force: bool,

    /// Skip confirmation prompts
    #[arg(short = 'y', long)]
    pub yes: bool,
}

#[derive(Args)]
pub struct RebaseArgs {
    /// Target branch (default: resolved from the current branch)
    #[arg(long)]
    pub target: Option<String>,

    /// Continue a rebase parked on resolved conflicts, then push
    #[arg(long = "continue")]
    pub continue_: bool,

    /// Skip confirmation prompts
    #[arg(short = 'y', long)]
    pub yes: bool,
}

#[derive(Args)]
pub struct FeatureArgs {
    /// Feature branch name (default: derived from the current feat branch)
    #[arg(long)]
    pub name: Option<String>,

    /// Base ref to cut from (default: the configured feature base)
    #[arg(long)]
    pub base: Option<String>,

    /// Skip confirmation prompts
    #[arg(short = 'y', long)]
    pub yes: bool,
}

#[derive(Subcommand)]
pub enum ConfigAction {
    /// Print a setting
    Get {
        /// Which setting to read
        key: SettingKey,
    },
    /// Change a setting
    Set {
        /// Which setting to write
        key: SettingKey,
        /// The new value
        value: String,
    },
    /// Clear a setting
    Unset {
        /// Which setting to clear
        key: SettingKey,
    },
    /// Show all settings for this project
    List,
}

/// Settings addressable from the command line.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum SettingKey {
    /// Project web URL used for compare/workflow links
    ProjectUrl,
    /// Last manually chosen PR target branch
    LastTarget,
    /// Base ref new feature branches are cut from
    FeatureBase,
    /// Personal branch suffix stripped during name derivation
    Suffix,
    /// Path to the gh binary
    GhPath,
    /// Path to the network-gate CLI
    GatePath,
}
