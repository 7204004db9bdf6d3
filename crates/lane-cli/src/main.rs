//! Lane CLI - branch workflow automation over git and gh.

use clap::Parser;
use tracing_subscriber::EnvFilter;

mod commands;
mod output;
mod services;

use commands::{Cli, Commands};

fn main() {
    init_tracing();

    let cli = Cli::parse();

    let result = match cli.command {
        Commands::Pr(args) => commands::pr::run(&args),
        Commands::Push(args) => commands::push::run(&args),
        Commands::Rebase(args) => commands::rebase::run(&args),
        Commands::Feature(args) => commands::feature::run(&args),
        Commands::Branches { json } => commands::branches::run(json),
        Commands::Status { json } => commands::status::run(json),
        Commands::Config { action } => commands::config::run(&action),
        Commands::Workflow => commands::workflow::run(),
        Commands::Completions { shell } => commands::completions::run(shell),
    };

    if let Err(e) = result {
        let msg = format!("{e:#}");
        if !msg.is_empty() {
            output::error(&msg);
        }
        std::process::exit(1);
    }
}

/// Diagnostics go to stderr and stay quiet unless `LANE_LOG` (or `RUST_LOG`)
/// asks for more.
fn init_tracing() {
    let filter = EnvFilter::try_from_env("LANE_LOG")
        .or_else(|_| EnvFilter::try_from_default_env())
        .unwrap_or_else(|_| EnvFilter::new("warn"));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}
