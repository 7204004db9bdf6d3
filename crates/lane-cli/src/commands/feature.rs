//! `lane feature` - cut a feature aggregation branch and push it.

use anyhow::{bail, Context, Result};

use lane_core::branch::validate_branch_name;
use lane_git::CancelToken;

use super::utils::{confirm, Workspace};
use super::FeatureArgs;
use crate::output;
use crate::services::{FeatureOutcome, FeatureService};

/// Run the feature command.
pub fn run(args: &FeatureArgs) -> Result<()> {
    let ws = Workspace::open()?;
    let settings = ws.settings();
    let companion = ws.companion();
    let service = FeatureService::new(&ws.git);

    let name = match args.name.clone() {
        Some(name) => name,
        None => {
            let derived = service.default_name(&companion);
            if output::is_interactive() && !args.yes {
                let mut prompt = inquire::Text::new("Feature branch name:");
                if let Some(default) = derived.as_deref() {
                    prompt = prompt.with_initial_value(default);
                }
                prompt.prompt().context("no feature name given")?
            } else {
                derived.context("not on a feat branch - pass --name")?
            }
        }
    };
    let name = name.trim().to_string();
    validate_branch_name(&name)?;

    let base = args
        .base
        .clone()
        .unwrap_or_else(|| settings.feature_base_branch());
    if args.base.is_some() {
        // A base given explicitly becomes the new default for this project.
        settings.set_feature_base_branch(&base)?;
    }

    let question = format!("Create '{name}' from {base} and push it?");
    if !confirm(&question, args.yes) {
        output::info("aborted");
        return Ok(());
    }

    let token = CancelToken::new();
    let gate = ws.gate();
    let spinner = output::spinner(&format!("creating {name} from {base}..."));
    let mut outcome = service.create_and_push(&name, &base, false, &token, &gate);
    spinner.finish_and_clear();

    if outcome == FeatureOutcome::ExistsLocally {
        let recreate = confirm(
            &format!("local branch '{name}' already exists - delete and recreate it?"),
            false,
        );
        if !recreate {
            bail!("branch '{name}' already exists locally");
        }
        let spinner = output::spinner(&format!("recreating {name} from {base}..."));
        outcome = service.create_and_push(&name, &base, true, &token, &gate);
        spinner.finish_and_clear();
    }

    match outcome {
        FeatureOutcome::Created { branches } => {
            output::success(&format!("created and pushed '{name}' from {base}"));
            output::info(&format!("{} remote branches now", branches.remote.len()));
            Ok(())
        }
        FeatureOutcome::ExistsLocally => bail!("branch '{name}' already exists locally"),
        FeatureOutcome::DeleteFailed(msg) => bail!("could not delete '{name}': {msg}"),
        FeatureOutcome::CreateFailed(msg) => bail!("could not create '{name}': {msg}"),
        FeatureOutcome::PushFailed(msg) => bail!("created '{name}' but the push failed: {msg}"),
    }
}
