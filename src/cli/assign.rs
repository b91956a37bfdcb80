//! Assign command implementation
//!
//! Checks each requested organization (pulling in its whole subtree), shows
//! what would be saved and posts the assignment for the evaluation period.

use colored::Colorize;
use dialoguer::Confirm;
use log::debug;
use serde::Serialize;

use crate::cli::args::GlobalOptions;
use crate::cli::context::spinner;
use crate::cli::{CommandContext, OutputFormat};
use crate::client::OrgId;
use crate::error::{ApiError, Error, Result};
use crate::models::OrgDisplay;
use crate::output::Formattable;
use crate::output::json::format_json;
use crate::session::SaveOutcome;

/// JSON shape of a dry run
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct AssignPreview {
    period_id: String,
    selected: Vec<OrgDisplay>,
    organization_ids: Vec<OrgId>,
    truncated: bool,
}

/// Run the assign command
pub async fn run(
    opts: &GlobalOptions,
    ids: &[OrgId],
    period: Option<&str>,
    dry_run: bool,
    yes: bool,
) -> Result<()> {
    let ctx = CommandContext::new(opts)?;
    let format = ctx.format;
    let period_id = ctx.config.require_period_id(period)?.to_string();
    let mut session = ctx.into_session(period_id.clone());

    let progress = spinner("Resolving organizations...");
    session.load_root().await;

    let mut truncated = false;
    for &id in ids {
        let org = session
            .locate(id)
            .await
            .ok_or_else(|| ApiError::NotFound(format!("Organization {}", id)))?;
        progress.set_message(format!("Collecting subtree of {}...", org.full_name));
        let closure = session.check(&org).await;
        debug!(
            "Checked {} with {} descendants ({} fetches)",
            id,
            closure.ids.len(),
            closure.fetches
        );
        truncated |= closure.truncated;
    }
    progress.finish_and_clear();

    let selected: Vec<OrgDisplay> = session
        .display_selection()
        .into_iter()
        .map(OrgDisplay::from)
        .collect();
    let save_ids: Vec<OrgId> = session.save_selection().into_iter().collect();

    if truncated {
        eprintln!(
            "{} Subtree collection hit the collect budget; descendants past it are not included",
            "⚠".yellow()
        );
    }

    if !session.can_save() {
        eprintln!("{} Nothing selected, no assignment sent", "○".dimmed());
        return Ok(());
    }

    if dry_run {
        if format == OutputFormat::Json {
            let preview = AssignPreview {
                period_id,
                selected,
                organization_ids: save_ids,
                truncated,
            };
            println!("{}", format_json(&preview)?);
            return Ok(());
        }

        eprintln!("{}", "DRY RUN - no changes will be made".yellow());
        eprintln!();
        selected.print(format)?;
        eprintln!();
        eprintln!(
            "Would assign {} organizations to period {}",
            save_ids.len().to_string().bold(),
            period_id.bold()
        );
        return Ok(());
    }

    if !yes {
        if format != OutputFormat::Json {
            selected.print(format)?;
            eprintln!();
        }
        eprintln!(
            "Assign {} organizations to period {}?",
            save_ids.len().to_string().bold(),
            period_id.bold()
        );

        let confirm = Confirm::new()
            .with_prompt("Confirm assignment?")
            .default(false)
            .interact()?;

        if !confirm {
            eprintln!("Cancelled.");
            return Ok(());
        }
    }

    match session.save().await {
        SaveOutcome::Saved { organization_ids } => match format {
            OutputFormat::Json => {
                let outcome = SaveOutcome::Saved { organization_ids };
                println!("{}", format_json(&outcome)?);
            }
            _ => {
                eprintln!(
                    "{} Assigned {} organizations to period {}",
                    "✓".green(),
                    organization_ids.len(),
                    period_id
                );
            }
        },
        SaveOutcome::NothingSelected => match format {
            OutputFormat::Json => println!("{}", format_json(&SaveOutcome::NothingSelected)?),
            _ => eprintln!("{} Nothing selected, no assignment sent", "○".dimmed()),
        },
        SaveOutcome::Failed { message } => {
            return Err(Error::Other(format!("Saving evaluations failed: {}", message)));
        }
    }

    Ok(())
}
