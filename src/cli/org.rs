//! Organization tree command implementations

use colored::Colorize;
use log::{debug, warn};
use serde::Serialize;

use crate::cli::args::GlobalOptions;
use crate::cli::context::spinner;
use crate::cli::{CommandContext, OutputFormat};
use crate::client::{OrgId, OrganizationApi, ParentKey};
use crate::error::{ApiError, Result};
use crate::models::{OrgDisplay, TreeRowDisplay};
use crate::output::Formattable;
use crate::output::json::format_json;
use crate::output::tree::format_tree;

/// Run the org tree command
pub async fn tree(
    opts: &GlobalOptions,
    expand: &[OrgId],
    all: bool,
    collapse: &[OrgId],
    select: &[OrgId],
) -> Result<()> {
    let ctx = CommandContext::new(opts)?;
    let format = ctx.format;
    let period_id = ctx.config.period_id.clone().unwrap_or_default();
    let mut session = ctx.into_session(period_id);

    let progress = spinner("Loading organization tree...");
    let top_level = session.load_root().await;
    debug!("Top level has {} organizations", top_level);

    if all {
        let closure = session.expand_all().await;
        if closure.truncated {
            warn!("Tree expansion stopped at the collect budget");
            progress.suspend(|| {
                eprintln!(
                    "{} Tree truncated at the collect budget (--max-depth / --max-nodes)",
                    "⚠".yellow()
                )
            });
        }
    }

    for &id in expand {
        if session.reveal(id).await.is_none() {
            return Err(ApiError::NotFound(format!("Organization {}", id)).into());
        }
        session.expand(id).await;
    }

    for &id in collapse {
        if session.is_expanded(id) {
            session.collapse(id);
        } else {
            debug!("Organization {} is not expanded, nothing to collapse", id);
        }
    }

    for &id in select {
        let org = session
            .locate(id)
            .await
            .ok_or_else(|| ApiError::NotFound(format!("Organization {}", id)))?;
        session.handle_select(&org, true).await;
    }
    progress.finish_and_clear();

    let rows = session.rows();
    match format {
        OutputFormat::Pretty => {
            println!("{}", format_tree(&rows));
            if !select.is_empty() {
                println!();
                println!(
                    "{} {} checked, {} organizations selected for save",
                    "✓".green(),
                    session.display_selection().len(),
                    session.save_selection().len()
                );
            }
        }
        OutputFormat::Table => {
            let display: Vec<TreeRowDisplay> = rows.into_iter().map(TreeRowDisplay::from).collect();
            display.print(format)?;
        }
        OutputFormat::Json => {
            println!("{}", format_json(&rows)?);
        }
    }

    Ok(())
}

/// Run the org children command.
///
/// Lists a single level straight from the API, so unlike tree browsing a
/// failed listing is reported as an error.
pub async fn children(opts: &GlobalOptions, up_code: &str) -> Result<()> {
    let ctx = CommandContext::new(opts)?;

    let key = ParentKey::new(up_code);
    debug!("Listing organizations under upCode={}", key);
    let orgs = ctx.client.list_children(&key).await?;
    debug!("Fetched {} organizations", orgs.len());

    let display: Vec<OrgDisplay> = orgs.into_iter().map(OrgDisplay::from).collect();
    display.print(ctx.format)?;

    Ok(())
}

/// JSON shape of the descendants command
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct DescendantsOutput {
    organization_id: OrgId,
    descendants: Vec<OrgDisplay>,
    truncated: bool,
    fetches: usize,
}

/// Run the org descendants command
pub async fn descendants(opts: &GlobalOptions, id: OrgId) -> Result<()> {
    let ctx = CommandContext::new(opts)?;
    let format = ctx.format;
    let mut session = ctx.into_session(String::new());

    let progress = spinner(format!("Collecting descendants of {}...", id));
    let closure = session.collect_descendant_ids(id).await;
    progress.finish_and_clear();

    let descendants: Vec<OrgDisplay> = closure
        .ids
        .iter()
        .filter_map(|child| session.store().get(*child))
        .map(OrgDisplay::from)
        .collect();

    match format {
        OutputFormat::Json => {
            let output = DescendantsOutput {
                organization_id: id,
                descendants,
                truncated: closure.truncated,
                fetches: closure.fetches,
            };
            println!("{}", format_json(&output)?);
        }
        OutputFormat::Pretty | OutputFormat::Table => {
            let count = descendants.len();
            descendants.print(format)?;
            if format == OutputFormat::Pretty {
                println!();
                println!("{} descendants of {}", count.to_string().bold(), id);
            }
            if closure.truncated {
                eprintln!(
                    "{} Result truncated at the collect budget; raise --max-depth / --max-nodes for the full set",
                    "⚠".yellow()
                );
            }
        }
    }

    Ok(())
}
