//! Init command implementation

use colored::Colorize;
use dialoguer::{Input, theme::ColorfulTheme};

use crate::cli::args::GlobalOptions;
use crate::cli::context::spinner;
use crate::client::{OrganizationApi, ParentKey, SurveyClient};
use crate::config::Config;
use crate::error::Result;

/// Run the init command
///
/// Prompts for the survey backend and a default evaluation period, checks
/// that the top level of the organization tree can be listed, then writes
/// the config file.
pub async fn run(opts: &GlobalOptions) -> Result<()> {
    println!("{}", "Welcome to orgeval!".bold().green());
    println!("Let's set up your survey backend configuration.\n");

    let mut config = Config::load_or_default(opts.config_ref())?;
    let theme = ColorfulTheme::default();

    let api_host: String = Input::with_theme(&theme)
        .with_prompt("Survey backend URL")
        .default(config.api_host_or(opts.api_host_ref()).to_string())
        .interact_text()?;

    let period_id: String = Input::with_theme(&theme)
        .with_prompt("Default evaluation period ID (leave empty to skip)")
        .default(config.period_id.clone().unwrap_or_default())
        .allow_empty(true)
        .interact_text()?;

    let client = SurveyClient::with_rate_limit(&api_host, config.preferences.requests_per_second)?;
    let progress = spinner("Checking organization tree...");
    let top_level = client.list_children(&ParentKey::root()).await;
    progress.finish_and_clear();

    match top_level {
        Ok(orgs) => println!(
            "{} Backend reachable, {} top-level organizations",
            "✓".green(),
            orgs.len()
        ),
        Err(e) => println!(
            "{} Could not list organizations: {}\n  Saving the configuration anyway.",
            "⚠".yellow(),
            e
        ),
    }

    config.api_host = Some(api_host);
    config.period_id = Some(period_id.trim().to_string()).filter(|p| !p.is_empty());
    config.save_at(opts.config_ref())?;

    let config_path = Config::resolve_path(opts.config_ref())?;
    println!(
        "\n{} Configuration saved to: {}",
        "✓".green(),
        config_path.display()
    );

    if let Some(ref period) = config.period_id {
        println!("  Default period: {}", period.bold());
    }

    println!("\n{}", "You're all set! Try running:".bold());
    println!("  {} - Show configuration status", "orgeval status".cyan());
    println!("  {} - Browse the organization tree", "orgeval org tree".cyan());

    Ok(())
}
