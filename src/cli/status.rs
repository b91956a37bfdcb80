//! Status command implementation

use colored::Colorize;

use crate::cli::args::GlobalOptions;
use crate::config::Config;
use crate::error::Result;

/// Run the status command to display configuration status
pub fn run(opts: &GlobalOptions) -> Result<()> {
    println!("{}\n", "orgeval Configuration Status".bold());

    match Config::load_at(opts.config_ref()) {
        Ok(config) => {
            let config_path = Config::resolve_path(opts.config_ref())?;
            println!("Config file: {}", config_path.display().to_string().cyan());
            println!();

            let host = config.api_host_or(opts.api_host_ref());
            if opts.api_host.is_some() {
                println!(
                    "{} API host: {} {}",
                    "✓".green(),
                    host,
                    "(via --api-host)".dimmed()
                );
            } else if config.api_host.is_some() {
                println!("{} API host: {}", "✓".green(), host);
            } else {
                println!("{} API host: {} {}", "○".dimmed(), host, "(default)".dimmed());
            }

            if let Some(ref period) = config.period_id {
                println!("{} Default period: {}", "✓".green(), period);
            } else {
                println!("{} No default period set", "○".dimmed());
                println!("  → Pass --period to 'orgeval assign' or run 'orgeval init'");
            }

            let prefs = &config.preferences;
            println!(
                "{} Collect budget: depth {}, nodes {}",
                "○".dimmed(),
                opts.max_depth.unwrap_or(prefs.max_depth),
                opts.max_nodes.unwrap_or(prefs.max_nodes)
            );
            println!(
                "{} Rate limit: {} requests/second",
                "○".dimmed(),
                prefs.requests_per_second
            );
            println!();
        }
        Err(_) => {
            println!("{} Configuration not found", "✗".red());
            println!();
            println!(
                "Run {} to create a configuration file.",
                "orgeval init".cyan()
            );
            println!();
        }
    }

    Ok(())
}
