//! Command execution context
//!
//! Loads configuration once, merges the global flag overrides into it and
//! builds the API client, so command handlers start from a ready session.

use std::time::Duration;

use indicatif::{ProgressBar, ProgressStyle};
use log::debug;

use crate::cli::OutputFormat;
use crate::cli::args::GlobalOptions;
use crate::client::SurveyClient;
use crate::config::Config;
use crate::error::Result;
use crate::session::AssignmentSession;
use crate::tree::CollectBudget;

/// Context for command execution containing config, client, and runtime options.
pub struct CommandContext {
    /// Loaded configuration (defaults when no file exists)
    pub config: Config,
    /// Survey backend client
    pub client: SurveyClient,
    /// Output format preference
    pub format: OutputFormat,
    /// Collect budget after flag overrides
    pub budget: CollectBudget,
}

impl CommandContext {
    /// Create a new command context.
    ///
    /// A missing config file is not an error here: every setting has a
    /// default or a flag, so `orgeval --api-host ... org tree` works without
    /// running `init` first.
    pub fn new(opts: &GlobalOptions) -> Result<Self> {
        let config = Config::load_or_default(opts.config_ref())?;

        let api_host = config.api_host_or(opts.api_host_ref()).to_string();
        debug!("Using survey backend at {}", api_host);
        let client =
            SurveyClient::with_rate_limit(api_host, config.preferences.requests_per_second)?;

        let budget = CollectBudget::new(
            opts.max_depth.unwrap_or(config.preferences.max_depth),
            opts.max_nodes.unwrap_or(config.preferences.max_nodes),
        );

        Ok(Self {
            config,
            client,
            format: opts.format,
            budget,
        })
    }

    /// Turn the context into an assignment session for one period.
    pub fn into_session(self, period_id: impl Into<String>) -> AssignmentSession<SurveyClient> {
        AssignmentSession::with_budget(self.client, period_id, self.budget)
    }
}

/// Spinner on stderr for operations that may cascade into many fetches.
///
/// Hidden automatically when stderr is not a terminal.
pub fn spinner(message: impl Into<String>) -> ProgressBar {
    let spinner = ProgressBar::new_spinner();
    spinner.set_style(
        ProgressStyle::default_spinner()
            .template("{spinner:.cyan} {msg}")
            .unwrap_or_else(|_| ProgressStyle::default_spinner()),
    );
    spinner.set_message(message.into());
    spinner.enable_steady_tick(Duration::from_millis(80));
    spinner
}
