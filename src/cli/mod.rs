//! CLI command definitions and handlers

use clap::{Parser, Subcommand};
pub use clap_complete::Shell;

use crate::client::OrgId;

pub mod args;
pub mod assign;
pub mod context;
pub mod init;
pub mod org;
pub mod status;

pub use args::OutputFormat;
pub use context::CommandContext;

/// orgeval - pick organizations from the survey tree and assign them to an evaluation period
#[derive(Parser, Debug)]
#[command(name = "orgeval")]
#[command(version, about, long_about = None)]
pub struct Cli {
    /// Subcommand to execute
    #[command(subcommand)]
    pub command: Commands,

    /// Output format (pretty, table, json)
    #[arg(
        long,
        global = true,
        env = "ORGEVAL_FORMAT",
        default_value = "pretty",
        hide_env = true,
        hide_possible_values = true
    )]
    pub format: OutputFormat,

    /// Override config file location
    #[arg(long, global = true, env = "ORGEVAL_CONFIG", hide_env = true)]
    pub config: Option<String>,

    /// Override the survey backend URL
    #[arg(long, global = true, env = "ORGEVAL_API_HOST", hide_env = true)]
    pub api_host: Option<String>,

    /// Enable debug logging
    #[arg(long, global = true, env = "ORGEVAL_DEBUG", hide_env = true)]
    pub debug: bool,

    /// Maximum depth walked when collecting a subtree
    #[arg(long, global = true, env = "ORGEVAL_MAX_DEPTH", hide_env = true)]
    pub max_depth: Option<usize>,

    /// Maximum number of organizations collected from a subtree
    #[arg(long, global = true, env = "ORGEVAL_MAX_NODES", hide_env = true)]
    pub max_nodes: Option<usize>,
}

/// Available CLI commands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Initialize orgeval configuration
    Init,

    /// Show configuration status
    Status,

    /// Display version information
    Version,

    /// Browse the organization tree
    #[command(subcommand)]
    Org(OrgCommands),

    /// Assign organizations and their subtrees to an evaluation period
    #[command(after_help = "EXAMPLES:\n  \
            orgeval assign 10 --period 2024-H1         # Org 10 and everything below it\n  \
            orgeval assign 10,20 -p 2024-H1 --dry-run  # Preview the save set\n  \
            orgeval assign 10 --yes                    # Skip confirmation, use config period")]
    Assign {
        /// Organization IDs to check, comma-separated or repeated
        #[arg(required = true, value_delimiter = ',')]
        ids: Vec<OrgId>,

        /// Evaluation period ID (defaults to the configured period)
        #[arg(long, short = 'p', env = "ORGEVAL_PERIOD_ID", hide_env = true)]
        period: Option<String>,

        /// Preview without saving
        #[arg(long, short = 'n')]
        dry_run: bool,

        /// Skip confirmation prompt
        #[arg(long, short = 'y')]
        yes: bool,
    },

    /// Generate shell completions (static)
    #[command(after_help = "\
Static completions (subcommands/flags only):
  bash:   orgeval completion bash > /etc/bash_completion.d/orgeval
  zsh:    orgeval completion zsh > \"${fpath[1]}/_orgeval\"
  fish:   orgeval completion fish > ~/.config/fish/completions/orgeval.fish")]
    Completion {
        /// Shell to generate completions for
        #[arg(value_enum)]
        shell: Shell,
    },
}

/// Organization tree subcommands
#[derive(Subcommand, Debug)]
pub enum OrgCommands {
    /// Show the organization tree
    #[command(after_help = "EXAMPLES:\n  \
            orgeval org tree                   # Top level only\n  \
            orgeval org tree --expand 11       # Reveal and open org 11\n  \
            orgeval org tree --all             # Everything, within the collect budget\n  \
            orgeval org tree --all -c 10       # Everything except the subtree under 10\n  \
            orgeval org tree --select 10       # Preview checkboxes for org 10's subtree")]
    Tree {
        /// Organization IDs to expand, comma-separated or repeated
        #[arg(long, short = 'e', value_delimiter = ',')]
        expand: Vec<OrgId>,

        /// Expand the whole tree
        #[arg(long, short = 'a')]
        all: bool,

        /// Organization IDs to keep collapsed, applied after expansion
        #[arg(long, short = 'c', value_delimiter = ',')]
        collapse: Vec<OrgId>,

        /// Organization IDs to check, comma-separated or repeated
        #[arg(long, short = 's', value_delimiter = ',')]
        select: Vec<OrgId>,
    },

    /// List the direct children of a parent code
    Children {
        /// Parent code; "1" is the root
        #[arg(default_value = crate::client::ROOT_UP_CODE)]
        up_code: String,
    },

    /// List every descendant of an organization
    Descendants {
        /// Organization ID
        id: OrgId,
    },
}
