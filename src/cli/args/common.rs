//! Common CLI types shared across commands

/// Output format options
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, clap::ValueEnum)]
pub enum OutputFormat {
    /// Pretty format - indented tree and human-oriented summaries (default)
    #[default]
    Pretty,
    /// Table format - one row per organization
    Table,
    /// JSON format - structured for scripts/APIs
    Json,
}
