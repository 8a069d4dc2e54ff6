use std::path::PathBuf;

use clap::{Args, Parser, Subcommand, ValueEnum};
use tracker_core::TableQuery;
use tracker_engine::ExportFormat;

/// Find accounts you follow that do not follow you back
#[derive(Debug, Parser)]
#[command(name = "unfollow-tracker")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// RON configuration file (defaults to ./unfollow_tracker.ron when present)
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    /// Log level: off, error, warn, info, debug or trace
    #[arg(long, global = true)]
    pub log_level: Option<String>,

    /// Also write logs to this file
    #[arg(long, global = true)]
    pub log_file: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Reconcile a downloaded account-data archive (zip)
    Export(ExportArgs),

    /// Reconcile the public follower listings of a profile
    Remote(RemoteArgs),

    /// Print the effective configuration as RON
    Config,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum FormatArg {
    Html,
    Json,
}

impl From<FormatArg> for ExportFormat {
    fn from(value: FormatArg) -> Self {
        match value {
            FormatArg::Html => ExportFormat::Html,
            FormatArg::Json => ExportFormat::Json,
        }
    }
}

#[derive(Debug, Args)]
pub struct ExportArgs {
    /// Path to the zip archive
    pub archive: PathBuf,

    /// Data format selected when requesting the download
    #[arg(long, value_enum, default_value_t = FormatArg::Html)]
    pub format: FormatArg,

    /// Render follow dates in local time instead of UTC
    #[arg(long)]
    pub local_time: bool,

    #[command(flatten)]
    pub view: ViewArgs,
}

#[derive(Debug, Args)]
pub struct RemoteArgs {
    /// Profile handle to look up
    pub handle: String,

    /// Stop after this many listing pages per side
    #[arg(long)]
    pub max_pages: Option<u32>,

    #[command(flatten)]
    pub view: ViewArgs,
}

#[derive(Debug, Args)]
pub struct ViewArgs {
    /// Only show usernames containing this text (case-insensitive)
    #[arg(long, default_value = "")]
    pub filter: String,

    /// Page of results to show
    #[arg(long, default_value_t = 1)]
    pub page: usize,

    /// Results per page
    #[arg(long)]
    pub per_page: Option<usize>,

    /// Print JSON instead of a table
    #[arg(long)]
    pub json: bool,
}

impl ViewArgs {
    pub fn table_query(&self, default_per_page: usize) -> TableQuery {
        TableQuery {
            filter: self.filter.clone(),
            page: self.page,
            per_page: self.per_page.unwrap_or(default_per_page),
        }
    }
}
