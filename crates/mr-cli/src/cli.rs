//! CLI argument definitions using clap derive API

use clap::{Args, Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

/// migrun - apply SQL migrations through a hosted database's RPC endpoint
#[derive(Parser, Debug)]
#[command(name = "mr")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Global options
    #[command(flatten)]
    pub global: GlobalArgs,

    /// Subcommand to execute
    #[command(subcommand)]
    pub command: Commands,
}

/// Global arguments available to all commands
#[derive(Args, Debug, Clone)]
pub struct GlobalArgs {
    /// Enable verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Path to project directory
    #[arg(short = 'p', long, global = true, default_value = ".")]
    pub project_dir: PathBuf,

    /// Override config file path
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,

    /// Named target from migrun.yml (falls back to MR_TARGET)
    #[arg(short, long, global = true)]
    pub target: Option<String>,
}

/// Available subcommands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Apply migrations in order, stopping at the first failure
    Run(RunArgs),

    /// List the migration plan and which files are present
    Ls(LsArgs),
}

/// Arguments for the run command
#[derive(Args, Debug)]
pub struct RunArgs {
    /// Migration files to run, in order (comma-separated, default: plan from config)
    #[arg(short, long)]
    pub migrations: Option<String>,

    /// Fail on missing migration files instead of skipping them
    #[arg(long)]
    pub strict: bool,

    /// Show what would be submitted without contacting the database
    #[arg(long)]
    pub dry_run: bool,

    /// Service-role key (default: read from the configured environment variable)
    #[arg(long)]
    pub service_key: Option<String>,
}

/// Arguments for the ls command
#[derive(Args, Debug)]
pub struct LsArgs {
    /// Output format
    #[arg(short, long, value_enum, default_value = "table")]
    pub output: LsOutput,

    /// Migration files to list (comma-separated, default: plan from config)
    #[arg(short, long)]
    pub migrations: Option<String>,
}

/// List output formats
#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq)]
pub enum LsOutput {
    /// Table format
    Table,
    /// JSON output
    Json,
}

#[cfg(test)]
#[path = "cli_test.rs"]
mod tests;
