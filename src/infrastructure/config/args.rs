use super::app_config::LogLevel;
use clap::Parser;
use std::path::PathBuf;

#[derive(Debug, Parser)]
#[command(
    name = "fete",
    version,
    about = "A terminal admin client for the Party Planner events service",
    long_about = None
)]
pub struct CliArgs {
    /// Configuration file path.
    #[arg(short, long, value_name = "PATH")]
    pub config: Option<PathBuf>,

    /// API base URL.
    #[arg(long, value_name = "URL", env = "FETE_BASE_URL")]
    pub base_url: Option<String>,

    /// Cohort path segment between the base URL and the resource.
    #[arg(long, value_name = "COHORT", env = "FETE_COHORT")]
    pub cohort: Option<String>,

    /// Log file path.
    #[arg(long, value_name = "PATH")]
    pub log_path: Option<PathBuf>,

    /// Log verbosity level.
    #[arg(long, value_enum)]
    pub log_level: Option<LogLevel>,

    /// Accent color (name or hex code).
    #[arg(long)]
    pub accent_color: Option<String>,
}
