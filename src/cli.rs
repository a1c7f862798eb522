use clap::{Args, Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

#[derive(Parser)]
#[command(
    name = "ossmetrics",
    version,
    about = "Influence scoring and technology maturity analysis for open-source metric data"
)]
pub struct Cli {
    /// Increase verbosity (-v for info, -vv for debug)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Suppress all output except errors
    #[arg(short, long, global = true, conflicts_with = "verbose")]
    pub quiet: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Full report: ranking, languages, technologies, keywords
    Analyze(AnalyzeCommand),
    /// Influence ranking table
    Projects(ProjectsCommand),
    /// Per-language statistics, growth trends and ecosystem summary
    Languages(SectionCommand),
    /// Rule-table technology maturity
    Technologies(SectionCommand),
    /// TF-IDF keyword ranking
    Keywords(KeywordsCommand),
    /// Write report.json to a directory
    Export(ExportCommand),
}

/// Options shared by every command that loads a data directory.
#[derive(Args)]
pub struct DataArgs {
    /// Directory laid out as <org>/<repo>/<metric>.json
    pub data_dir: PathBuf,
    /// Config file used in place of <data_dir>/ossmetrics.toml
    #[arg(long)]
    pub config: Option<PathBuf>,
    /// Fail on the first malformed metric file instead of skipping it
    #[arg(long)]
    pub strict: bool,
}

#[derive(Args)]
pub struct AnalyzeCommand {
    #[command(flatten)]
    pub data: DataArgs,
    #[arg(short, long, value_enum, default_value = "md")]
    pub format: ReportFormat,
}

#[derive(Args)]
pub struct ProjectsCommand {
    #[command(flatten)]
    pub data: DataArgs,
    #[arg(short, long, value_enum, default_value = "md")]
    pub format: ReportFormat,
    /// Only show the N most influential projects
    #[arg(long)]
    pub top: Option<usize>,
}

#[derive(Args)]
pub struct SectionCommand {
    #[command(flatten)]
    pub data: DataArgs,
    #[arg(short, long, value_enum, default_value = "md")]
    pub format: ReportFormat,
}

#[derive(Args)]
pub struct KeywordsCommand {
    #[command(flatten)]
    pub data: DataArgs,
    #[arg(short, long, value_enum, default_value = "md")]
    pub format: ReportFormat,
    /// Only keywords that pass the emerging thresholds
    #[arg(long)]
    pub emerging: bool,
}

#[derive(Args)]
pub struct ExportCommand {
    #[command(flatten)]
    pub data: DataArgs,
    #[arg(long)]
    pub out: PathBuf,
}

#[derive(Clone, ValueEnum)]
pub enum ReportFormat {
    Json,
    Md,
}
