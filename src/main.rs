mod analyze;
mod cli;
mod config;
mod error;
mod report;
mod scan;
mod types;

use crate::error::MetricsError;
use crate::report::Section;
use crate::scan::LoadOutcome;
use crate::types::config::EngineConfig;
use clap::Parser;
use tracing::level_filters::LevelFilter;
use tracing_subscriber::EnvFilter;

pub mod exit_code {
    pub const SUCCESS: i32 = 0;
    pub const WARNINGS: i32 = 1;
    pub const RUNTIME_FAILURE: i32 = 3;
}

fn init_tracing(verbose: u8, quiet: bool) {
    let level = if quiet {
        LevelFilter::ERROR
    } else {
        match verbose {
            0 => LevelFilter::WARN,
            1 => LevelFilter::INFO,
            _ => LevelFilter::DEBUG,
        }
    };
    let filter = EnvFilter::builder()
        .with_default_directive(level.into())
        .from_env_lossy();
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

/// Config is loaded and validated before any file is scored.
fn load(data: &cli::DataArgs) -> Result<(EngineConfig, LoadOutcome), MetricsError> {
    if !data.data_dir.exists() {
        return Err(MetricsError::PathNotFound(
            data.data_dir.display().to_string(),
        ));
    }
    let engine_config = config::load_config(&data.data_dir, data.config.as_deref())?;
    engine_config.validate()?;
    let outcome = scan::load_projects(
        &data.data_dir,
        &engine_config.language_table(),
        data.strict,
    )?;
    Ok((engine_config, outcome))
}

fn status(outcome: &LoadOutcome, data: &cli::DataArgs) -> i32 {
    if outcome.projects.is_empty() {
        eprintln!("warning: no projects found in {}", data.data_dir.display());
        exit_code::WARNINGS
    } else if outcome.skipped_files > 0 {
        eprintln!(
            "warning: skipped {} malformed metric file(s)",
            outcome.skipped_files
        );
        exit_code::WARNINGS
    } else {
        exit_code::SUCCESS
    }
}

fn print_section(
    data: &cli::DataArgs,
    format: &cli::ReportFormat,
    section: Section,
) -> Result<i32, MetricsError> {
    let (engine_config, outcome) = load(data)?;
    let analysis = analyze::analyze(&outcome.projects, &engine_config)?;
    let output_format = match format {
        cli::ReportFormat::Json => report::OutputFormat::Json,
        cli::ReportFormat::Md => report::OutputFormat::Md,
    };
    let rendered = report::render(&analysis, output_format, section)?;
    println!("{rendered}");
    Ok(status(&outcome, data))
}

fn run() -> Result<i32, MetricsError> {
    let cli = cli::Cli::parse();
    init_tracing(cli.verbose, cli.quiet);
    match cli.command {
        cli::Commands::Analyze(cmd) => print_section(&cmd.data, &cmd.format, Section::All),
        cli::Commands::Projects(cmd) => {
            print_section(&cmd.data, &cmd.format, Section::Projects { top: cmd.top })
        }
        cli::Commands::Languages(cmd) => print_section(&cmd.data, &cmd.format, Section::Languages),
        cli::Commands::Technologies(cmd) => {
            print_section(&cmd.data, &cmd.format, Section::Technologies)
        }
        cli::Commands::Keywords(cmd) => print_section(
            &cmd.data,
            &cmd.format,
            Section::Keywords {
                emerging: cmd.emerging,
            },
        ),
        cli::Commands::Export(cmd) => {
            let (engine_config, outcome) = load(&cmd.data)?;
            let analysis = analyze::analyze(&outcome.projects, &engine_config)?;
            let path = report::export::write_report(&cmd.out, &analysis)?;
            println!("report file: {}", path.display());
            Ok(status(&outcome, &cmd.data))
        }
    }
}

fn main() {
    match run() {
        Ok(code) => {
            if code != 0 {
                std::process::exit(code);
            }
        }
        Err(e) => {
            eprintln!("error: {}", e);
            std::process::exit(exit_code::RUNTIME_FAILURE);
        }
    }
}
