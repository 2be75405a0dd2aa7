//! pdfmanager - Merge, split and rasterize PDF files.
//!
//! Runs one operation from the command line, or an interactive session
//! when no subcommand is given.

mod cli;
mod prompter;
mod repl;

use clap::Parser;
use std::process;
use tracing::Level;

use crate::cli::{Cli, Command, GlobalArgs, InfoArgs, MergeArgs, RasterizeArgs, SplitArgs};
use crate::prompter::{PresetPrompter, TerminalPrompter};
use pdfmanager::config::Config;
use pdfmanager::error::PdfManagerError;
use pdfmanager::output::{OutputFormatter, display_action_report, display_validation_summary};
use pdfmanager::raster::PdfiumRenderer;
use pdfmanager::session::{ActionReport, Session};
use pdfmanager::utils::collect_paths_for_patterns;
use pdfmanager::validation::Validator;

#[tokio::main(flavor = "current_thread")]
async fn main() {
    let cli = Cli::parse();
    init_tracing(&cli.global);

    match run(cli).await {
        Ok(0) => {}
        Ok(code) => process::exit(code),
        Err(err) => {
            eprintln!("Error: {err}");
            process::exit(err.exit_code());
        }
    }
}

/// Diagnostics go to stderr: warnings by default, everything with
/// `--verbose`.
fn init_tracing(global: &GlobalArgs) {
    let level = if global.verbose {
        Level::DEBUG
    } else {
        Level::WARN
    };

    tracing_subscriber::fmt()
        .with_max_level(level)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();
}

/// Main application logic. Returns the process exit code.
async fn run(cli: Cli) -> Result<i32, PdfManagerError> {
    let config = cli.to_config()?;
    let formatter = OutputFormatter::from_config(&config);

    match cli.command {
        Some(Command::Merge(args)) => merge(args, config, formatter).await,
        Some(Command::Split(args)) => split(args, config, formatter).await,
        Some(Command::Rasterize(args)) => rasterize(args, config, formatter).await,
        Some(Command::Info(args)) => info(args, config, formatter).await,
        Some(Command::Session) | None => interactive(config, formatter).await,
    }
}

fn one_shot_session(
    config: Config,
    prompter: PresetPrompter,
    inputs: &[String],
) -> Result<Session<PresetPrompter, PdfiumRenderer>, PdfManagerError> {
    let paths = collect_paths_for_patterns(inputs)?;
    let renderer = PdfiumRenderer::new(config.pdfium_path.clone());

    let mut session = Session::new(config, prompter, renderer);
    session.drop_paths(paths);
    session.select_all();
    Ok(session)
}

fn finish(formatter: &OutputFormatter, report: &ActionReport) -> i32 {
    display_action_report(formatter, report);
    report.exit_code()
}

async fn merge(
    args: MergeArgs,
    config: Config,
    formatter: OutputFormatter,
) -> Result<i32, PdfManagerError> {
    let prompter = PresetPrompter::new(formatter.clone()).save_to(args.output);
    let mut session = one_shot_session(config, prompter, &args.inputs)?;

    formatter.info(&format!("Merging {} PDF files...", session.files().len()));
    let report = session.merge().await;
    Ok(finish(&formatter, &report))
}

async fn split(
    args: SplitArgs,
    config: Config,
    formatter: OutputFormatter,
) -> Result<i32, PdfManagerError> {
    let options = args.options()?;
    let dir = args.dir.clone().unwrap_or_else(|| config.default_dir.clone());
    let prompter = PresetPrompter::new(formatter.clone())
        .directory(dir)
        .split(options);

    let mut session = one_shot_session(config, prompter, &args.inputs)?;
    let report = session.split_selected().await;
    Ok(finish(&formatter, &report))
}

async fn rasterize(
    args: RasterizeArgs,
    config: Config,
    formatter: OutputFormatter,
) -> Result<i32, PdfManagerError> {
    let options = args.options()?;
    let dir = args.dir.clone().unwrap_or_else(|| config.default_dir.clone());
    let prompter = PresetPrompter::new(formatter.clone())
        .directory(dir)
        .image(options);

    let mut session = one_shot_session(config, prompter, &args.inputs)?;
    let report = session.rasterize_selected().await;
    Ok(finish(&formatter, &report))
}

async fn info(
    args: InfoArgs,
    config: Config,
    formatter: OutputFormatter,
) -> Result<i32, PdfManagerError> {
    let paths = collect_paths_for_patterns(&args.inputs)?;
    let summary = Validator::new()
        .validate_files(&paths, config.batch_policy)
        .await?;

    if args.json {
        let json = serde_json::to_string_pretty(&summary)
            .map_err(|e| PdfManagerError::other(format!("Failed to encode JSON: {e}")))?;
        println!("{json}");
    } else {
        display_validation_summary(&formatter, &summary);
    }

    Ok(if summary.failures.is_empty() { 0 } else { 1 })
}

async fn interactive(config: Config, formatter: OutputFormatter) -> Result<i32, PdfManagerError> {
    if formatter.should_print() {
        formatter.section(&format!("{} v{}", pdfmanager::NAME, pdfmanager::VERSION));
    }

    let renderer = PdfiumRenderer::new(config.pdfium_path.clone());
    let prompter = TerminalPrompter::stdin(formatter.clone());
    let mut session = Session::new(config, prompter, renderer);

    repl::run(&mut session, &formatter).await;
    Ok(0)
}
