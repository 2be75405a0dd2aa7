//! CLI argument parsing for pdfmanager.
//!
//! This module defines the command-line interface structure using `clap`.
//! It is also compiled by the build script to render the man page, so it
//! must not depend on anything but `clap` and the library.

use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;

use pdfmanager::config::{
    BatchPolicy, Config, Dpi, ImageFormat, MAX_DPI, OverwriteMode, RasterizeOptions, SplitMode,
    SplitOptions, default_output_dir,
};
use pdfmanager::error::{PdfManagerError, Result};

/// Merge, split and rasterize PDF files.
///
/// Run without a subcommand to start an interactive session: paste or drag
/// PDF files into the terminal, select them by number, then merge, split or
/// save them as images.
#[derive(Parser, Debug)]
#[command(name = "pdfmanager")]
#[command(version)]
#[command(about = "Merge, split and rasterize PDF files", long_about = None)]
#[command(author)]
pub struct Cli {
    /// Operation to run; starts an interactive session when omitted
    #[command(subcommand)]
    pub command: Option<Command>,

    #[command(flatten)]
    pub global: GlobalArgs,
}

/// Flags accepted by every subcommand.
#[derive(Args, Debug, Clone, Default)]
pub struct GlobalArgs {
    /// Verbose output - show paths and per-file details
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Suppress all non-error output
    ///
    /// Only errors and warnings will be printed.
    #[arg(short, long, global = true, conflicts_with = "verbose")]
    pub quiet: bool,

    /// Stop a split or rasterize batch at the first failed file
    ///
    /// By default a failed file is reported and the remaining files are
    /// still processed.
    #[arg(long, global = true)]
    pub stop_on_error: bool,

    /// Default directory for saved files
    ///
    /// Preselected in the session's save and folder prompts.
    /// Defaults to the Downloads directory.
    #[arg(long, global = true, value_name = "DIR")]
    pub output_dir: Option<PathBuf>,

    /// Directory containing the PDFium library
    ///
    /// Searched before the `pdfium` directory next to the executable and
    /// the system library path.
    #[arg(long, global = true, value_name = "DIR", env = "PDFMANAGER_PDFIUM_PATH")]
    pub pdfium_path: Option<PathBuf>,

    /// Write PDFs without stream compression
    #[arg(long, global = true)]
    pub no_compress: bool,
}

/// Subcommands.
#[derive(Subcommand, Debug, Clone)]
pub enum Command {
    /// Merge PDF files into one document, in the order given
    ///
    /// Examples:
    ///   pdfmanager merge a.pdf b.pdf -o merged.pdf
    ///   pdfmanager merge 'chapters/*.pdf' -o book.pdf
    Merge(MergeArgs),

    /// Split PDF files into pages or page ranges
    ///
    /// Examples:
    ///   pdfmanager split report.pdf -d out
    ///   pdfmanager split report.pdf -d out --mode each --pages 1-3,5
    ///   pdfmanager split report.pdf -d out --mode combined --pages 1-3,5
    Split(SplitArgs),

    /// Save every page of PDF files as images
    ///
    /// Example:
    ///   pdfmanager rasterize slides.pdf -d images --format jpeg --dpi 150
    Rasterize(RasterizeArgs),

    /// Show page count, version and size of PDF files
    Info(InfoArgs),

    /// Start an interactive session (the default)
    Session,
}

/// Arguments of `merge`.
#[derive(Args, Debug, Clone)]
pub struct MergeArgs {
    /// Input PDF files or glob patterns, merged in order
    #[arg(required = true, num_args = 1.., value_name = "FILE")]
    pub inputs: Vec<String>,

    /// Output PDF file path
    #[arg(short, long, value_name = "FILE")]
    pub output: PathBuf,

    /// Overwrite an existing output file without asking
    #[arg(short, long)]
    pub force: bool,

    /// Never overwrite an existing output file
    #[arg(long, conflicts_with = "force")]
    pub no_clobber: bool,
}

/// Arguments of `split`.
#[derive(Args, Debug, Clone)]
pub struct SplitArgs {
    /// Input PDF files or glob patterns
    #[arg(required = true, num_args = 1.., value_name = "FILE")]
    pub inputs: Vec<String>,

    /// Directory for the split files (defaults to --output-dir)
    #[arg(short = 'd', long = "dir", value_name = "DIR")]
    pub dir: Option<PathBuf>,

    /// How to split
    ///
    /// - all: one file per page
    /// - each: one file per entry of --pages
    /// - combined: all of --pages in one file
    #[arg(short, long, value_name = "MODE", default_value = "all")]
    #[arg(value_parser = ["all", "each", "combined"])]
    pub mode: String,

    /// Page ranges, e.g. "1-3,5" (required for each and combined)
    #[arg(short, long, value_name = "RANGE")]
    pub pages: Option<String>,

    /// Never overwrite existing files
    #[arg(long)]
    pub no_clobber: bool,
}

/// Arguments of `rasterize`.
#[derive(Args, Debug, Clone)]
pub struct RasterizeArgs {
    /// Input PDF files or glob patterns
    #[arg(required = true, num_args = 1.., value_name = "FILE")]
    pub inputs: Vec<String>,

    /// Directory for the images (defaults to --output-dir)
    #[arg(short = 'd', long = "dir", value_name = "DIR")]
    pub dir: Option<PathBuf>,

    /// Image format
    #[arg(long, value_name = "FORMAT", default_value = "png")]
    #[arg(value_parser = ["png", "jpeg", "jpg", "bmp", "tiff", "tif"])]
    pub format: String,

    /// Rendering resolution in dots per inch
    #[arg(long, value_name = "N", default_value_t = 200)]
    #[arg(value_parser = clap::value_parser!(u32).range(1..=i64::from(MAX_DPI)))]
    pub dpi: u32,

    /// Never overwrite existing files
    #[arg(long)]
    pub no_clobber: bool,
}

/// Arguments of `info`.
#[derive(Args, Debug, Clone)]
pub struct InfoArgs {
    /// Input PDF files or glob patterns
    #[arg(required = true, num_args = 1.., value_name = "FILE")]
    pub inputs: Vec<String>,

    /// Print the results as JSON
    #[arg(long)]
    pub json: bool,
}

impl Cli {
    /// Convert CLI arguments into a validated Config.
    ///
    /// `merge` asks before overwriting unless `--force` or `--no-clobber`
    /// is given; every other command overwrites unless `--no-clobber` is
    /// given.
    ///
    /// # Errors
    ///
    /// Returns an error if the configuration fails validation.
    pub fn to_config(&self) -> Result<Config> {
        let overwrite_mode = match &self.command {
            Some(Command::Merge(args)) if args.force => OverwriteMode::Force,
            Some(Command::Merge(args)) if args.no_clobber => OverwriteMode::NoClobber,
            Some(Command::Merge(_)) => OverwriteMode::Prompt,
            Some(Command::Split(SplitArgs { no_clobber, .. }))
            | Some(Command::Rasterize(RasterizeArgs { no_clobber, .. }))
                if *no_clobber =>
            {
                OverwriteMode::NoClobber
            }
            _ => OverwriteMode::Force,
        };

        let batch_policy = if self.global.stop_on_error {
            BatchPolicy::StopOnError
        } else {
            BatchPolicy::Continue
        };

        let config = Config {
            default_dir: self
                .global
                .output_dir
                .clone()
                .unwrap_or_else(default_output_dir),
            pdfium_path: self.global.pdfium_path.clone(),
            verbose: self.global.verbose,
            quiet: self.global.quiet,
            overwrite_mode,
            batch_policy,
            compress: !self.global.no_compress,
        };

        config.validate().map_err(|e| {
            PdfManagerError::invalid_config(format!("Configuration validation failed: {e}"))
        })?;

        Ok(config)
    }
}

impl SplitArgs {
    /// Split options described by `--mode` and `--pages`.
    ///
    /// # Errors
    ///
    /// Returns an error if the mode is unknown, or a range mode is used
    /// without a valid `--pages`.
    pub fn options(&self) -> Result<SplitOptions> {
        let mode: SplitMode = self.mode.parse()?;
        SplitOptions::from_mode(mode, self.pages.as_deref())
    }
}

impl RasterizeArgs {
    /// Image options described by `--format` and `--dpi`.
    ///
    /// # Errors
    ///
    /// Returns an error if the format is unknown or the DPI is out of range.
    pub fn options(&self) -> Result<RasterizeOptions> {
        let format: ImageFormat = self.format.parse()?;
        let dpi = Dpi::new(self.dpi)?;
        Ok(RasterizeOptions { format, dpi })
    }
}
