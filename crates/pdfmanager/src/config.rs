//! Configuration and operation options.
//!
//! [`Config`] holds the session-wide settings derived from CLI arguments and
//! environment. The option types ([`SplitOptions`], [`RasterizeOptions`])
//! are what the option dialogs produce for a single operation.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::PathBuf;
use std::str::FromStr;

use crate::error::{PdfManagerError, Result};
use crate::range::PageRange;

/// Application name, used as the prefix of generated file names.
pub const APP_NAME: &str = "PDFManager";

/// Resolution used when the DPI field cannot be parsed.
pub const DEFAULT_DPI: u32 = 200;

/// Highest accepted resolution. A letter page at this DPI is already a
/// 10200x13200 bitmap.
pub const MAX_DPI: u32 = 1200;

/// Raster output format.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ImageFormat {
    /// Portable Network Graphics (default).
    #[default]
    Png,
    /// JPEG.
    Jpeg,
    /// Windows bitmap.
    Bmp,
    /// TIFF.
    Tiff,
}

impl ImageFormat {
    /// All formats, in dialog order.
    pub const ALL: [ImageFormat; 4] = [Self::Png, Self::Jpeg, Self::Bmp, Self::Tiff];

    /// File extension written for this format.
    pub fn extension(&self) -> &'static str {
        match self {
            Self::Png => "png",
            Self::Jpeg => "jpg",
            Self::Bmp => "bmp",
            Self::Tiff => "tiff",
        }
    }

    /// Label shown in the image options dialog.
    pub fn label(&self) -> &'static str {
        match self {
            Self::Png => "PNG",
            Self::Jpeg => "JPEG(JPG)",
            Self::Bmp => "BMP",
            Self::Tiff => "TIFF(TIF)",
        }
    }

    /// Encoder format in the `image` crate.
    pub fn to_image_format(self) -> image::ImageFormat {
        match self {
            Self::Png => image::ImageFormat::Png,
            Self::Jpeg => image::ImageFormat::Jpeg,
            Self::Bmp => image::ImageFormat::Bmp,
            Self::Tiff => image::ImageFormat::Tiff,
        }
    }
}

impl FromStr for ImageFormat {
    type Err = PdfManagerError;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_lowercase().as_str() {
            "png" => Ok(Self::Png),
            "jpeg" | "jpg" => Ok(Self::Jpeg),
            "bmp" => Ok(Self::Bmp),
            "tiff" | "tif" => Ok(Self::Tiff),
            _ => Err(PdfManagerError::invalid_config(format!(
                "Invalid image format: {s}. Must be one of: png, jpeg, bmp, tiff"
            ))),
        }
    }
}

impl fmt::Display for ImageFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Rendering resolution in dots per inch, between 1 and [`MAX_DPI`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Dpi(u32);

impl Dpi {
    /// Create a DPI value.
    ///
    /// # Errors
    ///
    /// Returns [`PdfManagerError::InvalidConfig`] for zero or anything above
    /// [`MAX_DPI`].
    pub fn new(value: u32) -> Result<Self> {
        if (1..=MAX_DPI).contains(&value) {
            Ok(Self(value))
        } else {
            Err(PdfManagerError::invalid_config(format!(
                "DPI must be between 1 and {MAX_DPI}, got {value}"
            )))
        }
    }

    /// Parse user input, falling back to [`DEFAULT_DPI`] on anything that
    /// is not an integer in the accepted range.
    ///
    /// ```
    /// use pdfmanager::config::Dpi;
    ///
    /// assert_eq!(Dpi::parse_or_default("150").get(), 150);
    /// assert_eq!(Dpi::parse_or_default("abc").get(), 200);
    /// ```
    pub fn parse_or_default(text: &str) -> Self {
        text.trim()
            .parse::<u32>()
            .ok()
            .and_then(|value| Self::new(value).ok())
            .unwrap_or_default()
    }

    /// The raw value.
    pub fn get(&self) -> u32 {
        self.0
    }

    /// Scale factor from PDF points (1/72 inch) to pixels.
    pub fn scale_factor(&self) -> f32 {
        self.0 as f32 / 72.0
    }
}

impl Default for Dpi {
    fn default() -> Self {
        Self(DEFAULT_DPI)
    }
}

impl fmt::Display for Dpi {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// How a document is split.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum SplitMode {
    /// One file per page.
    #[default]
    All,
    /// One file per range token.
    EachRange,
    /// All requested pages in one file.
    CombinedRanges,
}

impl FromStr for SplitMode {
    type Err = PdfManagerError;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_lowercase().as_str() {
            "all" => Ok(Self::All),
            "each" | "each-range" => Ok(Self::EachRange),
            "combined" | "combined-ranges" => Ok(Self::CombinedRanges),
            _ => Err(PdfManagerError::invalid_config(format!(
                "Invalid split mode: {s}. Must be one of: all, each, combined"
            ))),
        }
    }
}

/// Options for splitting one document.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SplitOptions {
    /// Every page to its own file.
    AllPages,
    /// Each token of the range to its own file.
    EachRange(PageRange),
    /// All tokens of the range into one file.
    CombinedRanges(PageRange),
}

impl SplitOptions {
    /// Build options from a mode and optional range text.
    ///
    /// # Errors
    ///
    /// Returns an error if a range mode is requested without a range or the
    /// range text does not parse.
    pub fn from_mode(mode: SplitMode, range: Option<&str>) -> Result<Self> {
        let parse_range = || match range {
            Some(text) => PageRange::parse(text),
            None => Err(PdfManagerError::invalid_page_range(
                "",
                "a page range is required for this split mode",
            )),
        };

        match mode {
            SplitMode::All => Ok(Self::AllPages),
            SplitMode::EachRange => Ok(Self::EachRange(parse_range()?)),
            SplitMode::CombinedRanges => Ok(Self::CombinedRanges(parse_range()?)),
        }
    }

    /// The mode these options represent.
    pub fn mode(&self) -> SplitMode {
        match self {
            Self::AllPages => SplitMode::All,
            Self::EachRange(_) => SplitMode::EachRange,
            Self::CombinedRanges(_) => SplitMode::CombinedRanges,
        }
    }

    /// The page range, if the mode uses one.
    pub fn range(&self) -> Option<&PageRange> {
        match self {
            Self::AllPages => None,
            Self::EachRange(range) | Self::CombinedRanges(range) => Some(range),
        }
    }
}

/// Options for rasterizing documents.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct RasterizeOptions {
    /// Output image format.
    pub format: ImageFormat,
    /// Rendering resolution.
    pub dpi: Dpi,
}

/// Output file overwrite behavior.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum OverwriteMode {
    /// Prompt the user before overwriting.
    Prompt,
    /// Always overwrite without prompting (default).
    #[default]
    Force,
    /// Never overwrite, error if file exists.
    NoClobber,
}

/// What a batch operation does after one file fails.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum BatchPolicy {
    /// Report the failure and move on to the next file (default).
    #[default]
    Continue,
    /// Report the failure and skip the remaining files.
    StopOnError,
}

/// Session-wide configuration.
#[derive(Debug, Clone)]
pub struct Config {
    /// Directory preselected in save and folder dialogs.
    pub default_dir: PathBuf,

    /// Directory holding the PDFium library, if configured.
    pub pdfium_path: Option<PathBuf>,

    /// Verbose output mode.
    pub verbose: bool,

    /// Quiet mode - suppress non-error output.
    pub quiet: bool,

    /// File overwrite behavior.
    pub overwrite_mode: OverwriteMode,

    /// Failure handling for split and rasterize batches.
    pub batch_policy: BatchPolicy,

    /// Compress written PDFs.
    pub compress: bool,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            default_dir: default_output_dir(),
            pdfium_path: None,
            verbose: false,
            quiet: false,
            overwrite_mode: OverwriteMode::default(),
            batch_policy: BatchPolicy::default(),
            compress: true,
        }
    }
}

impl Config {
    /// Validate the configuration.
    ///
    /// # Errors
    ///
    /// Returns an error if verbose and quiet are both enabled, or if the
    /// default directory exists but is not a directory.
    pub fn validate(&self) -> Result<()> {
        if self.verbose && self.quiet {
            return Err(PdfManagerError::invalid_config(
                "Cannot use both --verbose and --quiet",
            ));
        }

        if self.default_dir.exists() && !self.default_dir.is_dir() {
            return Err(PdfManagerError::invalid_config(format!(
                "Output directory is not a directory: {}",
                self.default_dir.display()
            )));
        }

        if let Some(path) = &self.pdfium_path
            && path.exists()
            && !path.is_dir()
        {
            return Err(PdfManagerError::invalid_config(format!(
                "PDFium path must be a directory: {}",
                path.display()
            )));
        }

        Ok(())
    }

    /// Default destination offered by the merge save dialog.
    pub fn default_merge_output(&self) -> PathBuf {
        self.default_dir
            .join(format!("{APP_NAME}_result_merged.pdf"))
    }

    /// Whether a batch should stop after a failed file.
    pub fn stop_on_error(&self) -> bool {
        self.batch_policy == BatchPolicy::StopOnError
    }
}

/// The user's Downloads directory, falling back to home and then the
/// current directory.
pub fn default_output_dir() -> PathBuf {
    dirs::download_dir()
        .or_else(dirs::home_dir)
        .unwrap_or_else(|| PathBuf::from("."))
}
