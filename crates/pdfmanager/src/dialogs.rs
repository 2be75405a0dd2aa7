//! Option dialogs as plain state machines.
//!
//! A dialog holds the current state of its controls, applies the
//! enable/disable rules between them, and turns that state into operation
//! options on confirm. Rendering and input belong to the
//! [`Prompter`](crate::session::Prompter).

use crate::config::{Dpi, ImageFormat, RasterizeOptions, SplitOptions};
use crate::error::Result;
use crate::range::PageRange;

/// How a dialog was closed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DialogOutcome<T> {
    /// The user confirmed; carries the collected options.
    Accepted(T),
    /// The user cancelled.
    Cancelled,
}

impl<T> DialogOutcome<T> {
    /// The accepted value, if any.
    pub fn accepted(self) -> Option<T> {
        match self {
            Self::Accepted(value) => Some(value),
            Self::Cancelled => None,
        }
    }

    /// Whether the dialog was cancelled.
    pub fn is_cancelled(&self) -> bool {
        matches!(self, Self::Cancelled)
    }
}

/// Top-level choice in the split dialog.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SplitChoice {
    /// Split every page.
    #[default]
    All,
    /// Split a page range.
    Range,
}

/// Sub-choice for range splits.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum RangeMode {
    /// One file per token.
    #[default]
    Each,
    /// One file for all tokens.
    Combined,
}

/// State of the split options dialog.
///
/// The range text and [`RangeMode`] are only editable while
/// [`SplitChoice::Range`] is selected. Switching back to
/// [`SplitChoice::All`] resets the mode to [`RangeMode::Each`].
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SplitOptionsDialog {
    choice: SplitChoice,
    range_text: String,
    range_mode: RangeMode,
}

impl SplitOptionsDialog {
    /// Create a dialog with "all pages" selected.
    pub fn new() -> Self {
        Self::default()
    }

    /// Select a top-level choice.
    pub fn choose(&mut self, choice: SplitChoice) {
        self.choice = choice;
        if choice == SplitChoice::All {
            self.range_mode = RangeMode::Each;
        }
    }

    /// Whether the range field and mode choice accept input.
    pub fn range_controls_enabled(&self) -> bool {
        self.choice == SplitChoice::Range
    }

    /// Replace the range text. Ignored while the field is disabled.
    pub fn set_range_text(&mut self, text: impl Into<String>) {
        if self.range_controls_enabled() {
            self.range_text = text.into();
        }
    }

    /// Select the range mode. Ignored while the choice is disabled.
    pub fn set_range_mode(&mut self, mode: RangeMode) {
        if self.range_controls_enabled() {
            self.range_mode = mode;
        }
    }

    /// Current top-level choice.
    pub fn choice(&self) -> SplitChoice {
        self.choice
    }

    /// Current range text.
    pub fn range_text(&self) -> &str {
        &self.range_text
    }

    /// Current range mode.
    pub fn range_mode(&self) -> RangeMode {
        self.range_mode
    }

    /// Collect the options.
    ///
    /// # Errors
    ///
    /// Returns [`InvalidPageRange`](crate::error::PdfManagerError::InvalidPageRange)
    /// if a range split is chosen and the text does not parse. The dialog
    /// state is unchanged so the user can correct it.
    pub fn confirm(&self) -> Result<DialogOutcome<SplitOptions>> {
        let options = match self.choice {
            SplitChoice::All => SplitOptions::AllPages,
            SplitChoice::Range => {
                let range = PageRange::parse(&self.range_text)?;
                match self.range_mode {
                    RangeMode::Each => SplitOptions::EachRange(range),
                    RangeMode::Combined => SplitOptions::CombinedRanges(range),
                }
            }
        };
        Ok(DialogOutcome::Accepted(options))
    }

    /// Close without options.
    pub fn cancel(self) -> DialogOutcome<SplitOptions> {
        DialogOutcome::Cancelled
    }
}

/// State of the image options dialog.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImageOptionsDialog {
    format: ImageFormat,
    dpi_text: String,
}

impl Default for ImageOptionsDialog {
    fn default() -> Self {
        Self {
            format: ImageFormat::default(),
            dpi_text: Dpi::default().to_string(),
        }
    }
}

impl ImageOptionsDialog {
    /// Create a dialog with PNG at 200 DPI.
    pub fn new() -> Self {
        Self::default()
    }

    /// Select an output format.
    pub fn select_format(&mut self, format: ImageFormat) {
        self.format = format;
    }

    /// Replace the DPI text.
    pub fn set_dpi_text(&mut self, text: impl Into<String>) {
        self.dpi_text = text.into();
    }

    /// Selected format.
    pub fn format(&self) -> ImageFormat {
        self.format
    }

    /// Current DPI text.
    pub fn dpi_text(&self) -> &str {
        &self.dpi_text
    }

    /// Collect the options. Never fails: unusable DPI text becomes the
    /// default.
    pub fn confirm(&self) -> DialogOutcome<RasterizeOptions> {
        DialogOutcome::Accepted(RasterizeOptions {
            format: self.format,
            dpi: Dpi::parse_or_default(&self.dpi_text),
        })
    }

    /// Close without options.
    pub fn cancel(self) -> DialogOutcome<RasterizeOptions> {
        DialogOutcome::Cancelled
    }
}
