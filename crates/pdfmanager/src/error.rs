//! Error types for pdfmanager.
//!
//! Every failure an operation can hit is a variant of [`PdfManagerError`].
//! Operations never retry; the session controller catches errors at the
//! operation boundary and shows them to the user.
//!
//! # Error Categories
//!
//! - **Precondition errors**: too few files, nothing selected
//! - **Validation errors**: malformed page ranges, pages out of bounds
//! - **I/O and PDF errors**: missing files, unreadable or encrypted PDFs,
//!   write failures
//! - **Renderer errors**: PDFium could not be bound or failed to render

use std::io;
use std::path::PathBuf;

/// Result type alias for pdfmanager operations.
pub type Result<T> = std::result::Result<T, PdfManagerError>;

/// Main error type for pdfmanager operations.
#[derive(Debug, thiserror::Error)]
pub enum PdfManagerError {
    /// An operation needs more files in the list than are present.
    #[error("At least {required} PDF files are required, but {found} loaded")]
    NotEnoughFiles {
        /// Minimum number of files the operation needs.
        required: usize,
        /// Number of files currently loaded.
        found: usize,
    },

    /// An operation needs a selection and none is active.
    #[error("Select the PDF file(s) to {action} first")]
    NoSelection {
        /// Human-readable name of the blocked action.
        action: &'static str,
    },

    /// A list index does not refer to an entry.
    #[error("No file at position {index} (list has {len} file(s))")]
    InvalidIndex {
        /// 1-based position given by the user.
        index: usize,
        /// Current list length.
        len: usize,
    },

    /// Input file was not found.
    #[error("File not found: {}", path.display())]
    FileNotFound {
        /// Path to the file that was not found.
        path: PathBuf,
    },

    /// Input file is not accessible (permission denied, etc.).
    #[error("Cannot access file: {}\n  Reason: {source}", path.display())]
    FileNotAccessible {
        /// Path to the inaccessible file.
        path: PathBuf,
        /// Underlying I/O error.
        source: io::Error,
    },

    /// Path exists but is not a regular file.
    #[error("Not a file: {}", path.display())]
    NotAFile {
        /// Path that is not a file.
        path: PathBuf,
    },

    /// Failed to load PDF file.
    #[error("Failed to load PDF: {}\n  Reason: {reason}", path.display())]
    FailedToLoadPdf {
        /// Path to the PDF file.
        path: PathBuf,
        /// Reason for the failure.
        reason: String,
    },

    /// PDF file is corrupted or has invalid structure.
    #[error("Corrupted or invalid PDF: {}\n  Details: {details}", path.display())]
    CorruptedPdf {
        /// Path to the corrupted PDF.
        path: PathBuf,
        /// Details about the corruption.
        details: String,
    },

    /// PDF file is encrypted and cannot be processed.
    #[error(
        "PDF is encrypted and cannot be processed: {}\n  Hint: Decrypt the PDF first using 'qpdf --decrypt' or similar tools",
        path.display()
    )]
    EncryptedPdf {
        /// Path to the encrypted PDF.
        path: PathBuf,
    },

    /// Page range text could not be parsed.
    #[error("Invalid page range '{range}': {reason}")]
    InvalidPageRange {
        /// The text the user entered.
        range: String,
        /// What is wrong with it.
        reason: String,
    },

    /// A page range token points outside the document.
    #[error(
        "Page range '{token}' is out of bounds: page numbers must be between 1 and {page_count}"
    )]
    PageOutOfRange {
        /// The offending token as entered.
        token: String,
        /// Number of pages in the document.
        page_count: usize,
    },

    /// Output file already exists and overwrite is not allowed.
    #[error(
        "Output file already exists: {}\n  Use --force to overwrite or choose a different output path",
        path.display()
    )]
    OutputExists {
        /// Path to the existing output file.
        path: PathBuf,
    },

    /// Failed to create output file.
    #[error("Failed to create output file: {}\n  Reason: {source}", path.display())]
    FailedToCreateOutput {
        /// Path where output should be created.
        path: PathBuf,
        /// Underlying I/O error.
        source: io::Error,
    },

    /// Failed to write to output file.
    #[error("Failed to write to output file: {}\n  Reason: {source}", path.display())]
    FailedToWrite {
        /// Path being written to.
        path: PathBuf,
        /// Underlying I/O error.
        source: io::Error,
    },

    /// Merge operation failed.
    #[error("Merge operation failed: {reason}")]
    MergeFailed {
        /// Description of what went wrong.
        reason: String,
    },

    /// Split operation failed.
    #[error("Split operation failed: {reason}")]
    SplitFailed {
        /// Description of what went wrong.
        reason: String,
    },

    /// The PDF renderer library could not be located or bound.
    #[error(
        "PDF renderer is not available: {reason}\n  Hint: Place the PDFium library in a 'pdfium' folder next to the executable or pass --pdfium-path"
    )]
    RendererUnavailable {
        /// Why binding failed.
        reason: String,
    },

    /// The renderer failed on a document or page.
    #[error("Failed to render {}: {reason}", path.display())]
    RenderFailed {
        /// Document being rendered.
        path: PathBuf,
        /// Renderer message.
        reason: String,
    },

    /// An image could not be encoded or saved.
    #[error("Failed to save image: {}\n  Reason: {reason}", path.display())]
    ImageEncodeFailed {
        /// Image path.
        path: PathBuf,
        /// Encoder message.
        reason: String,
    },

    /// Invalid configuration.
    #[error("Invalid configuration: {message}")]
    InvalidConfig {
        /// Description of what's wrong with the configuration.
        message: String,
    },

    /// User cancelled the operation.
    #[error("Operation cancelled by user")]
    Cancelled,

    /// Generic error with a custom message.
    #[error("{message}")]
    Other {
        /// Error message.
        message: String,
    },
}

impl From<lopdf::Error> for PdfManagerError {
    fn from(err: lopdf::Error) -> Self {
        Self::other(err.to_string())
    }
}

impl PdfManagerError {
    /// Create a FileNotFound error.
    pub fn file_not_found(path: PathBuf) -> Self {
        Self::FileNotFound { path }
    }

    /// Create a NotAFile error.
    pub fn not_a_file(path: PathBuf) -> Self {
        Self::NotAFile { path }
    }

    /// Create a FailedToLoadPdf error.
    pub fn failed_to_load_pdf(path: PathBuf, reason: impl Into<String>) -> Self {
        Self::FailedToLoadPdf {
            path,
            reason: reason.into(),
        }
    }

    /// Create a CorruptedPdf error.
    pub fn corrupted_pdf(path: PathBuf, details: impl Into<String>) -> Self {
        Self::CorruptedPdf {
            path,
            details: details.into(),
        }
    }

    /// Create an EncryptedPdf error.
    pub fn encrypted_pdf(path: PathBuf) -> Self {
        Self::EncryptedPdf { path }
    }

    /// Create an InvalidPageRange error.
    pub fn invalid_page_range(range: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::InvalidPageRange {
            range: range.into(),
            reason: reason.into(),
        }
    }

    /// Create an OutputExists error.
    pub fn output_exists(path: PathBuf) -> Self {
        Self::OutputExists { path }
    }

    /// Create a MergeFailed error.
    pub fn merge_failed(reason: impl Into<String>) -> Self {
        Self::MergeFailed {
            reason: reason.into(),
        }
    }

    /// Create a SplitFailed error.
    pub fn split_failed(reason: impl Into<String>) -> Self {
        Self::SplitFailed {
            reason: reason.into(),
        }
    }

    /// Create a RendererUnavailable error.
    pub fn renderer_unavailable(reason: impl Into<String>) -> Self {
        Self::RendererUnavailable {
            reason: reason.into(),
        }
    }

    /// Create a RenderFailed error.
    pub fn render_failed(path: PathBuf, reason: impl Into<String>) -> Self {
        Self::RenderFailed {
            path,
            reason: reason.into(),
        }
    }

    /// Create an InvalidConfig error.
    pub fn invalid_config(message: impl Into<String>) -> Self {
        Self::InvalidConfig {
            message: message.into(),
        }
    }

    /// Create an Other error with a custom message.
    pub fn other(message: impl Into<String>) -> Self {
        Self::Other {
            message: message.into(),
        }
    }

    /// Whether the error was raised before any I/O because an action's
    /// precondition did not hold.
    pub fn is_precondition(&self) -> bool {
        matches!(
            self,
            Self::NotEnoughFiles { .. } | Self::NoSelection { .. } | Self::InvalidIndex { .. }
        )
    }

    /// Check if this error only concerns the current file of a batch.
    ///
    /// Split and rasterize move on to the next selected file after a
    /// recoverable error.
    pub fn is_recoverable(&self) -> bool {
        matches!(
            self,
            Self::FileNotFound { .. }
                | Self::NotAFile { .. }
                | Self::FileNotAccessible { .. }
                | Self::FailedToLoadPdf { .. }
                | Self::CorruptedPdf { .. }
                | Self::EncryptedPdf { .. }
                | Self::InvalidPageRange { .. }
                | Self::PageOutOfRange { .. }
                | Self::SplitFailed { .. }
                | Self::RenderFailed { .. }
                | Self::ImageEncodeFailed { .. }
                | Self::OutputExists { .. }
                | Self::FailedToCreateOutput { .. }
                | Self::FailedToWrite { .. }
        )
    }

    /// Get the process exit code for this error.
    pub fn exit_code(&self) -> i32 {
        match self {
            Self::NotEnoughFiles { .. } => 1,
            Self::NoSelection { .. } => 1,
            Self::InvalidIndex { .. } => 1,
            Self::FileNotFound { .. } => 2,
            Self::FileNotAccessible { .. } => 2,
            Self::NotAFile { .. } => 2,
            Self::FailedToLoadPdf { .. } => 3,
            Self::CorruptedPdf { .. } => 3,
            Self::EncryptedPdf { .. } => 3,
            Self::InvalidPageRange { .. } => 1,
            Self::PageOutOfRange { .. } => 1,
            Self::OutputExists { .. } => 4,
            Self::FailedToCreateOutput { .. } => 5,
            Self::FailedToWrite { .. } => 5,
            Self::ImageEncodeFailed { .. } => 5,
            Self::MergeFailed { .. } => 6,
            Self::SplitFailed { .. } => 6,
            Self::RenderFailed { .. } => 6,
            Self::RendererUnavailable { .. } => 7,
            Self::InvalidConfig { .. } => 1,
            Self::Cancelled => 130, // Standard exit code for SIGINT
            Self::Other { .. } => 1,
        }
    }
}
