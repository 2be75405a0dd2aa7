//! PDF reading and loading operations.
//!
//! Documents are parsed with `lopdf` on a blocking task so the async
//! runtime stays responsive while large files load.
//!
//! # Examples
//!
//! ```no_run
//! use pdfmanager::io::reader::PdfReader;
//! use std::path::Path;
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let reader = PdfReader::new();
//! let loaded = reader.load(Path::new("a.pdf")).await?;
//! println!("{} pages", loaded.page_count);
//! # Ok(())
//! # }
//! ```

use lopdf::Document;
use std::path::{Path, PathBuf};
use std::time::{Duration, Instant};
use tokio::task;
use tracing::debug;

use crate::error::{PdfManagerError, Result};

/// A loaded PDF document with metadata.
#[derive(Debug)]
pub struct LoadedPdf {
    /// The PDF document.
    pub document: Document,

    /// Path to the source file.
    pub path: PathBuf,

    /// Number of pages in the document.
    pub page_count: usize,

    /// Time taken to load the document.
    pub load_time: Duration,

    /// File size in bytes.
    pub file_size: u64,
}

impl LoadedPdf {
    fn new(document: Document, path: PathBuf, load_time: Duration) -> Self {
        let page_count = document.get_pages().len();
        let file_size = std::fs::metadata(&path).map(|m| m.len()).unwrap_or(0);

        Self {
            document,
            path,
            page_count,
            load_time,
            file_size,
        }
    }
}

/// PDF reader. Documents without pages are rejected as corrupted.
#[derive(Debug, Clone, Copy, Default)]
pub struct PdfReader;

impl PdfReader {
    /// Create a new PDF reader.
    pub fn new() -> Self {
        Self
    }

    /// Load a single PDF document.
    ///
    /// # Arguments
    ///
    /// * `path` - Path to the PDF file
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - File does not exist or is not a regular file
    /// - File is not a valid PDF
    /// - PDF is encrypted
    /// - PDF has no pages
    pub async fn load(&self, path: &Path) -> Result<LoadedPdf> {
        check_input(path)?;

        let path_buf = path.to_path_buf();

        let loaded = task::spawn_blocking(move || {
            let start = Instant::now();
            let doc = Document::load(&path_buf).map_err(|e| classify_load_error(&path_buf, e))?;

            if doc.get_pages().is_empty() {
                return Err(PdfManagerError::corrupted_pdf(
                    path_buf.clone(),
                    "PDF has no pages",
                ));
            }

            Ok(LoadedPdf::new(doc, path_buf, start.elapsed()))
        })
        .await
        .map_err(|e| PdfManagerError::other(format!("Load task failed: {e}")))??;

        debug!(
            path = %loaded.path.display(),
            pages = loaded.page_count,
            elapsed = ?loaded.load_time,
            "loaded PDF"
        );

        Ok(loaded)
    }
}

/// Existence and file-type checks shared by loading and validation.
pub(crate) fn check_input(path: &Path) -> Result<()> {
    if !path.exists() {
        return Err(PdfManagerError::file_not_found(path.to_path_buf()));
    }

    if !path.is_file() {
        return Err(PdfManagerError::not_a_file(path.to_path_buf()));
    }

    Ok(())
}

/// Map a `lopdf` load failure onto the error variants users see.
pub(crate) fn classify_load_error(path: &Path, err: lopdf::Error) -> PdfManagerError {
    let err_msg = err.to_string();
    let lower = err_msg.to_lowercase();
    if lower.contains("encrypt") || lower.contains("password") {
        PdfManagerError::encrypted_pdf(path.to_path_buf())
    } else {
        PdfManagerError::failed_to_load_pdf(path.to_path_buf(), err_msg)
    }
}
