//! Input validation for pdfmanager.
//!
//! This module checks PDF files before they are shown in detail or handed
//! to an operation. It performs:
//! - File existence and accessibility checks
//! - PDF format validation
//! - Encryption detection
//! - Page count verification
//!
//! # Examples
//!
//! ```no_run
//! use pdfmanager::validation::Validator;
//! use std::path::PathBuf;
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let validator = Validator::new();
//! let result = validator.validate_file(&PathBuf::from("test.pdf")).await?;
//! println!("PDF has {} pages", result.page_count);
//! # Ok(())
//! # }
//! ```

use lopdf::{Document, Object};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use tokio::task;
use tracing::warn;

use crate::config::BatchPolicy;
use crate::error::{PdfManagerError, Result};
use crate::io::reader::{check_input, classify_load_error};
use crate::pages::page_attribute;
use crate::utils::format_file_size;

/// Result of validating a single PDF file.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ValidationResult {
    /// Path to the validated file.
    pub path: PathBuf,

    /// Number of pages in the PDF.
    pub page_count: usize,

    /// PDF version (major, minor).
    pub version: Option<(u8, u8)>,

    /// Size of the file in bytes.
    pub file_size: u64,

    /// Whether the PDF is encrypted.
    pub is_encrypted: bool,

    /// Number of objects in the PDF.
    pub object_count: usize,

    /// First page dimensions (width, height) in points, if available.
    pub page_dimensions: Option<(f32, f32)>,
}

impl ValidationResult {
    fn from_document(path: PathBuf, doc: &Document, file_size: u64) -> Self {
        let pages = doc.get_pages();

        let version = doc.version.split_once('.').map(|(major, minor)| {
            (
                major.trim().parse::<u8>().unwrap_or_default(),
                minor.trim().parse::<u8>().unwrap_or_default(),
            )
        });

        let page_dimensions = pages
            .values()
            .next()
            .and_then(|&page_id| page_attribute(doc, page_id, b"MediaBox"))
            .and_then(|media_box| media_box_size(doc, &media_box));

        Self {
            path,
            page_count: pages.len(),
            version,
            file_size,
            is_encrypted: doc.is_encrypted(),
            object_count: doc.objects.len(),
            page_dimensions,
        }
    }

    /// Format the file size as a human-readable string.
    pub fn format_file_size(&self) -> String {
        format_file_size(self.file_size)
    }
}

/// Width and height of a `[llx lly urx ury]` box.
fn media_box_size(doc: &Document, media_box: &Object) -> Option<(f32, f32)> {
    let media_box = match media_box {
        Object::Reference(id) => doc.get_object(*id).ok()?,
        other => other,
    };
    let values = media_box.as_array().ok()?;
    if values.len() < 4 {
        return None;
    }

    let coord = |index: usize| values[index].as_float().ok();
    Some((
        (coord(2)? - coord(0)?).abs(),
        (coord(3)? - coord(1)?).abs(),
    ))
}

/// A file that failed validation.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ValidationFailure {
    /// Path to the file.
    pub path: PathBuf,

    /// Error message.
    pub message: String,
}

/// Summary of validation results for multiple files.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ValidationSummary {
    /// Individual validation results for each valid file.
    pub results: Vec<ValidationResult>,

    /// Files that failed validation.
    pub failures: Vec<ValidationFailure>,

    /// Total number of pages across all valid files.
    pub total_pages: usize,

    /// Total file size in bytes of all valid files.
    pub total_size: u64,
}

impl ValidationSummary {
    fn new(results: Vec<ValidationResult>, failures: Vec<ValidationFailure>) -> Self {
        let total_pages = results.iter().map(|r| r.page_count).sum();
        let total_size = results.iter().map(|r| r.file_size).sum();

        Self {
            results,
            failures,
            total_pages,
            total_size,
        }
    }

    /// Number of files that passed validation.
    pub fn files_validated(&self) -> usize {
        self.results.len()
    }

    /// Number of files that failed validation.
    pub fn files_failed(&self) -> usize {
        self.failures.len()
    }

    /// Format the total file size as a human-readable string.
    pub fn format_total_size(&self) -> String {
        format_file_size(self.total_size)
    }
}

/// Validator for PDF files.
#[derive(Debug, Clone, Default)]
pub struct Validator;

impl Validator {
    /// Create a new validator.
    pub fn new() -> Self {
        Self
    }

    /// Validate a single PDF file.
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - File does not exist or is not a regular file
    /// - File is not accessible or is empty
    /// - File is not a valid PDF or is encrypted
    /// - PDF has no pages
    pub async fn validate_file(&self, path: &Path) -> Result<ValidationResult> {
        check_input(path)?;

        let metadata =
            tokio::fs::metadata(path)
                .await
                .map_err(|e| PdfManagerError::FileNotAccessible {
                    path: path.to_path_buf(),
                    source: e,
                })?;

        if metadata.len() == 0 {
            return Err(PdfManagerError::corrupted_pdf(
                path.to_path_buf(),
                "File is empty",
            ));
        }

        let path_buf = path.to_path_buf();
        let file_size = metadata.len();

        task::spawn_blocking(move || {
            let doc = Document::load(&path_buf).map_err(|e| classify_load_error(&path_buf, e))?;

            if doc.get_pages().is_empty() {
                return Err(PdfManagerError::corrupted_pdf(
                    path_buf,
                    "PDF has no pages",
                ));
            }

            Ok(ValidationResult::from_document(path_buf, &doc, file_size))
        })
        .await
        .map_err(|e| PdfManagerError::other(format!("Validation task failed: {e}")))?
    }

    /// Validate multiple PDF files.
    ///
    /// Under [`BatchPolicy::Continue`] every file is checked and failures are
    /// collected in the summary.
    ///
    /// # Errors
    ///
    /// Under [`BatchPolicy::StopOnError`] the first failure is returned.
    pub async fn validate_files(
        &self,
        paths: &[PathBuf],
        policy: BatchPolicy,
    ) -> Result<ValidationSummary> {
        let mut results = Vec::new();
        let mut failures = Vec::new();

        for path in paths {
            match self.validate_file(path).await {
                Ok(result) => results.push(result),
                Err(e) if policy == BatchPolicy::Continue => {
                    warn!(path = %path.display(), error = %e, "validation failed");
                    failures.push(ValidationFailure {
                        path: path.clone(),
                        message: e.to_string(),
                    });
                }
                Err(e) => return Err(e),
            }
        }

        Ok(ValidationSummary::new(results, failures))
    }
}
