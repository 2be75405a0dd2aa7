//! Core PDF merging implementation.
//!
//! Documents are concatenated in the order given. The first document is
//! the base: its catalog and page tree survive, and every following
//! document's pages are appended to the end of that tree.

use lopdf::Document;
use std::path::PathBuf;
use std::time::{Duration, Instant};
use tracing::{debug, info};

use crate::error::{PdfManagerError, Result};
use crate::io::PdfReader;
use crate::pages::PageExtractor;
use crate::utils::format_file_size;

/// Minimum number of inputs a merge accepts.
pub const MIN_MERGE_INPUTS: usize = 2;

/// Statistics about a merge operation.
#[derive(Debug, Clone)]
pub struct MergeStatistics {
    /// Number of PDFs merged.
    pub files_merged: usize,

    /// Total number of pages in merged document.
    pub total_pages: usize,

    /// Total time taken for merge.
    pub merge_time: Duration,

    /// Time taken to load all PDFs.
    pub load_time: Duration,

    /// Total size of input files.
    pub input_size: u64,
}

/// Result of a merge operation.
#[derive(Debug)]
pub struct MergeResult {
    /// The merged PDF document.
    pub document: Document,

    /// Statistics about the merge.
    pub statistics: MergeStatistics,
}

/// PDF merger that combines multiple documents.
#[derive(Debug, Clone, Default)]
pub struct Merger {
    reader: PdfReader,
    page_extractor: PageExtractor,
}

impl Merger {
    /// Create a new merger with default settings.
    pub fn new() -> Self {
        Self::default()
    }

    /// Merge the given PDF files, in order, into one document.
    ///
    /// Merging is all-or-nothing: the first file that fails to load aborts
    /// the whole merge.
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - Fewer than two paths are given
    /// - Any input cannot be loaded
    /// - A page tree cannot be combined
    ///
    /// # Examples
    ///
    /// ```no_run
    /// # use pdfmanager::merge::Merger;
    /// # use std::path::PathBuf;
    /// # async fn example() -> Result<(), Box<dyn std::error::Error>> {
    /// let merger = Merger::new();
    /// let paths = vec![PathBuf::from("a.pdf"), PathBuf::from("b.pdf")];
    /// let result = merger.merge(&paths).await?;
    /// println!("Merged {} files into {} pages",
    ///          result.statistics.files_merged,
    ///          result.statistics.total_pages);
    /// # Ok(())
    /// # }
    /// ```
    pub async fn merge(&self, paths: &[PathBuf]) -> Result<MergeResult> {
        if paths.len() < MIN_MERGE_INPUTS {
            return Err(PdfManagerError::NotEnoughFiles {
                required: MIN_MERGE_INPUTS,
                found: paths.len(),
            });
        }

        let merge_start = Instant::now();

        let load_start = Instant::now();
        let mut documents = Vec::with_capacity(paths.len());
        let mut input_size = 0;
        for path in paths {
            let loaded = self.reader.load(path).await?;
            input_size += loaded.file_size;
            documents.push(loaded.document);
        }
        let load_time = load_start.elapsed();

        let document = self.merge_documents(documents)?;
        let total_pages = document.get_pages().len();

        let statistics = MergeStatistics {
            files_merged: paths.len(),
            total_pages,
            merge_time: merge_start.elapsed(),
            load_time,
            input_size,
        };

        info!(
            files = statistics.files_merged,
            pages = statistics.total_pages,
            input_size = %format_file_size(statistics.input_size),
            load_time = ?statistics.load_time,
            elapsed = ?statistics.merge_time,
            "merged documents"
        );

        Ok(MergeResult {
            document,
            statistics,
        })
    }

    /// Concatenate already loaded documents in order.
    ///
    /// # Errors
    ///
    /// Returns [`PdfManagerError::MergeFailed`] if no documents are given or
    /// a page tree cannot be combined.
    pub fn merge_documents(&self, documents: Vec<Document>) -> Result<Document> {
        let mut documents = documents.into_iter();
        let mut merged = documents
            .next()
            .ok_or_else(|| PdfManagerError::merge_failed("No documents to merge"))?;

        self.page_extractor
            .flatten_all(&mut merged)
            .map_err(|e| PdfManagerError::merge_failed(e.to_string()))?;

        for (index, doc) in documents.enumerate() {
            let appended = self
                .page_extractor
                .append_document(&mut merged, doc)
                .map_err(|e| PdfManagerError::merge_failed(e.to_string()))?;
            debug!(document = index + 2, pages = appended, "appended pages");
        }

        merged.prune_objects();
        merged.renumber_objects();

        Ok(merged)
    }
}
