//! PDF merging operations.
//!
//! # Examples
//!
//! ```no_run
//! use pdfmanager::merge::merge_files;
//! use pdfmanager::io::PdfWriter;
//! use std::path::{Path, PathBuf};
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let inputs = vec![PathBuf::from("a.pdf"), PathBuf::from("b.pdf")];
//! let report = merge_files(&inputs, Path::new("merged.pdf"), &PdfWriter::new()).await?;
//! println!("Wrote {} pages", report.total_pages);
//! # Ok(())
//! # }
//! ```

pub mod merger;

pub use merger::{MIN_MERGE_INPUTS, MergeResult, MergeStatistics, Merger};

use crate::error::Result;
use crate::io::PdfWriter;
use std::path::{Path, PathBuf};

/// Outcome of a merge that was written to disk.
#[derive(Debug, Clone)]
pub struct MergeReport {
    /// Where the merged document was written.
    pub output: PathBuf,

    /// Number of pages in the output.
    pub total_pages: usize,

    /// Number of input files.
    pub files_merged: usize,

    /// Size of the written file in bytes.
    pub output_size: u64,
}

/// Merge `inputs` in order and write the result to `output`.
///
/// Nothing is written unless every input loads and combines.
///
/// # Errors
///
/// Returns the first load, merge or write failure.
pub async fn merge_files(
    inputs: &[PathBuf],
    output: &Path,
    writer: &PdfWriter,
) -> Result<MergeReport> {
    let result = Merger::new().merge(inputs).await?;
    let stats = writer.save_owned(result.document, output).await?;

    Ok(MergeReport {
        output: stats.output_path,
        total_pages: result.statistics.total_pages,
        files_merged: result.statistics.files_merged,
        output_size: stats.file_size,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::{file_page_texts, write_sample_pdf};
    use tempfile::TempDir;

    #[tokio::test]
    async fn test_merge_files_writes_output() {
        let temp_dir = TempDir::new().unwrap();
        let a = write_sample_pdf(temp_dir.path(), "a.pdf", 1);
        let b = write_sample_pdf(temp_dir.path(), "b.pdf", 2);
        let output = temp_dir.path().join("merged.pdf");

        let report = merge_files(&[a, b], &output, &PdfWriter::new())
            .await
            .unwrap();

        assert_eq!(report.output, output);
        assert_eq!(report.total_pages, 3);
        assert!(report.output_size > 0);
        assert_eq!(file_page_texts(&output), vec!["a 1", "b 1", "b 2"]);
    }

    #[tokio::test]
    async fn test_merge_files_writes_nothing_on_failure() {
        let temp_dir = TempDir::new().unwrap();
        let a = write_sample_pdf(temp_dir.path(), "a.pdf", 1);
        let bad = temp_dir.path().join("bad.pdf");
        std::fs::write(&bad, b"not a pdf").unwrap();
        let output = temp_dir.path().join("merged.pdf");

        assert!(
            merge_files(&[a, bad], &output, &PdfWriter::new())
                .await
                .is_err()
        );
        assert!(!output.exists());
    }
}
