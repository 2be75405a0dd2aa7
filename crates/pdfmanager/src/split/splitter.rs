//! Splitting one PDF into several.
//!
//! A split runs in two phases. Planning resolves the options against the
//! document's page count and yields every output path with its pages.
//! Nothing is written unless planning succeeds, so an out-of-bounds token
//! anywhere in the range leaves the output directory untouched.

use lopdf::Document;
use std::path::{Path, PathBuf};
use tracing::{debug, info};

use crate::config::{APP_NAME, OverwriteMode, SplitOptions};
use crate::error::{PdfManagerError, Result};
use crate::io::{PdfReader, PdfWriter};
use crate::pages::PageExtractor;
use crate::range::{PageRange, PageToken};
use crate::utils::file_stem;

/// One file a split will produce.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PlannedOutput {
    /// Destination path.
    pub path: PathBuf,
    /// 1-based source pages, in output order.
    pub pages: Vec<u32>,
}

/// Outcome of splitting one document.
#[derive(Debug, Clone)]
pub struct SplitReport {
    /// The document that was split.
    pub source: PathBuf,
    /// Files written, in creation order.
    pub outputs: Vec<PathBuf>,
    /// Total pages written across all outputs.
    pub pages_written: usize,
}

/// Compute the outputs of a split without touching the file system.
///
/// # Errors
///
/// Returns [`PdfManagerError::PageOutOfRange`] for the first token that does
/// not fit in `page_count`.
///
/// # Examples
///
/// ```
/// use pdfmanager::config::SplitOptions;
/// use pdfmanager::range::PageRange;
/// use pdfmanager::split::plan_split;
/// use std::path::Path;
///
/// let options = SplitOptions::CombinedRanges(PageRange::parse("1-3,5").unwrap());
/// let plan = plan_split(Path::new("report.pdf"), 5, &options, Path::new("/out")).unwrap();
/// assert_eq!(plan.len(), 1);
/// assert_eq!(plan[0].pages, vec![1, 2, 3, 5]);
/// assert!(plan[0].path.ends_with("PDFManager_result_report_split_1-3_5.pdf"));
/// ```
pub fn plan_split(
    source: &Path,
    page_count: usize,
    options: &SplitOptions,
    out_dir: &Path,
) -> Result<Vec<PlannedOutput>> {
    let stem = file_stem(source);

    let plan = match options {
        SplitOptions::AllPages => (1..=page_count as u32)
            .map(|page| PlannedOutput {
                path: out_dir.join(format!("{stem}_p{page}.pdf")),
                pages: vec![page],
            })
            .collect(),
        SplitOptions::EachRange(range) => {
            range.validate(page_count)?;
            range
                .tokens()
                .iter()
                .map(|token| PlannedOutput {
                    path: out_dir.join(each_range_name(&stem, token)),
                    pages: token.pages().collect(),
                })
                .collect()
        }
        SplitOptions::CombinedRanges(range) => {
            range.validate(page_count)?;
            vec![PlannedOutput {
                path: out_dir.join(combined_name(&stem, range)),
                pages: range.pages(),
            }]
        }
    };

    Ok(plan)
}

fn each_range_name(stem: &str, token: &PageToken) -> String {
    match token {
        PageToken::Single(page) => format!("{APP_NAME}_result_{stem}_p{page}.pdf"),
        PageToken::Range(start, end) if start == end => {
            format!("{APP_NAME}_result_{stem}_p{start}.pdf")
        }
        PageToken::Range(start, end) => format!("{APP_NAME}_result_{stem}_p{start}-{end}.pdf"),
    }
}

fn combined_name(stem: &str, range: &PageRange) -> String {
    format!("{APP_NAME}_result_{stem}_split_{}.pdf", range.file_label())
}

/// Splits documents according to [`SplitOptions`].
#[derive(Debug, Clone)]
pub struct Splitter {
    reader: PdfReader,
    writer: PdfWriter,
    page_extractor: PageExtractor,
    overwrite_mode: OverwriteMode,
}

impl Splitter {
    /// Create a splitter that writes with `writer`.
    pub fn new(writer: PdfWriter) -> Self {
        Self {
            reader: PdfReader::new(),
            writer,
            page_extractor: PageExtractor::new(),
            overwrite_mode: OverwriteMode::Force,
        }
    }

    /// Set how existing output files are treated.
    pub fn with_overwrite_mode(mut self, mode: OverwriteMode) -> Self {
        self.overwrite_mode = mode;
        self
    }

    /// Split `source` into `out_dir`.
    ///
    /// # Errors
    ///
    /// Returns an error if the document cannot be loaded, a range token is
    /// out of bounds, an output exists under `NoClobber`, or a write fails.
    /// Range and overwrite checks happen before the first write.
    pub async fn split(
        &self,
        source: &Path,
        options: &SplitOptions,
        out_dir: &Path,
    ) -> Result<SplitReport> {
        let loaded = self.reader.load(source).await?;
        let plan = plan_split(source, loaded.page_count, options, out_dir)?;

        for output in &plan {
            self.writer
                .check_overwrite(&output.path, self.overwrite_mode)
                .await?;
        }

        debug!(
            source = %source.display(),
            mode = ?options.mode(),
            outputs = plan.len(),
            "planned split"
        );

        let mut report = SplitReport {
            source: source.to_path_buf(),
            outputs: Vec::with_capacity(plan.len()),
            pages_written: 0,
        };

        for output in plan {
            let document = self.extract(&loaded.document, &output.pages)?;
            self.writer.save_owned(document, &output.path).await?;
            report.pages_written += output.pages.len();
            report.outputs.push(output.path);
        }

        info!(
            source = %source.display(),
            files = report.outputs.len(),
            "split document"
        );

        Ok(report)
    }

    fn extract(&self, document: &Document, pages: &[u32]) -> Result<Document> {
        self.page_extractor
            .extract_pages(document, pages)
            .map_err(|e| match e {
                PdfManagerError::PageOutOfRange { .. } => e,
                other => PdfManagerError::split_failed(other.to_string()),
            })
    }
}

impl Default for Splitter {
    fn default() -> Self {
        Self::new(PdfWriter::new())
    }
}
