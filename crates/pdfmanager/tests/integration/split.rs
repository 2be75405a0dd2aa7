//! Integration tests for splitting.

use pdfmanager::config::{OverwriteMode, SplitOptions};
use pdfmanager::error::PdfManagerError;
use pdfmanager::io::PdfWriter;
use pdfmanager::range::PageRange;
use pdfmanager::split::Splitter;
use rstest::rstest;
use tempfile::TempDir;

use crate::common::{file_names, page_texts, write_pdf};

fn range(text: &str) -> PageRange {
    PageRange::parse(text).unwrap()
}

#[tokio::test]
async fn test_split_all_pages() {
    let temp_dir = TempDir::new().unwrap();
    let out = TempDir::new().unwrap();
    let source = write_pdf(temp_dir.path(), "doc.pdf", 3);

    let report = Splitter::default()
        .split(&source, &SplitOptions::AllPages, out.path())
        .await
        .unwrap();

    assert_eq!(report.outputs.len(), 3);
    assert_eq!(report.pages_written, 3);
    assert_eq!(
        file_names(out.path()),
        vec!["doc_p1.pdf", "doc_p2.pdf", "doc_p3.pdf"]
    );
    assert_eq!(page_texts(&out.path().join("doc_p2.pdf")), vec!["doc 2"]);
}

#[tokio::test]
async fn test_split_each_range() {
    let temp_dir = TempDir::new().unwrap();
    let source = write_pdf(temp_dir.path(), "doc.pdf", 5);
    let out = TempDir::new().unwrap();

    let report = Splitter::default()
        .split(&source, &SplitOptions::EachRange(range("1-3,5")), out.path())
        .await
        .unwrap();

    assert_eq!(
        report.outputs,
        vec![
            out.path().join("PDFManager_result_doc_p1-3.pdf"),
            out.path().join("PDFManager_result_doc_p5.pdf"),
        ]
    );
    assert_eq!(
        page_texts(&report.outputs[0]),
        vec!["doc 1", "doc 2", "doc 3"]
    );
    assert_eq!(page_texts(&report.outputs[1]), vec!["doc 5"]);
}

#[tokio::test]
async fn test_split_combined_ranges_in_token_order() {
    let temp_dir = TempDir::new().unwrap();
    let source = write_pdf(temp_dir.path(), "doc.pdf", 5);
    let out = TempDir::new().unwrap();

    let report = Splitter::default()
        .split(
            &source,
            &SplitOptions::CombinedRanges(range("5,1-3")),
            out.path(),
        )
        .await
        .unwrap();

    assert_eq!(
        report.outputs,
        vec![out.path().join("PDFManager_result_doc_split_5_1-3.pdf")]
    );
    assert_eq!(
        page_texts(&report.outputs[0]),
        vec!["doc 5", "doc 1", "doc 2", "doc 3"]
    );
}

#[rstest]
#[case("6")]
#[case("4-6")]
#[case("1,9")]
#[tokio::test]
async fn test_out_of_range_writes_nothing(#[case] text: &str) {
    let temp_dir = TempDir::new().unwrap();
    let source = write_pdf(temp_dir.path(), "doc.pdf", 5);
    let out = TempDir::new().unwrap();

    let err = Splitter::default()
        .split(&source, &SplitOptions::EachRange(range(text)), out.path())
        .await
        .unwrap_err();

    assert!(matches!(err, PdfManagerError::PageOutOfRange { .. }));
    assert!(file_names(out.path()).is_empty());
}

#[tokio::test]
async fn test_split_no_clobber_checks_before_writing() {
    let temp_dir = TempDir::new().unwrap();
    let source = write_pdf(temp_dir.path(), "doc.pdf", 3);
    let out = TempDir::new().unwrap();
    std::fs::write(out.path().join("doc_p3.pdf"), b"existing").unwrap();

    let err = Splitter::new(PdfWriter::new())
        .with_overwrite_mode(OverwriteMode::NoClobber)
        .split(&source, &SplitOptions::AllPages, out.path())
        .await
        .unwrap_err();

    assert!(matches!(err, PdfManagerError::OutputExists { .. }));
    assert_eq!(file_names(out.path()), vec!["doc_p3.pdf"]);
}

#[tokio::test]
async fn test_split_corrupted_source() {
    let temp_dir = TempDir::new().unwrap();
    let source = temp_dir.path().join("broken.pdf");
    std::fs::write(&source, b"%PDF-1.5 not really").unwrap();

    let err = Splitter::default()
        .split(&source, &SplitOptions::AllPages, temp_dir.path())
        .await
        .unwrap_err();

    assert_eq!(err.exit_code(), 3);
}
