//! Integration tests for merging.

use pdfmanager::error::PdfManagerError;
use pdfmanager::io::{PdfWriter, load_pdf};
use pdfmanager::merge::{Merger, merge_files};
use pdfmanager::pages::page_attribute;
use tempfile::TempDir;

use crate::common::{page_texts, write_pdf};

#[tokio::test]
async fn test_merge_keeps_list_order() {
    let temp_dir = TempDir::new().unwrap();
    let a = write_pdf(temp_dir.path(), "a.pdf", 2);
    let b = write_pdf(temp_dir.path(), "b.pdf", 1);
    let c = write_pdf(temp_dir.path(), "c.pdf", 3);
    let output = temp_dir.path().join("merged.pdf");

    let report = merge_files(&[a, b, c], &output, &PdfWriter::new())
        .await
        .unwrap();

    assert_eq!(report.files_merged, 3);
    assert_eq!(report.total_pages, 6);
    assert_eq!(
        page_texts(&output),
        vec!["a 1", "a 2", "b 1", "c 1", "c 2", "c 3"]
    );
}

#[tokio::test]
async fn test_merge_same_file_twice() {
    let temp_dir = TempDir::new().unwrap();
    let a = write_pdf(temp_dir.path(), "a.pdf", 2);
    let output = temp_dir.path().join("twice.pdf");

    merge_files(&[a.clone(), a], &output, &PdfWriter::new())
        .await
        .unwrap();

    assert_eq!(page_texts(&output), vec!["a 1", "a 2", "a 1", "a 2"]);
}

#[tokio::test]
async fn test_merged_pages_keep_inherited_attributes() {
    let temp_dir = TempDir::new().unwrap();
    let a = write_pdf(temp_dir.path(), "a.pdf", 4);
    let b = write_pdf(temp_dir.path(), "b.pdf", 4);
    let output = temp_dir.path().join("merged.pdf");

    merge_files(&[a, b], &output, &PdfWriter::new())
        .await
        .unwrap();

    let doc = load_pdf(&output).await.unwrap();
    for (_, page_id) in doc.get_pages() {
        assert!(page_attribute(&doc, page_id, b"Resources").is_some());
        assert!(page_attribute(&doc, page_id, b"MediaBox").is_some());
    }
}

#[tokio::test]
async fn test_merge_needs_two_files() {
    let temp_dir = TempDir::new().unwrap();
    let a = write_pdf(temp_dir.path(), "a.pdf", 1);

    let err = Merger::new().merge(&[a]).await.unwrap_err();

    assert!(matches!(
        err,
        PdfManagerError::NotEnoughFiles {
            required: 2,
            found: 1
        }
    ));
}

#[tokio::test]
async fn test_merge_missing_input_writes_nothing() {
    let temp_dir = TempDir::new().unwrap();
    let a = write_pdf(temp_dir.path(), "a.pdf", 1);
    let missing = temp_dir.path().join("missing.pdf");
    let output = temp_dir.path().join("merged.pdf");

    let err = merge_files(&[a, missing], &output, &PdfWriter::new())
        .await
        .unwrap_err();

    assert!(matches!(err, PdfManagerError::FileNotFound { .. }));
    assert!(!output.exists());
    assert!(!temp_dir.path().join("merged.pdf.tmp").exists());
}
