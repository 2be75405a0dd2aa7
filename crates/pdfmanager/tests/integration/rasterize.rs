//! Integration tests for rasterizing, using a stand-in renderer.

use pdfmanager::config::{Dpi, ImageFormat, OverwriteMode, RasterizeOptions};
use pdfmanager::error::PdfManagerError;
use pdfmanager::raster::Rasterizer;
use tempfile::TempDir;

use crate::common::{FakeRenderer, file_names, write_pdf};

#[test]
fn test_two_pages_png_at_150_dpi() {
    let temp_dir = TempDir::new().unwrap();
    let source = write_pdf(temp_dir.path(), "slides.pdf", 2);
    let out = TempDir::new().unwrap();

    let renderer = FakeRenderer::default();
    let options = RasterizeOptions {
        format: ImageFormat::Png,
        dpi: Dpi::new(150).unwrap(),
    };
    let report = Rasterizer::new(&renderer)
        .rasterize(&source, &options, out.path())
        .unwrap();

    assert_eq!(report.outputs.len(), 2);
    assert_eq!(
        file_names(out.path()),
        vec!["slides_page1.png", "slides_page2.png"]
    );
    assert_eq!(
        renderer.calls.borrow().as_slice(),
        &[("slides.pdf".to_string(), 150)]
    );
}

#[test]
fn test_jpeg_output_is_rgb() {
    let temp_dir = TempDir::new().unwrap();
    let source = write_pdf(temp_dir.path(), "doc.pdf", 1);

    let options = RasterizeOptions {
        format: ImageFormat::Jpeg,
        dpi: Dpi::default(),
    };
    let report = Rasterizer::new(FakeRenderer::default())
        .rasterize(&source, &options, temp_dir.path())
        .unwrap();

    let image = image::open(&report.outputs[0]).unwrap();
    assert_eq!(image.color(), image::ColorType::Rgb8);
    assert!(report.outputs[0].ends_with("doc_page1.jpg"));
}

#[test]
fn test_missing_renderer_is_reported() {
    let temp_dir = TempDir::new().unwrap();
    let source = write_pdf(temp_dir.path(), "doc.pdf", 1);
    let out = TempDir::new().unwrap();

    let err = Rasterizer::new(FakeRenderer::unavailable())
        .rasterize(&source, &RasterizeOptions::default(), out.path())
        .unwrap_err();

    assert!(matches!(err, PdfManagerError::RendererUnavailable { .. }));
    assert_eq!(err.exit_code(), 7);
    assert!(file_names(out.path()).is_empty());
}

#[test]
fn test_no_clobber_checks_every_page_first() {
    let temp_dir = TempDir::new().unwrap();
    let source = write_pdf(temp_dir.path(), "doc.pdf", 3);
    let out = TempDir::new().unwrap();
    std::fs::write(out.path().join("doc_page2.png"), b"existing").unwrap();

    let err = Rasterizer::new(FakeRenderer::default())
        .with_overwrite_mode(OverwriteMode::NoClobber)
        .rasterize(&source, &RasterizeOptions::default(), out.path())
        .unwrap_err();

    assert!(matches!(err, PdfManagerError::OutputExists { .. }));
    assert_eq!(file_names(out.path()), vec!["doc_page2.png"]);
}
