//! The page rendering seam.

use image::DynamicImage;
use std::path::Path;

use crate::config::Dpi;
use crate::error::Result;

/// Callback receiving each rendered page: its 1-based number and bitmap.
pub type PageSink<'a> = dyn FnMut(u32, DynamicImage) -> Result<()> + 'a;

/// Renders PDF pages to bitmaps.
///
/// The production implementation is [`PdfiumRenderer`](super::PdfiumRenderer);
/// tests substitute their own.
pub trait PageRenderer {
    /// Number of pages the renderer sees in `path`.
    fn page_count(&self, path: &Path) -> Result<usize>;

    /// Render every page of `path` at `dpi`, in page order, handing each
    /// bitmap to `sink` as soon as it is ready.
    ///
    /// Rendering stops at the first error from the renderer or the sink.
    /// Returns the number of pages rendered.
    fn render_pages(&self, path: &Path, dpi: Dpi, sink: &mut PageSink<'_>) -> Result<usize>;
}

impl<T: PageRenderer + ?Sized> PageRenderer for &T {
    fn page_count(&self, path: &Path) -> Result<usize> {
        (**self).page_count(path)
    }

    fn render_pages(&self, path: &Path, dpi: Dpi, sink: &mut PageSink<'_>) -> Result<usize> {
        (**self).render_pages(path, dpi, sink)
    }
}
