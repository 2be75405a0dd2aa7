//! Rendering PDF pages to image files.
//!
//! [`Rasterizer`] writes one image per page through any [`PageRenderer`].
//! [`PdfiumRenderer`] is the renderer used outside of tests.
//!
//! # Examples
//!
//! ```no_run
//! use pdfmanager::config::RasterizeOptions;
//! use pdfmanager::raster::{PdfiumRenderer, Rasterizer};
//! use std::path::Path;
//!
//! # fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let rasterizer = Rasterizer::new(PdfiumRenderer::new(None));
//! let report = rasterizer.rasterize(
//!     Path::new("doc.pdf"),
//!     &RasterizeOptions::default(),
//!     Path::new("images"),
//! )?;
//! println!("{} images", report.outputs.len());
//! # Ok(())
//! # }
//! ```

pub mod pdfium;
pub mod rasterizer;
pub mod renderer;

pub use pdfium::PdfiumRenderer;
pub use rasterizer::{RasterReport, Rasterizer, image_path, save_image};
pub use renderer::{PageRenderer, PageSink};
