//! Writing rendered pages to image files.

use image::DynamicImage;
use std::path::{Path, PathBuf};
use tracing::{debug, info};

use super::renderer::PageRenderer;
use crate::config::{ImageFormat, OverwriteMode, RasterizeOptions};
use crate::error::{PdfManagerError, Result};
use crate::io::reader::check_input;
use crate::utils::file_stem;

/// Outcome of rasterizing one document.
#[derive(Debug, Clone)]
pub struct RasterReport {
    /// The rendered document.
    pub source: PathBuf,
    /// Images written, in page order.
    pub outputs: Vec<PathBuf>,
}

/// Image path for page `page` of `source`: `<stem>_page<N>.<ext>`.
pub fn image_path(source: &Path, page: u32, format: ImageFormat, out_dir: &Path) -> PathBuf {
    out_dir.join(format!(
        "{}_page{page}.{}",
        file_stem(source),
        format.extension()
    ))
}

/// Renders documents page by page and saves each page as an image.
pub struct Rasterizer<R> {
    renderer: R,
    overwrite_mode: OverwriteMode,
}

impl<R: PageRenderer> Rasterizer<R> {
    /// Create a rasterizer around a renderer.
    pub fn new(renderer: R) -> Self {
        Self {
            renderer,
            overwrite_mode: OverwriteMode::Force,
        }
    }

    /// Set how existing image files are treated.
    pub fn with_overwrite_mode(mut self, mode: OverwriteMode) -> Self {
        self.overwrite_mode = mode;
        self
    }

    /// The wrapped renderer.
    pub fn renderer(&self) -> &R {
        &self.renderer
    }

    /// Render every page of `source` into `out_dir`.
    ///
    /// # Errors
    ///
    /// Returns an error if the source is missing, the renderer is
    /// unavailable or fails, an image exists under `NoClobber`, or an image
    /// cannot be saved. Images written before the failure are kept.
    pub fn rasterize(
        &self,
        source: &Path,
        options: &RasterizeOptions,
        out_dir: &Path,
    ) -> Result<RasterReport> {
        check_input(source)?;

        if self.overwrite_mode == OverwriteMode::NoClobber {
            let page_count = self.renderer.page_count(source)?;
            if let Some(existing) = (1..=page_count as u32)
                .map(|page| image_path(source, page, options.format, out_dir))
                .find(|path| path.exists())
            {
                return Err(PdfManagerError::output_exists(existing));
            }
        }

        let mut outputs = Vec::new();
        let mut save_page = |page: u32, image: DynamicImage| -> Result<()> {
            let path = image_path(source, page, options.format, out_dir);
            save_image(image, options.format, &path)?;
            debug!(path = %path.display(), "saved page image");
            outputs.push(path);
            Ok(())
        };

        self.renderer
            .render_pages(source, options.dpi, &mut save_page)?;

        info!(
            source = %source.display(),
            images = outputs.len(),
            format = options.format.extension(),
            dpi = options.dpi.get(),
            "rasterized document"
        );

        Ok(RasterReport {
            source: source.to_path_buf(),
            outputs,
        })
    }
}

/// Encode `image` as `format` at `path`.
///
/// JPEG and BMP have no alpha channel, so those are converted to 8-bit RGB
/// first.
pub fn save_image(image: DynamicImage, format: ImageFormat, path: &Path) -> Result<()> {
    let image = match format {
        ImageFormat::Jpeg | ImageFormat::Bmp => DynamicImage::ImageRgb8(image.to_rgb8()),
        ImageFormat::Png | ImageFormat::Tiff => image,
    };

    image
        .save_with_format(path, format.to_image_format())
        .map_err(|e| PdfManagerError::ImageEncodeFailed {
            path: path.to_path_buf(),
            reason: e.to_string(),
        })
}
