//! PDFium-backed page renderer.
//!
//! The PDFium shared library is bound on first use, trying in order:
//!
//! 1. the directory given with `--pdfium-path` / `PDFMANAGER_PDFIUM_PATH`
//! 2. a `pdfium/` directory next to the executable
//! 3. the system library search path

use pdfium_render::prelude::*;
use std::cell::OnceCell;
use std::path::{Path, PathBuf};
use tracing::{debug, warn};

use super::renderer::{PageRenderer, PageSink};
use crate::config::Dpi;
use crate::error::{PdfManagerError, Result};

/// Name of the bundled library directory next to the executable.
pub const BUNDLED_LIBRARY_DIR: &str = "pdfium";

/// Renders pages with PDFium.
pub struct PdfiumRenderer {
    library_dir: Option<PathBuf>,
    pdfium: OnceCell<Pdfium>,
}

impl PdfiumRenderer {
    /// Create a renderer; `library_dir` is tried before the default
    /// locations. Nothing is loaded until the first render.
    pub fn new(library_dir: Option<PathBuf>) -> Self {
        Self {
            library_dir,
            pdfium: OnceCell::new(),
        }
    }

    /// Directories searched for the library, in order.
    pub fn candidate_dirs(&self) -> Vec<PathBuf> {
        let mut dirs = Vec::new();
        if let Some(dir) = &self.library_dir {
            dirs.push(dir.clone());
        }
        if let Ok(exe) = std::env::current_exe()
            && let Some(exe_dir) = exe.parent()
        {
            dirs.push(exe_dir.join(BUNDLED_LIBRARY_DIR));
        }
        dirs
    }

    fn pdfium(&self) -> Result<&Pdfium> {
        if let Some(pdfium) = self.pdfium.get() {
            return Ok(pdfium);
        }

        let bindings = self.bind()?;
        Ok(self.pdfium.get_or_init(|| Pdfium::new(bindings)))
    }

    fn bind(&self) -> Result<Box<dyn PdfiumLibraryBindings>> {
        let mut failures = Vec::new();

        for dir in self.candidate_dirs() {
            let dir_str = dir.to_string_lossy();
            match Pdfium::bind_to_library(Pdfium::pdfium_platform_library_name_at_path(&*dir_str)) {
                Ok(bindings) => {
                    debug!(dir = %dir.display(), "bound PDFium");
                    return Ok(bindings);
                }
                Err(e) => failures.push(format!("{}: {e:?}", dir.display())),
            }
        }

        match Pdfium::bind_to_system_library() {
            Ok(bindings) => {
                debug!("bound system PDFium");
                Ok(bindings)
            }
            Err(e) => {
                failures.push(format!("system library: {e:?}"));
                warn!(attempts = failures.len(), "PDFium library not found");
                Err(PdfManagerError::renderer_unavailable(failures.join("; ")))
            }
        }
    }

    fn open<'a>(&self, pdfium: &'a Pdfium, path: &Path) -> Result<PdfDocument<'a>> {
        let path_string = path.to_string_lossy().into_owned();
        pdfium
            .load_pdf_from_file(&path_string, None)
            .map_err(|e| open_error(path, e))
    }
}

fn open_error(path: &Path, err: PdfiumError) -> PdfManagerError {
    match err {
        PdfiumError::PdfiumLibraryInternalError(PdfiumInternalError::PasswordError) => {
            PdfManagerError::encrypted_pdf(path.to_path_buf())
        }
        other => PdfManagerError::render_failed(path.to_path_buf(), format!("{other:?}")),
    }
}

impl PageRenderer for PdfiumRenderer {
    fn page_count(&self, path: &Path) -> Result<usize> {
        let pdfium = self.pdfium()?;
        let document = self.open(pdfium, path)?;
        Ok(document.pages().len() as usize)
    }

    fn render_pages(&self, path: &Path, dpi: Dpi, sink: &mut PageSink<'_>) -> Result<usize> {
        let pdfium = self.pdfium()?;
        let document = self.open(pdfium, path)?;
        let render_config = PdfRenderConfig::new().scale_page_by_factor(dpi.scale_factor());

        let mut rendered = 0;
        for (index, page) in document.pages().iter().enumerate() {
            let number = index as u32 + 1;
            let bitmap = page.render_with_config(&render_config).map_err(|e| {
                PdfManagerError::render_failed(path.to_path_buf(), format!("page {number}: {e:?}"))
            })?;
            sink(number, bitmap.as_image())?;
            rendered += 1;
        }

        Ok(rendered)
    }
}
