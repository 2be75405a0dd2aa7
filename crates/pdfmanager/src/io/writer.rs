//! PDF writing and saving operations.
//!
//! Writes go to a temporary file next to the destination which is then
//! renamed over it, so a failed write never leaves a truncated PDF behind.
//!
//! # Examples
//!
//! ```no_run
//! use pdfmanager::io::writer::PdfWriter;
//! use lopdf::Document;
//! use std::path::Path;
//!
//! # async fn example(doc: Document) -> Result<(), Box<dyn std::error::Error>> {
//! let writer = PdfWriter::new();
//! let stats = writer.save_owned(doc, Path::new("output.pdf")).await?;
//! println!("{} bytes", stats.file_size);
//! # Ok(())
//! # }
//! ```

use lopdf::Document;
use std::ffi::OsString;
use std::io::Write;
use std::path::{Path, PathBuf};
use std::time::{Duration, Instant};
use tokio::task;
use tracing::debug;

use crate::config::OverwriteMode;
use crate::error::{PdfManagerError, Result};

/// Options for writing PDF files.
#[derive(Debug, Clone)]
pub struct WriteOptions {
    /// Compress streams before writing.
    pub compress: bool,

    /// Buffer size for writing (in bytes).
    pub buffer_size: usize,
}

impl Default for WriteOptions {
    fn default() -> Self {
        Self {
            compress: true,
            buffer_size: 8192,
        }
    }
}

/// Statistics about a write operation.
#[derive(Debug, Clone)]
pub struct WriteStatistics {
    /// Time taken to write the file.
    pub write_time: Duration,

    /// Size of the written file in bytes.
    pub file_size: u64,

    /// Path where the file was written.
    pub output_path: PathBuf,
}

/// PDF writer with configurable behavior.
#[derive(Debug, Clone, Default)]
pub struct PdfWriter {
    options: WriteOptions,
}

impl PdfWriter {
    /// Create a new PDF writer with default options.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a writer with custom options.
    pub fn with_options(options: WriteOptions) -> Self {
        Self { options }
    }

    /// Create a writer without compression (faster but larger files).
    pub fn without_compression() -> Self {
        Self {
            options: WriteOptions {
                compress: false,
                ..Default::default()
            },
        }
    }

    /// Save a PDF and return statistics about the operation.
    ///
    /// The document is consumed; callers that need to keep it should clone
    /// it first.
    ///
    /// # Errors
    ///
    /// Returns [`PdfManagerError::FailedToCreateOutput`] when the file cannot
    /// be created and [`PdfManagerError::FailedToWrite`] when serialization
    /// or the final rename fails.
    pub async fn save_owned(&self, mut doc: Document, path: &Path) -> Result<WriteStatistics> {
        let path_buf = path.to_path_buf();
        let options = self.options.clone();

        let stats = task::spawn_blocking(move || {
            let start = Instant::now();

            if options.compress {
                doc.compress();
            }

            let write_path = temp_path_for(&path_buf);

            let file = std::fs::File::create(&write_path).map_err(|e| {
                PdfManagerError::FailedToCreateOutput {
                    path: write_path.clone(),
                    source: e,
                }
            })?;

            let mut writer = std::io::BufWriter::with_capacity(options.buffer_size, file);

            let written = doc
                .save_to(&mut writer)
                .map_err(|e| PdfManagerError::FailedToWrite {
                    path: write_path.clone(),
                    source: std::io::Error::other(e),
                })
                .and_then(|_| {
                    writer.flush().map_err(|e| PdfManagerError::FailedToWrite {
                        path: write_path.clone(),
                        source: e,
                    })
                });

            if let Err(err) = written {
                drop(writer);
                let _ = std::fs::remove_file(&write_path);
                return Err(err);
            }
            drop(writer);

            std::fs::rename(&write_path, &path_buf).map_err(|e| {
                let _ = std::fs::remove_file(&write_path);
                PdfManagerError::FailedToWrite {
                    path: path_buf.clone(),
                    source: e,
                }
            })?;

            let file_size = std::fs::metadata(&path_buf).map(|m| m.len()).unwrap_or(0);

            Ok::<_, PdfManagerError>(WriteStatistics {
                write_time: start.elapsed(),
                file_size,
                output_path: path_buf,
            })
        })
        .await
        .map_err(|e| PdfManagerError::other(format!("Write task failed: {e}")))??;

        debug!(
            path = %stats.output_path.display(),
            size = stats.file_size,
            compressed = self.options.compress,
            elapsed = ?stats.write_time,
            "wrote PDF"
        );

        Ok(stats)
    }

    /// Check if a file can be written into the given directory.
    ///
    /// # Errors
    ///
    /// Returns an error if the directory does not exist, is not a directory,
    /// or is read-only.
    pub async fn can_write(&self, dir: &Path) -> Result<()> {
        let metadata =
            tokio::fs::metadata(dir)
                .await
                .map_err(|_| PdfManagerError::invalid_config(format!(
                    "Output directory does not exist: {}",
                    dir.display()
                )))?;

        if !metadata.is_dir() {
            return Err(PdfManagerError::invalid_config(format!(
                "Output path is not a directory: {}",
                dir.display()
            )));
        }

        if metadata.permissions().readonly() {
            return Err(PdfManagerError::invalid_config(format!(
                "Output directory is not writable: {}",
                dir.display()
            )));
        }

        Ok(())
    }

    /// Check if output file exists.
    pub async fn exists(&self, path: &Path) -> bool {
        tokio::fs::metadata(path).await.is_ok()
    }

    /// Apply the overwrite policy to an output path.
    ///
    /// `Prompt` is resolved by the caller before writing, so it is treated
    /// like `Force` here.
    ///
    /// # Errors
    ///
    /// Returns [`PdfManagerError::OutputExists`] under `NoClobber` when the
    /// file is already there.
    pub async fn check_overwrite(&self, path: &Path, mode: OverwriteMode) -> Result<()> {
        if mode == OverwriteMode::NoClobber && self.exists(path).await {
            return Err(PdfManagerError::output_exists(path.to_path_buf()));
        }
        Ok(())
    }
}

/// `out.pdf` is staged as `out.pdf.tmp` in the same directory.
fn temp_path_for(path: &Path) -> PathBuf {
    let mut name = path
        .file_name()
        .map(|n| n.to_os_string())
        .unwrap_or_else(|| OsString::from("output"));
    name.push(".tmp");
    path.with_file_name(name)
}
