//! pdfmanager - Merge, split and rasterize PDF files.
//!
//! This library provides the operations behind the `pdfmanager` tool:
//!
//! - Merging several PDFs into one, in list order
//! - Splitting a PDF into single pages or user-specified page ranges
//! - Rendering every page of a PDF to PNG, JPEG, BMP or TIFF images
//! - An interactive session holding a reorderable, selectable file list
//!
//! # Examples
//!
//! ## Merge
//!
//! ```no_run
//! use pdfmanager::io::PdfWriter;
//! use pdfmanager::merge::merge_files;
//! use std::path::{Path, PathBuf};
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let inputs = vec![PathBuf::from("a.pdf"), PathBuf::from("b.pdf")];
//! let report = merge_files(&inputs, Path::new("merged.pdf"), &PdfWriter::new()).await?;
//! println!("Created {} page document", report.total_pages);
//! # Ok(())
//! # }
//! ```
//!
//! ## Split by page range
//!
//! ```no_run
//! use pdfmanager::config::SplitOptions;
//! use pdfmanager::range::PageRange;
//! use pdfmanager::split::Splitter;
//! use std::path::Path;
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let options = SplitOptions::EachRange(PageRange::parse("1-3,5")?);
//! let report = Splitter::default()
//!     .split(Path::new("report.pdf"), &options, Path::new("out"))
//!     .await?;
//! println!("Wrote {} files", report.outputs.len());
//! # Ok(())
//! # }
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod config;
pub mod dialogs;
pub mod drop_target;
pub mod error;
pub mod file_list;
pub mod io;
pub mod merge;
pub mod output;
pub mod pages;
pub mod range;
pub mod raster;
pub mod session;
pub mod split;
pub mod utils;
pub mod validation;

#[cfg(test)]
mod testing;

// Re-export commonly used types
pub use config::Config;
pub use error::{PdfManagerError, Result};
pub use session::{Prompter, Session};

/// Library version.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Library name.
pub const NAME: &str = env!("CARGO_PKG_NAME");
