//! Output formatting and display for pdfmanager.
//!
//! This module handles all user-facing output including:
//! - Formatted status messages and session notices
//! - The numbered file list
//! - Validation and action summaries
//!
//! Diagnostic logging goes through `tracing` instead.
//!
//! # Examples
//!
//! ```no_run
//! use pdfmanager::output::OutputFormatter;
//! use pdfmanager::config::Config;
//!
//! # fn example(config: Config) {
//! let formatter = OutputFormatter::from_config(&config);
//! formatter.info("Starting merge operation");
//! formatter.success("Merge completed successfully");
//! # }
//! ```

pub mod formatter;

pub use formatter::{MessageLevel, OutputFormatter};

use crate::config::Config;
use crate::file_list::FileList;
use crate::session::{ActionReport, ActionStatus};
use crate::utils::display_name;
use crate::validation::{ValidationResult, ValidationSummary};

/// Create an output formatter from configuration.
pub fn create_formatter(config: &Config) -> OutputFormatter {
    OutputFormatter::from_config(config)
}

/// Print the file list, one numbered line per entry.
///
/// Selected entries are marked. Positions are 1-based, as typed by the
/// user.
pub fn display_file_list(formatter: &OutputFormatter, files: &FileList) {
    if files.is_empty() {
        formatter.info("No files. Paste or drag PDF paths here to add them.");
        return;
    }

    for (index, entry) in files.entries().iter().enumerate() {
        formatter.list_item(index + 1, &entry.display_name(), entry.is_selected());
        formatter.detail("path", &entry.path().display().to_string());
    }
}

/// Print details about one validated file.
pub fn display_validation_result(formatter: &OutputFormatter, result: &ValidationResult) {
    formatter.section(&display_name(&result.path));
    formatter.info(&format!("  Pages:     {}", result.page_count));
    formatter.info(&format!("  Size:      {}", result.format_file_size()));
    if let Some((major, minor)) = result.version {
        formatter.info(&format!("  Version:   PDF {major}.{minor}"));
    }
    if let Some((width, height)) = result.page_dimensions {
        formatter.info(&format!("  Page size: {width:.0} x {height:.0} pt"));
    }
    if result.is_encrypted {
        formatter.warning("  Encrypted");
    }
    formatter.detail("Objects", &result.object_count.to_string());
    formatter.detail("Path", &result.path.display().to_string());
}

/// Display validation summary to the user.
pub fn display_validation_summary(formatter: &OutputFormatter, summary: &ValidationSummary) {
    for result in &summary.results {
        display_validation_result(formatter, result);
    }

    for failure in &summary.failures {
        formatter.error(&failure.message);
    }

    formatter.blank_line();
    if summary.files_failed() > 0 {
        formatter.warning(&format!(
            "Warning: {} file(s) failed validation",
            summary.files_failed()
        ));
    }

    formatter.info(&format!(
        "Validated {} file(s): {} pages, {}",
        summary.files_validated(),
        summary.total_pages,
        summary.format_total_size()
    ));
}

/// Print the files an action wrote. Only shown in verbose mode.
pub fn display_action_report(formatter: &OutputFormatter, report: &ActionReport) {
    if !formatter.is_verbose() || report.status == ActionStatus::Blocked {
        return;
    }

    formatter.section(&format!(
        "{} ({:?}): {} file(s) written",
        report.action.verb(),
        report.status,
        report.outputs.len()
    ));
    for output in &report.outputs {
        formatter.debug(&output.display().to_string());
    }
    for skipped in &report.skipped {
        formatter.debug(&format!("skipped {}", skipped.display()));
    }
}
