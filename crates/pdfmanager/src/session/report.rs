//! What an action did.

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

use crate::error::PdfManagerError;

/// Session actions that produce a report.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Action {
    /// Merge every listed file.
    Merge,
    /// Split the selected files.
    Split,
    /// Save the selected files as images.
    Rasterize,
}

impl Action {
    /// Verb used in messages.
    pub fn verb(&self) -> &'static str {
        match self {
            Self::Merge => "merge",
            Self::Split => "split",
            Self::Rasterize => "save as images",
        }
    }
}

/// How an action ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ActionStatus {
    /// Every file was processed.
    Completed,
    /// Some files succeeded and some failed or were skipped.
    Partial,
    /// Nothing succeeded.
    Failed,
    /// The user cancelled before anything was written.
    Cancelled,
    /// A precondition did not hold; nothing was asked or written.
    Blocked,
}

/// A file an action could not process.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FileFailure {
    /// The input file, if the failure concerns one.
    pub path: Option<PathBuf>,
    /// Error message.
    pub message: String,
    /// Process exit code of the underlying error.
    pub exit_code: i32,
}

impl FileFailure {
    /// Record `error` for `path`.
    pub fn new(path: Option<PathBuf>, error: &PdfManagerError) -> Self {
        Self {
            path,
            message: error.to_string(),
            exit_code: error.exit_code(),
        }
    }
}

/// Outcome of one session action.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ActionReport {
    /// Which action ran.
    pub action: Action,
    /// How it ended.
    pub status: ActionStatus,
    /// Files written, in creation order.
    pub outputs: Vec<PathBuf>,
    /// Inputs that failed.
    pub failures: Vec<FileFailure>,
    /// Inputs that were not attempted.
    pub skipped: Vec<PathBuf>,
}

impl ActionReport {
    pub(crate) fn new(action: Action) -> Self {
        Self {
            action,
            status: ActionStatus::Completed,
            outputs: Vec::new(),
            failures: Vec::new(),
            skipped: Vec::new(),
        }
    }

    pub(crate) fn blocked(action: Action, error: &PdfManagerError) -> Self {
        Self {
            status: ActionStatus::Blocked,
            failures: vec![FileFailure::new(None, error)],
            ..Self::new(action)
        }
    }

    pub(crate) fn cancelled(action: Action) -> Self {
        Self {
            status: ActionStatus::Cancelled,
            ..Self::new(action)
        }
    }

    pub(crate) fn failed(action: Action, path: Option<PathBuf>, error: &PdfManagerError) -> Self {
        Self {
            status: ActionStatus::Failed,
            failures: vec![FileFailure::new(path, error)],
            ..Self::new(action)
        }
    }

    /// Derive the status of a batch from what it recorded.
    pub(crate) fn finish_batch(mut self, processed: usize) -> Self {
        self.status = if self.failures.is_empty() && self.skipped.is_empty() {
            ActionStatus::Completed
        } else if processed == 0 && self.failures.is_empty() {
            ActionStatus::Cancelled
        } else if processed == 0 {
            ActionStatus::Failed
        } else {
            ActionStatus::Partial
        };
        self
    }

    /// Whether the action finished without failures.
    pub fn is_success(&self) -> bool {
        self.status == ActionStatus::Completed
    }

    /// Exit code for a one-shot run: 0, or the code of the first failure.
    pub fn exit_code(&self) -> i32 {
        match self.status {
            ActionStatus::Completed => 0,
            ActionStatus::Cancelled => PdfManagerError::Cancelled.exit_code(),
            _ => self.failures.first().map_or(1, |failure| failure.exit_code),
        }
    }
}
