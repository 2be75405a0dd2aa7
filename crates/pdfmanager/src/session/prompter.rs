//! The user-interaction seam of a session.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::{Path, PathBuf};

use crate::config::{RasterizeOptions, SplitOptions};
use crate::dialogs::DialogOutcome;

/// Severity of a [`Notice`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum NoticeLevel {
    /// Completion or neutral information.
    Info,
    /// A blocked action or rejected input.
    Warning,
    /// A failed operation.
    Error,
}

/// A message shown to the user after an action.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Notice {
    /// Severity.
    pub level: NoticeLevel,
    /// Short heading.
    pub title: String,
    /// Body text.
    pub message: String,
}

impl Notice {
    /// An informational notice.
    pub fn info(title: impl Into<String>, message: impl Into<String>) -> Self {
        Self::new(NoticeLevel::Info, title, message)
    }

    /// A warning notice.
    pub fn warning(title: impl Into<String>, message: impl Into<String>) -> Self {
        Self::new(NoticeLevel::Warning, title, message)
    }

    /// An error notice.
    pub fn error(title: impl Into<String>, message: impl Into<String>) -> Self {
        Self::new(NoticeLevel::Error, title, message)
    }

    fn new(level: NoticeLevel, title: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            level,
            title: title.into(),
            message: message.into(),
        }
    }
}

impl fmt::Display for Notice {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.title, self.message)
    }
}

/// Everything a session asks of its user.
///
/// Each method corresponds to one modal interaction: a save dialog, a
/// folder picker, an options dialog, or a message box. `None` and
/// [`DialogOutcome::Cancelled`] mean the user backed out.
pub trait Prompter {
    /// Ask for a file to save to, starting at `default`.
    fn save_file(&mut self, title: &str, default: &Path) -> Option<PathBuf>;

    /// Ask for a directory, starting at `default`.
    fn pick_directory(&mut self, title: &str, default: &Path) -> Option<PathBuf>;

    /// Ask how to split `source`.
    fn split_options(&mut self, source: &Path) -> DialogOutcome<SplitOptions>;

    /// Ask for image format and resolution.
    fn image_options(&mut self) -> DialogOutcome<RasterizeOptions>;

    /// Ask whether `path` may be overwritten.
    fn confirm_overwrite(&mut self, path: &Path) -> bool {
        let _ = path;
        true
    }

    /// Show a message.
    fn notify(&mut self, notice: Notice);
}
