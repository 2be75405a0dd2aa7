//! Accepting dropped files.
//!
//! Dragging files onto a terminal pastes their paths as text. Depending on
//! the terminal that text is quoted (`'/a b.pdf'`), backslash-escaped
//! (`/a\ b.pdf`) or a `file://` URL (`file:///a%20b.pdf`). [`DropTarget`]
//! turns such text back into paths and keeps only PDFs.

use std::borrow::Cow;
use std::path::{Path, PathBuf};

/// Extension accepted by the drop target, compared case-insensitively.
pub const PDF_EXTENSION: &str = "pdf";

/// Result of a drop.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DropOutcome {
    /// PDF paths, in drop order.
    pub accepted: Vec<PathBuf>,
    /// Everything else that was dropped.
    pub rejected: Vec<PathBuf>,
}

impl DropOutcome {
    /// Whether the drop contained no PDF at all.
    pub fn is_rejected(&self) -> bool {
        self.accepted.is_empty()
    }
}

/// Filters dropped paths down to PDF files.
#[derive(Debug, Clone, Copy, Default)]
pub struct DropTarget;

impl DropTarget {
    /// Create a drop target.
    pub fn new() -> Self {
        Self
    }

    /// Whether a drag carrying `paths` should be accepted: true if at least
    /// one of them is a PDF.
    pub fn accepts<P: AsRef<Path>>(&self, paths: &[P]) -> bool {
        paths.iter().any(|path| is_pdf(path.as_ref()))
    }

    /// Split dropped paths into PDFs and everything else.
    pub fn drop_paths<I, P>(&self, paths: I) -> DropOutcome
    where
        I: IntoIterator<Item = P>,
        P: Into<PathBuf>,
    {
        let (accepted, rejected) = paths
            .into_iter()
            .map(Into::into)
            .partition(|path: &PathBuf| is_pdf(path));
        DropOutcome { accepted, rejected }
    }

    /// Decode pasted text into paths and filter them.
    pub fn drop_text(&self, text: &str) -> DropOutcome {
        self.drop_paths(parse_dropped_text(text))
    }
}

/// Whether `path` has a `.pdf` extension in any letter case.
pub fn is_pdf(path: &Path) -> bool {
    path.extension()
        .is_some_and(|ext| ext.to_string_lossy().eq_ignore_ascii_case(PDF_EXTENSION))
}

/// Turn pasted drag-and-drop text into paths.
///
/// # Examples
///
/// ```
/// use pdfmanager::drop_target::parse_dropped_text;
/// use std::path::PathBuf;
///
/// let paths = parse_dropped_text("'/tmp/my file.pdf' file:///tmp/b%20c.pdf");
/// assert_eq!(paths, vec![PathBuf::from("/tmp/my file.pdf"), PathBuf::from("/tmp/b c.pdf")]);
/// ```
pub fn parse_dropped_text(text: &str) -> Vec<PathBuf> {
    split_words(text)
        .into_iter()
        .map(|word| word_to_path(&word))
        .collect()
}

/// Shell word splitting. Windows paths use backslash as a separator, so
/// backslashes are kept literal there. Text with an unclosed quote falls
/// back to plain whitespace splitting.
fn split_words(text: &str) -> Vec<String> {
    let text = if cfg!(windows) {
        Cow::Owned(text.replace('\\', "\\\\"))
    } else {
        Cow::Borrowed(text)
    };

    shell_words::split(&text)
        .unwrap_or_else(|_| text.split_whitespace().map(str::to_string).collect())
}

fn word_to_path(word: &str) -> PathBuf {
    let Some(rest) = word.strip_prefix("file://") else {
        return PathBuf::from(word);
    };

    let rest = rest.strip_prefix("localhost").unwrap_or(rest);
    let decoded = urlencoding::decode(rest)
        .map(|cow| cow.into_owned())
        .unwrap_or_else(|_| rest.to_string());

    // file:///C:/x.pdf names C:/x.pdf on Windows.
    if cfg!(windows)
        && let Some(stripped) = decoded.strip_prefix('/')
        && stripped.as_bytes().get(1) == Some(&b':')
    {
        return PathBuf::from(stripped);
    }

    PathBuf::from(decoded)
}
