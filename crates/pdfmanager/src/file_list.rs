//! The ordered list of loaded PDF files.
//!
//! Entries are unique by full path and keep insertion order, which is also
//! the merge order. Indices in this API are 0-based; errors report the
//! 1-based position a user would type.

use std::path::{Path, PathBuf};

use crate::error::{PdfManagerError, Result};
use crate::utils::{absolutize, display_name};

/// One loaded file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FileEntry {
    path: PathBuf,
    selected: bool,
}

impl FileEntry {
    /// Full path of the file.
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Base name shown in the list.
    pub fn display_name(&self) -> String {
        display_name(&self.path)
    }

    /// Whether the entry is part of the current selection.
    pub fn is_selected(&self) -> bool {
        self.selected
    }
}

/// Ordered, duplicate-free list of PDF paths with a selection.
#[derive(Debug, Clone, Default)]
pub struct FileList {
    entries: Vec<FileEntry>,
}

impl FileList {
    /// Create an empty list.
    pub fn new() -> Self {
        Self::default()
    }

    /// Append `path` unless it is already present.
    ///
    /// Relative paths are made absolute first. Returns whether the path was
    /// added.
    pub fn add(&mut self, path: impl AsRef<Path>) -> bool {
        let path = absolutize(path.as_ref());
        if self.contains(&path) {
            return false;
        }

        self.entries.push(FileEntry {
            path,
            selected: false,
        });
        true
    }

    /// Append each path in order, skipping duplicates. Returns the number
    /// added.
    pub fn add_all<I, P>(&mut self, paths: I) -> usize
    where
        I: IntoIterator<Item = P>,
        P: AsRef<Path>,
    {
        paths.into_iter().filter(|path| self.add(path)).count()
    }

    /// Whether `path` is in the list.
    pub fn contains(&self, path: &Path) -> bool {
        self.entries.iter().any(|entry| entry.path == path)
    }

    /// Add the entry at `index` to the selection.
    pub fn select(&mut self, index: usize) -> Result<()> {
        self.entry_mut(index)?.selected = true;
        Ok(())
    }

    /// Make the entry at `index` the only selected one.
    pub fn select_only(&mut self, index: usize) -> Result<()> {
        self.check_index(index)?;
        self.clear_selection();
        self.select(index)
    }

    /// Remove the entry at `index` from the selection.
    pub fn deselect(&mut self, index: usize) -> Result<()> {
        self.entry_mut(index)?.selected = false;
        Ok(())
    }

    /// Select every entry.
    pub fn select_all(&mut self) {
        self.entries.iter_mut().for_each(|entry| entry.selected = true);
    }

    /// Deselect every entry.
    pub fn clear_selection(&mut self) {
        self.entries
            .iter_mut()
            .for_each(|entry| entry.selected = false);
    }

    /// Whether any entry is selected.
    pub fn has_selection(&self) -> bool {
        self.entries.iter().any(FileEntry::is_selected)
    }

    /// Selected paths in list order.
    pub fn selected_paths(&self) -> Vec<PathBuf> {
        self.entries
            .iter()
            .filter(|entry| entry.selected)
            .map(|entry| entry.path.clone())
            .collect()
    }

    /// Remove the selected entries and return their paths.
    ///
    /// # Errors
    ///
    /// Returns [`PdfManagerError::NoSelection`] and leaves the list unchanged
    /// when nothing is selected.
    pub fn remove_selected(&mut self) -> Result<Vec<PathBuf>> {
        if !self.has_selection() {
            return Err(PdfManagerError::NoSelection { action: "remove" });
        }

        let (removed, kept): (Vec<_>, Vec<_>) = std::mem::take(&mut self.entries)
            .into_iter()
            .partition(FileEntry::is_selected);
        self.entries = kept;

        Ok(removed.into_iter().map(|entry| entry.path).collect())
    }

    /// Remove every entry.
    pub fn clear(&mut self) {
        self.entries.clear();
    }

    /// Move the entry at `from` so that it ends up at `to`.
    ///
    /// The entry keeps its selection state.
    pub fn move_item(&mut self, from: usize, to: usize) -> Result<()> {
        self.check_index(from)?;
        self.check_index(to)?;

        let entry = self.entries.remove(from);
        self.entries.insert(to, entry);
        Ok(())
    }

    /// All entries in list order.
    pub fn entries(&self) -> &[FileEntry] {
        &self.entries
    }

    /// All paths in list order.
    pub fn paths(&self) -> Vec<PathBuf> {
        self.entries.iter().map(|entry| entry.path.clone()).collect()
    }

    /// Number of entries.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether the list is empty.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    fn check_index(&self, index: usize) -> Result<()> {
        if index < self.entries.len() {
            Ok(())
        } else {
            Err(PdfManagerError::InvalidIndex {
                index: index + 1,
                len: self.entries.len(),
            })
        }
    }

    fn entry_mut(&mut self, index: usize) -> Result<&mut FileEntry> {
        self.check_index(index)?;
        Ok(&mut self.entries[index])
    }
}
