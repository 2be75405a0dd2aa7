//! The interactive session: a file list plus the actions run on it.
//!
//! A [`Session`] owns everything a user works with between launch and quit.
//! Every question it asks and every message it shows goes through a
//! [`Prompter`], so the same controller drives the terminal front end, the
//! one-shot commands, and the test suite.
//!
//! Actions never return errors. Each one reports its outcome to the user
//! through [`Prompter::notify`] and returns an [`ActionReport`].

pub mod prompter;
pub mod report;

pub use prompter::{Notice, NoticeLevel, Prompter};
pub use report::{Action, ActionReport, ActionStatus, FileFailure};

use std::path::{Path, PathBuf};
use tracing::{debug, info};

use crate::config::{APP_NAME, Config, OverwriteMode};
use crate::dialogs::DialogOutcome;
use crate::drop_target::{DropOutcome, DropTarget};
use crate::error::{PdfManagerError, Result};
use crate::file_list::FileList;
use crate::io::{PdfWriter, WriteOptions};
use crate::merge::{MIN_MERGE_INPUTS, merge_files};
use crate::raster::{PageRenderer, Rasterizer};
use crate::split::Splitter;
use crate::utils::display_name;

/// User manual, linked from the about box.
pub const MANUAL_URL: &str = "https://github.com/SaeByeolMun/PDFManager/tree/main";

/// Licenses and third-party notices, linked from the about box.
pub const LICENSES_URL: &str = "https://github.com/SaeByeolMun/PDFManager/tree/main/licenses";

/// Text shown by [`Session::about`].
pub const ABOUT_TEXT: &str = "Merge, split and rasterize PDF files.\n\n\
Add files by pasting or dragging their paths, select them by number, \
then merge, split or save them as images.";

/// File list, configuration and the operations that act on them.
pub struct Session<P, R> {
    config: Config,
    files: FileList,
    drop_target: DropTarget,
    prompter: P,
    writer: PdfWriter,
    splitter: Splitter,
    rasterizer: Rasterizer<R>,
}

impl<P: Prompter, R: PageRenderer> Session<P, R> {
    /// Create an empty session.
    pub fn new(config: Config, prompter: P, renderer: R) -> Self {
        let writer = PdfWriter::with_options(WriteOptions {
            compress: config.compress,
            ..WriteOptions::default()
        });
        let batch_overwrite = match config.overwrite_mode {
            OverwriteMode::NoClobber => OverwriteMode::NoClobber,
            _ => OverwriteMode::Force,
        };

        Self {
            splitter: Splitter::new(writer.clone()).with_overwrite_mode(batch_overwrite),
            rasterizer: Rasterizer::new(renderer).with_overwrite_mode(batch_overwrite),
            files: FileList::new(),
            drop_target: DropTarget::new(),
            writer,
            prompter,
            config,
        }
    }

    /// The session configuration.
    pub fn config(&self) -> &Config {
        &self.config
    }

    /// The current file list.
    pub fn files(&self) -> &FileList {
        &self.files
    }

    /// The prompter.
    pub fn prompter(&self) -> &P {
        &self.prompter
    }

    /// Mutable access to the prompter.
    pub fn prompter_mut(&mut self) -> &mut P {
        &mut self.prompter
    }

    /// The renderer used for rasterizing.
    pub fn renderer(&self) -> &R {
        self.rasterizer.renderer()
    }

    /// Add dropped paths. Non-PDF paths are ignored with a warning.
    ///
    /// Returns the number of files added to the list.
    pub fn drop_paths<I, T>(&mut self, paths: I) -> usize
    where
        I: IntoIterator<Item = T>,
        T: Into<PathBuf>,
    {
        let outcome = self.drop_target.drop_paths(paths);
        self.accept_drop(outcome)
    }

    /// Add paths pasted as text.
    pub fn drop_text(&mut self, text: &str) -> usize {
        let outcome = self.drop_target.drop_text(text);
        self.accept_drop(outcome)
    }

    fn accept_drop(&mut self, outcome: DropOutcome) -> usize {
        if !outcome.rejected.is_empty() {
            let names: Vec<String> = outcome.rejected.iter().map(|p| display_name(p)).collect();
            debug!(rejected = ?outcome.rejected, "ignored non-PDF drop");
            self.prompter.notify(Notice::warning(
                "Not a PDF",
                format!("Only PDF files can be added: {}", names.join(", ")),
            ));
        }

        let added = self.files.add_all(outcome.accepted);
        debug!(added, total = self.files.len(), "files dropped");
        added
    }

    /// Select the entry at `index` (0-based), keeping other selections.
    pub fn select(&mut self, index: usize) -> Result<()> {
        self.files.select(index)
    }

    /// Select only the entry at `index`.
    pub fn select_only(&mut self, index: usize) -> Result<()> {
        self.files.select_only(index)
    }

    /// Deselect the entry at `index`.
    pub fn deselect(&mut self, index: usize) -> Result<()> {
        self.files.deselect(index)
    }

    /// Select every entry.
    pub fn select_all(&mut self) {
        self.files.select_all();
    }

    /// Deselect every entry.
    pub fn clear_selection(&mut self) {
        self.files.clear_selection();
    }

    /// Remove the selected entries, warning when nothing is selected.
    pub fn remove_selected(&mut self) -> Vec<PathBuf> {
        match self.files.remove_selected() {
            Ok(removed) => removed,
            Err(e) => {
                self.prompter.notify(Notice::warning("Warning", e.to_string()));
                Vec::new()
            }
        }
    }

    /// Empty the list.
    pub fn clear(&mut self) {
        self.files.clear();
    }

    /// Move the entry at `from` to position `to`.
    pub fn move_item(&mut self, from: usize, to: usize) -> Result<()> {
        self.files.move_item(from, to)
    }

    /// Show the about box.
    pub fn about(&mut self) {
        self.prompter.notify(Notice::info(
            format!("About {APP_NAME}"),
            format!(
                "{APP_NAME} {}\n\n{ABOUT_TEXT}\n\n\
                 User manual: {MANUAL_URL}\n\
                 Licenses / third-party notices: {LICENSES_URL}",
                env!("CARGO_PKG_VERSION")
            ),
        ));
    }

    /// Merge every listed file, in list order, into one document.
    pub async fn merge(&mut self) -> ActionReport {
        let action = Action::Merge;
        let inputs = self.files.paths();

        if inputs.len() < MIN_MERGE_INPUTS {
            return self.block(
                action,
                PdfManagerError::NotEnoughFiles {
                    required: MIN_MERGE_INPUTS,
                    found: inputs.len(),
                },
            );
        }

        let default = self.config.default_merge_output();
        let Some(output) = self.prompter.save_file("Save merged PDF", &default) else {
            return ActionReport::cancelled(action);
        };

        if let Err(e) = self.resolve_overwrite(&output).await {
            if matches!(e, PdfManagerError::Cancelled) {
                return ActionReport::cancelled(action);
            }
            return self.fail(action, None, e);
        }

        match merge_files(&inputs, &output, &self.writer).await {
            Ok(report) => {
                info!(
                    output = %report.output.display(),
                    pages = report.total_pages,
                    files = report.files_merged,
                    size = report.output_size,
                    "merge finished"
                );
                self.prompter.notify(Notice::info(
                    "Done",
                    format!("PDF saved successfully:\n{}", report.output.display()),
                ));
                ActionReport {
                    outputs: vec![report.output],
                    ..ActionReport::new(action)
                }
            }
            Err(e) => self.fail(action, None, e),
        }
    }

    /// Split each selected file, asking for options per file.
    pub async fn split_selected(&mut self) -> ActionReport {
        let action = Action::Split;
        let sources = match self.require_selection(action) {
            Ok(sources) => sources,
            Err(report) => return report,
        };
        let out_dir = match self
            .choose_output_dir(action, "Choose a folder for the split files")
            .await
        {
            Ok(dir) => dir,
            Err(report) => return report,
        };

        let mut report = ActionReport::new(action);
        let mut processed = 0;

        for (index, source) in sources.iter().enumerate() {
            let options = match self.prompter.split_options(source) {
                DialogOutcome::Accepted(options) => options,
                DialogOutcome::Cancelled => {
                    debug!(source = %source.display(), "split skipped");
                    report.skipped.push(source.clone());
                    continue;
                }
            };

            match self.splitter.split(source, &options, &out_dir).await {
                Ok(split) => {
                    processed += 1;
                    self.prompter.notify(Notice::info(
                        "Done",
                        format!(
                            "{} was split into {} file(s) in:\n{}",
                            display_name(source),
                            split.outputs.len(),
                            out_dir.display()
                        ),
                    ));
                    report.outputs.extend(split.outputs);
                }
                Err(e) => {
                    if self.record_failure(&mut report, source, e) {
                        report.skipped.extend(sources[index + 1..].iter().cloned());
                        break;
                    }
                }
            }
        }

        self.finish_batch(report, processed, sources.len())
    }

    /// Save every page of each selected file as an image.
    pub async fn rasterize_selected(&mut self) -> ActionReport {
        let action = Action::Rasterize;
        let sources = match self.require_selection(action) {
            Ok(sources) => sources,
            Err(report) => return report,
        };

        let options = match self.prompter.image_options() {
            DialogOutcome::Accepted(options) => options,
            DialogOutcome::Cancelled => return ActionReport::cancelled(action),
        };

        let out_dir = match self
            .choose_output_dir(action, "Choose a folder for the images")
            .await
        {
            Ok(dir) => dir,
            Err(report) => return report,
        };

        let mut report = ActionReport::new(action);
        let mut processed = 0;

        for (index, source) in sources.iter().enumerate() {
            match self.rasterizer.rasterize(source, &options, &out_dir) {
                Ok(raster) => {
                    processed += 1;
                    self.prompter.notify(Notice::info(
                        "Done",
                        format!(
                            "Saved {} page image(s) of {} to:\n{}",
                            raster.outputs.len(),
                            display_name(source),
                            out_dir.display()
                        ),
                    ));
                    report.outputs.extend(raster.outputs);
                }
                Err(e) => {
                    if self.record_failure(&mut report, source, e) {
                        report.skipped.extend(sources[index + 1..].iter().cloned());
                        break;
                    }
                }
            }
        }

        self.finish_batch(report, processed, sources.len())
    }

    fn require_selection(
        &mut self,
        action: Action,
    ) -> std::result::Result<Vec<PathBuf>, ActionReport> {
        if self.files.has_selection() {
            Ok(self.files.selected_paths())
        } else {
            Err(self.block(
                action,
                PdfManagerError::NoSelection {
                    action: action.verb(),
                },
            ))
        }
    }

    async fn choose_output_dir(
        &mut self,
        action: Action,
        title: &str,
    ) -> std::result::Result<PathBuf, ActionReport> {
        let default = self.config.default_dir.clone();
        let Some(dir) = self.prompter.pick_directory(title, &default) else {
            return Err(ActionReport::cancelled(action));
        };

        match self.writer.can_write(&dir).await {
            Ok(()) => Ok(dir),
            Err(e) => Err(self.fail(action, None, e)),
        }
    }

    /// Apply the overwrite policy to the merge destination.
    async fn resolve_overwrite(&mut self, output: &Path) -> Result<()> {
        if !self.writer.exists(output).await {
            return Ok(());
        }

        match self.config.overwrite_mode {
            OverwriteMode::Force => Ok(()),
            OverwriteMode::NoClobber => Err(PdfManagerError::output_exists(output.to_path_buf())),
            OverwriteMode::Prompt => {
                if self.prompter.confirm_overwrite(output) {
                    Ok(())
                } else {
                    Err(PdfManagerError::Cancelled)
                }
            }
        }
    }

    fn block(&mut self, action: Action, error: PdfManagerError) -> ActionReport {
        debug!(action = action.verb(), error = %error, "action blocked");
        self.prompter.notify(failure_notice(action, &error));
        ActionReport::blocked(action, &error)
    }

    fn fail(
        &mut self,
        action: Action,
        path: Option<PathBuf>,
        error: PdfManagerError,
    ) -> ActionReport {
        debug!(action = action.verb(), error = %error, "action failed");
        self.prompter.notify(failure_notice(action, &error));
        ActionReport::failed(action, path, &error)
    }

    /// Report a failed file. Returns true if the batch should stop.
    fn record_failure(
        &mut self,
        report: &mut ActionReport,
        source: &Path,
        error: PdfManagerError,
    ) -> bool {
        debug!(source = %source.display(), error = %error, "file failed");

        let mut notice = failure_notice(report.action, &error);
        notice.message = format!("{}: {}", display_name(source), notice.message);
        self.prompter.notify(notice);

        report
            .failures
            .push(FileFailure::new(Some(source.to_path_buf()), &error));

        self.config.stop_on_error() || !error.is_recoverable()
    }

    fn finish_batch(
        &mut self,
        report: ActionReport,
        processed: usize,
        total: usize,
    ) -> ActionReport {
        let report = report.finish_batch(processed);

        if total > 1 && report.status != ActionStatus::Cancelled {
            let mut lines = vec![format!(
                "{processed} of {total} file(s) processed, {} file(s) written.",
                report.outputs.len()
            )];
            lines.extend(report.failures.iter().map(|failure| {
                let name = failure
                    .path
                    .as_deref()
                    .map(display_name)
                    .unwrap_or_default();
                format!("Failed: {name}")
            }));
            lines.extend(
                report
                    .skipped
                    .iter()
                    .map(|path| format!("Skipped: {}", display_name(path))),
            );

            let notice = if report.failures.is_empty() {
                Notice::info("Summary", lines.join("\n"))
            } else {
                Notice::warning("Summary", lines.join("\n"))
            };
            self.prompter.notify(notice);
        }

        info!(
            action = report.action.verb(),
            status = ?report.status,
            outputs = report.outputs.len(),
            failures = report.failures.len(),
            "batch finished"
        );
        report
    }
}

/// Message box for a failed action. Range errors are input problems and
/// shown as warnings.
fn failure_notice(action: Action, error: &PdfManagerError) -> Notice {
    match error {
        e if e.is_precondition() => Notice::warning("Warning", e.to_string()),
        PdfManagerError::InvalidPageRange { .. } | PdfManagerError::PageOutOfRange { .. } => {
            Notice::warning("Input error", error.to_string())
        }
        _ => Notice::error("Error", format!("Could not {}: {error}", action.verb())),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{Dpi, RasterizeOptions, SplitOptions};
    use crate::raster::PageSink;
    use crate::testing::write_sample_pdf;
    use tempfile::TempDir;

    #[derive(Default)]
    struct RecordingPrompter {
        save_to: Option<PathBuf>,
        notices: Vec<Notice>,
    }

    impl Prompter for RecordingPrompter {
        fn save_file(&mut self, _title: &str, _default: &Path) -> Option<PathBuf> {
            self.save_to.clone()
        }

        fn pick_directory(&mut self, _title: &str, _default: &Path) -> Option<PathBuf> {
            None
        }

        fn split_options(&mut self, _source: &Path) -> DialogOutcome<SplitOptions> {
            DialogOutcome::Accepted(SplitOptions::AllPages)
        }

        fn image_options(&mut self) -> DialogOutcome<RasterizeOptions> {
            DialogOutcome::Cancelled
        }

        fn notify(&mut self, notice: Notice) {
            self.notices.push(notice);
        }
    }

    struct NoRenderer;

    impl PageRenderer for NoRenderer {
        fn page_count(&self, _path: &Path) -> Result<usize> {
            Err(PdfManagerError::renderer_unavailable("not in tests"))
        }

        fn render_pages(&self, _path: &Path, _dpi: Dpi, _sink: &mut PageSink<'_>) -> Result<usize> {
            Err(PdfManagerError::renderer_unavailable("not in tests"))
        }
    }

    fn session() -> Session<RecordingPrompter, NoRenderer> {
        Session::new(Config::default(), RecordingPrompter::default(), NoRenderer)
    }

    #[test]
    fn test_drop_rejects_non_pdf_with_warning() {
        let mut session = session();
        let added = session.drop_paths(["/tmp/a.pdf", "/tmp/notes.txt", "/tmp/b.PDF"]);

        assert_eq!(added, 2);
        assert_eq!(session.files().len(), 2);
        let notice = &session.prompter().notices[0];
        assert_eq!(notice.level, NoticeLevel::Warning);
        assert!(notice.message.contains("notes.txt"));
    }

    #[test]
    fn test_about_links_manual_and_licenses() {
        let mut session = session();
        session.about();

        let notice = &session.prompter().notices[0];
        assert_eq!(notice.level, NoticeLevel::Info);
        assert_eq!(notice.title, "About PDFManager");
        assert!(notice.message.contains(MANUAL_URL));
        assert!(notice.message.contains(LICENSES_URL));
    }

    #[test]
    fn test_drop_duplicate_is_ignored() {
        let mut session = session();
        session.drop_text("/tmp/a.pdf");
        assert_eq!(session.drop_text("'/tmp/a.pdf'"), 0);
        assert_eq!(session.files().len(), 1);
        assert!(session.prompter().notices.is_empty());
    }

    #[test]
    fn test_remove_without_selection_warns() {
        let mut session = session();
        session.drop_paths(["/tmp/a.pdf"]);

        assert!(session.remove_selected().is_empty());
        assert_eq!(session.files().len(), 1);
        assert_eq!(session.prompter().notices[0].level, NoticeLevel::Warning);
    }

    #[tokio::test]
    async fn test_merge_needs_two_files() {
        let mut session = session();
        session.drop_paths(["/tmp/a.pdf"]);

        let report = session.merge().await;

        assert_eq!(report.status, ActionStatus::Blocked);
        assert!(report.outputs.is_empty());
        assert_eq!(session.prompter().notices[0].level, NoticeLevel::Warning);
    }

    #[tokio::test]
    async fn test_merge_cancelled_at_save_dialog() {
        let mut session = session();
        session.drop_paths(["/tmp/a.pdf", "/tmp/b.pdf"]);

        let report = session.merge().await;

        assert_eq!(report.status, ActionStatus::Cancelled);
        assert!(session.prompter().notices.is_empty());
    }

    #[tokio::test]
    async fn test_merge_refuses_existing_output_without_clobber() {
        let temp_dir = TempDir::new().unwrap();
        let a = write_sample_pdf(temp_dir.path(), "a.pdf", 1);
        let b = write_sample_pdf(temp_dir.path(), "b.pdf", 1);
        let output = temp_dir.path().join("out.pdf");
        std::fs::write(&output, b"keep me").unwrap();

        let config = Config {
            overwrite_mode: OverwriteMode::NoClobber,
            ..Config::default()
        };
        let prompter = RecordingPrompter {
            save_to: Some(output.clone()),
            ..RecordingPrompter::default()
        };
        let mut session = Session::new(config, prompter, NoRenderer);
        session.drop_paths([a, b]);

        let report = session.merge().await;

        assert_eq!(report.status, ActionStatus::Failed);
        assert_eq!(report.exit_code(), 4);
        assert_eq!(std::fs::read(&output).unwrap(), b"keep me");
    }

    #[tokio::test]
    async fn test_split_and_rasterize_need_selection() {
        let mut session = session();
        session.drop_paths(["/tmp/a.pdf"]);

        assert_eq!(session.split_selected().await.status, ActionStatus::Blocked);
        assert_eq!(
            session.rasterize_selected().await.status,
            ActionStatus::Blocked
        );
        assert!(
            session
                .prompter()
                .notices
                .iter()
                .all(|n| n.level == NoticeLevel::Warning)
        );
    }

    #[test]
    fn test_failure_notice_levels() {
        let range = PdfManagerError::invalid_page_range("x", "bad");
        assert_eq!(
            failure_notice(Action::Split, &range).level,
            NoticeLevel::Warning
        );

        let load = PdfManagerError::failed_to_load_pdf("a.pdf".into(), "bad");
        let notice = failure_notice(Action::Split, &load);
        assert_eq!(notice.level, NoticeLevel::Error);
        assert!(notice.message.starts_with("Could not split"));

        let index = PdfManagerError::InvalidIndex { index: 4, len: 2 };
        let notice = failure_notice(Action::Merge, &index);
        assert_eq!(notice.level, NoticeLevel::Warning);
        assert_eq!(notice.title, "Warning");
        assert!(!notice.message.starts_with("Could not"));
    }
}
