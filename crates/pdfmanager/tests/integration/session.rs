//! Integration tests driving a whole session through scripted prompts.

use pdfmanager::config::{
    BatchPolicy, Config, Dpi, ImageFormat, OverwriteMode, RasterizeOptions, SplitOptions,
};
use pdfmanager::dialogs::{DialogOutcome, ImageOptionsDialog, SplitChoice, SplitOptionsDialog};
use pdfmanager::range::PageRange;
use pdfmanager::session::{ActionStatus, NoticeLevel, Session};
use std::path::Path;
use tempfile::TempDir;

use crate::common::{FakeRenderer, ScriptedPrompter, file_names, page_texts, write_pdf};

fn config(dir: &Path) -> Config {
    Config {
        default_dir: dir.to_path_buf(),
        ..Config::default()
    }
}

fn each(text: &str) -> DialogOutcome<SplitOptions> {
    DialogOutcome::Accepted(SplitOptions::EachRange(PageRange::parse(text).unwrap()))
}

#[tokio::test]
async fn test_merge_in_list_order_after_move() {
    let temp_dir = TempDir::new().unwrap();
    let a = write_pdf(temp_dir.path(), "a.pdf", 1);
    let b = write_pdf(temp_dir.path(), "b.pdf", 2);
    let output = temp_dir.path().join("merged.pdf");

    let prompter = ScriptedPrompter::new().save_to(output.clone());
    let mut session = Session::new(config(temp_dir.path()), prompter, FakeRenderer::default());
    session.drop_paths([a, b]);
    session.move_item(1, 0).unwrap();

    let report = session.merge().await;

    assert_eq!(report.status, ActionStatus::Completed);
    assert_eq!(report.outputs, vec![output.clone()]);
    assert_eq!(page_texts(&output), vec!["b 1", "b 2", "a 1"]);
    assert_eq!(session.prompter().titles(), vec!["Done"]);
}

#[tokio::test]
async fn test_merge_prompt_mode_declined() {
    let temp_dir = TempDir::new().unwrap();
    let a = write_pdf(temp_dir.path(), "a.pdf", 1);
    let b = write_pdf(temp_dir.path(), "b.pdf", 1);
    let output = temp_dir.path().join("merged.pdf");
    std::fs::write(&output, b"old").unwrap();

    let config = Config {
        overwrite_mode: OverwriteMode::Prompt,
        ..config(temp_dir.path())
    };
    let prompter = ScriptedPrompter::new()
        .save_to(output.clone())
        .overwrite(false);
    let mut session = Session::new(config, prompter, FakeRenderer::default());
    session.drop_paths([a, b]);

    let report = session.merge().await;

    assert_eq!(report.status, ActionStatus::Cancelled);
    assert_eq!(std::fs::read(&output).unwrap(), b"old");
}

#[tokio::test]
async fn test_merge_failure_is_reported() {
    let temp_dir = TempDir::new().unwrap();
    let a = write_pdf(temp_dir.path(), "a.pdf", 1);
    let bad = temp_dir.path().join("bad.pdf");
    std::fs::write(&bad, b"not a pdf").unwrap();
    let output = temp_dir.path().join("merged.pdf");

    let prompter = ScriptedPrompter::new().save_to(output.clone());
    let mut session = Session::new(config(temp_dir.path()), prompter, FakeRenderer::default());
    session.drop_paths([a, bad]);

    let report = session.merge().await;

    assert_eq!(report.status, ActionStatus::Failed);
    assert_eq!(report.exit_code(), 3);
    assert!(!output.exists());
    assert_eq!(session.prompter().levels(), vec![NoticeLevel::Error]);
}

#[tokio::test]
async fn test_split_continues_after_range_error() {
    let temp_dir = TempDir::new().unwrap();
    let out = TempDir::new().unwrap();
    let short = write_pdf(temp_dir.path(), "short.pdf", 2);
    let long = write_pdf(temp_dir.path(), "long.pdf", 5);

    let prompter = ScriptedPrompter::new()
        .directory(out.path().to_path_buf())
        .split(each("1-3"))
        .split(each("1-3"));
    let mut session = Session::new(config(temp_dir.path()), prompter, FakeRenderer::default());
    session.drop_paths([short.clone(), long]);
    session.select_all();

    let report = session.split_selected().await;

    assert_eq!(report.status, ActionStatus::Partial);
    assert_eq!(report.failures.len(), 1);
    assert_eq!(report.failures[0].path.as_deref(), Some(short.as_path()));
    assert_eq!(
        file_names(out.path()),
        vec!["PDFManager_result_long_p1-3.pdf"]
    );

    let prompter = session.prompter();
    assert_eq!(
        prompter.levels(),
        vec![NoticeLevel::Warning, NoticeLevel::Info, NoticeLevel::Warning]
    );
    assert_eq!(prompter.titles(), vec!["Input error", "Done", "Summary"]);
}

#[tokio::test]
async fn test_split_stop_on_error_skips_rest() {
    let temp_dir = TempDir::new().unwrap();
    let out = TempDir::new().unwrap();
    let short = write_pdf(temp_dir.path(), "short.pdf", 2);
    let long = write_pdf(temp_dir.path(), "long.pdf", 5);

    let config = Config {
        batch_policy: BatchPolicy::StopOnError,
        ..config(temp_dir.path())
    };
    let prompter = ScriptedPrompter::new()
        .directory(out.path().to_path_buf())
        .split(each("4"))
        .split(each("4"));
    let mut session = Session::new(config, prompter, FakeRenderer::default());
    session.drop_paths([short, long.clone()]);
    session.select_all();

    let report = session.split_selected().await;

    assert_eq!(report.status, ActionStatus::Failed);
    assert_eq!(report.skipped, vec![long]);
    assert!(file_names(out.path()).is_empty());
}

#[tokio::test]
async fn test_split_dialog_cancel_skips_one_file() {
    let temp_dir = TempDir::new().unwrap();
    let out = TempDir::new().unwrap();
    let a = write_pdf(temp_dir.path(), "a.pdf", 2);
    let b = write_pdf(temp_dir.path(), "b.pdf", 2);

    let mut dialog = SplitOptionsDialog::new();
    dialog.choose(SplitChoice::All);
    let prompter = ScriptedPrompter::new()
        .directory(out.path().to_path_buf())
        .split(SplitOptionsDialog::new().cancel())
        .split(dialog.confirm().unwrap());
    let mut session = Session::new(config(temp_dir.path()), prompter, FakeRenderer::default());
    session.drop_paths([a.clone(), b]);
    session.select_all();

    let report = session.split_selected().await;

    assert_eq!(report.status, ActionStatus::Partial);
    assert_eq!(report.skipped, vec![a]);
    assert_eq!(file_names(out.path()), vec!["b_p1.pdf", "b_p2.pdf"]);
}

#[tokio::test]
async fn test_split_only_selected_files() {
    let temp_dir = TempDir::new().unwrap();
    let out = TempDir::new().unwrap();
    let a = write_pdf(temp_dir.path(), "a.pdf", 1);
    let b = write_pdf(temp_dir.path(), "b.pdf", 1);

    let prompter = ScriptedPrompter::new()
        .directory(out.path().to_path_buf())
        .split(DialogOutcome::Accepted(SplitOptions::AllPages));
    let mut session = Session::new(config(temp_dir.path()), prompter, FakeRenderer::default());
    session.drop_paths([a, b]);
    session.select_only(1).unwrap();

    let report = session.split_selected().await;

    assert!(report.is_success());
    assert_eq!(file_names(out.path()), vec!["b_p1.pdf"]);
}

#[tokio::test]
async fn test_split_cancelled_at_folder_prompt() {
    let temp_dir = TempDir::new().unwrap();
    let a = write_pdf(temp_dir.path(), "a.pdf", 1);

    let mut session = Session::new(
        config(temp_dir.path()),
        ScriptedPrompter::new(),
        FakeRenderer::default(),
    );
    session.drop_paths([a]);
    session.select_all();

    let report = session.split_selected().await;

    assert_eq!(report.status, ActionStatus::Cancelled);
    assert!(session.prompter().notices.is_empty());
}

#[tokio::test]
async fn test_rasterize_with_dialog_defaults() {
    let temp_dir = TempDir::new().unwrap();
    let out = TempDir::new().unwrap();
    let a = write_pdf(temp_dir.path(), "a.pdf", 2);

    let mut dialog = ImageOptionsDialog::new();
    dialog.set_dpi_text("abc");
    let prompter = ScriptedPrompter::new()
        .image(dialog.confirm())
        .directory(out.path().to_path_buf());
    let mut session = Session::new(config(temp_dir.path()), prompter, FakeRenderer::default());
    session.drop_paths([a]);
    session.select_all();

    let report = session.rasterize_selected().await;

    assert!(report.is_success());
    assert_eq!(file_names(out.path()), vec!["a_page1.png", "a_page2.png"]);
    assert_eq!(
        session.renderer().calls.borrow().as_slice(),
        &[("a.pdf".to_string(), 200)]
    );
    assert_eq!(session.prompter().levels(), vec![NoticeLevel::Info]);
}

#[tokio::test]
async fn test_rasterize_cancelled_at_image_dialog() {
    let temp_dir = TempDir::new().unwrap();
    let a = write_pdf(temp_dir.path(), "a.pdf", 1);

    let prompter = ScriptedPrompter::new()
        .image(ImageOptionsDialog::new().cancel())
        .directory(temp_dir.path().to_path_buf());
    let mut session = Session::new(config(temp_dir.path()), prompter, FakeRenderer::default());
    session.drop_paths([a]);
    session.select_all();

    let report = session.rasterize_selected().await;

    assert_eq!(report.status, ActionStatus::Cancelled);
    assert_eq!(session.prompter().directories.len(), 1);
}

#[tokio::test]
async fn test_rasterize_without_renderer_stops_batch() {
    let temp_dir = TempDir::new().unwrap();
    let out = TempDir::new().unwrap();
    let a = write_pdf(temp_dir.path(), "a.pdf", 1);
    let b = write_pdf(temp_dir.path(), "b.pdf", 1);

    let options = RasterizeOptions {
        format: ImageFormat::Bmp,
        dpi: Dpi::new(72).unwrap(),
    };
    let prompter = ScriptedPrompter::new()
        .image(DialogOutcome::Accepted(options))
        .directory(out.path().to_path_buf());
    let config = Config {
        overwrite_mode: OverwriteMode::NoClobber,
        ..config(temp_dir.path())
    };
    let mut session = Session::new(config, prompter, FakeRenderer::unavailable());
    session.drop_paths([a, b.clone()]);
    session.select_all();

    let report = session.rasterize_selected().await;

    assert_eq!(report.status, ActionStatus::Failed);
    assert_eq!(report.exit_code(), 7);
    assert_eq!(report.skipped, vec![b]);
    assert!(file_names(out.path()).is_empty());
}
