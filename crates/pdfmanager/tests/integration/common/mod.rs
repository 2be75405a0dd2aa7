//! Shared helpers for the integration tests.
//!
//! Fixture PDFs are generated on the fly. Each page draws the text
//! `"<stem> <n>"`, so tests can check which source page ended up where.

use image::{DynamicImage, RgbImage};
use lopdf::content::{Content, Operation};
use lopdf::{Document, Object, ObjectId, Stream, dictionary};
use std::cell::RefCell;
use std::collections::VecDeque;
use std::path::{Path, PathBuf};

use pdfmanager::config::{Dpi, RasterizeOptions, SplitOptions};
use pdfmanager::dialogs::DialogOutcome;
use pdfmanager::error::{PdfManagerError, Result};
use pdfmanager::raster::{PageRenderer, PageSink};
use pdfmanager::session::{Notice, NoticeLevel, Prompter};

/// Pages per intermediate node of generated page trees.
const PAGES_PER_NODE: usize = 3;

/// Write a fixture with `pages` pages to `dir/name`.
///
/// Pages hang off intermediate `Pages` nodes, and fonts and the media box
/// are only defined on the root, so every page inherits them through two
/// levels.
pub fn write_pdf(dir: &Path, name: &str, pages: usize) -> PathBuf {
    let label = Path::new(name)
        .file_stem()
        .map(|stem| stem.to_string_lossy().into_owned())
        .unwrap_or_default();

    let mut doc = Document::with_version("1.5");
    let root_id = doc.new_object_id();
    let font_id = doc.add_object(dictionary! {
        "Type" => "Font",
        "Subtype" => "Type1",
        "BaseFont" => "Courier",
    });

    let mut nodes: Vec<Object> = Vec::new();
    for chunk_start in (1..=pages).step_by(PAGES_PER_NODE) {
        let node_id = doc.new_object_id();
        let chunk_end = (chunk_start + PAGES_PER_NODE - 1).min(pages);

        let kids: Vec<Object> = (chunk_start..=chunk_end)
            .map(|number| add_page(&mut doc, node_id, &format!("{label} {number}")).into())
            .collect();

        doc.objects.insert(
            node_id,
            Object::Dictionary(dictionary! {
                "Type" => "Pages",
                "Parent" => root_id,
                "Kids" => kids,
                "Count" => (chunk_end - chunk_start + 1) as i64,
            }),
        );
        nodes.push(node_id.into());
    }

    doc.objects.insert(
        root_id,
        Object::Dictionary(dictionary! {
            "Type" => "Pages",
            "Kids" => nodes,
            "Count" => pages as i64,
            "Resources" => dictionary! { "Font" => dictionary! { "F1" => font_id } },
            "MediaBox" => vec![0.into(), 0.into(), 595.into(), 842.into()],
        }),
    );

    let catalog_id = doc.add_object(dictionary! {
        "Type" => "Catalog",
        "Pages" => root_id,
    });
    doc.trailer.set("Root", catalog_id);

    let path = dir.join(name);
    doc.save(&path).expect("write fixture");
    path
}

fn add_page(doc: &mut Document, parent: ObjectId, text: &str) -> ObjectId {
    let content = Content {
        operations: vec![
            Operation::new("BT", vec![]),
            Operation::new("Tf", vec!["F1".into(), 18.into()]),
            Operation::new("Td", vec![50.into(), 780.into()]),
            Operation::new("Tj", vec![Object::string_literal(text)]),
            Operation::new("ET", vec![]),
        ],
    };
    let content_id = doc.add_object(Stream::new(
        dictionary! {},
        content.encode().expect("encode content"),
    ));
    doc.add_object(dictionary! {
        "Type" => "Page",
        "Parent" => parent,
        "Contents" => content_id,
    })
}

/// Text drawn on each page of the PDF at `path`, in page order.
pub fn page_texts(path: &Path) -> Vec<String> {
    let doc = Document::load(path).expect("load output");
    doc.get_pages()
        .values()
        .map(|&page_id| {
            doc.get_and_decode_page_content(page_id)
                .expect("decode content")
                .operations
                .iter()
                .filter(|op| op.operator == "Tj")
                .filter_map(|op| op.operands.first())
                .filter_map(|operand| operand.as_str().ok())
                .map(|bytes| String::from_utf8_lossy(bytes).into_owned())
                .collect::<Vec<_>>()
                .join(" ")
        })
        .collect()
}

/// File names in `dir`, sorted.
pub fn file_names(dir: &Path) -> Vec<String> {
    let mut names: Vec<String> = std::fs::read_dir(dir)
        .expect("read dir")
        .map(|entry| entry.expect("dir entry").file_name().to_string_lossy().into_owned())
        .collect();
    names.sort();
    names
}

/// A prompter that replays queued answers and records notices.
///
/// Prompts with nothing queued are cancelled.
#[derive(Default)]
pub struct ScriptedPrompter {
    pub save_paths: VecDeque<PathBuf>,
    pub directories: VecDeque<PathBuf>,
    pub split_answers: VecDeque<DialogOutcome<SplitOptions>>,
    pub image_answers: VecDeque<DialogOutcome<RasterizeOptions>>,
    pub overwrite_answers: VecDeque<bool>,
    pub notices: Vec<Notice>,
}

impl ScriptedPrompter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn save_to(mut self, path: PathBuf) -> Self {
        self.save_paths.push_back(path);
        self
    }

    pub fn directory(mut self, dir: PathBuf) -> Self {
        self.directories.push_back(dir);
        self
    }

    pub fn split(mut self, answer: DialogOutcome<SplitOptions>) -> Self {
        self.split_answers.push_back(answer);
        self
    }

    pub fn image(mut self, answer: DialogOutcome<RasterizeOptions>) -> Self {
        self.image_answers.push_back(answer);
        self
    }

    pub fn overwrite(mut self, answer: bool) -> Self {
        self.overwrite_answers.push_back(answer);
        self
    }

    pub fn levels(&self) -> Vec<NoticeLevel> {
        self.notices.iter().map(|notice| notice.level).collect()
    }

    pub fn titles(&self) -> Vec<&str> {
        self.notices.iter().map(|notice| notice.title.as_str()).collect()
    }
}

impl Prompter for ScriptedPrompter {
    fn save_file(&mut self, _title: &str, _default: &Path) -> Option<PathBuf> {
        self.save_paths.pop_front()
    }

    fn pick_directory(&mut self, _title: &str, _default: &Path) -> Option<PathBuf> {
        self.directories.pop_front()
    }

    fn split_options(&mut self, _source: &Path) -> DialogOutcome<SplitOptions> {
        self.split_answers
            .pop_front()
            .unwrap_or(DialogOutcome::Cancelled)
    }

    fn image_options(&mut self) -> DialogOutcome<RasterizeOptions> {
        self.image_answers
            .pop_front()
            .unwrap_or(DialogOutcome::Cancelled)
    }

    fn confirm_overwrite(&mut self, _path: &Path) -> bool {
        self.overwrite_answers.pop_front().unwrap_or(false)
    }

    fn notify(&mut self, notice: Notice) {
        self.notices.push(notice);
    }
}

/// Renders pages of fixture PDFs as solid images, using lopdf for the
/// page count.
#[derive(Default)]
pub struct FakeRenderer {
    /// Every `(file name, dpi)` render call.
    pub calls: RefCell<Vec<(String, u32)>>,
    /// Simulate a missing PDFium library.
    pub unavailable: bool,
}

impl FakeRenderer {
    pub fn unavailable() -> Self {
        Self {
            unavailable: true,
            ..Self::default()
        }
    }
}

impl PageRenderer for FakeRenderer {
    fn page_count(&self, path: &Path) -> Result<usize> {
        if self.unavailable {
            return Err(PdfManagerError::renderer_unavailable("no library"));
        }
        Document::load(path)
            .map(|doc| doc.get_pages().len())
            .map_err(|e| PdfManagerError::failed_to_load_pdf(path.to_path_buf(), e.to_string()))
    }

    fn render_pages(&self, path: &Path, dpi: Dpi, sink: &mut PageSink<'_>) -> Result<usize> {
        let pages = self.page_count(path)?;
        self.calls.borrow_mut().push((
            path.file_name()
                .map(|name| name.to_string_lossy().into_owned())
                .unwrap_or_default(),
            dpi.get(),
        ));

        // A4 at `dpi`, scaled down so tests stay fast.
        let width = (595.0 * dpi.scale_factor() / 10.0) as u32;
        let height = (842.0 * dpi.scale_factor() / 10.0) as u32;
        for page in 1..=pages as u32 {
            sink(page, DynamicImage::ImageRgb8(RgbImage::new(width, height)))?;
        }
        Ok(pages)
    }
}
