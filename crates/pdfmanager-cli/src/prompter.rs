//! Prompters for the terminal session and the one-shot commands.

use std::io::{self, BufRead, Write};
use std::path::{Path, PathBuf};

use pdfmanager::config::{ImageFormat, RasterizeOptions, SplitOptions};
use pdfmanager::dialogs::{
    DialogOutcome, ImageOptionsDialog, RangeMode, SplitChoice, SplitOptionsDialog,
};
use pdfmanager::drop_target::parse_dropped_text;
use pdfmanager::output::OutputFormatter;
use pdfmanager::session::{Notice, Prompter};
use pdfmanager::utils::display_name;

/// Answers that back out of a prompt.
const CANCEL_WORDS: [&str; 3] = ["q", "quit", "cancel"];

fn is_cancel(answer: &str) -> bool {
    CANCEL_WORDS
        .iter()
        .any(|word| answer.eq_ignore_ascii_case(word))
}

/// Asks questions on stdout and reads answers line by line.
pub struct TerminalPrompter<I> {
    input: I,
    formatter: OutputFormatter,
}

impl TerminalPrompter<io::StdinLock<'static>> {
    /// A prompter reading from stdin.
    pub fn stdin(formatter: OutputFormatter) -> Self {
        Self::new(io::stdin().lock(), formatter)
    }
}

impl<I: BufRead> TerminalPrompter<I> {
    /// A prompter reading from `input`.
    pub fn new(input: I, formatter: OutputFormatter) -> Self {
        Self { input, formatter }
    }

    /// The formatter used for notices.
    pub fn formatter(&self) -> &OutputFormatter {
        &self.formatter
    }

    /// Print `prompt` and read one trimmed line. `None` at end of input.
    pub fn read_line(&mut self, prompt: &str) -> Option<String> {
        print!("{prompt}");
        io::stdout().flush().ok();

        let mut line = String::new();
        match self.input.read_line(&mut line) {
            Ok(0) | Err(_) => None,
            Ok(_) => Some(line.trim().to_string()),
        }
    }

    /// Ask a question; empty answers become `default`, cancel words and
    /// end of input become `None`.
    fn ask(&mut self, question: &str, default: &str) -> Option<String> {
        let answer = self.read_line(&format!("{question} [{default}]: "))?;
        if is_cancel(&answer) {
            None
        } else if answer.is_empty() {
            Some(default.to_string())
        } else {
            Some(answer)
        }
    }

    /// Ask for a path. Quoted and dragged paths are accepted; anything else
    /// is taken verbatim.
    fn ask_path(&mut self, title: &str, default: &Path) -> Option<PathBuf> {
        let answer = self.read_line(&format!("{title} [{}]: ", default.display()))?;
        if is_cancel(&answer) {
            return None;
        }
        if answer.is_empty() {
            return Some(default.to_path_buf());
        }

        let mut paths = parse_dropped_text(&answer);
        if paths.len() == 1 {
            paths.pop()
        } else {
            Some(PathBuf::from(answer))
        }
    }

    fn run_split_dialog(&mut self, dialog: &mut SplitOptionsDialog) -> Option<SplitOptions> {
        let choice = self.ask("Split [a]ll pages or a page [r]ange?", "a")?;
        if choice.starts_with(['r', 'R']) {
            dialog.choose(SplitChoice::Range);
        } else {
            dialog.choose(SplitChoice::All);
        }

        loop {
            if dialog.range_controls_enabled() {
                let text = self.ask("Pages, e.g. 1-3,5", dialog.range_text())?;
                dialog.set_range_text(text);

                let mode = self.ask("[e]ach range to its own file or [c]ombine them?", "e")?;
                dialog.set_range_mode(if mode.starts_with(['c', 'C']) {
                    RangeMode::Combined
                } else {
                    RangeMode::Each
                });
            }

            match dialog.confirm() {
                Ok(outcome) => return outcome.accepted(),
                Err(e) => self.formatter.warning(&format!("Input error: {e}")),
            }
        }
    }

    fn run_image_dialog(&mut self, dialog: &mut ImageOptionsDialog) -> Option<RasterizeOptions> {
        loop {
            let answer = self.ask("Format (png, jpeg, bmp, tiff)", dialog.format().extension())?;
            match answer.parse::<ImageFormat>() {
                Ok(format) => {
                    dialog.select_format(format);
                    break;
                }
                Err(e) => self.formatter.warning(&e.to_string()),
            }
        }

        let dpi = self.ask("DPI", dialog.dpi_text())?;
        dialog.set_dpi_text(dpi);
        dialog.confirm().accepted()
    }
}

impl<I: BufRead> Prompter for TerminalPrompter<I> {
    fn save_file(&mut self, title: &str, default: &Path) -> Option<PathBuf> {
        self.ask_path(title, default)
    }

    fn pick_directory(&mut self, title: &str, default: &Path) -> Option<PathBuf> {
        self.ask_path(title, default)
    }

    fn split_options(&mut self, source: &Path) -> DialogOutcome<SplitOptions> {
        self.formatter
            .section(&format!("Split options for {}", display_name(source)));

        let mut dialog = SplitOptionsDialog::new();
        match self.run_split_dialog(&mut dialog) {
            Some(options) => DialogOutcome::Accepted(options),
            None => dialog.cancel(),
        }
    }

    fn image_options(&mut self) -> DialogOutcome<RasterizeOptions> {
        self.formatter.section("Image options");

        let mut dialog = ImageOptionsDialog::new();
        match self.run_image_dialog(&mut dialog) {
            Some(options) => DialogOutcome::Accepted(options),
            None => dialog.cancel(),
        }
    }

    fn confirm_overwrite(&mut self, path: &Path) -> bool {
        self.formatter
            .warning(&format!("Output file already exists: {}", path.display()));
        self.read_line("Overwrite? [y/N]: ")
            .is_some_and(|answer| matches!(answer.to_lowercase().as_str(), "y" | "yes"))
    }

    fn notify(&mut self, notice: Notice) {
        self.formatter.notice(&notice);
    }
}

/// Answers every prompt from command-line arguments.
///
/// A prompt without a preset answer is cancelled.
pub struct PresetPrompter {
    formatter: OutputFormatter,
    save_to: Option<PathBuf>,
    directory: Option<PathBuf>,
    split: Option<SplitOptions>,
    image: Option<RasterizeOptions>,
}

impl PresetPrompter {
    /// A prompter with no answers.
    pub fn new(formatter: OutputFormatter) -> Self {
        Self {
            formatter,
            save_to: None,
            directory: None,
            split: None,
            image: None,
        }
    }

    /// Answer the save prompt with `path`.
    pub fn save_to(mut self, path: PathBuf) -> Self {
        self.save_to = Some(path);
        self
    }

    /// Answer directory prompts with `dir`.
    pub fn directory(mut self, dir: PathBuf) -> Self {
        self.directory = Some(dir);
        self
    }

    /// Use `options` for every file split.
    pub fn split(mut self, options: SplitOptions) -> Self {
        self.split = Some(options);
        self
    }

    /// Use `options` for rasterizing.
    pub fn image(mut self, options: RasterizeOptions) -> Self {
        self.image = Some(options);
        self
    }
}

impl Prompter for PresetPrompter {
    fn save_file(&mut self, _title: &str, _default: &Path) -> Option<PathBuf> {
        self.save_to.clone()
    }

    fn pick_directory(&mut self, _title: &str, _default: &Path) -> Option<PathBuf> {
        self.directory.clone()
    }

    fn split_options(&mut self, _source: &Path) -> DialogOutcome<SplitOptions> {
        self.split
            .clone()
            .map_or(DialogOutcome::Cancelled, DialogOutcome::Accepted)
    }

    fn image_options(&mut self) -> DialogOutcome<RasterizeOptions> {
        self.image
            .map_or(DialogOutcome::Cancelled, DialogOutcome::Accepted)
    }

    /// Asks on the terminal. In quiet mode the answer is no.
    fn confirm_overwrite(&mut self, path: &Path) -> bool {
        if self.formatter.is_quiet() {
            return false;
        }

        TerminalPrompter::stdin(self.formatter.clone()).confirm_overwrite(path)
    }

    fn notify(&mut self, notice: Notice) {
        self.formatter.notice(&notice);
    }
}
