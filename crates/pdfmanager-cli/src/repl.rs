//! The interactive session loop.

use std::io::BufRead;

use pdfmanager::config::BatchPolicy;
use pdfmanager::output::{
    OutputFormatter, display_action_report, display_file_list, display_validation_summary,
};
use pdfmanager::raster::PageRenderer;
use pdfmanager::session::Session;
use pdfmanager::validation::Validator;

use crate::prompter::TerminalPrompter;

const HELP: &str = "\
Paste or drag PDF files here to add them.

  list                 show the file list (* marks selected files)
  add <paths>          add files
  select <n>...        select files by number
  select all           select every file
  deselect [<n>...]    deselect files, or everything
  move <from> <to>     move a file to another position
  remove               remove the selected files
  clear                remove every file
  merge                merge all files, in list order
  split                split the selected files
  rasterize            save the selected files as images
  info                 show details of the selected (or all) files
  about                about this program
  help                 show this help
  quit                 leave";

/// One line of user input.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ReplCommand {
    /// Blank line.
    Nothing,
    /// Show the file list.
    List,
    /// Add pasted or typed paths.
    Add(String),
    /// Select entries (0-based).
    Select(Vec<usize>),
    /// Select every entry.
    SelectAll,
    /// Deselect entries (0-based); everything when empty.
    Deselect(Vec<usize>),
    /// Move an entry (0-based positions).
    Move(usize, usize),
    /// Remove the selection.
    Remove,
    /// Remove everything.
    Clear,
    /// Merge the list.
    Merge,
    /// Split the selection.
    Split,
    /// Rasterize the selection.
    Rasterize,
    /// Show file details.
    Info,
    /// Show the about box.
    About,
    /// Show the command list.
    Help,
    /// Leave the session.
    Quit,
}

/// Parse a line of input.
///
/// Positions are typed 1-based and returned 0-based. A line that does not
/// start with a command word is taken as pasted paths.
///
/// # Errors
///
/// Returns a message for malformed arguments or unknown single words.
pub fn parse_command(line: &str) -> Result<ReplCommand, String> {
    let line = line.trim();
    let (word, rest) = line
        .split_once(char::is_whitespace)
        .map_or((line, ""), |(word, rest)| (word, rest.trim()));

    let command = match word.to_lowercase().as_str() {
        "" => ReplCommand::Nothing,
        "list" | "ls" => ReplCommand::List,
        "add" if rest.is_empty() => return Err("Usage: add <paths>".to_string()),
        "add" => ReplCommand::Add(rest.to_string()),
        "select" if rest.eq_ignore_ascii_case("all") => ReplCommand::SelectAll,
        "select" => {
            let positions = parse_positions(rest)?;
            if positions.is_empty() {
                return Err("Usage: select <n>... | select all".to_string());
            }
            ReplCommand::Select(positions)
        }
        "deselect" => ReplCommand::Deselect(parse_positions(rest)?),
        "move" => match parse_positions(rest)?.as_slice() {
            &[from, to] => ReplCommand::Move(from, to),
            _ => return Err("Usage: move <from> <to>".to_string()),
        },
        "remove" | "rm" => ReplCommand::Remove,
        "clear" => ReplCommand::Clear,
        "merge" => ReplCommand::Merge,
        "split" => ReplCommand::Split,
        "rasterize" | "images" => ReplCommand::Rasterize,
        "info" => ReplCommand::Info,
        "about" => ReplCommand::About,
        "help" | "?" => ReplCommand::Help,
        "quit" | "exit" | "q" => ReplCommand::Quit,
        _ if rest.is_empty() && !looks_like_path(word) => {
            return Err(format!("Unknown command: {word}. Type 'help' for commands."));
        }
        _ => ReplCommand::Add(line.to_string()),
    };

    Ok(command)
}

fn looks_like_path(word: &str) -> bool {
    word.contains(['/', '\\', '.', '\'', '"'])
}

fn parse_positions(text: &str) -> Result<Vec<usize>, String> {
    text.split([' ', ','])
        .filter(|part| !part.is_empty())
        .map(|part| match part.parse::<usize>() {
            Ok(position) if position > 0 => Ok(position - 1),
            _ => Err(format!("Invalid position: {part}")),
        })
        .collect()
}

/// Read commands until `quit` or end of input.
pub async fn run<I, R>(session: &mut Session<TerminalPrompter<I>, R>, formatter: &OutputFormatter)
where
    I: BufRead,
    R: PageRenderer,
{
    formatter.info("Type 'help' for commands. Paste or drag PDF files here to add them.");

    loop {
        let Some(line) = session.prompter_mut().read_line("pdfmanager> ") else {
            formatter.blank_line();
            break;
        };

        let command = match parse_command(&line) {
            Ok(command) => command,
            Err(message) => {
                formatter.warning(&message);
                continue;
            }
        };

        if command == ReplCommand::Quit {
            break;
        }
        execute(session, formatter, command).await;
    }
}

async fn execute<I, R>(
    session: &mut Session<TerminalPrompter<I>, R>,
    formatter: &OutputFormatter,
    command: ReplCommand,
) where
    I: BufRead,
    R: PageRenderer,
{
    let result = match command {
        ReplCommand::Nothing | ReplCommand::Quit => Ok(()),
        ReplCommand::List => {
            show_list(session, formatter).await;
            Ok(())
        }
        ReplCommand::Add(text) => {
            let added = session.drop_text(&text);
            formatter.info(&format!(
                "Added {added} file(s), {} in list",
                session.files().len()
            ));
            Ok(())
        }
        ReplCommand::Select(positions) => positions
            .into_iter()
            .try_for_each(|position| session.select(position)),
        ReplCommand::SelectAll => {
            session.select_all();
            Ok(())
        }
        ReplCommand::Deselect(positions) if positions.is_empty() => {
            session.clear_selection();
            Ok(())
        }
        ReplCommand::Deselect(positions) => positions
            .into_iter()
            .try_for_each(|position| session.deselect(position)),
        ReplCommand::Move(from, to) => session.move_item(from, to),
        ReplCommand::Remove => {
            let removed = session.remove_selected();
            if !removed.is_empty() {
                formatter.info(&format!("Removed {} file(s)", removed.len()));
            }
            Ok(())
        }
        ReplCommand::Clear => {
            session.clear();
            Ok(())
        }
        ReplCommand::Merge => {
            let report = session.merge().await;
            display_action_report(formatter, &report);
            Ok(())
        }
        ReplCommand::Split => {
            let report = session.split_selected().await;
            display_action_report(formatter, &report);
            Ok(())
        }
        ReplCommand::Rasterize => {
            let report = session.rasterize_selected().await;
            display_action_report(formatter, &report);
            Ok(())
        }
        ReplCommand::Info => {
            show_info(session, formatter).await;
            Ok(())
        }
        ReplCommand::About => {
            session.about();
            Ok(())
        }
        ReplCommand::Help => {
            formatter.info(HELP);
            Ok(())
        }
    };

    if let Err(e) = result {
        formatter.warning(&e.to_string());
    }
}

async fn show_list<I, R>(session: &Session<TerminalPrompter<I>, R>, formatter: &OutputFormatter)
where
    I: BufRead,
    R: PageRenderer,
{
    display_file_list(formatter, session.files());

    if formatter.is_verbose() && !session.files().is_empty() {
        let paths = session.files().paths();
        if let Ok(summary) = Validator::new()
            .validate_files(&paths, BatchPolicy::Continue)
            .await
        {
            display_validation_summary(formatter, &summary);
        }
    }
}

async fn show_info<I, R>(session: &Session<TerminalPrompter<I>, R>, formatter: &OutputFormatter)
where
    I: BufRead,
    R: PageRenderer,
{
    let files = session.files();
    let paths = if files.has_selection() {
        files.selected_paths()
    } else {
        files.paths()
    };

    if paths.is_empty() {
        formatter.info("No files.");
        return;
    }

    match Validator::new()
        .validate_files(&paths, BatchPolicy::Continue)
        .await
    {
        Ok(summary) => display_validation_summary(formatter, &summary),
        Err(e) => formatter.error(&e.to_string()),
    }
}
