//! tedit: a small terminal text editor.
//!
//! The binary owns the terminal and the filesystem; all editing state
//! lives in [`tedit_editor::Editor`]. The main loop is refresh, read
//! one key, dispatch.

mod file_io;
mod terminal;

use std::env;
use std::io::{self, Write};
use std::path::{Path, PathBuf};

use anyhow::Result;
use tedit_config::CHROME_ROWS;
use tedit_editor::Editor;
use tedit_keyboard::{read_key, ByteSource, Key};
use terminal::{RawMode, StdinSource};

const HELP_MESSAGE: &str = "HELP: Ctrl-S = save | Ctrl-Q = quit | Ctrl-F = find";

const CTRL_Q: Key = Key::ctrl(b'q');
const CTRL_S: Key = Key::ctrl(b's');
const CTRL_F: Key = Key::ctrl(b'f');
const CTRL_H: Key = Key::ctrl(b'h');
const CTRL_L: Key = Key::ctrl(b'l');

fn log_path() -> PathBuf {
    dirs::data_dir()
        .unwrap_or_else(env::temp_dir)
        .join("tedit")
        .join("tedit.log")
}

fn main() -> Result<()> {
    tedit_logger::init(log_path(), tedit_logger::LogLevel::Info);

    let (rows, cols) = terminal::window_size()?;
    // The bottom two rows belong to the status and message bars.
    let mut editor = Editor::new(rows.saturating_sub(CHROME_ROWS), cols);

    if let Some(path) = env::args().nth(1) {
        let lines = file_io::read_lines(Path::new(&path))?;
        editor.open(&path, lines);
    }
    editor.set_status_message(HELP_MESSAGE);

    let _raw = RawMode::enable()?;
    let mut src = StdinSource::new();
    let mut out = io::stdout();

    loop {
        editor.refresh(&mut out)?;
        let Some(key) = read_key(&mut src)? else {
            continue;
        };
        if !process_key(&mut editor, key, &mut src, &mut out)? {
            break;
        }
    }

    // Leave a clean screen for the shell.
    write!(out, "\x1b[2J\x1b[H")?;
    out.flush()?;
    Ok(())
}

/// Dispatch one key. Returns false when the editor should exit.
fn process_key<S: ByteSource, W: Write>(
    editor: &mut Editor,
    key: Key,
    src: &mut S,
    out: &mut W,
) -> Result<bool> {
    match key {
        CTRL_Q => {
            if editor.request_quit() {
                tedit_logger::info("exiting");
                return Ok(false);
            }
            // Keep the confirmation counter ticking down.
            return Ok(true);
        }
        CTRL_S => save(editor, src, out)?,
        CTRL_F => editor.find(src, out)?,
        Key::ENTER => editor.insert_newline(),
        Key::BACKSPACE | CTRL_H => editor.backspace(),
        Key::Delete => editor.delete_forward(),
        Key::Home => editor.move_home(),
        Key::End => editor.move_end(),
        Key::PageUp | Key::PageDown => editor.page_move(key),
        Key::Up | Key::Down | Key::Left | Key::Right => editor.move_cursor(key),
        Key::Escape | CTRL_L => {}
        // Tab is a control byte but a legitimate edit.
        Key::Byte(b'\t') => editor.insert_char('\t'),
        Key::Byte(b) if !b.is_ascii_control() && b < 128 => editor.insert_char(b as char),
        Key::Byte(_) => {}
    }
    editor.reset_quit_counter();
    Ok(true)
}

/// Save the buffer, prompting for a filename if there is none yet.
fn save<S: ByteSource, W: Write>(editor: &mut Editor, src: &mut S, out: &mut W) -> Result<()> {
    if editor.filename().is_none() {
        match editor.prompt(src, out, "Save as: {} (ESC to cancel)")? {
            Some(name) => editor.set_filename(&name),
            None => {
                editor.set_status_message("Save aborted");
                return Ok(());
            }
        }
    }
    let Some(name) = editor.filename().map(str::to_string) else {
        return Ok(());
    };

    let contents = editor.contents();
    match file_io::write_file(Path::new(&name), &contents) {
        Ok(n) => {
            editor.mark_saved();
            editor.set_status_message(format!("{} bytes written to disk", n));
            tedit_logger::info(format!("saved {} ({} bytes)", name, n));
        }
        Err(err) => {
            editor.set_status_message(format!("Can't save! I/O error: {:#}", err));
            tedit_logger::error(format!("save failed: {:#}", err));
        }
    }
    Ok(())
}
