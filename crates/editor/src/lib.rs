//! The editing state machine.
//!
//! [`Editor`] owns the row buffer, cursor, scroll offsets and status
//! message, and exposes one method per editing operation. It knows
//! nothing about the real terminal: frames are written to any
//! `io::Write` sink and keys come in already decoded, which is what
//! makes the whole thing testable against in-memory buffers.

use std::io::Write;

use anyhow::Result;
use tedit_buffer::RowBuffer;
use tedit_config::QUIT_CONFIRM_TIMES;
use tedit_core::{Position, Scroll, StatusMessage};
use tedit_keyboard::{ByteSource, Key};
use tedit_prompt::PromptOutcome;
use tedit_text_search::SearchState;
use tedit_ui_render::{render, update_scroll, Frame};

pub struct Editor {
    buf: RowBuffer,
    cursor: Position,
    scroll: Scroll,
    /// Render column of the cursor, recomputed on every refresh
    rx: usize,
    screen_rows: usize,
    screen_cols: usize,
    status: Option<StatusMessage>,
    quit_times: u8,
}

impl Editor {
    pub fn new(screen_rows: usize, screen_cols: usize) -> Self {
        Self {
            buf: RowBuffer::new(),
            cursor: Position::default(),
            scroll: Scroll::default(),
            rx: 0,
            screen_rows,
            screen_cols,
            status: None,
            quit_times: QUIT_CONFIRM_TIMES,
        }
    }

    /// Replace the buffer with freshly read file content.
    pub fn open(&mut self, filename: &str, lines: Vec<String>) {
        self.buf = RowBuffer::from_lines(lines);
        self.buf.set_filename(filename);
        tedit_logger::info(format!("opened {} ({} rows)", filename, self.buf.len()));
    }

    pub fn buffer(&self) -> &RowBuffer {
        &self.buf
    }

    pub fn cursor(&self) -> Position {
        self.cursor
    }

    pub fn is_dirty(&self) -> bool {
        self.buf.is_dirty()
    }

    pub fn filename(&self) -> Option<&str> {
        self.buf.filename()
    }

    pub fn set_filename(&mut self, filename: &str) {
        self.buf.set_filename(filename);
    }

    /// Serialized buffer content for saving.
    pub fn contents(&self) -> String {
        self.buf.flatten()
    }

    pub fn mark_saved(&mut self) {
        self.buf.mark_saved();
    }

    pub fn set_status_message(&mut self, text: impl Into<String>) {
        self.status = Some(StatusMessage::new(text));
    }

    /// Repaint the whole screen into `out` in one flush.
    pub fn refresh<W: Write>(&mut self, out: &mut W) -> Result<()> {
        self.rx = match self.buf.row(self.cursor.y) {
            Some(row) => row.cx_to_rx(self.cursor.x),
            None => 0,
        };
        update_scroll(
            self.cursor,
            self.rx,
            &mut self.scroll,
            self.screen_rows,
            self.screen_cols,
        );

        let mut bytes = Vec::new();
        let frame = Frame {
            buf: &self.buf,
            cursor: self.cursor,
            rx: self.rx,
            scroll: self.scroll,
            screen_rows: self.screen_rows,
            screen_cols: self.screen_cols,
            status: self.status.as_ref(),
        };
        render(&frame, &mut bytes)?;
        out.write_all(&bytes)?;
        out.flush()?;
        Ok(())
    }

    /// Move the cursor one step. Left at column 0 wraps to the end of
    /// the previous row; right at the row end wraps to the start of
    /// the next. The column snaps to the row length afterwards.
    pub fn move_cursor(&mut self, key: Key) {
        match key {
            Key::Left => {
                if self.cursor.x > 0 {
                    self.cursor.x -= 1;
                } else if self.cursor.y > 0 {
                    self.cursor.y -= 1;
                    self.cursor.x = self.row_len(self.cursor.y);
                }
            }
            Key::Right => {
                if let Some(row) = self.buf.row(self.cursor.y) {
                    if self.cursor.x < row.len() {
                        self.cursor.x += 1;
                    } else {
                        self.cursor.y += 1;
                        self.cursor.x = 0;
                    }
                }
            }
            Key::Up => {
                if self.cursor.y > 0 {
                    self.cursor.y -= 1;
                }
            }
            Key::Down => {
                if self.cursor.y < self.buf.len() {
                    self.cursor.y += 1;
                }
            }
            _ => {}
        }
        let len = self.row_len(self.cursor.y);
        if self.cursor.x > len {
            self.cursor.x = len;
        }
    }

    pub fn move_home(&mut self) {
        self.cursor.x = 0;
    }

    pub fn move_end(&mut self) {
        self.cursor.x = self.row_len(self.cursor.y);
    }

    /// Move a whole screen up or down: jump the cursor to the
    /// viewport edge, then step one screenful further.
    pub fn page_move(&mut self, key: Key) {
        let step = match key {
            Key::PageUp => {
                self.cursor.y = self.scroll.row_off;
                Key::Up
            }
            Key::PageDown => {
                self.cursor.y = (self.scroll.row_off + self.screen_rows)
                    .saturating_sub(1)
                    .min(self.buf.len());
                Key::Down
            }
            _ => return,
        };
        for _ in 0..self.screen_rows {
            self.move_cursor(step);
        }
    }

    /// Insert a printable character at the cursor.
    pub fn insert_char(&mut self, c: char) {
        if self.cursor.y == self.buf.len() {
            self.buf.insert_row(self.buf.len(), "");
        }
        self.buf.insert_char(self.cursor.y, self.cursor.x, c);
        self.cursor.x += 1;
    }

    /// Split the current row at the cursor.
    pub fn insert_newline(&mut self) {
        if self.cursor.x == 0 {
            self.buf.insert_row(self.cursor.y, "");
        } else {
            self.buf.split_row(self.cursor.y, self.cursor.x);
        }
        self.cursor.y += 1;
        self.cursor.x = 0;
    }

    /// Delete the character left of the cursor; at column 0 the row
    /// merges into its predecessor.
    pub fn backspace(&mut self) {
        if self.cursor.y == self.buf.len() {
            return;
        }
        if self.cursor.x == 0 && self.cursor.y == 0 {
            return;
        }
        if self.cursor.x > 0 {
            self.buf.delete_char(self.cursor.y, self.cursor.x - 1);
            self.cursor.x -= 1;
        } else {
            let prev_len = self.row_len(self.cursor.y - 1);
            let tail = self
                .buf
                .row(self.cursor.y)
                .map(|row| row.raw().to_string())
                .unwrap_or_default();
            self.buf.append_raw(self.cursor.y - 1, &tail);
            self.buf.delete_row(self.cursor.y);
            self.cursor.y -= 1;
            self.cursor.x = prev_len;
        }
    }

    /// Delete the character under the cursor.
    pub fn delete_forward(&mut self) {
        if self.cursor.y >= self.buf.len() {
            return;
        }
        self.move_cursor(Key::Right);
        self.backspace();
    }

    /// One line of input through the status bar. `label` contains a
    /// `{}` placeholder that tracks the text as it is typed. Returns
    /// `None` when the user cancelled with Escape.
    pub fn prompt<S, W>(&mut self, src: &mut S, out: &mut W, label: &str) -> Result<Option<String>>
    where
        S: ByteSource,
        W: Write,
    {
        self.set_status_message(label.replace("{}", ""));
        self.refresh(out)?;

        let outcome = tedit_prompt::read_line(src, |input, _key| {
            self.set_status_message(label.replace("{}", input));
            self.refresh(out)
        })?;

        match outcome {
            PromptOutcome::Submitted(text) => {
                self.set_status_message("");
                Ok(Some(text))
            }
            PromptOutcome::Cancelled => Ok(None),
        }
    }

    /// Incremental search driven by the prompt: every keystroke runs
    /// one search step and repaints, arrows pick the direction, Escape
    /// puts the cursor back where the search began.
    pub fn find<S, W>(&mut self, src: &mut S, out: &mut W) -> Result<()>
    where
        S: ByteSource,
        W: Write,
    {
        let saved_cursor = self.cursor;
        let saved_scroll = self.scroll;
        let mut search = SearchState::new();
        let label = "Search: {} (Use ESC/Arrows/Enter)";

        self.set_status_message(label.replace("{}", ""));
        self.refresh(out)?;

        let outcome = tedit_prompt::read_line(src, |query, key| {
            tedit_text_search::step(
                &mut search,
                &mut self.buf,
                query,
                key,
                &mut self.cursor,
                &mut self.scroll,
            );
            self.status = Some(StatusMessage::new(label.replace("{}", query)));
            self.refresh(out)
        })?;

        match outcome {
            PromptOutcome::Submitted(_) => {
                tedit_logger::debug(format!("search committed at row {}", self.cursor.y));
                self.set_status_message("");
            }
            PromptOutcome::Cancelled => {
                self.cursor = saved_cursor;
                self.scroll = saved_scroll;
                self.set_status_message("");
            }
        }
        self.refresh(out)
    }

    /// Handle a quit request. Returns true when the editor should
    /// exit; a dirty buffer takes repeated requests to confirm.
    pub fn request_quit(&mut self) -> bool {
        if !self.buf.is_dirty() {
            return true;
        }
        if self.quit_times == 0 {
            return true;
        }
        self.set_status_message(format!(
            "WARNING!!! File has unsaved changes. Press Ctrl-Q {} more times to quit.",
            self.quit_times
        ));
        self.quit_times -= 1;
        false
    }

    /// Any key other than Ctrl-Q re-arms the quit confirmation.
    pub fn reset_quit_counter(&mut self) {
        self.quit_times = QUIT_CONFIRM_TIMES;
    }

    fn row_len(&self, y: usize) -> usize {
        self.buf.row(y).map_or(0, |row| row.len())
    }
}
