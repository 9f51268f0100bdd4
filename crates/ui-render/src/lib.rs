//! Terminal frame rendering.
//!
//! Each refresh builds the complete escape-sequence stream for one
//! frame into a byte buffer and the caller writes it to the terminal
//! in a single flush. The stream hides the cursor, repaints every
//! text row plus the status and message bars, then repositions and
//! reshows the cursor.

use anyhow::Result;
use crossterm::{
    cursor::{Hide, MoveTo, Show},
    queue,
    style::{Attribute, Color, Print, SetAttribute, SetForegroundColor},
    terminal::{Clear, ClearType},
};
use tedit_buffer::RowBuffer;
use tedit_config::VERSION;
use tedit_core::{Position, Scroll, StatusMessage};
use tedit_highlight::Highlight;
use unicode_width::{UnicodeWidthChar, UnicodeWidthStr};

/// Everything one frame needs, borrowed from the editor.
pub struct Frame<'a> {
    pub buf: &'a RowBuffer,
    pub cursor: Position,
    /// Render column of the cursor, already tab-expanded
    pub rx: usize,
    pub scroll: Scroll,
    pub screen_rows: usize,
    pub screen_cols: usize,
    pub status: Option<&'a StatusMessage>,
}

/// Adjust the scroll offsets so the cursor is inside the viewport.
///
/// Vertical scrolling follows the logical row, horizontal scrolling
/// the render column. An offset past the end of the buffer (as search
/// sets it) collapses to the cursor row, putting it at the top.
pub fn update_scroll(cursor: Position, rx: usize, scroll: &mut Scroll, rows: usize, cols: usize) {
    if cursor.y < scroll.row_off {
        scroll.row_off = cursor.y;
    }
    if cursor.y >= scroll.row_off + rows {
        scroll.row_off = cursor.y - rows + 1;
    }
    if rx < scroll.col_off {
        scroll.col_off = rx;
    }
    if rx >= scroll.col_off + cols {
        scroll.col_off = rx - cols + 1;
    }
}

/// Truncate in place to at most `max` display columns. Cuts on char
/// boundaries, never inside a multibyte sequence.
fn truncate_to_width(text: &mut String, max: usize) {
    let mut width = 0;
    let mut end = text.len();
    for (idx, c) in text.char_indices() {
        let w = c.width().unwrap_or(0);
        if width + w > max {
            end = idx;
            break;
        }
        width += w;
    }
    text.truncate(end);
}

fn color_for(hl: Highlight) -> Option<Color> {
    match hl {
        Highlight::Normal => None,
        Highlight::Comment | Highlight::MultilineComment => Some(Color::DarkCyan),
        Highlight::Keyword1 => Some(Color::DarkYellow),
        Highlight::Keyword2 => Some(Color::DarkGreen),
        Highlight::String => Some(Color::DarkMagenta),
        Highlight::Number => Some(Color::DarkRed),
        Highlight::SearchMatch => Some(Color::DarkBlue),
    }
}

/// Paint one frame into `out`.
pub fn render(frame: &Frame, out: &mut Vec<u8>) -> Result<()> {
    queue!(out, Hide, MoveTo(0, 0))?;
    draw_rows(frame, out)?;
    draw_status_bar(frame, out)?;
    draw_message_bar(frame, out)?;

    let cur_x = (frame.rx - frame.scroll.col_off) as u16;
    let cur_y = (frame.cursor.y - frame.scroll.row_off) as u16;
    queue!(out, MoveTo(cur_x, cur_y), Show)?;
    Ok(())
}

fn draw_rows(frame: &Frame, out: &mut Vec<u8>) -> Result<()> {
    for y in 0..frame.screen_rows {
        let file_row = y + frame.scroll.row_off;
        if file_row >= frame.buf.len() {
            if frame.buf.is_empty() && y == frame.screen_rows / 3 {
                draw_banner(frame, out)?;
            } else {
                queue!(out, Print("~"))?;
            }
        } else if let Some(row) = frame.buf.row(file_row) {
            draw_text_row(frame, row.render(), row.highlight(), out)?;
        }
        queue!(out, Clear(ClearType::UntilNewLine), Print("\r\n"))?;
    }
    Ok(())
}

fn draw_banner(frame: &Frame, out: &mut Vec<u8>) -> Result<()> {
    let mut welcome = format!("tedit editor -- version {}", VERSION);
    truncate_to_width(&mut welcome, frame.screen_cols);
    let padding = (frame.screen_cols.saturating_sub(welcome.len())) / 2;
    if padding > 0 {
        queue!(out, Print("~"))?;
        queue!(out, Print(" ".repeat(padding - 1)))?;
    }
    queue!(out, Print(welcome))?;
    Ok(())
}

fn draw_text_row(frame: &Frame, render: &str, hl: &[Highlight], out: &mut Vec<u8>) -> Result<()> {
    let mut current: Option<Color> = None;
    let visible = render
        .chars()
        .zip(hl.iter().copied())
        .skip(frame.scroll.col_off)
        .take(frame.screen_cols);

    for (c, class) in visible {
        if c.is_ascii_control() {
            // Visualize stray control bytes in reverse video without
            // losing the run's current color.
            let sym = if (c as u8) < 26 {
                (b'@' + c as u8) as char
            } else {
                '?'
            };
            queue!(out, SetAttribute(Attribute::Reverse), Print(sym))?;
            queue!(out, SetAttribute(Attribute::Reset))?;
            if let Some(color) = current {
                queue!(out, SetForegroundColor(color))?;
            }
        } else {
            // Only emit a color change when the class run changes.
            let color = color_for(class);
            if color != current {
                match color {
                    Some(color) => queue!(out, SetForegroundColor(color))?,
                    None => queue!(out, SetForegroundColor(Color::Reset))?,
                }
                current = color;
            }
            queue!(out, Print(c))?;
        }
    }
    queue!(out, SetForegroundColor(Color::Reset))?;
    Ok(())
}

fn draw_status_bar(frame: &Frame, out: &mut Vec<u8>) -> Result<()> {
    let name = frame.buf.filename().unwrap_or("[No Name]");
    let modified = if frame.buf.is_dirty() { " (modified)" } else { "" };
    let mut left = format!("{:.20} - {} lines{}", name, frame.buf.len(), modified);
    let right = format!(
        "{} | {}/{}",
        frame.buf.profile().map_or("no ft", |p| p.name),
        frame.cursor.y + 1,
        frame.buf.len()
    );

    truncate_to_width(&mut left, frame.screen_cols);
    let used = left.width() + right.width();
    queue!(out, SetAttribute(Attribute::Reverse), Print(&left))?;
    if used < frame.screen_cols {
        queue!(out, Print(" ".repeat(frame.screen_cols - used)), Print(&right))?;
    } else {
        queue!(out, Print(" ".repeat(frame.screen_cols.saturating_sub(left.width()))))?;
    }
    queue!(out, SetAttribute(Attribute::Reset), Print("\r\n"))?;
    Ok(())
}

fn draw_message_bar(frame: &Frame, out: &mut Vec<u8>) -> Result<()> {
    queue!(out, Clear(ClearType::UntilNewLine))?;
    if let Some(msg) = frame.status {
        if msg.is_visible() {
            let mut text = msg.text.clone();
            truncate_to_width(&mut text, frame.screen_cols);
            queue!(out, Print(text))?;
        }
    }
    Ok(())
}
