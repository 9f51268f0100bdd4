//! Row buffer for tedit.
//!
//! An index-addressed array of rows, each owning its raw text plus the
//! derived render text (tabs expanded) and per-column highlight
//! classes. Render and highlight are recomputed together on every
//! mutation, and block-comment state is propagated to following rows
//! until it settles.

pub mod tabs;

use tedit_highlight::{highlight_line, select_profile, Highlight, SyntaxProfile};

/// One line of text.
///
/// `raw` is authoritative; `render` and `hl` are derived and always
/// consistent with it (`hl` has one class per render character).
#[derive(Debug, Clone)]
pub struct Row {
    raw: String,
    render: String,
    hl: Vec<Highlight>,
    open_comment: bool,
}

impl Row {
    fn new(raw: impl Into<String>) -> Self {
        let raw = raw.into();
        let render = tabs::expand_tabs(&raw);
        Self {
            raw,
            render,
            hl: Vec::new(),
            open_comment: false,
        }
    }

    /// Recompute render text after a raw mutation.
    fn update_render(&mut self) {
        self.render = tabs::expand_tabs(&self.raw);
    }

    pub fn raw(&self) -> &str {
        &self.raw
    }

    pub fn render(&self) -> &str {
        &self.render
    }

    /// Highlight classes, parallel to `render`'s characters.
    pub fn highlight(&self) -> &[Highlight] {
        &self.hl
    }

    /// Whether this row ends inside an unterminated block comment.
    pub fn open_comment(&self) -> bool {
        self.open_comment
    }

    /// Logical length in raw characters.
    pub fn len(&self) -> usize {
        self.raw.chars().count()
    }

    pub fn is_empty(&self) -> bool {
        self.raw.is_empty()
    }

    /// Render column for a logical column.
    pub fn cx_to_rx(&self, cx: usize) -> usize {
        tabs::cx_to_rx(&self.raw, cx)
    }

    /// Logical column for a render column.
    pub fn rx_to_cx(&self, rx: usize) -> usize {
        tabs::rx_to_cx(&self.raw, rx)
    }

    /// Byte offset of logical column `at`, clamped to the row end.
    fn byte_index(&self, at: usize) -> usize {
        self.raw
            .char_indices()
            .nth(at)
            .map_or(self.raw.len(), |(idx, _)| idx)
    }
}

/// Ordered collection of rows with edit operations.
///
/// The row index is the position in the backing vector, so
/// `rows[i]` is row `i` by construction and structural edits never
/// renumber anything.
#[derive(Debug, Default)]
pub struct RowBuffer {
    rows: Vec<Row>,
    /// Content mutations since the last save
    dirty: u64,
    filename: Option<String>,
    profile: Option<&'static SyntaxProfile>,
}

impl RowBuffer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a buffer from already-read, newline-stripped lines.
    pub fn from_lines<I>(lines: I) -> Self
    where
        I: IntoIterator,
        I::Item: Into<String>,
    {
        let mut buffer = Self {
            rows: lines.into_iter().map(Row::new).collect(),
            ..Self::default()
        };
        buffer.rehighlight_all();
        buffer
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    pub fn row(&self, y: usize) -> Option<&Row> {
        self.rows.get(y)
    }

    pub fn filename(&self) -> Option<&str> {
        self.filename.as_deref()
    }

    /// Set the filename and re-select the syntax profile from it.
    pub fn set_filename(&mut self, filename: impl Into<String>) {
        let filename = filename.into();
        self.profile = select_profile(&filename);
        self.filename = Some(filename);
        self.rehighlight_all();
    }

    pub fn profile(&self) -> Option<&'static SyntaxProfile> {
        self.profile
    }

    /// Number of content mutations since the last save.
    pub fn dirty(&self) -> u64 {
        self.dirty
    }

    pub fn is_dirty(&self) -> bool {
        self.dirty > 0
    }

    /// Reset the dirty counter after a confirmed successful save.
    pub fn mark_saved(&mut self) {
        self.dirty = 0;
    }

    /// Insert a row at `at`. No-op when `at` is outside `[0, len]`.
    pub fn insert_row(&mut self, at: usize, text: impl Into<String>) {
        if at > self.rows.len() {
            return;
        }
        self.rows.insert(at, Row::new(text));
        self.rehighlight_from(at);
        self.dirty += 1;
    }

    /// Delete the row at `at`. No-op when out of range.
    pub fn delete_row(&mut self, at: usize) {
        if at >= self.rows.len() {
            return;
        }
        self.rows.remove(at);
        // The next row inherits a new predecessor; its comment seed may
        // have changed.
        if at < self.rows.len() {
            self.rehighlight_from(at);
        }
        self.dirty += 1;
    }

    /// Insert `c` in row `y` at logical column `at` (clamped to the
    /// row end). No-op when `y` is out of range.
    pub fn insert_char(&mut self, y: usize, at: usize, c: char) {
        let Some(row) = self.rows.get_mut(y) else {
            return;
        };
        let idx = row.byte_index(at.min(row.len()));
        row.raw.insert(idx, c);
        row.update_render();
        self.rehighlight_from(y);
        self.dirty += 1;
    }

    /// Delete the character at logical column `at` of row `y`. No-op
    /// when the position is out of range.
    pub fn delete_char(&mut self, y: usize, at: usize) {
        let Some(row) = self.rows.get_mut(y) else {
            return;
        };
        if at >= row.len() {
            return;
        }
        let idx = row.byte_index(at);
        row.raw.remove(idx);
        row.update_render();
        self.rehighlight_from(y);
        self.dirty += 1;
    }

    /// Append `text` to row `y`'s raw content; used when backspacing at
    /// column 0 merges a row into its predecessor.
    pub fn append_raw(&mut self, y: usize, text: &str) {
        let Some(row) = self.rows.get_mut(y) else {
            return;
        };
        row.raw.push_str(text);
        row.update_render();
        self.rehighlight_from(y);
        self.dirty += 1;
    }

    /// Split row `y` at logical column `at`: the tail moves to a new
    /// row inserted right below.
    pub fn split_row(&mut self, y: usize, at: usize) {
        let Some(row) = self.rows.get_mut(y) else {
            return;
        };
        let idx = row.byte_index(at.min(row.len()));
        let tail = row.raw.split_off(idx);
        row.update_render();
        self.rows.insert(y + 1, Row::new(tail));
        self.rehighlight_from(y);
        self.dirty += 1;
    }

    /// Join all rows into one byte sequence for persistence; each row
    /// is followed by a newline.
    pub fn flatten(&self) -> String {
        let mut out = String::new();
        for row in &self.rows {
            out.push_str(&row.raw);
            out.push('\n');
        }
        out
    }

    /// Replace row `y`'s highlight classes; used by the search overlay.
    /// The replacement must stay parallel to the render text.
    pub fn set_row_highlight(&mut self, y: usize, hl: Vec<Highlight>) {
        if let Some(row) = self.rows.get_mut(y) {
            debug_assert_eq!(hl.len(), row.render.chars().count());
            row.hl = hl;
        }
    }

    /// Re-run the syntax engine on row `y`, then on following rows for
    /// as long as their residual block-comment flag keeps changing.
    /// Iterative on purpose: a file that is one giant unclosed comment
    /// walks the whole buffer without growing the stack.
    fn rehighlight_from(&mut self, mut y: usize) {
        while y < self.rows.len() {
            let seed = y > 0 && self.rows[y - 1].open_comment;
            let (hl, open) = highlight_line(&self.rows[y].render, self.profile, seed);
            let row = &mut self.rows[y];
            let changed = row.open_comment != open;
            row.hl = hl;
            row.open_comment = open;
            if !changed {
                break;
            }
            y += 1;
        }
    }

    /// Recompute highlighting for every row, e.g. after the profile
    /// changed. Unlike [`rehighlight_from`] this never stops early.
    fn rehighlight_all(&mut self) {
        for y in 0..self.rows.len() {
            let seed = y > 0 && self.rows[y - 1].open_comment;
            let (hl, open) = highlight_line(&self.rows[y].render, self.profile, seed);
            let row = &mut self.rows[y];
            row.hl = hl;
            row.open_comment = open;
        }
    }
}
