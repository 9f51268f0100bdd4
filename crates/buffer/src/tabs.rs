//! Tab-aware mapping between logical and render columns.
//!
//! A logical column (`cx`) counts raw characters; a render column
//! (`rx`) counts on-screen columns after tabs expand to the next
//! multiple of [`TAB_STOP`]. The two mappings are exact inverses at
//! tab boundaries: `rx_to_cx(raw, cx_to_rx(raw, cx)) == cx`.

use tedit_config::TAB_STOP;

/// Derive render text from raw text: each tab becomes at least one
/// space, padded to the next tab stop; everything else is copied.
pub fn expand_tabs(raw: &str) -> String {
    let mut render = String::with_capacity(raw.len());
    let mut width = 0;
    for c in raw.chars() {
        if c == '\t' {
            render.push(' ');
            width += 1;
            while width % TAB_STOP != 0 {
                render.push(' ');
                width += 1;
            }
        } else {
            render.push(c);
            width += 1;
        }
    }
    render
}

/// Render column of logical column `cx`.
pub fn cx_to_rx(raw: &str, cx: usize) -> usize {
    let mut rx = 0;
    for c in raw.chars().take(cx) {
        if c == '\t' {
            rx += (TAB_STOP - 1) - (rx % TAB_STOP);
        }
        rx += 1;
    }
    rx
}

/// Logical column whose accumulated render width first exceeds `rx`;
/// the full raw length when `rx` is past the end of the row.
pub fn rx_to_cx(raw: &str, rx: usize) -> usize {
    let mut cur_rx = 0;
    for (cx, c) in raw.chars().enumerate() {
        if c == '\t' {
            cur_rx += (TAB_STOP - 1) - (cur_rx % TAB_STOP);
        }
        cur_rx += 1;
        if cur_rx > rx {
            return cx;
        }
    }
    raw.chars().count()
}
