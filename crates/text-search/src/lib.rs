//! Incremental text search for tedit.
//!
//! One [`step`] call per prompt keystroke: it interprets the key for
//! session state (direction, commit, cancel), scans the buffer
//! circularly for a literal substring match in the render text, moves
//! the cursor there and overlays the matched span with the
//! search-match class. The previous overlay is always restored from
//! the classes saved before it was applied, never recomputed, so the
//! baseline cannot drift. At most one row carries an overlay.

use tedit_buffer::RowBuffer;
use tedit_core::{Position, Scroll};
use tedit_highlight::Highlight;
use tedit_keyboard::Key;

/// State of one search session (one prompt invocation).
#[derive(Debug)]
pub struct SearchState {
    /// Row of the most recent match
    last_match: Option<usize>,
    /// Scan direction; resets to forward on most keys
    forward: bool,
    /// Overlaid row and its pre-overlay classes
    saved_hl: Option<(usize, Vec<Highlight>)>,
}

impl SearchState {
    pub fn new() -> Self {
        Self {
            last_match: None,
            forward: true,
            saved_hl: None,
        }
    }

    /// Row of the most recent match, if any.
    pub fn last_match(&self) -> Option<usize> {
        self.last_match
    }
}

/// Advance the search by one prompt keystroke.
pub fn step(
    state: &mut SearchState,
    buf: &mut RowBuffer,
    query: &str,
    key: Key,
    cursor: &mut Position,
    scroll: &mut Scroll,
) {
    // Undo the previous overlay first, from the saved baseline.
    if let Some((y, hl)) = state.saved_hl.take() {
        buf.set_row_highlight(y, hl);
    }

    if key == Key::ENTER || key == Key::Escape {
        // Session over; leave cursor and scroll where they are.
        state.last_match = None;
        state.forward = true;
        return;
    } else if key == Key::Right || key == Key::Down {
        state.forward = true;
    } else if key == Key::Left || key == Key::Up {
        state.forward = false;
    } else {
        // The query changed: restart from the cursor, forward.
        state.last_match = None;
        state.forward = true;
    }

    if query.is_empty() || buf.is_empty() {
        return;
    }
    if state.last_match.is_none() {
        state.forward = true;
    }

    let nrows = buf.len() as isize;
    let dir: isize = if state.forward { 1 } else { -1 };
    let mut current = state.last_match.map_or(-1, |y| y as isize);

    for _ in 0..buf.len() {
        current += dir;
        if current == -1 {
            current = nrows - 1;
        } else if current == nrows {
            current = 0;
        }
        let y = current as usize;

        let found = buf.row(y).and_then(|row| {
            row.render().find(query).map(|byte_idx| {
                let match_rx = row.render()[..byte_idx].chars().count();
                (match_rx, row.rx_to_cx(match_rx), row.highlight().to_vec())
            })
        });

        if let Some((match_rx, cx, saved)) = found {
            state.last_match = Some(y);
            cursor.y = y;
            cursor.x = cx;
            // Past-the-end offset: the next scroll pass snaps the
            // match row to the top of the viewport.
            scroll.row_off = buf.len();

            let mut overlay = saved.clone();
            let span = query.chars().count();
            overlay[match_rx..match_rx + span].fill(Highlight::SearchMatch);
            buf.set_row_highlight(y, overlay);
            state.saved_hl = Some((y, saved));
            break;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn setup(lines: &[&str]) -> (SearchState, RowBuffer, Position, Scroll) {
        (
            SearchState::new(),
            RowBuffer::from_lines(lines.iter().copied()),
            Position::default(),
            Scroll::default(),
        )
    }

    #[test]
    fn test_first_match_from_top() {
        let (mut st, mut buf, mut cur, mut scr) = setup(&["alpha", "beta foo", "gamma"]);
        step(&mut st, &mut buf, "foo", Key::Byte(b'o'), &mut cur, &mut scr);
        assert_eq!(st.last_match(), Some(1));
        assert_eq!(cur, Position::at(5, 1));
    }

    #[test]
    fn test_forward_search_wraps() {
        let (mut st, mut buf, mut cur, mut scr) = setup(&["foo", "bar", "foo"]);
        // Type the query: lands on row 0.
        step(&mut st, &mut buf, "foo", Key::Byte(b'o'), &mut cur, &mut scr);
        assert_eq!(st.last_match(), Some(0));
        // Next forward: row 2.
        step(&mut st, &mut buf, "foo", Key::Right, &mut cur, &mut scr);
        assert_eq!(st.last_match(), Some(2));
        // Anchored at row 2, forward wraps to row 0, not row 2 again.
        step(&mut st, &mut buf, "foo", Key::Right, &mut cur, &mut scr);
        assert_eq!(st.last_match(), Some(0));
    }

    #[test]
    fn test_backward_search_wraps() {
        let (mut st, mut buf, mut cur, mut scr) = setup(&["foo", "bar", "foo"]);
        step(&mut st, &mut buf, "foo", Key::Byte(b'o'), &mut cur, &mut scr);
        assert_eq!(st.last_match(), Some(0));
        step(&mut st, &mut buf, "foo", Key::Left, &mut cur, &mut scr);
        assert_eq!(st.last_match(), Some(2));
    }

    #[test]
    fn test_match_column_uses_rx_to_cx() {
        // Tab expands to 4 columns, so the render match at rx 4 is
        // logical column 1.
        let (mut st, mut buf, mut cur, mut scr) = setup(&["\tfoo"]);
        step(&mut st, &mut buf, "foo", Key::Byte(b'o'), &mut cur, &mut scr);
        assert_eq!(cur, Position::at(1, 0));
    }

    #[test]
    fn test_overlay_applied_and_restored() {
        let (mut st, mut buf, mut cur, mut scr) = setup(&["say foo twice: foo"]);
        let baseline = buf.row(0).unwrap().highlight().to_vec();

        step(&mut st, &mut buf, "foo", Key::Byte(b'o'), &mut cur, &mut scr);
        let hl = buf.row(0).unwrap().highlight();
        assert_eq!(&hl[4..7], &[Highlight::SearchMatch; 3]);
        assert_eq!(hl[0], Highlight::Normal);

        // Ending the session restores the saved classes exactly.
        step(&mut st, &mut buf, "foo", Key::Escape, &mut cur, &mut scr);
        assert_eq!(buf.row(0).unwrap().highlight(), &baseline[..]);
    }

    #[test]
    fn test_only_one_row_overlaid() {
        let (mut st, mut buf, mut cur, mut scr) = setup(&["foo", "foo"]);
        step(&mut st, &mut buf, "foo", Key::Byte(b'o'), &mut cur, &mut scr);
        step(&mut st, &mut buf, "foo", Key::Right, &mut cur, &mut scr);

        let first = buf.row(0).unwrap().highlight();
        let second = buf.row(1).unwrap().highlight();
        assert!(first.iter().all(|&h| h != Highlight::SearchMatch));
        assert!(second.iter().all(|&h| h == Highlight::SearchMatch));
    }

    #[test]
    fn test_scroll_forced_past_end() {
        let (mut st, mut buf, mut cur, mut scr) = setup(&["a", "b", "foo"]);
        step(&mut st, &mut buf, "foo", Key::Byte(b'o'), &mut cur, &mut scr);
        assert_eq!(scr.row_off, 3);
    }

    #[test]
    fn test_empty_query_only_restores() {
        let (mut st, mut buf, mut cur, mut scr) = setup(&["foo"]);
        step(&mut st, &mut buf, "foo", Key::Byte(b'o'), &mut cur, &mut scr);
        // Backspaced to empty: overlay must come off, cursor stays.
        step(&mut st, &mut buf, "", Key::BACKSPACE, &mut cur, &mut scr);
        assert!(buf
            .row(0)
            .unwrap()
            .highlight()
            .iter()
            .all(|&h| h != Highlight::SearchMatch));
    }

    #[test]
    fn test_no_match_leaves_cursor() {
        let (mut st, mut buf, mut cur, mut scr) = setup(&["alpha"]);
        step(&mut st, &mut buf, "zzz", Key::Byte(b'z'), &mut cur, &mut scr);
        assert_eq!(st.last_match(), None);
        assert_eq!(cur, Position::default());
    }
}
