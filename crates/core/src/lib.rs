//! Core types shared by the tedit crates.
//!
//! Pure data types with no dependencies on specific implementations,
//! so the buffer, search and rendering crates can exchange positions
//! without depending on each other.

use std::time::Instant;

use tedit_config::MESSAGE_TIMEOUT_SECS;

/// Cursor position in the document.
///
/// `x` is the logical column in raw characters (0-based, may equal the
/// row length), `y` is the row index (may equal the row count to stand
/// one past the last row).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Position {
    pub x: usize,
    pub y: usize,
}

impl Position {
    /// Create position at (x, y)
    pub fn at(x: usize, y: usize) -> Self {
        Self { x, y }
    }
}

/// Scroll offsets of the viewport.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Scroll {
    /// First visible row (0-based)
    pub row_off: usize,
    /// First visible render column (0-based)
    pub col_off: usize,
}

/// A transient status-bar message with its creation time.
#[derive(Debug, Clone)]
pub struct StatusMessage {
    pub text: String,
    time: Instant,
}

impl StatusMessage {
    /// Create a message stamped with the current time
    pub fn new(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            time: Instant::now(),
        }
    }

    /// Whether the message is still within its display window
    pub fn is_visible(&self) -> bool {
        self.time.elapsed().as_secs() < MESSAGE_TIMEOUT_SECS
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_position_at() {
        let pos = Position::at(3, 7);
        assert_eq!(pos.x, 3);
        assert_eq!(pos.y, 7);
    }

    #[test]
    fn test_fresh_message_visible() {
        let msg = StatusMessage::new("hello");
        assert!(msg.is_visible());
        assert_eq!(msg.text, "hello");
    }
}
