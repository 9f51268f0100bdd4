//! Single-line input read through the status bar.
//!
//! [`read_line`] loops on the key source and maintains the input
//! string. After every processed key it hands the current text and
//! the key to the observer, which is how callers redraw the prompt
//! and how incremental search reacts to each keystroke, arrow keys
//! included.

use anyhow::Result;
use tedit_keyboard::{read_key, ByteSource, Key};

/// How the prompt ended.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PromptOutcome {
    /// Enter on a non-empty line
    Submitted(String),
    /// Escape at any point
    Cancelled,
}

/// Read one line of input, calling `on_key` after each processed key.
///
/// Escape cancels and Enter submits; both are reported to the
/// observer before returning so it can clean up session state.
/// Enter on an empty line is ignored. Backspace, Ctrl-H and Delete
/// remove the last character.
pub fn read_line<S, F>(src: &mut S, mut on_key: F) -> Result<PromptOutcome>
where
    S: ByteSource,
    F: FnMut(&str, Key) -> Result<()>,
{
    let mut input = String::new();
    loop {
        let key = match read_key(src)? {
            Some(key) => key,
            None => continue,
        };

        match key {
            Key::Escape => {
                on_key(&input, key)?;
                return Ok(PromptOutcome::Cancelled);
            }
            Key::ENTER if !input.is_empty() => {
                on_key(&input, key)?;
                return Ok(PromptOutcome::Submitted(input));
            }
            Key::BACKSPACE | Key::Byte(0x08) | Key::Delete => {
                input.pop();
            }
            Key::Byte(b) if !b.is_ascii_control() && b < 128 => {
                input.push(b as char);
            }
            _ => {}
        }
        on_key(&input, key)?;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::VecDeque;

    /// Scripted byte source; `None` entries simulate read timeouts.
    struct Script(VecDeque<Option<u8>>);

    impl Script {
        fn new(items: &[Option<u8>]) -> Self {
            Self(items.iter().copied().collect())
        }

        fn bytes(bytes: &[u8]) -> Self {
            Self(bytes.iter().map(|&b| Some(b)).collect())
        }
    }

    impl ByteSource for Script {
        fn read_byte(&mut self) -> Result<Option<u8>> {
            Ok(self.0.pop_front().flatten())
        }
    }

    #[test]
    fn test_submit_line() {
        let mut src = Script::bytes(b"hi\r");
        let out = read_line(&mut src, |_, _| Ok(())).unwrap();
        assert_eq!(out, PromptOutcome::Submitted("hi".into()));
    }

    #[test]
    fn test_escape_cancels() {
        let mut src = Script::new(&[Some(b'a'), Some(0x1b), None]);
        let out = read_line(&mut src, |_, _| Ok(())).unwrap();
        assert_eq!(out, PromptOutcome::Cancelled);
    }

    #[test]
    fn test_backspace_edits_tail() {
        let mut src = Script::bytes(b"ab\x7fc\r");
        let out = read_line(&mut src, |_, _| Ok(())).unwrap();
        assert_eq!(out, PromptOutcome::Submitted("ac".into()));
    }

    #[test]
    fn test_empty_enter_is_ignored() {
        let mut src = Script::bytes(b"\r\rok\r");
        let out = read_line(&mut src, |_, _| Ok(())).unwrap();
        assert_eq!(out, PromptOutcome::Submitted("ok".into()));
    }

    #[test]
    fn test_observer_sees_every_key_including_arrows() {
        // "a", Right arrow (esc [ C), Enter.
        let mut src = Script::bytes(b"a\x1b[C\r");
        let mut seen = Vec::new();
        let out = read_line(&mut src, |text, key| {
            seen.push((text.to_string(), key));
            Ok(())
        })
        .unwrap();
        assert_eq!(out, PromptOutcome::Submitted("a".into()));
        assert_eq!(
            seen,
            vec![
                ("a".into(), Key::Byte(b'a')),
                ("a".into(), Key::Right),
                ("a".into(), Key::ENTER),
            ]
        );
    }

    #[test]
    fn test_observer_called_on_cancel() {
        let mut src = Script::new(&[Some(0x1b), None]);
        let mut keys = Vec::new();
        read_line(&mut src, |_, key| {
            keys.push(key);
            Ok(())
        })
        .unwrap();
        assert_eq!(keys, vec![Key::Escape]);
    }

    #[test]
    fn test_timeouts_are_skipped() {
        let mut src = Script::new(&[None, None, Some(b'x'), None, Some(b'\r')]);
        let out = read_line(&mut src, |_, _| Ok(())).unwrap();
        assert_eq!(out, PromptOutcome::Submitted("x".into()));
    }

    #[test]
    fn test_control_bytes_not_inserted() {
        let mut src = Script::bytes(b"a\x01b\r");
        let out = read_line(&mut src, |_, _| Ok(())).unwrap();
        assert_eq!(out, PromptOutcome::Submitted("ab".into()));
    }
}
