//! Keyboard input decoding for tedit.
//!
//! Turns a raw byte stream (the terminal in raw mode) into logical key
//! events. The decoder is a pure byte-pattern state machine: it knows
//! the VT escape tables and nothing about editing. Malformed or
//! truncated escape sequences decode as a bare [`Key::Escape`], never
//! as an error.

use anyhow::Result;

/// The escape byte that introduces a terminal control sequence.
const ESC: u8 = 0x1b;

/// A logical key event.
///
/// Any lone byte other than the escape byte is itself the key, so
/// Enter arrives as `Key::Byte(b'\r')`, Backspace as `Key::Byte(127)`
/// and Ctrl combinations as their control bytes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Key {
    Byte(u8),
    Up,
    Down,
    Left,
    Right,
    Home,
    End,
    PageUp,
    PageDown,
    Delete,
    Escape,
}

impl Key {
    pub const ENTER: Key = Key::Byte(b'\r');
    pub const BACKSPACE: Key = Key::Byte(127);

    /// The key produced by Ctrl plus a letter.
    pub const fn ctrl(c: u8) -> Key {
        Key::Byte(c & 0x1f)
    }
}

/// A blocking byte source with a read timeout.
///
/// `Ok(None)` means the timeout expired with no byte available, which
/// lets the caller re-check time-based state between keystrokes.
pub trait ByteSource {
    fn read_byte(&mut self) -> Result<Option<u8>>;
}

/// Decode one logical key event from the source.
///
/// Returns `Ok(None)` when the read timed out before any byte arrived.
/// Once an escape byte has been seen, a timeout mid-sequence resolves
/// to a bare escape.
pub fn read_key<S: ByteSource>(src: &mut S) -> Result<Option<Key>> {
    let Some(byte) = src.read_byte()? else {
        return Ok(None);
    };
    if byte != ESC {
        return Ok(Some(Key::Byte(byte)));
    }

    let Some(first) = src.read_byte()? else {
        return Ok(Some(Key::Escape));
    };
    let Some(second) = src.read_byte()? else {
        return Ok(Some(Key::Escape));
    };

    let key = match (first, second) {
        (b'[', digit @ b'0'..=b'9') => {
            // Number-coded keys need a trailing '~'.
            let Some(third) = src.read_byte()? else {
                return Ok(Some(Key::Escape));
            };
            if third != b'~' {
                return Ok(Some(Key::Escape));
            }
            match digit {
                b'1' | b'7' => Key::Home,
                b'3' => Key::Delete,
                b'4' | b'8' => Key::End,
                b'5' => Key::PageUp,
                b'6' => Key::PageDown,
                _ => Key::Escape,
            }
        }
        (b'[', b'A') => Key::Up,
        (b'[', b'B') => Key::Down,
        (b'[', b'C') => Key::Right,
        (b'[', b'D') => Key::Left,
        (b'[', b'H') => Key::Home,
        (b'[', b'F') => Key::End,
        (b'O', b'H') => Key::Home,
        (b'O', b'F') => Key::End,
        _ => Key::Escape,
    };
    Ok(Some(key))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::VecDeque;

    /// Scripted byte source: `Some(b)` delivers a byte, `None` a timeout.
    struct Script(VecDeque<Option<u8>>);

    impl Script {
        fn bytes(bytes: &[u8]) -> Self {
            Self(bytes.iter().map(|&b| Some(b)).collect())
        }

        fn steps(steps: &[Option<u8>]) -> Self {
            Self(steps.iter().copied().collect())
        }
    }

    impl ByteSource for Script {
        fn read_byte(&mut self) -> Result<Option<u8>> {
            Ok(self.0.pop_front().flatten())
        }
    }

    #[test]
    fn test_plain_byte_is_the_key() {
        let mut src = Script::bytes(b"a");
        assert_eq!(read_key(&mut src).unwrap(), Some(Key::Byte(b'a')));
    }

    #[test]
    fn test_control_bytes_pass_through() {
        let mut src = Script::bytes(&[0x11, b'\r', 127]);
        assert_eq!(read_key(&mut src).unwrap(), Some(Key::ctrl(b'q')));
        assert_eq!(read_key(&mut src).unwrap(), Some(Key::ENTER));
        assert_eq!(read_key(&mut src).unwrap(), Some(Key::BACKSPACE));
    }

    #[test]
    fn test_timeout_returns_none() {
        let mut src = Script::steps(&[None, Some(b'x')]);
        assert_eq!(read_key(&mut src).unwrap(), None);
        assert_eq!(read_key(&mut src).unwrap(), Some(Key::Byte(b'x')));
    }

    #[test]
    fn test_arrow_keys() {
        let cases = [
            (&b"\x1b[A"[..], Key::Up),
            (&b"\x1b[B"[..], Key::Down),
            (&b"\x1b[C"[..], Key::Right),
            (&b"\x1b[D"[..], Key::Left),
        ];
        for (bytes, expected) in cases {
            let mut src = Script::bytes(bytes);
            assert_eq!(read_key(&mut src).unwrap(), Some(expected));
        }
    }

    #[test]
    fn test_letter_coded_home_end() {
        for (bytes, expected) in [
            (&b"\x1b[H"[..], Key::Home),
            (&b"\x1b[F"[..], Key::End),
            (&b"\x1bOH"[..], Key::Home),
            (&b"\x1bOF"[..], Key::End),
        ] {
            let mut src = Script::bytes(bytes);
            assert_eq!(read_key(&mut src).unwrap(), Some(expected));
        }
    }

    #[test]
    fn test_number_coded_keys() {
        for (digit, expected) in [
            (b'1', Key::Home),
            (b'3', Key::Delete),
            (b'4', Key::End),
            (b'5', Key::PageUp),
            (b'6', Key::PageDown),
            (b'7', Key::Home),
            (b'8', Key::End),
        ] {
            let mut src = Script::bytes(&[ESC, b'[', digit, b'~']);
            assert_eq!(read_key(&mut src).unwrap(), Some(expected));
        }
    }

    #[test]
    fn test_number_without_tilde_is_escape() {
        let mut src = Script::bytes(b"\x1b[5x");
        assert_eq!(read_key(&mut src).unwrap(), Some(Key::Escape));
    }

    #[test]
    fn test_truncated_sequences_are_escape() {
        for bytes in [&b"\x1b"[..], &b"\x1b["[..], &b"\x1b[5"[..]] {
            let mut src = Script::bytes(bytes);
            assert_eq!(read_key(&mut src).unwrap(), Some(Key::Escape));
        }
    }

    #[test]
    fn test_unknown_sequence_is_escape() {
        let mut src = Script::bytes(b"\x1bOZ");
        assert_eq!(read_key(&mut src).unwrap(), Some(Key::Escape));
        let mut src = Script::bytes(b"\x1bXY");
        assert_eq!(read_key(&mut src).unwrap(), Some(Key::Escape));
    }
}
