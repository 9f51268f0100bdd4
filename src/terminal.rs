//! Terminal setup and raw keyboard input.

use std::io::{self, Read};
use std::os::fd::AsFd;

use anyhow::{Context, Result};
use crossterm::terminal::{disable_raw_mode, enable_raw_mode, size};
use nix::poll::{poll, PollFd, PollFlags, PollTimeout};
use tedit_config::KEY_READ_TIMEOUT_MS;
use tedit_keyboard::ByteSource;

/// Raw-mode guard. The terminal is restored on drop, so an early
/// return or panic never leaves the shell in raw mode.
pub struct RawMode;

impl RawMode {
    pub fn enable() -> Result<Self> {
        enable_raw_mode().context("failed to enable raw mode")?;
        Ok(Self)
    }
}

impl Drop for RawMode {
    fn drop(&mut self) {
        let _ = disable_raw_mode();
    }
}

/// Terminal dimensions as (rows, cols).
pub fn window_size() -> Result<(usize, usize)> {
    let (cols, rows) = size().context("failed to query terminal size")?;
    Ok((rows as usize, cols as usize))
}

/// Stdin as a byte source with a poll-based read timeout, so the main
/// loop wakes up periodically to expire status messages.
pub struct StdinSource {
    stdin: io::Stdin,
}

impl StdinSource {
    pub fn new() -> Self {
        Self { stdin: io::stdin() }
    }
}

impl ByteSource for StdinSource {
    fn read_byte(&mut self) -> Result<Option<u8>> {
        let mut fds = [PollFd::new(self.stdin.as_fd(), PollFlags::POLLIN)];
        let ready =
            poll(&mut fds, PollTimeout::from(KEY_READ_TIMEOUT_MS)).context("stdin poll failed")?;
        if ready == 0 {
            return Ok(None);
        }

        let mut byte = [0u8; 1];
        let n = self
            .stdin
            .read(&mut byte)
            .context("failed to read from stdin")?;
        Ok((n == 1).then_some(byte[0]))
    }
}
