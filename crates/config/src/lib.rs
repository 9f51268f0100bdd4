//! Shared constants for tedit.
//!
//! There is no persistent configuration file; every tunable lives here
//! as a compile-time constant shared by the workspace crates.

/// Tab stop width: tabs in the raw text expand to the next multiple of
/// this many render columns.
pub const TAB_STOP: usize = 4;

/// Seconds a status message stays visible after being set.
pub const MESSAGE_TIMEOUT_SECS: u64 = 5;

/// How many additional Ctrl-Q presses are required to quit while the
/// buffer has unsaved changes.
pub const QUIT_CONFIRM_TIMES: u8 = 3;

/// Keyboard read timeout in milliseconds. A timed-out read lets the
/// main loop re-check time-based state (message expiry) without input.
pub const KEY_READ_TIMEOUT_MS: u16 = 100;

/// Rows at the bottom of the screen reserved for the status bar and
/// the message bar.
pub const CHROME_ROWS: usize = 2;

/// Version string shown in the empty-buffer banner.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
