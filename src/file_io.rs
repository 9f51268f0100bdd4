//! File reading and writing for the editor.

use std::fs;
use std::path::Path;

use anyhow::{Context, Result};

/// Read a file into newline-stripped rows.
pub fn read_lines(path: &Path) -> Result<Vec<String>> {
    let content = fs::read_to_string(path)
        .with_context(|| format!("failed to read {}", path.display()))?;
    Ok(content.lines().map(str::to_string).collect())
}

/// Write the full contents to `path`, returning the byte count for
/// the status message.
pub fn write_file(path: &Path, contents: &str) -> Result<usize> {
    fs::write(path, contents)
        .with_context(|| format!("failed to write {}", path.display()))?;
    Ok(contents.len())
}
