//! Rendering and writing documents.
//!
//! Documents are rendered as two-space indented JSON with non-ASCII text
//! kept literal and a trailing newline. Writing goes through a temporary
//! file in the target directory that is renamed into place, so the target
//! is either fully replaced or left untouched.

use serde::Serialize;
use std::io::Write;
use std::path::Path;
use tempfile::NamedTempFile;

use crate::error::{OutputError, OutputResult};

/// Render a document to its on-disk text.
pub fn render<T: Serialize>(document: &T) -> OutputResult<String> {
    let mut text = serde_json::to_string_pretty(document)?;
    text.push('\n');
    Ok(text)
}

/// Render and atomically write a document. Returns the number of bytes written.
pub fn write_document<T: Serialize>(document: &T, path: &Path) -> OutputResult<usize> {
    let text = render(document)?;
    write_atomic(path, &text)?;
    Ok(text.len())
}

/// Replace `path` with `content` via a temporary sibling file.
pub fn write_atomic(path: &Path, content: &str) -> OutputResult<()> {
    let write_err = |source: std::io::Error| OutputError::Write {
        path: path.to_path_buf(),
        source,
    };

    let dir = match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent,
        _ => Path::new("."),
    };

    let mut tmp = NamedTempFile::new_in(dir).map_err(write_err)?;
    tmp.write_all(content.as_bytes()).map_err(write_err)?;
    tmp.flush().map_err(write_err)?;
    tmp.persist(path).map_err(|e| write_err(e.error))?;
    Ok(())
}
