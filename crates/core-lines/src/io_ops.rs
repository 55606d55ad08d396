//! File IO helpers used by `LineEditor`.
//!
//! Synchronous and minimal: raw byte read + split, an `access(2)` writability
//! check and a full-overwrite write. Content is never decoded, so files in any
//! encoding round-trip byte for byte. Output always uses `\n`.

use crate::EditError;
use bstr::{BString, ByteSlice};
use std::fs;
use std::path::Path;

/// Result of splitting file content into buffer lines.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SplitContent {
    pub lines: Vec<BString>,
    /// Both CRLF and bare LF terminated lines were seen.
    pub mixed_line_endings: bool,
}

/// Split raw file content on `\n` and strip trailing whitespace (including a
/// CR left over from CRLF) from every line.
///
/// A terminator at the very end does not open an extra line; blank lines in the
/// middle survive as `""`. A lone CR is not a terminator.
pub fn split_content(content: &[u8]) -> SplitContent {
    let (mut crlf, mut lf) = (0usize, 0usize);
    let mut lines = Vec::new();
    let mut rest = content;
    while let Some(idx) = rest.find_byte(b'\n') {
        let line = &rest[..idx];
        if line.ends_with(b"\r") {
            crlf += 1;
        } else {
            lf += 1;
        }
        lines.push(BString::from(line.trim_end()));
        rest = &rest[idx + 1..];
    }
    if !rest.is_empty() {
        lines.push(BString::from(rest.trim_end()));
    }
    SplitContent {
        lines,
        mixed_line_endings: crlf > 0 && lf > 0,
    }
}

/// Read `path` into buffer lines.
pub fn read_lines(path: &Path) -> Result<SplitContent, EditError> {
    let content = fs::read(path).map_err(|source| {
        tracing::error!(target: "io", file = %path.display(), ?source, "file_open_error");
        EditError::Read {
            path: path.to_path_buf(),
            source,
        }
    })?;
    let split = split_content(&content);
    tracing::debug!(
        target: "io",
        file = %path.display(),
        size_bytes = content.len(),
        line_count = split.lines.len(),
        "file_read_ok"
    );
    if split.mixed_line_endings {
        tracing::warn!(target: "io", file = %path.display(), "mixed_line_endings_detected");
    }
    Ok(split)
}

#[cfg(unix)]
fn may_write(path: &Path) -> bool {
    rustix::fs::access(path, rustix::fs::Access::WRITE_OK).is_ok()
}

#[cfg(not(unix))]
fn may_write(path: &Path) -> bool {
    fs::metadata(path)
        .map(|meta| !meta.permissions().readonly())
        .unwrap_or(false)
}

/// Writability check, asked on behalf of the calling process.
///
/// An existing path must be a regular file this process may write. A missing
/// path needs an existing parent directory (`.` for bare names) this process
/// may create entries in.
pub fn ensure_writable(path: &Path) -> Result<(), EditError> {
    let writable = match fs::metadata(path) {
        Ok(meta) => meta.is_file() && may_write(path),
        Err(_) => {
            let parent = match path.parent() {
                Some(p) if !p.as_os_str().is_empty() => p,
                _ => Path::new("."),
            };
            parent.is_dir() && may_write(parent)
        }
    };
    if writable {
        Ok(())
    } else {
        tracing::warn!(target: "io", file = %path.display(), "output_path_unwritable");
        Err(EditError::Unwritable {
            path: path.to_path_buf(),
        })
    }
}

/// Join lines with `\n` and terminate with exactly one `\n`.
pub fn serialize(lines: &[BString]) -> BString {
    let mut content = BString::from(Vec::with_capacity(
        lines.iter().map(|l| l.len() + 1).sum(),
    ));
    for (i, line) in lines.iter().enumerate() {
        if i > 0 {
            content.push(b'\n');
        }
        content.extend_from_slice(line);
    }
    content.push(b'\n');
    content
}

/// Overwrite `path` with the serialized lines.
pub fn write_lines(path: &Path, lines: &[BString]) -> Result<(), EditError> {
    let content = serialize(lines);
    match fs::write(path, &content) {
        Ok(()) => {
            tracing::debug!(
                target: "io",
                file = %path.display(),
                size_bytes = content.len(),
                line_count = lines.len(),
                "file_write_ok"
            );
            Ok(())
        }
        Err(source) => {
            tracing::error!(target: "io", file = %path.display(), ?source, "file_write_error");
            Err(EditError::Write {
                path: path.to_path_buf(),
                source,
            })
        }
    }
}
