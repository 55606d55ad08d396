//! Line buffer editor for ignore-pattern files.
//!
//! A `LineEditor` holds the file as a vector of lines plus an insertion cursor.
//! Inserts land at the cursor and advance it; `before`/`after` relocate the
//! cursor next to an anchor line first. Non-empty, non-comment lines already in
//! the buffer are suppressed on insert so repeated runs stay idempotent.
//!
//! Cursor semantics:
//! - The cursor lives in `[0, len]` after any insert or explicit move.
//! - Deletions never move it. A cursor left past the end by a deletion is
//!   clamped the next time `add` splits the buffer.
//! - `before`/`after` with an anchor that is not present keep the current
//!   cursor and still insert.
//!
//! Matching is purely textual: no glob interpretation happens anywhere. Lines
//! are kept as raw bytes so files in any encoding survive a load/save cycle.

use bstr::{BString, ByteSlice};
use std::path::{Path, PathBuf};

pub mod error;
pub mod input;
pub mod io_ops;

pub use error::EditError;
pub use input::{LineSource, candidates};

/// Default marker exempting a line from duplicate suppression.
pub const DEFAULT_COMMENT_PREFIX: &str = "#";

/// Editing knobs that do not change the file format.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EditOptions {
    /// Lines starting with this prefix are always inserted, even when present.
    pub comment_prefix: String,
}

impl Default for EditOptions {
    fn default() -> Self {
        Self {
            comment_prefix: DEFAULT_COMMENT_PREFIX.to_string(),
        }
    }
}

#[derive(Debug, Clone, Default)]
pub struct LineEditor {
    lines: Vec<BString>,
    cursor: usize,
    output_path: Option<PathBuf>,
    options: EditOptions,
}

impl LineEditor {
    /// Empty buffer, cursor at 0, no output path.
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_options(options: EditOptions) -> Self {
        Self {
            options,
            ..Self::default()
        }
    }

    /// Edit `path` in place: load it when it is a regular file, then make it
    /// the output path. A missing file in a writable directory starts empty.
    pub fn open(path: impl AsRef<Path>) -> Result<Self, EditError> {
        Self::open_with_options(path, EditOptions::default())
    }

    pub fn open_with_options(
        path: impl AsRef<Path>,
        options: EditOptions,
    ) -> Result<Self, EditError> {
        let path = path.as_ref();
        let mut editor = Self::with_options(options);
        if path.is_file() {
            editor.load(path)?;
        }
        editor.set_output_path(path)?;
        Ok(editor)
    }

    /// Replace the buffer with the contents of `path`; cursor moves to the end.
    pub fn load(&mut self, path: impl AsRef<Path>) -> Result<&mut Self, EditError> {
        let split = io_ops::read_lines(path.as_ref())?;
        self.lines = split.lines;
        self.cursor = self.lines.len();
        Ok(self)
    }

    /// Redirect output after a writability check. On failure the previous
    /// output path is kept.
    pub fn set_output_path(&mut self, path: impl AsRef<Path>) -> Result<&mut Self, EditError> {
        let path = path.as_ref();
        io_ops::ensure_writable(path)?;
        self.output_path = Some(path.to_path_buf());
        Ok(self)
    }

    /// Write the buffer out, redirecting to `target` first when given.
    pub fn save(&mut self, target: Option<&Path>) -> Result<&mut Self, EditError> {
        if let Some(target) = target {
            self.set_output_path(target)?;
        }
        let path = self.output_path.as_deref().ok_or(EditError::NoOutputPath)?;
        io_ops::write_lines(path, &self.lines)?;
        Ok(self)
    }

    /// Current lines in file order.
    pub fn lines(&self) -> &[BString] {
        &self.lines
    }

    pub fn to_vec(&self) -> Vec<BString> {
        self.lines.clone()
    }

    /// Serialized file content as `save` would write it.
    pub fn contents(&self) -> BString {
        io_ops::serialize(&self.lines)
    }

    pub fn cursor(&self) -> usize {
        self.cursor
    }

    pub fn output_path(&self) -> Option<&Path> {
        self.output_path.as_deref()
    }

    pub fn options(&self) -> &EditOptions {
        &self.options
    }

    pub fn len(&self) -> usize {
        self.lines.len()
    }

    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }

    /// True if some line equals `value` once both are trimmed.
    pub fn exists(&self, value: &str) -> bool {
        self.position_trimmed(value).is_some()
    }

    fn position_trimmed(&self, value: &str) -> Option<usize> {
        let needle = value.trim().as_bytes();
        self.lines.iter().position(|line| line.trim() == needle)
    }

    fn position_exact(&self, value: &str) -> Option<usize> {
        let needle = value.trim().as_bytes();
        self.lines.iter().position(|line| line.as_slice() == needle)
    }

    fn is_suppressible(&self, line: &str) -> bool {
        !line.is_empty() && !line.starts_with(self.options.comment_prefix.as_str())
    }

    /// Insert `input` at the cursor and advance past the inserted block.
    ///
    /// Candidates already present in the buffer (checked against the buffer as
    /// it was before this call) are dropped unless blank or comments.
    pub fn add(&mut self, input: impl LineSource) -> &mut Self {
        let (survivors, suppressed): (Vec<String>, Vec<String>) = candidates(input)
            .into_iter()
            .partition(|line| !(self.is_suppressible(line) && self.exists(line)));
        let at = self.cursor.min(self.lines.len());
        let inserted = survivors.len();
        let after = self.lines.split_off(at);
        self.lines.extend(survivors.into_iter().map(BString::from));
        self.lines.extend(after);
        self.cursor = at + inserted;
        tracing::trace!(
            target: "edit",
            at,
            inserted,
            suppressed = suppressed.len(),
            cursor = self.cursor,
            "lines_inserted"
        );
        self
    }

    /// Insert `input` immediately before the line equal to `find`.
    pub fn before(&mut self, find: &str, input: impl LineSource) -> &mut Self {
        match self.position_exact(find) {
            Some(idx) => self.cursor = idx,
            None => tracing::debug!(target: "edit", find, cursor = self.cursor, "anchor_not_found"),
        }
        self.add(input)
    }

    /// Insert `input` immediately after the line equal to `find`.
    pub fn after(&mut self, find: &str, input: impl LineSource) -> &mut Self {
        match self.position_exact(find) {
            Some(idx) => self.cursor = idx + 1,
            None => tracing::debug!(target: "edit", find, cursor = self.cursor, "anchor_not_found"),
        }
        self.add(input)
    }

    pub fn rewind(&mut self) -> &mut Self {
        self.move_cursor(0)
    }

    /// Move the cursor to `line`, clamped to the end of the buffer.
    pub fn seek(&mut self, line: usize) -> &mut Self {
        self.move_cursor(line.min(self.lines.len()))
    }

    pub fn eof(&mut self) -> &mut Self {
        self.move_cursor(self.lines.len())
    }

    fn move_cursor(&mut self, to: usize) -> &mut Self {
        tracing::trace!(target: "edit", from = self.cursor, to, "cursor_moved");
        self.cursor = to;
        self
    }

    /// Remove the first line equal to `value` (both trimmed). Cursor untouched.
    pub fn delete(&mut self, value: &str) -> &mut Self {
        if let Some(idx) = self.position_trimmed(value) {
            self.lines.remove(idx);
            tracing::trace!(target: "edit", idx, "line_deleted");
        }
        self
    }

    /// Remove lines in `[offset, offset + count)`; out-of-range parts are ignored.
    /// Cursor untouched.
    pub fn delete_offset(&mut self, offset: usize, count: usize) -> &mut Self {
        let len = self.lines.len();
        let start = offset.min(len);
        let end = offset.saturating_add(count).min(len);
        if start < end {
            self.lines.drain(start..end);
            tracing::trace!(target: "edit", start, end, "lines_deleted");
        }
        self
    }

    /// Remove the single line at `offset`, if any.
    pub fn delete_line(&mut self, offset: usize) -> &mut Self {
        self.delete_offset(offset, 1)
    }
}

impl From<Vec<String>> for LineEditor {
    /// Buffer seeded from memory, cursor at the end, no output path.
    fn from(lines: Vec<String>) -> Self {
        let lines: Vec<BString> = lines.into_iter().map(BString::from).collect();
        let cursor = lines.len();
        Self {
            lines,
            cursor,
            ..Self::default()
        }
    }
}
