//! Flattening of `add` input into candidate lines.
//!
//! Anything implementing [`LineSource`] can be handed to `LineEditor::add`:
//! a single (possibly multi-line) string or any nesting of vectors, slices and
//! arrays of strings. Flattening is depth-first and keeps the caller's order.
//! Every produced line is trimmed on both sides; empty pieces are kept because
//! blank lines are meaningful separators in ignore files.

/// A value that can be expanded into an ordered sequence of candidate lines.
pub trait LineSource {
    /// Append this source's trimmed lines to `out`.
    fn push_lines(self, out: &mut Vec<String>);
}

/// Flatten and trim `input` into the candidate sequence used by `add`.
pub fn candidates(input: impl LineSource) -> Vec<String> {
    let mut out = Vec::new();
    input.push_lines(&mut out);
    out
}

/// Split on CRLF, LF or a lone CR. Separators only: `"a\n"` yields `["a", ""]`.
fn split_breaks(text: &str) -> impl Iterator<Item = &str> {
    text.split('\n')
        .flat_map(|piece| piece.strip_suffix('\r').unwrap_or(piece).split('\r'))
}

impl LineSource for &str {
    fn push_lines(self, out: &mut Vec<String>) {
        out.extend(split_breaks(self).map(|l| l.trim().to_string()));
    }
}

impl LineSource for &&str {
    fn push_lines(self, out: &mut Vec<String>) {
        (*self).push_lines(out);
    }
}

impl LineSource for String {
    fn push_lines(self, out: &mut Vec<String>) {
        self.as_str().push_lines(out);
    }
}

impl LineSource for &String {
    fn push_lines(self, out: &mut Vec<String>) {
        self.as_str().push_lines(out);
    }
}

impl<T: LineSource> LineSource for Vec<T> {
    fn push_lines(self, out: &mut Vec<String>) {
        for item in self {
            item.push_lines(out);
        }
    }
}

impl<T: LineSource, const N: usize> LineSource for [T; N] {
    fn push_lines(self, out: &mut Vec<String>) {
        for item in self {
            item.push_lines(out);
        }
    }
}

impl<'a, T> LineSource for &'a [T]
where
    &'a T: LineSource,
{
    fn push_lines(self, out: &mut Vec<String>) {
        for item in self {
            item.push_lines(out);
        }
    }
}

impl<'a, T> LineSource for &'a Vec<T>
where
    &'a T: LineSource,
{
    fn push_lines(self, out: &mut Vec<String>) {
        self.as_slice().push_lines(out);
    }
}

impl<'a, T, const N: usize> LineSource for &'a [T; N]
where
    &'a T: LineSource,
{
    fn push_lines(self, out: &mut Vec<String>) {
        self.as_slice().push_lines(out);
    }
}
