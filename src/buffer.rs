//! The `LineBuffer` holds the output as it's built: header lines and content
//! lines, in order, each without its line terminator.
use std::io;

/// A line of output, without its terminator
pub type Line = Vec<u8>;

/// The accumulating output. Headers are stored as ordinary lines, so the
/// post-processing stages treat them like any other line.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LineBuffer {
    lines: Vec<Line>,
}

impl LineBuffer {
    /// An empty buffer
    #[must_use]
    pub fn new() -> Self {
        LineBuffer::default()
    }

    /// Appends one line
    pub fn push(&mut self, line: impl Into<Line>) {
        self.lines.push(line.into());
    }

    /// Appends every line in `lines`
    pub fn extend(&mut self, lines: impl IntoIterator<Item = Line>) {
        self.lines.extend(lines);
    }

    /// Number of lines
    #[must_use]
    pub fn len(&self) -> usize {
        self.lines.len()
    }

    /// Does the buffer have no lines at all?
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }

    /// The lines, in order
    #[must_use]
    pub fn lines(&self) -> &[Line] {
        &self.lines
    }

    /// Like `Vec`'s `.retain`: keeps the lines for which `keep` is true, in order
    pub fn retain(&mut self, keep: impl FnMut(&Line) -> bool) {
        self.lines.retain(keep);
    }

    /// Replaces every line with `rewrite(line_number, line)`; line numbers
    /// start at 1.
    pub fn rewrite(&mut self, mut rewrite: impl FnMut(usize, Line) -> Line) {
        self.lines = std::mem::take(&mut self.lines)
            .into_iter()
            .enumerate()
            .map(|(index, line)| rewrite(index + 1, line))
            .collect();
    }

    /// Takes the lines out, leaving the buffer empty
    pub(crate) fn take_lines(&mut self) -> Vec<Line> {
        std::mem::take(&mut self.lines)
    }

    /// Writes each line followed by `\n`
    pub fn write_to(&self, out: &mut impl io::Write) -> io::Result<()> {
        for line in &self.lines {
            out.write_all(line)?;
            out.write_all(b"\n")?;
        }
        out.flush()
    }
}

impl<L: Into<Line>> FromIterator<L> for LineBuffer {
    fn from_iter<I: IntoIterator<Item = L>>(iter: I) -> Self {
        LineBuffer { lines: iter.into_iter().map(Into::into).collect() }
    }
}
