//! Byte ranges into scanned source, and the machinery to show them to a user

use std::fmt::{Debug, Display, Formatter};

/// A trait that can provide the [Span] of a token or comment
pub trait Spanned {
    fn span(&self) -> Span;
}

/// A half open `[start, end)` range of byte offsets into a source string
#[derive(Copy, Clone, Ord, PartialOrd, Eq, PartialEq, Hash, Default)]
pub struct Span {
    start: usize,
    end: usize,
}

impl Span {
    /// Creates a new span
    ///
    /// # Panics
    /// if `end` is before `start`
    pub const fn new(start: usize, end: usize) -> Self {
        assert!(start <= end, "span end before start");
        Self { start, end }
    }

    /// Creates an empty span at `offset`
    pub const fn empty(offset: usize) -> Self {
        Self::new(offset, offset)
    }

    /// Gets an empty span directly after this span
    pub const fn after(&self) -> Self {
        Self::empty(self.end)
    }

    #[inline]
    pub const fn start(&self) -> usize {
        self.start
    }

    #[inline]
    pub const fn end(&self) -> usize {
        self.end
    }

    #[inline]
    pub const fn len(&self) -> usize {
        self.end - self.start
    }

    #[inline]
    pub const fn is_empty(&self) -> bool {
        self.start == self.end
    }

    /// Gets the text this span covers in `source`, if the span lies on char boundaries within it
    pub fn text<'s>(&self, source: &'s str) -> Option<&'s str> {
        source.get(self.start..self.end)
    }
}

impl Debug for Span {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}..{}", self.start, self.end)
    }
}

impl Spanned for Span {
    fn span(&self) -> Span {
        *self
    }
}

/// A span could not be placed within a source string
#[derive(Debug, thiserror::Error)]
#[error("offset {offset} is not a char boundary within a source of {len} bytes")]
pub struct SpanError {
    pub offset: usize,
    pub len: usize,
}

/// A line reader struct that's responsible for getting lines from a span
#[derive(Debug, Default)]
pub struct LineReader {
    before: usize,
    after: usize,
}

impl LineReader {
    /// Creates a new line reader that gets `before` number of lines before a span and `after` number
    /// of lines after.
    pub fn new(before: usize, after: usize) -> Self {
        Self { before, after }
    }

    /// Gets the lines of `source` around a given span, plus the 1-based number of the line the
    /// span starts on.
    ///
    /// Only the base line carries a column, every other line reports column `0`.
    pub fn lines(&self, source: &str, span: &Span) -> Result<(Vec<Line>, usize), SpanError> {
        let bad_offset = || SpanError {
            offset: span.start(),
            len: source.len(),
        };
        let mut lines = vec![];
        let mut base_line = None;
        let mut line_start = 0usize;
        for (idx, src) in source.split('\n').enumerate() {
            let line_end = line_start + src.len();
            let mut col = 0;
            if base_line.is_none() && span.start() <= line_end {
                let prefix = source
                    .get(line_start..span.start())
                    .ok_or_else(bad_offset)?;
                col = prefix.chars().count();
                base_line = Some(idx + 1);
            }
            lines.push(Line {
                line: idx + 1,
                col,
                byte_offset: line_start,
                src: src.to_string(),
            });
            line_start = line_end + 1;
        }
        let base_line = base_line.ok_or_else(bad_offset)?;
        let range = base_line.saturating_sub(self.before)..=base_line.saturating_add(self.after);
        lines.retain(|line| range.contains(&line.line));

        Ok((lines, base_line))
    }
}

#[derive(Debug)]
pub struct Line {
    pub line: usize,
    pub col: usize,
    pub byte_offset: usize,
    pub src: String,
}

/// A message pinned to a span of source, rendered with the surrounding lines
#[derive(Debug)]
pub struct Diagnostic {
    message: String,
    lines: Vec<Line>,
    base_line: usize,
    col: usize,
    underline: usize,
}

impl Diagnostic {
    /// Resolves `span` against `source`
    pub fn new(source: &str, span: Span, message: impl Display) -> Result<Self, SpanError> {
        let (lines, base_line) = LineReader::new(2, 2).lines(source, &span)?;
        let col = lines
            .iter()
            .find(|line| line.line == base_line)
            .map(|line| line.col)
            .unwrap_or(0);
        // only the first line of a multi-line span is underlined
        let underline = span
            .text(source)
            .map(|text| text.split('\n').next().unwrap_or("").chars().count())
            .unwrap_or(0);
        Ok(Self {
            message: message.to_string(),
            lines,
            base_line,
            col,
            underline,
        })
    }

    /// The 1-based line the span starts on
    pub fn line(&self) -> usize {
        self.base_line
    }

    /// The 0-based column, in chars, the span starts at
    pub fn col(&self) -> usize {
        self.col
    }
}

impl Display for Diagnostic {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        writeln!(f, "{}", self.message)?;
        writeln!(f, "  -> {}:{}", self.base_line, self.col + 1)?;
        let width = self
            .lines
            .iter()
            .map(|line| line.line)
            .max()
            .unwrap_or(0)
            .to_string()
            .len();
        for line in &self.lines {
            writeln!(f, "{:width$} | {}", line.line, line.src.trim_end())?;
            if line.line == self.base_line {
                if self.underline > 0 {
                    writeln!(
                        f,
                        "{}{}{}",
                        " ".repeat(width + 3),
                        " ".repeat(self.col),
                        "~".repeat(self.underline)
                    )?;
                } else {
                    writeln!(f, "{}{}^", " ".repeat(width + 3), "-".repeat(self.col))?;
                }
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use crate::spanned::{Diagnostic, LineReader, Span, Spanned};

    #[test]
    fn test_span_is_spanned() {
        let p = Span::new(0, 3).span();
        assert_eq!(p.start(), 0);
        assert_eq!(p.end(), 3);
        assert_eq!(p.len(), 3);
    }

    #[test]
    fn test_span_after() {
        let p = Span::new(2, 5).after();
        assert_eq!(p, Span::new(5, 5));
        assert!(p.is_empty());
    }

    #[test]
    fn test_text() {
        let src = "a = 1;";
        assert_eq!(Span::new(4, 5).text(src), Some("1"));
        assert_eq!(Span::new(4, 50).text(src), None);
    }

    #[test]
    fn test_lines_around_span() {
        let src = "begin\na = 1;\nb = 2;\nc = 3;\nd = 4;\nend";
        // `b`
        let (lines, base) = LineReader::new(1, 1).lines(src, &Span::new(13, 14)).unwrap();
        assert_eq!(base, 3);
        assert_eq!(
            lines.iter().map(|line| line.line).collect::<Vec<_>>(),
            vec![2, 3, 4]
        );
        assert_eq!(lines[1].src, "b = 2;");
        assert_eq!(lines[1].col, 0);
        assert_eq!(lines[1].byte_offset, 13);
    }

    #[test]
    fn test_lines_at_end_of_input() {
        let src = "begin a=1;";
        let (lines, base) = LineReader::new(2, 2)
            .lines(src, &Span::empty(src.len()))
            .unwrap();
        assert_eq!(base, 1);
        assert_eq!(lines[0].col, 10);
    }

    #[test]
    fn test_lines_out_of_bounds() {
        let result = LineReader::new(0, 0).lines("abc", &Span::empty(10));
        assert!(result.is_err());
    }

    #[test]
    fn test_diagnostic_underline() {
        let src = "begin\n  a = 1 b = 2;\nend";
        let diagnostic = Diagnostic::new(src, Span::new(14, 15), "expected 'end'").unwrap();
        assert_eq!(diagnostic.line(), 2);
        assert_eq!(diagnostic.col(), 8);
        let rendered = diagnostic.to_string();
        assert!(rendered.starts_with("expected 'end'\n  -> 2:9\n"), "{rendered}");
        assert!(rendered.contains("2 |   a = 1 b = 2;\n            ~\n"), "{rendered}");
    }

    #[test]
    fn test_diagnostic_empty_span() {
        let src = "begin a = 1";
        let diagnostic = Diagnostic::new(src, Span::empty(11), "expected 'end'").unwrap();
        let rendered = diagnostic.to_string();
        assert!(rendered.ends_with("    -----------^\n"), "{rendered}");
    }
}
