use std::str::Lines;

/// Delimiter of a multi-line string literal.
pub const TRIPLE_QUOTE: &str = "\"\"\"";

/// First non-whitespace character of a comment line.
pub const COMMENT_MARKER: char = '#';

/// One physical line as seen by the docstring tracker.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ScannedLine<'a> {
    /// 1-based line number.
    pub number: usize,
    pub text: &'a str,
    /// The line sits inside an unterminated multi-line string.
    pub inside_doc: bool,
    /// The line is blank or a comment.
    pub blank_or_comment: bool,
}

impl ScannedLine<'_> {
    /// Whether per-line rules should look at this line at all.
    #[must_use]
    pub const fn is_checkable(&self) -> bool {
        !self.inside_doc && !self.blank_or_comment
    }
}

/// Single-pass scanner that tags each line with whether it is inside a
/// multi-line string literal.
///
/// The tracker keeps a running count of `"""` occurrences; a line is inside
/// a docstring when the count, including the line's own occurrences, is odd.
/// Occurrences are counted wherever they appear on the line, so triple quotes
/// inside ordinary strings or comments skew the result. That approximation
/// is accepted in exchange for never parsing the language.
///
/// A fresh scanner is created per file; no state crosses files.
#[derive(Debug, Clone)]
pub struct DocstringScanner<'a> {
    lines: Lines<'a>,
    number: usize,
    triple_quotes: usize,
}

impl<'a> DocstringScanner<'a> {
    #[must_use]
    pub fn new(source: &'a str) -> Self {
        Self {
            lines: source.lines(),
            number: 0,
            triple_quotes: 0,
        }
    }

    /// Total `"""` occurrences seen so far. Never decreases.
    #[must_use]
    pub const fn triple_quote_count(&self) -> usize {
        self.triple_quotes
    }
}

impl<'a> Iterator for DocstringScanner<'a> {
    type Item = ScannedLine<'a>;

    fn next(&mut self) -> Option<Self::Item> {
        let text = self.lines.next()?;
        self.number += 1;
        self.triple_quotes += text.matches(TRIPLE_QUOTE).count();

        let trimmed = text.trim();
        Some(ScannedLine {
            number: self.number,
            text,
            inside_doc: self.triple_quotes % 2 == 1,
            blank_or_comment: trimmed.is_empty() || trimmed.starts_with(COMMENT_MARKER),
        })
    }
}

#[cfg(test)]
#[path = "docstring_tests.rs"]
mod tests;
