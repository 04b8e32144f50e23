//! Source location tracking for error reporting.
//!
//! A [`Span`] identifies a contiguous region of source text by line and
//! column (1-based, matching how the lexer counts while it scans). Every
//! token and every lexical/parse error carries one.

/// A source location, given as a 1-based line and column.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Span {
    pub line: u32,
    pub column: u32,
}

impl Span {
    pub fn new(line: u32, column: u32) -> Self {
        Self { line, column }
    }
}

impl std::fmt::Display for Span {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}:{}", self.line, self.column)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn span_displays_as_line_colon_column() {
        let span = Span::new(3, 7);
        assert_eq!(span.to_string(), "3:7");
    }
}
