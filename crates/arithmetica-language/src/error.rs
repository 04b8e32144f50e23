//! Lexical and parse error types (`spec.md` §7).
//!
//! Lexical errors are fatal and unrecoverable: the lexer stops at the
//! first unmatchable character. Parse errors are recoverable — the
//! parser records one and resumes at the next statement-starting
//! keyword, so a single call can surface many.

use arithmetica_base::Span;
use std::fmt;

/// An unrecognised character in the source text.
#[derive(Debug, Clone)]
pub struct LexError {
    pub message: String,
    pub span: Span,
}

impl LexError {
    pub fn new(message: impl Into<String>, span: Span) -> Self {
        Self {
            message: message.into(),
            span,
        }
    }
}

impl fmt::Display for LexError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.span, self.message)
    }
}

impl std::error::Error for LexError {}

/// One recorded parse error. The parser keeps collecting these and
/// resuming instead of aborting at the first one (`spec.md` §4.2
/// "Error recovery").
#[derive(Debug, Clone)]
pub struct ParseError {
    pub message: String,
    pub span: Span,
}

impl ParseError {
    pub fn new(message: impl Into<String>, span: Span) -> Self {
        Self {
            message: message.into(),
            span,
        }
    }
}

impl fmt::Display for ParseError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.span, self.message)
    }
}

impl std::error::Error for ParseError {}

/// A proof unit is ill-formed iff this list is non-empty or no `prove`
/// statement was seen (`spec.md` §3 invariants).
#[derive(Debug, Clone, Default)]
pub struct ParseErrors(pub Vec<ParseError>);

impl ParseErrors {
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl fmt::Display for ParseErrors {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "found {} error(s):", self.0.len())?;
        for err in &self.0 {
            writeln!(f, "  - {err}")?;
        }
        Ok(())
    }
}

impl std::error::Error for ParseErrors {}

/// Top-level failure of [`crate::parser::parse_source`]: either the
/// lexer rejected a character, or the parser collected one or more
/// [`ParseError`]s.
#[derive(Debug, Clone)]
pub enum LanguageError {
    Lex(LexError),
    Parse(ParseErrors),
}

impl fmt::Display for LanguageError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LanguageError::Lex(e) => write!(f, "{e}"),
            LanguageError::Parse(e) => write!(f, "{e}"),
        }
    }
}

impl std::error::Error for LanguageError {}

impl From<LexError> for LanguageError {
    fn from(e: LexError) -> Self {
        LanguageError::Lex(e)
    }
}

impl From<ParseErrors> for LanguageError {
    fn from(e: ParseErrors) -> Self {
        LanguageError::Parse(e)
    }
}
