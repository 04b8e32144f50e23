//! Error types with source location tracking.
//!
//! Every stage of the pipeline (lexer, parser, translator, solver) defines
//! its own error enum, but all of them carry a [`Span`] and all of them can
//! be rendered through [`SpannedError`] for a uniform "line:col: message"
//! shape.

use crate::span::Span;
use std::fmt;

/// A message tied to a source location.
///
/// This is the lowest common denominator error shape in the workspace;
/// crate-specific error enums implement `From<TheirError> for SpannedError`
/// so a host can always fall back to a flat, displayable error.
#[derive(Debug, Clone)]
pub struct SpannedError {
    pub message: String,
    pub span: Span,
}

impl SpannedError {
    pub fn new(message: impl Into<String>, span: Span) -> Self {
        Self {
            message: message.into(),
            span,
        }
    }
}

impl fmt::Display for SpannedError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.span, self.message)
    }
}

impl std::error::Error for SpannedError {}

pub type Result<T> = std::result::Result<T, SpannedError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn spanned_error_display_includes_location_and_message() {
        let err = SpannedError::new("unexpected token", Span::new(2, 5));
        let rendered = err.to_string();
        assert!(rendered.contains("2:5"));
        assert!(rendered.contains("unexpected token"));
    }
}
