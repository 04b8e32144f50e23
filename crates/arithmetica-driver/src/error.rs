//! Errors specific to lowering an AST into the verification IR, plus the
//! top-level error composing every stage the driver can fail at.
//!
//! A malformed translation (wrong arity, a node the translator doesn't
//! recognise) should never arise from a clean parse — `arithmetica-language`
//! only ever hands the translator well-formed ASTs — but the driver treats
//! a translation failure as reachable anyway and reports it per step
//! rather than trusting that invariant.

use std::fmt;

/// A translator-level failure: the AST shape the translator was given
/// doesn't match what it knows how to lower.
#[derive(Debug, Clone, PartialEq)]
pub enum TranslationError {
    /// `min`/`max` with fewer than two arguments.
    Arity { what: &'static str, found: usize },
}

impl fmt::Display for TranslationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TranslationError::Arity { what, found } => {
                write!(f, "{what} needs at least two arguments, found {found}")
            }
        }
    }
}

impl std::error::Error for TranslationError {}

/// Everything that can go wrong on the path from source text to a
/// verdict, outside of the per-step/per-case results a [`crate::Verdict`]
/// already carries.
#[derive(Debug)]
pub enum DriverError {
    Language(arithmetica_language::LanguageError),
    Solver(arithmetica_verify::VerifyError),
}

impl fmt::Display for DriverError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DriverError::Language(e) => write!(f, "{e}"),
            DriverError::Solver(e) => write!(f, "{e}"),
        }
    }
}

impl std::error::Error for DriverError {}

impl From<arithmetica_language::LanguageError> for DriverError {
    fn from(e: arithmetica_language::LanguageError) -> Self {
        DriverError::Language(e)
    }
}

impl From<arithmetica_verify::VerifyError> for DriverError {
    fn from(e: arithmetica_verify::VerifyError) -> Self {
        DriverError::Solver(e)
    }
}
