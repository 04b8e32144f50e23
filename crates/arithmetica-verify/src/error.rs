//! Errors `arithmetica-verify` itself can raise.
//!
//! A failed proof is not an error here — it's a normal [`crate::solver::SatResult`]
//! outcome that callers turn into a counterexample. These variants are for
//! genuine failures of the checking machinery itself.

use std::fmt;

pub type VerifyResult<T> = Result<T, VerifyError>;

#[derive(Debug, Clone, PartialEq)]
pub enum VerifyError {
    /// The solver ran out of its configured time budget, or the problem
    /// is outside the decidable fragment Z3 can settle (nonlinear real
    /// arithmetic is the common case here).
    SolverUnknown,

    /// Z3 itself reported an internal error.
    SolverError { message: String },

    /// The IR referenced a variable that was never declared with a sort.
    UnboundVariable { name: String },

    /// `min`/`max` was given fewer than two arguments.
    Arity { what: &'static str, found: usize },
}

impl fmt::Display for VerifyError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            VerifyError::SolverUnknown => write!(
                f,
                "the solver could not determine satisfiability (timeout or undecidable fragment)"
            ),
            VerifyError::SolverError { message } => write!(f, "solver error: {message}"),
            VerifyError::UnboundVariable { name } => {
                write!(f, "variable '{name}' was used without a declared sort")
            }
            VerifyError::Arity { what, found } => {
                write!(f, "{what} needs at least two arguments, found {found}")
            }
        }
    }
}

impl std::error::Error for VerifyError {}
