//! Translation-independent satisfiability checking over a small
//! arithmetic/logic IR, built on Z3.

pub mod error;
pub mod ir;
pub mod solver;

pub use error::{VerifyError, VerifyResult};
pub use ir::{VerifyExpr, VerifyOp, VerifySort};
pub use solver::{Model, SatResult, SolverConfig, Verifier};
