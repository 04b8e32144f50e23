//! AST-to-SMT translation and the step/case/claim verification driver
//! (`spec.md` §4.3, §4.4).
//!
//! This crate sits between the surface language (`arithmetica-language`)
//! and the solver (`arithmetica-verify`): [`translate`] lowers the
//! parsed AST into the solver's IR, and [`driver`] sequences the solver
//! queries a proof unit needs into one [`Verdict`].

pub mod driver;
pub mod error;
pub mod translate;

pub use driver::{CaseResult, Driver, Status, StepResult, Verdict};
pub use error::{DriverError, TranslationError};
pub use translate::{lower_formula, lower_term, sort_table};

use std::path::Path;

use arithmetica_verify::SolverConfig;

/// Parse `source` and verify it in one call, the entry point most
/// callers want.
pub fn verify(
    source: &str,
    base_dir: impl AsRef<Path>,
    config: SolverConfig,
) -> Result<Verdict, DriverError> {
    let unit = arithmetica_language::parse_source(source, base_dir)?;
    Driver::new(config).verify(&unit)
}
