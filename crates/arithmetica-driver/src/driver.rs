//! The verification driver (`spec.md` §4.4): sequences solver queries
//! for intermediate steps, case-split exhaustiveness, and the final
//! claim, folding everything into one [`Verdict`].

use std::collections::HashMap;

use arithmetica_language::{Case, ProofUnit, Step};
use arithmetica_verify::{Model, SatResult, SolverConfig, VerifyExpr, Verifier, VerifySort};

use crate::error::DriverError;
use crate::translate::{lower_formula, sort_table};

/// The outcome of one satisfiability query, independent of what it was
/// checking (`spec.md` §4.4: "`unsat` = proven, `sat` = disproven ...,
/// `unknown` = inconclusive").
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Status {
    Proven,
    Disproven,
    Unknown,
    Error,
}

/// The result of one [`Step`].
#[derive(Debug, Clone, PartialEq)]
pub enum StepResult {
    Formula {
        status: Status,
        model: Option<Model>,
        message: Option<String>,
    },
    Cases {
        cases: Vec<CaseResult>,
        exhaustiveness: Status,
    },
}

/// The result of one branch of a `cases` block: its own sub-steps,
/// verified under `liveAssumptions ∪ {condition}` and discarded once the
/// block ends (`spec.md` §4.4).
#[derive(Debug, Clone, PartialEq)]
pub struct CaseResult {
    pub steps: Vec<StepResult>,
}

/// One verdict per proof unit (`spec.md` §4.4 "Result record").
#[derive(Debug, Clone, PartialEq)]
pub struct Verdict {
    pub ok: bool,
    pub status: Status,
    pub model: Option<Model>,
    pub message: Option<String>,
    pub step_results: Vec<StepResult>,
}

/// Ties the translator and the solver together behind one call.
pub struct Driver {
    verifier: Verifier,
}

impl Driver {
    pub fn new(config: SolverConfig) -> Self {
        Self {
            verifier: Verifier::new(config),
        }
    }
}

impl Default for Driver {
    fn default() -> Self {
        Self::new(SolverConfig::default())
    }
}

impl Driver {
    pub fn verify(&self, unit: &ProofUnit) -> Result<Verdict, DriverError> {
        let var_sorts = sort_table(unit);

        let mut live: Vec<VerifyExpr> = unit
            .assumptions
            .iter()
            .map(|f| lower_formula(f).map_err(|_| translation_is_unreachable_from_a_clean_parse()))
            .collect::<Result<_, _>>()?;

        log::debug!("verifying unit with {} initial assumption(s)", live.len());

        let step_results = self.run_steps(&mut live, &unit.steps, &var_sorts)?;

        let claim = lower_formula(&unit.claim).map_err(|_| translation_is_unreachable_from_a_clean_parse())?;
        let (status, model) = self.check_consequence(&live, &claim, &var_sorts)?;

        log::debug!("final claim: {status:?}");

        let message = match status {
            Status::Disproven => model.as_ref().map(format_counterexample),
            Status::Unknown => Some(
                "the solver could not determine satisfiability (timeout or incomplete theory)"
                    .to_string(),
            ),
            Status::Proven | Status::Error => None,
        };

        Ok(Verdict {
            ok: status == Status::Proven,
            status,
            model,
            message,
            step_results,
        })
    }

    fn run_steps(
        &self,
        live: &mut Vec<VerifyExpr>,
        steps: &[Step],
        var_sorts: &HashMap<String, VerifySort>,
    ) -> Result<Vec<StepResult>, DriverError> {
        let mut results = Vec::with_capacity(steps.len());
        for step in steps {
            let result = match step {
                Step::Formula(formula) => match lower_formula(formula) {
                    Ok(goal) => {
                        let (status, model) = self.check_consequence(live, &goal, var_sorts)?;
                        if status == Status::Proven {
                            live.push(goal);
                        }
                        log::trace!("step: {status:?}");
                        StepResult::Formula {
                            status,
                            model,
                            message: None,
                        }
                    }
                    Err(e) => StepResult::Formula {
                        status: Status::Error,
                        model: None,
                        message: Some(e.to_string()),
                    },
                },
                Step::Cases(cases) => self.run_cases(live, cases, var_sorts)?,
            };
            results.push(result);
        }
        Ok(results)
    }

    fn run_cases(
        &self,
        live: &[VerifyExpr],
        cases: &[Case],
        var_sorts: &HashMap<String, VerifySort>,
    ) -> Result<StepResult, DriverError> {
        let mut case_results = Vec::with_capacity(cases.len());
        let mut conditions = Vec::with_capacity(cases.len());

        for case in cases {
            let condition = lower_formula(&case.condition)
                .map_err(|_| translation_is_unreachable_from_a_clean_parse())?;
            let mut case_live = live.to_vec();
            case_live.push(condition.clone());
            let steps = self.run_steps(&mut case_live, &case.steps, var_sorts)?;
            case_results.push(CaseResult { steps });
            conditions.push(condition);
        }

        let disjunction = disjoin(&conditions);
        let (exhaustiveness, _) = self.check_consequence(live, &disjunction, var_sorts)?;
        log::debug!("cases block: exhaustiveness {exhaustiveness:?}");

        Ok(StepResult::Cases {
            cases: case_results,
            exhaustiveness,
        })
    }

    /// `liveAssumptions ⊢ goal`, i.e. is `liveAssumptions ∧ ¬goal` unsat.
    fn check_consequence(
        &self,
        live: &[VerifyExpr],
        goal: &VerifyExpr,
        var_sorts: &HashMap<String, VerifySort>,
    ) -> Result<(Status, Option<Model>), DriverError> {
        let query = VerifyExpr::and(conjoin(live), VerifyExpr::not(goal.clone()));
        match self.verifier.check_sat(&query, var_sorts)? {
            SatResult::Unsat => Ok((Status::Proven, None)),
            SatResult::Sat(model) => Ok((Status::Disproven, Some(model))),
            SatResult::Unknown => Ok((Status::Unknown, None)),
        }
    }
}

fn conjoin(exprs: &[VerifyExpr]) -> VerifyExpr {
    exprs
        .iter()
        .cloned()
        .reduce(VerifyExpr::and)
        .unwrap_or(VerifyExpr::Bool(true))
}

fn disjoin(exprs: &[VerifyExpr]) -> VerifyExpr {
    exprs
        .iter()
        .cloned()
        .reduce(VerifyExpr::or)
        .unwrap_or(VerifyExpr::Bool(false))
}

fn format_counterexample(model: &Model) -> String {
    let mut out = String::from("Counterexample found:");
    for (name, value) in &model.assignments {
        out.push_str(&format!("\n  {name} = {value}"));
    }
    out
}

/// A clean parse never hands the translator a node it can't lower; if it
/// ever did, that is a bug in this crate, not a user-facing condition.
fn translation_is_unreachable_from_a_clean_parse() -> DriverError {
    DriverError::Solver(arithmetica_verify::VerifyError::SolverError {
        message: "internal error: translator rejected an AST from a clean parse".to_string(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use arithmetica_language::parse_source;

    fn unit(src: &str) -> ProofUnit {
        parse_source(src, ".").expect("fixture should parse")
    }

    #[test]
    fn sum_of_two_positives_is_proven() {
        let driver = Driver::default();
        let verdict = driver
            .verify(&unit("assume x > 0\nassume y > 0\nprove x + y > 0\n"))
            .unwrap();
        assert_eq!(verdict.status, Status::Proven);
        assert!(verdict.ok);
        assert!(verdict.model.is_none());
    }

    #[test]
    fn unconstrained_claim_is_disproven_with_a_model() {
        let driver = Driver::default();
        let verdict = driver
            .verify(&unit("assume x > 0\nprove x > 10\n"))
            .unwrap();
        assert_eq!(verdict.status, Status::Disproven);
        assert!(!verdict.ok);
        let model = verdict.model.expect("disproven verdicts carry a model");
        assert!(model.assignments.iter().any(|(name, _)| name == "x"));
    }

    #[test]
    fn integer_sort_is_honoured() {
        let driver = Driver::default();
        let verdict = driver
            .verify(&unit("let n: Int\nassume n > 0\nprove n >= 1\n"))
            .unwrap();
        assert_eq!(verdict.status, Status::Proven);
    }

    #[test]
    fn exhaustive_cases_prove_the_claim() {
        let driver = Driver::default();
        let src = "assume x != 0\n\
                   cases:\n\
                   case x > 0:\n    have x * x > 0\n\
                   case x < 0:\n    have x * x > 0\n\
                   prove x * x > 0\n";
        let verdict = driver.verify(&unit(src)).unwrap();
        assert_eq!(verdict.status, Status::Proven);
        match &verdict.step_results[0] {
            StepResult::Cases { exhaustiveness, cases } => {
                assert_eq!(*exhaustiveness, Status::Proven);
                assert_eq!(cases.len(), 2);
            }
            other => panic!("expected a cases result, got {other:?}"),
        }
    }

    #[test]
    fn non_exhaustive_cases_are_flagged() {
        let driver = Driver::default();
        let src = "assume x != 0\n\
                   cases:\n\
                   case x > 0:\n    have x * x > 0\n\
                   prove x * x > 0\n";
        let verdict = driver.verify(&unit(src)).unwrap();
        match &verdict.step_results[0] {
            StepResult::Cases { exhaustiveness, .. } => {
                assert_eq!(*exhaustiveness, Status::Disproven);
            }
            other => panic!("expected a cases result, got {other:?}"),
        }
    }

    #[test]
    fn universal_claim_over_reals_is_proven() {
        let driver = Driver::default();
        let verdict = driver.verify(&unit("prove forall x. x + 0 = x\n")).unwrap();
        assert_eq!(verdict.status, Status::Proven);
    }
}
