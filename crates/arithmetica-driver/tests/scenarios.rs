//! End-to-end scenarios exercising the full parse → translate → verify
//! pipeline through the crate's public `verify` entry point.

use arithmetica_driver::{verify, Status, StepResult};
use arithmetica_verify::SolverConfig;

fn run(source: &str) -> arithmetica_driver::Verdict {
    verify(source, ".", SolverConfig::default()).expect("fixture should parse and verify")
}

#[test]
fn sum_of_two_positives_is_positive() {
    let verdict = run("assume x > 0\nassume y > 0\nprove x + y > 0\n");
    assert!(verdict.ok);
    assert_eq!(verdict.status, Status::Proven);
}

#[test]
fn an_unconstrained_upper_bound_is_disproven_with_a_counterexample() {
    let verdict = run("assume x > 0\nprove x > 10\n");
    assert!(!verdict.ok);
    assert_eq!(verdict.status, Status::Disproven);
    let model = verdict.model.expect("disproven verdicts carry a model");
    let (_, x) = model
        .assignments
        .iter()
        .find(|(name, _)| name == "x")
        .expect("x should appear in the counterexample");
    let value: f64 = x.parse().unwrap_or_else(|_| {
        panic!("counterexample value for x should be numeric text, got {x}")
    });
    assert!(value > 0.0 && value <= 10.0);
}

#[test]
fn integer_typing_changes_the_outcome() {
    let verdict = run("let n: Int\nassume n > 0\nprove n >= 1\n");
    assert!(verdict.ok);
    assert_eq!(verdict.status, Status::Proven);
}

#[test]
fn exhaustive_case_split_proves_the_claim_and_reports_each_branch() {
    let source = "assume x != 0\n\
                  cases:\n\
                  case x > 0:\n    have x * x > 0\n\
                  case x < 0:\n    have x * x > 0\n\
                  prove x * x > 0\n";
    let verdict = run(source);
    assert!(verdict.ok);
    assert_eq!(verdict.status, Status::Proven);

    let StepResult::Cases { cases, exhaustiveness } = &verdict.step_results[0] else {
        panic!("expected the cases step to report a Cases result");
    };
    assert_eq!(*exhaustiveness, Status::Proven);
    assert_eq!(cases.len(), 2);
    for case in cases {
        for step in &case.steps {
            let StepResult::Formula { status, .. } = step else {
                panic!("expected a formula result inside a case");
            };
            assert_eq!(*status, Status::Proven);
        }
    }
}

#[test]
fn a_non_exhaustive_case_split_is_flagged_even_though_both_cases_hold() {
    let source = "assume x != 0\n\
                  cases:\n\
                  case x > 0:\n    have x * x > 0\n\
                  prove x * x > 0\n";
    let verdict = run(source);

    let StepResult::Cases { exhaustiveness, .. } = &verdict.step_results[0] else {
        panic!("expected the cases step to report a Cases result");
    };
    assert_eq!(*exhaustiveness, Status::Disproven);
}

#[test]
fn a_universally_quantified_claim_is_proven() {
    let verdict = run("prove forall x. x + 0 = x\n");
    assert!(verdict.ok);
    assert_eq!(verdict.status, Status::Proven);
}
