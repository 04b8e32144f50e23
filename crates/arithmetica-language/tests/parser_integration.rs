use arithmetica_language::{parse_source, Formula, RelOp, Step, VarType};
use std::io::Write;

fn parse(src: &str) -> arithmetica_language::ProofUnit {
    parse_source(src, ".").expect("expected source to parse")
}

#[test]
fn assume_prove_round_trips_into_the_unit() {
    let unit = parse("assume x > 0\nprove x + 1 > 0\n");
    assert_eq!(unit.assumptions.len(), 1);
    assert!(matches!(unit.claim, Formula::Relation { op: RelOp::Gt, .. }));
    assert!(unit.vars.contains("x"));
}

#[test]
fn english_aliases_behave_like_their_canonical_keyword() {
    let unit = parse("suppose x > 0\nshow x > -1\n");
    assert_eq!(unit.assumptions.len(), 1);
}

#[test]
fn chained_comparison_desugars_to_conjunction() {
    let unit = parse("assume 0 < x <= 10\nprove x >= 0\n");
    assert!(matches!(&unit.assumptions[0], Formula::And(args) if args.len() == 2));
}

#[test]
fn iff_is_a_distinct_connective_from_implies() {
    let unit = parse("assume x > 0 iff y > 0\nprove true\n");
    assert!(matches!(unit.assumptions[0], Formula::Iff { .. }));
}

#[test]
fn let_with_set_membership_adds_declared_type_and_constraint() {
    let unit = parse("let n in N\nprove n >= 0\n");
    assert_eq!(unit.var_types.get("n"), Some(&VarType::Int));
    assert!(matches!(&unit.assumptions[0], Formula::Relation { op: RelOp::Ge, .. }));
}

#[test]
fn positive_set_variant_strengthens_the_constraint() {
    let unit = parse("let n in N+\nprove n > 0\n");
    assert!(matches!(
        &unit.assumptions[0],
        Formula::Relation { op: RelOp::Gt, .. }
    ));
}

#[test]
fn theorem_and_apply_add_the_implication_as_an_assumption() {
    let unit = parse(
        "theorem pos_sum:\n    assume x > 0\n    assume y > 0\n    prove x + y > 0\n\
         apply pos_sum\nprove true\n",
    );
    assert!(unit.theorems.contains_key("pos_sum"));
    assert!(matches!(unit.assumptions.last(), Some(Formula::Implies { .. })));
}

#[test]
fn cases_block_with_disjoint_conditions_parses_into_a_single_step() {
    let unit = parse(
        "assume true\n\
         cases:\n\
         case x > 0:\n    have x * x > 0\n\
         case x <= 0:\n    have x * x >= 0\n\
         prove true\n",
    );
    assert_eq!(unit.steps.len(), 1);
    match &unit.steps[0] {
        Step::Cases(cases) => assert_eq!(cases.len(), 2),
        other => panic!("expected a cases step, got {other:?}"),
    }
}

#[test]
fn unknown_theorem_application_is_a_parse_error() {
    let err = parse_source("apply nope\nprove true\n", ".").unwrap_err();
    assert!(err.to_string().contains("unknown theorem"));
}

#[test]
fn missing_prove_statement_is_a_parse_error() {
    let err = parse_source("assume x > 0\n", ".").unwrap_err();
    assert!(err.to_string().contains("no 'prove' statement"));
}

#[test]
fn malformed_statements_are_collected_rather_than_aborting_at_the_first() {
    let err = parse_source("assume\nlet\nprove true\n", ".").unwrap_err();
    let message = err.to_string();
    assert!(message.contains("2 error"));
}

#[test]
fn import_merges_theorems_from_the_other_file() {
    let dir = tempfile::tempdir().unwrap();
    let lib_path = dir.path().join("lib.proof");
    std::fs::File::create(&lib_path)
        .unwrap()
        .write_all(b"theorem double_nonneg:\n    assume x >= 0\n    prove x + x >= 0\n")
        .unwrap();

    let main_src = "import \"lib.proof\"\napply double_nonneg\nprove true\n";
    let unit = parse_source(main_src, dir.path()).expect("import should resolve");
    assert!(unit.theorems.contains_key("double_nonneg"));
}

#[test]
fn reimporting_the_same_file_is_a_silent_no_op() {
    let dir = tempfile::tempdir().unwrap();
    let lib_path = dir.path().join("lib.proof");
    std::fs::File::create(&lib_path)
        .unwrap()
        .write_all(b"theorem t:\n    assume x > 0\n    prove x > 0\n")
        .unwrap();

    let main_src = "import \"lib.proof\"\nimport \"lib.proof\"\nprove true\n";
    let unit = parse_source(main_src, dir.path()).expect("should parse");
    assert_eq!(unit.theorems.len(), 1);
}

#[test]
fn grouping_parens_around_a_disjunction_change_precedence() {
    let without_parens = parse("assume true\nprove x > 0 or y > 0 and z > 0\n");
    let with_parens = parse("assume true\nprove (x > 0 or y > 0) and z > 0\n");
    assert_ne!(without_parens.claim, with_parens.claim);
    assert!(matches!(with_parens.claim, Formula::And(_)));
}

#[test]
fn arithmetic_parens_group_without_becoming_a_formula() {
    let unit = parse("assume true\nprove (x + y) * 2 > 0\n");
    assert!(matches!(unit.claim, Formula::Relation { op: RelOp::Gt, .. }));
}
