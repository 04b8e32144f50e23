//! Lex → parse → pretty-print → re-parse should be a fixed point: the
//! second AST equals the first (`spec.md` §8.1).

use arithmetica_language::{parse_source, Formula};

fn assumption_of(src: &str) -> Formula {
    parse_source(src, ".")
        .expect("fixture should parse")
        .assumptions
        .into_iter()
        .next()
        .expect("fixture should have one assumption")
}

fn round_trips(src: &str) {
    let first = assumption_of(src);
    let printed = format!("assume {first}\nprove true\n");
    let second = assumption_of(&printed);
    assert_eq!(first, second, "re-parsing {printed:?} did not reproduce the original AST");
}

#[test]
fn simple_relation_round_trips() {
    round_trips("assume x + y > 0\nprove true\n");
}

#[test]
fn nested_arithmetic_round_trips() {
    round_trips("assume (x + y) * 2 - sqrt(z) >= 1\nprove true\n");
}

#[test]
fn conjunction_and_negation_round_trip() {
    round_trips("assume x > 0 and not y < 0\nprove true\n");
}

#[test]
fn implication_and_iff_round_trip() {
    round_trips("assume (x > 0 implies y > 0) iff z = 0\nprove true\n");
}

#[test]
fn quantifiers_round_trip() {
    round_trips("assume forall x, y. x + y = y + x\nprove true\n");
}

#[test]
fn min_max_and_abs_round_trip() {
    round_trips("assume min(x, y, z) <= max(x, y, z)\nprove true\n");
}
