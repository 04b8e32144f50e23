//! Lowers the surface AST (`arithmetica_language::{Term, Formula}`) into
//! the solver-facing IR (`arithmetica_verify::VerifyExpr`).
//!
//! This pass is pure and stateless: it never touches Z3. The only
//! environment it needs — which free variable has which sort — is
//! carried by [`sort_table`], built once per proof unit from
//! `ProofUnit::var_types`.

use std::collections::HashMap;

use arithmetica_language::{ArithOp, Formula, ProofUnit, RelOp, Term, VarType};
use arithmetica_verify::{VerifyExpr, VerifySort};

use crate::error::TranslationError;

/// Build the sort table the solver needs from a proof unit's declared
/// and inferred variables. Absent from `var_types` means real, matching
/// `spec.md` §3's default.
pub fn sort_table(unit: &ProofUnit) -> HashMap<String, VerifySort> {
    unit.vars
        .iter()
        .map(|name| {
            let sort = match unit.var_types.get(name) {
                Some(VarType::Int) => VerifySort::Int,
                Some(VarType::Real) | None => VerifySort::Real,
            };
            (name.clone(), sort)
        })
        .collect()
}

pub fn lower_term(term: &Term) -> Result<VerifyExpr, TranslationError> {
    Ok(match term {
        Term::Number(text) => VerifyExpr::num(text.clone()),
        Term::Variable(name) => VerifyExpr::var(name.clone()),
        Term::Binary { op, lhs, rhs } => {
            let left = lower_term(lhs)?;
            let right = lower_term(rhs)?;
            VerifyExpr::binary(lower_arith_op(*op), left, right)
        }
        Term::Neg(inner) => VerifyExpr::neg(lower_term(inner)?),
        Term::Pow { base, exponent } => VerifyExpr::binary(
            arithmetica_verify::VerifyOp::Pow,
            lower_term(base)?,
            lower_term(exponent)?,
        ),
        Term::Abs(inner) => VerifyExpr::Abs(Box::new(lower_term(inner)?)),
        // sqrt(x) is x^0.5 (spec.md §4.3); the IR has no dedicated variant.
        Term::Sqrt(inner) => VerifyExpr::binary(
            arithmetica_verify::VerifyOp::Pow,
            lower_term(inner)?,
            VerifyExpr::num("0.5"),
        ),
        Term::Min(args) => {
            if args.len() < 2 {
                return Err(TranslationError::Arity {
                    what: "min",
                    found: args.len(),
                });
            }
            VerifyExpr::Min(lower_all(args)?)
        }
        Term::Max(args) => {
            if args.len() < 2 {
                return Err(TranslationError::Arity {
                    what: "max",
                    found: args.len(),
                });
            }
            VerifyExpr::Max(lower_all(args)?)
        }
    })
}

fn lower_all(terms: &[Term]) -> Result<Vec<VerifyExpr>, TranslationError> {
    terms.iter().map(lower_term).collect()
}

fn lower_arith_op(op: ArithOp) -> arithmetica_verify::VerifyOp {
    use arithmetica_verify::VerifyOp;
    match op {
        ArithOp::Add => VerifyOp::Add,
        ArithOp::Sub => VerifyOp::Sub,
        ArithOp::Mul => VerifyOp::Mul,
        ArithOp::Div => VerifyOp::Div,
    }
}

fn lower_rel_op(op: RelOp) -> arithmetica_verify::VerifyOp {
    use arithmetica_verify::VerifyOp;
    match op {
        RelOp::Lt => VerifyOp::Lt,
        RelOp::Le => VerifyOp::Lte,
        RelOp::Eq => VerifyOp::Eq,
        RelOp::Ne => VerifyOp::Neq,
        RelOp::Gt => VerifyOp::Gt,
        RelOp::Ge => VerifyOp::Gte,
    }
}

pub fn lower_formula(formula: &Formula) -> Result<VerifyExpr, TranslationError> {
    Ok(match formula {
        Formula::Relation { op, lhs, rhs } => {
            VerifyExpr::binary(lower_rel_op(*op), lower_term(lhs)?, lower_term(rhs)?)
        }
        Formula::And(args) => fold_conjunction(args, true)?,
        Formula::Or(args) => fold_conjunction(args, false)?,
        Formula::Not(inner) => VerifyExpr::not(lower_formula(inner)?),
        Formula::Implies { lhs, rhs } => {
            VerifyExpr::implies(lower_formula(lhs)?, lower_formula(rhs)?)
        }
        // iff is a distinct connective in this AST; lowered here rather
        // than folded at tokenisation, unlike the double-implication
        // behavior this system used to have.
        Formula::Iff { lhs, rhs } => {
            let l = lower_formula(lhs)?;
            let r = lower_formula(rhs)?;
            VerifyExpr::and(
                VerifyExpr::implies(l.clone(), r.clone()),
                VerifyExpr::implies(r, l),
            )
        }
        Formula::Forall { vars, body } => VerifyExpr::forall(
            vars.iter().map(|v| (v.clone(), VerifySort::Real)).collect(),
            lower_formula(body)?,
        ),
        Formula::Exists { vars, body } => VerifyExpr::exists(
            vars.iter().map(|v| (v.clone(), VerifySort::Real)).collect(),
            lower_formula(body)?,
        ),
    })
}

fn fold_conjunction(args: &[Formula], is_and: bool) -> Result<VerifyExpr, TranslationError> {
    if args.is_empty() {
        return Ok(VerifyExpr::Bool(is_and));
    }
    let mut iter = args.iter();
    let mut result = lower_formula(iter.next().expect("checked non-empty above"))?;
    for arg in iter {
        let next = lower_formula(arg)?;
        result = if is_and {
            VerifyExpr::and(result, next)
        } else {
            VerifyExpr::or(result, next)
        };
    }
    Ok(result)
}

#[cfg(test)]
mod tests {
    use super::*;
    use arithmetica_language::parse_source;

    fn claim_of(src: &str) -> Formula {
        parse_source(src, ".").expect("fixture should parse").claim
    }

    #[test]
    fn iff_lowers_to_a_double_implication() {
        let formula = claim_of("assume true\nprove x > 0 iff y > 0\n");
        let lowered = lower_formula(&formula).unwrap();
        assert!(matches!(
            lowered,
            VerifyExpr::Binary { op: arithmetica_verify::VerifyOp::And, .. }
        ));
    }

    #[test]
    fn sqrt_lowers_to_a_fractional_power() {
        let formula = claim_of("assume true\nprove sqrt(x) >= 0\n");
        let lowered = lower_formula(&formula).unwrap();
        let VerifyExpr::Binary { left, .. } = lowered else {
            panic!("expected a relation");
        };
        assert!(matches!(
            *left,
            VerifyExpr::Binary { op: arithmetica_verify::VerifyOp::Pow, .. }
        ));
    }

    #[test]
    fn min_with_one_argument_is_a_translation_error() {
        let term = Term::Min(vec![Term::number("1")]);
        assert_eq!(
            lower_term(&term),
            Err(TranslationError::Arity { what: "min", found: 1 })
        );
    }

    #[test]
    fn sort_table_defaults_unannotated_variables_to_real() {
        let unit = parse_source("let n: Int\nassume x > 0\nprove n + x > 0\n", ".").unwrap();
        let table = sort_table(&unit);
        assert_eq!(table.get("n"), Some(&VerifySort::Int));
        assert_eq!(table.get("x"), Some(&VerifySort::Real));
    }
}
