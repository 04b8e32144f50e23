//! Pretty-printing for the AST, used by the lex-parse-pretty-print
//! round-trip property (`spec.md` §8.1: "re-parsing the pretty-printed
//! output yields an AST equal to the original").
//!
//! The output is valid surface syntax but not a byte-for-byte echo of
//! the input — aliases are rendered as their canonical keyword and
//! grouping parentheses are added liberally rather than reconstructed
//! from the original precedence.

use super::formula::{Formula, RelOp};
use super::term::{ArithOp, Term};
use std::fmt;

impl fmt::Display for RelOp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            RelOp::Lt => "<",
            RelOp::Le => "<=",
            RelOp::Eq => "=",
            RelOp::Ne => "!=",
            RelOp::Gt => ">",
            RelOp::Ge => ">=",
        };
        write!(f, "{s}")
    }
}

impl fmt::Display for ArithOp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            ArithOp::Add => "+",
            ArithOp::Sub => "-",
            ArithOp::Mul => "*",
            ArithOp::Div => "/",
        };
        write!(f, "{s}")
    }
}

impl fmt::Display for Term {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Term::Number(text) => write!(f, "{text}"),
            Term::Variable(name) => write!(f, "{name}"),
            Term::Binary { op, lhs, rhs } => write!(f, "({lhs} {op} {rhs})"),
            Term::Neg(inner) => write!(f, "-({inner})"),
            Term::Pow { base, exponent } => write!(f, "({base}^{exponent})"),
            Term::Abs(inner) => write!(f, "|{inner}|"),
            Term::Sqrt(inner) => write!(f, "sqrt({inner})"),
            Term::Min(args) => write_call(f, "min", args),
            Term::Max(args) => write_call(f, "max", args),
        }
    }
}

fn write_call(f: &mut fmt::Formatter<'_>, name: &str, args: &[Term]) -> fmt::Result {
    write!(f, "{name}(")?;
    for (i, arg) in args.iter().enumerate() {
        if i > 0 {
            write!(f, ", ")?;
        }
        write!(f, "{arg}")?;
    }
    write!(f, ")")
}

impl fmt::Display for Formula {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Formula::Relation { op, lhs, rhs } => write!(f, "{lhs} {op} {rhs}"),
            Formula::And(args) if args.is_empty() => write!(f, "true"),
            Formula::And(args) => write_joined(f, args, "and"),
            Formula::Or(args) if args.is_empty() => write!(f, "false"),
            Formula::Or(args) => write_joined(f, args, "or"),
            Formula::Not(inner) => write!(f, "not ({inner})"),
            Formula::Implies { lhs, rhs } => write!(f, "({lhs} => {rhs})"),
            Formula::Iff { lhs, rhs } => write!(f, "({lhs} iff {rhs})"),
            Formula::Forall { vars, body } => write!(f, "forall {}. {body}", vars.join(", ")),
            Formula::Exists { vars, body } => write!(f, "exists {}. {body}", vars.join(", ")),
        }
    }
}

fn write_joined(f: &mut fmt::Formatter<'_>, args: &[Formula], connective: &str) -> fmt::Result {
    write!(f, "(")?;
    for (i, arg) in args.iter().enumerate() {
        if i > 0 {
            write!(f, " {connective} ")?;
        }
        write!(f, "{arg}")?;
    }
    write!(f, ")")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ast::RelOp;

    #[test]
    fn relation_round_trips_through_text() {
        let formula = Formula::relation(
            RelOp::Gt,
            Term::binary(ArithOp::Add, Term::var("x"), Term::var("y")),
            Term::number("0"),
        );
        assert_eq!(formula.to_string(), "(x + y) > 0");
    }

    #[test]
    fn empty_and_or_print_as_boolean_literals() {
        assert_eq!(Formula::truth().to_string(), "true");
        assert_eq!(Formula::falsehood().to_string(), "false");
    }

    #[test]
    fn quantifiers_print_with_their_bound_variables() {
        let formula = Formula::Forall {
            vars: vec!["x".into(), "y".into()],
            body: Box::new(Formula::relation(RelOp::Ge, Term::var("x"), Term::var("y"))),
        };
        assert_eq!(formula.to_string(), "forall x, y. x >= y");
    }
}
