//! Arithmetic term AST (`spec.md` §3 "AST — Terms").

/// A binary arithmetic operator.
#[derive(Debug, Clone, Copy, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub enum ArithOp {
    Add,
    Sub,
    Mul,
    Div,
}

/// An arithmetic expression.
///
/// Numeric literals keep their exact source text (`spec.md` §3: "stored
/// as exact text to preserve precision") rather than being parsed into a
/// floating-point value — the solver interprets the text as an exact
/// rational.
#[derive(Debug, Clone, PartialEq, serde::Serialize, serde::Deserialize)]
pub enum Term {
    Number(String),
    Variable(String),
    Binary {
        op: ArithOp,
        lhs: Box<Term>,
        rhs: Box<Term>,
    },
    Neg(Box<Term>),
    /// Right-associative exponentiation: `base ^ exponent`.
    Pow {
        base: Box<Term>,
        exponent: Box<Term>,
    },
    Abs(Box<Term>),
    /// Lowered by the translator as `arg ^ (1/2)` (`spec.md` §4.3).
    Sqrt(Box<Term>),
    /// At least two arguments (`spec.md` §3).
    Min(Vec<Term>),
    Max(Vec<Term>),
}

impl Term {
    pub fn number(text: impl Into<String>) -> Self {
        Term::Number(text.into())
    }

    pub fn var(name: impl Into<String>) -> Self {
        Term::Variable(name.into())
    }

    pub fn binary(op: ArithOp, lhs: Term, rhs: Term) -> Self {
        Term::Binary {
            op,
            lhs: Box::new(lhs),
            rhs: Box::new(rhs),
        }
    }

    pub fn neg(term: Term) -> Self {
        Term::Neg(Box::new(term))
    }

    pub fn pow(base: Term, exponent: Term) -> Self {
        Term::Pow {
            base: Box::new(base),
            exponent: Box::new(exponent),
        }
    }

    /// Every variable name referenced anywhere in this term, including
    /// duplicates folded via the provided set.
    pub fn collect_vars(&self, out: &mut std::collections::BTreeSet<String>) {
        match self {
            Term::Number(_) => {}
            Term::Variable(name) => {
                out.insert(name.clone());
            }
            Term::Binary { lhs, rhs, .. } => {
                lhs.collect_vars(out);
                rhs.collect_vars(out);
            }
            Term::Neg(inner) | Term::Abs(inner) | Term::Sqrt(inner) => inner.collect_vars(out),
            Term::Pow { base, exponent } => {
                base.collect_vars(out);
                exponent.collect_vars(out);
            }
            Term::Min(args) | Term::Max(args) => {
                for arg in args {
                    arg.collect_vars(out);
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn collect_vars_finds_every_leaf_variable() {
        let term = Term::binary(
            ArithOp::Add,
            Term::var("x"),
            Term::pow(Term::var("y"), Term::number("2")),
        );
        let mut vars = std::collections::BTreeSet::new();
        term.collect_vars(&mut vars);
        assert_eq!(
            vars,
            ["x", "y"].into_iter().map(String::from).collect()
        );
    }
}
