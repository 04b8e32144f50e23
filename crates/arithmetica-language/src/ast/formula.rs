//! Formula AST (`spec.md` §3 "AST — Formulas").

use super::term::Term;

/// A relational operator between two terms.
#[derive(Debug, Clone, Copy, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub enum RelOp {
    Lt,
    Le,
    Eq,
    Ne,
    Gt,
    Ge,
}

/// A first-order formula over arithmetic terms.
///
/// `Iff` is a distinct connective rather than a parse-time alias for
/// `Implies` — see `SPEC_FULL.md`, "Design-note resolutions".
#[derive(Debug, Clone, PartialEq, serde::Serialize, serde::Deserialize)]
pub enum Formula {
    Relation {
        op: RelOp,
        lhs: Term,
        rhs: Term,
    },
    /// Empty conjunction is `true` (`spec.md` §3).
    And(Vec<Formula>),
    /// Empty disjunction is `false` (`spec.md` §3).
    Or(Vec<Formula>),
    Not(Box<Formula>),
    Implies {
        lhs: Box<Formula>,
        rhs: Box<Formula>,
    },
    Iff {
        lhs: Box<Formula>,
        rhs: Box<Formula>,
    },
    Forall {
        vars: Vec<String>,
        body: Box<Formula>,
    },
    Exists {
        vars: Vec<String>,
        body: Box<Formula>,
    },
}

impl Formula {
    pub fn relation(op: RelOp, lhs: Term, rhs: Term) -> Self {
        Formula::Relation { op, lhs, rhs }
    }

    pub fn implies(lhs: Formula, rhs: Formula) -> Self {
        Formula::Implies {
            lhs: Box::new(lhs),
            rhs: Box::new(rhs),
        }
    }

    pub fn iff(lhs: Formula, rhs: Formula) -> Self {
        Formula::Iff {
            lhs: Box::new(lhs),
            rhs: Box::new(rhs),
        }
    }

    pub fn not(inner: Formula) -> Self {
        Formula::Not(Box::new(inner))
    }

    /// `true`, represented per `spec.md` §3 as the empty conjunction.
    pub fn truth() -> Self {
        Formula::And(Vec::new())
    }

    /// `false`, represented per `spec.md` §3 as the empty disjunction.
    pub fn falsehood() -> Self {
        Formula::Or(Vec::new())
    }

    /// Every free or bound variable name mentioned anywhere in this
    /// formula, used to populate `ProofUnit::vars` (`spec.md` §3
    /// invariant: "Every identifier appearing in a term or quantifier
    /// body is recorded in `vars`").
    pub fn collect_vars(&self, out: &mut std::collections::BTreeSet<String>) {
        match self {
            Formula::Relation { lhs, rhs, .. } => {
                lhs.collect_vars(out);
                rhs.collect_vars(out);
            }
            Formula::And(args) | Formula::Or(args) => {
                for arg in args {
                    arg.collect_vars(out);
                }
            }
            Formula::Not(inner) => inner.collect_vars(out),
            Formula::Implies { lhs, rhs } | Formula::Iff { lhs, rhs } => {
                lhs.collect_vars(out);
                rhs.collect_vars(out);
            }
            Formula::Forall { vars, body } | Formula::Exists { vars, body } => {
                for v in vars {
                    out.insert(v.clone());
                }
                body.collect_vars(out);
            }
        }
    }
}
