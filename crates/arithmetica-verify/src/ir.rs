//! Verification IR: a lightweight AST decoupled from the DSL's own AST
//! so that the language crate doesn't have to depend on Z3.
//!
//! Unlike the surface AST, this IR does not separate terms from
//! formulas — arithmetic and boolean expressions share one tree, with
//! [`VerifyOp`] tagging which kind of operation a [`VerifyExpr::Binary`]
//! node performs. A translator lowers into this IR and is responsible
//! for producing well-sorted trees; [`crate::solver`] type-checks them
//! again as it encodes into Z3, since a malformed tree should fail
//! loudly rather than panic.

/// The sort a declared variable is given when it enters the solver.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum VerifySort {
    Int,
    Real,
}

/// The operation tagging a [`VerifyExpr::Binary`] node.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum VerifyOp {
    // Arithmetic (Num, Num) -> Num
    Add,
    Sub,
    Mul,
    Div,
    Pow,

    // Comparison (Num, Num) -> Bool
    Eq,
    Neq,
    Gt,
    Lt,
    Gte,
    Lte,

    // Logic (Bool, Bool) -> Bool
    And,
    Or,
    Implies,
    Iff,
}

/// Expression node of the verification IR.
#[derive(Debug, Clone, PartialEq)]
pub enum VerifyExpr {
    /// A numeric literal, kept as exact source text (`spec.md` §3).
    Num(String),
    Bool(bool),
    Var(String),
    Binary {
        op: VerifyOp,
        left: Box<VerifyExpr>,
        right: Box<VerifyExpr>,
    },
    Neg(Box<VerifyExpr>),
    Not(Box<VerifyExpr>),
    Abs(Box<VerifyExpr>),
    /// At least two arguments.
    Min(Vec<VerifyExpr>),
    Max(Vec<VerifyExpr>),
    ForAll {
        vars: Vec<(String, VerifySort)>,
        body: Box<VerifyExpr>,
    },
    Exists {
        vars: Vec<(String, VerifySort)>,
        body: Box<VerifyExpr>,
    },
}

impl VerifyExpr {
    pub fn num(text: impl Into<String>) -> Self {
        VerifyExpr::Num(text.into())
    }

    pub fn var(name: impl Into<String>) -> Self {
        VerifyExpr::Var(name.into())
    }

    pub fn binary(op: VerifyOp, left: VerifyExpr, right: VerifyExpr) -> Self {
        VerifyExpr::Binary {
            op,
            left: Box::new(left),
            right: Box::new(right),
        }
    }

    pub fn not(expr: VerifyExpr) -> Self {
        VerifyExpr::Not(Box::new(expr))
    }

    pub fn neg(expr: VerifyExpr) -> Self {
        VerifyExpr::Neg(Box::new(expr))
    }

    pub fn forall(vars: Vec<(String, VerifySort)>, body: VerifyExpr) -> Self {
        VerifyExpr::ForAll {
            vars,
            body: Box::new(body),
        }
    }

    pub fn exists(vars: Vec<(String, VerifySort)>, body: VerifyExpr) -> Self {
        VerifyExpr::Exists {
            vars,
            body: Box::new(body),
        }
    }

    pub fn eq(left: VerifyExpr, right: VerifyExpr) -> Self {
        Self::binary(VerifyOp::Eq, left, right)
    }

    pub fn gt(left: VerifyExpr, right: VerifyExpr) -> Self {
        Self::binary(VerifyOp::Gt, left, right)
    }

    pub fn lt(left: VerifyExpr, right: VerifyExpr) -> Self {
        Self::binary(VerifyOp::Lt, left, right)
    }

    pub fn gte(left: VerifyExpr, right: VerifyExpr) -> Self {
        Self::binary(VerifyOp::Gte, left, right)
    }

    pub fn lte(left: VerifyExpr, right: VerifyExpr) -> Self {
        Self::binary(VerifyOp::Lte, left, right)
    }

    pub fn neq(left: VerifyExpr, right: VerifyExpr) -> Self {
        Self::binary(VerifyOp::Neq, left, right)
    }

    pub fn and(left: VerifyExpr, right: VerifyExpr) -> Self {
        Self::binary(VerifyOp::And, left, right)
    }

    pub fn or(left: VerifyExpr, right: VerifyExpr) -> Self {
        Self::binary(VerifyOp::Or, left, right)
    }

    pub fn implies(left: VerifyExpr, right: VerifyExpr) -> Self {
        Self::binary(VerifyOp::Implies, left, right)
    }

    pub fn iff(left: VerifyExpr, right: VerifyExpr) -> Self {
        Self::binary(VerifyOp::Iff, left, right)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn construction_tags_the_right_operator() {
        let x = VerifyExpr::var("x");
        let gt = VerifyExpr::gt(x.clone(), VerifyExpr::num("5"));
        assert!(matches!(gt, VerifyExpr::Binary { op: VerifyOp::Gt, .. }));

        let implication = VerifyExpr::implies(x.clone(), VerifyExpr::eq(x, VerifyExpr::num("5")));
        assert!(matches!(
            implication,
            VerifyExpr::Binary { op: VerifyOp::Implies, .. }
        ));
    }

    #[test]
    fn quantifier_carries_its_variable_sorts() {
        let forall = VerifyExpr::forall(
            vec![("x".to_string(), VerifySort::Real)],
            VerifyExpr::gt(VerifyExpr::var("x"), VerifyExpr::num("0")),
        );
        assert!(matches!(forall, VerifyExpr::ForAll { vars, .. } if vars.len() == 1));
    }
}
