//! Proof-unit AST (`spec.md` §3 "AST — Proof Unit").

use super::formula::Formula;
use std::collections::BTreeMap;

/// A declared variable's arithmetic sort. Unspecified variables default
/// to `Real` (`spec.md` §3).
#[derive(Debug, Clone, Copy, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub enum VarType {
    Int,
    Real,
}

impl Default for VarType {
    fn default() -> Self {
        VarType::Real
    }
}

/// One intermediate-step item: either a single formula to prove, or a
/// case-analysis block (`spec.md` §3).
#[derive(Debug, Clone, PartialEq, serde::Serialize, serde::Deserialize)]
pub enum Step {
    Formula(Formula),
    Cases(Vec<Case>),
}

/// One branch of a `cases:` block: a condition and its own ordered list
/// of sub-steps.
#[derive(Debug, Clone, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct Case {
    pub condition: Formula,
    pub steps: Vec<Step>,
}

/// A named, reusable (assumptions, conclusion) pair, introduced by
/// `theorem N: ...` or merged in from an import (`spec.md` GLOSSARY
/// "Theorem").
#[derive(Debug, Clone, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct Theorem {
    pub assumptions: Vec<Formula>,
    pub conclusion: Formula,
}

/// The complete parsed proof, ready for translation and verification
/// (`spec.md` §3, §6 "Driver input").
///
/// `vars`/`var_types` use `BTreeMap`/`BTreeSet` rather than their hashed
/// counterparts so that variable declaration order into the solver —
/// and therefore counterexample-model ordering — is deterministic, as
/// `spec.md` §4.4's determinism property requires.
#[derive(Debug, Clone, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct ProofUnit {
    pub vars: std::collections::BTreeSet<String>,
    pub var_types: BTreeMap<String, VarType>,
    pub assumptions: Vec<Formula>,
    pub steps: Vec<Step>,
    pub claim: Formula,
    pub theorems: BTreeMap<String, Theorem>,
}
