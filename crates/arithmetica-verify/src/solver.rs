//! Z3 encoding and satisfiability checking for [`crate::ir::VerifyExpr`].
//!
//! Variables keep the sort they were declared with (`Int` for values
//! drawn from `N`/`Z`, `Real` otherwise), but every numeric literal is a
//! real value and arithmetic is encoded over `Real` throughout — an
//! `Int` variable is promoted with [`z3::ast::Int::to_real`] wherever it
//! appears in an expression. This mirrors the untyped arithmetic of the
//! language this checker accepts: `2 * n` is well-formed whether `n` is
//! declared `Int` or not, and the promotion only loses precision Z3
//! itself tracks exactly.

use std::collections::HashMap;

use z3::ast::{Ast, Bool, Real};
use z3::{Config, Context, SatResult as Z3SatResult, Solver};

use crate::error::{VerifyError, VerifyResult};
use crate::ir::{VerifyExpr, VerifyOp, VerifySort};

/// Tunable limits for a [`Verifier`].
#[derive(Debug, Clone, Copy)]
pub struct SolverConfig {
    /// Passed to Z3 as its `timeout` parameter, in milliseconds.
    pub timeout_ms: u32,
    /// Whether the formulas this `Verifier` will see can contain `pow`
    /// with a non-constant exponent or `sqrt`/`min`/`max` over reals —
    /// any of which put a query outside linear arithmetic. `true` picks
    /// Z3's general nonlinear-capable solver; set it to `false` only
    /// when every query is known to stay linear, which lets Z3 use a
    /// faster decision procedure.
    pub nonlinear_reals: bool,
}

impl Default for SolverConfig {
    fn default() -> Self {
        Self {
            timeout_ms: 10_000,
            nonlinear_reals: true,
        }
    }
}

/// The outcome of checking whether a set of assertions is satisfiable.
#[derive(Debug, Clone, PartialEq)]
pub enum SatResult {
    /// Satisfiable; carries a model of one satisfying assignment.
    Sat(Model),
    Unsat,
    Unknown,
}

/// A satisfying assignment, one entry per free variable that appeared
/// in the checked expression.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Model {
    pub assignments: Vec<(String, String)>,
}

impl std::fmt::Display for Model {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        for (i, (name, value)) in self.assignments.iter().enumerate() {
            if i > 0 {
                write!(f, ", ")?;
            }
            write!(f, "{name} = {value}")?;
        }
        Ok(())
    }
}

/// Owns the Z3 configuration; cheap to construct, one per check since a
/// fresh [`Context`] is created per call to keep declarations isolated.
pub struct Verifier {
    cfg: Config,
}

impl Verifier {
    /// `config.nonlinear_reals` isn't wired into a specific Z3 logic —
    /// claims can carry quantifiers, which rules out the quantifier-free
    /// logics Z3's nonlinear solvers are named for — but it documents,
    /// for callers choosing a [`SolverConfig`], that this verifier
    /// always needs the general nonlinear arithmetic decision procedure
    /// for `pow`/`sqrt`/`min`/`max` obligations.
    pub fn new(config: SolverConfig) -> Self {
        let mut cfg = Config::new();
        cfg.set_param_value("timeout", &config.timeout_ms.to_string());
        Self { cfg }
    }

    /// Check whether `expr` (a boolean-sorted [`VerifyExpr`]) is
    /// satisfiable, given the sort each free variable was declared with.
    pub fn check_sat(
        &self,
        expr: &VerifyExpr,
        var_sorts: &HashMap<String, VerifySort>,
    ) -> VerifyResult<SatResult> {
        let ctx = Context::new(&self.cfg);
        let solver = Solver::new(&ctx);
        let mut env = Env::new(&ctx, var_sorts);

        let assertion = encode_bool(&ctx, &mut env, expr)?;
        solver.assert(&assertion);

        match solver.check() {
            Z3SatResult::Unsat => Ok(SatResult::Unsat),
            Z3SatResult::Unknown => Ok(SatResult::Unknown),
            Z3SatResult::Sat => {
                let model = solver.get_model().ok_or_else(|| VerifyError::SolverError {
                    message: "solver reported sat but produced no model".to_string(),
                })?;
                let mut assignments: Vec<(String, String)> = env
                    .free_vars()
                    .iter()
                    .map(|(name, var)| {
                        let value = model.eval(var, true).map(|v| v.to_string()).unwrap_or_default();
                        (name.clone(), value)
                    })
                    .collect();
                assignments.sort();
                Ok(SatResult::Sat(Model { assignments }))
            }
        }
    }

    /// Check validity: `expr` holds under every assignment consistent
    /// with `var_sorts`. Implemented as "negate and check UNSAT", the
    /// standard reduction from validity to satisfiability.
    pub fn check_valid(
        &self,
        expr: &VerifyExpr,
        var_sorts: &HashMap<String, VerifySort>,
    ) -> VerifyResult<SatResult> {
        self.check_sat(&VerifyExpr::not(expr.clone()), var_sorts)
    }
}

/// A lexical scope stack: the bottom frame holds free-variable
/// constants, and each quantifier pushes a frame of fresh bound
/// constants that shadows any free variable of the same name. Popped on
/// every exit path out of [`encode_quantifier`], including the error
/// path, so the shadow never outlives its quantifier body.
struct Env<'ctx> {
    ctx: &'ctx Context,
    sorts: &'ctx HashMap<String, VerifySort>,
    scopes: Vec<HashMap<String, Real<'ctx>>>,
}

impl<'ctx> Env<'ctx> {
    /// Every declared variable is pre-seeded into the bottom frame, not
    /// just ones the checked expression happens to mention — a variable
    /// unused in `assumptions ∧ ¬claim` still belongs in the
    /// counterexample model (`spec.md` §8 property 5).
    fn new(ctx: &'ctx Context, sorts: &'ctx HashMap<String, VerifySort>) -> Self {
        let mut bottom = HashMap::with_capacity(sorts.len());
        for (name, sort) in sorts {
            let var = match sort {
                VerifySort::Int => z3::ast::Int::new_const(ctx, name.as_str()).to_real(),
                VerifySort::Real => Real::new_const(ctx, name.as_str()),
            };
            bottom.insert(name.clone(), var);
        }
        Self {
            ctx,
            sorts,
            scopes: vec![bottom],
        }
    }

    /// Resolve a name, innermost scope first. A free reference not yet
    /// seen is declared lazily into the bottom frame.
    fn real(&mut self, name: &str) -> Real<'ctx> {
        for scope in self.scopes.iter().rev() {
            if let Some(existing) = scope.get(name) {
                return existing.clone();
            }
        }
        let var = match self.sorts.get(name) {
            Some(VerifySort::Int) => z3::ast::Int::new_const(self.ctx, name).to_real(),
            _ => Real::new_const(self.ctx, name),
        };
        self.scopes[0].insert(name.to_string(), var.clone());
        var
    }

    /// The free-variable frame, for counterexample reporting.
    fn free_vars(&self) -> &HashMap<String, Real<'ctx>> {
        &self.scopes[0]
    }

    /// Push a frame of genuinely fresh constants for a quantifier's
    /// bound variables — distinct Z3 symbols even when a name collides
    /// with a free variable already declared in the bottom frame.
    fn push_bound(&mut self, vars: &[(String, VerifySort)]) -> Vec<Real<'ctx>> {
        let mut frame = HashMap::with_capacity(vars.len());
        let mut bound = Vec::with_capacity(vars.len());
        for (name, sort) in vars {
            let fresh = match sort {
                VerifySort::Int => z3::ast::Int::fresh_const(self.ctx, name).to_real(),
                VerifySort::Real => Real::fresh_const(self.ctx, name),
            };
            frame.insert(name.clone(), fresh.clone());
            bound.push(fresh);
        }
        self.scopes.push(frame);
        bound
    }

    fn pop_bound(&mut self) {
        self.scopes.pop();
    }
}

fn encode_bool<'ctx>(
    ctx: &'ctx Context,
    env: &mut Env<'ctx>,
    expr: &VerifyExpr,
) -> VerifyResult<Bool<'ctx>> {
    match expr {
        VerifyExpr::Bool(b) => Ok(Bool::from_bool(ctx, *b)),
        VerifyExpr::Not(inner) => Ok(encode_bool(ctx, env, inner)?.not()),
        VerifyExpr::ForAll { vars, body } => encode_quantifier(ctx, env, vars, body, true),
        VerifyExpr::Exists { vars, body } => encode_quantifier(ctx, env, vars, body, false),
        VerifyExpr::Binary { op, left, right } => match op {
            VerifyOp::Eq => Ok(encode_real(ctx, env, left)?._eq(&encode_real(ctx, env, right)?)),
            VerifyOp::Neq => Ok(encode_real(ctx, env, left)?
                ._eq(&encode_real(ctx, env, right)?)
                .not()),
            VerifyOp::Gt => Ok(encode_real(ctx, env, left)?.gt(&encode_real(ctx, env, right)?)),
            VerifyOp::Lt => Ok(encode_real(ctx, env, left)?.lt(&encode_real(ctx, env, right)?)),
            VerifyOp::Gte => Ok(encode_real(ctx, env, left)?.ge(&encode_real(ctx, env, right)?)),
            VerifyOp::Lte => Ok(encode_real(ctx, env, left)?.le(&encode_real(ctx, env, right)?)),
            VerifyOp::And => Ok(Bool::and(
                ctx,
                &[&encode_bool(ctx, env, left)?, &encode_bool(ctx, env, right)?],
            )),
            VerifyOp::Or => Ok(Bool::or(
                ctx,
                &[&encode_bool(ctx, env, left)?, &encode_bool(ctx, env, right)?],
            )),
            VerifyOp::Implies => Ok(encode_bool(ctx, env, left)?.implies(&encode_bool(ctx, env, right)?)),
            VerifyOp::Iff => Ok(encode_bool(ctx, env, left)?.iff(&encode_bool(ctx, env, right)?)),
            VerifyOp::Add | VerifyOp::Sub | VerifyOp::Mul | VerifyOp::Div | VerifyOp::Pow => {
                Err(VerifyError::SolverError {
                    message: format!("{op:?} is an arithmetic operator, not a formula"),
                })
            }
        },
        VerifyExpr::Var(_) | VerifyExpr::Num(_) | VerifyExpr::Neg(_) | VerifyExpr::Abs(_)
        | VerifyExpr::Min(_) | VerifyExpr::Max(_) => Err(VerifyError::SolverError {
            message: "expected a boolean expression, found an arithmetic one".to_string(),
        }),
    }
}

fn encode_quantifier<'ctx>(
    ctx: &'ctx Context,
    env: &mut Env<'ctx>,
    vars: &[(String, VerifySort)],
    body: &VerifyExpr,
    universal: bool,
) -> VerifyResult<Bool<'ctx>> {
    let bound = env.push_bound(vars);
    let body_bool = encode_bool(ctx, env, body);
    env.pop_bound();
    let body_bool = body_bool?;

    let bound_refs: Vec<&dyn Ast<'ctx>> = bound.iter().map(|v| v as &dyn Ast<'ctx>).collect();
    if universal {
        Ok(z3::ast::forall_const(ctx, &bound_refs, &[], &body_bool))
    } else {
        Ok(z3::ast::exists_const(ctx, &bound_refs, &[], &body_bool))
    }
}

fn encode_real<'ctx>(
    ctx: &'ctx Context,
    env: &mut Env<'ctx>,
    expr: &VerifyExpr,
) -> VerifyResult<Real<'ctx>> {
    match expr {
        VerifyExpr::Num(text) => encode_numeral(ctx, text),
        VerifyExpr::Var(name) => Ok(env.real(name)),
        VerifyExpr::Neg(inner) => Ok(-encode_real(ctx, env, inner)?),
        VerifyExpr::Abs(inner) => {
            let x = encode_real(ctx, env, inner)?;
            let zero = Real::from_real(ctx, 0, 1);
            let negated = -(x.clone());
            Ok(x.ge(&zero).ite(&x, &negated))
        }
        VerifyExpr::Min(args) => fold_extremum(ctx, env, args, true),
        VerifyExpr::Max(args) => fold_extremum(ctx, env, args, false),
        VerifyExpr::Binary { op, left, right } => {
            let l = encode_real(ctx, env, left)?;
            let r = encode_real(ctx, env, right)?;
            match op {
                VerifyOp::Add => Ok(l + r),
                VerifyOp::Sub => Ok(l - r),
                VerifyOp::Mul => Ok(l * r),
                VerifyOp::Div => Ok(l / r),
                VerifyOp::Pow => Ok(l.power(&r)),
                _ => Err(VerifyError::SolverError {
                    message: format!("{op:?} is a formula operator, not arithmetic"),
                }),
            }
        }
        VerifyExpr::Bool(_) | VerifyExpr::Not(_) | VerifyExpr::ForAll { .. } | VerifyExpr::Exists { .. } => {
            Err(VerifyError::SolverError {
                message: "expected an arithmetic expression, found a formula".to_string(),
            })
        }
    }
}

fn fold_extremum<'ctx>(
    ctx: &'ctx Context,
    env: &mut Env<'ctx>,
    args: &[VerifyExpr],
    minimum: bool,
) -> VerifyResult<Real<'ctx>> {
    if args.len() < 2 {
        return Err(VerifyError::Arity {
            what: if minimum { "min" } else { "max" },
            found: args.len(),
        });
    }
    let mut encoded = args
        .iter()
        .map(|a| encode_real(ctx, env, a))
        .collect::<VerifyResult<Vec<_>>>()?
        .into_iter();
    let mut result = encoded.next().expect("checked len >= 2 above");
    for other in encoded {
        result = if minimum {
            result.le(&other).ite(&result, &other)
        } else {
            result.ge(&other).ite(&result, &other)
        };
    }
    Ok(result)
}

/// Build an exact rational for a numeral's source text (`spec.md` §3:
/// literals are "preserved verbatim and handed to the solver as an
/// exact rational"). The lexer only ever produces unsigned digits with
/// at most one `.` (`lexer::lex_number`), so there is no sign to strip
/// and the whole part is never empty.
///
/// An integer literal goes through [`z3::ast::Int::from_str`], which
/// parses arbitrary-precision decimal text the same way Z3's numeral
/// constructor does, then [`z3::ast::Int::to_real`] — no `i32`/`f64`
/// round-trip to overflow on a large literal. A decimal literal is
/// turned into an exact numerator/denominator pair from its digit
/// count (`"3.25"` -> `325 / 100`) and built with
/// [`Real::from_real_str`], which likewise parses arbitrary-precision
/// decimal strings rather than machine-sized integers.
fn encode_numeral<'ctx>(ctx: &'ctx Context, text: &str) -> VerifyResult<Real<'ctx>> {
    let bad_literal = || VerifyError::SolverError {
        message: format!("'{text}' is not a valid numeric literal"),
    };
    match text.split_once('.') {
        None => {
            let value = z3::ast::Int::from_str(ctx, text).ok_or_else(bad_literal)?;
            Ok(value.to_real())
        }
        Some((whole, frac)) => {
            let numerator = format!("{whole}{frac}");
            let denominator = format!("1{}", "0".repeat(frac.len()));
            Real::from_real_str(ctx, &numerator, &denominator).ok_or_else(bad_literal)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sorts(pairs: &[(&str, VerifySort)]) -> HashMap<String, VerifySort> {
        pairs.iter().map(|(n, s)| (n.to_string(), *s)).collect()
    }

    #[test]
    fn sum_of_two_positives_is_positive() {
        let verifier = Verifier::new(SolverConfig::default());
        let x = VerifyExpr::var("x");
        let y = VerifyExpr::var("y");
        let claim = VerifyExpr::gt(VerifyExpr::binary(VerifyOp::Add, x.clone(), y.clone()), VerifyExpr::num("0"));
        let assumptions = VerifyExpr::and(
            VerifyExpr::gt(x, VerifyExpr::num("0")),
            VerifyExpr::gt(y, VerifyExpr::num("0")),
        );
        let goal = VerifyExpr::implies(assumptions, claim);
        let var_sorts = sorts(&[("x", VerifySort::Real), ("y", VerifySort::Real)]);

        let result = verifier.check_valid(&goal, &var_sorts).unwrap();
        assert_eq!(result, SatResult::Unsat);
    }

    #[test]
    fn x_greater_than_ten_is_not_valid_on_its_own() {
        let verifier = Verifier::new(SolverConfig::default());
        let x = VerifyExpr::var("x");
        let claim = VerifyExpr::gt(x, VerifyExpr::num("10"));
        let var_sorts = sorts(&[("x", VerifySort::Real)]);

        let result = verifier.check_valid(&claim, &var_sorts).unwrap();
        assert!(matches!(result, SatResult::Sat(_)));
    }

    #[test]
    fn int_variable_is_promoted_for_arithmetic() {
        let verifier = Verifier::new(SolverConfig::default());
        let n = VerifyExpr::var("n");
        let claim = VerifyExpr::gte(n.clone(), VerifyExpr::num("0"));
        let goal = VerifyExpr::implies(VerifyExpr::gte(n, VerifyExpr::num("0")), claim);
        let var_sorts = sorts(&[("n", VerifySort::Int)]);

        let result = verifier.check_valid(&goal, &var_sorts).unwrap();
        assert_eq!(result, SatResult::Unsat);
    }

    #[test]
    fn forall_over_reals_holds() {
        let verifier = Verifier::new(SolverConfig::default());
        let x = VerifyExpr::var("x");
        let body = VerifyExpr::eq(
            VerifyExpr::binary(VerifyOp::Add, x.clone(), VerifyExpr::num("0")),
            x,
        );
        let claim = VerifyExpr::forall(vec![("x".to_string(), VerifySort::Real)], body);

        let result = verifier.check_valid(&claim, &HashMap::new()).unwrap();
        assert_eq!(result, SatResult::Unsat);
    }
}
