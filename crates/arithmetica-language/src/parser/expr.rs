//! Expression- and formula-level grammar: precedence climbing from
//! `implies`/`iff` (loosest) down through relations, additive and
//! multiplicative terms, to atoms (`spec.md` §4.2 grammar table).
//!
//! The original DSL is dynamically typed, so a parenthesised group like
//! `(x > 0 or y > 0)` and one like `(x + y)` are the same kind of node
//! until something downstream inspects its shape. A statically typed
//! [`Term`]/[`Formula`] split can't defer that choice, so
//! [`Parser::parse_relation`] speculatively tries the group as a
//! formula first and backtracks to arithmetic grouping if that fails —
//! see [`Parser::try_parenthesized_formula`].

use super::{PResult, Parser};
use crate::ast::{ArithOp, Formula, RelOp, Term};
use crate::error::ParseError;
use crate::token::TokenKind;
use arithmetica_lexicon::FunctionName;

impl Parser {
    pub(super) fn parse_formula(&mut self) -> PResult<Formula> {
        self.parse_implies()
    }

    /// `implies`/`iff`, right-associative, loosest binding. `iff` is its
    /// own connective rather than an alias folded into `implies`.
    fn parse_implies(&mut self) -> PResult<Formula> {
        let left = self.parse_or()?;
        match self.current().kind {
            TokenKind::Implies => {
                self.advance();
                let right = self.parse_implies()?;
                Ok(Formula::implies(left, right))
            }
            TokenKind::Iff => {
                self.advance();
                let right = self.parse_implies()?;
                Ok(Formula::iff(left, right))
            }
            _ => Ok(left),
        }
    }

    fn parse_or(&mut self) -> PResult<Formula> {
        let mut args = vec![self.parse_and()?];
        while self.at(&TokenKind::Or) {
            self.advance();
            args.push(self.parse_and()?);
        }
        Ok(if args.len() == 1 {
            args.into_iter().next().unwrap()
        } else {
            Formula::Or(args)
        })
    }

    fn parse_and(&mut self) -> PResult<Formula> {
        let mut args = vec![self.parse_not()?];
        while self.at(&TokenKind::And) {
            self.advance();
            args.push(self.parse_not()?);
        }
        Ok(if args.len() == 1 {
            args.into_iter().next().unwrap()
        } else {
            Formula::And(args)
        })
    }

    fn parse_not(&mut self) -> PResult<Formula> {
        if self.at(&TokenKind::Not) {
            self.advance();
            let inner = self.parse_not()?;
            return Ok(Formula::not(inner));
        }
        self.parse_quantifier()
    }

    fn parse_quantifier(&mut self) -> PResult<Formula> {
        let kind = self.current().kind.clone();
        if matches!(kind, TokenKind::Forall | TokenKind::Exists) {
            self.advance();
            let mut vars = vec![self.expect_identifier()?];
            while self.at(&TokenKind::Comma) {
                self.advance();
                vars.push(self.expect_identifier()?);
            }
            self.expect(TokenKind::Dot)?;
            for v in &vars {
                self.declare_var(v);
            }
            let body = Box::new(self.parse_formula()?);
            return Ok(if matches!(kind, TokenKind::Forall) {
                Formula::Forall { vars, body }
            } else {
                Formula::Exists { vars, body }
            });
        }
        self.parse_relation()
    }

    /// Relational expressions, including chained comparisons: `0 < x <=
    /// y` desugars to `(0 < x) and (x <= y)` (`spec.md` §4.2 "chained
    /// comparisons"). Also the landing point for the three atomic
    /// formula shapes that aren't built from a relational operator:
    /// parenthesised sub-formulas, and the `true`/`false` literals.
    fn parse_relation(&mut self) -> PResult<Formula> {
        if self.at(&TokenKind::LParen) {
            if let Some(formula) = self.try_parenthesized_formula() {
                return Ok(formula);
            }
        }
        if self.at(&TokenKind::True) {
            self.advance();
            return Ok(Formula::truth());
        }
        if self.at(&TokenKind::False) {
            self.advance();
            return Ok(Formula::falsehood());
        }

        let left = self.parse_expr()?;
        if rel_op(&self.current().kind).is_none() {
            let tok = self.current().clone();
            return Err(ParseError::new(
                format!("expected a relational operator, found {}", tok.describe()),
                tok.span,
            ));
        }

        let mut comparisons = Vec::new();
        let mut current_left = left;
        while let Some(op) = rel_op(&self.current().kind) {
            self.advance();
            let right = self.parse_expr()?;
            comparisons.push(Formula::relation(op, current_left.clone(), right.clone()));
            current_left = right;
        }

        Ok(if comparisons.len() == 1 {
            comparisons.into_iter().next().unwrap()
        } else {
            Formula::And(comparisons)
        })
    }

    /// Tries `"(" formula ")"` starting at the current `(`, restoring
    /// the cursor and returning `None` on any failure (including a
    /// clean parse that wasn't followed by the matching `)`) so the
    /// caller falls back to treating the group as an arithmetic term.
    fn try_parenthesized_formula(&mut self) -> Option<Formula> {
        let checkpoint = self.pos;
        self.advance(); // '('
        match self.parse_formula() {
            Ok(inner) if self.at(&TokenKind::RParen) => {
                self.advance();
                Some(inner)
            }
            _ => {
                self.pos = checkpoint;
                None
            }
        }
    }

    pub(super) fn parse_expr(&mut self) -> PResult<Term> {
        let mut left = self.parse_term()?;
        loop {
            let op = match self.current().kind {
                TokenKind::Plus => ArithOp::Add,
                TokenKind::Minus => ArithOp::Sub,
                _ => break,
            };
            self.advance();
            let right = self.parse_term()?;
            left = Term::binary(op, left, right);
        }
        Ok(left)
    }

    fn parse_term(&mut self) -> PResult<Term> {
        let mut left = self.parse_power()?;
        loop {
            let op = match self.current().kind {
                TokenKind::Star => ArithOp::Mul,
                TokenKind::Slash => ArithOp::Div,
                _ => break,
            };
            self.advance();
            let right = self.parse_power()?;
            left = Term::binary(op, left, right);
        }
        Ok(left)
    }

    fn parse_power(&mut self) -> PResult<Term> {
        let base = self.parse_unary()?;
        if self.at(&TokenKind::Caret) {
            self.advance();
            let exponent = self.parse_power()?; // right-associative
            return Ok(Term::pow(base, exponent));
        }
        Ok(base)
    }

    fn parse_unary(&mut self) -> PResult<Term> {
        if self.at(&TokenKind::Minus) {
            self.advance();
            let inner = self.parse_unary()?;
            return Ok(Term::neg(inner));
        }
        self.parse_atom()
    }

    fn parse_atom(&mut self) -> PResult<Term> {
        let tok = self.current().clone();
        match tok.kind {
            TokenKind::Number(text) => {
                self.advance();
                Ok(Term::number(text))
            }
            TokenKind::Identifier(name) => {
                self.advance();
                self.declare_var(&name);
                Ok(Term::var(name))
            }
            TokenKind::Function(func) => {
                self.advance();
                self.expect(TokenKind::LParen)?;
                let mut args = vec![self.parse_expr()?];
                while self.at(&TokenKind::Comma) {
                    self.advance();
                    args.push(self.parse_expr()?);
                }
                self.expect(TokenKind::RParen)?;
                self.build_call(func, args, tok.span)
            }
            TokenKind::LParen => {
                self.advance();
                let inner = self.parse_expr()?;
                self.expect(TokenKind::RParen)?;
                Ok(inner)
            }
            TokenKind::Pipe => {
                self.advance();
                let inner = self.parse_expr()?;
                self.expect(TokenKind::Pipe)?;
                Ok(Term::Abs(Box::new(inner)))
            }
            _ => Err(ParseError::new(
                format!("unexpected token: {}", tok.describe()),
                tok.span,
            )),
        }
    }

    fn build_call(
        &self,
        func: FunctionName,
        mut args: Vec<Term>,
        span: arithmetica_base::Span,
    ) -> PResult<Term> {
        match func {
            FunctionName::Abs => {
                require_arity(&args, 1, "abs", span)?;
                Ok(Term::Abs(Box::new(args.remove(0))))
            }
            FunctionName::Sqrt => {
                require_arity(&args, 1, "sqrt", span)?;
                Ok(Term::Sqrt(Box::new(args.remove(0))))
            }
            FunctionName::Min => {
                require_min_arity(&args, 2, "min", span)?;
                Ok(Term::Min(args))
            }
            FunctionName::Max => {
                require_min_arity(&args, 2, "max", span)?;
                Ok(Term::Max(args))
            }
        }
    }
}

fn require_arity(args: &[Term], expected: usize, name: &str, span: arithmetica_base::Span) -> PResult<()> {
    if args.len() != expected {
        return Err(ParseError::new(
            format!("{name}() takes {expected} argument(s), got {}", args.len()),
            span,
        ));
    }
    Ok(())
}

fn require_min_arity(args: &[Term], minimum: usize, name: &str, span: arithmetica_base::Span) -> PResult<()> {
    if args.len() < minimum {
        return Err(ParseError::new(
            format!("{name}() requires at least {minimum} arguments"),
            span,
        ));
    }
    Ok(())
}

fn rel_op(kind: &TokenKind) -> Option<RelOp> {
    Some(match kind {
        TokenKind::Lt => RelOp::Lt,
        TokenKind::Le => RelOp::Le,
        TokenKind::Eq => RelOp::Eq,
        TokenKind::Ne => RelOp::Ne,
        TokenKind::Gt => RelOp::Gt,
        TokenKind::Ge => RelOp::Ge,
        _ => return None,
    })
}
