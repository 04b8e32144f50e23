//! Statement-level recursive-descent parser (`spec.md` §4.2).
//!
//! Parsing never aborts at the first bad statement: [`Parser::recover`]
//! skips to the next statement-starting keyword and parsing continues,
//! so a single call surfaces every error in the file rather than just
//! the first.

mod expr;
mod imports;

use crate::ast::{Case, Formula, ProofUnit, Step, Theorem, VarType};
use crate::error::{LanguageError, ParseError, ParseErrors};
use crate::lexer::Lexer;
use crate::token::{Token, TokenKind};
use arithmetica_base::Span;
use arithmetica_lexicon::SetAtom;
use std::cell::RefCell;
use std::collections::{BTreeMap, BTreeSet, HashSet};
use std::path::{Path, PathBuf};
use std::rc::Rc;

pub(crate) type PResult<T> = Result<T, ParseError>;

/// Statement-starting keywords, used both as a recovery anchor set and
/// to know where a `cases` block's case body ends.
const STATEMENT_STARTERS: &[TokenKind] = &[
    TokenKind::Assume,
    TokenKind::Prove,
    TokenKind::Have,
    TokenKind::Assert,
    TokenKind::Let,
    TokenKind::Theorem,
    TokenKind::Apply,
    TokenKind::Import,
    TokenKind::Cases,
];

pub struct Parser {
    tokens: Vec<Token>,
    pos: usize,
    vars: BTreeSet<String>,
    var_types: BTreeMap<String, VarType>,
    assumptions: Vec<Formula>,
    steps: Vec<Step>,
    claim: Option<Formula>,
    theorems: BTreeMap<String, Theorem>,
    base_dir: PathBuf,
    imported_files: Rc<RefCell<HashSet<PathBuf>>>,
    errors: Vec<ParseError>,
}

/// Parses a complete top-level proof file: lexes `source`, parses it
/// with error recovery, and requires a `prove` statement to have been
/// seen (`spec.md` §3 invariant).
pub fn parse_source(source: &str, base_dir: impl AsRef<Path>) -> Result<ProofUnit, LanguageError> {
    let tokens = Lexer::new(source).tokenize()?;
    let mut parser = Parser::new(tokens, base_dir.as_ref().to_path_buf());
    parser.run_with_recovery();

    if !parser.errors.is_empty() {
        return Err(ParseErrors(parser.errors).into());
    }
    let Some(claim) = parser.claim else {
        return Err(ParseErrors(vec![ParseError::new(
            "no 'prove' statement found",
            Span::default(),
        )])
        .into());
    };

    Ok(ProofUnit {
        vars: parser.vars,
        var_types: parser.var_types,
        assumptions: parser.assumptions,
        steps: parser.steps,
        claim,
        theorems: parser.theorems,
    })
}

impl Parser {
    fn new(tokens: Vec<Token>, base_dir: PathBuf) -> Self {
        Self {
            tokens,
            pos: 0,
            vars: BTreeSet::new(),
            var_types: BTreeMap::new(),
            assumptions: Vec::new(),
            steps: Vec::new(),
            claim: None,
            theorems: BTreeMap::new(),
            base_dir,
            imported_files: Rc::new(RefCell::new(HashSet::new())),
            errors: Vec::new(),
        }
    }

    fn current(&self) -> &Token {
        let last = self.tokens.last().expect("tokenize() always emits Eof");
        self.tokens.get(self.pos).unwrap_or(last)
    }

    fn advance(&mut self) -> Token {
        let tok = self.current().clone();
        if self.pos < self.tokens.len() - 1 {
            self.pos += 1;
        }
        tok
    }

    fn at(&self, kind: &TokenKind) -> bool {
        self.current().kind == *kind
    }

    fn expect(&mut self, kind: TokenKind) -> PResult<Token> {
        if self.current().kind == kind {
            Ok(self.advance())
        } else {
            let tok = self.current().clone();
            Err(ParseError::new(
                format!("expected {kind:?}, found {}", tok.describe()),
                tok.span,
            ))
        }
    }

    fn expect_identifier(&mut self) -> PResult<String> {
        match &self.current().kind {
            TokenKind::Identifier(name) => {
                let name = name.clone();
                self.advance();
                Ok(name)
            }
            _ => {
                let tok = self.current().clone();
                Err(ParseError::new(
                    format!("expected an identifier, found {}", tok.describe()),
                    tok.span,
                ))
            }
        }
    }

    fn skip_newlines(&mut self) {
        while self.at(&TokenKind::Newline) {
            self.advance();
        }
    }

    fn declare_var(&mut self, name: &str) {
        self.vars.insert(name.to_string());
    }

    /// Runs the statement loop with recovery: used both for the
    /// top-level file (claim required afterwards by the caller) and,
    /// via [`imports`], for a library file merged in by `import`.
    fn run_with_recovery(&mut self) {
        self.skip_newlines();
        while !self.at(&TokenKind::Eof) {
            if let Err(e) = self.parse_statement() {
                self.errors.push(e);
                self.recover_to_next_statement();
            }
            self.skip_newlines();
        }
    }

    fn recover_to_next_statement(&mut self) {
        while !self.at(&TokenKind::Eof) {
            if self.at(&TokenKind::Newline) {
                self.advance();
                if STATEMENT_STARTERS.contains(&self.current().kind) {
                    return;
                }
            } else {
                self.advance();
            }
        }
    }

    fn parse_statement(&mut self) -> PResult<()> {
        match self.current().kind.clone() {
            TokenKind::Assume => {
                self.advance();
                let formula = self.parse_formula()?;
                self.assumptions.push(formula);
                Ok(())
            }
            TokenKind::Prove => {
                self.advance();
                self.claim = Some(self.parse_formula()?);
                Ok(())
            }
            TokenKind::Have | TokenKind::Assert => {
                self.advance();
                let formula = self.parse_formula()?;
                self.steps.push(Step::Formula(formula));
                Ok(())
            }
            TokenKind::Let => self.parse_let(),
            TokenKind::Theorem => self.parse_theorem(),
            TokenKind::Apply => self.parse_apply(),
            TokenKind::Import => self.parse_import(),
            TokenKind::Cases => self.parse_cases(),
            _ => {
                let tok = self.current().clone();
                Err(ParseError::new(
                    format!(
                        "expected a statement keyword (assume, prove, have, let, theorem, \
                         apply, import, or cases), found {}",
                        tok.describe()
                    ),
                    tok.span,
                ))
            }
        }
    }

    fn parse_let(&mut self) -> PResult<()> {
        self.advance(); // 'let'
        let name = self.expect_identifier()?;
        let mut var_type = VarType::Real;
        let mut constraint: Option<(crate::ast::RelOp, &'static str)> = None;

        if self.at(&TokenKind::Colon) {
            self.advance();
            let tok = self.current().clone();
            var_type = match tok.kind {
                TokenKind::Int => {
                    self.advance();
                    VarType::Int
                }
                TokenKind::Real => {
                    self.advance();
                    VarType::Real
                }
                _ => {
                    return Err(ParseError::new(
                        format!("expected 'Int' or 'Real', found {}", tok.describe()),
                        tok.span,
                    ))
                }
            };
        }

        if self.at(&TokenKind::In) {
            self.advance();
            let tok = self.current().clone();
            let TokenKind::SetAtom(atom) = tok.kind else {
                return Err(ParseError::new(
                    format!("expected a set name (R, Z, N, Q), found {}", tok.describe()),
                    tok.span,
                ));
            };
            self.advance();

            let mut positive = false;
            if self.at(&TokenKind::Plus) {
                self.advance();
                positive = true;
            }

            use crate::ast::RelOp;
            (var_type, constraint) = match atom {
                SetAtom::R => (VarType::Real, positive.then_some((RelOp::Gt, "0"))),
                SetAtom::Z => (VarType::Int, positive.then_some((RelOp::Gt, "0"))),
                SetAtom::N => (
                    VarType::Int,
                    Some(if positive {
                        (RelOp::Gt, "0")
                    } else {
                        (RelOp::Ge, "0")
                    }),
                ),
                SetAtom::Q => (VarType::Real, positive.then_some((RelOp::Gt, "0"))),
            };
        }

        // Optional initializer: consumed and discarded, matching the
        // original DSL's "let x = 5" sugar (no constant propagation).
        if self.at(&TokenKind::Eq) {
            self.advance();
            self.parse_expr()?;
        }

        self.declare_var(&name);
        self.var_types.insert(name.clone(), var_type);

        if let Some((op, value)) = constraint {
            self.assumptions.push(Formula::relation(
                op,
                crate::ast::Term::var(name),
                crate::ast::Term::number(value),
            ));
        }
        Ok(())
    }

    fn parse_theorem(&mut self) -> PResult<()> {
        let name_tok = {
            self.advance(); // 'theorem'
            let tok = self.current().clone();
            self.expect_identifier()
                .map_err(|_| ParseError::new("expected a theorem name", tok.span))?
        };
        self.expect(TokenKind::Colon)?;
        self.skip_newlines();

        let saved_assumptions = std::mem::take(&mut self.assumptions);
        let saved_claim = self.claim.take();

        while !self.at(&TokenKind::Eof) && self.claim.is_none() {
            self.parse_statement()?;
            self.skip_newlines();
        }

        let Some(conclusion) = self.claim.take() else {
            return Err(ParseError::new(
                format!("theorem '{name_tok}' has no 'prove' statement"),
                self.current().span,
            ));
        };

        self.theorems.insert(
            name_tok,
            Theorem {
                assumptions: std::mem::take(&mut self.assumptions),
                conclusion,
            },
        );

        self.assumptions = saved_assumptions;
        self.claim = saved_claim;
        Ok(())
    }

    fn parse_apply(&mut self) -> PResult<()> {
        let tok = self.current().clone();
        self.advance(); // 'apply'
        let name = self.expect_identifier()?;
        let Some(theorem) = self.theorems.get(&name).cloned() else {
            return Err(ParseError::new(format!("unknown theorem: {name}"), tok.span));
        };

        let formula = if theorem.assumptions.is_empty() {
            theorem.conclusion
        } else if theorem.assumptions.len() == 1 {
            Formula::implies(theorem.assumptions[0].clone(), theorem.conclusion)
        } else {
            Formula::implies(Formula::And(theorem.assumptions), theorem.conclusion)
        };
        self.assumptions.push(formula);
        Ok(())
    }

    fn parse_cases(&mut self) -> PResult<()> {
        self.advance(); // 'cases'
        self.expect(TokenKind::Colon)?;
        self.skip_newlines();

        let mut cases = Vec::new();
        while self.at(&TokenKind::Case) {
            self.advance();
            let condition = self.parse_formula()?;
            self.expect(TokenKind::Colon)?;
            self.skip_newlines();

            let mut steps = Vec::new();
            loop {
                match self.current().kind {
                    TokenKind::Have | TokenKind::Assert => {
                        self.advance();
                        let formula = self.parse_formula()?;
                        steps.push(Step::Formula(formula));
                        self.skip_newlines();
                    }
                    TokenKind::Newline => {
                        self.advance();
                    }
                    // Anything else — another `case`, a new top-level
                    // statement, or end of input — ends this case's body.
                    _ => break,
                }
            }
            cases.push(Case { condition, steps });
        }

        if cases.is_empty() {
            return Err(ParseError::new(
                "cases block requires at least one 'case'",
                self.current().span,
            ));
        }
        self.steps.push(Step::Cases(cases));
        Ok(())
    }
}
