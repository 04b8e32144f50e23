//! `import "path.proof"` resolution (`spec.md` §4.2 "Imports").
//!
//! Imports are resolved eagerly and recursively during parsing, single
//! phase: there is no separate link step. A shared, reference-counted
//! set of already-imported canonical paths guards against cycles —
//! re-importing a file already seen anywhere in the import graph is a
//! silent no-op, matching the original DSL's behaviour.

use super::{PResult, Parser};
use crate::error::ParseError;
use crate::lexer::Lexer;
use crate::token::TokenKind;
use std::path::PathBuf;

impl Parser {
    pub(super) fn parse_import(&mut self) -> PResult<()> {
        self.advance(); // 'import'
        let path_tok = self.current().clone();
        let TokenKind::String(raw_path) = path_tok.kind.clone() else {
            return Err(ParseError::new(
                format!("expected a string literal, found {}", path_tok.describe()),
                path_tok.span,
            ));
        };
        self.advance();

        let joined = {
            let raw = PathBuf::from(&raw_path);
            if raw.is_absolute() {
                raw
            } else {
                self.base_dir.join(raw)
            }
        };

        if !joined.exists() {
            return Err(ParseError::new(
                format!("import file not found: {}", joined.display()),
                path_tok.span,
            ));
        }
        let canonical = joined.canonicalize().unwrap_or(joined);

        if !self.imported_files.borrow_mut().insert(canonical.clone()) {
            return Ok(()); // already imported somewhere in this graph
        }

        let source = std::fs::read_to_string(&canonical).map_err(|e| {
            ParseError::new(
                format!("error importing {}: {e}", canonical.display()),
                path_tok.span,
            )
        })?;

        let tokens = Lexer::new(&source).tokenize().map_err(|e| {
            ParseError::new(format!("error importing {}: {e}", canonical.display()), path_tok.span)
        })?;

        let mut imported = Parser::new(
            tokens,
            canonical.parent().map(PathBuf::from).unwrap_or_default(),
        );
        imported.imported_files = self.imported_files.clone();

        // A library file has no claim requirement: run the statement
        // loop directly (no recovery) so the first bad statement fails
        // the whole import, exactly as it would fail the whole parse
        // if it were inlined.
        imported.skip_newlines();
        while !imported.at(&TokenKind::Eof) {
            imported.parse_statement().map_err(|e| {
                ParseError::new(
                    format!("error importing {}: {e}", canonical.display()),
                    path_tok.span,
                )
            })?;
            imported.skip_newlines();
        }

        self.theorems.extend(imported.theorems);
        Ok(())
    }
}
