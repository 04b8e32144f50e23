//! Character stream to token stream (`spec.md` §4.1).
//!
//! Whitespace and `#`-comments are discarded; newlines survive as explicit
//! [`TokenKind::Newline`] tokens because the parser uses them as statement
//! separators and as error-recovery anchors. A lexical error is fatal —
//! unlike the parser, the lexer never recovers.

use crate::error::LexError;
use crate::token::{Token, TokenKind};
use arithmetica_base::Span;
use arithmetica_lexicon::{classify, IdentClass, Keyword};

pub struct Lexer<'a> {
    chars: Vec<char>,
    pos: usize,
    line: u32,
    column: u32,
    _source: &'a str,
}

impl<'a> Lexer<'a> {
    pub fn new(source: &'a str) -> Self {
        Self {
            chars: source.chars().collect(),
            pos: 0,
            line: 1,
            column: 1,
            _source: source,
        }
    }

    /// Lexes the entire source, returning the token stream (always ending
    /// in [`TokenKind::Eof`]) or the first unmatchable character.
    pub fn tokenize(mut self) -> Result<Vec<Token>, LexError> {
        let mut tokens = Vec::new();
        loop {
            match self.next_token()? {
                Some(tok) => {
                    let is_eof = tok.kind == TokenKind::Eof;
                    tokens.push(tok);
                    if is_eof {
                        break;
                    }
                }
                None => continue,
            }
        }
        Ok(tokens)
    }

    fn peek(&self) -> Option<char> {
        self.chars.get(self.pos).copied()
    }

    fn peek_at(&self, offset: usize) -> Option<char> {
        self.chars.get(self.pos + offset).copied()
    }

    fn span(&self) -> Span {
        Span::new(self.line, self.column)
    }

    fn advance(&mut self) -> Option<char> {
        let c = self.peek()?;
        self.pos += 1;
        if c == '\n' {
            self.line += 1;
            self.column = 1;
        } else {
            self.column += 1;
        }
        Some(c)
    }

    /// Lexes the next token, or `None` if the caller should loop again
    /// (used for skipped whitespace/comments — returning `Option` instead
    /// of recursing keeps the stack flat on long comment-only files).
    fn next_token(&mut self) -> Result<Option<Token>, LexError> {
        let Some(c) = self.peek() else {
            return Ok(Some(Token::new(TokenKind::Eof, "", self.span())));
        };

        if c == '\n' {
            let span = self.span();
            self.advance();
            return Ok(Some(Token::new(TokenKind::Newline, "\n", span)));
        }

        if c == ' ' || c == '\t' || c == '\r' {
            self.advance();
            return Ok(None);
        }

        if c == '#' {
            while let Some(c) = self.peek() {
                if c == '\n' {
                    break;
                }
                self.advance();
            }
            return Ok(None);
        }

        if c == '"' {
            return self.lex_string().map(Some);
        }

        if c.is_ascii_digit() {
            return Ok(Some(self.lex_number()));
        }

        if c.is_alphabetic() || c == '_' {
            return Ok(Some(self.lex_identifier()));
        }

        self.lex_punctuation().map(Some)
    }

    fn lex_string(&mut self) -> Result<Token, LexError> {
        let span = self.span();
        self.advance(); // opening quote
        let mut text = String::new();
        loop {
            match self.peek() {
                None | Some('\n') => {
                    return Err(LexError::new("unterminated string literal", span));
                }
                Some('"') => {
                    self.advance();
                    break;
                }
                Some(c) => {
                    text.push(c);
                    self.advance();
                }
            }
        }
        let display = format!("\"{text}\"");
        Ok(Token::new(TokenKind::String(text), display, span))
    }

    fn lex_number(&mut self) -> Token {
        let span = self.span();
        let start = self.pos;
        while matches!(self.peek(), Some(c) if c.is_ascii_digit()) {
            self.advance();
        }
        if self.peek() == Some('.') && matches!(self.peek_at(1), Some(c) if c.is_ascii_digit()) {
            self.advance(); // '.'
            while matches!(self.peek(), Some(c) if c.is_ascii_digit()) {
                self.advance();
            }
        }
        let text: String = self.chars[start..self.pos].iter().collect();
        Token::new(TokenKind::Number(text.clone()), text, span)
    }

    fn lex_identifier(&mut self) -> Token {
        let span = self.span();
        let start = self.pos;
        while matches!(self.peek(), Some(c) if c.is_alphanumeric() || c == '_') {
            self.advance();
        }
        let text: String = self.chars[start..self.pos].iter().collect();
        let kind = match classify(&text) {
            IdentClass::Keyword(kw) => keyword_token(kw),
            IdentClass::SetAtom(atom) => TokenKind::SetAtom(atom),
            IdentClass::Function(func) => TokenKind::Function(func),
            IdentClass::Plain => TokenKind::Identifier(text.clone()),
        };
        Token::new(kind, text, span)
    }

    fn lex_punctuation(&mut self) -> Result<Token, LexError> {
        let span = self.span();
        let c = self.peek().expect("checked by caller");
        let two_char = self.peek_at(1);

        macro_rules! one {
            ($kind:expr) => {{
                self.advance();
                Ok(Token::new($kind, c.to_string(), span))
            }};
        }
        macro_rules! two {
            ($kind:expr, $text:expr) => {{
                self.advance();
                self.advance();
                Ok(Token::new($kind, $text, span))
            }};
        }

        match (c, two_char) {
            ('<', Some('=')) => two!(TokenKind::Le, "<="),
            ('>', Some('=')) => two!(TokenKind::Ge, ">="),
            ('!', Some('=')) => two!(TokenKind::Ne, "!="),
            ('=', Some('>')) => two!(TokenKind::Implies, "=>"),
            ('<', _) => one!(TokenKind::Lt),
            ('>', _) => one!(TokenKind::Gt),
            ('=', _) => one!(TokenKind::Eq),
            ('+', _) => one!(TokenKind::Plus),
            ('-', _) => one!(TokenKind::Minus),
            ('*', _) => one!(TokenKind::Star),
            ('/', _) => one!(TokenKind::Slash),
            ('^', _) => one!(TokenKind::Caret),
            ('(', _) => one!(TokenKind::LParen),
            (')', _) => one!(TokenKind::RParen),
            (',', _) => one!(TokenKind::Comma),
            (':', _) => one!(TokenKind::Colon),
            ('.', _) => one!(TokenKind::Dot),
            ('|', _) => one!(TokenKind::Pipe),
            (other, _) => Err(LexError::new(format!("unexpected character '{other}'"), span)),
        }
    }
}

fn keyword_token(kw: Keyword) -> TokenKind {
    match kw {
        Keyword::Assume => TokenKind::Assume,
        Keyword::Prove => TokenKind::Prove,
        Keyword::Have => TokenKind::Have,
        Keyword::Assert => TokenKind::Assert,
        Keyword::Let => TokenKind::Let,
        Keyword::Theorem => TokenKind::Theorem,
        Keyword::Apply => TokenKind::Apply,
        Keyword::Import => TokenKind::Import,
        Keyword::Cases => TokenKind::Cases,
        Keyword::Case => TokenKind::Case,
        Keyword::And => TokenKind::And,
        Keyword::Or => TokenKind::Or,
        Keyword::Not => TokenKind::Not,
        Keyword::Implies => TokenKind::Implies,
        Keyword::Iff => TokenKind::Iff,
        Keyword::Forall => TokenKind::Forall,
        Keyword::Exists => TokenKind::Exists,
        Keyword::True => TokenKind::True,
        Keyword::False => TokenKind::False,
        Keyword::Int => TokenKind::Int,
        Keyword::Real => TokenKind::Real,
        Keyword::In => TokenKind::In,
    }
}
