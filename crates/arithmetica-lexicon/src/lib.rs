//! # arithmetica-lexicon
//!
//! The closed vocabulary tables the lexer consults to classify an
//! identifier-shaped run of characters (`spec.md` §4.1): canonical
//! keywords, their English aliases, the four number-set atoms, and the
//! seven-turned-four function-call names actually used by this DSL
//! (`abs`, `sqrt`, `min`, `max`).
//!
//! This crate knows nothing about tokens, spans, or the parser — it is a
//! pure `&str -> classification` lookup, the same separation of concerns
//! the teacher crate draws between `logicaffeine-lexicon` (vocabulary)
//! and `logicaffeine-language` (token/parser types).

/// Canonical statement and connective keywords.
///
/// `Iff` is its own keyword rather than an alias for `Implies` — see
/// `SPEC_FULL.md`'s "Design-note resolutions" for why this departs from
/// the alias table in the original source.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Keyword {
    Assume,
    Prove,
    Have,
    Assert,
    Let,
    Theorem,
    Apply,
    Import,
    Cases,
    Case,
    And,
    Or,
    Not,
    Implies,
    Iff,
    Forall,
    Exists,
    True,
    False,
    Int,
    Real,
    In,
}

/// A number-set atom, as written after `in` in a `let` membership clause.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SetAtom {
    R,
    Z,
    N,
    Q,
}

/// One of the four function-call forms this DSL recognises as atoms.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FunctionName {
    Abs,
    Sqrt,
    Min,
    Max,
}

/// The outcome of classifying one identifier-shaped lexeme.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IdentClass {
    Keyword(Keyword),
    SetAtom(SetAtom),
    Function(FunctionName),
    Plain,
}

/// Classifies `text` against the four closed tables, in the priority
/// order `spec.md` §4.1 specifies: canonical keyword, keyword alias, set
/// atom, function name, else a plain identifier.
pub fn classify(text: &str) -> IdentClass {
    let lower = text.to_ascii_lowercase();

    if let Some(kw) = canonical_keyword(&lower) {
        return IdentClass::Keyword(kw);
    }
    if let Some(kw) = keyword_alias(&lower) {
        return IdentClass::Keyword(kw);
    }
    if let Some(atom) = set_atom(&lower) {
        return IdentClass::SetAtom(atom);
    }
    if let Some(func) = function_name(&lower) {
        return IdentClass::Function(func);
    }
    IdentClass::Plain
}

fn canonical_keyword(lower: &str) -> Option<Keyword> {
    Some(match lower {
        "assume" => Keyword::Assume,
        "prove" => Keyword::Prove,
        "have" => Keyword::Have,
        "assert" => Keyword::Assert,
        "let" => Keyword::Let,
        "theorem" => Keyword::Theorem,
        "apply" => Keyword::Apply,
        "import" => Keyword::Import,
        "cases" => Keyword::Cases,
        "case" => Keyword::Case,
        "and" => Keyword::And,
        "or" => Keyword::Or,
        "not" => Keyword::Not,
        "implies" => Keyword::Implies,
        "iff" => Keyword::Iff,
        "forall" => Keyword::Forall,
        "exists" => Keyword::Exists,
        "true" => Keyword::True,
        "false" => Keyword::False,
        "int" => Keyword::Int,
        "real" => Keyword::Real,
        "in" => Keyword::In,
        _ => return None,
    })
}

fn keyword_alias(lower: &str) -> Option<Keyword> {
    Some(match lower {
        "suppose" | "given" | "assuming" | "if" => Keyword::Assume,
        "show" | "therefore" | "thus" | "hence" | "conclude" | "qed" => Keyword::Prove,
        "then" | "so" | "know" | "note" | "observe" | "since" | "get" => Keyword::Have,
        "where" | "define" | "set" => Keyword::Let,
        "lemma" => Keyword::Theorem,
        "use" | "using" | "by" => Keyword::Apply,
        "when" | "whenever" => Keyword::Case,
        "all" | "every" | "each" => Keyword::Forall,
        "some" | "any" => Keyword::Exists,
        "but" => Keyword::And,
        _ => return None,
    })
}

fn set_atom(lower: &str) -> Option<SetAtom> {
    Some(match lower {
        "r" | "reals" => SetAtom::R,
        "z" | "integers" => SetAtom::Z,
        "n" | "naturals" => SetAtom::N,
        "q" | "rationals" => SetAtom::Q,
        _ => return None,
    })
}

fn function_name(lower: &str) -> Option<FunctionName> {
    Some(match lower {
        "abs" => FunctionName::Abs,
        "sqrt" => FunctionName::Sqrt,
        "min" => FunctionName::Min,
        "max" => FunctionName::Max,
        _ => return None,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn canonical_keywords_are_case_insensitive() {
        assert_eq!(classify("Assume"), IdentClass::Keyword(Keyword::Assume));
        assert_eq!(classify("ASSUME"), IdentClass::Keyword(Keyword::Assume));
    }

    #[test]
    fn aliases_fold_to_their_canonical_keyword() {
        assert_eq!(classify("suppose"), IdentClass::Keyword(Keyword::Assume));
        assert_eq!(classify("therefore"), IdentClass::Keyword(Keyword::Prove));
        assert_eq!(classify("lemma"), IdentClass::Keyword(Keyword::Theorem));
        assert_eq!(classify("but"), IdentClass::Keyword(Keyword::And));
        assert_eq!(classify("when"), IdentClass::Keyword(Keyword::Case));
    }

    #[test]
    fn iff_is_its_own_keyword_not_an_implies_alias() {
        assert_eq!(classify("iff"), IdentClass::Keyword(Keyword::Iff));
    }

    #[test]
    fn set_atoms_accept_long_forms() {
        assert_eq!(classify("R"), IdentClass::SetAtom(SetAtom::R));
        assert_eq!(classify("Reals"), IdentClass::SetAtom(SetAtom::R));
        assert_eq!(classify("naturals"), IdentClass::SetAtom(SetAtom::N));
    }

    #[test]
    fn function_names_are_recognised() {
        assert_eq!(classify("sqrt"), IdentClass::Function(FunctionName::Sqrt));
        assert_eq!(classify("max"), IdentClass::Function(FunctionName::Max));
    }

    #[test]
    fn unknown_identifiers_are_plain() {
        assert_eq!(classify("epsilon"), IdentClass::Plain);
        assert_eq!(classify("x"), IdentClass::Plain);
    }

    #[test]
    fn keyword_priority_beats_set_atom_and_function_tables() {
        // "in" is a keyword, not eligible to collide with set-atom/function tables.
        assert_eq!(classify("in"), IdentClass::Keyword(Keyword::In));
    }
}
