//! String interning for identifiers seen during a single parse.
//!
//! The proof DSL reuses the same handful of variable names dozens of times
//! within one proof unit (`x` appears in the declaration, every assumption,
//! every step, the claim...). Interning keeps those comparisons to integer
//! equality during lexing instead of repeated string comparisons, the same
//! trade the teacher crate makes for its (much larger) English vocabulary.
//!
//! Interning is purely a lexer-side optimization here: once the parser
//! builds the AST it resolves symbols back to owned `String`s, since the
//! external proof-unit interface (`spec.md` §3/§6) is defined in terms of
//! plain variable names, not interner handles.

use std::collections::HashMap;

/// A handle into an [`Interner`]'s table. Cheap to copy and compare.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Symbol(u32);

/// Interns strings for the lifetime of a single parse.
#[derive(Debug, Default)]
pub struct Interner {
    strings: Vec<String>,
    lookup: HashMap<String, Symbol>,
}

impl Interner {
    pub fn new() -> Self {
        Self::default()
    }

    /// Interns `text`, returning its `Symbol`. Repeated interning of the
    /// same text returns the same `Symbol`.
    pub fn intern(&mut self, text: &str) -> Symbol {
        if let Some(sym) = self.lookup.get(text) {
            return *sym;
        }
        let id = Symbol(self.strings.len() as u32);
        self.strings.push(text.to_string());
        self.lookup.insert(text.to_string(), id);
        id
    }

    /// Resolves a `Symbol` back to its text.
    pub fn resolve(&self, symbol: Symbol) -> &str {
        &self.strings[symbol.0 as usize]
    }
}

/// Equality between two symbols interned from the same [`Interner`].
pub trait SymbolEq {
    fn same(&self, other: &Self) -> bool;
}

impl SymbolEq for Symbol {
    fn same(&self, other: &Self) -> bool {
        self == other
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn interning_the_same_text_twice_returns_the_same_symbol() {
        let mut interner = Interner::new();
        let a = interner.intern("x");
        let b = interner.intern("x");
        assert_eq!(a, b);
    }

    #[test]
    fn distinct_text_interns_to_distinct_symbols() {
        let mut interner = Interner::new();
        let a = interner.intern("x");
        let b = interner.intern("y");
        assert_ne!(a, b);
    }

    #[test]
    fn resolve_round_trips_the_original_text() {
        let mut interner = Interner::new();
        let sym = interner.intern("epsilon");
        assert_eq!(interner.resolve(sym), "epsilon");
    }
}
