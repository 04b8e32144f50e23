//! # arithmetica-base
//!
//! Pure structural atoms shared across the arithmetica proof-checker
//! crates: source spans, a spanned-error type, and a string interner.
//!
//! This crate has no knowledge of the proof DSL's grammar or vocabulary —
//! higher-level crates build on top of it.

pub mod error;
pub mod intern;
pub mod span;

pub use error::{Result, SpannedError};
pub use intern::{Interner, Symbol, SymbolEq};
pub use span::Span;
