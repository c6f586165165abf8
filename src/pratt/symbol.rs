//! Interned token kinds
//!
//!     Every token carries a [`Symbol`] naming its kind. Symbols are interned by a
//!     [`SymbolTable`]: asking for the same text twice yields the same symbol, and two
//!     symbols compare equal only when they come from the same interning. Equality and
//!     hashing are by identity, so comparing token kinds never touches their text.
//!
//!     A handful of symbols are predefined in every table. They name the token classes
//!     the lexer produces without a registered punctuator: end of input, names, numbers,
//!     strings and unrecognised input. Their texts start with `#`, but whether a symbol is
//!     predefined is decided by identity: a grammar may still register `#` or `#[` as
//!     punctuators.
//!
//!     The table is mutated only while a grammar is being configured. Once parsing starts
//!     it is read through shared references, which keeps a finished grammar `Sync`.

use serde::{Serialize, Serializer};
use std::collections::HashMap;
use std::fmt;
use std::hash::{Hash, Hasher};
use std::sync::Arc;

pub const EOF: &str = "#eof";
pub const NAME: &str = "#name";
pub const NUMBER: &str = "#number";
pub const STRING: &str = "#string";
pub const INVALID: &str = "#invalid";

/// An interned token kind with identity-based equality.
#[derive(Clone)]
pub struct Symbol(Arc<str>);

impl Symbol {
    /// The text this symbol was interned from (the punctuator for operators).
    pub fn punctuator(&self) -> &str {
        &self.0
    }

    fn address(&self) -> usize {
        Arc::as_ptr(&self.0) as *const u8 as usize
    }
}

impl PartialEq for Symbol {
    fn eq(&self, other: &Self) -> bool {
        Arc::ptr_eq(&self.0, &other.0)
    }
}

impl Eq for Symbol {}

impl Hash for Symbol {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.address().hash(state);
    }
}

impl fmt::Debug for Symbol {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Symbol({})", self.0)
    }
}

impl fmt::Display for Symbol {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl Serialize for Symbol {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.0)
    }
}

/// The symbols every table starts with.
#[derive(Debug, Clone)]
pub struct Predefined {
    pub eof: Symbol,
    pub name: Symbol,
    pub number: Symbol,
    pub string: Symbol,
    pub invalid: Symbol,
}

impl Predefined {
    /// Whether `symbol` is one of these token classes.
    pub fn contains(&self, symbol: &Symbol) -> bool {
        [&self.eof, &self.name, &self.number, &self.string, &self.invalid]
            .into_iter()
            .any(|predefined| predefined == symbol)
    }
}

/// Interns token kinds for one grammar.
#[derive(Debug, Clone)]
pub struct SymbolTable {
    symbols: HashMap<String, Symbol>,
    predefined: Predefined,
}

impl SymbolTable {
    pub fn new() -> Self {
        let mut symbols = HashMap::new();
        let mut make = |text: &str| {
            let symbol = Symbol(Arc::from(text));
            symbols.insert(text.to_string(), symbol.clone());
            symbol
        };
        let predefined = Predefined {
            eof: make(EOF),
            name: make(NAME),
            number: make(NUMBER),
            string: make(STRING),
            invalid: make(INVALID),
        };
        Self {
            symbols,
            predefined,
        }
    }

    /// Intern `text`, returning the existing symbol when it was interned before.
    pub fn intern(&mut self, text: &str) -> Symbol {
        if let Some(symbol) = self.symbols.get(text) {
            return symbol.clone();
        }
        let symbol = Symbol(Arc::from(text));
        self.symbols.insert(text.to_string(), symbol.clone());
        symbol
    }

    pub fn get(&self, text: &str) -> Option<Symbol> {
        self.symbols.get(text).cloned()
    }

    pub fn predefined(&self) -> &Predefined {
        &self.predefined
    }

    pub fn len(&self) -> usize {
        self.symbols.len()
    }

    pub fn is_empty(&self) -> bool {
        self.symbols.is_empty()
    }
}

impl Default for SymbolTable {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_intern_is_idempotent() {
        let mut table = SymbolTable::new();
        let first = table.intern("+");
        let second = table.intern("+");
        assert_eq!(first, second);
        assert_eq!(first.punctuator(), "+");
    }

    #[test]
    fn test_distinct_texts_are_distinct_symbols() {
        let mut table = SymbolTable::new();
        assert_ne!(table.intern("+"), table.intern("-"));
    }

    #[test]
    fn test_equality_is_identity_not_text() {
        let mut a = SymbolTable::new();
        let mut b = SymbolTable::new();
        // Same text, different configurations
        assert_ne!(a.intern("+"), b.intern("+"));
    }

    #[test]
    fn test_predefined_symbols() {
        let mut table = SymbolTable::new();
        let name = table.predefined().name.clone();
        assert_eq!(table.intern(NAME), name);
        assert!(table.predefined().contains(&name));
        let keyword = table.intern("if");
        assert!(!table.predefined().contains(&keyword));
        assert_eq!(table.len(), 6);
    }

    #[test]
    fn test_hash_texts_are_not_predefined() {
        let mut table = SymbolTable::new();
        for text in ["#", "#[", "##"] {
            let symbol = table.intern(text);
            assert!(!table.predefined().contains(&symbol), "{text}");
        }
    }

    #[test]
    fn test_get_does_not_intern() {
        let table = SymbolTable::new();
        assert!(table.get("+").is_none());
        assert!(table.get(EOF).is_some());
    }
}
