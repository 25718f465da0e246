//! Symbolic keys
//!
//! ## Closed-world lookup
//! A `Symbol` wraps a `&'static str`, so only names written in the program
//! (in practice, record field declarations) can ever be symbols. Textual
//! keys from untrusted input are resolved through a `SymbolTable` and are
//! dropped when unknown. Nothing here turns runtime text into a new symbol.

use std::borrow::Borrow;
use std::collections::HashSet;
use std::fmt;

use parking_lot::RwLock;

/// An interned field name
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Symbol(&'static str);

impl Symbol {
    pub const fn from_static(name: &'static str) -> Self {
        Symbol(name)
    }

    pub const fn as_str(&self) -> &'static str {
        self.0
    }
}

// Hash/Eq on Symbol delegate to the inner str, so lookups by &str are sound.
impl Borrow<str> for Symbol {
    fn borrow(&self) -> &str {
        self.0
    }
}

impl fmt::Display for Symbol {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.0)
    }
}

/// A key of an untyped document: either already symbolic or raw text
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Key {
    Symbol(Symbol),
    Text(String),
}

impl Key {
    pub fn text(text: impl Into<String>) -> Self {
        Key::Text(text.into())
    }

    pub const fn symbol(name: &'static str) -> Self {
        Key::Symbol(Symbol::from_static(name))
    }

    pub fn as_str(&self) -> &str {
        match self {
            Key::Symbol(sym) => sym.as_str(),
            Key::Text(text) => text,
        }
    }

    pub fn as_symbol(&self) -> Option<Symbol> {
        match self {
            Key::Symbol(sym) => Some(*sym),
            Key::Text(_) => None,
        }
    }
}

impl From<Symbol> for Key {
    fn from(sym: Symbol) -> Self {
        Key::Symbol(sym)
    }
}

impl From<&str> for Key {
    fn from(text: &str) -> Self {
        Key::Text(text.to_string())
    }
}

impl From<String> for Key {
    fn from(text: String) -> Self {
        Key::Text(text)
    }
}

impl fmt::Display for Key {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Key::Symbol(sym) => write!(f, ":{}", sym),
            Key::Text(text) => write!(f, "{:?}", text),
        }
    }
}

/// The set of symbols known to the process.
///
/// Shared between threads; registration takes the write lock, lookups the
/// read lock.
#[derive(Debug, Default)]
pub struct SymbolTable {
    known: RwLock<HashSet<Symbol>>,
}

impl SymbolTable {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_symbols(symbols: impl IntoIterator<Item = Symbol>) -> Self {
        let table = Self::new();
        table.register_all(symbols);
        table
    }

    /// Returns true if the symbol was not known before
    pub fn register(&self, symbol: Symbol) -> bool {
        self.known.write().insert(symbol)
    }

    pub fn register_all(&self, symbols: impl IntoIterator<Item = Symbol>) {
        let mut known = self.known.write();
        known.extend(symbols);
    }

    /// Resolve text to a known symbol. Never registers anything.
    pub fn lookup(&self, text: &str) -> Option<Symbol> {
        self.known.read().get(text).copied()
    }

    pub fn contains(&self, symbol: Symbol) -> bool {
        self.known.read().contains(&symbol)
    }

    pub fn len(&self) -> usize {
        self.known.read().len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}
