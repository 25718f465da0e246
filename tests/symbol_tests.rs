//! Symbol Table Tests
//!
//! Tests verify:
//! - Lookup resolves registered names only
//! - Lookup never registers anything (closed world)
//! - Text and symbolic keys stay distinct
//! - Concurrent registration and lookup

use std::sync::Arc;
use std::thread;

use fieldkit::{Key, Symbol, SymbolTable};

const X: Symbol = Symbol::from_static("x");
const Y: Symbol = Symbol::from_static("y");

// =============================================================================
// Lookup Tests
// =============================================================================

#[test]
fn test_lookup_known_symbol() {
    let table = SymbolTable::with_symbols([X, Y]);

    assert_eq!(table.lookup("x"), Some(X));
    assert_eq!(table.lookup("y"), Some(Y));
}

#[test]
fn test_lookup_unknown_text_does_not_register() {
    let table = SymbolTable::with_symbols([X]);

    for _ in 0..100 {
        assert_eq!(table.lookup("attacker_controlled"), None);
    }
    assert_eq!(table.len(), 1);
    assert!(!table.contains(Symbol::from_static("attacker_controlled")));
}

#[test]
fn test_register_reports_new_symbols() {
    let table = SymbolTable::new();

    assert!(table.is_empty());
    assert!(table.register(X));
    assert!(!table.register(X));
    assert_eq!(table.len(), 1);
}

// =============================================================================
// Key Tests
// =============================================================================

#[test]
fn test_text_and_symbol_keys_differ() {
    assert_ne!(Key::text("x"), Key::Symbol(X));
    assert_eq!(Key::symbol("x"), Key::Symbol(X));
    assert_eq!(Key::from("x"), Key::text("x"));
    assert_eq!(Key::text("x").as_str(), Key::Symbol(X).as_str());
}

#[test]
fn test_key_as_symbol() {
    assert_eq!(Key::Symbol(X).as_symbol(), Some(X));
    assert_eq!(Key::text("x").as_symbol(), None);
}

#[test]
fn test_key_display() {
    assert_eq!(Key::Symbol(X).to_string(), ":x");
    assert_eq!(Key::text("x").to_string(), "\"x\"");
    assert_eq!(X.to_string(), "x");
}

// =============================================================================
// Concurrency Tests
// =============================================================================

#[test]
fn test_concurrent_register_and_lookup() {
    const NAMES: [&str; 4] = ["a", "b", "c", "d"];
    let table = Arc::new(SymbolTable::new());

    let handles: Vec<_> = NAMES
        .iter()
        .map(|&name| {
            let table = Arc::clone(&table);
            thread::spawn(move || {
                table.register(Symbol::from_static(name));
                for _ in 0..100 {
                    assert_eq!(table.lookup(name), Some(Symbol::from_static(name)));
                    assert_eq!(table.lookup("never"), None);
                }
            })
        })
        .collect();

    for handle in handles {
        handle.join().unwrap();
    }

    assert_eq!(table.len(), NAMES.len());
}
