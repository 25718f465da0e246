//! # fieldkit
//!
//! Generic data-access utilities for single-level, in-memory keyed data:
//! - One access contract over unique-key mappings and ordered pair sequences
//! - Closed-world projection of untyped data into typed records
//! - Required-field enforcement on every constructed record
//!
//! ## Architecture Overview
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────┐
//! │                     RecordProjector                          │
//! │        normalize_keys → project_fields → build / merge       │
//! └──────────────┬──────────────────────────────┬───────────────┘
//!                │                              │
//!                ▼                              ▼
//!   ┌────────────────────────┐      ┌────────────────────────┐
//!   │    KeyedCollection     │      │  SymbolTable + Schema  │
//!   │ Mapping | PairSequence │      │  registry (RwLock)     │
//!   └────────────────────────┘      └────────────────────────┘
//! ```

// =============================================================================
// Module Declarations
// =============================================================================

pub mod error;
pub mod config;

pub mod collection;
pub mod symbol;
pub mod record;
pub mod date;

// =============================================================================
// Public API Re-exports
// =============================================================================

pub use error::{FieldkitError, Result};
pub use config::Config;
pub use collection::{KeyedCollection, Pair};
pub use symbol::{Key, Symbol, SymbolTable};
pub use record::{Document, FieldDef, Record, RecordProjector, RecordSchema, TypedRecord};

// =============================================================================
// Version Info
// =============================================================================

/// Current version of fieldkit
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
