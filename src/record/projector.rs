//! RecordProjector implementation
//!
//! Turns untyped keyed data into typed records. Textual keys are resolved
//! against known symbols only, narrowed to the target schema's field set,
//! and handed to the record type's validating constructor.

use std::collections::HashMap;

use parking_lot::RwLock;
use serde_json::Value;
use tracing::{debug, trace};

use super::document::{Document, UntypedMap};
use super::schema::{self, Record, RecordSchema};
use crate::collection::KeyedCollection;
use crate::config::Config;
use crate::error::{FieldkitError, Result};
use crate::symbol::{Key, Symbol, SymbolTable};

/// Schema registry plus the projection operations built on it
///
/// ## Concurrency
/// Registration and projection may run from many threads at once; the
/// registry and symbol table each sit behind their own RwLock. Projection
/// itself only reads.
#[derive(Debug)]
pub struct RecordProjector {
    /// Projection configuration
    config: Config,

    /// Every field name of every registered schema
    symbols: SymbolTable,

    /// Registered schemas by name
    schemas: RwLock<HashMap<&'static str, &'static RecordSchema>>,
}

impl RecordProjector {
    pub fn new(config: Config) -> Self {
        Self {
            config,
            symbols: SymbolTable::new(),
            schemas: RwLock::new(HashMap::new()),
        }
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    pub fn symbols(&self) -> &SymbolTable {
        &self.symbols
    }

    // =========================================================================
    // Registry
    // =========================================================================

    pub fn register<R: Record>(&self) {
        self.register_schema(R::schema());
    }

    /// Make a schema resolvable by name and its field names known symbols
    pub fn register_schema(&self, schema: &'static RecordSchema) {
        self.symbols.register_all(schema.fields());

        let previous = self.schemas.write().insert(schema.name(), schema);
        if previous.is_none() {
            debug!(
                schema = schema.name(),
                fields = schema.field_defs().len(),
                "Registered record schema"
            );
        }
    }

    pub fn schema(&self, name: &str) -> Option<&'static RecordSchema> {
        self.schemas.read().get(name).copied()
    }

    // =========================================================================
    // Projection
    // =========================================================================

    /// Resolve textual keys to known symbols, dropping unknown ones.
    ///
    /// Symbolic keys pass through. A typed record is returned untouched.
    /// If a text key and a symbolic key land on the same symbol in a
    /// Mapping, the symbolic entry wins.
    pub fn normalize_keys(&self, document: impl Into<Document>) -> Document {
        match document.into() {
            Document::Typed(record) => Document::Typed(record),
            Document::Untyped(map) => {
                Document::Untyped(self.normalize_with(map, |text| self.symbols.lookup(text)))
            }
        }
    }

    /// Normalize, then keep exactly the fields `schema` declares.
    ///
    /// The result is always a symbol-keyed Mapping. A PairSequence input
    /// keeps the first occurrence of each key.
    pub fn project_fields(&self, document: impl Into<Document>, schema: &RecordSchema) -> UntypedMap {
        KeyedCollection::Mapping(
            self.project(document.into(), schema)
                .into_iter()
                .map(|(sym, value)| (Key::Symbol(sym), value))
                .collect(),
        )
    }

    /// Build a record of type `R` from the document's projected fields
    pub fn build<R: Record>(&self, document: impl Into<Document>) -> Result<R> {
        let fields = self.project(document.into(), R::schema());
        self.construct(fields)
    }

    /// Overlay the document's projected fields on a copy of `existing`.
    ///
    /// Fields the document does not mention keep their current values.
    pub fn merge<R: Record>(&self, existing: &R, document: impl Into<Document>) -> Result<R> {
        let mut fields = schema::deconstruct(existing)?;
        fields.extend(self.project(document.into(), R::schema()));
        self.construct(fields)
    }

    // =========================================================================
    // Internals
    // =========================================================================

    fn project(&self, document: Document, schema: &RecordSchema) -> HashMap<Symbol, Value> {
        let normalized = match document {
            Document::Typed(record) => record.into_fields(),
            Document::Untyped(map) => self
                .normalize_with(map, |text| {
                    schema.field_named(text).or_else(|| self.symbols.lookup(text))
                })
                .into_mapping()
                .into_iter()
                .filter_map(|(key, value)| key.as_symbol().map(|sym| (sym, value)))
                .collect(),
        };

        normalized
            .into_iter()
            .filter(|(sym, _)| {
                let keep = schema.has_field(*sym);
                if !keep {
                    self.dropped(sym.as_str(), "not a declared field");
                }
                keep
            })
            .collect()
    }

    fn normalize_with(
        &self,
        map: UntypedMap,
        lookup: impl Fn(&str) -> Option<Symbol>,
    ) -> UntypedMap {
        let resolve = |key: Key| -> Option<Symbol> {
            match key {
                Key::Symbol(sym) => Some(sym),
                Key::Text(text) => self.resolve_text(&text, &lookup),
            }
        };

        match map {
            KeyedCollection::Mapping(entries) => {
                let mut out = HashMap::with_capacity(entries.len());
                let mut symbolic = Vec::new();

                for (key, value) in entries {
                    match key {
                        Key::Symbol(sym) => symbolic.push((sym, value)),
                        text => {
                            if let Some(sym) = resolve(text) {
                                out.insert(Key::Symbol(sym), value);
                            }
                        }
                    }
                }
                for (sym, value) in symbolic {
                    out.insert(Key::Symbol(sym), value);
                }

                KeyedCollection::Mapping(out)
            }
            KeyedCollection::PairSequence(pairs) => KeyedCollection::PairSequence(
                pairs
                    .into_iter()
                    .filter_map(|(key, value)| resolve(key).map(|sym| (Key::Symbol(sym), value)))
                    .collect(),
            ),
        }
    }

    fn resolve_text(&self, text: &str, lookup: &impl Fn(&str) -> Option<Symbol>) -> Option<Symbol> {
        if text.len() > self.config.max_text_key_len {
            if self.config.trace_dropped_keys {
                debug!(key_len = text.len(), "Dropped oversized textual key");
            }
            return None;
        }

        let found = lookup(text);
        if found.is_none() {
            self.dropped(text, "unknown symbol");
        }
        found
    }

    fn dropped(&self, key: &str, reason: &'static str) {
        if self.config.trace_dropped_keys {
            debug!(key, reason, "Dropped key during projection");
        }
    }

    fn construct<R: Record>(&self, fields: HashMap<Symbol, Value>) -> Result<R> {
        let name = R::schema().name();
        let field_count = fields.len();

        match schema::construct::<R>(fields) {
            Ok(record) => {
                trace!(schema = name, fields = field_count, "Constructed record");
                Ok(record)
            }
            Err(e) => {
                if let FieldkitError::RequiredFieldsUnsatisfied(_) = e {
                    debug!(schema = name, "Required fields unsatisfied");
                }
                Err(e)
            }
        }
    }
}

impl Default for RecordProjector {
    fn default() -> Self {
        Self::new(Config::default())
    }
}
