//! Record schemas and the record capability
//!
//! A schema names a record type's closed field set and marks which fields
//! are required. Record types implement `Record` and are constructed and
//! deconstructed through serde.

use std::collections::HashMap;

use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_json::{Map, Value};

use crate::error::{FieldkitError, Result};
use crate::symbol::Symbol;

/// One declared field
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FieldDef {
    name: Symbol,
    required: bool,
}

impl FieldDef {
    pub const fn required(name: &'static str) -> Self {
        Self {
            name: Symbol::from_static(name),
            required: true,
        }
    }

    pub const fn optional(name: &'static str) -> Self {
        Self {
            name: Symbol::from_static(name),
            required: false,
        }
    }

    pub fn name(&self) -> Symbol {
        self.name
    }

    pub fn is_required(&self) -> bool {
        self.required
    }
}

/// The declared field set of a record type
///
/// ```
/// use fieldkit::record::{FieldDef, RecordSchema};
///
/// static POINT: RecordSchema =
///     RecordSchema::new("Point", &[FieldDef::required("x"), FieldDef::required("y")]);
///
/// assert_eq!(POINT.required().count(), 2);
/// ```
#[derive(Debug, PartialEq, Eq)]
pub struct RecordSchema {
    name: &'static str,
    fields: &'static [FieldDef],
}

impl RecordSchema {
    pub const fn new(name: &'static str, fields: &'static [FieldDef]) -> Self {
        Self { name, fields }
    }

    pub fn name(&self) -> &'static str {
        self.name
    }

    pub fn field_defs(&self) -> &'static [FieldDef] {
        self.fields
    }

    pub fn fields(&self) -> impl Iterator<Item = Symbol> + '_ {
        self.fields.iter().map(FieldDef::name)
    }

    pub fn required(&self) -> impl Iterator<Item = Symbol> + '_ {
        self.fields
            .iter()
            .filter(|f| f.is_required())
            .map(FieldDef::name)
    }

    pub fn has_field(&self, symbol: Symbol) -> bool {
        self.fields.iter().any(|f| f.name == symbol)
    }

    /// The declared field spelled `text`, if any
    pub fn field_named(&self, text: &str) -> Option<Symbol> {
        self.fields
            .iter()
            .map(FieldDef::name)
            .find(|sym| sym.as_str() == text)
    }

    /// An empty field set already satisfies this schema
    pub fn is_trivially_satisfiable(&self) -> bool {
        self.fields.iter().all(|f| !f.is_required())
    }

    /// Present and non-null for every required field
    pub fn satisfied_by(&self, fields: &HashMap<Symbol, Value>) -> bool {
        self.required()
            .all(|sym| matches!(fields.get(&sym), Some(v) if !v.is_null()))
    }
}

/// A statically declared record type.
///
/// Non-required fields must deserialize when absent (`Option` or
/// `#[serde(default)]`); required ones must not.
pub trait Record: Serialize + DeserializeOwned {
    fn schema() -> &'static RecordSchema;
}

// =============================================================================
// Construction
// =============================================================================

/// Validating constructor: fails with `RequiredFieldsUnsatisfied` rather
/// than ever producing a record with an unset required field.
pub(crate) fn construct<R: Record>(fields: HashMap<Symbol, Value>) -> Result<R> {
    let schema = R::schema();

    if !schema.satisfied_by(&fields) {
        return Err(FieldkitError::RequiredFieldsUnsatisfied(schema.name()));
    }

    let object: Map<String, Value> = fields
        .into_iter()
        .map(|(sym, value)| (sym.as_str().to_string(), value))
        .collect();

    serde_json::from_value(Value::Object(object)).map_err(|e| {
        // The type itself may treat more fields as required than the schema
        // declares; that is still the same failure kind.
        if e.to_string().starts_with("missing field") {
            FieldkitError::RequiredFieldsUnsatisfied(schema.name())
        } else {
            FieldkitError::MalformedField {
                schema: schema.name(),
                reason: e.to_string(),
            }
        }
    })
}

/// Read a record's declared fields back out by symbol
pub(crate) fn deconstruct<R: Record>(record: &R) -> Result<HashMap<Symbol, Value>> {
    let schema = R::schema();
    let malformed = |reason: String| FieldkitError::MalformedField {
        schema: schema.name(),
        reason,
    };

    match serde_json::to_value(record).map_err(|e| malformed(e.to_string()))? {
        Value::Object(object) => Ok(object
            .into_iter()
            .filter_map(|(name, value)| schema.field_named(&name).map(|sym| (sym, value)))
            .collect()),
        other => Err(malformed(format!("expected an object, got {}", other))),
    }
}
