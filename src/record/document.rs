//! Projection inputs
//!
//! A `Document` is either untyped keyed data or a value that is already a
//! typed record. Normalization only ever touches the untyped kind.

use std::collections::HashMap;

use serde_json::Value;

use super::schema::{self, Record, RecordSchema};
use crate::collection::KeyedCollection;
use crate::error::Result;
use crate::symbol::{Key, Symbol};

/// Untyped keyed data with values of any shape
pub type UntypedMap = KeyedCollection<Key, Value>;

/// Input to the projector
#[derive(Debug, Clone, PartialEq)]
pub enum Document {
    Untyped(UntypedMap),
    Typed(TypedRecord),
}

impl Document {
    pub fn is_typed(&self) -> bool {
        matches!(self, Document::Typed(_))
    }
}

impl From<UntypedMap> for Document {
    fn from(map: UntypedMap) -> Self {
        Document::Untyped(map)
    }
}

impl From<HashMap<Key, Value>> for Document {
    fn from(map: HashMap<Key, Value>) -> Self {
        Document::Untyped(KeyedCollection::Mapping(map))
    }
}

impl From<TypedRecord> for Document {
    fn from(record: TypedRecord) -> Self {
        Document::Typed(record)
    }
}

/// A record instance carrying its own schema identity
#[derive(Debug, Clone, PartialEq)]
pub struct TypedRecord {
    schema: &'static RecordSchema,
    fields: HashMap<Symbol, Value>,
}

impl TypedRecord {
    pub fn from_record<R: Record>(record: &R) -> Result<Self> {
        Ok(Self {
            schema: R::schema(),
            fields: schema::deconstruct(record)?,
        })
    }

    pub fn schema(&self) -> &'static RecordSchema {
        self.schema
    }

    pub fn fields(&self) -> &HashMap<Symbol, Value> {
        &self.fields
    }

    pub fn into_fields(self) -> HashMap<Symbol, Value> {
        self.fields
    }
}
