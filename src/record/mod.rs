//! Record Module
//!
//! Projection of untyped keyed data onto statically declared record types.
//!
//! ## Responsibilities
//! - Declare record schemas (closed field set, required subset)
//! - Resolve textual keys against known symbols only
//! - Narrow input to a schema's fields
//! - Construct records, never yielding one with an unset required field
//!
//! ## Flow
//! ```text
//!   Document ──normalize_keys──▶ symbol keys ──project_fields──▶ schema fields
//!                                                                    │
//!                                             build / merge ◀────────┘
//!                                                   │
//!                                                   ▼
//!                                     Record  or  RequiredFieldsUnsatisfied
//! ```

mod document;
mod projector;
mod schema;

pub use document::{Document, TypedRecord, UntypedMap};
pub use projector::RecordProjector;
pub use schema::{FieldDef, Record, RecordSchema};
