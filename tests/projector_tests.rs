//! RecordProjector Tests
//!
//! Tests verify:
//! - Closed-world key normalization
//! - Typed records pass through normalization untouched
//! - Projection narrows to declared fields and is idempotent
//! - build/merge enforce required fields with one stable error
//! - Schema registry lookup

use std::collections::HashMap;

use fieldkit::record::UntypedMap;
use fieldkit::{
    Config, Document, FieldDef, FieldkitError, Key, KeyedCollection, Record, RecordProjector,
    RecordSchema, Symbol, TypedRecord,
};
use serde::{Deserialize, Serialize};
use serde_json::{json, Value};

// =============================================================================
// Fixtures
// =============================================================================

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
struct Point {
    x: i64,
    y: i64,
}

static POINT_SCHEMA: RecordSchema =
    RecordSchema::new("Point", &[FieldDef::required("x"), FieldDef::required("y")]);

impl Record for Point {
    fn schema() -> &'static RecordSchema {
        &POINT_SCHEMA
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
struct Profile {
    name: String,
    #[serde(default)]
    email: Option<String>,
    #[serde(default)]
    visits: u32,
}

static PROFILE_SCHEMA: RecordSchema = RecordSchema::new(
    "Profile",
    &[
        FieldDef::required("name"),
        FieldDef::optional("email"),
        FieldDef::optional("visits"),
    ],
);

impl Record for Profile {
    fn schema() -> &'static RecordSchema {
        &PROFILE_SCHEMA
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
struct Tag {
    #[serde(default)]
    label: String,
}

static TAG_SCHEMA: RecordSchema = RecordSchema::new("Tag", &[FieldDef::optional("label")]);

impl Record for Tag {
    fn schema() -> &'static RecordSchema {
        &TAG_SCHEMA
    }
}

/// Declares `z` optional while the type itself cannot do without it
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
struct Strict {
    z: i64,
}

static STRICT_SCHEMA: RecordSchema = RecordSchema::new("Strict", &[FieldDef::optional("z")]);

impl Record for Strict {
    fn schema() -> &'static RecordSchema {
        &STRICT_SCHEMA
    }
}

fn projector() -> RecordProjector {
    let projector = RecordProjector::default();
    projector.register::<Point>();
    projector.register::<Profile>();
    projector
}

fn text_map(pairs: &[(&str, Value)]) -> UntypedMap {
    KeyedCollection::Mapping(
        pairs
            .iter()
            .map(|(k, v)| (Key::text(*k), v.clone()))
            .collect::<HashMap<_, _>>(),
    )
}

fn sym(name: &'static str) -> Key {
    Key::symbol(name)
}

// =============================================================================
// normalize_keys Tests
// =============================================================================

#[test]
fn test_normalize_converts_known_text_keys() {
    let p = projector();

    let normalized = p.normalize_keys(text_map(&[("x", json!(1)), ("name", json!("ann"))]));

    let expected = KeyedCollection::Mapping(HashMap::from([
        (sym("x"), json!(1)),
        (sym("name"), json!("ann")),
    ]));
    assert_eq!(normalized, Document::Untyped(expected));
}

#[test]
fn test_normalize_drops_unknown_text_keys_without_registering() {
    let p = projector();
    let before = p.symbols().len();

    let normalized = p.normalize_keys(text_map(&[("x", json!(1)), ("bogus", json!(2))]));

    let Document::Untyped(map) = normalized else {
        panic!("expected untyped document");
    };
    assert_eq!(map.len(), 1);
    assert!(map.has_key(&sym("x")));
    assert_eq!(p.symbols().len(), before);
    assert_eq!(p.symbols().lookup("bogus"), None);
}

#[test]
fn test_normalize_passes_symbolic_keys_through() {
    let p = projector();
    let input = KeyedCollection::Mapping(HashMap::from([(sym("unregistered"), json!(1))]));

    let normalized = p.normalize_keys(input.clone());

    assert_eq!(normalized, Document::Untyped(input));
}

#[test]
fn test_normalize_symbolic_entry_wins_collision() {
    let p = projector();
    let input = KeyedCollection::Mapping(HashMap::from([
        (Key::text("x"), json!("text")),
        (sym("x"), json!("symbol")),
    ]));

    let Document::Untyped(map) = p.normalize_keys(input) else {
        panic!("expected untyped document");
    };
    assert_eq!(map.len(), 1);
    assert_eq!(map.fetch(&sym("x")), Some(&json!("symbol")));
}

#[test]
fn test_normalize_keeps_pair_sequence_shape() {
    let p = projector();
    let input: UntypedMap = KeyedCollection::PairSequence(vec![
        (Key::text("y"), json!(1)),
        (Key::text("nope"), json!(2)),
        (Key::text("x"), json!(3)),
        (Key::text("y"), json!(4)),
    ]);

    let normalized = p.normalize_keys(input);

    assert_eq!(
        normalized,
        Document::Untyped(KeyedCollection::PairSequence(vec![
            (sym("y"), json!(1)),
            (sym("x"), json!(3)),
            (sym("y"), json!(4)),
        ]))
    );
}

#[test]
fn test_normalize_leaves_typed_record_untouched() {
    let p = projector();
    let typed = TypedRecord::from_record(&Point { x: 1, y: 2 }).unwrap();

    let normalized = p.normalize_keys(typed.clone());

    assert!(normalized.is_typed());
    assert_eq!(normalized, Document::Typed(typed));
}

#[test]
fn test_normalize_drops_oversized_text_keys() {
    let config = Config::builder().max_text_key_len(1).trace_dropped_keys(true).build();
    let p = RecordProjector::new(config);
    p.register::<Profile>();

    let Document::Untyped(map) = p.normalize_keys(text_map(&[("name", json!("ann"))])) else {
        panic!("expected untyped document");
    };
    assert!(map.is_empty());
}

// =============================================================================
// project_fields Tests
// =============================================================================

#[test]
fn test_project_fields_narrows_to_schema() {
    let p = projector();

    let projected = p.project_fields(
        text_map(&[("x", json!(1)), ("name", json!("ann")), ("junk", json!(0))]),
        &POINT_SCHEMA,
    );

    assert_eq!(
        projected,
        KeyedCollection::Mapping(HashMap::from([(sym("x"), json!(1))]))
    );
}

#[test]
fn test_project_fields_is_idempotent() {
    let p = projector();
    let input = text_map(&[("x", json!(1)), ("y", json!(2)), ("email", json!("a@b"))]);

    let once = p.project_fields(input, &POINT_SCHEMA);
    let twice = p.project_fields(once.clone(), &POINT_SCHEMA);

    assert_eq!(once, twice);
}

#[test]
fn test_project_fields_pair_sequence_first_occurrence_wins() {
    let p = projector();
    let input: UntypedMap = KeyedCollection::PairSequence(vec![
        (Key::text("x"), json!(1)),
        (Key::text("x"), json!(2)),
    ]);

    let projected = p.project_fields(input, &POINT_SCHEMA);

    assert_eq!(projected.fetch(&sym("x")), Some(&json!(1)));
}

#[test]
fn test_project_fields_resolves_unregistered_schema_fields() {
    // Tag is never registered, but its own field names are known to it
    let p = projector();

    let projected = p.project_fields(text_map(&[("label", json!("red"))]), &TAG_SCHEMA);

    assert_eq!(projected.fetch(&sym("label")), Some(&json!("red")));
    assert_eq!(p.symbols().lookup("label"), None);
}

#[test]
fn test_project_fields_from_typed_record() {
    let p = projector();
    let typed = TypedRecord::from_record(&Profile {
        name: "ann".into(),
        email: None,
        visits: 3,
    })
    .unwrap();

    let projected = p.project_fields(typed, &POINT_SCHEMA);

    assert!(projected.is_empty());
}

// =============================================================================
// build Tests
// =============================================================================

#[test]
fn test_build_missing_required_field() {
    let p = projector();

    let result = p.build::<Point>(text_map(&[("x", json!(1))]));

    assert_eq!(result, Err(FieldkitError::RequiredFieldsUnsatisfied("Point")));
}

#[test]
fn test_build_same_error_whichever_field_is_missing() {
    let p = projector();

    let missing_x = p.build::<Point>(text_map(&[("y", json!(1))])).unwrap_err();
    let missing_y = p.build::<Point>(text_map(&[("x", json!(1))])).unwrap_err();
    let missing_both = p.build::<Point>(text_map(&[])).unwrap_err();

    assert_eq!(missing_x, missing_y);
    assert_eq!(missing_y, missing_both);
}

#[test]
fn test_build_null_required_field_is_unset() {
    let p = projector();

    let result = p.build::<Point>(text_map(&[("x", json!(1)), ("y", Value::Null)]));

    assert_eq!(result, Err(FieldkitError::RequiredFieldsUnsatisfied("Point")));
}

#[test]
fn test_build_success_ignores_unknown_fields() {
    let p = projector();

    let point = p
        .build::<Point>(text_map(&[("x", json!(1)), ("y", json!(2)), ("z", json!(3))]))
        .unwrap();

    assert_eq!(point, Point { x: 1, y: 2 });
}

#[test]
fn test_build_optional_fields_take_defaults() {
    let p = projector();

    let profile = p.build::<Profile>(text_map(&[("name", json!("ann"))])).unwrap();

    assert_eq!(
        profile,
        Profile {
            name: "ann".into(),
            email: None,
            visits: 0
        }
    );
}

#[test]
fn test_build_trivially_satisfiable_schema() {
    let p = projector();

    assert!(TAG_SCHEMA.is_trivially_satisfiable());
    assert_eq!(p.build::<Tag>(text_map(&[])), Ok(Tag { label: String::new() }));
}

#[test]
fn test_build_type_level_required_field_maps_to_same_error() {
    let p = projector();

    assert_eq!(
        p.build::<Strict>(text_map(&[])),
        Err(FieldkitError::RequiredFieldsUnsatisfied("Strict"))
    );
}

#[test]
fn test_build_wrong_value_type_is_malformed() {
    let p = projector();

    let result = p.build::<Point>(text_map(&[("x", json!("one")), ("y", json!(2))]));

    assert!(matches!(
        result,
        Err(FieldkitError::MalformedField { schema: "Point", .. })
    ));
}

#[test]
fn test_build_from_symbolic_keys() {
    let p = projector();
    let input = KeyedCollection::Mapping(HashMap::from([
        (sym("x"), json!(4)),
        (sym("y"), json!(5)),
    ]));

    assert_eq!(p.build::<Point>(input), Ok(Point { x: 4, y: 5 }));
}

#[test]
fn test_build_from_typed_record_of_other_schema() {
    #[derive(Debug, PartialEq, Serialize, Deserialize)]
    struct Point3 {
        x: i64,
        y: i64,
        z: i64,
    }

    static POINT3_SCHEMA: RecordSchema = RecordSchema::new(
        "Point3",
        &[
            FieldDef::required("x"),
            FieldDef::required("y"),
            FieldDef::required("z"),
        ],
    );

    impl Record for Point3 {
        fn schema() -> &'static RecordSchema {
            &POINT3_SCHEMA
        }
    }

    let p = projector();
    let typed = TypedRecord::from_record(&Point3 { x: 1, y: 2, z: 3 }).unwrap();

    assert_eq!(p.build::<Point>(typed), Ok(Point { x: 1, y: 2 }));
}

// =============================================================================
// merge Tests
// =============================================================================

#[test]
fn test_merge_overlays_projected_fields() {
    let p = projector();
    let existing = Point { x: 1, y: 2 };

    let merged = p.merge(&existing, text_map(&[("x", json!(9))])).unwrap();

    assert_eq!(merged, Point { x: 9, y: 2 });
    assert_eq!(existing, Point { x: 1, y: 2 });
}

#[test]
fn test_merge_ignores_unknown_fields() {
    let p = projector();
    let existing = Profile {
        name: "ann".into(),
        email: None,
        visits: 1,
    };

    let merged = p
        .merge(
            &existing,
            text_map(&[("visits", json!(2)), ("admin", json!(true))]),
        )
        .unwrap();

    assert_eq!(merged.visits, 2);
    assert_eq!(merged.name, "ann");
}

#[test]
fn test_merge_null_over_required_field_fails() {
    let p = projector();

    let result = p.merge(&Point { x: 1, y: 2 }, text_map(&[("y", Value::Null)]));

    assert_eq!(result, Err(FieldkitError::RequiredFieldsUnsatisfied("Point")));
}

#[test]
fn test_merge_empty_document_returns_copy() {
    let p = projector();
    let existing = Point { x: 3, y: 4 };

    assert_eq!(p.merge(&existing, text_map(&[])), Ok(existing.clone()));
}

// =============================================================================
// Registry Tests
// =============================================================================

#[test]
fn test_registry_lookup_by_name() {
    let p = projector();

    assert_eq!(p.schema("Point"), Some(&POINT_SCHEMA));
    assert_eq!(p.schema("Tag"), None);
}

#[test]
fn test_register_adds_field_symbols() {
    let p = RecordProjector::default();
    assert_eq!(p.symbols().lookup("x"), None);

    p.register::<Point>();

    assert_eq!(p.symbols().lookup("x"), Some(Symbol::from_static("x")));
    assert_eq!(p.symbols().len(), 2);
}

#[test]
fn test_schema_reflection() {
    let required: Vec<_> = PROFILE_SCHEMA.required().map(|s| s.as_str()).collect();
    let fields: Vec<_> = PROFILE_SCHEMA.fields().map(|s| s.as_str()).collect();

    assert_eq!(required, vec!["name"]);
    assert_eq!(fields, vec!["name", "email", "visits"]);
    assert_eq!(PROFILE_SCHEMA.field_named("email"), Some(Symbol::from_static("email")));
    assert_eq!(PROFILE_SCHEMA.field_named("nope"), None);
    assert!(!PROFILE_SCHEMA.is_trivially_satisfiable());
}
