//! End-to-end tests for turning column lists into struct models.
//!
//! These exercise the public API the way a renderer would: parse a settings
//! document, pick a package, and build structs from catalog columns.

use std::collections::BTreeMap;

use pg_typegen::codegen::JSON_TAG;
use pg_typegen::core::identifier::enum_value_name;
use pg_typegen::{Column, FieldDefinition, Fqn, GenError, Settings, StructBuilder};

const SETTINGS: &str = r#"
version: "1"
packages:
  - name: db
  - name: prepared
    queries: testdata/ondeck/query
    emit_prepared_queries: true
  - name: ondeck
    queries: testdata/ondeck/query
    emit_json_tags: true
  - name: test_override
    emit_json_tags: true
    overrides:
      - go_type: example.com/pkg.CustomType
        column: foo.retyped
      - go_type: github.com/lib/pq.StringArray
        column: foo.languages
        array: true
"#;

fn settings() -> Settings {
    Settings::from_yaml(SETTINGS).unwrap()
}

fn foo() -> Fqn {
    Fqn::new("public", "foo")
}

fn field(name: &str, type_name: &str, tag: &str) -> FieldDefinition {
    FieldDefinition {
        name: name.to_string(),
        type_name: type_name.to_string(),
        tags: BTreeMap::from([(JSON_TAG.to_string(), tag.to_string())]),
    }
}

fn scenario_columns() -> Vec<Column> {
    vec![
        Column::new("other", "text").on(foo()),
        Column::new("count", "bigint").on(foo()),
        Column::new("count", "bigint").on(foo()),
        Column::new("tags", "text").array().on(foo()),
        Column::new("byte_seq", "bytea").on(foo()),
        Column::new("retyped", "text").on(foo()),
        Column::new("languages", "text").array().nullable().on(foo()),
    ]
}

// =============================================================================
// Struct Scenarios
// =============================================================================

#[test]
fn test_columns_to_struct() {
    let settings = settings();
    let builder = StructBuilder::new(&settings, "test_override").unwrap();

    let actual = builder.build("Foo", &scenario_columns()).unwrap();

    assert_eq!(actual.name, "Foo");
    assert_eq!(
        actual.fields,
        vec![
            field("Other", "string", "other"),
            field("Count", "int64", "count"),
            field("Count_2", "int64", "count_2"),
            field("Tags", "[]string", "tags"),
            field("ByteSeq", "[]byte", "byte_seq"),
            field("Retyped", "pkg.CustomType", "retyped"),
            field("Languages", "pq.StringArray", "languages"),
        ]
    );
    let imports: Vec<&str> = actual.imports.iter().map(String::as_str).collect();
    assert_eq!(imports, ["example.com/pkg", "github.com/lib/pq"]);
}

#[test]
fn test_overrides_are_package_local() {
    let settings = settings();
    let builder = StructBuilder::new(&settings, "ondeck").unwrap();

    let actual = builder.build("Foo", &scenario_columns()).unwrap();

    assert_eq!(actual.field("Retyped").unwrap().type_name, "string");
    assert_eq!(actual.field("Languages").unwrap().type_name, "[]string");
}

#[test]
fn test_no_tags_without_flag() {
    let settings = settings();
    let builder = StructBuilder::new(&settings, "prepared").unwrap();

    let actual = builder.build("Foo", &scenario_columns()).unwrap();

    assert!(actual.fields.iter().all(|f| f.tags.is_empty()));
    assert!(settings.package("prepared").unwrap().emit_prepared_queries);
}

#[test]
fn test_rebuild_is_identical() {
    let settings = settings();
    let builder = StructBuilder::new(&settings, "test_override").unwrap();
    let cols = scenario_columns();

    assert_eq!(
        builder.build("Foo", &cols).unwrap(),
        builder.build("Foo", &cols).unwrap()
    );
}

#[test]
fn test_nth_duplicate_naming() {
    let settings = settings();
    let builder = StructBuilder::new(&settings, "ondeck").unwrap();
    let cols: Vec<Column> = (0..5)
        .map(|_| Column::new("total_count", "int4").on(foo()))
        .collect();

    let actual = builder.build("Totals", &cols).unwrap();

    for (i, f) in actual.fields.iter().enumerate().skip(1) {
        let n = i + 1;
        assert_eq!(f.name, format!("TotalCount_{}", n));
        assert_eq!(f.tag(JSON_TAG), Some(format!("total_count_{}", n).as_str()));
    }
}

// =============================================================================
// Override Precedence
// =============================================================================

#[test]
fn test_column_override_beats_type_override() {
    let yaml = r#"
version: "1"
packages:
  - name: db
    overrides:
      - go_type: example.com/text.Text
        postgres_type: text
overrides:
  - go_type: example.com/pkg.CustomType
    column: foo.retyped
"#;
    let settings = Settings::from_yaml(yaml).unwrap();
    let builder = StructBuilder::new(&settings, "db").unwrap();

    let actual = builder
        .build(
            "Foo",
            &[
                Column::new("retyped", "text").on(foo()),
                Column::new("other", "text").on(foo()),
            ],
        )
        .unwrap();

    assert_eq!(actual.fields[0].type_name, "pkg.CustomType");
    assert_eq!(actual.fields[1].type_name, "text.Text");
}

#[test]
fn test_array_override_on_scalar_column_is_rejected() {
    let settings = settings();
    let builder = StructBuilder::new(&settings, "test_override").unwrap();

    let err = builder
        .build("Foo", &[Column::new("languages", "text").on(foo())])
        .unwrap_err();

    assert!(err.is_configuration());
    assert!(matches!(err, GenError::OverrideShapeMismatch { .. }));
}

#[test]
fn test_column_rule_shape_selects_matching_rule() {
    let local_scalar = r#"
version: "1"
packages:
  - name: db
    overrides:
      - go_type: example.com/pkg.Tag
        column: foo.tags
overrides:
  - go_type: github.com/lib/pq.StringArray
    column: foo.tags
    array: true
"#;
    let local_array = r#"
version: "1"
packages:
  - name: db
    overrides:
      - go_type: github.com/lib/pq.StringArray
        column: foo.tags
        array: true
overrides:
  - go_type: example.com/pkg.Tag
    column: foo.tags
"#;

    for yaml in [local_scalar, local_array] {
        let settings = Settings::from_yaml(yaml).unwrap();
        let builder = StructBuilder::new(&settings, "db").unwrap();

        let array = builder
            .build("Foo", &[Column::new("tags", "text").array().on(foo())])
            .unwrap();
        assert_eq!(array.fields[0].type_name, "pq.StringArray");

        let scalar = builder
            .build("Foo", &[Column::new("tags", "text").on(foo())])
            .unwrap();
        assert_eq!(scalar.fields[0].type_name, "pkg.Tag");
    }
}

#[test]
fn test_scalar_override_on_array_column_uses_builtin() {
    let yaml = r#"
version: "1"
packages:
  - name: db
    overrides:
      - go_type: github.com/lib/pq.StringArray
        column: foo.languages
"#;
    let settings = Settings::from_yaml(yaml).unwrap();
    let builder = StructBuilder::new(&settings, "db").unwrap();

    let actual = builder
        .build(
            "Foo",
            &[Column::new("languages", "text").array().nullable().on(foo())],
        )
        .unwrap();

    assert_eq!(actual.fields[0].type_name, "[]string");
    assert!(actual.imports.is_empty());
}

// =============================================================================
// Type Mapping Properties
// =============================================================================

#[test]
fn test_unknown_type_is_never_defaulted() {
    let settings = settings();
    let builder = StructBuilder::new(&settings, "db").unwrap();

    for sql_type in ["tsvector", "point", "pg_catalog.interval", "public.missing_enum"] {
        let err = builder
            .build("Foo", &[Column::new("c", sql_type).on(foo())])
            .unwrap_err();
        match err {
            GenError::UnsupportedType { sql_type: got, column } => {
                assert_eq!(got, sql_type);
                assert_eq!(column, "public.foo.c");
            }
            other => panic!("unexpected error for {}: {:?}", sql_type, other),
        }
    }
}

#[test]
fn test_nullability_only_switches_type() {
    let settings = settings();
    let builder = StructBuilder::new(&settings, "db").unwrap();

    let actual = builder
        .build(
            "Foo",
            &[
                Column::new("a", "pg_catalog.int4").on(foo()),
                Column::new("b", "pg_catalog.int4").nullable().on(foo()),
                Column::new("c", "timestamptz").on(foo()),
                Column::new("d", "timestamptz").nullable().on(foo()),
            ],
        )
        .unwrap();

    let types: Vec<&str> = actual.fields.iter().map(|f| f.type_name.as_str()).collect();
    assert_eq!(types, ["int32", "sql.NullInt32", "time.Time", "sql.NullTime"]);
}

// =============================================================================
// Enum Labels
// =============================================================================

#[test]
fn test_enum_value_names() {
    let values = [
        // Valid separators
        ("foo-bar", "FooBar"),
        ("foo_bar", "FooBar"),
        ("foo:bar", "FooBar"),
        ("foo/bar", "FooBar"),
        // Strip unknown characters
        ("foo@bar", "Foobar"),
        ("foo+bar", "Foobar"),
        ("foo!bar", "Foobar"),
    ];
    for (input, expected) in values {
        assert_eq!(enum_value_name(input), expected, "label {:?}", input);
    }
}

// =============================================================================
// Concurrency
// =============================================================================

#[test]
fn test_builders_share_settings_across_threads() {
    let settings = settings();
    let expected = StructBuilder::new(&settings, "test_override")
        .unwrap()
        .build("Foo", &scenario_columns())
        .unwrap();

    std::thread::scope(|scope| {
        let handles: Vec<_> = (0..4)
            .map(|_| {
                scope.spawn(|| {
                    let builder = StructBuilder::new(&settings, "test_override").unwrap();
                    builder.build("Foo", &scenario_columns()).unwrap()
                })
            })
            .collect();

        for handle in handles {
            assert_eq!(handle.join().unwrap(), expected);
        }
    });
}
