//! User-declared type overrides.
//!
//! An override replaces the built-in type mapping either for every column of
//! a SQL type or for one specific column. Raw declarations from the settings
//! document are parsed once, at configuration-build time, into an
//! [`OverrideRule`]; malformed declarations never reach generation.
//!
//! - [`OverrideRule::TypeDefault`]: matches by SQL type and nullability
//! - [`OverrideRule::Column`]: matches one scalar column
//! - [`OverrideRule::ArrayColumn`]: matches one array column

mod resolve;

pub use resolve::{resolve_column, resolve_type_default};

use std::fmt;

use crate::config::RawOverride;
use crate::core::schema::{Column, DEFAULT_SCHEMA};
use crate::error::{GenError, Result};

/// A parsed override rule.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum OverrideRule {
    /// Applies to every column of `sql_type` whose nullability equals `nullable`.
    TypeDefault {
        sql_type: String,
        nullable: bool,
        target: TargetType,
    },

    /// Applies to exactly one scalar column.
    Column {
        column: ColumnRef,
        target: TargetType,
    },

    /// Applies to exactly one array column.
    ArrayColumn {
        column: ColumnRef,
        target: TargetType,
    },
}

impl OverrideRule {
    /// Parse a raw declaration.
    ///
    /// # Errors
    ///
    /// Returns `GenError::Override` when the declaration sets both or neither
    /// of `column`/`postgres_type`, uses a flag that does not apply to its
    /// shape, or has a malformed `go_type` or `column` specifier.
    pub fn parse(raw: &RawOverride) -> Result<Self> {
        let entry = raw.describe();

        let target = TargetType::parse(&raw.go_type)?;

        match (&raw.column, &raw.postgres_type) {
            (Some(_), Some(_)) => Err(GenError::invalid_override(
                entry,
                "cannot specify both `column` and `postgres_type`",
            )),
            (None, None) => Err(GenError::invalid_override(
                entry,
                "must specify one of `column` or `postgres_type`",
            )),
            (Some(column), None) => {
                if raw.null {
                    return Err(GenError::invalid_override(
                        entry,
                        "`null` only applies to `postgres_type` overrides",
                    ));
                }
                let column = ColumnRef::parse(column)?;
                if raw.array {
                    Ok(OverrideRule::ArrayColumn { column, target })
                } else {
                    Ok(OverrideRule::Column { column, target })
                }
            }
            (None, Some(sql_type)) => {
                if raw.array {
                    return Err(GenError::invalid_override(
                        entry,
                        "`array` only applies to `column` overrides",
                    ));
                }
                if sql_type.trim().is_empty() {
                    return Err(GenError::invalid_override(entry, "`postgres_type` is empty"));
                }
                Ok(OverrideRule::TypeDefault {
                    sql_type: sql_type.clone(),
                    nullable: raw.null,
                    target,
                })
            }
        }
    }

    /// The type this rule substitutes.
    pub fn target(&self) -> &TargetType {
        match self {
            OverrideRule::TypeDefault { target, .. }
            | OverrideRule::Column { target, .. }
            | OverrideRule::ArrayColumn { target, .. } => target,
        }
    }
}

/// A target type named by an override, split into import path and type name.
///
/// `example.com/pkg.CustomType` becomes import path `example.com/pkg` and
/// emitted name `pkg.CustomType`.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct TargetType {
    /// Import path of the declaring package.
    pub import_path: String,

    /// Package name as referenced in generated code.
    pub package: String,

    /// Bare type name inside the package.
    pub type_name: String,
}

impl TargetType {
    /// Parse an `[import/path/]pkg.TypeName` string.
    ///
    /// The package name is the last path segment of the import path, with a
    /// leading `go-` or trailing `-go` removed
    /// (`github.com/segmentio/go-ksuid.KSUID` emits `ksuid.KSUID`).
    pub fn parse(entry: &str) -> Result<Self> {
        let last_dot = entry.rfind('.').ok_or_else(|| {
            GenError::invalid_override(
                entry,
                "`go_type` is not the proper format, expected 'package.Type', \
                 e.g. 'github.com/segmentio/ksuid.KSUID'",
            )
        })?;

        let import_path = &entry[..last_dot];
        let type_name = &entry[last_dot + 1..];

        if import_path.is_empty() {
            return Err(GenError::invalid_override(entry, "`go_type` has an empty import path"));
        }
        if type_name.is_empty() || type_name.contains('/') {
            return Err(GenError::invalid_override(
                entry,
                "`go_type` is not the proper format, expected a type name after the last '.'",
            ));
        }

        let mut package = import_path.rsplit('/').next().unwrap_or(import_path);
        if let Some(rest) = package.strip_prefix("go-") {
            package = rest;
        }
        if let Some(rest) = package.strip_suffix("-go") {
            package = rest;
        }

        if package.is_empty() {
            return Err(GenError::invalid_override(entry, "`go_type` has an empty package name"));
        }

        Ok(Self {
            import_path: import_path.to_string(),
            package: package.to_string(),
            type_name: type_name.to_string(),
        })
    }

    /// The `pkg.TypeName` form used in generated code.
    pub fn qualified(&self) -> String {
        format!("{}.{}", self.package, self.type_name)
    }
}

impl fmt::Display for TargetType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}.{}", self.package, self.type_name)
    }
}

/// Reference to one column, as written in an override's `column` key.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ColumnRef {
    pub catalog: Option<String>,
    pub schema: String,
    pub table: String,
    pub column: String,
}

impl ColumnRef {
    /// Parse `table.column`, `schema.table.column`, or
    /// `catalog.schema.table.column`. The schema defaults to `public`.
    pub fn parse(entry: &str) -> Result<Self> {
        let parts: Vec<&str> = entry.split('.').collect();

        if parts.iter().any(|p| p.is_empty()) {
            return Err(Self::malformed(entry));
        }

        let column_ref = match parts.as_slice() {
            [table, column] => Self {
                catalog: None,
                schema: DEFAULT_SCHEMA.to_string(),
                table: table.to_string(),
                column: column.to_string(),
            },
            [schema, table, column] => Self {
                catalog: None,
                schema: schema.to_string(),
                table: table.to_string(),
                column: column.to_string(),
            },
            [catalog, schema, table, column] => Self {
                catalog: Some(catalog.to_string()),
                schema: schema.to_string(),
                table: table.to_string(),
                column: column.to_string(),
            },
            _ => return Err(Self::malformed(entry)),
        };

        Ok(column_ref)
    }

    /// Whether this reference names `col`.
    ///
    /// A catalog in the reference only constrains columns whose table also
    /// records a catalog.
    pub fn matches(&self, col: &Column) -> bool {
        let catalog_ok = match (&self.catalog, &col.table.catalog) {
            (Some(want), Some(have)) => want == have,
            _ => true,
        };

        catalog_ok
            && self.schema == col.table.schema
            && self.table == col.table.rel
            && self.column == col.name
    }

    fn malformed(entry: &str) -> GenError {
        GenError::invalid_override(
            entry,
            "`column` is not the proper format, expected '[catalog.][schema.]table.column'",
        )
    }
}

impl fmt::Display for ColumnRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if let Some(catalog) = &self.catalog {
            write!(f, "{}.", catalog)?;
        }
        write!(f, "{}.{}.{}", self.schema, self.table, self.column)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::schema::Fqn;

    fn raw(go_type: &str) -> RawOverride {
        RawOverride {
            go_type: go_type.to_string(),
            ..Default::default()
        }
    }

    // =========================================================================
    // Target type tests
    // =========================================================================

    #[test]
    fn test_target_type_import_path() {
        let t = TargetType::parse("example.com/pkg.CustomType").unwrap();
        assert_eq!(t.import_path, "example.com/pkg");
        assert_eq!(t.package, "pkg");
        assert_eq!(t.type_name, "CustomType");
        assert_eq!(t.qualified(), "pkg.CustomType");
    }

    #[test]
    fn test_target_type_nested_path() {
        let t = TargetType::parse("github.com/lib/pq.StringArray").unwrap();
        assert_eq!(t.import_path, "github.com/lib/pq");
        assert_eq!(t.qualified(), "pq.StringArray");
    }

    #[test]
    fn test_target_type_stdlib() {
        let t = TargetType::parse("time.Duration").unwrap();
        assert_eq!(t.import_path, "time");
        assert_eq!(t.qualified(), "time.Duration");
    }

    #[test]
    fn test_target_type_go_prefix_and_suffix() {
        let t = TargetType::parse("github.com/segmentio/go-ksuid.KSUID").unwrap();
        assert_eq!(t.qualified(), "ksuid.KSUID");
        let t = TargetType::parse("github.com/gofrs/uuid-go.UUID").unwrap();
        assert_eq!(t.qualified(), "uuid.UUID");
    }

    #[test]
    fn test_target_type_rejects_missing_dot() {
        let err = TargetType::parse("CustomType").unwrap_err();
        assert!(err.is_configuration());
        assert!(err.to_string().contains("proper format"));
    }

    #[test]
    fn test_target_type_rejects_empty_parts() {
        assert!(TargetType::parse(".CustomType").is_err());
        assert!(TargetType::parse("example.com/pkg.").is_err());
        assert!(TargetType::parse("example.com/.Custom").is_err());
        assert!(TargetType::parse("example.com/pkg").is_err());
    }

    // =========================================================================
    // Column reference tests
    // =========================================================================

    #[test]
    fn test_column_ref_defaults_schema() {
        let c = ColumnRef::parse("foo.retyped").unwrap();
        assert_eq!(c.schema, "public");
        assert_eq!(c.table, "foo");
        assert_eq!(c.column, "retyped");
        assert_eq!(c.to_string(), "public.foo.retyped");
    }

    #[test]
    fn test_column_ref_with_catalog() {
        let c = ColumnRef::parse("app.audit.events.kind").unwrap();
        assert_eq!(c.catalog.as_deref(), Some("app"));
        assert_eq!(c.schema, "audit");
    }

    #[test]
    fn test_column_ref_rejects_bad_shapes() {
        assert!(ColumnRef::parse("retyped").is_err());
        assert!(ColumnRef::parse("a.b.c.d.e").is_err());
        assert!(ColumnRef::parse("foo..bar").is_err());
    }

    #[test]
    fn test_column_ref_matches() {
        let c = ColumnRef::parse("foo.retyped").unwrap();
        let col = Column::new("retyped", "text").on(Fqn::new("public", "foo"));
        assert!(c.matches(&col));

        let other_schema = Column::new("retyped", "text").on(Fqn::new("audit", "foo"));
        assert!(!c.matches(&other_schema));

        let other_name = Column::new("typed", "text").on(Fqn::new("public", "foo"));
        assert!(!c.matches(&other_name));
    }

    #[test]
    fn test_column_ref_catalog_constraint() {
        let c = ColumnRef::parse("app.public.foo.id").unwrap();
        let mut rel = Fqn::new("public", "foo");
        let col = Column::new("id", "int4").on(rel.clone());
        assert!(c.matches(&col));

        rel.catalog = Some("other".to_string());
        let col = Column::new("id", "int4").on(rel);
        assert!(!c.matches(&col));
    }

    // =========================================================================
    // Rule parsing tests
    // =========================================================================

    #[test]
    fn test_parse_column_rule() {
        let rule = OverrideRule::parse(&RawOverride {
            column: Some("foo.retyped".to_string()),
            ..raw("example.com/pkg.CustomType")
        })
        .unwrap();
        assert!(matches!(rule, OverrideRule::Column { .. }));
        assert_eq!(rule.target().qualified(), "pkg.CustomType");
    }

    #[test]
    fn test_parse_array_column_rule() {
        let rule = OverrideRule::parse(&RawOverride {
            column: Some("foo.languages".to_string()),
            array: true,
            ..raw("github.com/lib/pq.StringArray")
        })
        .unwrap();
        assert!(matches!(rule, OverrideRule::ArrayColumn { .. }));
    }

    #[test]
    fn test_parse_type_default_rule() {
        let rule = OverrideRule::parse(&RawOverride {
            postgres_type: Some("uuid".to_string()),
            null: true,
            ..raw("github.com/gofrs/uuid.NullUUID")
        })
        .unwrap();
        match rule {
            OverrideRule::TypeDefault {
                sql_type, nullable, ..
            } => {
                assert_eq!(sql_type, "uuid");
                assert!(nullable);
            }
            other => panic!("unexpected rule {:?}", other),
        }
    }

    #[test]
    fn test_parse_rejects_both_selectors() {
        let err = OverrideRule::parse(&RawOverride {
            column: Some("foo.id".to_string()),
            postgres_type: Some("uuid".to_string()),
            ..raw("github.com/gofrs/uuid.UUID")
        })
        .unwrap_err();
        assert!(err.to_string().contains("both"));
    }

    #[test]
    fn test_parse_rejects_no_selector() {
        let err = OverrideRule::parse(&raw("github.com/gofrs/uuid.UUID")).unwrap_err();
        assert!(err.to_string().contains("one of"));
    }

    #[test]
    fn test_parse_rejects_misplaced_flags() {
        let null_on_column = RawOverride {
            column: Some("foo.id".to_string()),
            null: true,
            ..raw("github.com/gofrs/uuid.UUID")
        };
        assert!(OverrideRule::parse(&null_on_column).is_err());

        let array_on_type = RawOverride {
            postgres_type: Some("text".to_string()),
            array: true,
            ..raw("github.com/lib/pq.StringArray")
        };
        assert!(OverrideRule::parse(&array_on_type).is_err());
    }

    #[test]
    fn test_parse_rejects_malformed_go_type() {
        let err = OverrideRule::parse(&RawOverride {
            column: Some("foo.id".to_string()),
            ..raw("UUID")
        })
        .unwrap_err();
        assert!(matches!(err, GenError::Override { .. }));
        assert!(err.to_string().contains("UUID"));
    }
}
