//! Type mapping from PostgreSQL column types to Go types.
//!
//! The built-in table is closed: a SQL type it does not list, with no
//! override and no catalog enum behind it, is an error rather than a guess.
//! Supporting a new SQL type means adding a row to [`BUILTIN_TYPES`].

mod enums;

pub use enums::EnumTypes;

use std::fmt;

use crate::core::schema::Column;
use crate::error::{GenError, Result};
use crate::overrides::{resolve_column, resolve_type_default, OverrideRule, TargetType};

const SQL_PACKAGE: &str = "database/sql";
const TIME_PACKAGE: &str = "time";
const JSON_PACKAGE: &str = "encoding/json";
const UUID_PACKAGE: &str = "github.com/google/uuid";

/// One row of the built-in mapping table.
#[derive(Debug)]
pub struct BuiltinType {
    /// SQL spellings covered by this row, already normalized.
    pub sql_names: &'static [&'static str],
    /// Go type for NOT NULL columns.
    pub not_null: &'static str,
    /// Go type able to carry "absent" for nullable columns.
    pub nullable: &'static str,
    /// Import needed by `not_null`.
    pub import: Option<&'static str>,
    /// Import needed by `nullable`.
    pub null_import: Option<&'static str>,
}

/// Built-in SQL type mappings.
pub const BUILTIN_TYPES: &[BuiltinType] = &[
    // ===== Integer Types =====
    BuiltinType {
        sql_names: &["smallint", "int2", "smallserial", "serial2"],
        not_null: "int16",
        nullable: "sql.NullInt16",
        import: None,
        null_import: Some(SQL_PACKAGE),
    },
    BuiltinType {
        sql_names: &["integer", "int", "int4", "serial", "serial4"],
        not_null: "int32",
        nullable: "sql.NullInt32",
        import: None,
        null_import: Some(SQL_PACKAGE),
    },
    BuiltinType {
        sql_names: &["bigint", "int8", "bigserial", "serial8"],
        not_null: "int64",
        nullable: "sql.NullInt64",
        import: None,
        null_import: Some(SQL_PACKAGE),
    },
    // ===== Floating Point =====
    BuiltinType {
        sql_names: &["real", "float4"],
        not_null: "float32",
        nullable: "sql.NullFloat64",
        import: None,
        null_import: Some(SQL_PACKAGE),
    },
    BuiltinType {
        sql_names: &["double precision", "float8"],
        not_null: "float64",
        nullable: "sql.NullFloat64",
        import: None,
        null_import: Some(SQL_PACKAGE),
    },
    // Arbitrary precision, carried as text.
    BuiltinType {
        sql_names: &["numeric", "decimal", "money"],
        not_null: "string",
        nullable: "sql.NullString",
        import: None,
        null_import: Some(SQL_PACKAGE),
    },
    // ===== Boolean =====
    BuiltinType {
        sql_names: &["boolean", "bool"],
        not_null: "bool",
        nullable: "sql.NullBool",
        import: None,
        null_import: Some(SQL_PACKAGE),
    },
    // ===== Character Types =====
    BuiltinType {
        sql_names: &[
            "text",
            "varchar",
            "character varying",
            "char",
            "character",
            "bpchar",
            "citext",
            "string",
        ],
        not_null: "string",
        nullable: "sql.NullString",
        import: None,
        null_import: Some(SQL_PACKAGE),
    },
    // ===== Binary Types =====
    // A nil slice already means absent.
    BuiltinType {
        sql_names: &["bytea", "blob"],
        not_null: "[]byte",
        nullable: "[]byte",
        import: None,
        null_import: None,
    },
    // ===== Date/Time Types =====
    BuiltinType {
        sql_names: &[
            "date",
            "time",
            "timetz",
            "time without time zone",
            "time with time zone",
            "timestamp",
            "timestamptz",
            "timestamp without time zone",
            "timestamp with time zone",
        ],
        not_null: "time.Time",
        nullable: "sql.NullTime",
        import: Some(TIME_PACKAGE),
        null_import: Some(SQL_PACKAGE),
    },
    // ===== Special Types =====
    BuiltinType {
        sql_names: &["json", "jsonb"],
        not_null: "json.RawMessage",
        nullable: "json.RawMessage",
        import: Some(JSON_PACKAGE),
        null_import: Some(JSON_PACKAGE),
    },
    BuiltinType {
        sql_names: &["uuid"],
        not_null: "uuid.UUID",
        nullable: "uuid.NullUUID",
        import: Some(UUID_PACKAGE),
        null_import: Some(UUID_PACKAGE),
    },
];

/// Normalize a SQL type name for table lookups.
///
/// Lower-cases, trims, and strips a `pg_catalog.` qualifier, so
/// `pg_catalog.INT4` and `int4` are the same type.
pub fn normalize_sql_type(sql_type: &str) -> String {
    let lower = sql_type.trim().to_lowercase();
    match lower.strip_prefix("pg_catalog.") {
        Some(bare) => bare.to_string(),
        None => lower,
    }
}

/// Find the built-in row for a SQL type.
pub fn builtin(sql_type: &str) -> Option<&'static BuiltinType> {
    let normalized = normalize_sql_type(sql_type);
    BUILTIN_TYPES
        .iter()
        .find(|row| row.sql_names.contains(&normalized.as_str()))
}

/// A resolved Go type and the import it needs, if any.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GoType {
    /// Type expression as written in generated code.
    pub name: String,
    /// Import path the expression depends on.
    pub import: Option<String>,
}

impl GoType {
    fn local(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            import: None,
        }
    }

    fn builtin(name: &str, import: Option<&str>) -> Self {
        Self {
            name: name.to_string(),
            import: import.map(str::to_string),
        }
    }

    fn from_target(target: &TargetType) -> Self {
        Self {
            name: target.qualified(),
            import: Some(target.import_path.clone()),
        }
    }

    fn slice(self) -> Self {
        Self {
            name: format!("[]{}", self.name),
            import: self.import,
        }
    }
}

impl fmt::Display for GoType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.name)
    }
}

/// Maps catalog columns to Go types for one package.
///
/// Precedence, most specific first:
///
/// 1. A column override, used verbatim (arrays included).
/// 2. A type override matching the SQL type and nullability.
/// 3. A catalog enum.
/// 4. The built-in table.
///
/// Steps 2-4 pick the element type; array columns then become a slice of
/// the NOT NULL element type.
#[derive(Debug, Clone, Copy)]
pub struct TypeMapper<'a> {
    rules: &'a [OverrideRule],
    enums: Option<&'a EnumTypes>,
}

impl<'a> TypeMapper<'a> {
    /// Create a mapper over a package's effective override list.
    pub fn new(rules: &'a [OverrideRule]) -> Self {
        Self { rules, enums: None }
    }

    /// Resolve enum-typed columns against `enums`.
    pub fn with_enums(mut self, enums: &'a EnumTypes) -> Self {
        self.enums = Some(enums);
        self
    }

    /// Map a column to its Go type.
    ///
    /// # Errors
    ///
    /// - `GenError::OverrideShapeMismatch` if a scalar column is named only
    ///   by array column overrides
    /// - `GenError::UnsupportedType` if nothing maps the SQL type
    pub fn map(&self, col: &Column) -> Result<GoType> {
        if let Some(target) = resolve_column(col, self.rules)? {
            return Ok(GoType::from_target(target));
        }

        if col.is_array {
            return Ok(self.element(col, false)?.slice());
        }

        self.element(col, col.is_nullable)
    }

    fn element(&self, col: &Column, nullable: bool) -> Result<GoType> {
        if let Some(target) = resolve_type_default(&col.data_type, nullable, self.rules) {
            return Ok(GoType::from_target(target));
        }

        if let Some(name) = self.enums.and_then(|enums| enums.get(&col.data_type)) {
            return Ok(if nullable {
                GoType::local(format!("Null{}", name))
            } else {
                GoType::local(name)
            });
        }

        match builtin(&col.data_type) {
            Some(row) if nullable => Ok(GoType::builtin(row.nullable, row.null_import)),
            Some(row) => Ok(GoType::builtin(row.not_null, row.import)),
            None => Err(GenError::unsupported_type(&col.data_type, col.full_name())),
        }
    }
}
