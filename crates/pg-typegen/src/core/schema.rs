//! Catalog metadata types for schemas, tables, columns, and enums.
//!
//! These are the inputs handed over by the query analyzer. They carry just
//! enough information to pick a target type and a name for every column.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Schema used when a reference does not name one.
pub const DEFAULT_SCHEMA: &str = "public";

/// Fully-qualified relation name.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Fqn {
    /// Catalog (database) name, when known.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub catalog: Option<String>,

    /// Schema name.
    pub schema: String,

    /// Relation name.
    pub rel: String,
}

impl Fqn {
    /// Create a relation reference without a catalog.
    pub fn new(schema: impl Into<String>, rel: impl Into<String>) -> Self {
        Self {
            catalog: None,
            schema: schema.into(),
            rel: rel.into(),
        }
    }

    /// Get the `schema.relation` form.
    pub fn full_name(&self) -> String {
        format!("{}.{}", self.schema, self.rel)
    }
}

impl fmt::Display for Fqn {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if let Some(catalog) = &self.catalog {
            write!(f, "{}.", catalog)?;
        }
        write!(f, "{}.{}", self.schema, self.rel)
    }
}

/// Column metadata.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Column {
    /// Column name. Unique within a table; query result columns may be unnamed.
    pub name: String,

    /// Declared SQL type, optionally schema-qualified (e.g. "pg_catalog.int4").
    pub data_type: String,

    /// Whether the column allows NULL.
    #[serde(default)]
    pub is_nullable: bool,

    /// Whether the column holds an array of `data_type`.
    #[serde(default)]
    pub is_array: bool,

    /// Owning relation. Scopes column-specific overrides.
    pub table: Fqn,
}

impl Column {
    /// Create a NOT NULL scalar column in the default schema with no table yet.
    pub fn new(name: impl Into<String>, data_type: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            data_type: data_type.into(),
            is_nullable: false,
            is_array: false,
            table: Fqn::new(DEFAULT_SCHEMA, ""),
        }
    }

    /// Mark the column as nullable.
    pub fn nullable(mut self) -> Self {
        self.is_nullable = true;
        self
    }

    /// Mark the column as an array of its data type.
    pub fn array(mut self) -> Self {
        self.is_array = true;
        self
    }

    /// Attach the column to a relation.
    pub fn on(mut self, table: Fqn) -> Self {
        self.table = table;
        self
    }

    /// Get the `schema.table.column` name used in diagnostics and override matching.
    pub fn full_name(&self) -> String {
        format!("{}.{}", self.table.full_name(), self.name)
    }
}

/// Table metadata.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Table {
    /// Relation reference.
    pub rel: Fqn,

    /// Column definitions, in declaration order.
    pub columns: Vec<Column>,
}

impl Table {
    /// Build a table and stamp its reference onto every column.
    pub fn new(rel: Fqn, columns: Vec<Column>) -> Self {
        let columns = columns
            .into_iter()
            .map(|c| Column {
                table: rel.clone(),
                ..c
            })
            .collect();
        Self { rel, columns }
    }
}

/// Enum type metadata.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Enum {
    /// Type name, unqualified.
    pub name: String,

    /// Labels in declaration order.
    pub values: Vec<String>,
}

/// A schema: its tables and enum types.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Schema {
    /// Schema name.
    pub name: String,

    #[serde(default)]
    pub tables: Vec<Table>,

    #[serde(default)]
    pub enums: Vec<Enum>,
}

impl Schema {
    /// Create an empty schema.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Default::default()
        }
    }

    /// Whether this is the schema unqualified references resolve to.
    pub fn is_default(&self) -> bool {
        self.name == DEFAULT_SCHEMA
    }
}

/// Snapshot of the database schema produced by the query analyzer.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Catalog {
    #[serde(default)]
    pub schemas: Vec<Schema>,
}

impl Catalog {
    /// Create an empty catalog.
    pub fn new() -> Self {
        Self::default()
    }

    /// Find a schema by name.
    pub fn schema(&self, name: &str) -> Option<&Schema> {
        self.schemas.iter().find(|s| s.name == name)
    }
}
