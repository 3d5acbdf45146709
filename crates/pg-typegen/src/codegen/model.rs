//! Generated type models handed to the renderer.

use serde::Serialize;
use std::collections::{BTreeMap, BTreeSet};

/// Tag key for JSON serialization names.
pub const JSON_TAG: &str = "json";

/// Tag key for database column names.
pub const DB_TAG: &str = "db";

/// A generated struct.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct StructDefinition {
    /// Struct identifier.
    pub name: String,

    /// Fields in input column order.
    pub fields: Vec<FieldDefinition>,

    /// Import paths the field types need, sorted.
    pub imports: BTreeSet<String>,
}

impl StructDefinition {
    /// Find a field by its generated name.
    pub fn field(&self, name: &str) -> Option<&FieldDefinition> {
        self.fields.iter().find(|f| f.name == name)
    }
}

/// A generated struct field.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FieldDefinition {
    /// Field identifier, unique within its struct.
    pub name: String,

    /// Go type expression, possibly package-qualified.
    #[serde(rename = "type")]
    pub type_name: String,

    /// Tag kind -> tag value. Empty unless the package emits tags.
    pub tags: BTreeMap<String, String>,
}

impl FieldDefinition {
    /// Value of a tag, if present.
    pub fn tag(&self, kind: &str) -> Option<&str> {
        self.tags.get(kind).map(String::as_str)
    }
}

/// A generated enum type.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct EnumDefinition {
    /// Type identifier.
    pub name: String,

    /// Constants in label declaration order.
    pub constants: Vec<EnumConstant>,
}

impl EnumDefinition {
    /// Identifier of the nullable wrapper type used for nullable columns.
    pub fn null_name(&self) -> String {
        format!("Null{}", self.name)
    }

    /// `(raw label, normalized identifier)` pairs in declaration order.
    pub fn labels(&self) -> impl Iterator<Item = (&str, &str)> {
        self.constants
            .iter()
            .map(|c| (c.value.as_str(), c.identifier.as_str()))
    }
}

/// One enum label.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct EnumConstant {
    /// Raw label, as stored in the database.
    pub value: String,

    /// Normalized label identifier.
    pub identifier: String,

    /// Full constant name: enum type name followed by `identifier`.
    pub name: String,
}

/// Everything generated for one catalog.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Models {
    /// Enum types, sorted by name.
    pub enums: Vec<EnumDefinition>,

    /// Table structs, sorted by name.
    pub structs: Vec<StructDefinition>,
}
