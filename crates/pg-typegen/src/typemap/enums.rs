//! Lookup of catalog enums by the SQL type name columns use.

use std::collections::HashMap;

use crate::core::identifier::type_name;
use crate::core::schema::{Catalog, DEFAULT_SCHEMA};

/// Generated type names for catalog enums, keyed by SQL type name.
///
/// Enums in the default schema are reachable both bare (`mood`) and
/// qualified (`public.mood`); others only qualified (`audit.level`).
#[derive(Debug, Clone, Default)]
pub struct EnumTypes {
    by_sql_name: HashMap<String, String>,
}

impl EnumTypes {
    /// Register every enum in the catalog.
    pub fn from_catalog(catalog: &Catalog) -> Self {
        let mut enums = Self::default();
        for schema in &catalog.schemas {
            for e in &schema.enums {
                enums.insert(&schema.name, &e.name);
            }
        }
        enums
    }

    /// Register one enum and return its generated type name.
    pub fn insert(&mut self, schema: &str, name: &str) -> String {
        let generated = type_name(schema, name);
        if schema == DEFAULT_SCHEMA {
            self.by_sql_name.insert(name.to_string(), generated.clone());
        }
        self.by_sql_name
            .insert(format!("{}.{}", schema, name), generated.clone());
        generated
    }

    /// Generated type name for a column's SQL type, if it is an enum.
    pub fn get(&self, sql_type: &str) -> Option<&str> {
        self.by_sql_name.get(sql_type).map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.by_sql_name.len()
    }

    pub fn is_empty(&self) -> bool {
        self.by_sql_name.is_empty()
    }
}
