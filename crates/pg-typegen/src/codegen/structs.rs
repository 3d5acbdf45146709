//! Building struct definitions from ordered column lists.

use std::collections::{BTreeMap, BTreeSet, HashMap, HashSet};

use crate::config::{PackageSettings, Settings};
use crate::core::identifier::{column_name, struct_name};
use crate::core::schema::Column;
use crate::error::Result;
use crate::typemap::{EnumTypes, TypeMapper};

use super::model::{FieldDefinition, StructDefinition, DB_TAG, JSON_TAG};

/// Builds [`StructDefinition`]s for one package.
///
/// Holds only shared references into the settings, so one builder can be
/// used from several threads for independent structs.
#[derive(Debug, Clone, Copy)]
pub struct StructBuilder<'a> {
    package: &'a PackageSettings,
    rename: &'a BTreeMap<String, String>,
    mapper: TypeMapper<'a>,
}

impl<'a> StructBuilder<'a> {
    /// Create a builder for the named package.
    ///
    /// # Errors
    ///
    /// Returns `GenError::UnknownPackage` if the settings do not define it.
    pub fn new(settings: &'a Settings, package: &str) -> Result<Self> {
        Ok(Self::for_package(settings, settings.package(package)?))
    }

    pub(crate) fn for_package(settings: &'a Settings, package: &'a PackageSettings) -> Self {
        Self {
            package,
            rename: settings.rename(),
            mapper: TypeMapper::new(package.overrides()),
        }
    }

    /// Resolve enum-typed columns against `enums`.
    pub fn with_enums(mut self, enums: &'a EnumTypes) -> Self {
        self.mapper = self.mapper.with_enums(enums);
        self
    }

    /// Build a struct from columns, in order.
    ///
    /// A column whose field identifier was already taken gets `_N` appended
    /// (N = 2, 3, ...) to both its field name and its tag value, so
    /// `count, count` yields `Count`/`count` and `Count_2`/`count_2`.
    ///
    /// # Errors
    ///
    /// Fails on the first column whose type cannot be resolved; no partial
    /// struct is returned.
    pub fn build(&self, name: &str, columns: &[Column]) -> Result<StructDefinition> {
        let mut fields = Vec::with_capacity(columns.len());
        let mut imports = BTreeSet::new();
        let mut seen: HashMap<String, usize> = HashMap::new();
        let mut used: HashSet<String> = HashSet::new();

        for (i, col) in columns.iter().enumerate() {
            let go_type = self.mapper.map(col)?;
            if let Some(import) = go_type.import {
                imports.insert(import);
            }

            let column = column_name(&col.name, i);
            let base = self.field_base(&column, i);

            let count = seen.entry(base.clone()).or_insert(0);
            *count += 1;

            let (field_name, tag_value) = if *count == 1 && !used.contains(&base) {
                (base, column)
            } else {
                let mut n = (*count).max(2);
                while used.contains(&format!("{}_{}", base, n)) {
                    n += 1;
                }
                *count = n;
                (format!("{}_{}", base, n), format!("{}_{}", column, n))
            };
            used.insert(field_name.clone());

            fields.push(FieldDefinition {
                name: field_name,
                type_name: go_type.name,
                tags: self.tags(&tag_value),
            });
        }

        Ok(StructDefinition {
            name: name.to_string(),
            fields,
            imports,
        })
    }

    fn field_base(&self, column: &str, position: usize) -> String {
        if let Some(renamed) = self.rename.get(column) {
            return renamed.clone();
        }
        let name = struct_name(column);
        if name.is_empty() {
            // Names made only of underscores.
            struct_name(&column_name("", position))
        } else {
            name
        }
    }

    fn tags(&self, value: &str) -> BTreeMap<String, String> {
        let mut tags = BTreeMap::new();
        if self.package.emit_json_tags {
            tags.insert(JSON_TAG.to_string(), value.to_string());
        }
        if self.package.emit_db_tags {
            tags.insert(DB_TAG.to_string(), value.to_string());
        }
        tags
    }
}
