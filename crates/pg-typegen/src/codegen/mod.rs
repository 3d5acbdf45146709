//! Struct and enum generation.
//!
//! - [`StructBuilder`]: one ordered column list -> one [`StructDefinition`]
//! - [`build_enum`]: one catalog enum -> one [`EnumDefinition`]
//! - [`Generator`]: a whole [`Catalog`] -> [`Models`] for one package

mod enums;
mod model;
mod structs;

pub use enums::build_enum;
pub use model::{
    EnumConstant, EnumDefinition, FieldDefinition, Models, StructDefinition, DB_TAG, JSON_TAG,
};
pub use structs::StructBuilder;

use std::collections::HashMap;

use tracing::debug;

use crate::config::{PackageSettings, Settings};
use crate::core::identifier::type_name;
use crate::core::schema::Catalog;
use crate::error::{GenError, Result};
use crate::typemap::EnumTypes;

/// Generates every model of a catalog for one package.
#[derive(Debug, Clone, Copy)]
pub struct Generator<'a> {
    settings: &'a Settings,
    package: &'a PackageSettings,
}

impl<'a> Generator<'a> {
    /// Create a generator for the named package.
    pub fn new(settings: &'a Settings, package: &str) -> Result<Self> {
        Ok(Self {
            settings,
            package: settings.package(package)?,
        })
    }

    /// The package this generator emits for.
    pub fn package(&self) -> &PackageSettings {
        self.package
    }

    /// Generate enum types and one struct per table.
    ///
    /// Both lists are sorted by generated name. Columns typed with a catalog
    /// enum resolve to the enum's generated type.
    ///
    /// # Errors
    ///
    /// Fails with the first struct that cannot be built, or with
    /// `GenError::DuplicateTypeName` when two enums or tables normalize to
    /// the same type name (`public.audit_events` and `audit.events`).
    pub fn models(&self, catalog: &Catalog) -> Result<Models> {
        let enum_types = EnumTypes::from_catalog(catalog);
        let builder =
            StructBuilder::for_package(self.settings, self.package).with_enums(&enum_types);

        let mut enums = Vec::new();
        let mut structs = Vec::new();
        let mut owners: HashMap<String, String> = HashMap::new();

        for schema in &catalog.schemas {
            for e in &schema.enums {
                let def = build_enum(&schema.name, e);
                claim(&mut owners, &def.name, format!("enum {}.{}", schema.name, e.name))?;
                enums.push(def);
            }
            for table in &schema.tables {
                let name = type_name(&table.rel.schema, &table.rel.rel);
                claim(&mut owners, &name, format!("table {}", table.rel.full_name()))?;
                structs.push(builder.build(&name, &table.columns)?);
            }
        }

        enums.sort_by(|a, b| a.name.cmp(&b.name));
        structs.sort_by(|a, b| a.name.cmp(&b.name));

        debug!(
            "Generated models for package {}: {} enums, {} structs",
            self.package.name,
            enums.len(),
            structs.len()
        );

        Ok(Models { enums, structs })
    }
}

/// Record `owner` as the source of type `name`.
fn claim(owners: &mut HashMap<String, String>, name: &str, owner: String) -> Result<()> {
    if let Some(first) = owners.get(name) {
        return Err(GenError::DuplicateTypeName {
            name: name.to_string(),
            first: first.clone(),
            second: owner,
        });
    }
    owners.insert(name.to_string(), owner);
    Ok(())
}
