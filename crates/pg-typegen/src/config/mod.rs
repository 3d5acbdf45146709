//! Configuration parsing and validation.
//!
//! The settings document is read by the caller; this module turns its text
//! (or an already-deserialized [`RawSettings`]) into an immutable
//! [`Settings`] value. Every override is parsed here, so a malformed
//! declaration fails before any column is processed.

mod types;
mod validation;

pub use types::*;

use std::collections::{BTreeMap, HashMap};
use tracing::debug;

use crate::error::{GenError, Result};
use crate::overrides::OverrideRule;

impl Settings {
    /// Parse settings from a YAML string.
    pub fn from_yaml(yaml: &str) -> Result<Self> {
        let raw: RawSettings = serde_yaml::from_str(yaml)?;
        Self::from_raw(raw)
    }

    /// Parse settings from a JSON string.
    pub fn from_json(json: &str) -> Result<Self> {
        let raw: RawSettings = serde_json::from_str(json)?;
        Self::from_raw(raw)
    }

    /// Validate a raw document and build the configuration model.
    ///
    /// # Errors
    ///
    /// - `GenError::Config` for a bad version marker, empty package name, or
    ///   invalid rename target
    /// - `GenError::DuplicatePackage` if two packages share a name
    /// - `GenError::Override` for the first malformed override declaration
    pub fn from_raw(raw: RawSettings) -> Result<Self> {
        validation::validate(&raw)?;

        let overrides = parse_rules(&raw.overrides, "global overrides")?;

        let mut packages = Vec::with_capacity(raw.packages.len());
        let mut by_name = HashMap::with_capacity(raw.packages.len());

        for package in raw.packages {
            let local = parse_rules(
                &package.overrides,
                &format!("package '{}'", package.name),
            )?;
            let effective = local.iter().chain(&overrides).cloned().collect();

            by_name.insert(package.name.clone(), packages.len());
            packages.push(PackageSettings {
                name: package.name,
                path: package.path,
                schema: package.schema,
                queries: package.queries,
                emit_json_tags: package.emit_json_tags,
                emit_db_tags: package.emit_db_tags,
                emit_prepared_queries: package.emit_prepared_queries,
                emit_interface: package.emit_interface,
                overrides: local,
                effective,
            });
        }

        debug!(
            "Loaded settings: {} packages, {} global overrides, {} renames",
            packages.len(),
            overrides.len(),
            raw.rename.len()
        );

        Ok(Self {
            version: raw.version,
            packages,
            by_name,
            overrides,
            rename: raw.rename,
        })
    }

    /// Look up a package by name.
    pub fn package(&self, name: &str) -> Result<&PackageSettings> {
        self.by_name
            .get(name)
            .map(|&i| &self.packages[i])
            .ok_or_else(|| GenError::UnknownPackage(name.to_string()))
    }

    /// Ordered override rules for a package: local first, then global.
    pub fn rules_for(&self, package: &str) -> Result<&[OverrideRule]> {
        Ok(self.package(package)?.overrides())
    }

    /// All packages, in document order.
    pub fn packages(&self) -> &[PackageSettings] {
        &self.packages
    }

    /// Overrides that apply to every package.
    pub fn global_overrides(&self) -> &[OverrideRule] {
        &self.overrides
    }

    /// Column name -> field identifier renames.
    pub fn rename(&self) -> &BTreeMap<String, String> {
        &self.rename
    }
}

/// Parse raw overrides, tagging errors with where they were declared.
fn parse_rules(raws: &[RawOverride], scope: &str) -> Result<Vec<OverrideRule>> {
    raws.iter()
        .map(|raw| {
            OverrideRule::parse(raw).map_err(|err| match err {
                GenError::Override { entry, message } => GenError::Override {
                    entry,
                    message: format!("{} (in {})", message, scope),
                },
                other => other,
            })
        })
        .collect()
}
