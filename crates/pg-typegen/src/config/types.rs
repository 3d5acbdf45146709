//! Configuration type definitions.
//!
//! `Raw*` types mirror the settings document as written by the user and are
//! what the loader deserializes. [`Settings`] is the validated model built
//! from them once per run and shared read-only afterwards.

use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, HashMap};

use crate::overrides::OverrideRule;

/// Root of the settings document.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RawSettings {
    /// Document format version. Only "1" is understood.
    pub version: String,

    /// Generation targets.
    #[serde(default)]
    pub packages: Vec<RawPackage>,

    /// Overrides applied to every package, after the package's own.
    #[serde(default)]
    pub overrides: Vec<RawOverride>,

    /// Column name -> field identifier, applied in every package.
    #[serde(default)]
    pub rename: BTreeMap<String, String>,
}

/// One package entry in the settings document.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RawPackage {
    /// Package name. Selects the package's rule set.
    pub name: String,

    /// Output directory, for the renderer.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub path: Option<String>,

    /// Schema source, for the query analyzer.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub schema: Option<String>,

    /// Query source, for the query analyzer.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub queries: Option<String>,

    /// Attach `json` tags to struct fields (default: false).
    #[serde(default)]
    pub emit_json_tags: bool,

    /// Attach `db` tags to struct fields (default: false).
    #[serde(default)]
    pub emit_db_tags: bool,

    /// Emit prepared-statement variants (default: false).
    #[serde(default)]
    pub emit_prepared_queries: bool,

    /// Emit a querier interface (default: false).
    #[serde(default)]
    pub emit_interface: bool,

    /// Package-local overrides, consulted before the global ones.
    #[serde(default)]
    pub overrides: Vec<RawOverride>,
}

/// An override declaration as written by the user.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RawOverride {
    /// Target type, `[import/path/]pkg.TypeName`.
    pub go_type: String,

    /// Match every column of this SQL type.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub postgres_type: Option<String>,

    /// Match exactly this column, `[catalog.][schema.]table.column`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub column: Option<String>,

    /// With `postgres_type`: match nullable columns instead of NOT NULL ones.
    #[serde(default)]
    pub null: bool,

    /// With `column`: the column is an array.
    #[serde(default)]
    pub array: bool,
}

impl RawOverride {
    /// Short human-readable form for error messages.
    pub fn describe(&self) -> String {
        match (&self.column, &self.postgres_type) {
            (Some(column), _) => format!("{} -> {}", column, self.go_type),
            (None, Some(sql_type)) => format!("{} -> {}", sql_type, self.go_type),
            (None, None) => self.go_type.clone(),
        }
    }
}

/// Validated configuration for one generation run.
#[derive(Debug, Clone)]
pub struct Settings {
    /// Document format version.
    pub version: String,

    pub(super) packages: Vec<PackageSettings>,

    pub(super) by_name: HashMap<String, usize>,

    pub(super) overrides: Vec<OverrideRule>,

    pub(super) rename: BTreeMap<String, String>,
}

/// Validated settings for one package.
#[derive(Debug, Clone)]
pub struct PackageSettings {
    /// Package name.
    pub name: String,

    /// Output directory, for the renderer.
    pub path: Option<String>,

    /// Schema source, for the query analyzer.
    pub schema: Option<String>,

    /// Query source, for the query analyzer.
    pub queries: Option<String>,

    /// Attach `json` tags to struct fields.
    pub emit_json_tags: bool,

    /// Attach `db` tags to struct fields.
    pub emit_db_tags: bool,

    /// Emit prepared-statement variants.
    pub emit_prepared_queries: bool,

    /// Emit a querier interface.
    pub emit_interface: bool,

    pub(super) overrides: Vec<OverrideRule>,

    /// Package-local rules followed by global rules.
    pub(super) effective: Vec<OverrideRule>,
}

impl PackageSettings {
    /// Overrides declared on this package only.
    pub fn local_overrides(&self) -> &[OverrideRule] {
        &self.overrides
    }

    /// Ordered rules that apply to this package: local first, then global.
    pub fn overrides(&self) -> &[OverrideRule] {
        &self.effective
    }

    /// Whether struct fields get any tags at all.
    pub fn emits_tags(&self) -> bool {
        self.emit_json_tags || self.emit_db_tags
    }
}
