//! Configuration validation.

use std::collections::HashSet;

use super::RawSettings;
use crate::core::identifier::validate_identifier;
use crate::error::{GenError, Result};

/// Settings document versions this crate understands.
const SUPPORTED_VERSIONS: &[&str] = &["1"];

/// Validate the shape of a settings document.
///
/// Override declarations are checked separately, when they are parsed into
/// rules.
pub fn validate(raw: &RawSettings) -> Result<()> {
    if raw.version.is_empty() {
        return Err(GenError::Config("version is required".into()));
    }
    if !SUPPORTED_VERSIONS.contains(&raw.version.as_str()) {
        return Err(GenError::Config(format!(
            "unsupported settings version '{}', expected one of {:?}",
            raw.version, SUPPORTED_VERSIONS
        )));
    }

    let mut seen = HashSet::new();
    for (i, package) in raw.packages.iter().enumerate() {
        if package.name.is_empty() {
            return Err(GenError::Config(format!("packages[{}].name is required", i)));
        }
        if !seen.insert(package.name.as_str()) {
            return Err(GenError::DuplicatePackage(package.name.clone()));
        }
    }

    for (column, field) in &raw.rename {
        if column.is_empty() {
            return Err(GenError::Config("rename keys cannot be empty".into()));
        }
        validate_identifier(field).map_err(|e| {
            GenError::Config(format!("rename.{} is not a valid identifier: {}", column, e))
        })?;
    }

    Ok(())
}
