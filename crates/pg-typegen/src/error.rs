//! Error types for the type generator.

use thiserror::Error;

/// Main error type for generation operations.
#[derive(Error, Debug)]
pub enum GenError {
    /// Configuration error (bad version marker, missing fields, etc.)
    #[error("Configuration error: {0}")]
    Config(String),

    /// An override declaration could not be parsed
    #[error("Invalid override {entry:?}: {message}")]
    Override { entry: String, message: String },

    /// Two package entries share a name
    #[error("Duplicate package name: {0}")]
    DuplicatePackage(String),

    /// A package was requested that the settings do not define
    #[error("Unknown package: {0}")]
    UnknownPackage(String),

    /// No override and no built-in mapping exists for a SQL type
    #[error("Unsupported type {sql_type:?} for column {column}")]
    UnsupportedType { sql_type: String, column: String },

    /// A column override's array shape disagrees with the catalog column
    #[error("Override for column {column} targets {expected} columns, but the column is {actual}")]
    OverrideShapeMismatch {
        column: String,
        expected: &'static str,
        actual: &'static str,
    },

    /// Two catalog objects normalize to the same generated type name
    #[error("Generated type name {name} is used by both {first} and {second}")]
    DuplicateTypeName {
        name: String,
        first: String,
        second: String,
    },

    /// YAML serialization/deserialization error
    #[error("YAML error: {0}")]
    Yaml(#[from] serde_yaml::Error),

    /// JSON serialization/deserialization error
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

impl GenError {
    /// Create an Override error for a raw declaration.
    pub fn invalid_override(entry: impl Into<String>, message: impl Into<String>) -> Self {
        GenError::Override {
            entry: entry.into(),
            message: message.into(),
        }
    }

    /// Create an UnsupportedType error.
    pub fn unsupported_type(sql_type: impl Into<String>, column: impl Into<String>) -> Self {
        GenError::UnsupportedType {
            sql_type: sql_type.into(),
            column: column.into(),
        }
    }

    /// Whether this error belongs to the configuration family.
    ///
    /// Configuration errors are fixed by editing settings; everything else
    /// points at the catalog (or at a missing built-in mapping).
    pub fn is_configuration(&self) -> bool {
        matches!(
            self,
            GenError::Config(_)
                | GenError::Override { .. }
                | GenError::DuplicatePackage(_)
                | GenError::UnknownPackage(_)
                | GenError::OverrideShapeMismatch { .. }
                | GenError::Yaml(_)
                | GenError::Json(_)
        )
    }

    /// Format error with full details including error chain
    pub fn format_detailed(&self) -> String {
        let mut output = format!("Error: {}\n", self);

        let mut source = std::error::Error::source(self);
        let mut depth = 1;
        while let Some(err) = source {
            output.push_str(&format!("\nCaused by:\n  {}: {}", depth, err));
            source = err.source();
            depth += 1;
        }

        output
    }
}

/// Result type alias for generation operations.
pub type Result<T> = std::result::Result<T, GenError>;
