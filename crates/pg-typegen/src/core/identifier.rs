//! Identifier normalization for generated code.
//!
//! Catalog names (tables, columns, enum labels) are arbitrary SQL
//! identifiers or string literals. Generated code needs exported Go-style
//! identifiers, so every name passes through one of two policies:
//!
//! - [`struct_name`]: for table and column names. Splits on `_` and
//!   capitalizes each segment.
//! - [`enum_value_name`]: for enum labels. Treats `-`, `_`, `:` and `/` as
//!   word boundaries and silently drops every other character outside
//!   `[A-Za-z0-9]`.
//!
//! Both are pure functions of their input.

use crate::core::schema::DEFAULT_SCHEMA;
use crate::error::{GenError, Result};

/// Characters that start a new word inside an enum label.
const ENUM_WORD_SEPARATORS: [char; 4] = ['-', '_', ':', '/'];

/// Convert a table or column name to an exported identifier.
///
/// Empty segments from leading, trailing, or repeated underscores are
/// skipped.
///
/// # Examples
///
/// ```
/// use pg_typegen::core::identifier::struct_name;
///
/// assert_eq!(struct_name("byte_seq"), "ByteSeq");
/// assert_eq!(struct_name("__user__id"), "UserId");
/// ```
pub fn struct_name(name: &str) -> String {
    name.split('_')
        .filter(|segment| !segment.is_empty())
        .map(capitalize)
        .collect()
}

/// Name of a generated type for a relation or enum declared in `schema`.
///
/// Types from the default schema use the bare name; everything else is
/// prefixed with its schema so `audit.events` and `public.events` cannot
/// collide.
pub fn type_name(schema: &str, name: &str) -> String {
    if schema == DEFAULT_SCHEMA {
        struct_name(name)
    } else {
        struct_name(&format!("{}_{}", schema, name))
    }
}

/// Convert an enum label to an identifier suffix.
///
/// A separator (`-`, `_`, `:`, `/`) is dropped and capitalizes the next
/// character. Any other character outside `[A-Za-z0-9]` is dropped without
/// touching the case of what follows. The first character of the result is
/// always uppercase.
///
/// # Examples
///
/// ```
/// use pg_typegen::core::identifier::enum_value_name;
///
/// assert_eq!(enum_value_name("foo-bar"), "FooBar");
/// assert_eq!(enum_value_name("foo@bar"), "Foobar");
/// ```
pub fn enum_value_name(value: &str) -> String {
    let mut id = String::with_capacity(value.len());
    let mut boundary = false;

    for ch in value.chars() {
        if ch.is_ascii_alphanumeric() {
            if id.is_empty() || boundary {
                id.push(ch.to_ascii_uppercase());
            } else {
                id.push(ch);
            }
            boundary = false;
        } else if ENUM_WORD_SEPARATORS.contains(&ch) {
            boundary = true;
        }
    }

    id
}

/// Name used for a result column.
///
/// Expressions without an alias come back from the analyzer with an empty
/// name; they are numbered by 0-based `position` as `column_1`, `column_2`, ...
pub fn column_name(name: &str, position: usize) -> String {
    if name.is_empty() {
        format!("column_{}", position + 1)
    } else {
        name.to_string()
    }
}

/// Validate a user-supplied identifier (e.g. a rename target).
///
/// Rejects:
/// - Empty identifiers
/// - Identifiers not starting with a letter
/// - Identifiers containing anything other than letters, digits, or `_`
///
/// # Errors
///
/// Returns `GenError::Config` with a descriptive message.
pub fn validate_identifier(name: &str) -> Result<()> {
    let mut chars = name.chars();

    match chars.next() {
        None => {
            return Err(GenError::Config("Identifier cannot be empty".to_string()));
        }
        Some(first) if !first.is_alphabetic() => {
            return Err(GenError::Config(format!(
                "Identifier must start with a letter: {:?}",
                name
            )));
        }
        Some(_) => {}
    }

    if let Some(bad) = chars.find(|c| !c.is_alphanumeric() && *c != '_') {
        return Err(GenError::Config(format!(
            "Identifier contains invalid character {:?}: {:?}",
            bad, name
        )));
    }

    Ok(())
}

fn capitalize(segment: &str) -> String {
    let mut chars = segment.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}
