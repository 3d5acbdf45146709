//! Matching override rules against catalog columns.
//!
//! Rules are consulted in order (package-local first, then global), and the
//! first match wins. Column-scoped rules always beat type-scoped ones, no
//! matter where they sit in the list.

use tracing::trace;

use crate::core::schema::Column;
use crate::error::{GenError, Result};
use crate::typemap::normalize_sql_type;

use super::{OverrideRule, TargetType};

/// Find the column-scoped rule for `col`, if any.
///
/// The first rule naming the column whose array shape agrees with it wins.
/// A scalar rule never matches an array column; the column falls through to
/// the built-in mapping of its element type.
///
/// # Errors
///
/// Returns `GenError::OverrideShapeMismatch` when a scalar column is named
/// only by array rules.
pub fn resolve_column<'a>(
    col: &Column,
    rules: &'a [OverrideRule],
) -> Result<Option<&'a TargetType>> {
    let mut array_rule_on_scalar = false;

    for rule in rules {
        let (column, target, wants_array) = match rule {
            OverrideRule::Column { column, target } => (column, target, false),
            OverrideRule::ArrayColumn { column, target } => (column, target, true),
            OverrideRule::TypeDefault { .. } => continue,
        };

        if !column.matches(col) {
            continue;
        }

        if wants_array != col.is_array {
            if wants_array {
                array_rule_on_scalar = true;
            }
            trace!(column = %col.full_name(), target = %target, "override shape differs");
            continue;
        }

        trace!(column = %col.full_name(), target = %target, "column override");
        return Ok(Some(target));
    }

    if array_rule_on_scalar {
        return Err(GenError::OverrideShapeMismatch {
            column: col.full_name(),
            expected: "array",
            actual: "scalar",
        });
    }

    Ok(None)
}

/// Find the type-scoped rule for a SQL type and nullability, if any.
pub fn resolve_type_default<'a>(
    sql_type: &str,
    nullable: bool,
    rules: &'a [OverrideRule],
) -> Option<&'a TargetType> {
    let wanted = normalize_sql_type(sql_type);

    rules.iter().find_map(|rule| match rule {
        OverrideRule::TypeDefault {
            sql_type: rule_type,
            nullable: rule_nullable,
            target,
        } if *rule_nullable == nullable && normalize_sql_type(rule_type) == wanted => {
            trace!(sql_type, nullable, target = %target, "type override");
            Some(target)
        }
        _ => None,
    })
}
