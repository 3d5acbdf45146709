//! Building enum definitions from catalog enums.

use crate::core::identifier::{enum_value_name, type_name};
use crate::core::schema::Enum;

use super::model::{EnumConstant, EnumDefinition};

/// Build the definition for an enum declared in `schema`.
pub fn build_enum(schema: &str, e: &Enum) -> EnumDefinition {
    let name = type_name(schema, &e.name);
    let constants = e
        .values
        .iter()
        .map(|value| {
            let identifier = enum_value_name(value);
            EnumConstant {
                value: value.clone(),
                name: format!("{}{}", name, identifier),
                identifier,
            }
        })
        .collect();

    EnumDefinition { name, constants }
}
