//! # pg-typegen
//!
//! Compiles PostgreSQL catalog metadata into typed Go struct and enum models.
//!
//! Given a catalog (tables, columns, enum types) and a settings document,
//! this library decides for every column:
//!
//! - **Type selection** from a closed table of built-in SQL types
//! - **Nullability**: NOT NULL columns get plain types, nullable columns get
//!   a type that can represent "absent"
//! - **Overrides** per column, per array column, or per SQL type, with
//!   package-local rules consulted before global ones
//! - **Naming**: exported field identifiers, deterministic de-duplication,
//!   and enum label normalization
//!
//! Rendering source text and writing files is left to the caller.
//!
//! ## Example
//!
//! ```rust
//! use pg_typegen::{Column, Fqn, Settings, StructBuilder};
//!
//! fn main() -> pg_typegen::Result<()> {
//!     let settings = Settings::from_yaml(
//!         r#"
//! version: "1"
//! packages:
//!   - name: db
//!     emit_json_tags: true
//! "#,
//!     )?;
//!
//!     let foo = Fqn::new("public", "foo");
//!     let columns = vec![
//!         Column::new("count", "bigint").on(foo.clone()),
//!         Column::new("count", "bigint").on(foo),
//!     ];
//!
//!     let model = StructBuilder::new(&settings, "db")?.build("Foo", &columns)?;
//!     assert_eq!(model.fields[1].name, "Count_2");
//!     assert_eq!(model.fields[1].type_name, "int64");
//!     Ok(())
//! }
//! ```

pub mod codegen;
pub mod config;
pub mod core;
pub mod error;
pub mod overrides;
pub mod typemap;

// Re-exports for convenient access
pub use codegen::{
    build_enum, EnumConstant, EnumDefinition, FieldDefinition, Generator, Models, StructBuilder,
    StructDefinition,
};
pub use config::{PackageSettings, RawOverride, RawPackage, RawSettings, Settings};
pub use crate::core::{Catalog, Column, Enum, Fqn, Schema, Table};
pub use error::{GenError, Result};
pub use overrides::{ColumnRef, OverrideRule, TargetType};
pub use typemap::{EnumTypes, GoType, TypeMapper};
