//! Catalog model and identifier rules shared by the rest of the crate.
//!
//! - [`schema`]: catalog, schema, table, column, and enum metadata
//! - [`identifier`]: turning catalog names into Go identifiers

pub mod identifier;
pub mod schema;

pub use schema::{Catalog, Column, Enum, Fqn, Schema, Table, DEFAULT_SCHEMA};
