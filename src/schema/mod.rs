//! Declarative structural checks for items and users.
//!
//! Each [`Shape`] lists the fields a record may carry, which of them are
//! required, their JSON types and, for discriminators, the permitted values.
//! Fields a shape does not list are violations.
mod checker;
mod shapes;
mod types;

#[cfg(test)]
mod tests;

pub use checker::{check, check_item};
pub use types::{FieldSpec, FieldType, Presence, SchemaReport, Shape, ShapeKind, Violation};
