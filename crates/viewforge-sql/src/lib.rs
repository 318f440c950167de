//! SQL text assembly for generated schemas and views
//!
//! Statements are plain strings built from guarded fragments: any
//! caller-supplied value crosses the [`SqlFragment`] boundary or is checked
//! at the top of the statement builder. Identifiers and casts generated
//! internally are quoted and controlled.

pub mod builder;
pub mod fragment;

pub use builder::{
    build_column_projection, build_schema_statement, build_view_statement, qualified_name,
    timestamp_projection, SchemaMode,
};
pub use fragment::{SqlFragment, ValidationError};
