//! ViewForge Core
//!
//! Pure domain model: the configuration surface, storage-platform
//! descriptors, column metadata resolution, the destination naming policy
//! and alias/source resolution. Nothing in this crate talks to the network
//! or the warehouse.

pub mod alias;
pub mod config;
pub mod descriptor;
pub mod metadata;
pub mod naming;

pub use alias::{project_database_name, resolve_source, SourceReference};
pub use config::{
    AuthType, CaseMode, CasePolicy, Config, ConfigError, RunOptions, StorageSettings,
    WarehouseSettings,
};
pub use descriptor::{
    BucketDescriptor, ColumnMetadata, MetadataItem, ProjectRef, SourceTableRef, TableDescriptor,
};
pub use metadata::{resolve_column_datatype, ColumnDatatype, ResolvedAttr};
pub use naming::{convert_case, destination_schema_name, SchemaNameIndex};
