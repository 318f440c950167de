//! Storage-platform descriptors
//!
//! Shapes returned by the storage platform API. Field names follow the
//! platform's camelCase JSON; every descriptor is a plain value object
//! produced and consumed within a single run.

use serde::{Deserialize, Deserializer};
use std::collections::HashMap;

/// One column-metadata entry as stored by the platform.
///
/// Entries are ordered by insertion time; the last entry for a key is the
/// latest one.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct MetadataItem {
    pub key: String,
    pub value: String,
    #[serde(default)]
    pub provider: String,
}

/// Column name to ordered metadata entries.
pub type ColumnMetadata = HashMap<String, Vec<MetadataItem>>;

/// Project identity attached to a shared source table.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct ProjectRef {
    #[serde(deserialize_with = "lenient_id")]
    pub id: String,
}

/// Reference to the true source of an alias table.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SourceTableRef {
    /// Storage id in `stage.bucket.table` form
    pub id: String,
    pub project: ProjectRef,
}

/// A table as listed within a bucket, with columns and metadata included.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TableDescriptor {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub display_name: String,
    #[serde(default)]
    pub is_alias: bool,
    #[serde(default)]
    pub source_table: Option<SourceTableRef>,
    #[serde(default)]
    pub columns: Vec<String>,
    /// The platform serializes an empty metadata object as an empty list.
    #[serde(default, deserialize_with = "empty_list_as_map")]
    pub column_metadata: ColumnMetadata,
}

/// A bucket as returned by the listing and detail calls.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BucketDescriptor {
    pub id: String,
    pub stage: String,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub display_name: String,
    /// Present when the bucket is itself linked from another project.
    #[serde(default)]
    pub source_bucket: Option<serde_json::Value>,
}

impl BucketDescriptor {
    /// A bucket is shared when its true source lives in another project.
    pub fn is_shared(&self) -> bool {
        self.source_bucket.is_some()
    }
}

/// Accept numeric or string ids; the platform is not consistent about it.
pub(crate) fn lenient_id<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum IdRepr {
        Num(u64),
        Str(String),
    }

    Ok(match IdRepr::deserialize(deserializer)? {
        IdRepr::Num(n) => n.to_string(),
        IdRepr::Str(s) => s,
    })
}

fn empty_list_as_map<'de, D>(deserializer: D) -> Result<ColumnMetadata, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum MapOrList {
        Map(ColumnMetadata),
        List(Vec<serde_json::Value>),
    }

    match MapOrList::deserialize(deserializer)? {
        MapOrList::Map(map) => Ok(map),
        MapOrList::List(list) if list.is_empty() => Ok(ColumnMetadata::new()),
        MapOrList::List(_) => Err(serde::de::Error::custom(
            "columnMetadata in list form must be empty",
        )),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn table_with_metadata_map() {
        let json = r#"{
            "id": "in.c-main.orders",
            "name": "orders",
            "displayName": "orders",
            "isAlias": false,
            "columns": ["id", "amount"],
            "columnMetadata": {
                "id": [
                    {"key": "storage.datatype.basetype", "value": "INTEGER", "provider": "p1"}
                ]
            }
        }"#;

        let table: TableDescriptor = serde_json::from_str(json).unwrap();
        assert_eq!(table.columns, vec!["id", "amount"]);
        assert_eq!(table.column_metadata["id"][0].value, "INTEGER");
        assert!(!table.is_alias);
        assert!(table.source_table.is_none());
    }

    #[test]
    fn empty_metadata_arrives_as_list() {
        let json = r#"{
            "id": "in.c-main.orders",
            "name": "orders",
            "columns": ["id"],
            "columnMetadata": []
        }"#;

        let table: TableDescriptor = serde_json::from_str(json).unwrap();
        assert!(table.column_metadata.is_empty());
    }

    #[test]
    fn alias_table_with_numeric_project_id() {
        let json = r#"{
            "id": "in.c-main.orders",
            "name": "orders",
            "isAlias": true,
            "sourceTable": {"id": "in.c-source.orders", "project": {"id": 99}},
            "columns": []
        }"#;

        let table: TableDescriptor = serde_json::from_str(json).unwrap();
        let source = table.source_table.unwrap();
        assert_eq!(source.id, "in.c-source.orders");
        assert_eq!(source.project.id, "99");
    }

    #[test]
    fn bucket_shared_marker() {
        let linked: BucketDescriptor = serde_json::from_str(
            r#"{"id": "in.c-main", "stage": "in", "displayName": "main",
                "sourceBucket": {"id": "in.c-org", "project": {"id": 7}}}"#,
        )
        .unwrap();
        let own: BucketDescriptor = serde_json::from_str(
            r#"{"id": "in.c-main", "stage": "in", "displayName": "main"}"#,
        )
        .unwrap();

        assert!(linked.is_shared());
        assert!(!own.is_shared());
    }
}
