//! Alias and source resolution
//!
//! An alias table does not own its data; it points at a table that may live
//! in another bucket or another project. Views must read from the resolved
//! source, and shared sources (other projects) can be skipped by policy.

use crate::descriptor::TableDescriptor;

/// Effective source of a table after alias resolution.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SourceReference {
    /// Database holding the source, `<prefix>_<projectId>`
    pub database: String,
    pub bucket_id: String,
    pub table_name: String,
    /// True when the source project differs from the current one
    pub is_shared: bool,
}

/// Database name of a project under the configured prefix.
pub fn project_database_name(prefix: &str, project_id: &str) -> String {
    format!("{}_{}", prefix, project_id)
}

/// Resolve the effective source reference of a table.
///
/// Non-alias tables resolve to themselves in the current project. Alias
/// tables carry a `stage.bucket.table` storage id: the first two
/// dot-segments form the bucket id, the remainder the table name.
pub fn resolve_source(
    table: &TableDescriptor,
    bucket_id: &str,
    current_project_id: &str,
    db_prefix: &str,
) -> SourceReference {
    if let (true, Some(source)) = (table.is_alias, table.source_table.as_ref()) {
        let (source_bucket, source_table) = split_storage_id(&source.id);
        return SourceReference {
            database: project_database_name(db_prefix, &source.project.id),
            bucket_id: source_bucket,
            table_name: source_table,
            is_shared: source.project.id != current_project_id,
        };
    }

    SourceReference {
        database: project_database_name(db_prefix, current_project_id),
        bucket_id: bucket_id.to_string(),
        table_name: table.name.clone(),
        is_shared: false,
    }
}

fn split_storage_id(id: &str) -> (String, String) {
    let mut segments = id.splitn(3, '.');
    let stage = segments.next().unwrap_or_default();
    let bucket = segments.next().unwrap_or_default();
    let table = segments.next().unwrap_or_default();
    (format!("{}.{}", stage, bucket), table.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::descriptor::{ProjectRef, SourceTableRef};
    use pretty_assertions::assert_eq;

    fn table(name: &str, source: Option<SourceTableRef>) -> TableDescriptor {
        TableDescriptor {
            id: format!("in.c-main.{}", name),
            name: name.to_string(),
            display_name: name.to_string(),
            is_alias: source.is_some(),
            source_table: source,
            columns: vec![],
            column_metadata: Default::default(),
        }
    }

    fn source_ref(id: &str, project_id: &str) -> SourceTableRef {
        SourceTableRef {
            id: id.to_string(),
            project: ProjectRef {
                id: project_id.to_string(),
            },
        }
    }

    #[test]
    fn plain_table_resolves_to_itself() {
        let resolved = resolve_source(&table("orders", None), "in.c-main", "1", "PROJ");

        assert_eq!(
            resolved,
            SourceReference {
                database: "PROJ_1".to_string(),
                bucket_id: "in.c-main".to_string(),
                table_name: "orders".to_string(),
                is_shared: false,
            }
        );
    }

    #[test]
    fn alias_in_same_project_is_not_shared() {
        let t = table("orders", Some(source_ref("in.c-source.orders_raw", "1")));
        let resolved = resolve_source(&t, "in.c-main", "1", "PROJ");

        assert_eq!(resolved.database, "PROJ_1");
        assert_eq!(resolved.bucket_id, "in.c-source");
        assert_eq!(resolved.table_name, "orders_raw");
        assert!(!resolved.is_shared);
    }

    #[test]
    fn alias_from_other_project_is_shared() {
        let t = table("orders", Some(source_ref("in.c-source.orders", "99")));
        let resolved = resolve_source(&t, "in.c-main", "1", "PROJ");

        assert!(resolved.is_shared);
        assert_eq!(resolved.database, "PROJ_99");
    }

    #[test]
    fn storage_id_splits_on_first_two_segments() {
        let t = table("orders", Some(source_ref("out.c-shared.daily_orders", "99")));
        let resolved = resolve_source(&t, "in.c-main", "1", "PROJ");

        assert_eq!(resolved.bucket_id, "out.c-shared");
        assert_eq!(resolved.table_name, "daily_orders");
    }

    #[test]
    fn alias_flag_without_source_is_treated_as_plain() {
        let mut t = table("orders", None);
        t.is_alias = true;

        let resolved = resolve_source(&t, "in.c-main", "1", "PROJ");
        assert!(!resolved.is_shared);
        assert_eq!(resolved.bucket_id, "in.c-main");
    }
}
