//! One generation run over one warehouse session

use serde::Serialize;
use tracing::{debug, info};

use viewforge_core::{
    convert_case, project_database_name, resolve_source, Config, ConfigError, SchemaNameIndex,
};
use viewforge_sql as sql;
use viewforge_storage::{StorageError, StoragePlatform};
use viewforge_warehouse::{SessionError, WarehouseSession};

/// Errors raised during a run, in the order they can occur.
#[derive(Debug, thiserror::Error)]
pub enum EngineError {
    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error(transparent)]
    Storage(#[from] StorageError),

    #[error(transparent)]
    Validation(#[from] sql::ValidationError),

    #[error(transparent)]
    Session(#[from] SessionError),
}

/// Outcome counters of one run.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct RunSummary {
    pub schemas_created: usize,
    pub views_created: usize,
    pub buckets_skipped: usize,
    pub tables_skipped: usize,
}

/// Bucket id/label pair for the surrounding tool's UI.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct BucketOption {
    pub value: String,
    pub label: String,
}

/// Read-only bucket listing, outside the generation flow.
pub async fn list_buckets(
    storage: &dyn StoragePlatform,
) -> Result<Vec<BucketOption>, EngineError> {
    let buckets = storage.list_buckets().await?;
    Ok(buckets
        .into_iter()
        .map(|bucket| BucketOption {
            label: format!("({}) {}", bucket.stage, bucket.name),
            value: bucket.id,
        })
        .collect())
}

/// Generate views for every configured bucket.
///
/// The session is closed on every exit path, success or error; the caller
/// only opens it.
pub async fn run(
    storage: &dyn StoragePlatform,
    session: &mut dyn WarehouseSession,
    config: &Config,
) -> Result<RunSummary, EngineError> {
    let result = generate(storage, session, config).await;
    session.close().await;
    result
}

async fn generate(
    storage: &dyn StoragePlatform,
    session: &mut dyn WarehouseSession,
    config: &Config,
) -> Result<RunSummary, EngineError> {
    let options = &config.options;

    let bucket_ids = if config.bucket_ids.is_empty() {
        info!("no buckets specified, processing all available buckets");
        storage
            .list_buckets()
            .await?
            .into_iter()
            .map(|bucket| bucket.id)
            .collect()
    } else {
        config.bucket_ids.clone()
    };

    let mut buckets = Vec::with_capacity(bucket_ids.len());
    for bucket_id in &bucket_ids {
        buckets.push(storage.bucket_detail(bucket_id).await?);
    }

    // Fail-fast: every destination name is computed and checked for
    // duplicates before the first statement reaches the warehouse.
    let names = SchemaNameIndex::build(
        &buckets,
        options.use_bucket_alias,
        options.drop_stage_prefix,
    )?;

    if let Some(role) = config.warehouse.role.as_deref().filter(|r| !r.is_empty()) {
        session.use_role(role).await?;
    }

    let destination_db = sql::SqlFragment::new(config.destination_db.as_str())?;
    let project_id = config.storage.project_id.as_str();
    let mut summary = RunSummary::default();

    for bucket in &buckets {
        if bucket.is_shared() && options.skip_shared_tables {
            info!(bucket = %bucket.id, "skipping shared bucket");
            summary.buckets_skipped += 1;
            continue;
        }

        let Some(schema_name) = names.get(&bucket.id) else {
            continue;
        };
        let schema =
            sql::SqlFragment::new(convert_case(schema_name, options.case.schema))?;

        info!(bucket = %bucket.id, schema = %schema, database = %config.destination_db,
            "creating views for bucket");
        let statement = sql::build_schema_statement(
            &destination_db,
            &schema,
            sql::SchemaMode::IfNotExists,
            false,
        );
        session.execute(&statement).await?;
        summary.schemas_created += 1;

        for table in &storage.list_tables(&bucket.id).await? {
            let resolved = resolve_source(table, &bucket.id, project_id, &config.db_name_prefix);
            if resolved.is_shared && options.skip_shared_tables {
                debug!(table = %table.name, "skipping shared table");
                summary.tables_skipped += 1;
                continue;
            }

            // With table aliasing off, the view reads the local copy of the
            // table rather than its resolved source.
            let (source_db, source_bucket, source_table) = if options.use_table_alias {
                (
                    resolved.database,
                    resolved.bucket_id,
                    resolved.table_name,
                )
            } else {
                (
                    project_database_name(&config.db_name_prefix, project_id),
                    bucket.id.clone(),
                    table.name.clone(),
                )
            };

            let mut projections = Vec::with_capacity(table.columns.len() + 1);
            for column in &table.columns {
                let datatype =
                    viewforge_core::resolve_column_datatype(&table.column_metadata, column);
                projections.push(sql::build_column_projection(
                    column,
                    &datatype,
                    options.case.column,
                ));
            }
            projections.push(sql::timestamp_projection());

            let view = sql::SqlFragment::new(convert_case(&table.name, options.case.view))?;
            let destination = sql::qualified_name(&destination_db, &schema, &view);
            let source = sql::qualified_name(
                &sql::SqlFragment::new(source_db)?,
                &sql::SqlFragment::new(source_bucket)?,
                &sql::SqlFragment::new(source_table)?,
            );

            let statement = sql::build_view_statement(&destination, &source, &projections, true)?;
            session.execute(&statement).await?;
            summary.views_created += 1;
        }
    }

    Ok(summary)
}
