//! Storage platform client trait

use async_trait::async_trait;
use viewforge_core::{BucketDescriptor, TableDescriptor};

/// Errors raised by the storage platform collaborator.
#[derive(Debug, thiserror::Error)]
pub enum StorageError {
    #[error("storage request failed: {0}")]
    Request(String),

    #[error("storage API error ({status}): {message}")]
    Api { status: u16, message: String },

    #[error("invalid storage response: {0}")]
    InvalidResponse(String),

    #[error("bucket not found: {0}")]
    BucketNotFound(String),
}

/// Read-only view of the storage platform.
///
/// Every call blocks the single control flow of a run; implementations do
/// not need to be reentrant.
#[async_trait]
pub trait StoragePlatform: Send + Sync {
    /// List every bucket visible to the token.
    async fn list_buckets(&self) -> Result<Vec<BucketDescriptor>, StorageError>;

    /// Detail of one bucket by id.
    async fn bucket_detail(&self, bucket_id: &str) -> Result<BucketDescriptor, StorageError>;

    /// Tables of a bucket, columns and column metadata included.
    async fn list_tables(&self, bucket_id: &str) -> Result<Vec<TableDescriptor>, StorageError>;
}
