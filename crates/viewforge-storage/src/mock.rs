//! In-memory storage platform for tests
//!
//! Holds predefined buckets and tables and serves them without a network.
//! Useful for exercising the engine end to end and for simulating listing
//! failures.

use std::collections::HashMap;

use viewforge_core::{BucketDescriptor, TableDescriptor};

use crate::client::{StorageError, StoragePlatform};

/// Storage platform stub serving predefined descriptors.
#[derive(Default)]
pub struct MockStorage {
    buckets: Vec<BucketDescriptor>,
    tables: HashMap<String, Vec<TableDescriptor>>,
    fail_listing: bool,
}

impl MockStorage {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a bucket together with its tables.
    pub fn with_bucket(mut self, bucket: BucketDescriptor, tables: Vec<TableDescriptor>) -> Self {
        self.tables.insert(bucket.id.clone(), tables);
        self.buckets.push(bucket);
        self
    }

    /// Make `list_buckets` fail, simulating an unreachable platform.
    pub fn with_listing_failure(mut self) -> Self {
        self.fail_listing = true;
        self
    }
}

#[async_trait::async_trait]
impl StoragePlatform for MockStorage {
    async fn list_buckets(&self) -> Result<Vec<BucketDescriptor>, StorageError> {
        if self.fail_listing {
            return Err(StorageError::Request("simulated listing failure".to_string()));
        }
        Ok(self.buckets.clone())
    }

    async fn bucket_detail(&self, bucket_id: &str) -> Result<BucketDescriptor, StorageError> {
        self.buckets
            .iter()
            .find(|b| b.id == bucket_id)
            .cloned()
            .ok_or_else(|| StorageError::BucketNotFound(bucket_id.to_string()))
    }

    async fn list_tables(&self, bucket_id: &str) -> Result<Vec<TableDescriptor>, StorageError> {
        self.tables
            .get(bucket_id)
            .cloned()
            .ok_or_else(|| StorageError::BucketNotFound(bucket_id.to_string()))
    }
}
