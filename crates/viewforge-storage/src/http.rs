//! HTTP client for the storage platform API
//!
//! Thin wrapper over the platform's JSON endpoints. The token travels in
//! the `X-StorageApi-Token` header; all calls are plain GETs.

use serde::de::DeserializeOwned;
use tracing::debug;
use viewforge_core::{BucketDescriptor, TableDescriptor};

use crate::client::{StorageError, StoragePlatform};

const TOKEN_HEADER: &str = "X-StorageApi-Token";

/// Storage platform client over HTTP.
pub struct HttpStorageClient {
    base_url: String,
    token: String,
    client: reqwest::Client,
}

impl HttpStorageClient {
    pub fn new(base_url: impl Into<String>, token: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into().trim_end_matches('/').to_string(),
            token: token.into(),
            client: reqwest::Client::new(),
        }
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    async fn get_json<T: DeserializeOwned>(&self, path: &str) -> Result<T, StorageError> {
        let url = self.url(path);
        debug!(url = %url, "storage API request");

        let response = self
            .client
            .get(&url)
            .header(TOKEN_HEADER, &self.token)
            .send()
            .await
            .map_err(|e| StorageError::Request(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            let message = response.text().await.unwrap_or_default();
            return Err(StorageError::Api {
                status: status.as_u16(),
                message,
            });
        }

        response
            .json()
            .await
            .map_err(|e| StorageError::InvalidResponse(e.to_string()))
    }
}

#[async_trait::async_trait]
impl StoragePlatform for HttpStorageClient {
    async fn list_buckets(&self) -> Result<Vec<BucketDescriptor>, StorageError> {
        self.get_json("/v2/storage/buckets").await
    }

    async fn bucket_detail(&self, bucket_id: &str) -> Result<BucketDescriptor, StorageError> {
        self.get_json(&format!("/v2/storage/buckets/{}", bucket_id))
            .await
    }

    async fn list_tables(&self, bucket_id: &str) -> Result<Vec<TableDescriptor>, StorageError> {
        self.get_json(&format!(
            "/v2/storage/buckets/{}/tables?include=columns,columnMetadata",
            bucket_id
        ))
        .await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn base_url_trailing_slash_is_normalized() {
        let client = HttpStorageClient::new("https://connection.example.com/", "token");
        assert_eq!(
            client.url("/v2/storage/buckets"),
            "https://connection.example.com/v2/storage/buckets"
        );
    }
}
