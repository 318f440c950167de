//! Storage-platform collaborator
//!
//! Read-only access to buckets, tables and column metadata. The engine
//! works against the [`StoragePlatform`] trait; [`HttpStorageClient`] talks
//! to the real API and [`MockStorage`] serves tests without a network.

pub mod client;
pub mod http;
pub mod mock;

pub use client::{StorageError, StoragePlatform};
pub use http::HttpStorageClient;
pub use mock::MockStorage;
