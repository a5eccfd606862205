//! ObjectStore trait definition
//!
//! This trait defines the handful of storage calls the CLI needs. It keeps
//! the operations in this crate decoupled from the S3 SDK, so they can be
//! tested against a mock.

use std::path::Path;
use std::time::Duration;

use async_trait::async_trait;

use crate::error::Result;
use crate::key::ObjectKey;

/// Metadata for a listed object
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ObjectInfo {
    /// Object key
    pub key: String,

    /// Size in bytes
    pub size_bytes: i64,

    /// Last modified timestamp
    pub last_modified: Option<jiff::Timestamp>,
}

impl ObjectInfo {
    /// Create a new ObjectInfo without a timestamp
    pub fn new(key: impl Into<String>, size_bytes: i64) -> Self {
        Self {
            key: key.into(),
            size_bytes,
            last_modified: None,
        }
    }
}

/// One page of a bucket listing
#[derive(Debug, Clone, Default)]
pub struct ListPage {
    /// Objects on this page
    pub items: Vec<ObjectInfo>,

    /// Token for the next page, `None` on the last page
    pub next_token: Option<String>,
}

/// Storage calls against a single bucket
///
/// Implemented by the S3 adapter and mocked in tests.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait ObjectStore: Send + Sync {
    /// Whether an object exists under the key
    async fn object_exists(&self, key: &ObjectKey) -> Result<bool>;

    /// Stream a local file to the key, replacing any existing object
    async fn put_file(&self, key: &ObjectKey, path: &Path) -> Result<()>;

    /// Fetch one page of the bucket listing
    async fn list_page(&self, continuation_token: Option<String>) -> Result<ListPage>;

    /// Delete the object under the key
    async fn delete_object(&self, key: &ObjectKey) -> Result<()>;

    /// Block until the key no longer resolves, or fail once `timeout` elapses
    async fn wait_absent(&self, key: &ObjectKey, timeout: Duration) -> Result<()>;
}
