//! s3c-core: Core library for the s3-client CLI
//!
//! This crate provides everything the CLI does apart from talking to S3:
//! - Configuration discovery and parsing
//! - Object key normalization
//! - The ObjectStore trait the S3 adapter implements
//! - The upload, list and delete operations
//!
//! It does not depend on any S3 SDK, so the operations can be tested against
//! a mock store.

pub mod config;
pub mod error;
pub mod key;
pub mod ops;
pub mod traits;

pub use config::{ConfigLoader, Settings};
pub use error::{Error, Result};
pub use key::ObjectKey;
pub use ops::{Confirm, UploadRequest, UploadResult};
pub use traits::{ListPage, ObjectInfo, ObjectStore};
