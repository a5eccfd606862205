//! S3 client implementation
//!
//! Wraps aws-sdk-s3 and implements the ObjectStore trait from s3c-core.

use std::path::Path;
use std::time::Duration;

use async_trait::async_trait;
use aws_sdk_s3::client::Waiters;
use aws_sdk_s3::error::DisplayErrorContext;
use aws_sdk_s3::primitives::ByteStream;
use aws_sdk_s3::types::{CompletedMultipartUpload, CompletedPart};
use aws_smithy_runtime_api::client::waiters::error::WaiterError;
use aws_smithy_types::byte_stream::Length;

use s3c_core::{Error, ListPage, ObjectInfo, ObjectKey, ObjectStore, Result, Settings};

use crate::multipart;

/// Provider name attached to credentials taken from the config file
const STATIC_CREDENTIALS_PROVIDER: &str = "s3-client-config-file";

/// S3 client bound to the configured bucket
pub struct S3Client {
    inner: aws_sdk_s3::Client,
    bucket: String,
}

impl S3Client {
    /// Create a new S3 client from settings
    ///
    /// Static credentials are used when both keys are set; with neither set,
    /// the SDK's default credential chain applies.
    pub async fn new(settings: &Settings, force_path_style: bool) -> Result<Self> {
        let mut loader = aws_config::defaults(aws_config::BehaviorVersion::latest());

        match (
            settings.access_key_id.is_empty(),
            settings.secret_access_key.is_empty(),
        ) {
            (false, false) => {
                let credentials = aws_credential_types::Credentials::new(
                    settings.access_key_id.clone(),
                    settings.secret_access_key.clone(),
                    None, // session token
                    None, // expiry
                    STATIC_CREDENTIALS_PROVIDER,
                );
                loader = loader.credentials_provider(credentials);
            }
            (true, true) => {
                tracing::debug!("no keys in config file, using default credential chain");
            }
            _ => {
                return Err(Error::Auth(
                    "both access_key_id and secret_access_key must be set".into(),
                ));
            }
        }

        if !settings.region.is_empty() {
            loader = loader.region(aws_config::Region::new(settings.region.clone()));
        }

        if !settings.endpoint.is_empty() {
            url::Url::parse(&settings.endpoint)?;
            loader = loader.endpoint_url(settings.endpoint.trim_end_matches('/'));
        }

        let config = loader.load().await;

        if config.region().is_none() {
            return Err(Error::Auth(
                "no region configured; set `region` in the config file or AWS_REGION".into(),
            ));
        }
        let s3_config = aws_sdk_s3::config::Builder::from(&config)
            .force_path_style(force_path_style)
            .build();

        tracing::debug!(
            bucket = %settings.bucket,
            endpoint = %settings.endpoint,
            force_path_style,
            "created S3 client"
        );

        Ok(Self {
            inner: aws_sdk_s3::Client::from_conf(s3_config),
            bucket: settings.bucket.clone(),
        })
    }

    /// Get the underlying aws-sdk-s3 client
    pub fn inner(&self) -> &aws_sdk_s3::Client {
        &self.inner
    }

    /// Bucket all calls are made against
    pub fn bucket(&self) -> &str {
        &self.bucket
    }

    /// Upload a large file part by part, aborting the upload on failure
    async fn put_file_multipart(&self, key: &ObjectKey, path: &Path, size: u64) -> Result<()> {
        let mut request = self
            .inner
            .create_multipart_upload()
            .bucket(&self.bucket)
            .key(key.as_str());

        if let Some(ct) = content_type_for(path) {
            request = request.content_type(ct);
        }

        let created = request.send().await.map_err(upload_error)?;
        let upload_id = created
            .upload_id()
            .ok_or_else(|| Error::Remote("Failed to upload file to S3: no upload ID".into()))?
            .to_string();

        let result = self.send_parts(key, path, size, &upload_id).await;

        if let Err(e) = &result {
            tracing::warn!(%key, error = %e, "aborting multipart upload");
            if let Err(abort) = self
                .inner
                .abort_multipart_upload()
                .bucket(&self.bucket)
                .key(key.as_str())
                .upload_id(&upload_id)
                .send()
                .await
            {
                tracing::warn!(%key, error = %DisplayErrorContext(&abort), "abort failed");
            }
        }

        result
    }

    async fn send_parts(
        &self,
        key: &ObjectKey,
        path: &Path,
        size: u64,
        upload_id: &str,
    ) -> Result<()> {
        let mut completed = Vec::new();

        for (index, (offset, length)) in multipart::part_ranges(size).into_iter().enumerate() {
            let part_number = index as i32 + 1;
            let body = ByteStream::read_from()
                .path(path)
                .offset(offset)
                .length(Length::Exact(length))
                .build()
                .await
                .map_err(|e| Error::Io(std::io::Error::other(e)))?;

            let response = self
                .inner
                .upload_part()
                .bucket(&self.bucket)
                .key(key.as_str())
                .upload_id(upload_id)
                .part_number(part_number)
                .body(body)
                .send()
                .await
                .map_err(upload_error)?;

            tracing::debug!(%key, part_number, length, "uploaded part");
            completed.push(
                CompletedPart::builder()
                    .part_number(part_number)
                    .set_e_tag(response.e_tag().map(str::to_string))
                    .build(),
            );
        }

        self.inner
            .complete_multipart_upload()
            .bucket(&self.bucket)
            .key(key.as_str())
            .upload_id(upload_id)
            .multipart_upload(
                CompletedMultipartUpload::builder()
                    .set_parts(Some(completed))
                    .build(),
            )
            .send()
            .await
            .map_err(upload_error)?;

        Ok(())
    }
}

/// Convert an SDK timestamp, dropping values jiff cannot represent
fn to_timestamp(dt: &aws_smithy_types::DateTime) -> Option<jiff::Timestamp> {
    jiff::Timestamp::new(dt.secs(), dt.subsec_nanos() as i32).ok()
}

/// Content type sent with an upload, guessed from the file extension
fn content_type_for(path: &Path) -> Option<String> {
    mime_guess::from_path(path)
        .first()
        .map(|m| m.essence_str().to_string())
}

fn upload_error<E: std::error::Error>(e: E) -> Error {
    Error::Remote(format!(
        "Failed to upload file to S3: {}",
        DisplayErrorContext(&e)
    ))
}

/// Map a waiter failure; running out of time is reported separately
fn wait_error<O, E>(key: &ObjectKey, timeout: Duration, err: WaiterError<O, E>) -> Error
where
    O: std::fmt::Debug,
    E: std::error::Error + 'static,
{
    match err {
        WaiterError::ExceededMaxWait(_) => Error::WaitTimeout(format!(
            "{key} still exists after {}s",
            timeout.as_secs()
        )),
        other => Error::Remote(format!(
            "Failed while waiting for deletion: {}",
            DisplayErrorContext(&other)
        )),
    }
}

#[async_trait]
impl ObjectStore for S3Client {
    async fn object_exists(&self, key: &ObjectKey) -> Result<bool> {
        match self
            .inner
            .head_object()
            .bucket(&self.bucket)
            .key(key.as_str())
            .send()
            .await
        {
            Ok(_) => Ok(true),
            Err(e) => {
                let not_found = e.as_service_error().is_some_and(|se| se.is_not_found())
                    || e.raw_response().is_some_and(|r| r.status().as_u16() == 404);
                if not_found {
                    Ok(false)
                } else {
                    Err(Error::Remote(format!(
                        "Failed to check {key}: {}",
                        DisplayErrorContext(&e)
                    )))
                }
            }
        }
    }

    async fn put_file(&self, key: &ObjectKey, path: &Path) -> Result<()> {
        let size = std::fs::metadata(path)?.len();
        if multipart::needs_multipart(size) {
            tracing::debug!(%key, size, "using multipart upload");
            return self.put_file_multipart(key, path, size).await;
        }

        let body = ByteStream::from_path(path)
            .await
            .map_err(|e| Error::Io(std::io::Error::other(e)))?;

        let mut request = self
            .inner
            .put_object()
            .bucket(&self.bucket)
            .key(key.as_str())
            .body(body);

        if let Some(ct) = content_type_for(path) {
            request = request.content_type(ct);
        }

        request.send().await.map_err(upload_error)?;

        Ok(())
    }

    async fn list_page(&self, continuation_token: Option<String>) -> Result<ListPage> {
        let mut request = self.inner.list_objects_v2().bucket(&self.bucket);

        if let Some(token) = continuation_token {
            request = request.continuation_token(token);
        }

        let response = request.send().await.map_err(|e| {
            Error::Remote(format!("Failed to list files: {}", DisplayErrorContext(&e)))
        })?;

        let items = response
            .contents()
            .iter()
            .map(|object| {
                let mut info = ObjectInfo::new(
                    object.key().unwrap_or_default(),
                    object.size().unwrap_or(0),
                );
                info.last_modified = object.last_modified().and_then(to_timestamp);
                info
            })
            .collect();

        let next_token = if response.is_truncated().unwrap_or(false) {
            response.next_continuation_token().map(|s| s.to_string())
        } else {
            None
        };

        Ok(ListPage { items, next_token })
    }

    async fn delete_object(&self, key: &ObjectKey) -> Result<()> {
        self.inner
            .delete_object()
            .bucket(&self.bucket)
            .key(key.as_str())
            .send()
            .await
            .map_err(|e| {
                Error::Remote(format!("Failed to delete file: {}", DisplayErrorContext(&e)))
            })?;

        Ok(())
    }

    async fn wait_absent(&self, key: &ObjectKey, timeout: Duration) -> Result<()> {
        self.inner
            .wait_until_object_not_exists()
            .bucket(&self.bucket)
            .key(key.as_str())
            .wait(timeout)
            .await
            .map_err(|e| wait_error(key, timeout, e))?;

        Ok(())
    }
}
