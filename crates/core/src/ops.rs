//! Upload, list and delete operations
//!
//! Each operation wraps one remote call with the small amount of policy the
//! CLI adds on top: overwrite confirmation and URL construction for uploads,
//! page draining for listings, and waiting for absence after deletes.

use std::path::Path;
use std::time::Duration;

use crate::config::Settings;
use crate::error::{Error, Result};
use crate::key::ObjectKey;
use crate::traits::{ObjectInfo, ObjectStore};

/// Question asked before replacing an existing object
pub const OVERWRITE_PROMPT: &str = "The file already exists. Overwrite? [y/n] > ";

/// Source of yes/no answers for interactive questions
pub trait Confirm {
    /// Ask `prompt` and report whether the answer was affirmative
    fn confirm(&mut self, prompt: &str) -> Result<bool>;
}

impl<F> Confirm for F
where
    F: FnMut(&str) -> bool,
{
    fn confirm(&mut self, prompt: &str) -> Result<bool> {
        Ok(self(prompt))
    }
}

/// `y` or `yes`, case-insensitive
pub fn is_affirmative(answer: &str) -> bool {
    matches!(answer.trim().to_ascii_lowercase().as_str(), "y" | "yes")
}

/// Parameters of a single file upload
#[derive(Debug, Clone, Copy)]
pub struct UploadRequest<'a> {
    /// Local file to send
    pub file: &'a Path,
    /// Optional key prefix inside the bucket
    pub directory: Option<&'a str>,
    /// Replace an existing object without asking
    pub overwrite: bool,
}

/// Outcome of a successful upload
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UploadResult {
    /// Key the file was stored under
    pub key: ObjectKey,
    /// Public URL built from `returnurl` and the key
    pub url: String,
    /// Size of the uploaded file
    pub size_bytes: u64,
}

/// Upload a local file, asking before overwriting an existing object
pub async fn upload(
    store: &dyn ObjectStore,
    settings: &Settings,
    request: UploadRequest<'_>,
    confirm: &mut dyn Confirm,
) -> Result<UploadResult> {
    let file_label = request.file.display().to_string();
    let metadata = match std::fs::metadata(request.file) {
        Ok(m) if m.is_file() => m,
        Ok(_) => return Err(Error::FileNotFound(format!("{file_label} (not a regular file)"))),
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
            return Err(Error::FileNotFound(file_label));
        }
        Err(e) => return Err(Error::Io(e)),
    };

    let key = ObjectKey::for_upload(request.directory, request.file)?;

    if !request.overwrite && store.object_exists(&key).await? {
        tracing::debug!(%key, "object already exists, asking before overwrite");
        if !confirm.confirm(OVERWRITE_PROMPT)? {
            return Err(Error::UploadCancelled);
        }
    }

    tracing::debug!(%key, file = %file_label, size = metadata.len(), "uploading");
    store.put_file(&key, request.file).await?;

    Ok(UploadResult {
        url: key.public_url(&settings.return_url),
        key,
        size_bytes: metadata.len(),
    })
}

/// Walk every page of the bucket listing, handing each object to `emit`
///
/// Objects are emitted as pages arrive; a failing page stops the walk after
/// the earlier pages have been emitted. Returns the number of objects seen.
pub async fn list_all<F>(store: &dyn ObjectStore, mut emit: F) -> Result<usize>
where
    F: FnMut(&ObjectInfo),
{
    let mut token: Option<String> = None;
    let mut count = 0;

    loop {
        let page = store.list_page(token.take()).await?;
        tracing::debug!(items = page.items.len(), more = page.next_token.is_some(), "listed page");

        for item in &page.items {
            emit(item);
        }
        count += page.items.len();

        match page.next_token {
            Some(next) => token = Some(next),
            None => break,
        }
    }

    Ok(count)
}

/// Delete an object and wait until the store confirms it is gone
pub async fn delete(
    store: &dyn ObjectStore,
    raw_key: &str,
    timeout: Duration,
) -> Result<ObjectKey> {
    let key = ObjectKey::parse(raw_key)?;

    tracing::debug!(%key, "deleting");
    store.delete_object(&key).await?;

    tracing::debug!(%key, timeout_secs = timeout.as_secs(), "waiting for object to disappear");
    store.wait_absent(&key, timeout).await?;

    Ok(key)
}
