//! Object key normalization
//!
//! Keys are forward-slash paths without a leading slash, whatever separator
//! style the user typed on the command line.

use std::fmt;
use std::path::Path;

use crate::error::{Error, Result};

/// A normalized object key within the configured bucket
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ObjectKey(String);

fn is_separator(c: char) -> bool {
    c == '/' || c == '\\'
}

impl ObjectKey {
    /// Build the upload key for a local file: `directory/basename`
    ///
    /// Empty and `.` segments of the directory are dropped, so `/pics/`,
    /// `pics` and `\pics\` all produce the same prefix.
    pub fn for_upload(directory: Option<&str>, file: &Path) -> Result<Self> {
        let name = file
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .ok_or_else(|| Error::InvalidKey(file.display().to_string()))?;
        let base = name.rsplit(is_separator).next().unwrap_or_default();
        if base.is_empty() {
            return Err(Error::InvalidKey(file.display().to_string()));
        }

        let mut segments: Vec<&str> = directory
            .unwrap_or_default()
            .split(is_separator)
            .filter(|s| !s.is_empty() && *s != ".")
            .collect();
        segments.push(base);

        Ok(Self(segments.join("/")))
    }

    /// Normalize a key given by the user, e.g. for deletion
    pub fn parse(raw: &str) -> Result<Self> {
        let key = raw.replace('\\', "/");
        let key = key.trim_start_matches('/');
        if key.is_empty() {
            return Err(Error::InvalidKey(format!("'{raw}' is empty")));
        }
        Ok(Self(key.to_string()))
    }

    /// The key as sent to the storage service
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Public URL of the object under the given prefix
    pub fn public_url(&self, return_url: &str) -> String {
        format!(
            "{}/{}",
            return_url.trim_end_matches('/'),
            self.0.trim_start_matches('/')
        )
    }
}

impl fmt::Display for ObjectKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl AsRef<str> for ObjectKey {
    fn as_ref(&self) -> &str {
        &self.0
    }
}
