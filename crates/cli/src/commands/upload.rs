//! Upload command - send one local file to the bucket
//!
//! Asks before replacing an existing object unless `-overwrite` is given,
//! and reports the public URL of the uploaded file.

use std::path::PathBuf;

use s3c_core::ops::{self, Confirm, UploadRequest, UploadResult};
use s3c_core::{Error, ObjectStore, Settings};

use crate::exit_code::ExitCode;
use crate::output::Formatter;

/// Arguments of an upload
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UploadArgs {
    /// Local file to upload
    pub file: PathBuf,
    /// Key prefix in the bucket
    pub directory: Option<String>,
    /// Replace an existing object without asking
    pub overwrite: bool,
}

/// Execute the upload
pub async fn execute(
    store: &dyn ObjectStore,
    settings: &Settings,
    args: &UploadArgs,
    formatter: &Formatter,
    confirm: &mut dyn Confirm,
) -> ExitCode {
    let request = UploadRequest {
        file: &args.file,
        directory: args.directory.as_deref(),
        overwrite: args.overwrite,
    };

    match ops::upload(store, settings, request, confirm).await {
        Ok(result) => {
            for line in verbose_lines(args, settings, &result) {
                formatter.verbose(&line);
            }
            formatter.println(&format!("Successfully uploaded. File URL: {}", result.url));
            ExitCode::Success
        }
        Err(Error::UploadCancelled) => {
            formatter.println(&Error::UploadCancelled.to_string());
            ExitCode::Success
        }
        Err(e) => {
            formatter.error(&e.to_string());
            ExitCode::from(&e)
        }
    }
}

/// Extra lines printed with `-v` after a successful upload
fn verbose_lines(args: &UploadArgs, settings: &Settings, result: &UploadResult) -> Vec<String> {
    vec![
        format!("Uploaded file: {}", args.file.display()),
        format!(
            "Size: {}",
            humansize::format_size(result.size_bytes, humansize::BINARY)
        ),
        format!("Endpoint: {}", settings.endpoint),
    ]
}
