//! Delete command - remove one object and wait until it is gone

use s3c_core::ops;
use s3c_core::{ObjectStore, Settings};

use crate::exit_code::ExitCode;
use crate::output::{Formatter, ProgressBar};

/// Execute the delete
pub async fn execute(
    store: &dyn ObjectStore,
    settings: &Settings,
    key: &str,
    formatter: &Formatter,
) -> ExitCode {
    let spinner = ProgressBar::spinner(formatter.config(), &format!("Deleting {key}..."));
    let result = ops::delete(store, key, settings.wait_timeout()).await;
    spinner.finish_and_clear();

    match result {
        Ok(key) => {
            formatter.println(&format!("Successfully deleted file: {key}"));
            ExitCode::Success
        }
        Err(e) => {
            formatter.error(&e.to_string());
            ExitCode::from(&e)
        }
    }
}
