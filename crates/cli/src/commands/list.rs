//! List command - print every object in the bucket

use s3c_core::ops;
use s3c_core::{ObjectInfo, ObjectStore, Settings};

use crate::exit_code::ExitCode;
use crate::output::{Formatter, ProgressBar};

/// Timestamp layout used for `Last modified`
const TIME_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// Execute the listing
pub async fn execute(
    store: &dyn ObjectStore,
    settings: &Settings,
    formatter: &Formatter,
) -> ExitCode {
    formatter.println(&format!("Files in bucket '{}':", settings.bucket));

    // Drawn until the first object is printed
    let spinner = ProgressBar::spinner(formatter.config(), "Listing objects...");
    let mut total_size: i64 = 0;
    let result = ops::list_all(store, |item| {
        spinner.finish_and_clear();
        total_size += item.size_bytes;
        formatter.println(&format_object_line(item));
    })
    .await;
    spinner.finish_and_clear();

    match result {
        Ok(count) => {
            formatter.verbose(&format!(
                "Total: {count} objects, {}",
                humansize::format_size(total_size.max(0) as u64, humansize::BINARY)
            ));
            ExitCode::Success
        }
        Err(e) => {
            formatter.error(&e.to_string());
            ExitCode::from(&e)
        }
    }
}

/// One line of listing output
fn format_object_line(item: &ObjectInfo) -> String {
    let modified = item
        .last_modified
        .map(|t| t.strftime(TIME_FORMAT).to_string())
        .unwrap_or_else(|| "unknown".to_string());
    format!(
        "- {} (Size: {} bytes, Last modified: {modified})",
        item.key, item.size_bytes
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::commands::testing::{settings, FakeStore};
    use crate::output::OutputConfig;

    #[test]
    fn test_format_object_line() {
        let mut item = ObjectInfo::new("pics/photo.png", 2048);
        item.last_modified = Some(jiff::Timestamp::from_second(1_700_000_000).unwrap());
        insta::assert_snapshot!(
            format_object_line(&item),
            @"- pics/photo.png (Size: 2048 bytes, Last modified: 2023-11-14 22:13:20)"
        );
    }

    #[test]
    fn test_format_object_line_without_timestamp() {
        let item = ObjectInfo::new("notes.txt", 0);
        insta::assert_snapshot!(
            format_object_line(&item),
            @"- notes.txt (Size: 0 bytes, Last modified: unknown)"
        );
    }

    #[tokio::test]
    async fn test_list_success() {
        let store = FakeStore::with_keys(&["a.txt", "b.txt", "c.txt"]);
        let code = execute(&store, &settings(), &Formatter::default()).await;
        assert_eq!(code, ExitCode::Success);
    }

    #[tokio::test]
    async fn test_list_with_spinner() {
        let formatter = Formatter::new(OutputConfig {
            progress: true,
            ..Default::default()
        });

        let store = FakeStore::with_keys(&["a.txt", "b.txt"]);
        assert_eq!(execute(&store, &settings(), &formatter).await, ExitCode::Success);

        let empty = FakeStore::default();
        assert_eq!(execute(&empty, &settings(), &formatter).await, ExitCode::Success);
        assert_eq!(empty.calls(), 1);
    }

    #[tokio::test]
    async fn test_list_failure() {
        let store = FakeStore::failing();
        let code = execute(&store, &settings(), &Formatter::default()).await;
        assert_eq!(code, ExitCode::GeneralError);
    }
}
