//! CLI flag definitions and dispatch
//!
//! Each invocation performs exactly one action: list, delete or upload.
//! Flags are accepted in single-dash form (`-file`, `-list`) as well as
//! clap's double-dash form.

use std::ffi::OsString;
use std::path::PathBuf;

use clap::Parser;
use s3c_core::{ConfigLoader, ObjectStore, Settings};
use s3c_s3::S3Client;

use crate::exit_code::ExitCode;
use crate::output::{Formatter, OutputConfig};
use crate::prompt::StdinConfirm;

mod delete;
mod list;
mod upload;

#[cfg(test)]
pub(crate) mod testing;

pub use upload::UploadArgs;

/// Printed when no action flag is given
pub const NO_ACTION_GUIDANCE: &str =
    "No file specified for upload. Use -file to specify a file or -list to list bucket contents.";

/// Long flags that may be written with a single dash
const LONG_FLAGS: &[&str] = &[
    "file",
    "directory",
    "list",
    "delete",
    "overwrite",
    "force-path-style",
    "config",
    "verbose",
    "help",
    "version",
];

/// s3-client - upload, list and delete files in an S3-compatible bucket
#[derive(Parser, Debug)]
#[command(name = "s3-client")]
#[command(version, about, long_about = None)]
pub struct Cli {
    /// Path to the file to upload
    #[arg(long, value_name = "PATH")]
    pub file: Option<PathBuf>,

    /// Directory in the bucket to upload the file to
    #[arg(long, value_name = "PREFIX")]
    pub directory: Option<String>,

    /// List files in the bucket
    #[arg(long)]
    pub list: bool,

    /// Key of the file to delete from the bucket
    #[arg(long, value_name = "KEY")]
    pub delete: Option<String>,

    /// Overwrite the file if it already exists in the bucket
    #[arg(long)]
    pub overwrite: bool,

    /// Address objects as endpoint/bucket/key
    #[arg(long)]
    pub force_path_style: bool,

    /// Path to the configuration file
    #[arg(long, env = "S3_CLIENT_CONFIG", value_name = "PATH")]
    pub config: Option<PathBuf>,

    /// Enable verbose output
    #[arg(short = 'v', long)]
    pub verbose: bool,
}

/// The single operation an invocation performs
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Action {
    /// List every object in the bucket
    List,
    /// Delete one object and wait until it is gone
    Delete(String),
    /// Upload one local file
    Upload(UploadArgs),
}

impl Cli {
    /// Pick the action to run
    ///
    /// When several are given, list wins over delete, and delete over upload.
    pub fn action(&self) -> Option<Action> {
        let requested = [self.list, self.delete.is_some(), self.file.is_some()]
            .into_iter()
            .filter(|&given| given)
            .count();
        if requested > 1 {
            tracing::warn!(
                "more than one action given; only the first of list, delete, upload runs"
            );
        }

        if self.list {
            return Some(Action::List);
        }
        if let Some(key) = &self.delete {
            return Some(Action::Delete(key.clone()));
        }
        self.file.as_ref().map(|file| {
            Action::Upload(UploadArgs {
                file: file.clone(),
                directory: self.directory.clone(),
                overwrite: self.overwrite,
            })
        })
    }
}

/// Rewrite single-dash long flags (`-file x`, `-list`) into `--file x`, `--list`
///
/// The first argument is the program name and is left alone, as is
/// everything after a bare `--`.
pub fn normalize_args<I, S>(args: I) -> Vec<OsString>
where
    I: IntoIterator<Item = S>,
    S: Into<OsString>,
{
    let mut passthrough = false;

    args.into_iter()
        .map(Into::into)
        .enumerate()
        .map(|(i, arg)| {
            if i == 0 || passthrough {
                return arg;
            }
            let Some(s) = arg.to_str() else {
                return arg;
            };
            if s == "--" {
                passthrough = true;
                return arg;
            }
            match s.strip_prefix('-') {
                Some(rest) if !rest.starts_with('-') => {
                    let name = rest.split('=').next().unwrap_or_default();
                    if LONG_FLAGS.contains(&name) {
                        OsString::from(format!("-{s}"))
                    } else {
                        arg
                    }
                }
                _ => arg,
            }
        })
        .collect()
}

/// Execute the CLI and return an exit code
pub async fn execute(cli: Cli) -> ExitCode {
    let formatter = Formatter::new(OutputConfig {
        verbose: cli.verbose,
        progress: console::Term::stderr().is_term(),
    });

    let Some(action) = cli.action() else {
        formatter.println(NO_ACTION_GUIDANCE);
        return ExitCode::GeneralError;
    };

    let settings = match ConfigLoader::new().load(cli.config.as_deref()) {
        Ok((path, settings)) => {
            tracing::debug!(path = %path.display(), ?settings, "loaded settings");
            settings
        }
        Err(e) => {
            formatter.error(&e.to_string());
            return ExitCode::from(&e);
        }
    };

    let client = match S3Client::new(&settings, cli.force_path_style).await {
        Ok(c) => c,
        Err(e) => {
            formatter.error(&e.to_string());
            return ExitCode::from(&e);
        }
    };

    run(action, &client, &settings, &formatter).await
}

/// Run one action against a store
pub async fn run(
    action: Action,
    store: &dyn ObjectStore,
    settings: &Settings,
    formatter: &Formatter,
) -> ExitCode {
    match action {
        Action::List => list::execute(store, settings, formatter).await,
        Action::Delete(key) => delete::execute(store, settings, &key, formatter).await,
        Action::Upload(args) => {
            upload::execute(store, settings, &args, formatter, &mut StdinConfirm).await
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(args: &[&str]) -> Cli {
        let mut argv = vec!["s3-client"];
        argv.extend_from_slice(args);
        Cli::try_parse_from(normalize_args(argv)).unwrap()
    }

    #[test]
    fn test_normalize_single_dash_flags() {
        let args = normalize_args([
            "s3-client",
            "-file",
            "photo.png",
            "-directory=/pics",
            "-force-path-style",
            "-v",
        ]);
        assert_eq!(
            args,
            vec![
                "s3-client",
                "--file",
                "photo.png",
                "--directory=/pics",
                "--force-path-style",
                "-v",
            ]
        );
    }

    #[test]
    fn test_normalize_leaves_values_and_double_dash_alone() {
        let args = normalize_args(["s3-client", "--list", "-delete", "-x", "--", "-file"]);
        assert_eq!(args, vec!["s3-client", "--list", "--delete", "-x", "--", "-file"]);
    }

    #[test]
    fn test_parse_upload() {
        let cli = parse(&["-file", "photo.png", "-directory", "/pics", "-overwrite"]);
        assert_eq!(
            cli.action(),
            Some(Action::Upload(UploadArgs {
                file: PathBuf::from("photo.png"),
                directory: Some("/pics".to_string()),
                overwrite: true,
            }))
        );
        assert!(!cli.force_path_style);
    }

    #[test]
    fn test_parse_list_and_delete() {
        assert_eq!(parse(&["-list"]).action(), Some(Action::List));
        assert_eq!(
            parse(&["-delete", "/pics/photo.png"]).action(),
            Some(Action::Delete("/pics/photo.png".to_string()))
        );
    }

    #[test]
    fn test_action_precedence() {
        let cli = parse(&["-file", "a.txt", "-delete", "b.txt", "-list"]);
        assert_eq!(cli.action(), Some(Action::List));

        let cli = parse(&["-file", "a.txt", "-delete", "b.txt"]);
        assert_eq!(cli.action(), Some(Action::Delete("b.txt".to_string())));
    }

    #[test]
    fn test_no_action() {
        let cli = parse(&["-v", "-force-path-style"]);
        assert!(cli.verbose);
        assert!(cli.force_path_style);
        assert_eq!(cli.action(), None);
    }

    #[test]
    fn test_help_flag() {
        let err = Cli::try_parse_from(normalize_args(["s3-client", "-help"])).unwrap_err();
        assert_eq!(err.kind(), clap::error::ErrorKind::DisplayHelp);
    }
}
