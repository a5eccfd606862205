//! s3-client - upload, list and delete files in an S3-compatible bucket

use clap::Parser;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use s3_client::commands::{self, Cli};

/// Log filter applied when RUST_LOG is unset
fn default_filter(verbose: bool) -> &'static str {
    if verbose {
        "s3_client=debug,s3c_core=debug,s3c_s3=debug"
    } else {
        "warn"
    }
}

#[tokio::main(flavor = "current_thread")]
async fn main() {
    let cli = Cli::parse_from(commands::normalize_args(std::env::args_os()));

    // Logs go to stderr; stdout carries results
    tracing_subscriber::registry()
        .with(fmt::layer().with_writer(std::io::stderr))
        .with(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new(default_filter(cli.verbose))),
        )
        .init();

    let exit_code = commands::execute(cli).await;

    std::process::exit(exit_code.as_i32());
}
