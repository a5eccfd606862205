//! Output formatter for console lines
//!
//! Ensures consistent output across the three operations: results and
//! errors both go to stdout, errors prefixed with `Error:`.

use super::OutputConfig;

/// Formatter for CLI output
#[derive(Debug, Clone, Default)]
pub struct Formatter {
    config: OutputConfig,
}

impl Formatter {
    /// Create a new formatter with the given configuration
    pub fn new(config: OutputConfig) -> Self {
        Self { config }
    }

    /// Output configuration this formatter was built with
    pub fn config(&self) -> &OutputConfig {
        &self.config
    }

    /// Check if verbose output is enabled
    pub fn is_verbose(&self) -> bool {
        self.config.verbose
    }

    /// Print a line of text
    pub fn println(&self, message: &str) {
        println!("{message}");
    }

    /// Print a line only in verbose mode
    pub fn verbose(&self, message: &str) {
        if self.config.verbose {
            println!("{message}");
        }
    }

    /// Output an error message
    ///
    /// The prefix is colored when stdout is a terminal.
    pub fn error(&self, message: &str) {
        println!("{}", Self::error_line(message));
    }

    fn error_line(message: &str) -> String {
        format!("{} {message}", console::style("Error:").red().bold())
    }
}
