//! Output formatting utilities
//!
//! Results go to stdout as plain lines; spinners go to stderr and only
//! appear when it is a terminal.

mod formatter;
mod progress;

pub use formatter::Formatter;
pub use progress::ProgressBar;

/// Output configuration derived from CLI flags
#[derive(Debug, Clone, Default)]
pub struct OutputConfig {
    /// Print extra detail (`-v`)
    pub verbose: bool,
    /// Draw spinners while waiting on the service
    pub progress: bool,
}
