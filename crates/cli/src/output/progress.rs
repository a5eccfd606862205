//! Spinner shown while waiting on the storage service

use std::time::Duration;

use super::OutputConfig;

/// Spinner wrapper
///
/// Hidden when progress is disabled, so callers need not check.
#[derive(Debug)]
pub struct ProgressBar {
    bar: Option<indicatif::ProgressBar>,
}

impl ProgressBar {
    /// Create a spinner for indeterminate progress
    pub fn spinner(config: &OutputConfig, message: &str) -> Self {
        let bar = if config.progress {
            let bar = indicatif::ProgressBar::new_spinner();
            if let Ok(style) =
                indicatif::ProgressStyle::default_spinner().template("{spinner:.green} {msg}")
            {
                bar.set_style(style);
            }
            bar.set_message(message.to_string());
            bar.enable_steady_tick(Duration::from_millis(100));
            Some(bar)
        } else {
            None
        };

        Self { bar }
    }

    /// Finish and clear the spinner
    pub fn finish_and_clear(&self) {
        if let Some(bar) = &self.bar {
            bar.finish_and_clear();
        }
    }

    /// Check if the spinner is drawn
    pub fn is_visible(&self) -> bool {
        self.bar.is_some()
    }
}

impl Drop for ProgressBar {
    fn drop(&mut self) {
        self.finish_and_clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_spinner_disabled() {
        let bar = ProgressBar::spinner(&OutputConfig::default(), "Deleting photo.png...");
        assert!(!bar.is_visible());
        bar.finish_and_clear();
    }

    #[test]
    fn test_spinner_enabled() {
        let config = OutputConfig {
            progress: true,
            ..Default::default()
        };
        let bar = ProgressBar::spinner(&config, "Deleting photo.png...");
        assert!(bar.is_visible());
        bar.finish_and_clear();
    }
}
