//! Progress indicator for the analysis commands.
//!
//! A single `indicatif` spinner runs while the pipeline works. It is only
//! drawn on an interactive terminal, never with `--quiet` or `--json`.

use std::time::{Duration, Instant};

use indicatif::{ProgressBar, ProgressStyle};

use super::color::ColorMode;

/// How much feedback a command gives besides its result.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ProgressMode {
    /// Animated spinner, then a one-line outcome
    Interactive,
    /// One-line outcome only (pipes, CI, `--quiet`)
    Quiet,
    /// Nothing but the JSON document on stdout
    Silent,
}

impl ProgressMode {
    pub fn detect(quiet: bool, json: bool, color_mode: ColorMode) -> Self {
        if json {
            return Self::Silent;
        }
        // The spinner draws on stderr; stdout may still be a terminal when
        // stderr is redirected, so both must be interactive.
        let terminal = atty::is(atty::Stream::Stderr) && atty::is(atty::Stream::Stdout);
        if quiet || !terminal || color_mode == ColorMode::Never {
            Self::Quiet
        } else {
            Self::Interactive
        }
    }

    pub fn is_interactive(&self) -> bool {
        *self == Self::Interactive
    }

    /// Whether the one-line outcome is printed.
    pub fn shows_info(&self) -> bool {
        *self != Self::Silent
    }
}

const SPINNER_CHARS: &str = "⠋⠙⠹⠸⠼⠴⠦⠧⠇⠏";
const SPINNER_TEMPLATE: &str = "{spinner:.cyan} {msg} ({elapsed})";

/// Spinner shown while one analysis runs.
pub struct Progress {
    bar: Option<ProgressBar>,
    mode: ProgressMode,
    started: Instant,
}

impl Progress {
    pub fn spinner(message: &str, mode: ProgressMode) -> Self {
        let bar = mode.is_interactive().then(|| {
            let style = ProgressStyle::default_spinner()
                .template(SPINNER_TEMPLATE)
                .unwrap_or_else(|_| ProgressStyle::default_spinner())
                .tick_chars(SPINNER_CHARS);
            let pb = ProgressBar::new_spinner().with_style(style);
            pb.set_message(message.to_string());
            pb.enable_steady_tick(Duration::from_millis(80));
            pb
        });

        Self {
            bar,
            mode,
            started: Instant::now(),
        }
    }

    /// Remove the spinner without printing anything.
    pub fn finish_clear(&self) {
        if let Some(bar) = &self.bar {
            bar.finish_and_clear();
        }
    }

    /// Replace the spinner with `outcome` (suppressed in silent mode).
    pub fn finish_with_message(&self, outcome: &str) {
        self.finish_clear();
        if self.mode.shows_info() && !outcome.is_empty() {
            println!("{}", outcome);
        }
    }

    pub fn elapsed(&self) -> Duration {
        self.started.elapsed()
    }
}

/// `120ms` under a tenth of a second, `2.8s` above.
pub fn format_duration(d: Duration) -> String {
    if d < Duration::from_millis(100) {
        format!("{}ms", d.as_millis())
    } else {
        format!("{:.1}s", d.as_secs_f64())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_mode_detection_from_flags() {
        assert_eq!(
            ProgressMode::detect(false, true, ColorMode::Auto),
            ProgressMode::Silent
        );
        // json wins over quiet
        assert_eq!(
            ProgressMode::detect(true, true, ColorMode::Always),
            ProgressMode::Silent
        );
        assert_eq!(
            ProgressMode::detect(true, false, ColorMode::Always),
            ProgressMode::Quiet
        );
        assert_eq!(
            ProgressMode::detect(false, false, ColorMode::Never),
            ProgressMode::Quiet
        );
    }

    #[test]
    fn test_non_interactive_spinner_has_no_bar() {
        let progress = Progress::spinner("Analyzing acme/app...", ProgressMode::Silent);
        assert!(progress.bar.is_none());
        progress.finish_with_message("never printed");
        assert!(progress.elapsed() < Duration::from_secs(5));
    }

    #[test]
    fn test_format_duration() {
        assert_eq!(format_duration(Duration::from_millis(42)), "42ms");
        assert_eq!(format_duration(Duration::from_millis(2800)), "2.8s");
    }
}
