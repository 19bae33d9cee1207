//! Color mode detection for CLI output.
//!
//! Respects the `NO_COLOR` environment variable and TTY detection.
//! See https://no-color.org/ for the NO_COLOR standard.

use std::io::IsTerminal;

use clap::ValueEnum;

/// Color output mode for the CLI.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum)]
pub enum ColorMode {
    /// Always use colors, even when output is not a TTY.
    Always,
    /// Never use colors.
    Never,
    /// Detect from TTY and `NO_COLOR`.
    #[default]
    Auto,
}

impl ColorMode {
    /// Check if colors should be used based on current mode.
    pub fn is_enabled(&self) -> bool {
        match self {
            Self::Always => true,
            Self::Never => false,
            Self::Auto => Self::should_auto_colorize(),
        }
    }

    /// `NO_COLOR` (any value) wins; otherwise color only a TTY stdout.
    fn should_auto_colorize() -> bool {
        if std::env::var_os("NO_COLOR").is_some() {
            return false;
        }
        std::io::stdout().is_terminal()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_color_mode_from_flag_value() {
        assert_eq!(ColorMode::from_str("always", true), Ok(ColorMode::Always));
        assert_eq!(ColorMode::from_str("ALWAYS", true), Ok(ColorMode::Always));
        assert_eq!(ColorMode::from_str("never", true), Ok(ColorMode::Never));
        assert_eq!(ColorMode::from_str("auto", true), Ok(ColorMode::Auto));
        assert!(ColorMode::from_str("rainbow", true).is_err());
    }

    #[test]
    fn test_color_mode_explicit() {
        assert!(ColorMode::Always.is_enabled());
        assert!(!ColorMode::Never.is_enabled());
    }
}
