//! Message styling for CLI output.
//!
//! | Prefix | Meaning | Color |
//! |--------|---------|-------|
//! | `[ok]` | Success | Green |
//! | `[err]` | Error | Red |
//! | `[warn]` | Warning | Yellow |
//! | `[info]` | Information | Blue |
//! | `[hint]` | Suggestion | Cyan |
//!
//! Report bodies use three list markers: `!` for an identified gap, `+` for
//! a recommendation and `-` for a neutral note.

use owo_colors::{AnsiColors, OwoColorize};

use reposcope_core::Priority;

use super::color::ColorMode;

/// Message severity/type for CLI output.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MessageType {
    Ok,
    Err,
    Warn,
    Info,
    Hint,
}

impl MessageType {
    pub fn prefix(&self) -> &'static str {
        match self {
            Self::Ok => "[ok]",
            Self::Err => "[err]",
            Self::Warn => "[warn]",
            Self::Info => "[info]",
            Self::Hint => "[hint]",
        }
    }

    fn color(&self) -> AnsiColors {
        match self {
            Self::Ok => AnsiColors::Green,
            Self::Err => AnsiColors::Red,
            Self::Warn => AnsiColors::Yellow,
            Self::Info => AnsiColors::Blue,
            Self::Hint => AnsiColors::Cyan,
        }
    }
}

/// Styling for everything `reposcope` prints.
///
/// With colors disabled every method returns plain text, which is what the
/// integration tests match against.
#[derive(Debug, Clone)]
pub struct Style {
    color_mode: ColorMode,
}

impl Style {
    pub fn new(color_mode: ColorMode) -> Self {
        Self { color_mode }
    }

    pub fn color_mode(&self) -> ColorMode {
        self.color_mode
    }

    fn colored(&self, text: &str, color: AnsiColors) -> String {
        if self.color_mode.is_enabled() {
            text.color(color).to_string()
        } else {
            text.to_string()
        }
    }

    fn dimmed(&self, text: &str) -> String {
        if self.color_mode.is_enabled() {
            text.dimmed().to_string()
        } else {
            text.to_string()
        }
    }

    /// `[ok] Analyzed acme/app` and friends.
    pub fn message(&self, msg_type: MessageType, text: &str) -> String {
        format!("{} {}", self.colored(msg_type.prefix(), msg_type.color()), text)
    }

    /// Indented `Label: value` line under a message.
    pub fn message_detail(&self, label: &str, value: &str) -> String {
        format!("     {}: {}", label, value)
    }

    /// Bold section title such as `TECHNOLOGIES`.
    pub fn section(&self, title: &str) -> String {
        if self.color_mode.is_enabled() {
            title.bold().to_string()
        } else {
            title.to_string()
        }
    }

    /// An error line followed by optional `Cause:` and `Hint:` lines.
    pub fn error_with_context(&self, msg: &str, cause: Option<&str>, hint: Option<&str>) -> String {
        let mut lines = vec![self.message(MessageType::Err, msg)];
        lines.extend(cause.map(|c| format!("      Cause: {}", c)));
        lines.extend(hint.map(|h| format!("      Hint: {}", h)));
        lines.join("\n")
    }

    /// A bullet in a report body; `!` (gap) and `+` (recommendation) are colored.
    pub fn list_item(&self, marker: &str, text: &str) -> String {
        let marker = match marker {
            "!" => self.colored(marker, AnsiColors::Yellow),
            "+" => self.colored(marker, AnsiColors::Green),
            other => other.to_string(),
        };
        format!("  {} {}", marker, text)
    }

    pub fn key_value(&self, key: &str, value: &str) -> String {
        format!("{}: {}", self.dimmed(key), value)
    }

    /// Priority label: high red, medium yellow, low dim.
    pub fn priority(&self, priority: Priority) -> String {
        match priority {
            Priority::High => self.colored(priority.as_str(), AnsiColors::Red),
            Priority::Medium => self.colored(priority.as_str(), AnsiColors::Yellow),
            Priority::Low => self.dimmed(priority.as_str()),
        }
    }

    /// `owner/repo`, in cyan.
    pub fn repository(&self, full_name: &str) -> String {
        self.colored(full_name, AnsiColors::Cyan)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn plain() -> Style {
        Style::new(ColorMode::Never)
    }

    #[test]
    fn test_prefixes() {
        assert_eq!(plain().message(MessageType::Ok, "Analyzed acme/app"), "[ok] Analyzed acme/app");
        assert_eq!(plain().message(MessageType::Hint, "Run analyze"), "[hint] Run analyze");
        assert_eq!(MessageType::Warn.prefix(), "[warn]");
    }

    #[test]
    fn test_colored_output_wraps_prefix() {
        let style = Style::new(ColorMode::Always);
        let line = style.message(MessageType::Err, "Failed");
        assert!(line.contains("\u{1b}["));
        assert!(line.ends_with(" Failed"));
    }

    #[test]
    fn test_error_with_context() {
        let output = plain().error_with_context(
            "Repository analysis failed during repository exploration",
            Some("GitHub API returned 404"),
            Some("Check the repository name"),
        );
        let lines: Vec<&str> = output.lines().collect();
        assert_eq!(lines.len(), 3);
        assert!(lines[0].starts_with("[err] Repository analysis failed"));
        assert_eq!(lines[1], "      Cause: GitHub API returned 404");
        assert_eq!(lines[2], "      Hint: Check the repository name");

        assert_eq!(plain().error_with_context("Boom", None, None), "[err] Boom");
    }

    #[test]
    fn test_report_lines() {
        let style = plain();
        assert_eq!(style.list_item("!", "No CI/CD pipeline detected"), "  ! No CI/CD pipeline detected");
        assert_eq!(style.list_item("-", "Keep an ADR log"), "  - Keep an ADR log");
        assert_eq!(style.key_value("Languages", "TypeScript"), "Languages: TypeScript");
        assert_eq!(style.message_detail("Analysis", "42"), "     Analysis: 42");
        assert_eq!(style.priority(Priority::Medium), "medium");
        assert_eq!(style.repository("acme/app"), "acme/app");
    }
}
