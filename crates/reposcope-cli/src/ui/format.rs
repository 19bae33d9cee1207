//! Formatting utilities for CLI output.

/// Format a size in kilobytes (as reported by the hosting API) for display.
///
/// ```text
/// format_kilobytes(512)       == "512 KB"
/// format_kilobytes(2048)      == "2.0 MB"
/// format_kilobytes(3_145_728) == "3.0 GB"
/// ```
pub fn format_kilobytes(kb: u64) -> String {
    const MB: u64 = 1024;
    const GB: u64 = MB * 1024;

    if kb >= GB {
        format!("{:.1} GB", kb as f64 / GB as f64)
    } else if kb >= MB {
        format!("{:.1} MB", kb as f64 / MB as f64)
    } else {
        format!("{} KB", kb)
    }
}

/// Truncate a string to at most `max_len` characters, ending in `...` when
/// shortened.
pub fn truncate_str(s: &str, max_len: usize) -> String {
    if s.chars().count() <= max_len {
        s.to_string()
    } else if max_len <= 3 {
        ".".repeat(max_len)
    } else {
        let kept: String = s.chars().take(max_len - 3).collect();
        format!("{}...", kept)
    }
}

/// Join a list for a single table cell or line; `-` when empty.
pub fn join_or_dash(items: &[String]) -> String {
    if items.is_empty() {
        "-".to_string()
    } else {
        items.join(", ")
    }
}

/// Join at most `max` items, summarizing the rest as `(+N more)`.
pub fn join_limited(items: &[String], max: usize) -> String {
    if items.len() <= max {
        return join_or_dash(items);
    }
    format!(
        "{} (+{} more)",
        items[..max].join(", "),
        items.len() - max
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_kilobytes() {
        assert_eq!(format_kilobytes(0), "0 KB");
        assert_eq!(format_kilobytes(512), "512 KB");
        assert_eq!(format_kilobytes(1024), "1.0 MB");
        assert_eq!(format_kilobytes(1536), "1.5 MB");
        assert_eq!(format_kilobytes(1_048_576), "1.0 GB");
    }

    #[test]
    fn test_truncate_str() {
        assert_eq!(truncate_str("hello", 10), "hello");
        assert_eq!(truncate_str("hello", 5), "hello");
        assert_eq!(truncate_str("hello world", 8), "hello...");
        assert_eq!(truncate_str("hello", 3), "...");
        assert_eq!(truncate_str("héllo wörld", 8), "héllo...");
    }

    #[test]
    fn test_join_helpers() {
        let items = vec!["React".to_string(), "Vue.js".to_string(), "Svelte".to_string()];
        assert_eq!(join_or_dash(&[]), "-");
        assert_eq!(join_or_dash(&items), "React, Vue.js, Svelte");
        assert_eq!(join_limited(&items, 3), "React, Vue.js, Svelte");
        assert_eq!(join_limited(&items, 1), "React (+2 more)");
    }
}
