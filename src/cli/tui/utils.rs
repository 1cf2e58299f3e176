//! Shared utilities for TUI views

/// Truncate a string to max_len characters, adding "..." if truncated
pub fn truncate_str(s: &str, max_len: usize) -> String {
    if s.chars().count() <= max_len {
        s.to_string()
    } else {
        let truncate_at = max_len.saturating_sub(3);
        let truncated: String = s.chars().take(truncate_at).collect();
        format!("{}...", truncated)
    }
}

/// Number of rows `s` occupies when hard-wrapped at `width` columns
pub fn wrapped_rows(s: &str, width: u16) -> u16 {
    if width == 0 {
        return 0;
    }
    let chars = s.chars().count().min(u16::MAX as usize) as u16;
    chars.div_ceil(width).max(1)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn truncate_short_string() {
        assert_eq!(truncate_str("hello", 10), "hello");
    }

    #[test]
    fn truncate_exact_length() {
        assert_eq!(truncate_str("hello", 5), "hello");
    }

    #[test]
    fn truncate_long_string() {
        assert_eq!(truncate_str("hello world", 8), "hello...");
    }

    #[test]
    fn truncate_unicode() {
        assert_eq!(truncate_str("éléphant rose", 6), "élé...");
    }

    #[test]
    fn wrapped_rows_rounds_up() {
        assert_eq!(wrapped_rows("", 10), 1);
        assert_eq!(wrapped_rows("abcde", 5), 1);
        assert_eq!(wrapped_rows("abcdef", 5), 2);
        assert_eq!(wrapped_rows("abc", 0), 0);
    }
}
