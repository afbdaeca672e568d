//! Shared truncation and cast helpers used by the table builders.
//!
//! All identifier and free-text columns are truncated to a fixed maximum
//! length before storage. Truncation counts characters, not bytes, so a
//! multi-byte string is never cut mid-codepoint.

/// Maximum length for identifier columns (song_id, artist_id, user names).
pub const MAX_ID_LEN: usize = 50;

/// Maximum length for free-text columns (title, name, location, user_agent).
pub const MAX_TEXT_LEN: usize = 256;

/// Truncate a string to at most `max_len` characters.
pub fn truncate(s: &str, max_len: usize) -> String {
    s.chars().take(max_len).collect()
}

/// Truncate a nullable string, passing `None` through unchanged.
pub fn truncate_opt(s: Option<&str>, max_len: usize) -> Option<String> {
    s.map(|s| truncate(s, max_len))
}

/// Cast a raw string user id to an integer. Returns `None` when the value
/// is not representable as an i32, in which case the row is dropped.
pub fn cast_user_id(s: &str) -> Option<i32> {
    s.trim().parse::<i32>().ok()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn truncates_long_string() {
        let long = "x".repeat(300);
        assert_eq!(truncate(&long, MAX_TEXT_LEN).len(), 256);
        assert_eq!(truncate(&long, MAX_ID_LEN).len(), 50);
    }

    #[test]
    fn truncate_leaves_short_string_alone() {
        assert_eq!(truncate("hello", MAX_ID_LEN), "hello");
        assert_eq!(truncate("", MAX_ID_LEN), "");
    }

    #[test]
    fn truncate_counts_chars_not_bytes() {
        let s = "é".repeat(60);
        let out = truncate(&s, MAX_ID_LEN);
        assert_eq!(out.chars().count(), 50);
    }

    #[test]
    fn truncate_is_idempotent() {
        let long = "abcdef".repeat(100);
        let once = truncate(&long, MAX_TEXT_LEN);
        let twice = truncate(&once, MAX_TEXT_LEN);
        assert_eq!(once, twice);
    }

    #[test]
    fn truncate_opt_passes_none_through() {
        assert_eq!(truncate_opt(None, MAX_TEXT_LEN), None);
        assert_eq!(
            truncate_opt(Some("somewhere"), MAX_TEXT_LEN),
            Some("somewhere".to_string())
        );
    }

    #[test]
    fn casts_numeric_user_id() {
        assert_eq!(cast_user_id("7"), Some(7));
        assert_eq!(cast_user_id(" 42 "), Some(42));
    }

    #[test]
    fn rejects_non_numeric_user_id() {
        assert_eq!(cast_user_id("abc"), None);
        assert_eq!(cast_user_id(""), None);
        assert_eq!(cast_user_id("12.5"), None);
    }
}
