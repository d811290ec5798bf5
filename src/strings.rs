//! String utilities

/// Truncate a string to a maximum length, adding "..." if truncated
///
/// Handles UTF-8 character boundaries correctly.
pub fn truncate_str(s: &str, max_len: usize) -> String {
    if s.len() <= max_len {
        return s.to_string();
    }

    if max_len <= 3 {
        return "...".to_string();
    }

    let mut truncate_at = max_len - 3;
    while truncate_at > 0 && !s.is_char_boundary(truncate_at) {
        truncate_at -= 1;
    }

    format!("{}...", &s[..truncate_at])
}
