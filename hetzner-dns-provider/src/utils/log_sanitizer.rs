//! Log sanitization utilities
//!
//! Keeps API tokens and large TXT payloads out of debug/error logs.

/// Maximum number of characters to include in truncated log output.
const TRUNCATE_LIMIT: usize = 256;

/// Number of leading token characters kept visible by [`mask_token`].
const TOKEN_VISIBLE_PREFIX: usize = 4;

/// MSRV-compatible replacement for `str::floor_char_boundary` (stable since 1.91.0).
fn floor_char_boundary(s: &str, index: usize) -> usize {
    if index >= s.len() {
        s.len()
    } else {
        let mut i = index;
        while i > 0 && !s.is_char_boundary(i) {
            i -= 1;
        }
        i
    }
}

/// Truncate a string for safe logging.
///
/// Returns the original string if it's within the limit,
/// otherwise returns the first `TRUNCATE_LIMIT` bytes with a suffix
/// indicating the total length.
pub fn truncate_for_log(s: &str) -> String {
    if s.len() <= TRUNCATE_LIMIT {
        s.to_string()
    } else {
        format!(
            "{}... [truncated, total {} bytes]",
            &s[..floor_char_boundary(s, TRUNCATE_LIMIT)],
            s.len()
        )
    }
}

/// Mask an API token for `Debug` output, keeping only a short prefix.
pub fn mask_token(token: &str) -> String {
    if token.len() <= TOKEN_VISIBLE_PREFIX * 2 {
        return "****".to_string();
    }
    format!(
        "{}****",
        &token[..floor_char_boundary(token, TOKEN_VISIBLE_PREFIX)]
    )
}
