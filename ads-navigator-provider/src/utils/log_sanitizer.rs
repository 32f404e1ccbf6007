//! Log sanitization utilities
//!
//! Keeps response bodies (which can be large search payloads) and OAuth
//! secrets out of debug/error logs.

/// Characters of a body kept by [`truncate_for_log`].
const TRUNCATE_LIMIT: usize = 256;

/// Characters of a secret left visible by [`redact_secret`].
const SECRET_VISIBLE_PREFIX: usize = 4;

/// Byte offset of the `n`th character, or `None` when `s` is shorter.
fn char_offset(s: &str, n: usize) -> Option<usize> {
    s.char_indices().nth(n).map(|(offset, _)| offset)
}

/// Shortens a response body to its first 256 characters, noting the full
/// byte length.
pub fn truncate_for_log(s: &str) -> String {
    match char_offset(s, TRUNCATE_LIMIT) {
        Some(cut) => format!("{}... [truncated, total {} bytes]", &s[..cut], s.len()),
        None => s.to_string(),
    }
}

/// Masks a token or secret, keeping a short prefix for correlation.
///
/// Secrets too short to spare a prefix are masked entirely.
pub fn redact_secret(secret: &str) -> String {
    match char_offset(secret, SECRET_VISIBLE_PREFIX * 2) {
        Some(_) => {
            let prefix_end = char_offset(secret, SECRET_VISIBLE_PREFIX).unwrap_or(0);
            format!("{}****", &secret[..prefix_end])
        }
        None => "****".to_string(),
    }
}
