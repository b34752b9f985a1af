/// Returns `true` when `bytes` is empty or holds only whitespace.
///
/// Valid UTF-8 is checked with Unicode whitespace, matching `str::trim`.
/// Anything else falls back to the ASCII set.
pub fn is_blank(bytes: &[u8]) -> bool {
    match core::str::from_utf8(bytes) {
        Ok(s) => s.trim().is_empty(),
        Err(_) => bytes.iter().all(|b| b.is_ascii_whitespace()),
    }
}
