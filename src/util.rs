//! Small utility helpers used across modules.

/// Log-safe truncation for large strings.
/// Avoids spamming logs with huge request/response payloads.
pub fn trunc_for_log(s: &str, max: usize) -> String {
  if s.len() <= max {
    return s.to_string();
  }
  let mut end = max;
  while !s.is_char_boundary(end) { end -= 1; }
  format!("{}… ({} bytes total)", &s[..end], s.len())
}

/// True for a non-empty, purely ASCII-alphanumeric identifier.
pub fn is_alnum_id(s: &str) -> bool {
  !s.is_empty() && s.chars().all(|c| c.is_ascii_alphanumeric())
}
