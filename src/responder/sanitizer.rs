/// Punctuation allowed through the sanitizer besides ASCII alphanumerics.
///
/// `/` is deliberately absent: the sanitized string may also be used to form
/// a profile file name, and a separator-free identifier cannot climb out of
/// the profile directory.
const SAFE_PUNCTUATION: &[u8] = b"@%-_ \t+:,.";

/// Upper bound on the sanitized string; excess input is silently dropped.
const MAX_LEN: usize = 1024;

/// Replaces every byte that is not alphanumeric and not in the punctuation
/// whitelist with a space. The result is the only form of an externally
/// influenced string that may reach a process invocation.
pub fn sanitize(raw: &str) -> String {
    raw.bytes()
        .take(MAX_LEN)
        .map(|b| {
            if b.is_ascii_alphanumeric() || SAFE_PUNCTUATION.contains(&b) {
                b as char
            } else {
                ' '
            }
        })
        .collect()
}
