//! Deterministic token estimation
//!
//! Routing and policy decisions must be reproducible byte-for-byte, so the
//! token count is a fixed arithmetic estimate rather than a real tokenizer
//! pass: one token per four characters, minimum one. Counts are Unicode
//! scalar values, not bytes.

/// Estimate the token count of a prompt as `max(1, character_count / 4)`.
///
/// The same estimate is used by `TokenCount` rule conditions and by the
/// automatic-mode threshold check, so both always agree on the size of a
/// question.
///
/// # Examples
///
/// ```
/// use aegis::model::estimate_tokens;
///
/// assert_eq!(estimate_tokens(""), 1);
/// assert_eq!(estimate_tokens("hi"), 1);
/// assert_eq!(estimate_tokens("a".repeat(16000).as_str()), 4000);
/// ```
pub fn estimate_tokens(content: &str) -> u32 {
    let quarters = (content.chars().count() / 4) as u64;
    quarters.clamp(1, u64::from(u32::MAX)) as u32
}
