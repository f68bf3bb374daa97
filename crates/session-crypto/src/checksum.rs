//! 32-bit string hash used as the token checksum.
//!
//! This is `s[0]*31^(n-1) + s[1]*31^(n-2) + ... + s[n-1]` over UTF-16 code
//! units with wrapping `i32` arithmetic. It detects accidental corruption and
//! naive edits; it is not a MAC.

/// Compute the 31-multiplier polynomial hash of `s`.
pub fn string_hash(s: &str) -> i32 {
    s.encode_utf16()
        .fold(0i32, |h, unit| h.wrapping_mul(31).wrapping_add(unit as i32))
}
