//! Fixed-minimum plaintext padding
//!
//! Plaintext is extended with [`FILL`] until it reaches the minimum length
//! in bytes; decryption trims trailing fill. A plaintext that genuinely ends
//! in the fill character loses those characters on the way back.

/// Default minimum padded length in bytes
pub const DEFAULT_MIN_LEN: usize = 384;

/// Fill character appended during padding
pub const FILL: char = ' ';

/// Pad `plaintext` with [`FILL`] until it is at least `min_len` bytes
pub fn pad(plaintext: &str, min_len: usize) -> String {
    let missing = min_len.saturating_sub(plaintext.len());
    let mut padded = String::with_capacity(plaintext.len() + missing);
    padded.push_str(plaintext);
    padded.extend(std::iter::repeat(FILL).take(missing));
    padded
}

/// Strip trailing [`FILL`] characters
pub fn unpad(padded: &str) -> &str {
    padded.trim_end_matches(FILL)
}
