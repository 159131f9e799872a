//! Byte array <-> lowercase hex string

use crate::error::CodecResult;

/// Encode bytes as lowercase hex, two digits per byte, no separators
pub fn encode(bytes: impl AsRef<[u8]>) -> String {
    hex::encode(bytes)
}

/// Decode a hex string back to bytes
///
/// Fails on odd length or any non-hex character.
pub fn decode(s: &str) -> CodecResult<Vec<u8>> {
    Ok(hex::decode(s)?)
}
