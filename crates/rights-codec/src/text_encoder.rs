//! Base64 transport encoding
//!
//! Two interchangeable strategies produce byte-identical output:
//!
//! | Strategy | Implementation                              |
//! |----------|---------------------------------------------|
//! | Engine   | `base64` crate, standard padded alphabet    |
//! | Lookup   | explicit byte-to-base64 table, no text pass |
//!
//! The strategy is picked once when the process is configured and then
//! carried by value; nothing mutates it afterwards.

use crate::error::{CodecError, CodecResult};
use base64::{Engine as _, engine::general_purpose::STANDARD as BASE64};
use serde::{Deserialize, Serialize};

const ALPHABET: &[u8; 64] = b"ABCDEFGHIJKLMNOPQRSTUVWXYZabcdefghijklmnopqrstuvwxyz0123456789+/";
const PAD: u8 = b'=';
const INVALID: u8 = 0xff;
const DECODE_TABLE: [u8; 256] = build_decode_table();

const fn build_decode_table() -> [u8; 256] {
    let mut table = [INVALID; 256];
    let mut i = 0;
    while i < ALPHABET.len() {
        table[ALPHABET[i] as usize] = i as u8;
        i += 1;
    }
    table
}

/// Which base64 implementation backs a [`TextEncoder`]
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Base64Strategy {
    /// The `base64` crate engine
    #[default]
    Engine,
    /// Table lookup fallback
    Lookup,
}

impl std::fmt::Display for Base64Strategy {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Base64Strategy::Engine => write!(f, "engine"),
            Base64Strategy::Lookup => write!(f, "lookup"),
        }
    }
}

impl std::str::FromStr for Base64Strategy {
    type Err = CodecError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "engine" | "builtin" | "native" => Ok(Base64Strategy::Engine),
            "lookup" | "table" | "fallback" => Ok(Base64Strategy::Lookup),
            other => Err(CodecError::Base64(format!("Unknown base64 strategy: {other}"))),
        }
    }
}

/// Bytes <-> base64 transport string
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct TextEncoder {
    strategy: Base64Strategy,
}

impl TextEncoder {
    pub fn new(strategy: Base64Strategy) -> Self {
        Self { strategy }
    }

    pub fn strategy(&self) -> Base64Strategy {
        self.strategy
    }

    pub fn encode(&self, bytes: &[u8]) -> String {
        match self.strategy {
            Base64Strategy::Engine => BASE64.encode(bytes),
            Base64Strategy::Lookup => lookup_encode(bytes),
        }
    }

    /// Decode a padded base64 string
    ///
    /// Rejects lengths that are not a multiple of four, misplaced or excess
    /// padding, characters outside the alphabet and non-zero trailing bits.
    pub fn decode(&self, s: &str) -> CodecResult<Vec<u8>> {
        match self.strategy {
            Base64Strategy::Engine => Ok(BASE64.decode(s)?),
            Base64Strategy::Lookup => lookup_decode(s),
        }
    }
}

fn lookup_encode(input: &[u8]) -> String {
    let mut out = String::with_capacity(input.len().div_ceil(3) * 4);

    for chunk in input.chunks(3) {
        let b0 = chunk[0] as u32;
        let b1 = chunk.get(1).copied().unwrap_or(0) as u32;
        let b2 = chunk.get(2).copied().unwrap_or(0) as u32;
        let n = (b0 << 16) | (b1 << 8) | b2;

        out.push(ALPHABET[((n >> 18) & 0x3f) as usize] as char);
        out.push(ALPHABET[((n >> 12) & 0x3f) as usize] as char);
        out.push(if chunk.len() > 1 {
            ALPHABET[((n >> 6) & 0x3f) as usize] as char
        } else {
            PAD as char
        });
        out.push(if chunk.len() > 2 {
            ALPHABET[(n & 0x3f) as usize] as char
        } else {
            PAD as char
        });
    }

    out
}

fn lookup_decode(input: &str) -> CodecResult<Vec<u8>> {
    let bytes = input.as_bytes();
    if bytes.len() % 4 != 0 {
        return Err(CodecError::Base64(format!(
            "Invalid input length {}",
            bytes.len()
        )));
    }

    let quads = bytes.len() / 4;
    let mut out = Vec::with_capacity(quads * 3);

    for (i, quad) in bytes.chunks_exact(4).enumerate() {
        let pad = quad.iter().rev().take_while(|&&c| c == PAD).count();
        if pad > 2 || (pad > 0 && i + 1 != quads) {
            return Err(CodecError::Base64("Invalid padding".into()));
        }

        let mut n: u32 = 0;
        for (j, &c) in quad[..4 - pad].iter().enumerate() {
            let v = DECODE_TABLE[c as usize];
            if v == INVALID {
                return Err(CodecError::Base64(format!(
                    "Invalid byte {}, offset {}.",
                    c,
                    i * 4 + j
                )));
            }
            n |= (v as u32) << (18 - 6 * j);
        }

        match pad {
            0 => out.extend_from_slice(&[(n >> 16) as u8, (n >> 8) as u8, n as u8]),
            1 => {
                if n & 0xff != 0 {
                    return Err(CodecError::Base64("Invalid last symbol".into()));
                }
                out.extend_from_slice(&[(n >> 16) as u8, (n >> 8) as u8]);
            }
            _ => {
                if n & 0xffff != 0 {
                    return Err(CodecError::Base64("Invalid last symbol".into()));
                }
                out.push((n >> 16) as u8);
            }
        }
    }

    Ok(out)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ErrorKind;

    const STRATEGIES: [Base64Strategy; 2] = [Base64Strategy::Engine, Base64Strategy::Lookup];

    #[test]
    fn test_rfc4648_vectors() {
        let vectors: [(&[u8], &str); 7] = [
            (b"", ""),
            (b"f", "Zg=="),
            (b"fo", "Zm8="),
            (b"foo", "Zm9v"),
            (b"foob", "Zm9vYg=="),
            (b"fooba", "Zm9vYmE="),
            (b"foobar", "Zm9vYmFy"),
        ];
        for strategy in STRATEGIES {
            let enc = TextEncoder::new(strategy);
            for (raw, b64) in vectors {
                assert_eq!(enc.encode(raw), b64, "{strategy} encode");
                assert_eq!(enc.decode(b64).unwrap(), raw, "{strategy} decode");
            }
        }
    }

    #[test]
    fn test_high_bytes_survive() {
        let raw: Vec<u8> = (0..=255).collect();
        for strategy in STRATEGIES {
            let enc = TextEncoder::new(strategy);
            assert_eq!(enc.decode(&enc.encode(&raw)).unwrap(), raw);
        }
    }

    #[test]
    fn test_malformed_inputs_rejected_by_both() {
        let bad = ["Zg", "Zg=", "Z===", "====", "Zg==Zm9v", "Zm9v!A==", "Zh==", "Zm9=", "A=A="];
        for strategy in STRATEGIES {
            let enc = TextEncoder::new(strategy);
            for input in bad {
                let err = enc.decode(input).unwrap_err();
                assert_eq!(err.kind(), ErrorKind::Format, "{strategy} accepted {input:?}");
            }
        }
    }

    #[test]
    fn test_strategy_parse() {
        assert_eq!("Engine".parse::<Base64Strategy>().unwrap(), Base64Strategy::Engine);
        assert_eq!("table".parse::<Base64Strategy>().unwrap(), Base64Strategy::Lookup);
        assert!("base32".parse::<Base64Strategy>().is_err());
    }
}
