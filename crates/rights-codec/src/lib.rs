//! rights-codec: transport encoding for proxy re-encryption values
//!
//! Provides:
//! - Lowercase hex for keys, signatures and binary leaves
//! - Base64 transport wrapping with a pluggable [`Base64Strategy`]
//! - A tagged [`Node`] tree for opaque primitive structures
//! - [`StructuralSerializer`]: `base64(JSON-with-hex-leaves)`
//!
//! ## Wire Formats
//!
//! | Value                       | Format                          |
//! |-----------------------------|---------------------------------|
//! | Private key, signature      | lowercase hex, 2 chars per byte |
//! | Encryption public key       | `<hexX>.<hexY>`                 |
//! | Ciphertext, transform key   | `base64(JSON-with-hex-leaves)`  |

pub mod error;
pub mod hex_codec;
pub mod serializer;
pub mod text_encoder;
pub mod tree;

pub use error::{CodecError, CodecResult, ErrorKind};
pub use serializer::StructuralSerializer;
pub use text_encoder::{Base64Strategy, TextEncoder};
pub use tree::{Node, Scalar};
