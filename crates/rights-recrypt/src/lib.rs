//! # rights-recrypt: proxy re-encryption behind transport strings
//!
//! Wraps an asymmetric proxy re-encryption primitive (encrypt / transform /
//! decrypt plus ed25519-style signatures) in an API where every value is a
//! string that survives any text transport.
//!
//! ## Example: Re-encryption
//!
//! ```rust
//! use rights_recrypt::{MockPrimitive, NaturalRightsRecrypt};
//!
//! # #[tokio::main(flavor = "current_thread")]
//! # async fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let recrypt = NaturalRightsRecrypt::with_defaults(MockPrimitive::new());
//!
//! let alice = recrypt.generate_encryption_key_pair().await?;
//! let bob = recrypt.generate_encryption_key_pair().await?;
//! let signer = recrypt.generate_signing_key_pair().await?;
//!
//! let ciphertext = recrypt.encrypt(alice.pub_key(), "Some plaintext", &signer).await?;
//! let alice_to_bob = recrypt.generate_transform_key(&alice, bob.pub_key(), &signer).await?;
//! let for_bob = recrypt.transform(&alice_to_bob, &ciphertext, &signer).await?;
//!
//! assert_eq!(recrypt.decrypt(&bob, &for_bob).await?, "Some plaintext");
//! # Ok(())
//! # }
//! ```
//!
//! ## Padding
//!
//! Plaintext is padded with spaces to at least 384 bytes before encryption
//! and trailing spaces are trimmed after decryption, so a plaintext that
//! really ends in spaces comes back without them.

pub mod config;
pub mod error;
pub mod facade;
pub mod keys;
pub mod padding;
pub mod primitive;

pub use config::RecryptConfig;
pub use error::{ErrorKind, PrimitiveError, PrimitiveResult, RecryptError, RecryptResult};
pub use facade::NaturalRightsRecrypt;
pub use keys::{KeyPair, PublicPoint};
pub use primitive::{EncryptionKeys, MockPrimitive, RecryptPrimitive, SigningKeys};
pub use rights_codec::{Base64Strategy, Node};
