//! Seam to the external proxy re-encryption primitive
//!
//! The primitive works on raw byte slices and primitive-native trees. Its
//! ciphertexts and transform keys are [`Node`] trees with every binary field
//! tagged as [`Node::Binary`], so the facade can serialize any shape the
//! primitive produces.

pub mod mock;

pub use mock::MockPrimitive;

use crate::error::PrimitiveResult;
use crate::keys::PublicPoint;
use async_trait::async_trait;
use rights_codec::Node;
use zeroize::Zeroizing;

/// Encryption key material as produced by the primitive
pub struct EncryptionKeys {
    pub private_key: Zeroizing<Vec<u8>>,
    pub public_key: PublicPoint,
}

/// Signing key material as produced by the primitive
pub struct SigningKeys {
    pub private_key: Zeroizing<Vec<u8>>,
    pub public_key: Vec<u8>,
}

/// An asymmetric proxy re-encryption primitive with a companion signature
/// scheme
///
/// Implementations may be slow; every call is treated as an opaque
/// capability and awaited. No call retains state for a later one.
#[async_trait]
pub trait RecryptPrimitive: Send + Sync {
    /// Human-readable name
    fn name(&self) -> &'static str;

    /// Generate an encryption key pair
    async fn generate_key_pair(&self) -> PrimitiveResult<EncryptionKeys>;

    /// Generate a signing key pair
    async fn generate_signing_key_pair(&self) -> PrimitiveResult<SigningKeys>;

    /// Derive a transform key from the delegator's private key to the
    /// delegatee's public key, signed by `signing_private`
    async fn generate_transform_key(
        &self,
        from_private: &[u8],
        to_public: &PublicPoint,
        signing_private: &[u8],
    ) -> PrimitiveResult<Node>;

    /// Encrypt to a recipient public key
    async fn encrypt(
        &self,
        plaintext: &[u8],
        to_public: &PublicPoint,
        signing_private: &[u8],
    ) -> PrimitiveResult<Node>;

    /// Apply one re-encryption hop
    async fn transform(
        &self,
        ciphertext: Node,
        transform_key: Node,
        signing_private: &[u8],
    ) -> PrimitiveResult<Node>;

    /// Decrypt with the recipient's private key
    async fn decrypt(
        &self,
        ciphertext: Node,
        private_key: &[u8],
    ) -> PrimitiveResult<Zeroizing<Vec<u8>>>;

    /// Sign a message
    async fn sign(&self, signing_private: &[u8], message: &[u8]) -> PrimitiveResult<Vec<u8>>;

    /// Verify a signature
    ///
    /// A signature that does not match is `Ok(false)`, never an error.
    async fn verify(
        &self,
        signing_public: &[u8],
        message: &[u8],
        signature: &[u8],
    ) -> PrimitiveResult<bool>;
}
