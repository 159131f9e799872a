//! Transport-safe facade over a [`RecryptPrimitive`]
//!
//! Every operation takes and returns domain-level values: hex key strings,
//! composite public keys and `base64(JSON-with-hex-leaves)` transport
//! strings. No state is kept between calls.

use crate::config::RecryptConfig;
use crate::error::{RecryptError, RecryptResult};
use crate::keys::{KeyPair, PublicPoint};
use crate::padding;
use crate::primitive::RecryptPrimitive;
use rights_codec::{Node, StructuralSerializer, hex_codec};

pub struct NaturalRightsRecrypt<P> {
    primitive: P,
    serializer: StructuralSerializer,
    min_plaintext_len: usize,
}

impl<P: RecryptPrimitive> NaturalRightsRecrypt<P> {
    pub fn new(primitive: P, config: &RecryptConfig) -> Self {
        tracing::debug!(
            primitive = primitive.name(),
            text_encoding = %config.text_encoding,
            "Recrypt facade ready"
        );
        Self {
            primitive,
            serializer: config.serializer(),
            min_plaintext_len: config.min_plaintext_len,
        }
    }

    pub fn with_defaults(primitive: P) -> Self {
        Self::new(primitive, &RecryptConfig::default())
    }

    pub fn primitive(&self) -> &P {
        &self.primitive
    }

    pub fn serializer(&self) -> &StructuralSerializer {
        &self.serializer
    }

    /// Generate an encryption key pair with a `"<hexX>.<hexY>"` public key
    pub async fn generate_encryption_key_pair(&self) -> RecryptResult<KeyPair> {
        let keys = self.primitive.generate_key_pair().await?;
        tracing::debug!("Generated encryption key pair");
        Ok(KeyPair::new(
            hex_codec::encode(&keys.private_key[..]),
            keys.public_key.to_string(),
        ))
    }

    /// Generate a signing key pair; both halves are plain hex
    pub async fn generate_signing_key_pair(&self) -> RecryptResult<KeyPair> {
        let keys = self.primitive.generate_signing_key_pair().await?;
        tracing::debug!("Generated signing key pair");
        Ok(KeyPair::new(
            hex_codec::encode(&keys.private_key[..]),
            hex_codec::encode(&keys.public_key),
        ))
    }

    /// Authorize one re-encryption hop from `from` to the holder of
    /// `to_pub_key`
    pub async fn generate_transform_key(
        &self,
        from: &KeyPair,
        to_pub_key: &str,
        signer: &KeyPair,
    ) -> RecryptResult<String> {
        let to_public: PublicPoint = to_pub_key.parse()?;
        let from_private = from.private_bytes()?;
        let signing_private = signer.private_bytes()?;

        let transform_key = self
            .primitive
            .generate_transform_key(&from_private, &to_public, &signing_private)
            .await?;
        let out = self.serialize(&transform_key)?;
        tracing::debug!(len = out.len(), "Generated transform key");
        Ok(out)
    }

    /// Pad and encrypt `plaintext` to `pub_key`
    pub async fn encrypt(
        &self,
        pub_key: &str,
        plaintext: &str,
        signer: &KeyPair,
    ) -> RecryptResult<String> {
        let padded = padding::pad(plaintext, self.min_plaintext_len);
        let to_public: PublicPoint = pub_key.parse()?;
        let signing_private = signer.private_bytes()?;

        let ciphertext = self
            .primitive
            .encrypt(padded.as_bytes(), &to_public, &signing_private)
            .await?;
        let out = self.serialize(&ciphertext)?;
        tracing::debug!(
            plaintext_len = plaintext.len(),
            padded_len = padded.len(),
            len = out.len(),
            "Encrypted"
        );
        Ok(out)
    }

    /// Apply one re-encryption hop; chain calls for multiple hops
    pub async fn transform(
        &self,
        transform_key: &str,
        ciphertext: &str,
        signer: &KeyPair,
    ) -> RecryptResult<String> {
        let transform_key = self.deserialize(transform_key)?;
        let ciphertext = self.deserialize(ciphertext)?;
        let signing_private = signer.private_bytes()?;

        let transformed = self
            .primitive
            .transform(ciphertext, transform_key, &signing_private)
            .await?;
        let out = self.serialize(&transformed)?;
        tracing::debug!(len = out.len(), "Transformed ciphertext");
        Ok(out)
    }

    /// Decrypt and strip padding
    pub async fn decrypt(&self, key_pair: &KeyPair, ciphertext: &str) -> RecryptResult<String> {
        let ciphertext = self.deserialize(ciphertext)?;
        let private_key = key_pair.private_bytes()?;

        let plaintext = self.primitive.decrypt(ciphertext, &private_key).await?;
        let text = std::str::from_utf8(&plaintext)
            .map_err(|e| RecryptError::Format(format!("Decrypted plaintext is not UTF-8: {e}")))?;
        tracing::debug!(len = plaintext.len(), "Decrypted");
        Ok(padding::unpad(text).to_owned())
    }

    /// Sign the UTF-8 bytes of `text`, returning a hex signature
    pub async fn sign(&self, key_pair: &KeyPair, text: &str) -> RecryptResult<String> {
        let signing_private = key_pair.private_bytes()?;
        let signature = self
            .primitive
            .sign(&signing_private, text.as_bytes())
            .await?;
        tracing::debug!(len = text.len(), "Signed");
        Ok(hex_codec::encode(signature))
    }

    /// Check a hex signature over `text`
    ///
    /// A signature from a different key or over different text is
    /// `Ok(false)`.
    pub async fn verify(&self, pub_key: &str, signature: &str, text: &str) -> RecryptResult<bool> {
        let public = hex_codec::decode(pub_key)?;
        let signature = hex_codec::decode(signature)?;
        let valid = self
            .primitive
            .verify(&public, text.as_bytes(), &signature)
            .await?;
        tracing::debug!(valid, "Verified signature");
        Ok(valid)
    }

    /// Serialize any primitive structure to a transport string
    pub fn serialize(&self, value: &Node) -> RecryptResult<String> {
        Ok(self.serializer.stringify(value)?)
    }

    /// Parse a transport string back into a primitive structure
    pub fn deserialize(&self, transport: &str) -> RecryptResult<Node> {
        Ok(self.serializer.parse(transport)?)
    }
}
