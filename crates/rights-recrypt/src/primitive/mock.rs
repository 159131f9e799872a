//! Mock recrypt primitive for testing
//!
//! NOT SECURE - the public point's `x` coordinate is the secret scalar and
//! transform keys reveal the delegator's secret to anyone holding the
//! delegatee's public key. Exists so the facade and the transport format can
//! be exercised in-process without a native library.
//!
//! The structures it returns mirror what real pairing-based primitives hand
//! back: nested maps with binary leaves, a list of transform blocks that
//! grows by one per hop, and an ed25519 signature over the whole value.

use crate::error::{PrimitiveError, PrimitiveResult};
use crate::keys::PublicPoint;
use crate::primitive::{EncryptionKeys, RecryptPrimitive, SigningKeys};
use async_trait::async_trait;
use chacha20::XChaCha20;
use chacha20::cipher::{KeyIvInit, StreamCipher};
use ed25519_dalek::{Signature, Signer, SigningKey, Verifier, VerifyingKey};
use rand::{RngCore, rngs::OsRng};
use rights_codec::Node;
use sha2::{Digest, Sha256};
use zeroize::Zeroizing;

const SCALAR_LEN: usize = 32;
const NONCE_LEN: usize = 24;
const POINT_TAG: &[u8] = b"rights-recrypt/mock/point-y";
const AUTH_TAG: &[u8] = b"rights-recrypt/mock/auth";

pub struct MockPrimitive {
    _private: (),
}

impl MockPrimitive {
    pub fn new() -> Self {
        tracing::warn!("Using mock recrypt primitive - NOT FOR PRODUCTION USE");
        Self { _private: () }
    }

    /// Number of re-encryption hops applied to a ciphertext
    pub fn hop_count(ciphertext: &Node) -> PrimitiveResult<usize> {
        field(ciphertext, "transformBlocks")?
            .as_list()
            .map(<[Node]>::len)
            .ok_or_else(|| PrimitiveError::Malformed("transformBlocks must be a list".into()))
    }
}

impl Default for MockPrimitive {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl RecryptPrimitive for MockPrimitive {
    fn name(&self) -> &'static str {
        "Mock (TESTING ONLY)"
    }

    async fn generate_key_pair(&self) -> PrimitiveResult<EncryptionKeys> {
        let mut secret = Zeroizing::new([0u8; SCALAR_LEN]);
        OsRng
            .try_fill_bytes(&mut secret[..])
            .map_err(|e| PrimitiveError::KeyGeneration(e.to_string()))?;

        Ok(EncryptionKeys {
            public_key: point_from_secret(&secret),
            private_key: Zeroizing::new(secret.to_vec()),
        })
    }

    async fn generate_signing_key_pair(&self) -> PrimitiveResult<SigningKeys> {
        let signing_key = SigningKey::generate(&mut OsRng);
        Ok(SigningKeys {
            private_key: Zeroizing::new(signing_key.to_keypair_bytes().to_vec()),
            public_key: signing_key.verifying_key().to_bytes().to_vec(),
        })
    }

    async fn generate_transform_key(
        &self,
        from_private: &[u8],
        to_public: &PublicPoint,
        signing_private: &[u8],
    ) -> PrimitiveResult<Node> {
        let from = secret_scalar(from_private)?;
        let to_x = checked_point(to_public)?;
        let signer = signing_key(signing_private)?;

        // Mock: rk = from_sk XOR to_pk
        let encrypted_key: Vec<u8> = from.iter().zip(to_x.iter()).map(|(a, b)| a ^ b).collect();

        let body = Node::map([
            ("fromPublicKey", point_node(&point_from_secret(&from))),
            ("toPublicKey", point_node(to_public)),
            ("encryptedKey", Node::binary(encrypted_key)),
        ]);
        seal(body, &signer)
    }

    async fn encrypt(
        &self,
        plaintext: &[u8],
        to_public: &PublicPoint,
        signing_private: &[u8],
    ) -> PrimitiveResult<Node> {
        let key = checked_point(to_public)?;
        let signer = signing_key(signing_private)?;

        let mut body = lock(&key, plaintext)?;
        body.insert("transformBlocks", Node::List(Vec::new()));
        seal(body, &signer)
    }

    async fn transform(
        &self,
        ciphertext: Node,
        transform_key: Node,
        signing_private: &[u8],
    ) -> PrimitiveResult<Node> {
        verify_seal(&ciphertext)?;
        verify_seal(&transform_key)?;
        let signer = signing_key(signing_private)?;

        let to_public = point_from_node(field(&transform_key, "toPublicKey")?)?;
        let to_x = checked_point(&to_public)?;
        let encrypted_key = binary_field(&transform_key, "encryptedKey")?;
        if encrypted_key.len() != SCALAR_LEN {
            return Err(PrimitiveError::Malformed(format!(
                "encryptedKey must be {SCALAR_LEN} bytes"
            )));
        }

        // Mock: recover from_sk, decrypt, re-encrypt to the delegatee
        let mut from = Zeroizing::new([0u8; SCALAR_LEN]);
        for (i, byte) in from.iter_mut().enumerate() {
            *byte = encrypted_key[i] ^ to_x[i];
        }

        let plaintext = unlock(&from, &ciphertext).map_err(|e| match e {
            PrimitiveError::Decryption(_) => {
                PrimitiveError::Transform("Transform key does not match ciphertext".into())
            }
            other => other,
        })?;

        let mut blocks = field(&ciphertext, "transformBlocks")?
            .as_list()
            .ok_or_else(|| PrimitiveError::Malformed("transformBlocks must be a list".into()))?
            .to_vec();
        let level = match blocks.last() {
            Some(last) => field(last, "level")?
                .as_u64()
                .ok_or_else(|| PrimitiveError::Malformed("level must be an integer".into()))?,
            None => 0,
        };
        blocks.push(Node::map([
            ("toPublicKey", point_node(&to_public)),
            ("level", Node::number(level + 1)),
        ]));

        let mut body = lock(&to_x, &plaintext)?;
        body.insert("transformBlocks", Node::List(blocks));
        seal(body, &signer)
    }

    async fn decrypt(
        &self,
        ciphertext: Node,
        private_key: &[u8],
    ) -> PrimitiveResult<Zeroizing<Vec<u8>>> {
        verify_seal(&ciphertext)?;
        let key = secret_scalar(private_key)?;
        unlock(&key, &ciphertext)
    }

    async fn sign(&self, signing_private: &[u8], message: &[u8]) -> PrimitiveResult<Vec<u8>> {
        let signer = signing_key(signing_private)?;
        Ok(signer.sign(message).to_bytes().to_vec())
    }

    async fn verify(
        &self,
        signing_public: &[u8],
        message: &[u8],
        signature: &[u8],
    ) -> PrimitiveResult<bool> {
        let key = verifying_key(signing_public)?;
        let signature = Signature::from_slice(signature)
            .map_err(|_| PrimitiveError::Signature("Signature must be 64 bytes".into()))?;
        Ok(key.verify(message, &signature).is_ok())
    }
}

fn point_from_secret(secret: &[u8; SCALAR_LEN]) -> PublicPoint {
    // Mock: x = sk
    PublicPoint::new(secret.to_vec(), point_y(secret))
}

fn point_y(x: &[u8]) -> Vec<u8> {
    Sha256::new()
        .chain_update(POINT_TAG)
        .chain_update(x)
        .finalize()
        .to_vec()
}

/// Validate a public point and return its `x` coordinate as the cipher key
fn checked_point(point: &PublicPoint) -> PrimitiveResult<Zeroizing<[u8; SCALAR_LEN]>> {
    let x: [u8; SCALAR_LEN] = point.x.as_slice().try_into().map_err(|_| {
        PrimitiveError::InvalidKey(format!("Public x coordinate must be {SCALAR_LEN} bytes"))
    })?;
    if point_y(&x) != point.y {
        return Err(PrimitiveError::InvalidKey(
            "Public key is not a valid point".into(),
        ));
    }
    Ok(Zeroizing::new(x))
}

fn secret_scalar(bytes: &[u8]) -> PrimitiveResult<Zeroizing<[u8; SCALAR_LEN]>> {
    let scalar: [u8; SCALAR_LEN] = bytes.try_into().map_err(|_| {
        PrimitiveError::InvalidKey(format!("Private key must be {SCALAR_LEN} bytes"))
    })?;
    Ok(Zeroizing::new(scalar))
}

fn signing_key(bytes: &[u8]) -> PrimitiveResult<SigningKey> {
    let keypair: &[u8; 64] = bytes
        .try_into()
        .map_err(|_| PrimitiveError::InvalidKey("Signing key must be 64 bytes".into()))?;
    SigningKey::from_keypair_bytes(keypair)
        .map_err(|e| PrimitiveError::InvalidKey(format!("Signing key: {e}")))
}

fn verifying_key(bytes: &[u8]) -> PrimitiveResult<VerifyingKey> {
    let key: &[u8; 32] = bytes
        .try_into()
        .map_err(|_| PrimitiveError::InvalidKey("Verifying key must be 32 bytes".into()))?;
    VerifyingKey::from_bytes(key)
        .map_err(|e| PrimitiveError::InvalidKey(format!("Verifying key: {e}")))
}

fn auth_hash(key: &[u8], plaintext: &[u8]) -> Vec<u8> {
    Sha256::new()
        .chain_update(AUTH_TAG)
        .chain_update(key)
        .chain_update(plaintext)
        .finalize()
        .to_vec()
}

/// Encrypt under `key`, returning the unsigned ciphertext body
fn lock(key: &[u8; SCALAR_LEN], plaintext: &[u8]) -> PrimitiveResult<Node> {
    let mut nonce = [0u8; NONCE_LEN];
    OsRng
        .try_fill_bytes(&mut nonce)
        .map_err(|e| PrimitiveError::Encryption(e.to_string()))?;

    let mut ct = plaintext.to_vec();
    let mut cipher = XChaCha20::new(key.into(), &nonce.into());
    cipher.apply_keystream(&mut ct);

    Ok(Node::map([
        ("encryptedMessage", Node::binary(ct)),
        ("nonce", Node::binary(nonce.to_vec())),
        ("authHash", Node::binary(auth_hash(key, plaintext))),
    ]))
}

fn unlock(key: &[u8; SCALAR_LEN], ciphertext: &Node) -> PrimitiveResult<Zeroizing<Vec<u8>>> {
    let nonce: [u8; NONCE_LEN] = binary_field(ciphertext, "nonce")?
        .try_into()
        .map_err(|_| PrimitiveError::Malformed(format!("nonce must be {NONCE_LEN} bytes")))?;

    let mut pt = Zeroizing::new(binary_field(ciphertext, "encryptedMessage")?.to_vec());
    let mut cipher = XChaCha20::new(key.into(), &nonce.into());
    cipher.apply_keystream(&mut pt);

    if auth_hash(key, &pt) != binary_field(ciphertext, "authHash")? {
        return Err(PrimitiveError::Decryption(
            "Authentication hash mismatch".into(),
        ));
    }
    Ok(pt)
}

fn signing_payload(body: &Node) -> PrimitiveResult<Vec<u8>> {
    serde_json::to_vec(body).map_err(|e| PrimitiveError::Malformed(e.to_string()))
}

/// Attach the signer's public key and a signature over the whole body
fn seal(mut body: Node, signer: &SigningKey) -> PrimitiveResult<Node> {
    body.insert(
        "publicSigningKey",
        Node::binary(signer.verifying_key().to_bytes().to_vec()),
    );
    let signature = signer.sign(&signing_payload(&body)?);
    body.insert("signature", Node::binary(signature.to_bytes().to_vec()));
    Ok(body)
}

fn verify_seal(node: &Node) -> PrimitiveResult<()> {
    let mut body = node.clone();
    let signature = body
        .remove("signature")
        .ok_or_else(|| PrimitiveError::Malformed("missing field signature".into()))?;
    let signature = signature
        .as_binary()
        .ok_or_else(|| PrimitiveError::Malformed("signature must be binary".into()))
        .and_then(|s| {
            Signature::from_slice(s)
                .map_err(|_| PrimitiveError::Signature("Signature must be 64 bytes".into()))
        })?;
    let key = verifying_key(binary_field(&body, "publicSigningKey")?)?;

    key.verify(&signing_payload(&body)?, &signature)
        .map_err(|_| PrimitiveError::Signature("Embedded signature does not verify".into()))
}

fn point_node(point: &PublicPoint) -> Node {
    Node::map([
        ("x", Node::binary(point.x.clone())),
        ("y", Node::binary(point.y.clone())),
    ])
}

fn point_from_node(node: &Node) -> PrimitiveResult<PublicPoint> {
    Ok(PublicPoint::new(
        binary_field(node, "x")?.to_vec(),
        binary_field(node, "y")?.to_vec(),
    ))
}

fn field<'a>(node: &'a Node, key: &str) -> PrimitiveResult<&'a Node> {
    node.get(key)
        .ok_or_else(|| PrimitiveError::Malformed(format!("missing field {key}")))
}

fn binary_field<'a>(node: &'a Node, key: &str) -> PrimitiveResult<&'a [u8]> {
    field(node, key)?
        .as_binary()
        .ok_or_else(|| PrimitiveError::Malformed(format!("{key} must be binary")))
}
