//! End-to-end workflows through the facade
//!
//! Ciphertexts are non-deterministic, so these check semantic results
//! (what decrypts to what), never transport bytes.

use rights_recrypt::{
    Base64Strategy, ErrorKind, MockPrimitive, NaturalRightsRecrypt, Node, PrimitiveError,
    RecryptConfig, RecryptError,
};

fn recrypt() -> NaturalRightsRecrypt<MockPrimitive> {
    NaturalRightsRecrypt::with_defaults(MockPrimitive::new())
}

#[tokio::test]
async fn test_encrypt_decrypt() {
    let recrypt = recrypt();
    let crypt_key_pair = recrypt.generate_encryption_key_pair().await.unwrap();
    let sign_key_pair = recrypt.generate_signing_key_pair().await.unwrap();

    let plaintext = "Some plaintext";
    let ciphertext = recrypt
        .encrypt(crypt_key_pair.pub_key(), plaintext, &sign_key_pair)
        .await
        .unwrap();
    let decrypted = recrypt.decrypt(&crypt_key_pair, &ciphertext).await.unwrap();

    assert_eq!(decrypted, plaintext);
}

#[tokio::test]
async fn test_reencrypt_decrypt() {
    let recrypt = recrypt();
    let crypt_key_pair = recrypt.generate_encryption_key_pair().await.unwrap();
    let other_crypt_key_pair = recrypt.generate_encryption_key_pair().await.unwrap();
    let sign_key_pair = recrypt.generate_signing_key_pair().await.unwrap();

    let plaintext = "Some plaintext";
    let ciphertext = recrypt
        .encrypt(crypt_key_pair.pub_key(), plaintext, &sign_key_pair)
        .await
        .unwrap();
    let transform_key = recrypt
        .generate_transform_key(&crypt_key_pair, other_crypt_key_pair.pub_key(), &sign_key_pair)
        .await
        .unwrap();
    let transformed = recrypt
        .transform(&transform_key, &ciphertext, &sign_key_pair)
        .await
        .unwrap();
    let decrypted = recrypt
        .decrypt(&other_crypt_key_pair, &transformed)
        .await
        .unwrap();

    assert_eq!(decrypted, plaintext);
}

#[tokio::test]
async fn test_signatures() {
    let recrypt = recrypt();
    let sign_key_pair = recrypt.generate_signing_key_pair().await.unwrap();
    let other_sign_key_pair = recrypt.generate_signing_key_pair().await.unwrap();

    let text = "Some text to sign";
    let signature = recrypt.sign(&sign_key_pair, text).await.unwrap();

    assert!(recrypt
        .verify(sign_key_pair.pub_key(), &signature, text)
        .await
        .unwrap());
    assert!(!recrypt
        .verify(other_sign_key_pair.pub_key(), &signature, text)
        .await
        .unwrap());
}

#[tokio::test]
async fn test_signature_hex_shape() {
    let recrypt = recrypt();
    let kp = recrypt.generate_signing_key_pair().await.unwrap();
    let signature = recrypt.sign(&kp, "abc").await.unwrap();
    assert_eq!(signature.len(), 128);
    assert!(signature.chars().all(|c| matches!(c, '0'..='9' | 'a'..='f')));
}

#[tokio::test]
async fn test_verify_bad_hex_is_format_error() {
    let recrypt = recrypt();
    let kp = recrypt.generate_signing_key_pair().await.unwrap();
    let err = recrypt.verify(kp.pub_key(), "zz", "text").await.unwrap_err();
    assert_eq!(err.kind(), ErrorKind::Format);
}

#[tokio::test]
async fn test_long_plaintext_roundtrips_unchanged() {
    let recrypt = recrypt();
    let kp = recrypt.generate_encryption_key_pair().await.unwrap();
    let signer = recrypt.generate_signing_key_pair().await.unwrap();

    let plaintext = "0123456789abcdef".repeat(40);
    assert!(plaintext.len() > 384);
    let ct = recrypt.encrypt(kp.pub_key(), &plaintext, &signer).await.unwrap();
    assert_eq!(recrypt.decrypt(&kp, &ct).await.unwrap(), plaintext);
}

#[tokio::test]
async fn test_empty_plaintext_roundtrips() {
    let recrypt = recrypt();
    let kp = recrypt.generate_encryption_key_pair().await.unwrap();
    let signer = recrypt.generate_signing_key_pair().await.unwrap();

    let ct = recrypt.encrypt(kp.pub_key(), "", &signer).await.unwrap();
    assert_eq!(recrypt.decrypt(&kp, &ct).await.unwrap(), "");
}

#[tokio::test]
async fn test_multi_hop_chain() {
    let recrypt = recrypt();
    let alice = recrypt.generate_encryption_key_pair().await.unwrap();
    let bob = recrypt.generate_encryption_key_pair().await.unwrap();
    let carol = recrypt.generate_encryption_key_pair().await.unwrap();
    let signer = recrypt.generate_signing_key_pair().await.unwrap();

    let ct0 = recrypt
        .encrypt(alice.pub_key(), "Multi-hop recryption test", &signer)
        .await
        .unwrap();
    let ab = recrypt
        .generate_transform_key(&alice, bob.pub_key(), &signer)
        .await
        .unwrap();
    let bc = recrypt
        .generate_transform_key(&bob, carol.pub_key(), &signer)
        .await
        .unwrap();

    let ct1 = recrypt.transform(&ab, &ct0, &signer).await.unwrap();
    let ct2 = recrypt.transform(&bc, &ct1, &signer).await.unwrap();

    let hops = |ct: &str| MockPrimitive::hop_count(&recrypt.deserialize(ct).unwrap()).unwrap();
    assert_eq!(hops(&ct0), 0);
    assert_eq!(hops(&ct1), 1);
    assert_eq!(hops(&ct2), 2);

    assert_eq!(
        recrypt.decrypt(&carol, &ct2).await.unwrap(),
        "Multi-hop recryption test"
    );
}

#[tokio::test]
async fn test_transform_key_for_other_delegator_fails() {
    let recrypt = recrypt();
    let alice = recrypt.generate_encryption_key_pair().await.unwrap();
    let bob = recrypt.generate_encryption_key_pair().await.unwrap();
    let carol = recrypt.generate_encryption_key_pair().await.unwrap();
    let signer = recrypt.generate_signing_key_pair().await.unwrap();

    let ct = recrypt.encrypt(alice.pub_key(), "hi", &signer).await.unwrap();
    let bc = recrypt
        .generate_transform_key(&bob, carol.pub_key(), &signer)
        .await
        .unwrap();

    let err = recrypt.transform(&bc, &ct, &signer).await.unwrap_err();
    assert_eq!(err.kind(), ErrorKind::Primitive);
}

#[tokio::test]
async fn test_wrong_recipient_is_primitive_error() {
    let recrypt = recrypt();
    let alice = recrypt.generate_encryption_key_pair().await.unwrap();
    let eve = recrypt.generate_encryption_key_pair().await.unwrap();
    let signer = recrypt.generate_signing_key_pair().await.unwrap();

    let ct = recrypt.encrypt(alice.pub_key(), "hi", &signer).await.unwrap();
    let err = recrypt.decrypt(&eve, &ct).await.unwrap_err();
    assert_eq!(err.kind(), ErrorKind::Primitive);
}

#[tokio::test]
async fn test_corrupt_transport_errors_by_kind() {
    let recrypt = recrypt();
    let kp = recrypt.generate_encryption_key_pair().await.unwrap();

    let err = recrypt.decrypt(&kp, "%%%not-base64%%%").await.unwrap_err();
    assert_eq!(err.kind(), ErrorKind::Format);

    let not_json = recrypt.serializer().encoder().encode(b"{ciphertext");
    let err = recrypt.decrypt(&kp, &not_json).await.unwrap_err();
    assert_eq!(err.kind(), ErrorKind::Serialization);

    let missing_fields = recrypt.serializer().encoder().encode(b"{}");
    let err = recrypt.decrypt(&kp, &missing_fields).await.unwrap_err();
    assert_eq!(err.kind(), ErrorKind::Primitive);
}

#[tokio::test]
async fn test_lookup_strategy_interoperates() {
    let engine = recrypt();
    let config = RecryptConfig {
        text_encoding: Base64Strategy::Lookup,
        ..RecryptConfig::default()
    };
    let lookup = NaturalRightsRecrypt::new(MockPrimitive::new(), &config);

    let kp = engine.generate_encryption_key_pair().await.unwrap();
    let signer = engine.generate_signing_key_pair().await.unwrap();

    let ct = engine.encrypt(kp.pub_key(), "cross-strategy", &signer).await.unwrap();
    assert_eq!(lookup.decrypt(&kp, &ct).await.unwrap(), "cross-strategy");
}

#[tokio::test]
async fn test_custom_min_plaintext_len() {
    let config = RecryptConfig {
        min_plaintext_len: 16,
        ..RecryptConfig::default()
    };
    let recrypt = NaturalRightsRecrypt::new(MockPrimitive::new(), &config);
    let kp = recrypt.generate_encryption_key_pair().await.unwrap();
    let signer = recrypt.generate_signing_key_pair().await.unwrap();

    let ct = recrypt.encrypt(kp.pub_key(), "tiny", &signer).await.unwrap();
    let node = recrypt.deserialize(&ct).unwrap();
    let message = node
        .get("encryptedMessage")
        .and_then(|n| n.as_binary())
        .unwrap();
    assert_eq!(message.len(), 16);
    assert_eq!(recrypt.decrypt(&kp, &ct).await.unwrap(), "tiny");
}

#[tokio::test]
async fn test_concurrent_key_generation() {
    let recrypt = recrypt();
    let (a, b, s) = tokio::join!(
        recrypt.generate_encryption_key_pair(),
        recrypt.generate_encryption_key_pair(),
        recrypt.generate_signing_key_pair(),
    );
    let (a, b, s) = (a.unwrap(), b.unwrap(), s.unwrap());
    assert_ne!(a.pub_key(), b.pub_key());

    let (ca, cb) = tokio::join!(
        recrypt.encrypt(a.pub_key(), "for a", &s),
        recrypt.encrypt(b.pub_key(), "for b", &s),
    );
    assert_eq!(recrypt.decrypt(&a, &ca.unwrap()).await.unwrap(), "for a");
    assert_eq!(recrypt.decrypt(&b, &cb.unwrap()).await.unwrap(), "for b");
}

#[tokio::test]
async fn test_verify_malformed_public_key_is_primitive_error() {
    let recrypt = recrypt();
    let kp = recrypt.generate_signing_key_pair().await.unwrap();
    let text = "Some text to sign";
    let signature = recrypt.sign(&kp, text).await.unwrap();

    let err = recrypt.verify("abcd", &signature, text).await.unwrap_err();
    assert_eq!(err.kind(), ErrorKind::Primitive);
    assert!(matches!(
        err,
        RecryptError::Primitive(PrimitiveError::InvalidKey(_))
    ));
}

#[tokio::test]
async fn test_verify_wrong_length_signature_is_primitive_error() {
    let recrypt = recrypt();
    let kp = recrypt.generate_signing_key_pair().await.unwrap();

    let err = recrypt.verify(kp.pub_key(), "00", "text").await.unwrap_err();
    assert_eq!(err.kind(), ErrorKind::Primitive);
    assert!(matches!(
        err,
        RecryptError::Primitive(PrimitiveError::Signature(_))
    ));
}

#[tokio::test]
async fn test_tampered_ciphertext_rejected_on_transform() {
    let recrypt = recrypt();
    let alice = recrypt.generate_encryption_key_pair().await.unwrap();
    let bob = recrypt.generate_encryption_key_pair().await.unwrap();
    let signer = recrypt.generate_signing_key_pair().await.unwrap();

    let ct = recrypt.encrypt(alice.pub_key(), "hi", &signer).await.unwrap();
    let tk = recrypt
        .generate_transform_key(&alice, bob.pub_key(), &signer)
        .await
        .unwrap();

    let mut node = recrypt.deserialize(&ct).unwrap();
    if let Some(Node::Binary(bytes)) = node.get_mut("encryptedMessage") {
        bytes[0] ^= 0x01;
    }
    let tampered = recrypt.serialize(&node).unwrap();

    let err = recrypt.transform(&tk, &tampered, &signer).await.unwrap_err();
    assert!(matches!(
        err,
        RecryptError::Primitive(PrimitiveError::Signature(_))
    ));
}
