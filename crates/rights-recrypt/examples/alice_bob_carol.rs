// Alice→Bob→Carol re-encryption over transport strings

use rights_recrypt::{MockPrimitive, NaturalRightsRecrypt, RecryptConfig};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "rights_recrypt=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let config = RecryptConfig::load()?;
    let recrypt = NaturalRightsRecrypt::new(MockPrimitive::new(), &config);

    println!("1. Generating key pairs...");
    let alice = recrypt.generate_encryption_key_pair().await?;
    let bob = recrypt.generate_encryption_key_pair().await?;
    let carol = recrypt.generate_encryption_key_pair().await?;
    let signer = recrypt.generate_signing_key_pair().await?;
    println!("   Alice's public key: {}", alice.pub_key());

    let plaintext = "The secret is: transform encryption";
    println!("2. Alice encrypts: {plaintext:?}");
    let for_alice = recrypt.encrypt(alice.pub_key(), plaintext, &signer).await?;
    println!("   Transport string: {} chars", for_alice.len());

    println!("3. Alice delegates to Bob, Bob delegates to Carol...");
    let alice_to_bob = recrypt
        .generate_transform_key(&alice, bob.pub_key(), &signer)
        .await?;
    let bob_to_carol = recrypt
        .generate_transform_key(&bob, carol.pub_key(), &signer)
        .await?;

    println!("4. Proxy transforms twice (never sees plaintext)...");
    let for_bob = recrypt.transform(&alice_to_bob, &for_alice, &signer).await?;
    let for_carol = recrypt.transform(&bob_to_carol, &for_bob, &signer).await?;

    println!("5. Everyone decrypts:");
    println!("   Alice: {:?}", recrypt.decrypt(&alice, &for_alice).await?);
    println!("   Bob:   {:?}", recrypt.decrypt(&bob, &for_bob).await?);
    println!("   Carol: {:?}", recrypt.decrypt(&carol, &for_carol).await?);

    let signature = recrypt.sign(&signer, plaintext).await?;
    println!(
        "6. Signature verifies: {}",
        recrypt.verify(signer.pub_key(), &signature, plaintext).await?
    );

    Ok(())
}
