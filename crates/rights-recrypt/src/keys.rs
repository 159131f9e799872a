//! Domain-level key pairs and the composite public key format

use crate::error::{RecryptError, RecryptResult};
use rights_codec::hex_codec;
use serde::{Deserialize, Serialize};
use zeroize::{Zeroize, ZeroizeOnDrop, Zeroizing};

/// A hex-encoded key pair handed to callers
///
/// Encryption pairs carry a composite `"<hexX>.<hexY>"` public key, signing
/// pairs a single hex string. The caller owns storage; nothing here persists.
#[derive(Clone, PartialEq, Eq, Serialize, Deserialize, Zeroize, ZeroizeOnDrop)]
#[serde(rename_all = "camelCase")]
pub struct KeyPair {
    priv_key: String,
    #[zeroize(skip)]
    pub_key: String,
}

impl KeyPair {
    pub fn new(priv_key: impl Into<String>, pub_key: impl Into<String>) -> Self {
        Self {
            priv_key: priv_key.into(),
            pub_key: pub_key.into(),
        }
    }

    pub fn priv_key(&self) -> &str {
        &self.priv_key
    }

    pub fn pub_key(&self) -> &str {
        &self.pub_key
    }

    /// Hex-decode the private key
    pub(crate) fn private_bytes(&self) -> RecryptResult<Zeroizing<Vec<u8>>> {
        Ok(Zeroizing::new(hex_codec::decode(&self.priv_key)?))
    }
}

impl std::fmt::Debug for KeyPair {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("KeyPair")
            .field("priv_key", &"<redacted>")
            .field("pub_key", &self.pub_key)
            .finish()
    }
}

/// An elliptic-curve public key as two independent coordinates
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PublicPoint {
    pub x: Vec<u8>,
    pub y: Vec<u8>,
}

impl PublicPoint {
    pub fn new(x: Vec<u8>, y: Vec<u8>) -> Self {
        Self { x, y }
    }
}

/// Formats as `"<hexX>.<hexY>"`
impl std::fmt::Display for PublicPoint {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{}.{}",
            hex_codec::encode(&self.x),
            hex_codec::encode(&self.y)
        )
    }
}

impl std::str::FromStr for PublicPoint {
    type Err = RecryptError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let (x, y) = s
            .split_once('.')
            .filter(|(_, y)| !y.contains('.'))
            .ok_or_else(|| {
                RecryptError::Format("Public key must have the form <hexX>.<hexY>".into())
            })?;
        Ok(Self {
            x: hex_codec::decode(x)?,
            y: hex_codec::decode(y)?,
        })
    }
}
