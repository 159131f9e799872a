use crate::padding::DEFAULT_MIN_LEN;
use figment::{
    Figment,
    providers::{Env, Format, Toml},
};
use rights_codec::{Base64Strategy, StructuralSerializer, TextEncoder};
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Startup configuration for the facade
///
/// Fixed once loaded and passed by value; nothing reconfigures a running
/// facade.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RecryptConfig {
    #[serde(default)]
    pub text_encoding: Base64Strategy,

    #[serde(default = "default_min_plaintext_len")]
    pub min_plaintext_len: usize,
}

fn default_min_plaintext_len() -> usize {
    DEFAULT_MIN_LEN
}

impl Default for RecryptConfig {
    fn default() -> Self {
        Self {
            text_encoding: Base64Strategy::default(),
            min_plaintext_len: default_min_plaintext_len(),
        }
    }
}

impl RecryptConfig {
    /// Load from `recrypt.toml` in the working directory, then `RECRYPT_*`
    /// environment variables
    pub fn load() -> Result<Self, figment::Error> {
        Self::extract(Figment::new().merge(Toml::file("recrypt.toml")))
    }

    /// Load from a specific TOML file, then `RECRYPT_*` environment variables
    pub fn load_from(path: impl AsRef<Path>) -> Result<Self, figment::Error> {
        Self::extract(Figment::new().merge(Toml::file(path.as_ref())))
    }

    fn extract(figment: Figment) -> Result<Self, figment::Error> {
        let config: RecryptConfig = figment.merge(Env::prefixed("RECRYPT_")).extract()?;
        tracing::debug!(
            text_encoding = %config.text_encoding,
            min_plaintext_len = config.min_plaintext_len,
            "Loaded recrypt config"
        );
        Ok(config)
    }

    pub fn text_encoder(&self) -> TextEncoder {
        TextEncoder::new(self.text_encoding)
    }

    pub fn serializer(&self) -> StructuralSerializer {
        StructuralSerializer::new(self.text_encoder())
    }
}
