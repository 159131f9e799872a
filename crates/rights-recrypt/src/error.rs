use rights_codec::CodecError;
use thiserror::Error;

/// Which class of failure a [`RecryptError`] belongs to
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    /// Malformed hex, base64 or composite key text
    Format,
    /// JSON malformed after transport decoding
    Serialization,
    /// The primitive rejected its inputs or failed internally
    Primitive,
}

#[derive(Error, Debug)]
pub enum RecryptError {
    #[error("Codec error: {0}")]
    Codec(#[from] CodecError),

    #[error("Format error: {0}")]
    Format(String),

    #[error("Primitive error: {0}")]
    Primitive(#[from] PrimitiveError),
}

impl RecryptError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::Codec(e) => match e.kind() {
                rights_codec::ErrorKind::Format => ErrorKind::Format,
                rights_codec::ErrorKind::Serialization => ErrorKind::Serialization,
            },
            Self::Format(_) => ErrorKind::Format,
            Self::Primitive(_) => ErrorKind::Primitive,
        }
    }
}

pub type RecryptResult<T> = Result<T, RecryptError>;

/// Errors raised by a proxy re-encryption primitive
#[derive(Error, Debug)]
pub enum PrimitiveError {
    #[error("Key generation failed: {0}")]
    KeyGeneration(String),

    #[error("Invalid key material: {0}")]
    InvalidKey(String),

    #[error("Encryption failed: {0}")]
    Encryption(String),

    #[error("Decryption failed: {0}")]
    Decryption(String),

    #[error("Transform failed: {0}")]
    Transform(String),

    #[error("Signature error: {0}")]
    Signature(String),

    #[error("Malformed structure: {0}")]
    Malformed(String),
}

pub type PrimitiveResult<T> = Result<T, PrimitiveError>;
