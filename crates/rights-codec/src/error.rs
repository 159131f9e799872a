use thiserror::Error;

/// Coarse classification of a codec failure
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    /// Bad hex parity or characters, invalid base64 alphabet or padding
    Format,
    /// JSON malformed after the transport layer decoded cleanly
    Serialization,
}

#[derive(Error, Debug)]
pub enum CodecError {
    #[error("Hex decode error: {0}")]
    Hex(#[from] hex::FromHexError),

    #[error("Base64 decode error: {0}")]
    Base64(String),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

impl CodecError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::Hex(_) | Self::Base64(_) => ErrorKind::Format,
            Self::Json(_) => ErrorKind::Serialization,
        }
    }
}

impl From<base64::DecodeError> for CodecError {
    fn from(e: base64::DecodeError) -> Self {
        Self::Base64(e.to_string())
    }
}

pub type CodecResult<T> = Result<T, CodecError>;
