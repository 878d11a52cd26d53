use thiserror::Error;

pub type DecodeResult<T> = Result<T, DecodeError>;

/// Recoverable failure while decoding an identifier token.
///
/// Callers are expected to fall back to treating the offending span as
/// literal text; nothing here is fatal.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum DecodeError {
    #[error("malformed token: {0}")]
    Malformed(String),

    #[error("unknown prefix: {0}")]
    UnknownPrefix(String),

    #[error("invalid payload length: expected {expected}, found {found}")]
    InvalidLength { expected: usize, found: usize },

    #[error("truncated TLV payload at offset {0}")]
    TruncatedTlv(usize),

    #[error("relay hint is not valid UTF-8")]
    InvalidRelay,

    #[error("identifier string is not valid UTF-8")]
    InvalidIdentifier,

    #[error("missing required TLV entry: {0}")]
    MissingTlv(&'static str),

    #[error("invalid TLV value length for {entry}: {found}")]
    InvalidTlvLength { entry: &'static str, found: usize },
}

impl DecodeError {
    pub fn malformed(message: impl Into<String>) -> Self {
        Self::Malformed(message.into())
    }

    pub fn unknown_prefix(prefix: impl Into<String>) -> Self {
        Self::UnknownPrefix(prefix.into())
    }
}

/// Failure while encoding an identifier.
///
/// Unreachable for well-formed values; it exists so callers can substitute a
/// display fallback instead of panicking if an ill-formed value slips through.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum EncodeError {
    #[error("bech32 encoding failed: {0}")]
    Bech32(String),

    #[error("TLV value too long: {0} bytes")]
    OversizeTlv(usize),
}
