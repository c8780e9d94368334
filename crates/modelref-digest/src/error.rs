use thiserror::Error;

/// Reasons a string is rejected as a digest.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum DigestError {
    #[error("missing separator: expected `<algorithm>:<hex>` or `<algorithm>-<hex>`")]
    MissingSeparator,

    #[error("unsupported digest algorithm: {0:?}")]
    UnknownAlgorithm(String),

    #[error("invalid hex string: {0}")]
    InvalidHex(String),

    #[error("invalid hex length: expected {expected}, got {actual}")]
    InvalidLength { expected: usize, actual: usize },

    #[error("digest hash is all zeros")]
    ZeroHash,
}

/// Convenience type alias for digest operations.
pub type Result<T> = std::result::Result<T, DigestError>;
