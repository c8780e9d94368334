//! Error types for name validation and store operations.

use thiserror::Error;

use crate::part::PartKind;

/// Errors that can occur when validating or storing model names.
#[derive(Debug, Error)]
pub enum NameError {
    /// Neither a model nor a digest is present.
    #[error("name must have a model or a digest")]
    Empty,

    /// A separator promised a part but nothing followed it.
    #[error("missing {kind} part: separator present but content empty")]
    MissingPart { kind: PartKind },

    /// A present part breaks the length or character rules for its kind.
    #[error("invalid {kind} part {value:?}: {reason}")]
    InvalidPart {
        kind: PartKind,
        value: String,
        reason: String,
    },

    /// The name has no model, so there is nothing to store it under.
    #[error("name {name:?} has no model to store under")]
    NoModel { name: String },

    /// The digest cannot be used to address content.
    #[error("invalid digest: {0}")]
    InvalidDigest(String),

    /// Defaults could not be loaded.
    #[error("invalid defaults: {0}")]
    Config(String),

    /// A store lock was poisoned by a panicking writer.
    #[error("store lock poisoned: {0}")]
    LockPoisoned(String),
}

/// Convenience type alias for name operations.
pub type Result<T> = std::result::Result<T, NameError>;
