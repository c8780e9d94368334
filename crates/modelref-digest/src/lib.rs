//! Typed content digests for model references.
//!
//! A digest is written `algorithm-hexhash` (canonical) or `algorithm:hexhash`
//! (accepted on input). Parsing never fails outright: malformed input
//! collapses to the zero value [`Digest::Unknown`], and callers check
//! [`Digest::is_valid`] before trusting a value. [`Digest::try_parse`] and
//! the [`FromStr`](std::str::FromStr) impl are the strict variants that say
//! why input was rejected.
//!
//! # Key Types
//!
//! - [`Digest`] — Algorithm-tagged hash value
//! - [`DigestAlgorithm`] — Supported hash algorithms and their widths
//! - [`DigestError`] — Rejection reasons for the strict parsers

pub mod algorithm;
pub mod digest;
pub mod error;

pub use algorithm::DigestAlgorithm;
pub use digest::Digest;
pub use error::{DigestError, Result};
