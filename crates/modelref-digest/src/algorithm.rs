use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::DigestError;

/// Hash algorithms a [`Digest`](crate::Digest) can carry.
///
/// Each algorithm fixes the width of its hash. Adding a member here means
/// adding a matching variant to `Digest` with a byte array of that width.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DigestAlgorithm {
    Sha256,
}

impl DigestAlgorithm {
    /// Every supported algorithm.
    pub const ALL: &'static [DigestAlgorithm] = &[DigestAlgorithm::Sha256];

    /// The identifier used in the textual form (e.g. `sha256`).
    pub const fn as_str(&self) -> &'static str {
        match self {
            DigestAlgorithm::Sha256 => "sha256",
        }
    }

    /// Width of the raw hash in bytes.
    pub const fn hash_len(&self) -> usize {
        match self {
            DigestAlgorithm::Sha256 => 32,
        }
    }

    /// Width of the hash in hex characters.
    pub const fn hex_len(&self) -> usize {
        self.hash_len() * 2
    }
}

impl fmt::Display for DigestAlgorithm {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for DigestAlgorithm {
    type Err = DigestError;

    /// Exact, case-sensitive match against the known identifiers.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        DigestAlgorithm::ALL
            .iter()
            .copied()
            .find(|alg| alg.as_str() == s)
            .ok_or_else(|| DigestError::UnknownAlgorithm(s.to_string()))
    }
}
