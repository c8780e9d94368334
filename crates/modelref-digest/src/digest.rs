use std::fmt;
use std::io::{self, Read};
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use sha2::{Digest as _, Sha256};

use crate::algorithm::DigestAlgorithm;
use crate::error::{DigestError, Result};

/// Zero-value hash width used when formatting [`Digest::Unknown`].
const UNKNOWN_HEX_LEN: usize = 64;

/// Read buffer size for [`Digest::sha256_reader`].
const CHUNK_SIZE: usize = 1024 * 1024;

/// A typed content hash, written `algorithm-hexhash`.
///
/// `Digest` is a plain value: it is `Copy`, comparable, and can be used as a
/// map key. The zero value is [`Digest::Unknown`], which is never valid.
/// A known algorithm with an all-zero hash is also invalid, even though it
/// decodes without error.
///
/// # Examples
///
/// ```
/// use modelref_digest::Digest;
///
/// let hex = "abcdef0123456789abcdef0123456789abcdef0123456789abcdef0123456789";
/// let d = Digest::parse(&format!("sha256:{hex}"));
/// assert!(d.is_valid());
/// assert_eq!(d.to_string(), format!("sha256-{hex}"));
///
/// assert!(!Digest::parse("sha256-x").is_valid());
/// ```
#[derive(Clone, Copy, Default, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(into = "String", try_from = "String")]
pub enum Digest {
    /// Unrecognized or malformed input.
    #[default]
    Unknown,
    /// A SHA-256 hash.
    Sha256([u8; 32]),
}

impl Digest {
    /// Parse a digest, collapsing any malformed input to [`Digest::Unknown`].
    ///
    /// Accepts both `sha256:<hex>` and `sha256-<hex>`. The `:` form does not
    /// survive formatting: [`Display`](fmt::Display) always writes `-`.
    pub fn parse(s: &str) -> Self {
        Self::try_parse(s).unwrap_or_default()
    }

    /// Parse a digest, reporting why malformed input was rejected.
    ///
    /// The split happens at the last `:`, or at the last `-` when no `:` is
    /// present. An all-zero hash is structurally fine and is returned as-is;
    /// check [`is_valid`](Self::is_valid) or use [`FromStr`] to reject it.
    pub fn try_parse(s: &str) -> Result<Self> {
        let (alg, hash) = s
            .rsplit_once(':')
            .or_else(|| s.rsplit_once('-'))
            .ok_or(DigestError::MissingSeparator)?;

        match alg.parse::<DigestAlgorithm>()? {
            DigestAlgorithm::Sha256 => {
                let mut buf = [0u8; 32];
                decode_hash(DigestAlgorithm::Sha256, hash, &mut buf)?;
                Ok(Digest::Sha256(buf))
            }
        }
    }

    /// Compute the SHA-256 digest of `data`.
    pub fn sha256_of(data: &[u8]) -> Self {
        Digest::Sha256(Sha256::digest(data).into())
    }

    /// Compute the SHA-256 digest of everything `reader` yields.
    ///
    /// The input is hashed in fixed-size chunks, so model blobs of any size
    /// are never held in memory at once.
    pub fn sha256_reader(mut reader: impl Read) -> io::Result<Self> {
        let mut hasher = Sha256::new();
        let mut buffer = vec![0u8; CHUNK_SIZE];
        loop {
            let n = match reader.read(&mut buffer) {
                Ok(0) => break,
                Ok(n) => n,
                Err(e) if e.kind() == io::ErrorKind::Interrupted => continue,
                Err(e) => return Err(e),
            };
            hasher.update(&buffer[..n]);
        }
        Ok(Digest::Sha256(hasher.finalize().into()))
    }

    /// Wrap a pre-computed SHA-256 hash.
    pub const fn from_sha256(hash: [u8; 32]) -> Self {
        Digest::Sha256(hash)
    }

    /// Returns `true` if the algorithm is known and the hash is not all zeros.
    pub fn is_valid(&self) -> bool {
        match self {
            Digest::Unknown => false,
            Digest::Sha256(hash) => hash != &[0u8; 32],
        }
    }

    /// The algorithm, or `None` for [`Digest::Unknown`].
    pub fn algorithm(&self) -> Option<DigestAlgorithm> {
        match self {
            Digest::Unknown => None,
            Digest::Sha256(_) => Some(DigestAlgorithm::Sha256),
        }
    }

    /// The raw hash bytes. Empty for [`Digest::Unknown`].
    pub fn as_bytes(&self) -> &[u8] {
        match self {
            Digest::Unknown => &[],
            Digest::Sha256(hash) => hash,
        }
    }

    /// Lowercase hex of the hash. The zero value yields 64 `0`s.
    pub fn to_hex(&self) -> String {
        match self {
            Digest::Unknown => "0".repeat(UNKNOWN_HEX_LEN),
            Digest::Sha256(hash) => hex::encode(hash),
        }
    }

    /// Short hex representation (first 8 characters).
    pub fn short_hex(&self) -> String {
        let mut hex = self.to_hex();
        hex.truncate(8);
        hex
    }

    fn algorithm_str(&self) -> &'static str {
        self.algorithm().map_or("unknown", |alg| alg.as_str())
    }
}

fn decode_hash(alg: DigestAlgorithm, hash: &str, buf: &mut [u8]) -> Result<()> {
    if hash.len() != alg.hex_len() {
        return Err(DigestError::InvalidLength {
            expected: alg.hex_len(),
            actual: hash.len(),
        });
    }
    hex::decode_to_slice(hash, buf).map_err(|e| DigestError::InvalidHex(e.to_string()))
}

impl fmt::Debug for Digest {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Digest({}-{})", self.algorithm_str(), self.short_hex())
    }
}

impl fmt::Display for Digest {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}-{}", self.algorithm_str(), self.to_hex())
    }
}

impl FromStr for Digest {
    type Err = DigestError;

    /// Strict parse: only valid digests are returned.
    fn from_str(s: &str) -> Result<Self> {
        let digest = Self::try_parse(s)?;
        if !digest.is_valid() {
            return Err(DigestError::ZeroHash);
        }
        Ok(digest)
    }
}

impl From<Digest> for String {
    fn from(digest: Digest) -> Self {
        digest.to_string()
    }
}

impl TryFrom<String> for Digest {
    type Error = DigestError;

    fn try_from(s: String) -> Result<Self> {
        s.parse()
    }
}

impl From<[u8; 32]> for Digest {
    fn from(hash: [u8; 32]) -> Self {
        Digest::Sha256(hash)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const VALID_HEX: &str = "abcdef0123456789abcdef0123456789abcdef0123456789abcdef0123456789";

    #[test]
    fn accepts_both_separators() {
        for sep in [":", "-"] {
            let d = Digest::parse(&format!("sha256{sep}{VALID_HEX}"));
            assert!(d.is_valid(), "separator {sep:?}");
            assert_eq!(d.algorithm(), Some(DigestAlgorithm::Sha256));
        }
    }

    #[test]
    fn display_normalizes_to_dash() {
        let want = format!("sha256-{VALID_HEX}");
        assert_eq!(Digest::parse(&format!("sha256:{VALID_HEX}")).to_string(), want);
        assert_eq!(Digest::parse(&format!("sha256-{VALID_HEX}")).to_string(), want);
    }

    #[test]
    fn uppercase_hex_formats_lowercase() {
        let d = Digest::parse(&format!("sha256:{}", VALID_HEX.to_uppercase()));
        assert!(d.is_valid());
        assert_eq!(d.to_string(), format!("sha256-{VALID_HEX}"));
    }

    #[test]
    fn malformed_input_is_unknown() {
        let cases = [
            String::new(),
            format!("sha134:{VALID_HEX}"),
            format!("SHA256:{VALID_HEX}"),
            format!("sha256:{VALID_HEX}x"),
            format!("sha256:x{VALID_HEX}"),
            format!("sha256-{VALID_HEX}x"),
            "sha256-x".to_string(),
            VALID_HEX.to_string(),
        ];
        for case in &cases {
            let d = Digest::parse(case);
            assert_eq!(d, Digest::Unknown, "input {case:?}");
            assert!(!d.is_valid());
        }
    }

    #[test]
    fn zero_value_formats_as_unknown() {
        let want = format!("unknown-{}", "0".repeat(64));
        assert_eq!(Digest::default().to_string(), want);
        assert_eq!(Digest::parse("").to_string(), want);
        assert_eq!(
            Digest::parse("blah-100000000000000000000000000000000000000000000000000000000000000")
                .to_string(),
            want
        );
    }

    #[test]
    fn zero_hash_decodes_but_is_invalid() {
        let zeros = "0".repeat(64);
        let d = Digest::parse(&format!("sha256:{zeros}"));
        assert_eq!(d, Digest::Sha256([0u8; 32]));
        assert!(!d.is_valid());
        assert_eq!(d.to_string(), format!("sha256-{zeros}"));
    }

    #[test]
    fn try_parse_reports_reason() {
        assert_eq!(Digest::try_parse("nothing"), Err(DigestError::MissingSeparator));
        assert_eq!(
            Digest::try_parse(&format!("md5:{VALID_HEX}")),
            Err(DigestError::UnknownAlgorithm("md5".into()))
        );
        assert_eq!(
            Digest::try_parse("sha256-x"),
            Err(DigestError::InvalidLength {
                expected: 64,
                actual: 1
            })
        );
        let bad = format!("sha256:zz{}", &VALID_HEX[2..]);
        assert!(matches!(Digest::try_parse(&bad), Err(DigestError::InvalidHex(_))));
    }

    #[test]
    fn last_colon_wins_over_dash() {
        // With a `:` present the `-` is never considered, so the algorithm
        // segment here is `sha256-x`, not `sha256`.
        assert_eq!(
            Digest::try_parse(&format!("sha256-x:{VALID_HEX}")),
            Err(DigestError::UnknownAlgorithm("sha256-x".into()))
        );
    }

    #[test]
    fn from_str_rejects_zero_hash() {
        let zeros = "0".repeat(64);
        assert_eq!(
            format!("sha256-{zeros}").parse::<Digest>(),
            Err(DigestError::ZeroHash)
        );
        assert!(format!("sha256-{VALID_HEX}").parse::<Digest>().is_ok());
    }

    #[test]
    fn sha256_of_is_deterministic() {
        let a = Digest::sha256_of(b"hello world");
        let b = Digest::sha256_of(b"hello world");
        assert_eq!(a, b);
        assert!(a.is_valid());
        assert_eq!(
            a.to_hex(),
            "b94d27b9934d3e08a52e52d7da7dabfac484efe37a5380ee9088f7ace2efcde9"
        );
        assert_ne!(a, Digest::sha256_of(b"hello"));
    }

    #[test]
    fn sha256_reader_matches_sha256_of() {
        assert_eq!(
            Digest::sha256_reader(&b"hello world"[..]).unwrap(),
            Digest::sha256_of(b"hello world")
        );
        assert_eq!(
            Digest::sha256_reader(io::empty()).unwrap(),
            Digest::sha256_of(b"")
        );

        // Spans several read chunks.
        let data: Vec<u8> = (0..CHUNK_SIZE * 2 + 17).map(|i| (i % 251) as u8).collect();
        assert_eq!(
            Digest::sha256_reader(io::Cursor::new(&data)).unwrap(),
            Digest::sha256_of(&data)
        );
    }

    #[test]
    fn sha256_reader_propagates_errors() {
        struct Broken;
        impl Read for Broken {
            fn read(&mut self, _: &mut [u8]) -> io::Result<usize> {
                Err(io::Error::new(io::ErrorKind::Other, "disk gone"))
            }
        }
        let err = Digest::sha256_reader(Broken).unwrap_err();
        assert_eq!(err.to_string(), "disk gone");
    }

    #[test]
    fn short_hex_is_8_chars() {
        let d = Digest::sha256_of(b"test");
        assert_eq!(d.short_hex().len(), 8);
        assert_eq!(format!("{d:?}"), format!("Digest(sha256-{})", d.short_hex()));
    }

    #[test]
    fn bytes_and_algorithm() {
        let d = Digest::from_sha256([7u8; 32]);
        assert_eq!(d.as_bytes(), &[7u8; 32]);
        assert_eq!(Digest::Unknown.as_bytes(), &[] as &[u8]);
        assert_eq!(Digest::Unknown.algorithm(), None);
        assert_eq!(Digest::from([7u8; 32]), d);
    }

    #[test]
    fn serde_roundtrip() {
        let d = Digest::sha256_of(b"serde test");
        let json = serde_json::to_string(&d).unwrap();
        assert_eq!(json, format!("\"{d}\""));
        let parsed: Digest = serde_json::from_str(&json).unwrap();
        assert_eq!(d, parsed);
    }

    #[test]
    fn serde_rejects_invalid() {
        assert!(serde_json::from_str::<Digest>("\"sha256-x\"").is_err());
        let zero = format!("\"{}\"", Digest::default());
        assert!(serde_json::from_str::<Digest>(&zero).is_err());
    }

    mod props {
        use super::super::*;
        use proptest::prelude::*;

        proptest! {
            #[test]
            fn canonical_form_reparses(hash in any::<[u8; 32]>()) {
                let d = Digest::from_sha256(hash);
                prop_assert_eq!(Digest::parse(&d.to_string()), d);
            }

            #[test]
            fn colon_form_normalizes(hash in any::<[u8; 32]>()) {
                let hex = hex::encode(hash);
                let d = Digest::parse(&format!("sha256:{hex}"));
                prop_assert_eq!(d.to_string(), format!("sha256-{hex}"));
            }

            #[test]
            fn parse_never_panics(s in "\\PC*") {
                let d = Digest::parse(&s);
                if d.is_valid() {
                    prop_assert_eq!(d.algorithm(), Some(DigestAlgorithm::Sha256));
                }
            }
        }
    }
}
