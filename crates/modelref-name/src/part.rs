//! Part validation for model names.
//!
//! Every part of a name is checked against the rules for its kind:
//!
//! | kind      | length  | `.` | `:` |
//! |-----------|---------|-----|-----|
//! | host      | 1..=350 | yes | yes |
//! | namespace | 2..=80  | no  | no  |
//! | model     | 2..=80  | yes | no  |
//! | tag       | 1..=80  | yes | no  |
//! | digest    | 2..=80  | yes | no  |
//!
//! In all kinds:
//! - The first byte must be an ASCII letter or digit
//! - Later bytes may be ASCII letters, digits, `_` or `-`
//! - Any other byte is rejected
//!
//! The digest rules here only check the raw text of a name's digest part.
//! Whether that text is a usable content hash is a separate, stricter
//! question answered by [`Digest::is_valid`](modelref_digest::Digest::is_valid).

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::error::{NameError, Result};

/// The position a part occupies in a name.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PartKind {
    Host,
    Namespace,
    Model,
    Tag,
    Digest,
}

impl PartKind {
    /// All kinds, in the order they appear in a name.
    pub const ALL: [PartKind; 5] = [
        PartKind::Host,
        PartKind::Namespace,
        PartKind::Model,
        PartKind::Tag,
        PartKind::Digest,
    ];

    /// The validation rules for this kind.
    pub fn rules(self) -> &'static PartRules {
        &RULES[self as usize]
    }

    pub const fn as_str(self) -> &'static str {
        match self {
            PartKind::Host => "host",
            PartKind::Namespace => "namespace",
            PartKind::Model => "model",
            PartKind::Tag => "tag",
            PartKind::Digest => "digest",
        }
    }
}

impl fmt::Display for PartKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Length bounds and character exceptions for one [`PartKind`].
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct PartRules {
    /// Minimum length in bytes.
    pub min_len: usize,
    /// Maximum length in bytes.
    pub max_len: usize,
    /// Whether `.` may appear after the first byte.
    pub allow_dot: bool,
    /// Whether `:` may appear after the first byte.
    pub allow_colon: bool,
}

impl PartRules {
    /// Whether `b` may appear at a non-leading position.
    fn allows(&self, b: u8) -> bool {
        match b {
            b'_' | b'-' => true,
            b'.' => self.allow_dot,
            b':' => self.allow_colon,
            _ => b.is_ascii_alphanumeric(),
        }
    }
}

/// Indexed by `PartKind as usize`.
static RULES: [PartRules; 5] = [
    // host
    PartRules {
        min_len: 1,
        max_len: 350,
        allow_dot: true,
        allow_colon: true,
    },
    // namespace
    PartRules {
        min_len: 2,
        max_len: 80,
        allow_dot: false,
        allow_colon: false,
    },
    // model
    PartRules {
        min_len: 2,
        max_len: 80,
        allow_dot: true,
        allow_colon: false,
    },
    // tag
    PartRules {
        min_len: 1,
        max_len: 80,
        allow_dot: true,
        allow_colon: false,
    },
    // digest
    PartRules {
        min_len: 2,
        max_len: 80,
        allow_dot: true,
        allow_colon: false,
    },
];

/// Validate a part against the rules for `kind`, returning `Ok(())` if valid.
///
/// A single left-to-right scan that stops at the first offending byte.
///
/// # Examples
///
/// ```
/// use modelref_name::part::{validate_part, PartKind};
///
/// assert!(validate_part(PartKind::Host, "localhost:11434").is_ok());
/// assert!(validate_part(PartKind::Namespace, "library").is_ok());
/// assert!(validate_part(PartKind::Namespace, "my.org").is_err());
/// assert!(validate_part(PartKind::Model, "-llama").is_err());
/// ```
pub fn validate_part(kind: PartKind, s: &str) -> Result<()> {
    let rules = kind.rules();
    let invalid = |reason: String| NameError::InvalidPart {
        kind,
        value: s.to_string(),
        reason,
    };

    if s.len() < rules.min_len || s.len() > rules.max_len {
        return Err(invalid(format!(
            "length {} outside {}..={}",
            s.len(),
            rules.min_len,
            rules.max_len
        )));
    }

    for (i, b) in s.bytes().enumerate() {
        if i == 0 {
            if !b.is_ascii_alphanumeric() {
                return Err(invalid(format!(
                    "must start with an ASCII letter or digit, found {}",
                    describe(b)
                )));
            }
            continue;
        }
        if !rules.allows(b) {
            return Err(invalid(format!(
                "forbidden character {} at offset {i}",
                describe(b)
            )));
        }
    }

    Ok(())
}

/// Returns `true` if `s` is a valid part of the given kind.
pub fn is_valid_part(kind: PartKind, s: &str) -> bool {
    validate_part(kind, s).is_ok()
}

/// Returns `true` if `namespace` and `model` are valid namespace and model
/// parts respectively.
///
/// Useful for validating a name incrementally while it is being built. Both
/// parts are required here; for non-empty inputs the answer matches
/// validating a name holding only those two parts. To check just one of
/// them, pass a valid placeholder such as `"xx"` for the other.
pub fn is_valid_short(namespace: &str, model: &str) -> bool {
    is_valid_part(PartKind::Namespace, namespace) && is_valid_part(PartKind::Model, model)
}

fn describe(b: u8) -> String {
    if b.is_ascii_graphic() {
        format!("{:?}", b as char)
    } else {
        format!("byte 0x{b:02x}")
    }
}
