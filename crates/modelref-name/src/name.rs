//! Structured model names: `[host/][namespace/]model[:tag][@digest]`.
//!
//! Parsing is a mechanical split from the right and never fails. Validity is
//! a separate question answered by [`Name::is_valid`] / [`Name::validate`],
//! which callers must check before trusting the parts.

use std::fmt::{self, Write as _};
use std::str::FromStr;

use modelref_digest::Digest;
use serde::{Deserialize, Serialize};

use crate::config::NameDefaults;
use crate::error::{NameError, Result};
use crate::part::{validate_part, PartKind};

/// One part of a [`Name`].
///
/// A separator in the input promises content after it. When that promise is
/// broken (`"model:"`, `"/model"`, `"@"`) the part is [`Part::Missing`],
/// which fails validation for every kind.
#[derive(Clone, Debug, Default, PartialEq, Eq, Hash)]
pub enum Part {
    /// Not given, and nothing in the input asked for it.
    #[default]
    Absent,
    /// A separator promised this part but its content was empty.
    Missing,
    /// Non-empty text, not yet validated.
    Present(String),
}

impl Part {
    /// The text of a present part; empty for absent and missing parts.
    pub fn as_str(&self) -> &str {
        match self {
            Part::Present(s) => s,
            Part::Absent | Part::Missing => "",
        }
    }

    /// The text of a present part.
    pub fn get(&self) -> Option<&str> {
        match self {
            Part::Present(s) => Some(s),
            Part::Absent | Part::Missing => None,
        }
    }

    pub fn is_absent(&self) -> bool {
        matches!(self, Part::Absent)
    }

    pub fn is_missing(&self) -> bool {
        matches!(self, Part::Missing)
    }

    pub fn is_present(&self) -> bool {
        matches!(self, Part::Present(_))
    }

    fn validate(&self, kind: PartKind) -> Result<()> {
        match self {
            Part::Absent => Ok(()),
            Part::Missing => Err(NameError::MissingPart { kind }),
            Part::Present(s) => validate_part(kind, s),
        }
    }

    /// Content found after a separator.
    fn promised(s: &str) -> Self {
        if s.is_empty() {
            Part::Missing
        } else {
            Part::Present(s.to_string())
        }
    }

    /// Whatever is left once no further separator is found. `None` means the
    /// remainder was itself the empty side of a promised split.
    fn remainder(s: Option<&str>) -> Self {
        match s {
            None => Part::Missing,
            Some(s) => Part::from(s),
        }
    }
}

impl From<&str> for Part {
    /// Empty text is [`Part::Absent`], anything else is [`Part::Present`].
    fn from(s: &str) -> Self {
        if s.is_empty() {
            Part::Absent
        } else {
            Part::Present(s.to_string())
        }
    }
}

impl From<String> for Part {
    fn from(s: String) -> Self {
        if s.is_empty() {
            Part::Absent
        } else {
            Part::Present(s)
        }
    }
}

/// A model name, split into its five parts.
///
/// Any part may be absent, missing, or invalid. Use [`Name::is_valid`] to
/// check the whole name. A valid name formats to text that parses back to
/// the same name.
///
/// Deserializing goes through [`Name::parse_no_defaults`] and so accepts any
/// string, including invalid ones such as `"mm:"`. Unlike
/// [`Digest`](modelref_digest::Digest), a deserialized `Name` must still be
/// checked with [`Name::validate`]; use [`FromStr`] for a strict parse.
///
/// # Examples
///
/// ```
/// use modelref_name::Name;
///
/// let name = Name::parse_no_defaults("host/namespace/model:tag");
/// assert!(name.is_valid());
/// assert_eq!(name.host.as_str(), "host");
/// assert_eq!(name.tag.as_str(), "tag");
/// assert_eq!(name.to_string(), "host/namespace/model:tag");
///
/// let name = Name::parse("model");
/// assert_eq!(name.to_string(), "registry.ollama.ai/library/model:latest");
///
/// assert!(!Name::parse_no_defaults("model:").is_valid());
/// ```
#[derive(Clone, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(into = "String", from = "String")]
pub struct Name {
    pub host: Part,
    pub namespace: Part,
    pub model: Part,
    pub tag: Part,
    /// Raw digest text. See [`Name::digest`] for the decoded form.
    pub digest: Part,
}

impl Name {
    /// The built-in defaults: host `registry.ollama.ai`, namespace `library`,
    /// tag `latest`. Model and digest are absent.
    pub fn default_name() -> Name {
        NameDefaults::default().to_name()
    }

    /// Parse `s` and fill absent host, namespace, and tag parts from
    /// [`Name::default_name`]. Does not validate.
    pub fn parse(s: &str) -> Name {
        Self::parse_no_defaults(s).merge(&Self::default_name())
    }

    /// Parse `s` and fill absent host, namespace, and tag parts from
    /// `defaults`. Does not validate.
    pub fn parse_with_defaults(s: &str, defaults: &Name) -> Name {
        Self::parse_no_defaults(s).merge(defaults)
    }

    /// Parse `s` without filling in any parts. Does not validate.
    ///
    /// Separators are matched at their last occurrence, right to left:
    /// `@` for the digest, then `:` for the tag, then `/` for the model,
    /// then `/` for the namespace. Whatever is left is the host.
    pub fn parse_no_defaults(s: &str) -> Name {
        let mut name = Name::default();

        // The digest is the one part whose left side may be empty.
        let rest = match s.rsplit_once('@') {
            Some((before, digest)) => {
                name.digest = Part::promised(digest);
                before
            }
            None => s,
        };

        let mut rest = Some(rest);
        if let Some((before, tag)) = cut_promised(rest, ':') {
            name.tag = tag;
            rest = before;
        }

        let Some((before, model)) = cut_promised(rest, '/') else {
            name.model = Part::remainder(rest);
            return name;
        };
        name.model = model;
        rest = before;

        let Some((before, namespace)) = cut_promised(rest, '/') else {
            name.namespace = Part::remainder(rest);
            return name;
        };
        name.namespace = namespace;
        name.host = Part::remainder(before);

        name
    }

    /// Fill absent host, namespace, and tag parts from `defaults`.
    ///
    /// Model and digest are never touched. A missing part is not absent and
    /// is left as is.
    pub fn merge(mut self, defaults: &Name) -> Name {
        fill(&mut self.host, &defaults.host);
        fill(&mut self.namespace, &defaults.namespace);
        fill(&mut self.tag, &defaults.tag);
        self
    }

    /// Returns `true` if the name has a model or digest and every part that
    /// is not absent passes the rules for its kind.
    pub fn is_valid(&self) -> bool {
        self.validate().is_ok()
    }

    /// Like [`is_valid`](Self::is_valid), reporting the first problem found.
    pub fn validate(&self) -> Result<()> {
        if self.model.is_absent() && self.digest.is_absent() {
            return Err(NameError::Empty);
        }
        for (kind, part) in self.parts() {
            part.validate(kind)?;
        }
        Ok(())
    }

    /// Returns `true` if host, namespace, model, and tag are all present and
    /// the name is valid.
    pub fn is_fully_qualified(&self) -> bool {
        self.host.is_present()
            && self.namespace.is_present()
            && self.model.is_present()
            && self.tag.is_present()
            && self.is_valid()
    }

    /// Decode the raw digest part. Re-parsed on every call.
    pub fn digest(&self) -> Digest {
        Digest::parse(self.digest.as_str())
    }

    /// The parts paired with their kinds, in name order.
    pub fn parts(&self) -> [(PartKind, &Part); 5] {
        [
            (PartKind::Host, &self.host),
            (PartKind::Namespace, &self.namespace),
            (PartKind::Model, &self.model),
            (PartKind::Tag, &self.tag),
            (PartKind::Digest, &self.digest),
        ]
    }

    /// Format every part except the digest: `host/namespace/model:tag`.
    ///
    /// This is the form manifests are stored under. Absent parts are left
    /// out with their separator, so merge with defaults first to get all
    /// four parts.
    pub fn display_longest(&self) -> String {
        let mut out = String::new();
        push_prefix(&mut out, &self.host);
        push_prefix(&mut out, &self.namespace);
        out.push_str(self.model.as_str());
        if !self.tag.is_absent() {
            out.push(':');
            out.push_str(self.tag.as_str());
        }
        out
    }

    /// Format the name leaving out the host, and the namespace, when they
    /// match `defaults` (compared ignoring ASCII case).
    ///
    /// A non-default host is always written with its namespace.
    pub fn display_shortest(&self, defaults: &Name) -> String {
        let same = |a: &Part, b: &Part| a.is_absent() || a.as_str().eq_ignore_ascii_case(b.as_str());

        let mut out = String::new();
        if !same(&self.host, &defaults.host) {
            push_prefix(&mut out, &self.host);
            push_prefix(&mut out, &self.namespace);
        } else if !same(&self.namespace, &defaults.namespace) {
            push_prefix(&mut out, &self.namespace);
        }
        out.push_str(self.model.as_str());
        // Writing into a String cannot fail.
        let _ = self.write_suffix(&mut out);
        out
    }

    fn write_suffix(&self, out: &mut impl fmt::Write) -> fmt::Result {
        if !self.tag.is_absent() {
            out.write_char(':')?;
            out.write_str(self.tag.as_str())?;
        }
        if !self.digest.is_absent() {
            out.write_char('@')?;
            out.write_str(self.digest.as_str())?;
        }
        Ok(())
    }
}

/// Cut at the last `sep`. Empty text on either side of a found separator is
/// reported as missing: `None` for the left side, [`Part::Missing`] for the
/// right. A missing remainder has nothing left to cut.
fn cut_promised(s: Option<&str>, sep: char) -> Option<(Option<&str>, Part)> {
    let (before, after) = s?.rsplit_once(sep)?;
    let before = (!before.is_empty()).then_some(before);
    Some((before, Part::promised(after)))
}

fn fill(part: &mut Part, default: &Part) {
    if part.is_absent() {
        *part = default.clone();
    }
}

fn push_prefix(out: &mut String, part: &Part) {
    if !part.is_absent() {
        out.push_str(part.as_str());
        out.push('/');
    }
}

impl fmt::Display for Name {
    /// Absent parts are left out together with their separator. A missing
    /// part keeps its separator and contributes no text.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if !self.host.is_absent() {
            f.write_str(self.host.as_str())?;
            f.write_char('/')?;
        }
        if !self.namespace.is_absent() {
            f.write_str(self.namespace.as_str())?;
            f.write_char('/')?;
        }
        f.write_str(self.model.as_str())?;
        self.write_suffix(f)
    }
}

impl FromStr for Name {
    type Err = NameError;

    /// Strict parse: no defaults, and only valid names are returned.
    fn from_str(s: &str) -> Result<Self> {
        let name = Self::parse_no_defaults(s);
        name.validate()?;
        Ok(name)
    }
}

impl From<String> for Name {
    fn from(s: String) -> Self {
        Name::parse_no_defaults(&s)
    }
}

impl From<Name> for String {
    fn from(name: Name) -> Self {
        name.to_string()
    }
}
