use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::error::{NameError, Result};
use crate::name::Name;
use crate::part::{validate_part, PartKind};

/// Host used when a name does not give one.
pub const DEFAULT_HOST: &str = "registry.ollama.ai";
/// Namespace used when a name does not give one.
pub const DEFAULT_NAMESPACE: &str = "library";
/// Tag used when a name does not give one.
pub const DEFAULT_TAG: &str = "latest";

/// Parts filled into a name when parsing leaves them absent.
///
/// An empty field means "no default" for that part. Fields left out of a
/// TOML document keep their built-in value.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct NameDefaults {
    pub host: String,
    pub namespace: String,
    pub tag: String,
}

impl Default for NameDefaults {
    fn default() -> Self {
        Self {
            host: DEFAULT_HOST.into(),
            namespace: DEFAULT_NAMESPACE.into(),
            tag: DEFAULT_TAG.into(),
        }
    }
}

impl NameDefaults {
    /// Defaults that fill nothing.
    pub fn none() -> Self {
        Self {
            host: String::new(),
            namespace: String::new(),
            tag: String::new(),
        }
    }

    /// Load defaults from a TOML document and validate them.
    ///
    /// ```toml
    /// host = "registry.example:5000"
    /// namespace = "team"
    /// ```
    pub fn from_toml_str(s: &str) -> Result<Self> {
        let defaults: Self = toml::from_str(s).map_err(|e| NameError::Config(e.to_string()))?;
        defaults.validate()?;
        debug!(
            host = %defaults.host,
            namespace = %defaults.namespace,
            tag = %defaults.tag,
            "loaded name defaults"
        );
        Ok(defaults)
    }

    /// Check every non-empty default against the rules for its part kind.
    pub fn validate(&self) -> Result<()> {
        for (kind, value) in [
            (PartKind::Host, &self.host),
            (PartKind::Namespace, &self.namespace),
            (PartKind::Tag, &self.tag),
        ] {
            if !value.is_empty() {
                validate_part(kind, value)?;
            }
        }
        Ok(())
    }

    /// The name to merge parsed names with.
    pub fn to_name(&self) -> Name {
        Name {
            host: self.host.as_str().into(),
            namespace: self.namespace.as_str().into(),
            tag: self.tag.as_str().into(),
            ..Name::default()
        }
    }
}
