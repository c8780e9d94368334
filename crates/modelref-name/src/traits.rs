//! The [`ModelStore`] trait: the boundary to whatever holds model manifests.
//!
//! The name and digest types never touch storage themselves. A store maps
//! validated names to the content digest of their manifest; fetching and
//! decoding the bytes behind that digest happens elsewhere.

use modelref_digest::Digest;

use crate::error::Result;
use crate::name::Name;

/// Storage backend mapping model names to manifest digests.
///
/// Implementations must be thread-safe (`Send + Sync`). Keys are
/// [`Name::display_longest`] of a valid name with a model: the digest part
/// is not part of the key, so `mm@sha256-...` and `mm` address the same
/// entry. Callers usually pass names from [`Name::parse`] so that defaults
/// are already filled in.
pub trait ModelStore: Send + Sync {
    /// Look up the digest stored for `name`.
    ///
    /// Returns `Ok(None)` if nothing is stored under that name.
    fn resolve(&self, name: &Name) -> Result<Option<Digest>>;

    /// Store (create or replace) the digest for `name`.
    ///
    /// Fails if `name` or `digest` is invalid, or if `name` has no model.
    fn put(&self, name: &Name, digest: Digest) -> Result<()>;

    /// Remove the entry for `name`.
    ///
    /// Returns `Ok(true)` if an entry existed and was removed.
    fn remove(&self, name: &Name) -> Result<bool>;

    /// List all entries whose key starts with `prefix`, sorted by key.
    fn list(&self, prefix: &str) -> Result<Vec<(String, Digest)>>;

    /// Returns `true` if a digest is stored for `name`.
    fn contains(&self, name: &Name) -> Result<bool> {
        Ok(self.resolve(name)?.is_some())
    }
}
