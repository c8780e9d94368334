//! Model reference names for the `[host/][namespace/]model[:tag][@digest]`
//! format.
//!
//! A [`Name`] is parsed by splitting at the last `@`, `:`, and `/`
//! separators. Parsing never fails: validity is a separate check, so callers
//! can inspect, default, or correct a name before deciding to trust it.
//!
//! # Architecture
//!
//! - **Parts** are validated per [`PartKind`] against a small rule table of
//!   length bounds and character exceptions.
//! - **Promised parts**: a separator with nothing after it yields
//!   [`Part::Missing`], which never validates.
//! - **Defaults** fill absent host, namespace, and tag parts. Model and
//!   digest are never defaulted.
//! - **Digests** are kept as raw text on the name and decoded on demand with
//!   [`Name::digest`].
//!
//! # Modules
//!
//! - [`error`] — Error types for validation and store operations
//! - [`part`] — Per-kind part validation
//! - [`name`] — [`Name`] and [`Part`]: parsing, merging, formatting
//! - [`config`] — [`NameDefaults`] loaded from TOML
//! - [`traits`] — The [`ModelStore`] trait
//! - [`memory`] — In-memory [`InMemoryModelStore`] for tests

pub mod config;
pub mod error;
pub mod memory;
pub mod name;
pub mod part;
pub mod traits;

pub use config::NameDefaults;
pub use error::{NameError, Result};
pub use memory::InMemoryModelStore;
pub use modelref_digest::{Digest, DigestAlgorithm};
pub use name::{Name, Part};
pub use part::{is_valid_part, is_valid_short, validate_part, PartKind};
pub use traits::ModelStore;
