//! Data-driven combat content and loaders.
//!
//! This crate houses the static data the rules consume and the loaders that
//! read it from RON/TOML files:
//! - Action definitions (data-driven via RON)
//! - Actor rosters (data-driven via RON)
//! - Combat configuration (data-driven via TOML)
//!
//! Content is handed to `combat-core` through its oracles and never appears in
//! the rules themselves. Every data file has an embedded default so callers can
//! start without touching the filesystem.

pub mod templates;

#[cfg(feature = "loaders")]
pub mod loaders;

pub use templates::{ActorTemplate, GearTemplate};

#[cfg(feature = "loaders")]
pub use loaders::{ActionLoader, ActorLoader, ConfigLoader, ContentError, LoadResult};
