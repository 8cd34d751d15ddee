//! Content loaders for reading combat data from files.
//!
//! Each loader has an embedded variant backed by the files under `data/` and
//! a path variant for user-supplied files of the same format.

pub mod actions;
pub mod actors;
pub mod config;

pub use actions::ActionLoader;
pub use actors::ActorLoader;
pub use config::ConfigLoader;

use std::path::Path;

/// Common result type for loaders.
pub type LoadResult<T> = anyhow::Result<T>;

/// Content that parsed but cannot be used.
#[derive(Debug, thiserror::Error)]
pub enum ContentError {
    #[error("no actor named '{0}' in the roster")]
    UnknownActor(String),

    #[error("{source_name} defines no actions")]
    NoActions { source_name: String },

    #[error("actor '{0}' has no usable actions")]
    EmptyKit(String),
}

/// Helper function to read file contents.
pub(crate) fn read_file(path: &Path) -> LoadResult<String> {
    std::fs::read_to_string(path)
        .map_err(|e| anyhow::anyhow!("Failed to read file {}: {}", path.display(), e))
}
