//! Content loaders for reading duel data from files.
//!
//! Formats are picked by extension: `.ron` files are parsed as RON,
//! everything else as TOML.

pub mod config;
pub mod setup;

pub use config::ConfigLoader;
pub use setup::SetupLoader;

use std::path::Path;

use serde::de::DeserializeOwned;

/// Common result type for loaders.
pub type LoadResult<T> = anyhow::Result<T>;

/// Helper function to read file contents.
pub(crate) fn read_file(path: &Path) -> LoadResult<String> {
    std::fs::read_to_string(path)
        .map_err(|e| anyhow::anyhow!("Failed to read file {}: {}", path.display(), e))
}

/// Parses `content` as RON or TOML depending on the extension of `path`.
pub(crate) fn parse_by_extension<T: DeserializeOwned>(path: &Path, content: &str) -> LoadResult<T> {
    match path.extension().and_then(|ext| ext.to_str()) {
        Some("ron") => ron::from_str(content)
            .map_err(|e| anyhow::anyhow!("Failed to parse RON {}: {}", path.display(), e)),
        _ => toml::from_str(content)
            .map_err(|e| anyhow::anyhow!("Failed to parse TOML {}: {}", path.display(), e)),
    }
}
