//! Combat configuration loader.

use std::path::Path;

use combat_core::CombatConfig;

use crate::loaders::{LoadResult, parse_by_extension, read_file};

/// Loader for combat tunables from TOML or RON files.
pub struct ConfigLoader;

impl ConfigLoader {
    /// Load and validate a [`CombatConfig`].
    ///
    /// Missing fields fall back to the defaults, so a file only needs the
    /// values it overrides.
    pub fn load(path: &Path) -> LoadResult<CombatConfig> {
        let content = read_file(path)?;
        let config: CombatConfig = parse_by_extension(path, &content)?;
        config
            .validate()
            .map_err(|e| anyhow::anyhow!("Invalid combat config {}: {}", path.display(), e))?;

        tracing::debug!(path = %path.display(), ?config, "loaded combat config");
        Ok(config)
    }
}
