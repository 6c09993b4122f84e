//! Duel setup loader.

use std::path::Path;

use crate::loaders::{LoadResult, parse_by_extension, read_file};
use crate::setup::DuelSetup;

/// Loader for complete duel descriptions.
pub struct SetupLoader;

impl SetupLoader {
    pub fn load(path: &Path) -> LoadResult<DuelSetup> {
        let content = read_file(path)?;
        let setup: DuelSetup = parse_by_extension(path, &content)?;
        setup
            .config
            .validate()
            .map_err(|e| anyhow::anyhow!("Invalid combat config {}: {}", path.display(), e))?;
        setup
            .validate()
            .map_err(|e| anyhow::anyhow!("Invalid duel setup {}: {}", path.display(), e))?;

        Ok(setup)
    }
}

#[cfg(test)]
mod tests {
    use std::io::Write;

    use combat_core::Vec2;

    use super::*;

    #[test]
    fn loads_ron_setup() {
        let mut file = tempfile::Builder::new()
            .suffix(".ron")
            .tempfile()
            .expect("temp file");
        write!(
            file,
            r#"(
                config: (attack_damage: 30.0),
                arena: (center: (0.0, 0.0), radius: 8.0),
                obstacles: [(center: (0.0, 3.0), radius: 1.0)],
                spawns: (
                    (position: (-3.0, 0.0), facing: (1.0, 0.0)),
                    (position: (3.0, 0.0), facing: (-1.0, 0.0)),
                ),
            )"#
        )
        .expect("write");

        let setup = SetupLoader::load(file.path()).expect("valid setup");
        assert_eq!(setup.config.attack_damage, 30.0);
        assert_eq!(setup.arena.radius, 8.0);
        assert_eq!(setup.obstacles.len(), 1);
        assert_eq!(setup.spawns[1].position, Vec2::new(3.0, 0.0));
    }

    #[test]
    fn spawn_outside_arena_is_rejected() {
        let mut file = tempfile::Builder::new()
            .suffix(".ron")
            .tempfile()
            .expect("temp file");
        write!(
            file,
            r#"(
                arena: (center: (0.0, 0.0), radius: 2.0),
                spawns: (
                    (position: (-5.0, 0.0), facing: (1.0, 0.0)),
                    (position: (1.0, 0.0), facing: (-1.0, 0.0)),
                ),
            )"#
        )
        .expect("write");

        let err = SetupLoader::load(file.path()).expect_err("spawn 0 is outside");
        assert!(err.to_string().contains("spawn 0 at (-5, 0)"));
    }
}
