use combat_core::{ArenaBounds, CombatConfig, Obstacle, Vec2};

/// Where and facing which way a combatant enters the arena.
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SpawnSpec {
    pub position: Vec2,
    pub facing: Vec2,
}

impl SpawnSpec {
    pub const fn new(position: Vec2, facing: Vec2) -> Self {
        Self { position, facing }
    }
}

/// Complete description of a duel: rules, arena and both spawns.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct DuelSetup {
    pub config: CombatConfig,
    pub arena: ArenaBounds,
    pub obstacles: Vec<Obstacle>,
    pub spawns: [SpawnSpec; 2],
}

/// Arena layout that cannot host a duel.
#[derive(Clone, Copy, Debug, PartialEq, thiserror::Error)]
pub enum SetupError {
    #[error("arena radius must be positive and finite, got {0}")]
    InvalidArena(f32),

    #[error("spawn {slot} at ({x}, {y}) lies outside the arena")]
    SpawnOutsideArena { slot: usize, x: f32, y: f32 },
}

impl DuelSetup {
    pub const DEFAULT_SPAWN_OFFSET: f32 = 4.0;

    /// Checks the arena and that both spawns lie inside it.
    ///
    /// Combat tunables are checked separately by
    /// [`CombatConfig::validate`].
    pub fn validate(&self) -> Result<(), SetupError> {
        let radius = self.arena.radius;
        if !radius.is_finite() || radius <= 0.0 {
            return Err(SetupError::InvalidArena(radius));
        }
        for (slot, spawn) in self.spawns.iter().enumerate() {
            if !self.arena.contains(spawn.position, 0.0) {
                return Err(SetupError::SpawnOutsideArena {
                    slot,
                    x: spawn.position.x,
                    y: spawn.position.y,
                });
            }
        }
        Ok(())
    }

    /// Opponents facing each other across the arena center.
    pub fn facing_off(config: CombatConfig, arena: ArenaBounds, offset: f32) -> Self {
        let left = arena.center - Vec2::X * offset;
        let right = arena.center + Vec2::X * offset;
        Self {
            config,
            arena,
            obstacles: Vec::new(),
            spawns: [
                SpawnSpec::new(left, Vec2::X),
                SpawnSpec::new(right, Vec2::NEG_X),
            ],
        }
    }
}

impl Default for DuelSetup {
    fn default() -> Self {
        Self::facing_off(
            CombatConfig::default(),
            ArenaBounds::default(),
            Self::DEFAULT_SPAWN_OFFSET,
        )
    }
}
