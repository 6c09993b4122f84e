use glam::Vec2;

use crate::state::CombatantId;

/// Spatial queries answered by the physics collaborator.
///
/// The combat rules never inspect colliders directly; they ask this oracle
/// whether a straight path is open and who is nearby.
pub trait SpatialOracle: Send + Sync {
    /// Nearest tracked entity within `radius` of `origin`, skipping `exclude`.
    fn nearest_within(
        &self,
        origin: Vec2,
        radius: f32,
        exclude: Option<CombatantId>,
    ) -> Option<SpatialHit>;

    /// Whether the straight segment from `from` to `to` is obstructed.
    fn is_path_blocked(&self, from: Vec2, to: Vec2) -> bool;

    /// Final position of a body travelling from `from` toward `to`.
    ///
    /// The default stops the body in place when the path is obstructed.
    fn resolve_motion(&self, from: Vec2, to: Vec2) -> Vec2 {
        if self.is_path_blocked(from, to) {
            from
        } else {
            to
        }
    }

    /// Records the latest position of a combatant. Oracles that do not
    /// track entities ignore it.
    fn sync_entity(&mut self, _id: CombatantId, _position: Vec2) {}
}

/// Result of a proximity query.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct SpatialHit {
    pub id: CombatantId,
    pub position: Vec2,
    pub distance: f32,
}

/// Circular obstacle.
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Obstacle {
    pub center: Vec2,
    pub radius: f32,
}

impl Obstacle {
    pub const fn new(center: Vec2, radius: f32) -> Self {
        Self { center, radius }
    }

    /// Whether the segment `a..b` passes through this obstacle.
    pub fn intersects_segment(&self, a: Vec2, b: Vec2) -> bool {
        let ab = b - a;
        let length_sq = ab.length_squared();
        let t = if length_sq <= f32::EPSILON {
            0.0
        } else {
            ((self.center - a).dot(ab) / length_sq).clamp(0.0, 1.0)
        };
        let closest = a + ab * t;
        closest.distance_squared(self.center) < self.radius * self.radius
    }
}

/// Flat field with optional circular obstacles.
///
/// Tracks entity positions pushed through [`SpatialOracle::sync_entity`]
/// so proximity queries work without a physics engine.
#[derive(Clone, Debug, Default)]
pub struct StaticField {
    obstacles: Vec<Obstacle>,
    entities: Vec<(CombatantId, Vec2)>,
}

impl StaticField {
    /// A field with no obstacles.
    pub fn open() -> Self {
        Self::default()
    }

    pub fn with_obstacles(obstacles: Vec<Obstacle>) -> Self {
        Self {
            obstacles,
            entities: Vec::new(),
        }
    }

    pub fn obstacles(&self) -> &[Obstacle] {
        &self.obstacles
    }
}

impl SpatialOracle for StaticField {
    fn nearest_within(
        &self,
        origin: Vec2,
        radius: f32,
        exclude: Option<CombatantId>,
    ) -> Option<SpatialHit> {
        self.entities
            .iter()
            .filter(|(id, _)| Some(*id) != exclude)
            .map(|&(id, position)| SpatialHit {
                id,
                position,
                distance: origin.distance(position),
            })
            .filter(|hit| hit.distance <= radius)
            .min_by(|a, b| a.distance.total_cmp(&b.distance))
    }

    fn is_path_blocked(&self, from: Vec2, to: Vec2) -> bool {
        self.obstacles
            .iter()
            .any(|obstacle| obstacle.intersects_segment(from, to))
    }

    fn sync_entity(&mut self, id: CombatantId, position: Vec2) {
        match self.entities.iter_mut().find(|(tracked, _)| *tracked == id) {
            Some(entry) => entry.1 = position,
            None => self.entities.push((id, position)),
        }
    }
}
