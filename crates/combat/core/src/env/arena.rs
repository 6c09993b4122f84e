use glam::Vec2;

/// Circular arena the combatants are confined to.
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ArenaBounds {
    pub center: Vec2,
    pub radius: f32,
}

impl ArenaBounds {
    pub const DEFAULT_RADIUS: f32 = 10.0;

    pub const fn new(center: Vec2, radius: f32) -> Self {
        Self { center, radius }
    }

    /// Returns true if `position` lies at least `margin` inside the edge.
    pub fn contains(&self, position: Vec2, margin: f32) -> bool {
        position.distance(self.center) <= (self.radius - margin).max(0.0)
    }

    /// Projects `position` back onto the arena disc.
    pub fn clamp(&self, position: Vec2) -> Vec2 {
        let offset = position - self.center;
        let distance = offset.length();
        if distance <= self.radius || distance <= f32::EPSILON {
            position
        } else {
            self.center + offset / distance * self.radius
        }
    }
}

impl Default for ArenaBounds {
    fn default() -> Self {
        Self::new(Vec2::ZERO, Self::DEFAULT_RADIUS)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn clamp_projects_onto_edge() {
        let arena = ArenaBounds::new(Vec2::new(1.0, 1.0), 5.0);
        let clamped = arena.clamp(Vec2::new(11.0, 1.0));
        assert!((clamped - Vec2::new(6.0, 1.0)).length() < 1e-5);
        assert_eq!(arena.clamp(Vec2::new(2.0, 2.0)), Vec2::new(2.0, 2.0));
    }

    #[test]
    fn contains_honours_margin() {
        let arena = ArenaBounds::default();
        assert!(arena.contains(Vec2::new(8.0, 0.0), 1.0));
        assert!(!arena.contains(Vec2::new(9.5, 0.0), 1.0));
    }
}
