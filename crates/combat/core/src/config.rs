/// Combat tunables shared by every combatant built from the same profile.
///
/// All durations are in seconds of simulation time, distances in world units.
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct CombatConfig {
    pub max_health: f32,
    pub move_speed: f32,

    pub attack_damage: f32,
    pub attack_range: f32,
    pub attack_cooldown: f32,
    /// Length of the attack lock.
    pub attack_duration: f32,
    /// Fraction of the attack lock during which hits connect.
    pub hit_window_ratio: f32,
    /// Damage multiplier for secondary targets inside the forward cone.
    pub splash_ratio: f32,
    pub splash_half_angle_degrees: f32,

    pub defend_cooldown: f32,
    pub defend_duration: f32,

    pub dodge_cooldown: f32,
    pub dodge_duration: f32,
    pub dodge_distance: f32,

    /// Invincibility granted after taking a hit.
    pub hit_grace: f32,
}

impl CombatConfig {
    pub const DEFAULT_MAX_HEALTH: f32 = 100.0;
    pub const DEFAULT_MOVE_SPEED: f32 = 5.0;
    pub const DEFAULT_ATTACK_DAMAGE: f32 = 25.0;
    pub const DEFAULT_ATTACK_RANGE: f32 = 2.0;
    pub const DEFAULT_ATTACK_COOLDOWN: f32 = 2.5;
    pub const DEFAULT_ATTACK_DURATION: f32 = 0.5;
    pub const DEFAULT_HIT_WINDOW_RATIO: f32 = 0.7;
    pub const DEFAULT_SPLASH_RATIO: f32 = 0.5;
    pub const DEFAULT_SPLASH_HALF_ANGLE: f32 = 45.0;
    pub const DEFAULT_DEFEND_COOLDOWN: f32 = 3.0;
    pub const DEFAULT_DEFEND_DURATION: f32 = 1.0;
    pub const DEFAULT_DODGE_COOLDOWN: f32 = 4.0;
    pub const DEFAULT_DODGE_DURATION: f32 = 0.4;
    pub const DEFAULT_DODGE_DISTANCE: f32 = 3.0;
    pub const DEFAULT_HIT_GRACE: f32 = 0.3;

    pub const fn new() -> Self {
        Self {
            max_health: Self::DEFAULT_MAX_HEALTH,
            move_speed: Self::DEFAULT_MOVE_SPEED,
            attack_damage: Self::DEFAULT_ATTACK_DAMAGE,
            attack_range: Self::DEFAULT_ATTACK_RANGE,
            attack_cooldown: Self::DEFAULT_ATTACK_COOLDOWN,
            attack_duration: Self::DEFAULT_ATTACK_DURATION,
            hit_window_ratio: Self::DEFAULT_HIT_WINDOW_RATIO,
            splash_ratio: Self::DEFAULT_SPLASH_RATIO,
            splash_half_angle_degrees: Self::DEFAULT_SPLASH_HALF_ANGLE,
            defend_cooldown: Self::DEFAULT_DEFEND_COOLDOWN,
            defend_duration: Self::DEFAULT_DEFEND_DURATION,
            dodge_cooldown: Self::DEFAULT_DODGE_COOLDOWN,
            dodge_duration: Self::DEFAULT_DODGE_DURATION,
            dodge_distance: Self::DEFAULT_DODGE_DISTANCE,
            hit_grace: Self::DEFAULT_HIT_GRACE,
        }
    }

    /// Length of the hit window opened by each attack.
    pub fn hit_window(&self) -> f32 {
        self.attack_duration * self.hit_window_ratio
    }

    /// Cosine of the splash cone half-angle.
    pub fn splash_cone_cos(&self) -> f32 {
        self.splash_half_angle_degrees.to_radians().cos()
    }

    /// Checks that every tunable is usable by the state machine.
    pub fn validate(&self) -> Result<(), ConfigError> {
        let positive = [
            ("max_health", self.max_health),
            ("attack_duration", self.attack_duration),
            ("defend_duration", self.defend_duration),
            ("dodge_duration", self.dodge_duration),
        ];
        for (field, value) in positive {
            if !value.is_finite() || value <= 0.0 {
                return Err(ConfigError::NotPositive { field, value });
            }
        }

        let non_negative = [
            ("move_speed", self.move_speed),
            ("attack_damage", self.attack_damage),
            ("attack_range", self.attack_range),
            ("attack_cooldown", self.attack_cooldown),
            ("defend_cooldown", self.defend_cooldown),
            ("dodge_cooldown", self.dodge_cooldown),
            ("dodge_distance", self.dodge_distance),
            ("hit_grace", self.hit_grace),
        ];
        for (field, value) in non_negative {
            if !value.is_finite() || value < 0.0 {
                return Err(ConfigError::Negative { field, value });
            }
        }

        let ratios = [
            ("hit_window_ratio", self.hit_window_ratio),
            ("splash_ratio", self.splash_ratio),
        ];
        for (field, value) in ratios {
            if !(0.0..=1.0).contains(&value) {
                return Err(ConfigError::RatioOutOfRange { field, value });
            }
        }

        if !(0.0..=180.0).contains(&self.splash_half_angle_degrees) {
            return Err(ConfigError::RatioOutOfRange {
                field: "splash_half_angle_degrees",
                value: self.splash_half_angle_degrees,
            });
        }

        Ok(())
    }
}

impl Default for CombatConfig {
    fn default() -> Self {
        Self::new()
    }
}

/// Rejected combat configuration.
#[derive(Clone, Debug, PartialEq, thiserror::Error)]
pub enum ConfigError {
    #[error("{field} must be positive (got {value})")]
    NotPositive { field: &'static str, value: f32 },

    #[error("{field} must not be negative (got {value})")]
    Negative { field: &'static str, value: f32 },

    #[error("{field} is out of range (got {value})")]
    RatioOutOfRange { field: &'static str, value: f32 },
}
