//! Countdown timers driven by caller-supplied tick deltas.

/// Remaining time below this is treated as elapsed, so that accumulated
/// `f32` deltas land on zero at the expected tick.
pub const TIMER_EPSILON: f32 = 1e-4;

/// Normalises a tick delta: non-finite or negative deltas advance nothing.
#[inline]
pub fn sanitize_delta(dt: f32) -> f32 {
    if dt.is_finite() && dt > 0.0 { dt } else { 0.0 }
}

/// Per-action cooldown: counts down to zero and is re-armed on use.
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Cooldown {
    pub remaining: f32,
    pub max: f32,
}

impl Cooldown {
    /// A ready cooldown with the given re-arm duration.
    pub const fn new(max: f32) -> Self {
        Self { remaining: 0.0, max }
    }

    #[inline]
    pub fn is_ready(&self) -> bool {
        self.remaining <= 0.0
    }

    /// Re-arms the cooldown to its full duration.
    pub fn trigger(&mut self) {
        self.remaining = self.max;
    }

    pub fn clear(&mut self) {
        self.remaining = 0.0;
    }

    /// Counts down by `dt`, floored at zero.
    pub fn tick(&mut self, dt: f32) {
        self.remaining -= sanitize_delta(dt);
        if self.remaining <= TIMER_EPSILON {
            self.remaining = 0.0;
        }
    }

    /// Remaining fraction in `[0, 1]`; zero when the cooldown has no duration.
    pub fn ratio(&self) -> f32 {
        if self.max <= 0.0 {
            return 0.0;
        }
        (self.remaining / self.max).clamp(0.0, 1.0)
    }
}

/// One-shot countdown used for locks, windows and invincibility.
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Countdown {
    remaining: f32,
}

impl Countdown {
    pub fn new(duration: f32) -> Self {
        Self {
            remaining: sanitize_delta(duration),
        }
    }

    pub fn remaining(&self) -> f32 {
        self.remaining
    }

    /// Counts down by `dt`. Returns `true` once the countdown has elapsed.
    pub fn tick(&mut self, dt: f32) -> bool {
        self.remaining -= sanitize_delta(dt);
        if self.remaining <= TIMER_EPSILON {
            self.remaining = 0.0;
        }
        self.is_elapsed()
    }

    pub fn is_elapsed(&self) -> bool {
        self.remaining <= 0.0
    }

    /// Keeps whichever of the two countdowns ends later.
    pub fn extend_to(&mut self, duration: f32) {
        self.remaining = self.remaining.max(sanitize_delta(duration));
    }
}
