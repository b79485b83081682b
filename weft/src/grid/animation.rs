//! Structural animation timing for snapshot transitions.

use std::time::{Duration, Instant};

/// Easing function for animations.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Easing {
    /// Linear interpolation (constant speed)
    Linear,
    /// Ease in (slow start, fast end)
    EaseIn,
    /// Ease out (fast start, slow end)
    #[default]
    EaseOut,
    /// Ease in-out (slow start and end)
    EaseInOut,
}

impl Easing {
    /// Apply easing function to a normalized time value (0.0 to 1.0).
    ///
    /// Returns the eased value (also 0.0 to 1.0).
    pub fn apply(&self, t: f32) -> f32 {
        match self {
            Easing::Linear => t,
            Easing::EaseIn => t * t,
            Easing::EaseOut => t * (2.0 - t),
            Easing::EaseInOut => {
                if t < 0.5 {
                    2.0 * t * t
                } else {
                    -1.0 + (4.0 - 2.0 * t) * t
                }
            }
        }
    }
}

/// One in-flight structural transition.
///
/// A newer snapshot application supersedes the current transition wholesale;
/// there is no cancellation beyond replacement.
#[derive(Debug, Clone)]
pub struct StructuralAnimation {
    /// When the transition started.
    pub start: Instant,
    /// Duration of the transition.
    pub duration: Duration,
    /// Easing curve.
    pub easing: Easing,
}

impl StructuralAnimation {
    /// Start a transition at `now`.
    pub fn new(now: Instant, duration: Duration, easing: Easing) -> Self {
        Self {
            start: now,
            duration,
            easing,
        }
    }

    /// Eased progress at `now`, clamped to 0.0..=1.0.
    pub fn progress(&self, now: Instant) -> f32 {
        if self.duration.is_zero() {
            return 1.0;
        }
        let elapsed = now.saturating_duration_since(self.start).as_secs_f32();
        let t = (elapsed / self.duration.as_secs_f32()).min(1.0);
        self.easing.apply(t)
    }

    /// Whether the transition has run to completion at `now`.
    pub fn is_complete(&self, now: Instant) -> bool {
        now.saturating_duration_since(self.start) >= self.duration
    }
}
