use serde::{Deserialize, Serialize};

/// Easing function type for interpolation.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Easing {
    /// No easing, constant rate.
    #[default]
    Linear,
    /// Slow start, fast end: `t^3`.
    EaseInCubic,
    /// Fast start, slow end: `1 - (1 - t)^3`.
    EaseOutCubic,
}

impl Easing {
    /// Apply the easing function to a normalized time `t`.
    ///
    /// `t` is clamped into [0, 1] first, so both ends are exact: `apply(0) == 0`
    /// and `apply(1) == 1`.
    pub fn apply(self, t: f64) -> f64 {
        let t = clamp_unit(t);
        match self {
            Easing::Linear => t,
            Easing::EaseInCubic => t * t * t,
            Easing::EaseOutCubic => {
                let inv = 1.0 - t;
                1.0 - inv * inv * inv
            }
        }
    }
}

/// Clamps to [0, 1]; NaN maps to 0.
pub fn clamp_unit(t: f64) -> f64 {
    if t.is_nan() {
        0.0
    } else {
        t.clamp(0.0, 1.0)
    }
}

/// Linear interpolation between `a` and `b`, exact at `t == 0` and `t == 1`.
#[inline]
pub fn lerp(a: f64, b: f64, t: f64) -> f64 {
    a * (1.0 - t) + b * t
}
