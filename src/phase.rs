//! Phase curves for the rolling token.
//!
//! # Contracts
//! - **Invariant**: phases partition progress as `[0, enter)`, `[enter, enter + spin)`,
//!   `[enter + spin, 1]`.
//! - **Invariant**: rotation is a function of total elapsed time only and never
//!   resets between phases.
//! - **Invariant**: curves are pure; the same `(progress, duration, canvas)` always
//!   yields the same pose.

use serde::{Deserialize, Serialize};

use crate::canvas::CanvasSize;
use crate::easing::{lerp, Easing};

/// Motion law currently driving the token.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Phase {
    /// Rolling in from the off-canvas start towards the center.
    Entering,
    /// Spinning in place near the center.
    Holding,
    /// Accelerating off the far edge.
    Exiting,
}

impl Phase {
    pub fn label(self) -> &'static str {
        match self {
            Phase::Entering => "entering",
            Phase::Holding => "holding",
            Phase::Exiting => "exiting",
        }
    }
}

/// Progress shares of the entering and holding phases.
///
/// The exiting phase takes the remainder.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PhaseSplit {
    pub enter: f64,
    pub spin: f64,
}

impl Default for PhaseSplit {
    fn default() -> Self {
        Self {
            enter: 0.15,
            spin: 0.70,
        }
    }
}

impl PhaseSplit {
    pub fn enter_end(&self) -> f64 {
        self.enter
    }

    pub fn hold_end(&self) -> f64 {
        self.enter + self.spin
    }

    pub fn phase_at(&self, progress: f64) -> Phase {
        if progress < self.enter_end() {
            Phase::Entering
        } else if progress < self.hold_end() {
            Phase::Holding
        } else {
            Phase::Exiting
        }
    }
}

/// Motion tunables, expressed against the reference canvas.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TokenConfig {
    /// Off-canvas distance of the start position, in reference pixels.
    pub margin: f64,
    /// Entering speed, in reference pixels per second.
    pub travel_speed: f64,
    /// Radians per second, constant over the whole session.
    pub rotation_rate: f64,
    pub wobble_amplitude: f64,
    pub wobble_rate: f64,
    pub bob_amplitude: f64,
    pub bob_rate: f64,
    /// Relative scale swing while holding (0.1 = ±10%).
    pub scale_pulse: f64,
    pub scale_rate: f64,
    /// End position past the far edge, in margins.
    pub exit_overshoot: f64,
}

impl Default for TokenConfig {
    fn default() -> Self {
        Self {
            margin: 100.0,
            travel_speed: 900.0,
            rotation_rate: 9.0,
            wobble_amplitude: 20.0,
            wobble_rate: 3.0,
            bob_amplitude: 5.0,
            bob_rate: 6.0,
            scale_pulse: 0.1,
            scale_rate: 8.0,
            exit_overshoot: 1.5,
        }
    }
}

/// Where and how the token is drawn on one frame.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct TokenPose {
    /// Horizontal center, in canvas pixels.
    pub x: f64,
    /// Vertical center, in canvas pixels.
    pub y: f64,
    /// Accumulated rotation, in radians.
    pub rotation: f64,
    /// Rendered scale, including the canvas-to-reference ratio.
    pub scale: f64,
    pub phase: Phase,
}

/// Offsets produced by the holding motion at phase-local time.
#[derive(Clone, Copy, Debug)]
struct HoldMotion {
    dx: f64,
    dy: f64,
    scale: f64,
}

/// Pure pose function for the rolling token.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct TokenCurve {
    config: TokenConfig,
    split: PhaseSplit,
}

impl TokenCurve {
    pub fn new(config: TokenConfig, split: PhaseSplit) -> Self {
        Self { config, split }
    }

    pub fn split(&self) -> PhaseSplit {
        self.split
    }

    pub fn config(&self) -> &TokenConfig {
        &self.config
    }

    /// Off-canvas margin scaled to `canvas`.
    pub fn margin(&self, canvas: CanvasSize) -> f64 {
        self.config.margin * canvas.scale()
    }

    pub fn start_x(&self, canvas: CanvasSize) -> f64 {
        -self.margin(canvas)
    }

    pub fn end_x(&self, canvas: CanvasSize) -> f64 {
        canvas.width + self.margin(canvas) * self.config.exit_overshoot
    }

    /// Horizontal position past which the token is fully off-canvas.
    pub fn exit_threshold(&self, canvas: CanvasSize) -> f64 {
        canvas.width + self.margin(canvas)
    }

    /// Seconds the entering roll takes to reach the center.
    ///
    /// Distance over speed, capped at the entering phase's share of the session.
    pub fn arrival_s(&self, duration_ms: f64, canvas: CanvasSize) -> f64 {
        let enter_s = self.split.enter_end() * seconds(duration_ms);
        let distance = canvas.center_x() - self.start_x(canvas);
        let speed = self.config.travel_speed * canvas.scale();
        if speed > 0.0 && distance.is_finite() {
            (distance / speed).min(enter_s)
        } else {
            enter_s
        }
    }

    /// Computes the pose at `progress` of a session lasting `duration_ms`.
    pub fn pose(&self, progress: f64, duration_ms: f64, canvas: CanvasSize) -> TokenPose {
        let progress = crate::easing::clamp_unit(progress);
        let total_s = seconds(duration_ms);
        let elapsed_s = progress * total_s;
        let phase = self.split.phase_at(progress);
        let scale = canvas.scale();

        let (x, dy, pulse) = match phase {
            Phase::Entering => (self.entering_x(elapsed_s, duration_ms, canvas), 0.0, 1.0),
            Phase::Holding => {
                let local_s = elapsed_s - self.split.enter_end() * total_s;
                let motion = self.hold_motion(local_s, scale);
                (canvas.center_x() + motion.dx, motion.dy, motion.scale)
            }
            Phase::Exiting => self.exiting(elapsed_s, total_s, canvas),
        };

        TokenPose {
            x,
            y: canvas.center_y() + dy,
            rotation: self.config.rotation_rate * elapsed_s,
            scale: scale * pulse,
            phase,
        }
    }

    fn entering_x(&self, elapsed_s: f64, duration_ms: f64, canvas: CanvasSize) -> f64 {
        let start = self.start_x(canvas);
        let arrival_s = self.arrival_s(duration_ms, canvas);
        let ratio = if arrival_s > 0.0 {
            elapsed_s / arrival_s
        } else {
            1.0
        };
        lerp(start, canvas.center_x(), Easing::EaseOutCubic.apply(ratio))
    }

    fn hold_motion(&self, local_s: f64, scale: f64) -> HoldMotion {
        let cfg = &self.config;
        HoldMotion {
            dx: cfg.wobble_amplitude * scale * (cfg.wobble_rate * local_s).sin(),
            dy: cfg.bob_amplitude * scale * (cfg.bob_rate * local_s).sin(),
            scale: 1.0 + cfg.scale_pulse * (cfg.scale_rate * local_s).sin(),
        }
    }

    fn exiting(&self, elapsed_s: f64, total_s: f64, canvas: CanvasSize) -> (f64, f64, f64) {
        let hold_start_s = self.split.enter_end() * total_s;
        let hold_end_s = self.split.hold_end() * total_s;
        let exit_s = total_s - hold_end_s;
        let from = self.hold_motion(hold_end_s - hold_start_s, canvas.scale());
        let from_x = canvas.center_x() + from.dx;
        let ratio = if exit_s > 0.0 {
            (elapsed_s - hold_end_s) / exit_s
        } else {
            1.0
        };
        let eased = Easing::EaseInCubic.apply(ratio);
        (
            lerp(from_x, self.end_x(canvas), eased),
            lerp(from.dy, 0.0, eased),
            lerp(from.scale, 1.0, eased),
        )
    }
}

fn seconds(duration_ms: f64) -> f64 {
    if duration_ms.is_finite() {
        duration_ms.max(0.0) / 1_000.0
    } else {
        0.0
    }
}

#[cfg(test)]
#[path = "tests/phase_tests.rs"]
mod tests;
