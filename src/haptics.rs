//! Haptic pulse scheduling and the device-facing sink interface.

use serde::{Deserialize, Serialize};

use crate::error::HapticError;
use crate::phase::Phase;

/// Strength of an impact pulse.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ImpactStyle {
    Light,
    Medium,
    Heavy,
    Soft,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum NotificationKind {
    Success,
}

/// One discrete haptic event.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(tag = "kind", content = "style", rename_all = "snake_case")]
pub enum HapticPulse {
    Impact(ImpactStyle),
    Notification(NotificationKind),
}

impl HapticPulse {
    pub fn label(self) -> &'static str {
        match self {
            HapticPulse::Impact(ImpactStyle::Light) => "light",
            HapticPulse::Impact(ImpactStyle::Medium) => "medium",
            HapticPulse::Impact(ImpactStyle::Heavy) => "heavy",
            HapticPulse::Impact(ImpactStyle::Soft) => "soft",
            HapticPulse::Notification(NotificationKind::Success) => "success",
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct HapticConfig {
    /// Spacing of the light pulses while entering and holding.
    pub pulse_interval_ms: f64,
}

impl Default for HapticConfig {
    fn default() -> Self {
        Self {
            pulse_interval_ms: 200.0,
        }
    }
}

/// Decides which pulses a canvas session emits on each frame.
///
/// # Contracts
/// - **Invariant**: at most one light pulse per frame; a late frame re-anchors
///   the schedule instead of bursting.
/// - **Invariant**: the success notification fires exactly once per session.
#[derive(Clone, Debug, PartialEq)]
pub struct HapticScheduler {
    interval_ms: f64,
    next_light_ms: Option<f64>,
    success_fired: bool,
    armed: bool,
}

impl HapticScheduler {
    pub fn new(config: HapticConfig) -> Self {
        Self {
            interval_ms: config.pulse_interval_ms,
            next_light_ms: None,
            success_fired: false,
            armed: false,
        }
    }

    /// Arms the scheduler for a new session and returns the start impact.
    pub fn begin(&mut self, now_ms: f64) -> HapticPulse {
        self.next_light_ms = (self.interval_ms > 0.0).then(|| now_ms + self.interval_ms);
        self.success_fired = false;
        self.armed = true;
        HapticPulse::Impact(ImpactStyle::Medium)
    }

    /// Pulses due at `now_ms` for a session in `phase`.
    ///
    /// `terminated` is true on the frame the canvas session ends.
    pub fn update(&mut self, now_ms: f64, phase: Phase, terminated: bool) -> Vec<HapticPulse> {
        let mut pulses = Vec::new();
        if !self.armed {
            return pulses;
        }

        if terminated {
            if !self.success_fired {
                self.success_fired = true;
                pulses.push(HapticPulse::Notification(NotificationKind::Success));
            }
            self.armed = false;
            self.next_light_ms = None;
            return pulses;
        }

        if matches!(phase, Phase::Entering | Phase::Holding) {
            if let Some(next) = self.next_light_ms {
                if now_ms >= next {
                    pulses.push(HapticPulse::Impact(ImpactStyle::Light));
                    let mut following = next + self.interval_ms;
                    if following <= now_ms {
                        following = now_ms + self.interval_ms;
                    }
                    self.next_light_ms = Some(following);
                }
            }
        }
        pulses
    }

    pub fn is_armed(&self) -> bool {
        self.armed
    }

    pub fn success_fired(&self) -> bool {
        self.success_fired
    }
}

/// Device haptics.
///
/// Delivery is fire-and-forget: callers may drop the error.
pub trait HapticSink {
    fn pulse(&mut self, pulse: HapticPulse) -> Result<(), HapticError>;
}

impl<T: HapticSink + ?Sized> HapticSink for Box<T> {
    fn pulse(&mut self, pulse: HapticPulse) -> Result<(), HapticError> {
        (**self).pulse(pulse)
    }
}

/// Sink for hosts without haptic hardware.
#[derive(Clone, Copy, Debug, Default)]
pub struct SilentHaptics;

impl HapticSink for SilentHaptics {
    fn pulse(&mut self, _pulse: HapticPulse) -> Result<(), HapticError> {
        Ok(())
    }
}

/// Sink that keeps every delivered pulse, for inspection.
#[derive(Clone, Debug, Default)]
pub struct RecordingHaptics {
    pub pulses: Vec<HapticPulse>,
}

impl HapticSink for RecordingHaptics {
    fn pulse(&mut self, pulse: HapticPulse) -> Result<(), HapticError> {
        self.pulses.push(pulse);
        Ok(())
    }
}

#[cfg(test)]
#[path = "tests/haptics_tests.rs"]
mod tests;
