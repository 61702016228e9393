//! Duration policy shared by every reveal widget.
//!
//! The canvas engine, the counter ramp and the delta readout all derive their
//! session length from [`TimingConfig::duration_ms`], so a single outcome
//! finishes on every widget within the same frame window.

use std::cell::Cell;
use std::rc::Rc;

use serde::{Deserialize, Serialize};

/// Playback speed selected by the player.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SpeedMode {
    #[default]
    Slow,
    Fast,
}

impl SpeedMode {
    pub fn toggled(self) -> Self {
        match self {
            SpeedMode::Slow => SpeedMode::Fast,
            SpeedMode::Fast => SpeedMode::Slow,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            SpeedMode::Slow => "slow",
            SpeedMode::Fast => "fast",
        }
    }
}

impl std::str::FromStr for SpeedMode {
    type Err = String;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.trim().to_ascii_lowercase().as_str() {
            "slow" => Ok(SpeedMode::Slow),
            "fast" => Ok(SpeedMode::Fast),
            other => Err(format!("unknown speed mode '{other}'")),
        }
    }
}

/// Process-wide speed setting.
///
/// Clones share the same cell. The reveal engine only reads it; the host
/// (a toggle button, a key binding) writes it.
#[derive(Clone, Debug, Default)]
pub struct SpeedSetting {
    mode: Rc<Cell<SpeedMode>>,
}

impl SpeedSetting {
    pub fn new(mode: SpeedMode) -> Self {
        Self {
            mode: Rc::new(Cell::new(mode)),
        }
    }

    pub fn get(&self) -> SpeedMode {
        self.mode.get()
    }

    pub fn set(&self, mode: SpeedMode) {
        self.mode.set(mode);
    }

    /// Flips the mode and returns the new value.
    pub fn toggle(&self) -> SpeedMode {
        let next = self.get().toggled();
        self.set(next);
        next
    }
}

/// Tunables for the duration policy.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TimingConfig {
    pub fast_base_ms: f64,
    pub slow_base_ms: f64,
    pub min_multiplier: f64,
    pub max_multiplier: f64,
}

impl Default for TimingConfig {
    fn default() -> Self {
        Self {
            fast_base_ms: 1_000.0,
            slow_base_ms: 5_000.0,
            min_multiplier: 0.5,
            max_multiplier: 5.0,
        }
    }
}

impl TimingConfig {
    pub fn base_ms(&self, speed: SpeedMode) -> f64 {
        match speed {
            SpeedMode::Fast => self.fast_base_ms,
            SpeedMode::Slow => self.slow_base_ms,
        }
    }

    /// Multiplier clamped into the range that drives duration scaling.
    ///
    /// Non-finite input maps to the lower bound.
    pub fn effective_multiplier(&self, multiplier: f64) -> f64 {
        if !multiplier.is_finite() {
            return self.min_multiplier;
        }
        multiplier.max(self.min_multiplier).min(self.max_multiplier)
    }

    /// Total reveal duration in milliseconds for `multiplier` at `speed`.
    pub fn duration_ms(&self, multiplier: f64, speed: SpeedMode) -> f64 {
        self.effective_multiplier(multiplier) * self.base_ms(speed)
    }
}

/// Duration policy with the default tunables.
pub fn reveal_duration_ms(multiplier: f64, speed: SpeedMode) -> f64 {
    TimingConfig::default().duration_ms(multiplier, speed)
}

#[cfg(test)]
#[path = "tests/duration_tests.rs"]
mod tests;
