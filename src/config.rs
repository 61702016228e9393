//! On-disk tunables for the whole stage.

use std::path::{Path, PathBuf};

use miette::Diagnostic;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::canvas::BackgroundConfig;
use crate::coordinator::CoordinatorConfig;
use crate::duration::{SpeedMode, TimingConfig};
use crate::haptics::HapticConfig;
use crate::history::HistoryConfig;
use crate::phase::{PhaseSplit, TokenConfig};
use crate::readout::ReadoutConfig;

/// Every section is optional; missing keys take their default.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RevealConfig {
    pub speed_mode: SpeedMode,
    pub timing: TimingConfig,
    pub phases: PhaseSplit,
    pub token: TokenConfig,
    pub background: BackgroundConfig,
    pub haptics: HapticConfig,
    pub coordinator: CoordinatorConfig,
    pub readout: ReadoutConfig,
    pub history: HistoryConfig,
}

#[derive(Debug, Error, Diagnostic)]
pub enum ConfigError {
    #[error("config file not found at {0}")]
    #[diagnostic(
        code(config::not_found),
        help("Run `winreveal config-init --output <path>` to write the defaults")
    )]
    NotFound(PathBuf),

    #[error("failed to parse config: {0}")]
    #[diagnostic(code(config::parse_error))]
    Parse(#[from] toml::de::Error),

    #[error("failed to serialize config: {0}")]
    #[diagnostic(code(config::serialize_error))]
    Serialize(#[from] toml::ser::Error),

    #[error("io error: {0}")]
    #[diagnostic(code(config::io_error))]
    Io(#[from] std::io::Error),

    #[error("invalid config: {0}")]
    #[diagnostic(code(config::invalid))]
    Invalid(String),
}

impl RevealConfig {
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        if !path.exists() {
            return Err(ConfigError::NotFound(path.to_path_buf()));
        }
        let content = std::fs::read_to_string(path)?;
        Self::from_toml_str(&content)
    }

    pub fn save(&self, path: &Path) -> Result<(), ConfigError> {
        std::fs::write(path, self.to_toml_string()?)?;
        Ok(())
    }

    pub fn from_toml_str(content: &str) -> Result<Self, ConfigError> {
        let config: RevealConfig = toml::from_str(content)?;
        config.validate()?;
        Ok(config)
    }

    pub fn to_toml_string(&self) -> Result<String, ConfigError> {
        Ok(toml::to_string_pretty(self)?)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        let phases = &self.phases;
        if !positive(phases.enter) || phases.enter >= 1.0 {
            return Err(invalid(format!("phases.enter must be in (0, 1), got {}", phases.enter)));
        }
        if !positive(phases.spin) || phases.enter + phases.spin >= 1.0 {
            return Err(invalid(format!(
                "phases.spin must be positive with enter + spin < 1, got {}",
                phases.spin
            )));
        }

        let timing = &self.timing;
        if !positive(timing.fast_base_ms) || !positive(timing.slow_base_ms) {
            return Err(invalid("timing bases must be positive".to_string()));
        }
        if !non_negative(timing.min_multiplier) || timing.min_multiplier > timing.max_multiplier {
            return Err(invalid(format!(
                "timing multiplier clamp [{}, {}] is empty",
                timing.min_multiplier, timing.max_multiplier
            )));
        }

        let token = &self.token;
        if !non_negative(token.margin) {
            return Err(invalid("token.margin must be non-negative".to_string()));
        }
        if !positive(token.travel_speed) {
            return Err(invalid("token.travel_speed must be positive".to_string()));
        }
        if !non_negative(self.background.speed) {
            return Err(invalid("background.speed must be non-negative".to_string()));
        }
        if !positive(self.background.tile_width) || !positive(self.background.tile_height) {
            return Err(invalid("background tiles must have a positive size".to_string()));
        }
        if !positive(self.haptics.pulse_interval_ms) {
            return Err(invalid("haptics.pulse_interval_ms must be positive".to_string()));
        }
        if !positive(self.coordinator.poll_interval_ms) {
            return Err(invalid("coordinator.poll_interval_ms must be positive".to_string()));
        }
        if !non_negative(self.readout.reset_delay_ms) {
            return Err(invalid("readout.reset_delay_ms must be non-negative".to_string()));
        }
        Ok(())
    }
}

// NaN fails both checks.
fn positive(value: f64) -> bool {
    value > 0.0
}

fn non_negative(value: f64) -> bool {
    value >= 0.0
}

fn invalid(message: String) -> ConfigError {
    ConfigError::Invalid(message)
}

#[cfg(test)]
#[path = "tests/config_tests.rs"]
mod tests;
