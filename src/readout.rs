//! Balance-delta readout shown next to the token.

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::duration::TimingConfig;
use crate::easing::Easing;
use crate::phase::PhaseSplit;
use crate::session::AnimationSession;
use crate::widget::{RevealAnimation, RevealRequest};

#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ReadoutConfig {
    /// Time a settled result stays visible before the readout resets.
    pub reset_delay_ms: f64,
}

impl Default for ReadoutConfig {
    fn default() -> Self {
        Self {
            reset_delay_ms: 2_000.0,
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ReadoutState {
    Idle,
    Animating,
    Settled,
}

/// Colour family of the readout block.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ReadoutTone {
    Gain,
    Loss,
    Neutral,
}

#[derive(Clone, Debug)]
pub struct DeltaReadout {
    timing: TimingConfig,
    config: ReadoutConfig,
    state: ReadoutState,
    session: Option<AnimationSession>,
    bet_amount: f64,
    final_amount: f64,
    displayed: f64,
    settled_at_ms: f64,
}

impl DeltaReadout {
    pub fn new(timing: TimingConfig, config: ReadoutConfig) -> Self {
        Self {
            timing,
            config,
            state: ReadoutState::Idle,
            session: None,
            bet_amount: 0.0,
            final_amount: 0.0,
            displayed: 0.0,
            settled_at_ms: 0.0,
        }
    }

    pub fn state(&self) -> ReadoutState {
        self.state
    }

    /// Amount currently shown, always a whole number.
    pub fn displayed(&self) -> f64 {
        self.displayed
    }

    pub fn bet_amount(&self) -> f64 {
        self.bet_amount
    }

    pub fn final_amount(&self) -> f64 {
        self.final_amount
    }

    /// Signed result of the settled reveal.
    pub fn net(&self) -> f64 {
        self.final_amount - self.bet_amount
    }

    pub fn tone(&self) -> ReadoutTone {
        match self.state {
            ReadoutState::Idle => ReadoutTone::Neutral,
            ReadoutState::Animating => {
                if self.bet_amount == 0.0 {
                    ReadoutTone::Neutral
                } else if self.displayed < self.bet_amount {
                    ReadoutTone::Loss
                } else {
                    ReadoutTone::Gain
                }
            }
            ReadoutState::Settled => tone_of(self.net()),
        }
    }

    pub fn label(&self) -> String {
        match self.state {
            ReadoutState::Idle => "My bet: 0".to_string(),
            ReadoutState::Animating => format!("Winnings: {}", format_amount(self.displayed)),
            ReadoutState::Settled => {
                let net = self.net();
                match tone_of(net) {
                    ReadoutTone::Gain => format!("You won: +{}", format_amount(net)),
                    ReadoutTone::Loss => format!("You lost: {}", format_amount(net)),
                    ReadoutTone::Neutral => "Winnings: 0".to_string(),
                }
            }
        }
    }

    fn reset(&mut self) {
        self.state = ReadoutState::Idle;
        self.bet_amount = 0.0;
        self.final_amount = 0.0;
        self.displayed = 0.0;
    }
}

fn tone_of(net: f64) -> ReadoutTone {
    if net > 0.0 {
        ReadoutTone::Gain
    } else if net < 0.0 {
        ReadoutTone::Loss
    } else {
        ReadoutTone::Neutral
    }
}

/// Whole amount with thousands separators, e.g. `-12,500`.
pub fn format_amount(value: f64) -> String {
    let rounded = value.round();
    if !rounded.is_finite() {
        return "0".to_string();
    }
    let digits = format!("{:.0}", rounded.abs());
    let mut grouped = String::with_capacity(digits.len() + digits.len() / 3);
    for (index, ch) in digits.chars().enumerate() {
        if index > 0 && (digits.len() - index) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(ch);
    }
    if rounded < 0.0 {
        format!("-{grouped}")
    } else {
        grouped
    }
}

impl RevealAnimation for DeltaReadout {
    fn start(&mut self, request: &RevealRequest, now_ms: f64) -> bool {
        if self.state == ReadoutState::Animating {
            return false;
        }
        let duration_ms = self.timing.duration_ms(request.multiplier, request.speed);
        self.bet_amount = request.bet_amount;
        self.final_amount = request.win_amount;
        self.displayed = 0.0;
        self.state = ReadoutState::Animating;
        self.session = Some(AnimationSession::start(request.multiplier, now_ms, duration_ms));
        debug!(
            bet = request.bet_amount,
            win = request.win_amount,
            duration_ms,
            "readout started"
        );
        true
    }

    fn tick(&mut self, now_ms: f64) {
        match self.state {
            ReadoutState::Idle => {}
            ReadoutState::Animating => {
                let Some(session) = self.session.as_mut() else {
                    self.state = ReadoutState::Idle;
                    return;
                };
                let progress = session.advance(now_ms, PhaseSplit::default());
                if progress >= 1.0 {
                    session.finish();
                    self.session = None;
                    self.displayed = self.final_amount;
                    self.state = ReadoutState::Settled;
                    self.settled_at_ms = now_ms;
                    debug!(net = self.net(), "readout settled");
                } else {
                    self.displayed =
                        (self.final_amount * Easing::EaseOutCubic.apply(progress)).round();
                }
            }
            ReadoutState::Settled => {
                if now_ms - self.settled_at_ms >= self.config.reset_delay_ms {
                    self.reset();
                }
            }
        }
    }

    fn is_active(&self) -> bool {
        self.state == ReadoutState::Animating
    }
}

#[cfg(test)]
#[path = "tests/readout_tests.rs"]
mod tests;
