//! Composition root wiring the widgets, the coordinator and the haptic sink.

use tracing::{trace, warn};

use crate::canvas::CanvasSize;
use crate::config::RevealConfig;
use crate::coordinator::{Admission, CommitReport, CompletionCoordinator};
use crate::counter::CounterRamp;
use crate::duration::SpeedSetting;
use crate::error::RevealResult;
use crate::haptics::{HapticPulse, HapticSink, SilentHaptics};
use crate::history::HistoryLog;
use crate::outcome::Outcome;
use crate::phase::TokenCurve;
use crate::readout::DeltaReadout;
use crate::token::TokenEngine;
use crate::widget::{RevealAnimation, RevealRequest};

/// Result of one frame step.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct FrameReport {
    /// Entries committed on this frame, oldest first.
    pub commit: Option<CommitReport>,
    /// Pulses handed to the sink on this frame.
    pub pulses: Vec<HapticPulse>,
}

/// Single-threaded reveal stage driven by the host's frame loop.
///
/// `reveal` never blocks; all progress happens inside [`RevealStage::frame`].
pub struct RevealStage<H: HapticSink = SilentHaptics> {
    config: RevealConfig,
    speed: SpeedSetting,
    token: TokenEngine,
    counter: CounterRamp,
    readout: DeltaReadout,
    coordinator: CompletionCoordinator,
    haptics: H,
}

impl RevealStage<SilentHaptics> {
    /// Default tunables, without haptics.
    pub fn headless() -> Self {
        let config = RevealConfig::default();
        let speed = SpeedSetting::new(config.speed_mode);
        Self::new(config, speed, SilentHaptics)
    }
}

impl<H: HapticSink> RevealStage<H> {
    pub fn new(config: RevealConfig, speed: SpeedSetting, haptics: H) -> Self {
        let token = TokenEngine::new(
            TokenCurve::new(config.token, config.phases),
            config.timing,
            config.background,
            config.haptics,
        );
        Self {
            token,
            counter: CounterRamp::new(config.timing),
            readout: DeltaReadout::new(config.timing, config.readout),
            coordinator: CompletionCoordinator::new(config.coordinator),
            speed,
            haptics,
            config,
        }
    }

    /// Accepts an outcome for presentation.
    ///
    /// Malformed input is rejected without touching any state. While a reveal
    /// is in flight the outcome is queued and committed with it.
    pub fn reveal(
        &mut self,
        multiplier: f64,
        bet_amount: f64,
        now_ms: f64,
    ) -> RevealResult<Admission> {
        let outcome = Outcome::new(multiplier, bet_amount).map_err(|err| {
            warn!(multiplier, bet_amount, %err, "reveal rejected");
            err
        })?;

        let admission = self.coordinator.enqueue(outcome, now_ms);
        if admission == Admission::StartVisuals {
            let request = RevealRequest {
                multiplier: outcome.multiplier(),
                bet_amount: outcome.bet_amount(),
                win_amount: outcome.win_amount(),
                speed: self.speed.get(),
            };
            let started = [
                ("token", self.token.start(&request, now_ms)),
                ("counter", self.counter.start(&request, now_ms)),
                ("readout", self.readout.start(&request, now_ms)),
            ];
            for (widget, accepted) in started {
                if !accepted {
                    warn!(widget, multiplier, "widget still running while coordinator was idle");
                }
            }
            let pulses = self.token.take_pulses();
            self.dispatch(&pulses);
        }
        Ok(admission)
    }

    /// Advances every widget once and polls for joint completion.
    pub fn frame(&mut self, now_ms: f64) -> FrameReport {
        self.token.tick(now_ms);
        self.counter.tick(now_ms);
        self.readout.tick(now_ms);

        let pulses = self.token.take_pulses();
        self.dispatch(&pulses);

        let watched: [&dyn RevealAnimation; 2] = [&self.token, &self.counter];
        let commit = self.coordinator.poll(now_ms, &watched);
        FrameReport { commit, pulses }
    }

    fn dispatch(&mut self, pulses: &[HapticPulse]) {
        for pulse in pulses {
            if let Err(err) = self.haptics.pulse(*pulse) {
                trace!(pulse = pulse.label(), %err, "haptic pulse dropped");
            }
        }
    }

    pub fn resize(&mut self, canvas: CanvasSize) {
        self.token.resize(canvas);
    }

    pub fn is_busy(&self) -> bool {
        self.coordinator.is_busy()
    }

    pub fn history(&self) -> &HistoryLog {
        self.coordinator.history()
    }

    pub fn config(&self) -> &RevealConfig {
        &self.config
    }

    pub fn speed(&self) -> &SpeedSetting {
        &self.speed
    }

    pub fn token(&self) -> &TokenEngine {
        &self.token
    }

    pub fn counter(&self) -> &CounterRamp {
        &self.counter
    }

    pub fn readout(&self) -> &DeltaReadout {
        &self.readout
    }

    pub fn coordinator(&self) -> &CompletionCoordinator {
        &self.coordinator
    }

    pub fn haptics(&self) -> &H {
        &self.haptics
    }

    pub fn haptics_mut(&mut self) -> &mut H {
        &mut self.haptics
    }
}

#[cfg(test)]
#[path = "tests/stage_tests.rs"]
mod tests;
