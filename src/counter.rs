//! Numeric multiplier counter that ramps from zero to its target.

use tracing::debug;

use crate::duration::TimingConfig;
use crate::easing::Easing;
use crate::phase::PhaseSplit;
use crate::session::AnimationSession;
use crate::widget::{RevealAnimation, RevealRequest};

#[derive(Clone, Debug)]
pub struct CounterRamp {
    timing: TimingConfig,
    session: Option<AnimationSession>,
    target: f64,
    value: f64,
}

impl CounterRamp {
    pub fn new(timing: TimingConfig) -> Self {
        Self {
            timing,
            session: None,
            target: 0.0,
            value: 0.0,
        }
    }

    /// Value at `progress` of a ramp towards `target`.
    ///
    /// Exactly `target` once progress reaches 1.
    pub fn value_at(target: f64, progress: f64) -> f64 {
        if progress >= 1.0 {
            target
        } else {
            target * Easing::EaseOutCubic.apply(progress)
        }
    }

    pub fn value(&self) -> f64 {
        self.value
    }

    pub fn target(&self) -> f64 {
        self.target
    }

    pub fn progress(&self) -> Option<f64> {
        self.session.map(|session| session.progress())
    }

    /// Counter text, e.g. `1.50x`.
    pub fn display(&self) -> String {
        format_multiplier(self.value)
    }
}

pub fn format_multiplier(value: f64) -> String {
    format!("{value:.2}x")
}

impl RevealAnimation for CounterRamp {
    fn start(&mut self, request: &RevealRequest, now_ms: f64) -> bool {
        if self.session.is_some() {
            return false;
        }
        let duration_ms = self.timing.duration_ms(request.multiplier, request.speed);
        self.target = request.multiplier;
        self.value = 0.0;
        self.session = Some(AnimationSession::start(request.multiplier, now_ms, duration_ms));
        debug!(multiplier = self.target, duration_ms, "counter ramp started");
        true
    }

    fn tick(&mut self, now_ms: f64) {
        let Some(session) = self.session.as_mut() else {
            return;
        };
        let progress = session.advance(now_ms, PhaseSplit::default());
        self.value = Self::value_at(self.target, progress);
        if progress >= 1.0 {
            session.finish();
            self.session = None;
            debug!(value = self.value, "counter ramp finished");
        }
    }

    fn is_active(&self) -> bool {
        self.session.is_some_and(|session| session.is_active())
    }
}
