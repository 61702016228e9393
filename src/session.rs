use crate::phase::{Phase, PhaseSplit};
use crate::timebase::Timebase;

/// One run of an engine's animation for one reveal.
///
/// Owned by exactly one engine and advanced by that engine's frame step.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct AnimationSession {
    multiplier: f64,
    start_ms: f64,
    timebase: Timebase,
    phase: Phase,
    active: bool,
}

impl AnimationSession {
    pub fn start(multiplier: f64, start_ms: f64, duration_ms: f64) -> Self {
        Self {
            multiplier,
            start_ms,
            timebase: Timebase::new(start_ms, duration_ms),
            phase: Phase::Entering,
            active: true,
        }
    }

    /// Advances to `now_ms` and returns the new progress.
    ///
    /// An inactive session keeps its final progress.
    pub fn advance(&mut self, now_ms: f64, split: PhaseSplit) -> f64 {
        if !self.active {
            return self.progress();
        }
        let progress = self.timebase.tick(now_ms);
        self.phase = split.phase_at(progress);
        progress
    }

    pub fn finish(&mut self) {
        self.active = false;
    }

    pub fn multiplier(&self) -> f64 {
        self.multiplier
    }

    pub fn start_ms(&self) -> f64 {
        self.start_ms
    }

    pub fn progress(&self) -> f64 {
        self.timebase.progress()
    }

    pub fn elapsed_ms(&self) -> f64 {
        self.timebase.elapsed_ms()
    }

    pub fn duration_ms(&self) -> f64 {
        self.timebase.duration_ms()
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    pub fn is_active(&self) -> bool {
        self.active
    }
}
