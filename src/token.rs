//! Canvas engine: owns the rolling-token session and the background scroll.

use tracing::debug;

use crate::canvas::{BackgroundConfig, CanvasSize};
use crate::duration::TimingConfig;
use crate::haptics::{HapticConfig, HapticPulse, HapticScheduler};
use crate::phase::{Phase, TokenCurve, TokenPose};
use crate::session::AnimationSession;
use crate::widget::{RevealAnimation, RevealRequest};

/// What the renderer needs for one frame.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct TokenFrame {
    /// `None` when no session is running.
    pub pose: Option<TokenPose>,
    pub background_offset: f64,
    /// True only on the frame the session terminated.
    pub finished: bool,
}

pub struct TokenEngine {
    curve: TokenCurve,
    timing: TimingConfig,
    background: BackgroundConfig,
    haptics: HapticScheduler,
    canvas: CanvasSize,
    session: Option<AnimationSession>,
    last_phase: Option<Phase>,
    pose: Option<TokenPose>,
    background_offset: f64,
    finished: bool,
    pending_pulses: Vec<HapticPulse>,
}

impl TokenEngine {
    pub fn new(
        curve: TokenCurve,
        timing: TimingConfig,
        background: BackgroundConfig,
        haptics: HapticConfig,
    ) -> Self {
        Self {
            curve,
            timing,
            background,
            haptics: HapticScheduler::new(haptics),
            canvas: CanvasSize::reference(),
            session: None,
            last_phase: None,
            pose: None,
            background_offset: 0.0,
            finished: false,
            pending_pulses: Vec::new(),
        }
    }

    /// New canvas size; picked up by the next frame's pose.
    pub fn resize(&mut self, canvas: CanvasSize) {
        self.canvas = CanvasSize::new(canvas.width, canvas.height);
    }

    pub fn canvas(&self) -> CanvasSize {
        self.canvas
    }

    pub fn curve(&self) -> &TokenCurve {
        &self.curve
    }

    pub fn background(&self) -> &BackgroundConfig {
        &self.background
    }

    pub fn session(&self) -> Option<&AnimationSession> {
        self.session.as_ref()
    }

    pub fn frame(&self) -> TokenFrame {
        TokenFrame {
            pose: self.pose,
            background_offset: self.background_offset,
            finished: self.finished,
        }
    }

    pub fn background_offset(&self) -> f64 {
        self.background_offset
    }

    /// Drains the pulses produced since the last call.
    pub fn take_pulses(&mut self) -> Vec<HapticPulse> {
        std::mem::take(&mut self.pending_pulses)
    }
}

impl RevealAnimation for TokenEngine {
    fn start(&mut self, request: &RevealRequest, now_ms: f64) -> bool {
        if self.session.is_some() {
            debug!(multiplier = request.multiplier, "canvas session already active");
            return false;
        }
        let duration_ms = self.timing.duration_ms(request.multiplier, request.speed);
        let session = AnimationSession::start(request.multiplier, now_ms, duration_ms);
        self.background_offset = 0.0;
        self.finished = false;
        self.last_phase = Some(session.phase());
        self.pose = Some(self.curve.pose(0.0, duration_ms, self.canvas));
        self.session = Some(session);
        let impact = self.haptics.begin(now_ms);
        self.pending_pulses.push(impact);
        debug!(
            multiplier = request.multiplier,
            duration_ms,
            speed = request.speed.label(),
            "canvas session started"
        );
        true
    }

    fn tick(&mut self, now_ms: f64) {
        self.finished = false;
        let Some(session) = self.session.as_mut() else {
            return;
        };

        let progress = session.advance(now_ms, self.curve.split());
        let duration_ms = session.duration_ms();
        let pose = self.curve.pose(progress, duration_ms, self.canvas);
        self.background_offset += self.background.speed;

        if self.last_phase != Some(pose.phase) {
            debug!(phase = pose.phase.label(), progress, "canvas phase changed");
            self.last_phase = Some(pose.phase);
        }

        let terminated = progress >= 1.0 || pose.x > self.curve.exit_threshold(self.canvas);
        let pulses = self.haptics.update(now_ms, pose.phase, terminated);
        self.pending_pulses.extend(pulses);

        if terminated {
            session.finish();
            debug!(
                progress,
                x = pose.x,
                elapsed_ms = session.elapsed_ms(),
                "canvas session finished"
            );
            self.session = None;
            self.last_phase = None;
            self.pose = None;
            self.finished = true;
        } else {
            self.pose = Some(pose);
        }
    }

    fn is_active(&self) -> bool {
        self.session.is_some_and(|session| session.is_active())
    }
}

#[cfg(test)]
#[path = "tests/token_tests.rs"]
mod tests;
