#![allow(dead_code)]

use win_reveal::{HapticSink, RevealConfig, RevealStage, SilentHaptics, SpeedMode, SpeedSetting};

pub const FRAME_MS: f64 = 1_000.0 / 60.0;

pub fn stage(speed: SpeedMode) -> RevealStage<SilentHaptics> {
    stage_with(speed, SilentHaptics)
}

pub fn stage_with<H: HapticSink>(speed: SpeedMode, haptics: H) -> RevealStage<H> {
    RevealStage::new(RevealConfig::default(), SpeedSetting::new(speed), haptics)
}

/// Frames at 60Hz from `start_ms` until the stage is idle; returns the last frame time.
pub fn run_until_idle<H: HapticSink>(stage: &mut RevealStage<H>, start_ms: f64) -> f64 {
    let mut now = start_ms;
    while stage.is_busy() {
        now += FRAME_MS;
        stage.frame(now);
        assert!(now - start_ms < 120_000.0, "stage never went idle");
    }
    now
}

/// Keeps framing for `extra_ms` after going idle.
pub fn idle_frames<H: HapticSink>(stage: &mut RevealStage<H>, start_ms: f64, extra_ms: f64) -> f64 {
    let mut now = start_ms;
    while now < start_ms + extra_ms {
        now += FRAME_MS;
        stage.frame(now);
    }
    now
}
