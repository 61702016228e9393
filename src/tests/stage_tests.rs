use super::*;
use crate::duration::SpeedMode;
use crate::error::{HapticError, RevealError};
use crate::haptics::RecordingHaptics;

/// Sink whose device is gone.
struct BrokenHaptics {
    attempts: usize,
}

impl HapticSink for BrokenHaptics {
    fn pulse(&mut self, _pulse: HapticPulse) -> Result<(), HapticError> {
        self.attempts += 1;
        Err(HapticError::Unavailable("no vibrator".to_string()))
    }
}

fn fast_stage<H: HapticSink>(haptics: H) -> RevealStage<H> {
    RevealStage::new(
        RevealConfig::default(),
        SpeedSetting::new(SpeedMode::Fast),
        haptics,
    )
}

/// Frames at 60Hz until the stage goes idle; returns the last frame time.
fn run_until_idle<H: HapticSink>(stage: &mut RevealStage<H>, mut now: f64) -> f64 {
    while stage.is_busy() {
        now += 1_000.0 / 60.0;
        stage.frame(now);
        assert!(now < 120_000.0, "stage never went idle");
    }
    now
}

#[test]
fn test_malformed_reveal_leaves_stage_untouched() {
    let mut stage = fast_stage(SilentHaptics);
    assert!(matches!(
        stage.reveal(f64::NAN, 100.0, 0.0),
        Err(RevealError::InvalidMultiplier(_))
    ));
    assert!(matches!(
        stage.reveal(1.0, -1.0, 0.0),
        Err(RevealError::InvalidBet(_))
    ));
    assert!(!stage.is_busy());
    assert!(!stage.token().is_active());
    assert_eq!(stage.coordinator().pending_len(), 0);
}

#[test]
fn test_broken_haptics_do_not_block_commit() {
    let mut stage = fast_stage(BrokenHaptics { attempts: 0 });
    stage.reveal(1.0, 100.0, 0.0).unwrap();
    run_until_idle(&mut stage, 0.0);
    assert_eq!(stage.history().len(), 1);
    assert!(stage.haptics().attempts >= 2);
}

#[test]
fn test_reveal_dispatches_start_impact_immediately() {
    let mut stage = fast_stage(RecordingHaptics::default());
    stage.reveal(1.0, 100.0, 0.0).unwrap();
    assert_eq!(
        stage.haptics().pulses,
        vec![HapticPulse::Impact(crate::haptics::ImpactStyle::Medium)]
    );
}

#[test]
fn test_speed_change_applies_to_next_reveal_only() {
    let mut stage = fast_stage(SilentHaptics);
    stage.reveal(1.0, 100.0, 0.0).unwrap();
    stage.speed().set(SpeedMode::Slow);
    assert_eq!(stage.token().session().unwrap().duration_ms(), 1_000.0);

    let now = run_until_idle(&mut stage, 0.0);
    stage.reveal(1.0, 100.0, now).unwrap();
    assert_eq!(stage.token().session().unwrap().duration_ms(), 5_000.0);
}

#[test]
fn test_counter_and_canvas_finish_within_a_frame() {
    let mut stage = fast_stage(SilentHaptics);
    stage.reveal(2.0, 100.0, 0.0).unwrap();
    let step = 1_000.0 / 60.0;
    let mut now = 0.0;
    let mut canvas_done = None;
    let mut counter_done = None;
    let mut frame = 0u32;
    while canvas_done.is_none() || counter_done.is_none() {
        now += step;
        frame += 1;
        stage.frame(now);
        if canvas_done.is_none() && !stage.token().is_active() {
            canvas_done = Some(frame);
        }
        if counter_done.is_none() && !stage.counter().is_active() {
            counter_done = Some(frame);
        }
        assert!(frame < 1_000);
    }
    let canvas_done = canvas_done.unwrap();
    let counter_done = counter_done.unwrap();
    // The canvas may leave early via the exit threshold, never late.
    assert!(canvas_done <= counter_done + 1);
    assert_eq!(stage.counter().value(), 2.0);
}

#[test]
fn test_resize_is_forwarded_to_canvas() {
    let mut stage = fast_stage(SilentHaptics);
    stage.resize(CanvasSize::fit_width(716.0));
    assert_eq!(stage.token().canvas().scale(), 2.0);
}

#[test]
fn test_reveal_keeps_a_widget_session_it_did_not_start() {
    let mut stage = fast_stage(SilentHaptics);
    let stray = RevealRequest {
        multiplier: 3.0,
        bet_amount: 10.0,
        win_amount: 30.0,
        speed: SpeedMode::Fast,
    };
    assert!(stage.token.start(&stray, 0.0));

    assert_eq!(stage.reveal(1.0, 100.0, 0.0).unwrap(), Admission::StartVisuals);
    // The token refused the new start; the others took it.
    assert_eq!(stage.token().session().unwrap().duration_ms(), 3_000.0);
    assert_eq!(stage.counter().target(), 1.0);
    assert_eq!(stage.readout().final_amount(), 100.0);
}
