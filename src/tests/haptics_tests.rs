use super::*;
use crate::phase::PhaseSplit;

fn light_count(pulses: &[HapticPulse]) -> usize {
    pulses
        .iter()
        .filter(|pulse| **pulse == HapticPulse::Impact(ImpactStyle::Light))
        .count()
}

#[test]
fn test_begin_emits_medium_impact() {
    let mut scheduler = HapticScheduler::new(HapticConfig::default());
    assert_eq!(scheduler.begin(0.0), HapticPulse::Impact(ImpactStyle::Medium));
    assert!(scheduler.is_armed());
}

#[test]
fn test_fast_session_pulses_until_exit() {
    let split = PhaseSplit::default();
    let mut scheduler = HapticScheduler::new(HapticConfig::default());
    scheduler.begin(0.0);

    let mut pulses = Vec::new();
    for step in 1..100 {
        let now = step as f64 * 10.0;
        let phase = split.phase_at(now / 1_000.0);
        pulses.extend(scheduler.update(now, phase, false));
    }
    pulses.extend(scheduler.update(1_000.0, Phase::Exiting, true));

    // 200, 400, 600 and 800ms; 1000ms is already in the exit phase.
    assert_eq!(light_count(&pulses), 4);
    assert_eq!(
        pulses.last().copied(),
        Some(HapticPulse::Notification(NotificationKind::Success))
    );
}

#[test]
fn test_success_fires_once() {
    let mut scheduler = HapticScheduler::new(HapticConfig::default());
    scheduler.begin(0.0);
    assert_eq!(scheduler.update(500.0, Phase::Exiting, true).len(), 1);
    assert!(scheduler.update(516.0, Phase::Exiting, true).is_empty());
    assert!(scheduler.success_fired());
    assert!(!scheduler.is_armed());
}

#[test]
fn test_late_frame_emits_single_pulse_and_reanchors() {
    let mut scheduler = HapticScheduler::new(HapticConfig::default());
    scheduler.begin(0.0);
    // A 900ms stall owes four pulses but only one is delivered.
    let pulses = scheduler.update(900.0, Phase::Holding, false);
    assert_eq!(light_count(&pulses), 1);
    assert!(scheduler.update(1_000.0, Phase::Holding, false).is_empty());
    assert_eq!(light_count(&scheduler.update(1_100.0, Phase::Holding, false)), 1);
}

#[test]
fn test_unarmed_scheduler_is_quiet() {
    let mut scheduler = HapticScheduler::new(HapticConfig::default());
    assert!(scheduler.update(400.0, Phase::Holding, false).is_empty());
    assert!(scheduler.update(400.0, Phase::Exiting, true).is_empty());
}

#[test]
fn test_exit_phase_suppresses_light_pulses() {
    let mut scheduler = HapticScheduler::new(HapticConfig::default());
    scheduler.begin(0.0);
    assert!(scheduler.update(300.0, Phase::Exiting, false).is_empty());
}

#[test]
fn test_boxed_sink_forwards() {
    let mut sink: Box<dyn HapticSink> = Box::new(SilentHaptics);
    assert!(sink.pulse(HapticPulse::Impact(ImpactStyle::Soft)).is_ok());

    let mut recording = RecordingHaptics::default();
    recording
        .pulse(HapticPulse::Notification(NotificationKind::Success))
        .unwrap();
    assert_eq!(recording.pulses.len(), 1);
}
