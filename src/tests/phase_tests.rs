use super::*;

fn curve() -> TokenCurve {
    TokenCurve::default()
}

fn reference() -> CanvasSize {
    CanvasSize::reference()
}

#[test]
fn test_phase_boundaries() {
    let split = PhaseSplit::default();
    assert_eq!(split.phase_at(0.0), Phase::Entering);
    assert_eq!(split.phase_at(0.149), Phase::Entering);
    assert_eq!(split.phase_at(0.15), Phase::Holding);
    assert_eq!(split.phase_at(0.849), Phase::Holding);
    assert_eq!(split.phase_at(0.85), Phase::Exiting);
    assert_eq!(split.phase_at(1.0), Phase::Exiting);
}

#[test]
fn test_pose_starts_off_canvas() {
    let pose = curve().pose(0.0, 1_000.0, reference());
    assert_eq!(pose.x, -100.0);
    assert_eq!(pose.y, 206.0);
    assert_eq!(pose.rotation, 0.0);
    assert_eq!(pose.scale, 1.0);
    assert_eq!(pose.phase, Phase::Entering);
}

#[test]
fn test_short_session_arrival_is_capped_by_phase_share() {
    // 279px at 900px/s would need 0.31s; the fast 1x session only grants 0.15s.
    let arrival = curve().arrival_s(1_000.0, reference());
    assert!((arrival - 0.15).abs() < 1e-12);

    let late_enter = curve().pose(0.149, 1_000.0, reference());
    assert!(late_enter.x > 178.0 && late_enter.x < 179.0);
}

#[test]
fn test_long_session_arrives_early_and_waits_at_center() {
    let curve = curve();
    let arrival = curve.arrival_s(5_000.0, reference());
    assert!((arrival - 0.31).abs() < 1e-12);

    // 0.5s into a 5s session is past arrival but still inside the entering share.
    let pose = curve.pose(0.1, 5_000.0, reference());
    assert_eq!(pose.phase, Phase::Entering);
    assert_eq!(pose.x, 179.0);
}

#[test]
fn test_entering_is_monotone_towards_center() {
    let curve = curve();
    let mut previous = f64::NEG_INFINITY;
    for step in 0..150 {
        let pose = curve.pose(step as f64 / 1_000.0, 1_000.0, reference());
        assert!(pose.x >= previous, "x went backwards at step {step}");
        assert!(pose.x <= 179.0);
        previous = pose.x;
    }
}

#[test]
fn test_hold_starts_at_center_with_unit_pulse() {
    let pose = curve().pose(0.15, 1_000.0, reference());
    assert_eq!(pose.phase, Phase::Holding);
    assert_eq!(pose.x, 179.0);
    assert_eq!(pose.y, 206.0);
    assert_eq!(pose.scale, 1.0);
}

#[test]
fn test_hold_wobble_stays_within_amplitude() {
    let curve = curve();
    for step in 150..850 {
        let pose = curve.pose(step as f64 / 1_000.0, 5_000.0, reference());
        assert_eq!(pose.phase, Phase::Holding);
        assert!((pose.x - 179.0).abs() <= 20.0 + 1e-9);
        assert!((pose.y - 206.0).abs() <= 5.0 + 1e-9);
        assert!(pose.scale >= 0.9 - 1e-9 && pose.scale <= 1.1 + 1e-9);
    }
}

#[test]
fn test_exit_is_continuous_with_hold() {
    let curve = curve();
    let before = curve.pose(0.849_999_9, 3_000.0, reference());
    let after = curve.pose(0.85, 3_000.0, reference());
    assert_eq!(before.phase, Phase::Holding);
    assert_eq!(after.phase, Phase::Exiting);
    assert!((before.x - after.x).abs() < 0.01);
    assert!((before.y - after.y).abs() < 0.01);
}

#[test]
fn test_exit_ends_past_far_edge() {
    let curve = curve();
    let pose = curve.pose(1.0, 1_000.0, reference());
    assert_eq!(pose.x, 508.0);
    assert!(pose.x > curve.exit_threshold(reference()));
    assert_eq!(pose.y, 206.0);
    assert_eq!(pose.scale, 1.0);
}

#[test]
fn test_rotation_is_monotone_across_phases() {
    let curve = curve();
    let mut previous = -1.0;
    for step in 0..=1_000 {
        let pose = curve.pose(step as f64 / 1_000.0, 2_000.0, reference());
        assert!(pose.rotation > previous);
        previous = pose.rotation;
    }
    // 9 rad/s over 2s.
    assert!((previous - 18.0).abs() < 1e-9);
}

#[test]
fn test_scale_follows_canvas_ratio() {
    let curve = curve();
    let small = curve.pose(0.0, 1_000.0, reference());
    let large = curve.pose(0.0, 1_000.0, CanvasSize::fit_width(716.0));
    assert_eq!(large.scale, small.scale * 2.0);
    assert_eq!(large.x, small.x * 2.0);
}

#[test]
fn test_zero_width_canvas_yields_finite_pose() {
    let curve = curve();
    for progress in [0.0, 0.1, 0.5, 0.9, 1.0] {
        let pose = curve.pose(progress, 1_000.0, CanvasSize::new(0.0, 0.0));
        assert!(pose.x.is_finite());
        assert!(pose.y.is_finite());
        assert!(pose.scale.is_finite());
        assert!(pose.rotation.is_finite());
    }
}
