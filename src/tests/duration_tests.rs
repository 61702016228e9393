use super::*;

#[test]
fn test_duration_scales_with_multiplier() {
    assert_eq!(reveal_duration_ms(1.0, SpeedMode::Fast), 1_000.0);
    assert_eq!(reveal_duration_ms(2.0, SpeedMode::Fast), 2_000.0);
    assert_eq!(reveal_duration_ms(2.0, SpeedMode::Slow), 10_000.0);
}

#[test]
fn test_duration_clamps_extremes() {
    // Below the floor and above the ceiling collapse onto the bounds.
    assert_eq!(reveal_duration_ms(0.0, SpeedMode::Fast), 500.0);
    assert_eq!(reveal_duration_ms(0.1, SpeedMode::Slow), 2_500.0);
    assert_eq!(reveal_duration_ms(50.0, SpeedMode::Fast), 5_000.0);
}

#[test]
fn test_duration_non_finite_uses_floor() {
    assert_eq!(reveal_duration_ms(f64::NAN, SpeedMode::Fast), 500.0);
    assert_eq!(reveal_duration_ms(f64::INFINITY, SpeedMode::Fast), 500.0);
}

#[test]
fn test_speed_mode_toggle_and_parse() {
    assert_eq!(SpeedMode::Slow.toggled(), SpeedMode::Fast);
    assert_eq!(SpeedMode::Fast.toggled(), SpeedMode::Slow);
    assert_eq!("FAST".parse::<SpeedMode>(), Ok(SpeedMode::Fast));
    assert!("medium".parse::<SpeedMode>().is_err());
}

#[test]
fn test_speed_setting_clones_share_state() {
    let setting = SpeedSetting::new(SpeedMode::Slow);
    let reader = setting.clone();
    assert_eq!(setting.toggle(), SpeedMode::Fast);
    assert_eq!(reader.get(), SpeedMode::Fast);
}
