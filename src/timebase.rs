//! Frame-delta accumulation into normalized progress.

/// Tolerance under which accumulated time counts as the full duration.
///
/// Summing per-frame deltas drifts from `now - start` by a few ulps; without
/// the snap a session would overrun by one frame.
pub const PROGRESS_EPSILON_MS: f64 = 1e-6;

/// Accumulates wall-clock frame deltas for one session.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Timebase {
    duration_ms: f64,
    elapsed_ms: f64,
    last_frame_ms: f64,
}

impl Timebase {
    /// Starts a timebase at `start_ms` for `duration_ms`.
    ///
    /// Non-finite or negative durations collapse to zero, which makes the
    /// first tick complete the session.
    pub fn new(start_ms: f64, duration_ms: f64) -> Self {
        let duration_ms = if duration_ms.is_finite() {
            duration_ms.max(0.0)
        } else {
            0.0
        };
        Self {
            duration_ms,
            elapsed_ms: 0.0,
            last_frame_ms: if start_ms.is_finite() { start_ms } else { 0.0 },
        }
    }

    /// Consumes the delta since the previous frame and returns the new progress.
    pub fn tick(&mut self, now_ms: f64) -> f64 {
        let delta = frame_delta(self.last_frame_ms, now_ms);
        self.elapsed_ms += delta;
        if now_ms.is_finite() {
            self.last_frame_ms = now_ms;
        }
        self.progress()
    }

    /// Normalized progress in [0, 1].
    pub fn progress(&self) -> f64 {
        if self.duration_ms <= 0.0 || self.elapsed_ms >= self.duration_ms - PROGRESS_EPSILON_MS {
            return 1.0;
        }
        (self.elapsed_ms / self.duration_ms).clamp(0.0, 1.0)
    }

    /// Elapsed time, capped at the duration.
    pub fn elapsed_ms(&self) -> f64 {
        self.elapsed_ms.min(self.duration_ms)
    }

    pub fn duration_ms(&self) -> f64 {
        self.duration_ms
    }

    pub fn is_complete(&self) -> bool {
        self.progress() >= 1.0
    }
}

/// Non-negative delta between two frame timestamps.
///
/// Backwards or non-finite clocks yield zero instead of rewinding progress.
pub fn frame_delta(previous_ms: f64, now_ms: f64) -> f64 {
    let delta = now_ms - previous_ms;
    if delta.is_finite() && delta > 0.0 {
        delta
    } else {
        0.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_progress_accumulates_frame_deltas() {
        let mut timebase = Timebase::new(100.0, 1_000.0);
        assert_eq!(timebase.progress(), 0.0);
        assert_eq!(timebase.tick(350.0), 0.25);
        assert_eq!(timebase.tick(600.0), 0.5);
        assert_eq!(timebase.tick(1_100.0), 1.0);
        assert!(timebase.is_complete());
    }

    #[test]
    fn test_sixty_hz_frames_land_on_completion() {
        let mut timebase = Timebase::new(0.0, 1_000.0);
        let frame = 1_000.0 / 60.0;
        let mut frames = 0;
        while !timebase.is_complete() {
            frames += 1;
            timebase.tick(frame * frames as f64);
        }
        assert_eq!(frames, 60);
    }

    #[test]
    fn test_backwards_clock_does_not_rewind() {
        let mut timebase = Timebase::new(0.0, 1_000.0);
        timebase.tick(500.0);
        assert_eq!(timebase.tick(200.0), 0.5);
        // Deltas resume from the new reading.
        assert_eq!(timebase.tick(450.0), 0.75);
    }

    #[test]
    fn test_degenerate_duration_completes_immediately() {
        assert_eq!(Timebase::new(0.0, 0.0).progress(), 1.0);
        assert_eq!(Timebase::new(0.0, f64::NAN).progress(), 1.0);
        assert_eq!(Timebase::new(0.0, -5.0).duration_ms(), 0.0);
    }

    #[test]
    fn test_frame_delta_rejects_garbage() {
        assert_eq!(frame_delta(10.0, 5.0), 0.0);
        assert_eq!(frame_delta(0.0, f64::NAN), 0.0);
        assert_eq!(frame_delta(0.0, 16.0), 16.0);
    }
}
