//! Observable frame digests for deterministic testing.
//!
//! These types capture what a player sees and feels on each frame, without
//! ids, timestamps or other per-run values, so two runs of the same script
//! produce identical traces.

use serde::{Deserialize, Serialize};

use crate::config::RevealConfig;
use crate::duration::SpeedSetting;
use crate::error::{RevealError, RevealResult};
use crate::haptics::{HapticPulse, RecordingHaptics};
use crate::phase::Phase;
use crate::stage::RevealStage;

/// Hard stop for a headless run.
pub const MAX_HEADLESS_FRAMES: u32 = 100_000;

/// A reveal fired by the headless driver at `at_ms`.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct ScheduledReveal {
    pub at_ms: f64,
    pub multiplier: f64,
    pub bet_amount: f64,
}

/// Stage view after one frame.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct FrameDigest {
    /// Frame number (0-indexed).
    pub frame: u32,
    pub time_ms: f64,
    /// `None` when no canvas session is running.
    pub phase: Option<Phase>,
    /// Token center, rounded to whole pixels.
    pub token_x: Option<i64>,
    pub counter: String,
    pub readout: String,
    pub busy: bool,
    pub history_len: usize,
    /// Pulses delivered since the previous digest.
    pub pulses: Vec<HapticPulse>,
}

/// History entry without its id and timestamp.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct CommittedDigest {
    pub multiplier: f64,
    pub bet_amount: f64,
    pub win_amount: f64,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct RevealTrace {
    pub step_ms: f64,
    pub frames: Vec<FrameDigest>,
    /// Oldest first.
    pub history: Vec<CommittedDigest>,
}

impl RevealTrace {
    /// Frames on which a history commit landed.
    pub fn commit_frames(&self) -> Vec<u32> {
        let mut previous = 0;
        self.frames
            .iter()
            .filter_map(|digest| {
                let committed = digest.history_len > previous;
                previous = digest.history_len;
                committed.then_some(digest.frame)
            })
            .collect()
    }

    /// Frames where the phase changed, a pulse fired or a commit landed.
    pub fn highlights(&self) -> Vec<String> {
        let mut lines = Vec::new();
        let mut last_phase: Option<Option<Phase>> = None;
        let mut last_history = 0;
        for digest in &self.frames {
            let changed = last_phase != Some(digest.phase)
                || !digest.pulses.is_empty()
                || digest.history_len != last_history;
            last_phase = Some(digest.phase);
            last_history = digest.history_len;
            if !changed {
                continue;
            }
            let pulses: Vec<&str> = digest.pulses.iter().map(|pulse| pulse.label()).collect();
            lines.push(format!(
                "frame {}: {} pulses=[{}] counter={} readout='{}' busy={} history={}",
                digest.frame,
                digest.phase.map_or("idle", Phase::label),
                pulses.join(","),
                digest.counter,
                digest.readout,
                digest.busy,
                digest.history_len,
            ));
        }
        lines
    }
}

/// Drives a stage at a fixed frame step until every scheduled reveal has
/// been fired and committed.
pub fn run_headless(
    config: RevealConfig,
    reveals: &[ScheduledReveal],
    step_ms: f64,
) -> RevealResult<RevealTrace> {
    if !step_ms.is_finite() || step_ms <= 0.0 {
        return Err(RevealError::InvalidConfig(format!(
            "frame step must be positive, got {step_ms}"
        )));
    }
    config
        .validate()
        .map_err(|err| RevealError::InvalidConfig(err.to_string()))?;

    if let Some(bad) = reveals.iter().find(|reveal| !reveal.at_ms.is_finite()) {
        return Err(RevealError::InvalidConfig(format!(
            "reveal time must be finite, got {}",
            bad.at_ms
        )));
    }

    let mut schedule = reveals.to_vec();
    schedule.sort_by(|a, b| a.at_ms.total_cmp(&b.at_ms));
    let mut schedule = schedule.into_iter().peekable();

    let speed = SpeedSetting::new(config.speed_mode);
    let mut stage = RevealStage::new(config, speed, RecordingHaptics::default());
    let mut frames = Vec::new();

    for frame in 0..MAX_HEADLESS_FRAMES {
        let now = f64::from(frame) * step_ms;
        while let Some(next) = schedule.next_if(|reveal| reveal.at_ms <= now) {
            stage.reveal(next.multiplier, next.bet_amount, now)?;
        }
        stage.frame(now);

        let token = stage.token().frame();
        frames.push(FrameDigest {
            frame,
            time_ms: now,
            phase: token.pose.map(|pose| pose.phase),
            token_x: token.pose.map(|pose| pose.x.round() as i64),
            counter: stage.counter().display(),
            readout: stage.readout().label(),
            busy: stage.is_busy(),
            history_len: stage.history().len(),
            pulses: std::mem::take(&mut stage.haptics_mut().pulses),
        });

        if schedule.peek().is_none() && !stage.is_busy() {
            break;
        }
    }
    if schedule.peek().is_some() || stage.is_busy() {
        return Err(RevealError::IncompleteRun {
            frames: MAX_HEADLESS_FRAMES,
        });
    }

    let history = stage
        .history()
        .in_commit_order()
        .map(|entry| CommittedDigest {
            multiplier: entry.multiplier,
            bet_amount: entry.bet_amount,
            win_amount: entry.win_amount,
        })
        .collect();

    Ok(RevealTrace {
        step_ms,
        frames,
        history,
    })
}
