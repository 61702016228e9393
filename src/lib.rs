//! Frame-driven win reveal: a rolling token, a multiplier counter, a balance
//! readout and haptic pulses presenting one outcome, committed to history
//! once every widget has finished.

mod canvas;
mod config;
mod coordinator;
mod counter;
mod duration;
mod easing;
mod error;
mod haptics;
mod history;
mod outcome;
mod phase;
mod readout;
mod session;
mod stage;
mod timebase;
mod token;
mod trace;
mod widget;

pub use canvas::{
    background_tiles, BackgroundConfig, CanvasSize, REFERENCE_HEIGHT, REFERENCE_WIDTH,
};
pub use config::{ConfigError, RevealConfig};
pub use coordinator::{
    Admission, CommitReport, CompletionCoordinator, CoordinatorConfig, CoordinatorState,
    PendingResult,
};
pub use counter::{format_multiplier, CounterRamp};
pub use duration::{reveal_duration_ms, SpeedMode, SpeedSetting, TimingConfig};
pub use easing::{clamp_unit, lerp, Easing};
pub use error::{HapticError, RevealError, RevealResult};
pub use haptics::{
    HapticConfig, HapticPulse, HapticScheduler, HapticSink, ImpactStyle, NotificationKind,
    RecordingHaptics, SilentHaptics,
};
pub use history::{
    win_amount, HistoryConfig, HistoryEntry, HistoryLog, HistorySummary, MultiplierTier,
};
pub use outcome::{
    Outcome, OutcomeSource, ScriptedOutcomes, SteppedOutcomes, MAX_STEPPED_MULTIPLIER,
    MIN_STEPPED_MULTIPLIER,
};
pub use phase::{Phase, PhaseSplit, TokenConfig, TokenCurve, TokenPose};
pub use readout::{format_amount, DeltaReadout, ReadoutConfig, ReadoutState, ReadoutTone};
pub use session::AnimationSession;
pub use stage::{FrameReport, RevealStage};
pub use timebase::{frame_delta, Timebase, PROGRESS_EPSILON_MS};
pub use token::{TokenEngine, TokenFrame};
pub use trace::{
    run_headless, CommittedDigest, FrameDigest, RevealTrace, ScheduledReveal, MAX_HEADLESS_FRAMES,
};
pub use widget::{RevealAnimation, RevealRequest};
