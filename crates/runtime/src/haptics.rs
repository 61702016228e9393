use std::time::Duration;

use rodio::source::SineWave;
use rodio::{OutputStream, OutputStreamHandle, Sink, Source};
use tracing::info;
use win_reveal::{
    HapticError, HapticPulse, HapticSink, ImpactStyle, NotificationKind, SilentHaptics,
};

/// Tone used to stand in for one pulse on desktop hosts.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct PulseTone {
    pub frequency_hz: f32,
    pub duration: Duration,
    pub volume: f32,
}

impl PulseTone {
    pub fn for_pulse(pulse: HapticPulse) -> Self {
        let (frequency_hz, millis, volume) = match pulse {
            HapticPulse::Impact(ImpactStyle::Light) => (440.0, 18, 0.10),
            HapticPulse::Impact(ImpactStyle::Medium) => (330.0, 40, 0.18),
            HapticPulse::Impact(ImpactStyle::Heavy) => (220.0, 60, 0.25),
            HapticPulse::Impact(ImpactStyle::Soft) => (520.0, 25, 0.08),
            HapticPulse::Notification(NotificationKind::Success) => (660.0, 120, 0.20),
        };
        Self {
            frequency_hz,
            duration: Duration::from_millis(millis),
            volume,
        }
    }
}

/// Haptic sink that plays each pulse as a short tone through `rodio`.
///
/// The output stream lives on rodio's own thread; each pulse gets a detached
/// sink so overlapping pulses mix instead of queueing.
pub struct RodioHaptics {
    _stream: OutputStream,
    stream_handle: OutputStreamHandle,
}

impl RodioHaptics {
    pub fn new() -> Result<Self, HapticError> {
        let (stream, stream_handle) = OutputStream::try_default()
            .map_err(|e| HapticError::Unavailable(format!("no audio output: {e}")))?;
        Ok(Self {
            _stream: stream,
            stream_handle,
        })
    }
}

impl HapticSink for RodioHaptics {
    fn pulse(&mut self, pulse: HapticPulse) -> Result<(), HapticError> {
        let tone = PulseTone::for_pulse(pulse);
        let sink = Sink::try_new(&self.stream_handle)
            .map_err(|e| HapticError::Unavailable(format!("failed to create pulse sink: {e}")))?;
        let source = SineWave::new(tone.frequency_hz)
            .take_duration(tone.duration)
            .amplify(tone.volume);
        sink.append(source);
        sink.detach();
        Ok(())
    }
}

/// Rodio tones when an output device exists, silence otherwise.
pub fn auto_haptics() -> Box<dyn HapticSink> {
    match RodioHaptics::new() {
        Ok(backend) => {
            info!("haptics: using rodio tones");
            Box::new(backend)
        }
        Err(err) => {
            info!(%err, "haptics: rodio unavailable, using silent sink");
            Box::new(SilentHaptics)
        }
    }
}
