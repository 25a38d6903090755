//! Audio cue policy.
//!
//! The engine only decides *which* cue a tick requests. Turning a cue into
//! sound is the job of a [`CueSink`]; failures there are logged and dropped
//! so they can never stall or corrupt the countdown.

use serde::{Deserialize, Serialize};

use super::session::TimerState;
use crate::error::AudioError;
use crate::events::Event;

/// Seconds-remaining values (at tick start) that request a countdown cue.
pub const COUNTDOWN_WINDOW: std::ops::RangeInclusive<u64> = 2..=4;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Cue {
    /// Soft, low tone in the last seconds before a phase boundary.
    Countdown,
    /// High tone at every phase boundary and at session completion.
    Transition,
}

/// The cue a running tick requests, given the state at the start of that tick.
///
/// `final_tick` is set when this tick ends the session.
pub fn cue_for_tick(state: &TimerState, final_tick: bool) -> Option<Cue> {
    if final_tick || state.phase_remaining_secs <= 1 {
        Some(Cue::Transition)
    } else if COUNTDOWN_WINDOW.contains(&state.phase_remaining_secs) {
        Some(Cue::Countdown)
    } else {
        None
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Waveform {
    Sine,
    Square,
    Triangle,
}

/// Parameters an audio collaborator needs to synthesize a beep.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ToneSpec {
    pub frequency_hz: u32,
    pub duration_ms: u32,
    /// Starting gain, 0.0 .. 1.0. Decays to silence over `duration_ms`.
    pub gain: f32,
    pub waveform: Waveform,
}

impl ToneSpec {
    pub const fn sine(frequency_hz: u32) -> Self {
        Self {
            frequency_hz,
            duration_ms: 200,
            gain: 0.3,
            waveform: Waveform::Sine,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ToneSet {
    pub countdown: ToneSpec,
    pub transition: ToneSpec,
}

impl ToneSet {
    pub fn tone_for(&self, cue: Cue) -> &ToneSpec {
        match cue {
            Cue::Countdown => &self.countdown,
            Cue::Transition => &self.transition,
        }
    }
}

impl Default for ToneSet {
    fn default() -> Self {
        Self {
            countdown: ToneSpec::sine(440),
            transition: ToneSpec::sine(880),
        }
    }
}

/// An audio collaborator. Implementations must not block for the length of
/// the tone.
pub trait CueSink {
    fn play(&mut self, cue: Cue, tone: &ToneSpec) -> Result<(), AudioError>;
}

/// Sink that discards every cue. Used when audio is disabled.
#[derive(Debug, Default, Clone, Copy)]
pub struct SilentSink;

impl CueSink for SilentSink {
    fn play(&mut self, _cue: Cue, _tone: &ToneSpec) -> Result<(), AudioError> {
        Ok(())
    }
}

/// Forwards `CueRequested` events to a sink, swallowing its failures.
#[derive(Debug, Clone, Default)]
pub struct CueDispatcher {
    tones: ToneSet,
}

impl CueDispatcher {
    pub fn new(tones: ToneSet) -> Self {
        Self { tones }
    }

    pub fn tones(&self) -> &ToneSet {
        &self.tones
    }

    /// Play every cue found in `events`. Returns how many played cleanly.
    pub fn dispatch<S: CueSink + ?Sized>(&self, sink: &mut S, events: &[Event]) -> usize {
        let mut played = 0;
        for event in events {
            if let Event::CueRequested { cue, .. } = event {
                match sink.play(*cue, self.tones.tone_for(*cue)) {
                    Ok(()) => played += 1,
                    Err(e) => tracing::debug!(?cue, error = %e, "audio cue dropped"),
                }
            }
        }
        played
    }
}
