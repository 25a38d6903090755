mod cue;
mod engine;
mod session;
mod setup;

pub use cue::{
    cue_for_tick, Cue, CueDispatcher, CueSink, SilentSink, ToneSet, ToneSpec, Waveform,
    COUNTDOWN_WINDOW,
};
pub use engine::{EngineStatus, IntervalEngine, SessionSummary, TimerSnapshot};
pub use session::{resolve, Phase, ResolvedSession, SessionConfig, TimerState};
pub use setup::{Direction, SessionSetup, SetupField, Stepper};

/// Format seconds as `m:ss`.
pub fn format_clock(secs: u64) -> String {
    format!("{}:{:02}", secs / 60, secs % 60)
}
