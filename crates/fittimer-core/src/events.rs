use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::timer::{Cue, Phase, SessionSummary, TimerSnapshot};

/// Every state change in the engine produces an Event.
/// Hosts render snapshots; the audio collaborator consumes cue requests.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Event {
    TimerStarted {
        phase: Phase,
        current_cycle: u64,
        phase_remaining_secs: u64,
        total_remaining_secs: u64,
        at: DateTime<Utc>,
    },
    TimerPaused {
        phase_remaining_secs: u64,
        total_remaining_secs: u64,
        at: DateTime<Utc>,
    },
    /// A phase boundary was crossed during a tick.
    PhaseChanged {
        from: Phase,
        to: Phase,
        current_cycle: u64,
        phase_duration_secs: u64,
        at: DateTime<Utc>,
    },
    /// Fire-and-forget request for the audio collaborator.
    CueRequested {
        cue: Cue,
        at: DateTime<Utc>,
    },
    /// Emitted once, on the tick that brings the total to zero.
    SessionCompleted {
        summary: SessionSummary,
        at: DateTime<Utc>,
    },
    TimerReset {
        at: DateTime<Utc>,
    },
    StateSnapshot {
        snapshot: TimerSnapshot,
        at: DateTime<Utc>,
    },
}

impl Event {
    /// Short, stable name of the variant (matches the serialized `type` tag).
    pub fn kind(&self) -> &'static str {
        match self {
            Event::TimerStarted { .. } => "timer_started",
            Event::TimerPaused { .. } => "timer_paused",
            Event::PhaseChanged { .. } => "phase_changed",
            Event::CueRequested { .. } => "cue_requested",
            Event::SessionCompleted { .. } => "session_completed",
            Event::TimerReset { .. } => "timer_reset",
            Event::StateSnapshot { .. } => "state_snapshot",
        }
    }

    pub fn at(&self) -> DateTime<Utc> {
        match self {
            Event::TimerStarted { at, .. }
            | Event::TimerPaused { at, .. }
            | Event::PhaseChanged { at, .. }
            | Event::CueRequested { at, .. }
            | Event::SessionCompleted { at, .. }
            | Event::TimerReset { at }
            | Event::StateSnapshot { at, .. } => *at,
        }
    }
}
