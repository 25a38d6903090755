//! Interval engine implementation.
//!
//! The engine is a pure state machine advanced one whole second at a time.
//! It does not use internal threads or read the clock - the host owns the
//! one-per-second clock and calls `tick()` only while the engine is running.
//!
//! ## State Transitions
//!
//! ```text
//! Idle <-> Running -> Completed
//!   ^__________________|  (reset)
//! ```
//!
//! ## Usage
//!
//! ```ignore
//! let mut engine = IntervalEngine::new(SessionConfig::new(90, 20, 10))?;
//! engine.toggle();
//! // Once per second, while engine.is_running():
//! let events = engine.tick();
//! ```

use chrono::Utc;
use serde::{Deserialize, Serialize};

use super::cue::{cue_for_tick, Cue};
use super::session::{resolve, Phase, ResolvedSession, SessionConfig, TimerState};
use crate::error::ValidationError;
use crate::events::Event;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EngineStatus {
    Idle,
    Running,
    Completed,
}

/// What a host shows for the finished session.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SessionSummary {
    pub total_duration_secs: u64,
    pub total_cycles: u64,
    pub work_duration_secs: u64,
    pub rest_duration_secs: u64,
}

/// Read-only view of the engine for presentation layers.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TimerSnapshot {
    pub status: EngineStatus,
    pub phase: Phase,
    pub phase_remaining_secs: u64,
    pub phase_duration_secs: u64,
    pub current_cycle: u64,
    pub total_cycles: u64,
    pub total_remaining_secs: u64,
    pub total_duration_secs: u64,
    pub phase_progress_pct: f64,
    pub total_progress_pct: f64,
}

/// Core interval engine.
///
/// Owns the countdown exclusively; every mutation goes through
/// [`toggle`](Self::toggle), [`tick`](Self::tick) or [`reset`](Self::reset).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct IntervalEngine {
    session: ResolvedSession,
    state: TimerState,
    completed: bool,
}

impl IntervalEngine {
    /// Create an engine in the `Idle` state.
    ///
    /// # Errors
    ///
    /// Returns [`ValidationError::InvalidConfiguration`] if any duration is
    /// zero; no engine is constructed in that case.
    pub fn new(config: SessionConfig) -> Result<Self, ValidationError> {
        Ok(Self::from_resolved(resolve(config)?))
    }

    pub fn from_resolved(session: ResolvedSession) -> Self {
        Self {
            state: session.initial_state,
            session,
            completed: false,
        }
    }

    // ── Queries ──────────────────────────────────────────────────────

    pub fn state(&self) -> TimerState {
        self.state
    }

    pub fn status(&self) -> EngineStatus {
        if self.completed {
            EngineStatus::Completed
        } else if self.state.running {
            EngineStatus::Running
        } else {
            EngineStatus::Idle
        }
    }

    pub fn is_running(&self) -> bool {
        self.status() == EngineStatus::Running
    }

    pub fn is_completed(&self) -> bool {
        self.completed
    }

    pub fn config(&self) -> &SessionConfig {
        &self.session.config
    }

    pub fn session(&self) -> &ResolvedSession {
        &self.session
    }

    pub fn total_cycles(&self) -> u64 {
        self.session.total_cycles
    }

    /// Full length of the phase currently counting down.
    pub fn phase_duration_secs(&self) -> u64 {
        self.session.config.phase_duration_secs(self.state.phase)
    }

    /// 0.0 .. 100.0 progress within the current phase.
    pub fn phase_progress_pct(&self) -> f64 {
        let total = self.phase_duration_secs();
        if total == 0 {
            return 0.0;
        }
        let elapsed = total.saturating_sub(self.state.phase_remaining_secs);
        elapsed as f64 / total as f64 * 100.0
    }

    /// 0.0 .. 100.0 progress across the whole session.
    pub fn total_progress_pct(&self) -> f64 {
        let total = self.session.config.total_duration_secs;
        if total == 0 {
            return 0.0;
        }
        let elapsed = total.saturating_sub(self.state.total_remaining_secs);
        elapsed as f64 / total as f64 * 100.0
    }

    pub fn summary(&self) -> SessionSummary {
        let config = &self.session.config;
        SessionSummary {
            total_duration_secs: config.total_duration_secs,
            total_cycles: self.session.total_cycles,
            work_duration_secs: config.work_duration_secs,
            rest_duration_secs: config.rest_duration_secs,
        }
    }

    pub fn snapshot(&self) -> TimerSnapshot {
        TimerSnapshot {
            status: self.status(),
            phase: self.state.phase,
            phase_remaining_secs: self.state.phase_remaining_secs,
            phase_duration_secs: self.phase_duration_secs(),
            current_cycle: self.state.current_cycle,
            total_cycles: self.session.total_cycles,
            total_remaining_secs: self.state.total_remaining_secs,
            total_duration_secs: self.session.config.total_duration_secs,
            phase_progress_pct: self.phase_progress_pct(),
            total_progress_pct: self.total_progress_pct(),
        }
    }

    /// Build a full state snapshot event.
    pub fn snapshot_event(&self) -> Event {
        Event::StateSnapshot {
            snapshot: self.snapshot(),
            at: Utc::now(),
        }
    }

    // ── Commands ─────────────────────────────────────────────────────

    /// Start or pause tick consumption. Ignored once completed.
    pub fn toggle(&mut self) -> Option<Event> {
        if self.completed {
            return None;
        }
        self.state.running = !self.state.running;
        let s = &self.state;
        if s.running {
            Some(Event::TimerStarted {
                phase: s.phase,
                current_cycle: s.current_cycle,
                phase_remaining_secs: s.phase_remaining_secs,
                total_remaining_secs: s.total_remaining_secs,
                at: Utc::now(),
            })
        } else {
            Some(Event::TimerPaused {
                phase_remaining_secs: s.phase_remaining_secs,
                total_remaining_secs: s.total_remaining_secs,
                at: Utc::now(),
            })
        }
    }

    /// Consume one elapsed second.
    ///
    /// Returns the cue request (if any) followed by a `PhaseChanged` or
    /// `SessionCompleted` event when the tick crosses a boundary. Returns
    /// nothing and mutates nothing unless the engine is running.
    pub fn tick(&mut self) -> Vec<Event> {
        if !self.is_running() {
            return Vec::new();
        }

        let mut events = Vec::with_capacity(2);
        let at = Utc::now();
        let final_tick = self.is_final_tick();
        if let Some(cue) = cue_for_tick(&self.state, final_tick) {
            events.push(Event::CueRequested { cue, at });
        }

        if final_tick {
            self.complete();
            tracing::info!(cycles = self.session.total_cycles, "session completed");
            events.push(Event::SessionCompleted {
                summary: self.summary(),
                at,
            });
            return events;
        }

        let new_total_remaining = self.state.total_remaining_secs - 1;

        if self.state.phase_remaining_secs <= 1 {
            let from = self.state.phase;
            match from {
                Phase::Work => {
                    self.state.phase = Phase::Rest;
                    self.state.phase_remaining_secs = self.session.config.rest_duration_secs;
                }
                Phase::Rest => {
                    self.state.phase = Phase::Work;
                    self.state.phase_remaining_secs = self.session.config.work_duration_secs;
                    self.state.current_cycle += 1;
                }
            }
            self.state.total_remaining_secs = new_total_remaining;
            tracing::debug!(
                ?from,
                to = ?self.state.phase,
                cycle = self.state.current_cycle,
                "phase changed"
            );
            events.push(Event::PhaseChanged {
                from,
                to: self.state.phase,
                current_cycle: self.state.current_cycle,
                phase_duration_secs: self.state.phase_remaining_secs,
                at,
            });
            return events;
        }

        self.state.phase_remaining_secs -= 1;
        self.state.total_remaining_secs = new_total_remaining;
        events
    }

    /// Return to the freshly constructed state. Allowed from any status.
    pub fn reset(&mut self) -> Event {
        self.state = self.session.initial_state;
        self.completed = false;
        tracing::info!("timer reset");
        Event::TimerReset { at: Utc::now() }
    }

    /// The cue the next tick would request, if the engine is running.
    pub fn pending_cue(&self) -> Option<Cue> {
        if self.is_running() {
            cue_for_tick(&self.state, self.is_final_tick())
        } else {
            None
        }
    }

    // ── Internal ─────────────────────────────────────────────────────

    /// The next tick ends the session: the last second is being consumed,
    /// or not even one full cycle fits.
    fn is_final_tick(&self) -> bool {
        self.state.total_remaining_secs <= 1 || self.session.total_cycles == 0
    }

    fn complete(&mut self) {
        self.state.running = false;
        self.state.total_remaining_secs = 0;
        self.state.phase_remaining_secs = 0;
        self.completed = true;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn running(total: u64, work: u64, rest: u64) -> IntervalEngine {
        let mut engine = IntervalEngine::new(SessionConfig::new(total, work, rest)).unwrap();
        engine.toggle();
        engine
    }

    fn cues(events: &[Event]) -> Vec<Cue> {
        events
            .iter()
            .filter_map(|e| match e {
                Event::CueRequested { cue, .. } => Some(*cue),
                _ => None,
            })
            .collect()
    }

    #[test]
    fn new_engine_is_idle() {
        let engine = IntervalEngine::new(SessionConfig::new(90, 20, 10)).unwrap();
        assert_eq!(engine.status(), EngineStatus::Idle);
        assert_eq!(engine.state(), engine.session().initial_state);
    }

    #[test]
    fn invalid_config_constructs_nothing() {
        let err = IntervalEngine::new(SessionConfig::new(90, 0, 10)).unwrap_err();
        assert!(matches!(
            err,
            ValidationError::InvalidConfiguration { field: "work_duration_secs", .. }
        ));
    }

    #[test]
    fn double_toggle_returns_to_idle_unchanged() {
        let mut engine = IntervalEngine::new(SessionConfig::new(90, 20, 10)).unwrap();
        let before = engine.state();
        assert!(matches!(engine.toggle(), Some(Event::TimerStarted { .. })));
        assert_eq!(engine.status(), EngineStatus::Running);
        assert!(matches!(engine.toggle(), Some(Event::TimerPaused { .. })));
        assert_eq!(engine.status(), EngineStatus::Idle);
        assert_eq!(engine.state(), before);
    }

    #[test]
    fn tick_while_idle_is_noop() {
        let mut engine = IntervalEngine::new(SessionConfig::new(90, 20, 10)).unwrap();
        let before = engine.state();
        assert!(engine.tick().is_empty());
        assert_eq!(engine.state(), before);
    }

    #[test]
    fn mid_phase_tick_decrements_both_counters() {
        let mut engine = running(90, 20, 10);
        let events = engine.tick();
        assert!(events.is_empty());
        let s = engine.state();
        assert_eq!(s.phase_remaining_secs, 19);
        assert_eq!(s.total_remaining_secs, 89);
        assert_eq!(s.phase, Phase::Work);
    }

    #[test]
    fn countdown_cue_at_three_seconds_left() {
        let mut engine = running(90, 20, 10);
        for _ in 0..17 {
            engine.tick();
        }
        assert_eq!(engine.state().phase_remaining_secs, 3);
        let events = engine.tick();
        assert_eq!(cues(&events), vec![Cue::Countdown]);
        assert_eq!(engine.state().phase_remaining_secs, 2);
        assert_eq!(engine.state().phase, Phase::Work);
    }

    #[test]
    fn work_to_rest_after_work_duration() {
        let mut engine = running(90, 20, 10);
        let mut last = Vec::new();
        for _ in 0..20 {
            last = engine.tick();
        }
        let s = engine.state();
        assert_eq!(s.phase, Phase::Rest);
        assert_eq!(s.phase_remaining_secs, 10);
        assert_eq!(s.current_cycle, 1);
        assert_eq!(s.total_remaining_secs, 70);
        assert_eq!(cues(&last), vec![Cue::Transition]);
        assert!(matches!(
            last.last(),
            Some(Event::PhaseChanged { from: Phase::Work, to: Phase::Rest, current_cycle: 1, .. })
        ));
    }

    #[test]
    fn rest_to_work_increments_cycle() {
        let mut engine = running(90, 20, 10);
        for _ in 0..30 {
            engine.tick();
        }
        let s = engine.state();
        assert_eq!(s.phase, Phase::Work);
        assert_eq!(s.current_cycle, 2);
        assert_eq!(s.phase_remaining_secs, 20);
        assert_eq!(s.total_remaining_secs, 60);
    }

    #[test]
    fn degenerate_schedule_completes_on_first_tick() {
        let mut engine = running(5, 20, 10);
        assert_eq!(engine.total_cycles(), 0);
        let events = engine.tick();
        assert_eq!(cues(&events), vec![Cue::Transition]);
        assert!(matches!(events.last(), Some(Event::SessionCompleted { .. })));
        assert_eq!(engine.status(), EngineStatus::Completed);
        assert_eq!(engine.state().total_remaining_secs, 0);
        assert_eq!(engine.state().phase_remaining_secs, 0);
        assert!(!engine.state().running);
    }

    #[test]
    fn full_session_completes_exactly_once() {
        let mut engine = running(90, 20, 10);
        let mut completions = 0;
        for _ in 0..200 {
            completions += engine
                .tick()
                .iter()
                .filter(|e| matches!(e, Event::SessionCompleted { .. }))
                .count();
        }
        assert_eq!(completions, 1);
        assert!(engine.is_completed());
    }

    #[test]
    fn completed_engine_ignores_toggle_and_tick() {
        let mut engine = running(3, 20, 10);
        while !engine.is_completed() {
            engine.tick();
        }
        let done = engine.state();
        assert!(engine.toggle().is_none());
        assert!(engine.tick().is_empty());
        assert_eq!(engine.state(), done);
        assert_eq!(engine.status(), EngineStatus::Completed);
    }

    #[test]
    fn reset_after_ticks_restores_initial_state() {
        let mut engine = running(90, 20, 10);
        for _ in 0..37 {
            engine.tick();
        }
        engine.reset();
        let s = engine.state();
        assert_eq!(s.current_cycle, 1);
        assert_eq!(s.phase, Phase::Work);
        assert_eq!(s.phase_remaining_secs, 20);
        assert_eq!(s.total_remaining_secs, 90);
        assert!(!s.running);
        assert_eq!(engine.status(), EngineStatus::Idle);
    }

    #[test]
    fn reset_from_completed_allows_a_new_run() {
        let mut engine = running(30, 10, 5);
        while !engine.is_completed() {
            engine.tick();
        }
        engine.reset();
        assert_eq!(engine.status(), EngineStatus::Idle);
        assert!(engine.toggle().is_some());
        assert!(engine.tick().is_empty());
        assert_eq!(engine.state().total_remaining_secs, 29);
    }

    #[test]
    fn partial_trailing_cycle_runs_until_total_expires() {
        // 2 full cycles (60s) plus 10s of a third work phase.
        let mut engine = running(70, 20, 10);
        for _ in 0..60 {
            engine.tick();
        }
        assert_eq!(engine.state().current_cycle, 3);
        assert_eq!(engine.state().phase, Phase::Work);
        for _ in 0..9 {
            assert!(!engine.tick().iter().any(|e| matches!(e, Event::SessionCompleted { .. })));
        }
        let last = engine.tick();
        assert!(matches!(last.last(), Some(Event::SessionCompleted { .. })));
    }

    #[test]
    fn progress_tracks_elapsed_time() {
        let mut engine = running(100, 20, 5);
        for _ in 0..10 {
            engine.tick();
        }
        assert!((engine.phase_progress_pct() - 50.0).abs() < 1e-9);
        assert!((engine.total_progress_pct() - 10.0).abs() < 1e-9);
    }

    #[test]
    fn snapshot_reflects_state() {
        let engine = IntervalEngine::new(SessionConfig::new(1200, 60, 30)).unwrap();
        let snap = engine.snapshot();
        assert_eq!(snap.status, EngineStatus::Idle);
        assert_eq!(snap.phase, Phase::Work);
        assert_eq!(snap.phase_remaining_secs, 60);
        assert_eq!(snap.phase_duration_secs, 60);
        assert_eq!(snap.total_cycles, 13);
        assert_eq!(snap.total_progress_pct, 0.0);
        match engine.snapshot_event() {
            Event::StateSnapshot { snapshot, .. } => assert_eq!(snapshot, snap),
            other => panic!("Expected StateSnapshot, got {other:?}"),
        }
    }

    #[test]
    fn pending_cue_only_while_running() {
        let mut engine = IntervalEngine::new(SessionConfig::new(10, 3, 2)).unwrap();
        // 2 cycles fit; first tick starts with 3s of work left.
        assert_eq!(engine.pending_cue(), None);
        engine.toggle();
        assert_eq!(engine.pending_cue(), Some(Cue::Countdown));
    }
}
