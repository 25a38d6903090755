use serde::{Deserialize, Serialize};

use crate::error::ValidationError;

/// Which half of a cycle is counting down.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Phase {
    Work,
    Rest,
}

impl Phase {
    pub fn label(self) -> &'static str {
        match self {
            Phase::Work => "WORKOUT",
            Phase::Rest => "BREAK",
        }
    }
}

/// Session lengths, all in whole seconds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SessionConfig {
    pub total_duration_secs: u64,
    pub work_duration_secs: u64,
    pub rest_duration_secs: u64,
}

impl SessionConfig {
    pub fn new(total_duration_secs: u64, work_duration_secs: u64, rest_duration_secs: u64) -> Self {
        Self {
            total_duration_secs,
            work_duration_secs,
            rest_duration_secs,
        }
    }

    /// Length of the given phase.
    pub fn phase_duration_secs(&self, phase: Phase) -> u64 {
        match phase {
            Phase::Work => self.work_duration_secs,
            Phase::Rest => self.rest_duration_secs,
        }
    }

    fn validate(&self) -> Result<(), ValidationError> {
        let fields = [
            ("total_duration_secs", self.total_duration_secs),
            ("work_duration_secs", self.work_duration_secs),
            ("rest_duration_secs", self.rest_duration_secs),
        ];
        for (field, value) in fields {
            if value == 0 {
                return Err(ValidationError::InvalidConfiguration { field, value });
            }
        }
        Ok(())
    }
}

/// Live countdown values. Owned by the engine; hosts only see copies.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct TimerState {
    pub phase: Phase,
    pub phase_remaining_secs: u64,
    /// 1-indexed; bumps on every Rest -> Work boundary.
    pub current_cycle: u64,
    pub total_remaining_secs: u64,
    pub running: bool,
}

/// Everything derivable from a [`SessionConfig`] before the first tick.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResolvedSession {
    pub config: SessionConfig,
    pub cycle_duration_secs: u64,
    /// Number of full work+rest pairs that fit. Zero when a single cycle
    /// is longer than the session.
    pub total_cycles: u64,
    pub initial_state: TimerState,
}

/// Validate `config` and derive the cycle constants and initial state.
///
/// # Errors
///
/// Returns [`ValidationError::InvalidConfiguration`] naming the first
/// duration that is zero.
pub fn resolve(config: SessionConfig) -> Result<ResolvedSession, ValidationError> {
    config.validate()?;

    let cycle_duration_secs = config
        .work_duration_secs
        .saturating_add(config.rest_duration_secs);
    let total_cycles = config.total_duration_secs / cycle_duration_secs;

    Ok(ResolvedSession {
        config,
        cycle_duration_secs,
        total_cycles,
        initial_state: TimerState {
            phase: Phase::Work,
            phase_remaining_secs: config.work_duration_secs,
            current_cycle: 1,
            total_remaining_secs: config.total_duration_secs,
            running: false,
        },
    })
}
