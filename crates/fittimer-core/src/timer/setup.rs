//! Pre-session setup.
//!
//! Hosts adjust the three durations in fixed steps within fixed bounds before
//! building a [`SessionConfig`]. Totals are chosen in minutes, phases in
//! seconds.

use serde::{Deserialize, Serialize};

use super::session::SessionConfig;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SetupField {
    Total,
    Work,
    Rest,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Direction {
    Up,
    Down,
}

/// Inclusive bounds and step size for one adjustable field.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Stepper {
    pub min: u64,
    pub max: u64,
    pub step: u64,
}

impl Stepper {
    pub fn apply(&self, value: u64, direction: Direction) -> u64 {
        let next = match direction {
            Direction::Up => value.saturating_add(self.step),
            Direction::Down => value.saturating_sub(self.step),
        };
        self.clamp(next)
    }

    pub fn clamp(&self, value: u64) -> u64 {
        value.clamp(self.min, self.max)
    }
}

pub const TOTAL_MINUTES: Stepper = Stepper { min: 5, max: 60, step: 5 };
pub const WORK_SECS: Stepper = Stepper { min: 15, max: 120, step: 15 };
pub const REST_SECS: Stepper = Stepper { min: 10, max: 60, step: 10 };

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SessionSetup {
    #[serde(default = "default_total_minutes")]
    pub total_minutes: u64,
    #[serde(default = "default_work_secs")]
    pub work_secs: u64,
    #[serde(default = "default_rest_secs")]
    pub rest_secs: u64,
}

fn default_total_minutes() -> u64 {
    20
}
fn default_work_secs() -> u64 {
    60
}
fn default_rest_secs() -> u64 {
    30
}

impl Default for SessionSetup {
    fn default() -> Self {
        Self {
            total_minutes: default_total_minutes(),
            work_secs: default_work_secs(),
            rest_secs: default_rest_secs(),
        }
    }
}

impl SessionSetup {
    pub fn stepper(field: SetupField) -> Stepper {
        match field {
            SetupField::Total => TOTAL_MINUTES,
            SetupField::Work => WORK_SECS,
            SetupField::Rest => REST_SECS,
        }
    }

    pub fn value(&self, field: SetupField) -> u64 {
        match field {
            SetupField::Total => self.total_minutes,
            SetupField::Work => self.work_secs,
            SetupField::Rest => self.rest_secs,
        }
    }

    /// Move one field by its step, staying within bounds.
    pub fn adjust(&mut self, field: SetupField, direction: Direction) -> u64 {
        let next = Self::stepper(field).apply(self.value(field), direction);
        match field {
            SetupField::Total => self.total_minutes = next,
            SetupField::Work => self.work_secs = next,
            SetupField::Rest => self.rest_secs = next,
        }
        next
    }

    /// Copy with every field pulled into its bounds.
    pub fn clamped(&self) -> Self {
        Self {
            total_minutes: TOTAL_MINUTES.clamp(self.total_minutes),
            work_secs: WORK_SECS.clamp(self.work_secs),
            rest_secs: REST_SECS.clamp(self.rest_secs),
        }
    }

    pub fn to_session_config(&self) -> SessionConfig {
        SessionConfig::new(
            self.total_minutes.saturating_mul(60),
            self.work_secs,
            self.rest_secs,
        )
    }

    /// Cycles the resolver will derive for this setup.
    pub fn planned_cycles(&self) -> u64 {
        let cycle = self.work_secs.saturating_add(self.rest_secs);
        if cycle == 0 {
            return 0;
        }
        self.total_minutes.saturating_mul(60) / cycle
    }
}
