//! # FitTimer Core Library
//!
//! This library provides the core logic for the FitTimer workout-interval
//! timer. All behaviour lives here; the `fittimer` CLI is a thin host that
//! delivers clock ticks and plays cues.
//!
//! ## Architecture
//!
//! - **Interval Engine**: A pure state machine that alternates work and rest
//!   phases. The caller delivers one `tick()` per elapsed second.
//! - **Cue policy**: Decides when a tick requests a countdown or transition
//!   cue; an external [`CueSink`] realizes them.
//! - **Storage**: TOML-based configuration for session defaults and audio.
//!
//! ## Key Components
//!
//! - [`IntervalEngine`]: Core timer state machine
//! - [`resolve`]: Derives cycle constants and the initial state
//! - [`Config`]: Application configuration management

pub mod error;
pub mod events;
pub mod storage;
pub mod timer;

pub use error::{AudioError, ConfigError, CoreError, ValidationError};
pub use events::Event;
pub use storage::Config;
pub use timer::{
    resolve, Cue, CueDispatcher, CueSink, EngineStatus, IntervalEngine, Phase, SessionConfig,
    TimerSnapshot, TimerState,
};
