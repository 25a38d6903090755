//! Terminal realization of audio cues.

use std::io::{IsTerminal, Write};

use fittimer_core::timer::ToneSpec;
use fittimer_core::{AudioError, Cue, CueSink};

/// Rings the terminal bell on stderr. A terminal bell has no pitch, so
/// transitions ring twice.
pub struct TerminalBell {
    out: std::io::Stderr,
}

impl TerminalBell {
    pub fn new() -> Self {
        Self {
            out: std::io::stderr(),
        }
    }
}

impl Default for TerminalBell {
    fn default() -> Self {
        Self::new()
    }
}

impl CueSink for TerminalBell {
    fn play(&mut self, cue: Cue, tone: &ToneSpec) -> Result<(), AudioError> {
        if !self.out.is_terminal() {
            return Err(AudioError::Unavailable("stderr is not a terminal".into()));
        }
        if tone.gain <= 0.0 {
            return Ok(());
        }
        let rings = match cue {
            Cue::Countdown => "\x07",
            Cue::Transition => "\x07\x07",
        };
        let mut out = self.out.lock();
        out.write_all(rings.as_bytes())?;
        out.flush()?;
        Ok(())
    }
}
