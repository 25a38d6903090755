pub mod config;
pub mod plan;
pub mod run;
pub mod setup;
pub mod simulate;

use clap::Args;
use fittimer_core::error::Result;
use fittimer_core::{Config, IntervalEngine, SessionConfig};

/// Session lengths; anything left out comes from `[session]` in the config.
#[derive(Args, Debug, Clone)]
pub struct SessionArgs {
    /// Total session length in minutes
    #[arg(long, conflicts_with = "total_secs")]
    pub total_minutes: Option<u64>,
    /// Total session length in seconds
    #[arg(long)]
    pub total_secs: Option<u64>,
    /// Work phase length in seconds
    #[arg(long)]
    pub work: Option<u64>,
    /// Rest phase length in seconds
    #[arg(long)]
    pub rest: Option<u64>,
}

impl SessionArgs {
    /// Overlay explicit flags on the configured defaults. Explicit values are
    /// not clamped; the resolver rejects zeros.
    pub fn session_config(&self, config: &Config) -> SessionConfig {
        let base = config.session_config();
        let total = match (self.total_secs, self.total_minutes) {
            (Some(secs), _) => secs,
            (None, Some(minutes)) => minutes.saturating_mul(60),
            (None, None) => base.total_duration_secs,
        };
        SessionConfig::new(
            total,
            self.work.unwrap_or(base.work_duration_secs),
            self.rest.unwrap_or(base.rest_duration_secs),
        )
    }
}

/// Load the config and build an idle engine for `args`.
pub fn build_engine(args: &SessionArgs) -> Result<(IntervalEngine, Config)> {
    let config = Config::load()?;
    let engine = IntervalEngine::new(args.session_config(&config))?;
    Ok((engine, config))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn args(total_minutes: Option<u64>, total_secs: Option<u64>, work: Option<u64>) -> SessionArgs {
        SessionArgs {
            total_minutes,
            total_secs,
            work,
            rest: None,
        }
    }

    #[test]
    fn flags_override_config() {
        let cfg = Config::default();
        let session = args(Some(10), None, Some(45)).session_config(&cfg);
        assert_eq!(session, SessionConfig::new(600, 45, 30));
    }

    #[test]
    fn seconds_take_priority() {
        let cfg = Config::default();
        let session = args(None, Some(95), None).session_config(&cfg);
        assert_eq!(session.total_duration_secs, 95);
    }

    #[test]
    fn defaults_come_from_config() {
        let cfg = Config::default();
        let session = args(None, None, None).session_config(&cfg);
        assert_eq!(session, SessionConfig::new(1200, 60, 30));
    }
}
