use fittimer_core::timer::{format_clock, ResolvedSession};
use fittimer_core::{resolve, Config};
use serde::Serialize;

use super::SessionArgs;

#[derive(Debug, Serialize)]
struct Plan {
    #[serde(flatten)]
    resolved: ResolvedSession,
    total: String,
    cycle: String,
    /// Seconds left over after the last full cycle.
    remainder_secs: u64,
}

pub fn run(args: SessionArgs) -> Result<(), Box<dyn std::error::Error>> {
    let config = Config::load()?;
    let resolved = resolve(args.session_config(&config))?;
    let plan = Plan {
        total: format_clock(resolved.config.total_duration_secs),
        cycle: format_clock(resolved.cycle_duration_secs),
        remainder_secs: resolved.config.total_duration_secs % resolved.cycle_duration_secs,
        resolved,
    };
    println!("{}", serde_json::to_string_pretty(&plan)?);
    Ok(())
}
