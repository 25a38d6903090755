use clap::Args;
use fittimer_core::timer::format_clock;
use fittimer_core::{Cue, Event, IntervalEngine};

use super::{build_engine, SessionArgs};

#[derive(Args, Debug)]
pub struct SimulateArgs {
    #[command(flatten)]
    pub session: SessionArgs,
    /// Print every event as a JSON line instead of a summary
    #[arg(long)]
    pub json: bool,
    /// Include a state snapshot after every tick (with --json)
    #[arg(long, requires = "json")]
    pub snapshots: bool,
}

/// Counts gathered while running a session to completion.
#[derive(Debug, Default, PartialEq, Eq)]
pub struct Timeline {
    pub ticks: u64,
    pub phase_changes: u64,
    pub countdown_cues: u64,
    pub transition_cues: u64,
    pub final_cycle: u64,
}

/// Tick `engine` until it completes, handing each tick's events to `sink`.
pub fn simulate<F>(engine: &mut IntervalEngine, mut sink: F) -> Timeline
where
    F: FnMut(u64, &IntervalEngine, &[Event]),
{
    let mut timeline = Timeline::default();
    if !engine.is_running() {
        engine.toggle();
    }
    while engine.is_running() {
        let events = engine.tick();
        timeline.ticks += 1;
        for event in &events {
            match event {
                Event::PhaseChanged { .. } => timeline.phase_changes += 1,
                Event::CueRequested { cue: Cue::Countdown, .. } => timeline.countdown_cues += 1,
                Event::CueRequested { cue: Cue::Transition, .. } => timeline.transition_cues += 1,
                _ => {}
            }
        }
        timeline.final_cycle = engine.state().current_cycle;
        sink(timeline.ticks, &*engine, &events);
    }
    timeline
}

pub fn run(args: SimulateArgs) -> Result<(), Box<dyn std::error::Error>> {
    let (mut engine, _) = build_engine(&args.session)?;

    if args.json {
        let mut failure = None;
        let timeline = simulate(&mut engine, |_, engine, events| {
            let snapshot = engine.snapshot_event();
            let mut lines: Vec<&Event> = events.iter().collect();
            if args.snapshots {
                lines.push(&snapshot);
            }
            for event in lines {
                match serde_json::to_string(event) {
                    Ok(json) => println!("{json}"),
                    Err(e) => failure = Some(e),
                }
            }
        });
        if let Some(e) = failure {
            return Err(e.into());
        }
        tracing::debug!(ticks = timeline.ticks, "simulation finished");
        return Ok(());
    }

    let summary = engine.summary();
    let timeline = simulate(&mut engine, |_, _, _| {});
    println!(
        "{} rounds of {}s work / {}s rest",
        summary.total_cycles, summary.work_duration_secs, summary.rest_duration_secs
    );
    println!("ticks:            {} ({})", timeline.ticks, format_clock(timeline.ticks));
    println!("phase changes:    {}", timeline.phase_changes);
    println!("countdown cues:   {}", timeline.countdown_cues);
    println!("transition cues:  {}", timeline.transition_cues);
    Ok(())
}
