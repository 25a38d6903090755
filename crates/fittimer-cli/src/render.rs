use fittimer_core::timer::format_clock;
use fittimer_core::{EngineStatus, Event, IntervalEngine, TimerSnapshot};

/// Writes engine output to stdout, either as JSON lines or a compact view.
#[derive(Debug, Clone, Copy)]
pub struct Renderer {
    pub json: bool,
}

impl Renderer {
    pub fn new(json: bool) -> Self {
        Self { json }
    }

    /// Print the events of one command or tick, followed by a snapshot.
    pub fn show(&self, engine: &IntervalEngine, events: &[Event]) -> Result<(), serde_json::Error> {
        if self.json {
            for event in events {
                println!("{}", serde_json::to_string(event)?);
            }
            println!("{}", serde_json::to_string(&engine.snapshot_event())?);
            return Ok(());
        }

        for event in events {
            if let Some(line) = describe(event) {
                println!("{line}");
            }
        }
        if !engine.is_completed() {
            println!("{}", status_line(&engine.snapshot()));
        }
        Ok(())
    }
}

fn describe(event: &Event) -> Option<String> {
    match event {
        Event::TimerStarted { .. } => Some("> started".into()),
        Event::TimerPaused { .. } => Some("|| paused".into()),
        Event::TimerReset { .. } => Some("<< reset".into()),
        Event::PhaseChanged { to, current_cycle, .. } => {
            Some(format!("-- {} (round {current_cycle}) --", to.label()))
        }
        Event::SessionCompleted { summary, .. } => Some(format!(
            "Session complete: {} rounds of {}s/{}s in {}",
            summary.total_cycles,
            summary.work_duration_secs,
            summary.rest_duration_secs,
            format_clock(summary.total_duration_secs),
        )),
        Event::CueRequested { .. } | Event::StateSnapshot { .. } => None,
    }
}

pub fn status_line(snap: &TimerSnapshot) -> String {
    let marker = match snap.status {
        EngineStatus::Running => " ",
        EngineStatus::Idle => "~",
        EngineStatus::Completed => "#",
    };
    format!(
        "{marker} {:<7} {:>5}  round {}/{}  {} left ({:.0}%)",
        snap.phase.label(),
        format_clock(snap.phase_remaining_secs),
        snap.current_cycle,
        snap.total_cycles,
        format_clock(snap.total_remaining_secs),
        snap.total_progress_pct,
    )
}
