//! Live tick delivery.
//!
//! The engine never reads the clock. This host owns the single
//! one-per-second subscription: it exists only while the engine is running
//! and is dropped on pause, reset and completion.

use std::time::Duration;

use fittimer_core::error::Result;
use fittimer_core::{CueDispatcher, CueSink, Event, IntervalEngine};
use tokio::io::{AsyncBufReadExt, BufReader};
use tokio::time::{interval_at, Instant, Interval, MissedTickBehavior};

use crate::render::Renderer;

/// Commands read from stdin, one per line.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Control {
    Toggle,
    Reset,
    Quit,
}

impl Control {
    pub fn parse(line: &str) -> Option<Self> {
        match line.trim().to_ascii_lowercase().as_str() {
            "p" | "pause" | "start" | "toggle" => Some(Control::Toggle),
            "r" | "reset" => Some(Control::Reset),
            "q" | "quit" | "exit" => Some(Control::Quit),
            _ => None,
        }
    }
}

pub struct Host {
    engine: IntervalEngine,
    dispatcher: CueDispatcher,
    sink: Box<dyn CueSink>,
    renderer: Renderer,
    period: Duration,
    clock: Option<Interval>,
}

impl Host {
    pub fn new(
        engine: IntervalEngine,
        dispatcher: CueDispatcher,
        sink: Box<dyn CueSink>,
        renderer: Renderer,
        period: Duration,
    ) -> Self {
        Self {
            engine,
            dispatcher,
            sink,
            renderer,
            period,
            clock: None,
        }
    }

    pub fn engine(&self) -> &IntervalEngine {
        &self.engine
    }

    /// Start delivery when the engine runs, stop it when it doesn't.
    /// Never holds more than one subscription.
    fn sync_clock(&mut self) {
        match (self.engine.is_running(), self.clock.is_some()) {
            (true, false) => {
                let mut interval = interval_at(Instant::now() + self.period, self.period);
                interval.set_missed_tick_behavior(MissedTickBehavior::Delay);
                self.clock = Some(interval);
            }
            (false, true) => self.clock = None,
            _ => {}
        }
    }

    fn emit(&mut self, events: &[Event]) -> Result<()> {
        self.dispatcher.dispatch(self.sink.as_mut(), events);
        self.renderer.show(&self.engine, events)?;
        Ok(())
    }

    pub fn toggle(&mut self) -> Result<()> {
        let events: Vec<Event> = self.engine.toggle().into_iter().collect();
        self.sync_clock();
        self.emit(&events)
    }

    fn on_tick(&mut self) -> Result<()> {
        let events = self.engine.tick();
        self.sync_clock();
        self.emit(&events)
    }

    /// Returns `false` when the session should end.
    fn on_control(&mut self, control: Control) -> Result<bool> {
        match control {
            Control::Toggle => self.toggle()?,
            Control::Reset => {
                let event = self.engine.reset();
                self.sync_clock();
                self.emit(&[event])?;
            }
            Control::Quit => return Ok(false),
        }
        Ok(true)
    }

    /// Drive the session until it completes, the user quits, or Ctrl-C.
    pub async fn run(mut self) -> Result<IntervalEngine> {
        let mut lines = BufReader::new(tokio::io::stdin()).lines();
        let mut stdin_open = true;
        let ctrl_c = tokio::signal::ctrl_c();
        tokio::pin!(ctrl_c);

        loop {
            if self.engine.is_completed() {
                break;
            }
            if !stdin_open && self.clock.is_none() {
                // Nothing can resume the session any more.
                tracing::warn!("input closed while paused, stopping");
                break;
            }

            tokio::select! {
                _ = next_tick(&mut self.clock) => self.on_tick()?,
                line = lines.next_line(), if stdin_open => match line? {
                    Some(line) => match Control::parse(&line) {
                        Some(control) => {
                            if !self.on_control(control)? {
                                break;
                            }
                        }
                        None if line.trim().is_empty() => {}
                        None => tracing::warn!(input = %line.trim(), "unknown command (p, r, q)"),
                    },
                    None => stdin_open = false,
                },
                _ = &mut ctrl_c => {
                    tracing::info!("interrupted");
                    break;
                }
            }
        }

        Ok(self.engine)
    }
}

async fn next_tick(clock: &mut Option<Interval>) {
    match clock {
        Some(interval) => {
            interval.tick().await;
        }
        None => std::future::pending::<()>().await,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use fittimer_core::timer::SilentSink;
    use fittimer_core::SessionConfig;

    fn host() -> Host {
        let engine = IntervalEngine::new(SessionConfig::new(90, 20, 10)).unwrap();
        Host::new(
            engine,
            CueDispatcher::default(),
            Box::new(SilentSink),
            Renderer::new(true),
            Duration::from_millis(5),
        )
    }

    #[test]
    fn control_parsing() {
        assert_eq!(Control::parse("p"), Some(Control::Toggle));
        assert_eq!(Control::parse(" R \n"), Some(Control::Reset));
        assert_eq!(Control::parse("quit"), Some(Control::Quit));
        assert_eq!(Control::parse("jump"), None);
    }

    #[tokio::test]
    async fn clock_follows_running_flag() {
        let mut host = host();
        assert!(host.clock.is_none());
        host.toggle().unwrap();
        assert!(host.clock.is_some());
        host.toggle().unwrap();
        assert!(host.clock.is_none());
    }

    #[tokio::test]
    async fn reset_stops_the_clock() {
        let mut host = host();
        host.toggle().unwrap();
        host.on_tick().unwrap();
        assert!(host.on_control(Control::Reset).unwrap());
        assert!(host.clock.is_none());
        assert_eq!(host.engine().state(), host.engine().session().initial_state);
    }

    #[tokio::test]
    async fn clock_drops_on_completion() {
        let engine = IntervalEngine::new(SessionConfig::new(3, 20, 10)).unwrap();
        let mut host = Host::new(
            engine,
            CueDispatcher::default(),
            Box::new(SilentSink),
            Renderer::new(true),
            Duration::from_millis(5),
        );
        host.toggle().unwrap();
        host.on_tick().unwrap();
        assert!(host.engine().is_completed());
        assert!(host.clock.is_none());
    }
}
