use std::time::Duration;

use clap::Args;
use fittimer_core::error::Result;
use fittimer_core::timer::SilentSink;
use fittimer_core::{CueDispatcher, CueSink, IntervalEngine};

use super::{build_engine, SessionArgs};
use crate::bell::TerminalBell;
use crate::clock::Host;
use crate::render::Renderer;

#[derive(Args, Debug)]
pub struct RunArgs {
    #[command(flatten)]
    pub session: SessionArgs,
    /// Wait for `p` before starting
    #[arg(long)]
    pub paused: bool,
    /// Disable audio cues
    #[arg(long)]
    pub mute: bool,
    /// Emit JSON lines instead of the text view
    #[arg(long)]
    pub json: bool,
    /// Milliseconds per tick (for demos and tests)
    #[arg(long, default_value_t = 1000, hide = true)]
    pub tick_ms: u64,
}

pub fn run(args: RunArgs) -> std::result::Result<(), Box<dyn std::error::Error>> {
    let (engine, config) = build_engine(&args.session)?;

    let sink: Box<dyn CueSink> = if args.mute || !config.audio.enabled {
        Box::new(SilentSink)
    } else {
        Box::new(TerminalBell::new())
    };
    let renderer = Renderer::new(args.json);
    let host = Host::new(
        engine,
        CueDispatcher::new(config.tone_set()),
        sink,
        renderer,
        Duration::from_millis(args.tick_ms.max(1)),
    );

    let rt = tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()?;

    let result = rt.block_on(drive(host, renderer, args.paused));
    // stdin is read on a blocking thread that may never return.
    rt.shutdown_timeout(Duration::from_millis(100));

    let engine = result?;
    if !engine.is_completed() {
        tracing::info!(
            remaining = engine.state().total_remaining_secs,
            "session stopped early"
        );
    }
    Ok(())
}

async fn drive(mut host: Host, renderer: Renderer, paused: bool) -> Result<IntervalEngine> {
    renderer.show(host.engine(), &[])?;
    if !paused {
        host.toggle()?;
    }
    host.run().await
}
