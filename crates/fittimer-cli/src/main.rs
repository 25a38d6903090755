use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

mod bell;
mod clock;
mod commands;
mod render;

#[derive(Parser)]
#[command(name = "fittimer", version, about = "Workout interval timer")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Run a live session (stdin: p = start/pause, r = reset, q = quit)
    Run(commands::run::RunArgs),
    /// Run a session instantly and print the event timeline
    Simulate(commands::simulate::SimulateArgs),
    /// Show the resolved session without running it
    Plan(commands::SessionArgs),
    /// Step the stored session setup up or down
    Setup(commands::setup::SetupArgs),
    /// Configuration management
    Config {
        #[command(subcommand)]
        action: commands::config::ConfigAction,
    },
}

fn init_tracing() {
    let filter = EnvFilter::try_from_env("FITTIMER_LOG").unwrap_or_else(|_| EnvFilter::new("warn"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn main() {
    init_tracing();

    let cli = Cli::parse();
    let result = match cli.command {
        Commands::Run(args) => commands::run::run(args),
        Commands::Simulate(args) => commands::simulate::run(args),
        Commands::Plan(args) => commands::plan::run(args),
        Commands::Setup(args) => commands::setup::run(args),
        Commands::Config { action } => commands::config::run(action),
    };

    if let Err(e) = result {
        eprintln!("error: {e}");
        std::process::exit(1);
    }
}
