use anyhow::Result;
use clap::{Parser, Subcommand};
use tracing_subscriber::{EnvFilter, FmtSubscriber};

use highway_cli::commands::inspect::{handle_inspect, InspectArgs};
use highway_cli::commands::run::{handle_run, RunArgs};
use highway_cli::GlobalOptions;

#[derive(Parser, Debug)]
#[command(author, version, about = "Highway station registry and path planner")]
struct Cli {
    #[command(flatten)]
    global: GlobalOptions,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Execute a command script and print one response per command.
    Run(RunArgs),
    /// Replay a script and print the resulting stations and tree shape.
    Inspect(InspectArgs),
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.global.log_level.as_deref());

    match &cli.command {
        Command::Run(args) => handle_run(&cli.global, args),
        Command::Inspect(args) => handle_inspect(&cli.global, args),
    }
}

/// Logs go to stderr so stdout carries only command responses.
fn init_tracing(level: Option<&str>) {
    let env_filter = match level {
        Some(level) => EnvFilter::new(level),
        None => EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
    };
    let subscriber = FmtSubscriber::builder()
        .with_env_filter(env_filter)
        .with_writer(std::io::stderr)
        .finish();

    let _ = tracing::subscriber::set_global_default(subscriber);
}
