//! tictactoe - play, rewind and replay tic-tac-toe in the terminal.

use anyhow::Result;
use clap::Parser;
use tictactoe_tui::{Cli, Command, PlayArgs, TuiConfig, logging, replay, terminal};
use tracing::info;

fn main() -> Result<()> {
    // Load .env file
    dotenvy::dotenv().ok();

    let cli = Cli::parse();

    match cli.command.unwrap_or_default() {
        Command::Play(args) => run_play(args),
        Command::Replay { cells, jump, json } => run_replay(&cells, jump, json),
    }
}

/// Run the interactive UI
fn run_play(args: PlayArgs) -> Result<()> {
    let config = TuiConfig::for_play(&args)?;
    logging::init_file(config.log_file())?;
    info!(?config, "Configuration resolved");
    terminal::run_tui(&config)
}

/// Replay moves and print the result
fn run_replay(cells: &[usize], jump: Option<usize>, json: bool) -> Result<()> {
    logging::init_stderr();
    let report = replay(cells, jump)?;
    if json {
        println!("{}", report.to_json()?);
    } else {
        print!("{}", report.to_text());
    }
    Ok(())
}
