//! Command-line interface for the tictactoe binary.

use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;

/// Tic-tac-toe with move history
#[derive(Parser, Debug)]
#[command(name = "tictactoe")]
#[command(about = "Two-player tic-tac-toe with rewindable history", long_about = None)]
#[command(version)]
pub struct Cli {
    /// Subcommand to run (defaults to `play`)
    #[command(subcommand)]
    pub command: Option<Command>,
}

/// Available commands
#[derive(Subcommand, Debug, Clone, PartialEq, Eq)]
pub enum Command {
    /// Play in the terminal UI
    Play(PlayArgs),

    /// Apply a sequence of moves and print the resulting session
    Replay {
        /// Cell indices 0-8, row-major from the top-left
        #[arg(required = true)]
        cells: Vec<usize>,

        /// Jump to this move number after replaying
        #[arg(short, long)]
        jump: Option<usize>,

        /// Print JSON instead of text
        #[arg(long)]
        json: bool,
    },
}

impl Default for Command {
    fn default() -> Self {
        Command::Play(PlayArgs::default())
    }
}

/// Options for the interactive UI
#[derive(Args, Debug, Clone, Default, PartialEq, Eq)]
pub struct PlayArgs {
    /// Path to a TOML settings file (defaults to tictactoe.toml if present)
    #[arg(short, long)]
    pub config: Option<PathBuf>,

    /// Write logs here instead of the configured file
    #[arg(long)]
    pub log_file: Option<PathBuf>,

    /// Show the newest move first in the history panel
    #[arg(long)]
    pub descending: bool,

    /// Start with the history panel hidden
    #[arg(long)]
    pub hide_history: bool,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_no_subcommand_means_play() {
        let cli = Cli::try_parse_from(["tictactoe"]).unwrap();
        assert_eq!(cli.command.unwrap_or_default(), Command::default());
    }

    #[test]
    fn test_parse_replay() {
        let cli = Cli::try_parse_from(["tictactoe", "replay", "0", "4", "1", "--jump", "2", "--json"])
            .unwrap();
        assert_eq!(
            cli.command,
            Some(Command::Replay {
                cells: vec![0, 4, 1],
                jump: Some(2),
                json: true,
            })
        );
    }

    #[test]
    fn test_parse_play_flags() {
        let cli = Cli::try_parse_from(["tictactoe", "play", "--descending", "--hide-history"])
            .unwrap();
        let Some(Command::Play(args)) = cli.command else {
            panic!("expected play");
        };
        assert!(args.descending);
        assert!(args.hide_history);
        assert_eq!(args.config, None);
    }
}
