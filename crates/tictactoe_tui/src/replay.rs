//! Non-interactive replay: apply moves, optionally jump, report the session.

use anyhow::Result;
use serde::Serialize;
use std::fmt::Write;
use tictactoe_history::{GameSession, MoveListItem, MoveOutcome, Player};
use tracing::{info, instrument};

/// A move that was dropped during replay.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct IgnoredMove {
    /// The requested cell index.
    pub cell: usize,
    /// Why it was dropped.
    pub reason: String,
}

/// Everything the replay command reports.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ReplayReport {
    /// Board under the pointer in compact notation.
    pub board: String,
    /// Status text ("Next player: X", "Winner: O", "Draw").
    pub status: String,
    /// Winner, if any.
    pub winner: Option<Player>,
    /// Winning cell indices, if any.
    pub winning_line: Option<[usize; 3]>,
    /// Whether the position is drawn.
    pub is_draw: bool,
    /// Pointer into the history.
    pub pointer: usize,
    /// Move list rows.
    pub moves: Vec<MoveListItem>,
    /// Moves that were ignored.
    pub ignored: Vec<IgnoredMove>,
    #[serde(skip)]
    grid: String,
}

/// Applies `cells` to a fresh session, then jumps to `jump` if given.
///
/// An out-of-range jump is an error.
#[instrument]
pub fn replay(cells: &[usize], jump: Option<usize>) -> Result<ReplayReport> {
    let mut session = GameSession::new();
    let mut ignored = Vec::new();
    for &cell in cells {
        if let MoveOutcome::Ignored(reason) = session.apply_move(cell) {
            ignored.push(IgnoredMove {
                cell,
                reason: reason.to_string(),
            });
        }
    }
    if let Some(target) = jump {
        session.jump_to(target)?;
    }
    info!(len = session.len(), ignored = ignored.len(), "Replay finished");

    let status = session.status();
    Ok(ReplayReport {
        board: session.current_board().to_string(),
        status: status.to_string(),
        winner: status.winner(),
        winning_line: status.winning_line().map(|line| line.map(|pos| pos.to_index())),
        is_draw: status.is_draw(),
        pointer: session.pointer(),
        moves: session.move_list(),
        ignored,
        grid: session.current_board().display(),
    })
}

impl ReplayReport {
    /// Plain-text rendering.
    pub fn to_text(&self) -> String {
        let mut out = String::new();
        let _ = writeln!(out, "{}\n", self.grid);
        let _ = writeln!(out, "{}", self.status);
        for ignored in &self.ignored {
            let _ = writeln!(out, "Ignored cell {}: {}", ignored.cell, ignored.reason);
        }
        let _ = writeln!(out, "\nMoves:");
        for item in &self.moves {
            let marker = if *item.is_current() { ">" } else { " " };
            let _ = writeln!(out, "{} {}", marker, item.label());
        }
        out
    }

    /// Pretty JSON rendering.
    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }
}
