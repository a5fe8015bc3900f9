//! Win detection logic for tic-tac-toe.

use crate::position::Position;
use crate::types::{Board, Player, Square};
use derive_getters::Getters;
use derive_new::new;
use serde::{Deserialize, Serialize};
use tracing::instrument;

/// The eight winning lines: rows, then columns, then diagonals.
pub const LINES: [[Position; 3]; 8] = [
    // Rows
    [Position::TopLeft, Position::TopCenter, Position::TopRight],
    [Position::MiddleLeft, Position::Center, Position::MiddleRight],
    [Position::BottomLeft, Position::BottomCenter, Position::BottomRight],
    // Columns
    [Position::TopLeft, Position::MiddleLeft, Position::BottomLeft],
    [Position::TopCenter, Position::Center, Position::BottomCenter],
    [Position::TopRight, Position::MiddleRight, Position::BottomRight],
    // Diagonals
    [Position::TopLeft, Position::Center, Position::BottomRight],
    [Position::TopRight, Position::Center, Position::BottomLeft],
];

/// A completed line: who owns it and which three cells form it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Getters, new)]
pub struct WinResult {
    /// The player holding all three cells.
    winner: Player,
    /// The cells of the line, in the order listed in [`LINES`].
    line: [Position; 3],
}

impl WinResult {
    /// The winning cells as board indices.
    pub fn indices(&self) -> [usize; 3] {
        self.line.map(Position::to_index)
    }

    /// Whether `pos` is part of the winning line.
    pub fn contains(&self, pos: Position) -> bool {
        self.line.contains(&pos)
    }
}

/// Checks every line and returns the first one held entirely by one player.
///
/// Only contrived boards can complete two lines for different players; the
/// fixed line order decides those.
#[instrument]
pub fn evaluate(board: &Board) -> Option<WinResult> {
    LINES.iter().find_map(|&[a, b, c]| {
        match (board.square(a), board.square(b), board.square(c)) {
            (Square::Occupied(p1), Square::Occupied(p2), Square::Occupied(p3))
                if p1 == p2 && p2 == p3 =>
            {
                Some(WinResult::new(p1, [a, b, c]))
            }
            _ => None,
        }
    })
}
