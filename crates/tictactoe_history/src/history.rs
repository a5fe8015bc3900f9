//! History entries and how the move list is presented.

use crate::position::Position;
use crate::types::{Board, Location, Player};
use derive_getters::Getters;
use derive_new::new;
use serde::{Deserialize, Serialize};

/// One snapshot in the session history.
///
/// Entry 0 is always the empty board with no location; every later entry
/// records the cell that was filled to reach it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Getters, new)]
pub struct HistoryEntry {
    /// Board after the move.
    board: Board,
    /// Where the move was played, `None` for the initial entry.
    location: Option<Location>,
}

impl HistoryEntry {
    /// The initial entry: empty board, no move.
    pub fn start() -> Self {
        Self::new(Board::new(), None)
    }

    /// Entry produced by `player` marking `pos` on top of `previous`.
    pub fn after(previous: &Board, pos: Position, player: Player) -> Self {
        Self::new(previous.with_mark(pos, player), Some(Location::from(pos)))
    }

    /// "game start" for the initial entry, "move #N at (row, col)" otherwise.
    pub fn description(&self, move_number: usize) -> String {
        match self.location {
            None => "game start".to_string(),
            Some(location) => format!("move #{} at {}", move_number, location),
        }
    }

    /// Label for an entry the player can jump to.
    pub fn label(&self, move_number: usize) -> String {
        format!("Go to {}", self.description(move_number))
    }

    /// Label for the entry the pointer currently rests on.
    pub fn current_label(&self, move_number: usize) -> String {
        format!("You are at {}", self.description(move_number))
    }
}

/// Order in which the move list is shown. Never reorders the history itself.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SortOrder {
    /// Game start first.
    #[default]
    Ascending,
    /// Latest move first.
    Descending,
}

impl SortOrder {
    /// The other order.
    pub fn toggle(self) -> Self {
        match self {
            Self::Ascending => Self::Descending,
            Self::Descending => Self::Ascending,
        }
    }

    /// Caption for the toggle control.
    pub fn label(self) -> &'static str {
        match self {
            Self::Ascending => "Ascending order",
            Self::Descending => "Descending order",
        }
    }
}

/// A row of the rendered move list.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Getters, new)]
pub struct MoveListItem {
    /// Index into the history; the target of a jump.
    move_number: usize,
    /// Text to show for this row.
    label: String,
    /// Whether the pointer rests on this entry.
    is_current: bool,
}
