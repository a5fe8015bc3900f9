//! Game session controller.
//!
//! A [`GameSession`] owns the ordered history of board snapshots and a
//! pointer into it. Whose turn it is and whether the game is over are always
//! derived from the snapshot under the pointer, never stored.

use crate::error::{HistoryError, IllegalMove};
use crate::history::{HistoryEntry, MoveListItem, SortOrder};
use crate::invariants::{InvariantSet, SessionInvariants};
use crate::position::Position;
use crate::rules::{WinResult, evaluate, is_draw, is_full};
use crate::types::{Board, Location, Player};
use derive_getters::Getters;
use derive_new::new;
use serde::Serialize;
use tracing::{debug, info, instrument, warn};

/// Where the game stands at the current pointer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum Phase {
    /// No completed line and at least one empty square.
    InProgress,
    /// A line is complete.
    Won(WinResult),
    /// Board full, no line complete.
    Drawn,
}

/// Snapshot of the derived game status.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Getters, new)]
pub struct Status {
    /// Player who would move next from this position.
    mover: Player,
    /// Terminal or in-progress state of the current snapshot.
    phase: Phase,
}

impl Status {
    /// Winner, if the current snapshot is won.
    pub fn winner(&self) -> Option<Player> {
        match self.phase {
            Phase::Won(win) => Some(*win.winner()),
            _ => None,
        }
    }

    /// The three winning cells, if any.
    pub fn winning_line(&self) -> Option<[Position; 3]> {
        match self.phase {
            Phase::Won(win) => Some(*win.line()),
            _ => None,
        }
    }

    /// Board full without a winner.
    pub fn is_draw(&self) -> bool {
        matches!(self.phase, Phase::Drawn)
    }

    /// Won or drawn.
    pub fn is_over(&self) -> bool {
        !matches!(self.phase, Phase::InProgress)
    }
}

impl std::fmt::Display for Status {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self.phase {
            Phase::InProgress => write!(f, "Next player: {}", self.mover),
            Phase::Won(win) => write!(f, "Winner: {}", win.winner()),
            Phase::Drawn => write!(f, "Draw"),
        }
    }
}

/// Result of [`GameSession::apply_move`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MoveOutcome {
    /// The move was recorded as a new history entry.
    Applied {
        /// Who moved.
        player: Player,
        /// Where, 1-indexed.
        location: Location,
    },
    /// Nothing changed.
    Ignored(IllegalMove),
}

impl MoveOutcome {
    /// Whether the move changed the session.
    pub fn is_applied(&self) -> bool {
        matches!(self, MoveOutcome::Applied { .. })
    }
}

/// One game with navigable history.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct GameSession {
    history: Vec<HistoryEntry>,
    pointer: usize,
    sort_order: SortOrder,
}

impl GameSession {
    /// Creates a session at the empty board.
    #[instrument]
    pub fn new() -> Self {
        Self {
            history: vec![HistoryEntry::start()],
            pointer: 0,
            sort_order: SortOrder::default(),
        }
    }

    /// Sets the initial move-list order.
    pub fn with_sort_order(mut self, sort_order: SortOrder) -> Self {
        self.sort_order = sort_order;
        self
    }

    /// Builds a session by applying `cells` in order from the empty board.
    ///
    /// Ignored moves are skipped, exactly as interactive play would.
    #[instrument(skip(cells))]
    pub fn replay(cells: impl IntoIterator<Item = usize>) -> Self {
        let mut session = Self::new();
        for cell in cells {
            session.apply_move(cell);
        }
        session
    }

    /// All entries, oldest first.
    pub fn history(&self) -> &[HistoryEntry] {
        &self.history
    }

    /// Index of the entry being shown.
    pub fn pointer(&self) -> usize {
        self.pointer
    }

    /// Number of history entries, including the initial one.
    pub fn len(&self) -> usize {
        self.history.len()
    }

    /// Always false: a session holds at least the initial entry.
    pub fn is_empty(&self) -> bool {
        self.history.is_empty()
    }

    /// Whether the pointer is on the newest entry.
    pub fn is_at_latest(&self) -> bool {
        self.pointer + 1 == self.history.len()
    }

    /// The entry under the pointer.
    pub fn current_entry(&self) -> &HistoryEntry {
        &self.history[self.pointer]
    }

    /// Board under the pointer.
    pub fn current_board(&self) -> &Board {
        self.current_entry().board()
    }

    /// Player to move from the current pointer.
    pub fn mover(&self) -> Player {
        Player::to_move_at(self.pointer)
    }

    /// Move-list display order.
    pub fn sort_order(&self) -> SortOrder {
        self.sort_order
    }

    /// Flips the move-list display order. History is untouched.
    #[instrument(skip(self))]
    pub fn toggle_sort_order(&mut self) -> SortOrder {
        self.sort_order = self.sort_order.toggle();
        debug!(sort_order = ?self.sort_order, "Sort order toggled");
        self.sort_order
    }

    /// Derives status from the current snapshot.
    pub fn status(&self) -> Status {
        let board = self.current_board();
        let phase = match evaluate(board) {
            Some(win) => Phase::Won(win),
            None if is_full(board) => Phase::Drawn,
            None => Phase::InProgress,
        };
        Status::new(self.mover(), phase)
    }

    /// Checks whether the current player may mark `index`.
    fn check_move(&self, index: usize) -> Result<Position, IllegalMove> {
        let pos = Position::from_index(index).ok_or(IllegalMove::OutOfBounds(index))?;
        let board = self.current_board();

        if evaluate(board).is_some() {
            return Err(IllegalMove::GameWon);
        }
        if is_draw(board) {
            return Err(IllegalMove::GameDrawn);
        }
        if !board.is_empty(index) {
            return Err(IllegalMove::SquareOccupied(pos));
        }
        Ok(pos)
    }

    /// Plays the current mover at `index`.
    ///
    /// Any entries after the pointer are discarded before the new entry is
    /// appended, so playing from an earlier position rewrites the future.
    /// Illegal moves leave the session untouched.
    #[instrument(skip(self), fields(pointer = self.pointer, len = self.history.len()))]
    pub fn apply_move(&mut self, index: usize) -> MoveOutcome {
        let pos = match self.check_move(index) {
            Ok(pos) => pos,
            Err(reason) => {
                debug!(%reason, "Ignoring move");
                return MoveOutcome::Ignored(reason);
            }
        };

        let player = self.mover();
        let entry = HistoryEntry::after(self.current_board(), pos, player);
        let discarded = self.history.len() - (self.pointer + 1);
        if discarded > 0 {
            debug!(discarded, "Discarding entries after pointer");
        }
        self.history.truncate(self.pointer + 1);
        self.history.push(entry);
        self.pointer = self.history.len() - 1;

        debug_assert!(
            SessionInvariants::check_all(self).is_ok(),
            "session invariants violated after move: {:?}",
            SessionInvariants::check_all(self)
        );

        let location = Location::from(pos);
        info!(%player, %location, move_number = self.pointer, "Move applied");
        MoveOutcome::Applied { player, location }
    }

    /// Moves the pointer to history entry `move_number` without touching history.
    #[instrument(skip(self), fields(len = self.history.len()))]
    pub fn jump_to(&mut self, move_number: usize) -> Result<(), HistoryError> {
        if move_number >= self.history.len() {
            warn!(move_number, "Rejecting jump outside history");
            return Err(HistoryError::invalid_index(move_number, self.history.len()));
        }
        self.pointer = move_number;
        info!(move_number, "Jumped");
        Ok(())
    }

    /// Moves the pointer one entry back. Returns false at game start.
    pub fn step_back(&mut self) -> bool {
        match self.pointer.checked_sub(1) {
            Some(target) => self.jump_to(target).is_ok(),
            None => false,
        }
    }

    /// Moves the pointer one entry forward. Returns false at the newest entry.
    pub fn step_forward(&mut self) -> bool {
        !self.is_at_latest() && self.jump_to(self.pointer + 1).is_ok()
    }

    /// Discards everything and returns to the empty board.
    ///
    /// The sort order is a display preference and survives the reset.
    #[instrument(skip(self), fields(len = self.history.len()))]
    pub fn reset(&mut self) {
        self.history = vec![HistoryEntry::start()];
        self.pointer = 0;
        info!("Session reset");
    }

    /// Rows for the move list, ordered by [`SortOrder`].
    pub fn move_list(&self) -> Vec<MoveListItem> {
        let items = self.history.iter().enumerate().map(|(n, entry)| {
            let is_current = n == self.pointer;
            let label = if is_current {
                entry.current_label(n)
            } else {
                entry.label(n)
            };
            MoveListItem::new(n, label, is_current)
        });
        match self.sort_order {
            SortOrder::Ascending => items.collect(),
            SortOrder::Descending => items.rev().collect(),
        }
    }

    #[cfg(test)]
    pub(crate) fn from_parts(history: Vec<HistoryEntry>, pointer: usize) -> Self {
        Self {
            history,
            pointer,
            sort_order: SortOrder::default(),
        }
    }
}

impl Default for GameSession {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_session_starts_empty() {
        let session = GameSession::new();
        assert_eq!(session.len(), 1);
        assert_eq!(session.pointer(), 0);
        assert_eq!(session.current_board(), &Board::new());
        assert_eq!(session.mover(), Player::X);
        assert_eq!(session.status().to_string(), "Next player: X");
    }

    #[test]
    fn test_moves_alternate() {
        let mut session = GameSession::new();
        assert_eq!(
            session.apply_move(4),
            MoveOutcome::Applied {
                player: Player::X,
                location: Location { row: 2, col: 2 }
            }
        );
        assert_eq!(session.mover(), Player::O);
        assert_eq!(
            session.apply_move(0),
            MoveOutcome::Applied {
                player: Player::O,
                location: Location { row: 1, col: 1 }
            }
        );
        assert_eq!(session.mover(), Player::X);
    }

    #[test]
    fn test_occupied_square_ignored() {
        let mut session = GameSession::replay([4]);
        let before = session.clone();
        assert_eq!(
            session.apply_move(4),
            MoveOutcome::Ignored(IllegalMove::SquareOccupied(Position::Center))
        );
        assert_eq!(session, before);
    }

    #[test]
    fn test_out_of_bounds_ignored() {
        let mut session = GameSession::new();
        assert_eq!(
            session.apply_move(9),
            MoveOutcome::Ignored(IllegalMove::OutOfBounds(9))
        );
        assert_eq!(session.len(), 1);
    }

    #[test]
    fn test_move_after_win_ignored() {
        let mut session = GameSession::replay([0, 4, 1, 5, 2]);
        assert_eq!(session.status().winner(), Some(Player::X));
        let before = session.clone();
        assert_eq!(
            session.apply_move(8),
            MoveOutcome::Ignored(IllegalMove::GameWon)
        );
        assert_eq!(session, before);
    }

    #[test]
    fn test_status_reports_win_and_line() {
        let session = GameSession::replay([0, 4, 1, 5, 2]);
        let status = session.status();
        assert!(status.is_over());
        assert!(!status.is_draw());
        assert_eq!(
            status.winning_line(),
            Some([Position::TopLeft, Position::TopCenter, Position::TopRight])
        );
        assert_eq!(status.to_string(), "Winner: X");
    }

    #[test]
    fn test_jump_then_move_truncates() {
        let mut session = GameSession::replay([0, 1, 2, 3, 4]);
        assert_eq!(session.len(), 6);

        session.jump_to(2).unwrap();
        assert_eq!(session.pointer(), 2);
        assert_eq!(session.len(), 6);
        assert_eq!(session.current_board().to_string(), "XO./.../...");

        assert!(session.apply_move(5).is_applied());
        assert_eq!(session.len(), 4);
        assert_eq!(session.pointer(), 3);
        assert_eq!(session.current_board().to_string(), "XO./..X/...");
    }

    #[test]
    fn test_jump_out_of_range_rejected() {
        let mut session = GameSession::replay([0, 1]);
        let err = session.jump_to(99).unwrap_err();
        assert_eq!(
            err.kind,
            crate::HistoryErrorKind::InvalidIndex {
                requested: 99,
                len: 3
            }
        );
        assert_eq!(session.pointer(), 2);
    }

    #[test]
    fn test_step_back_and_forward() {
        let mut session = GameSession::replay([0, 1]);
        assert!(!session.step_forward());
        assert!(session.step_back());
        assert!(session.step_back());
        assert!(!session.step_back());
        assert_eq!(session.pointer(), 0);
        assert!(session.step_forward());
        assert_eq!(session.pointer(), 1);
        assert_eq!(session.len(), 3);
    }

    #[test]
    fn test_reset_keeps_sort_order() {
        let mut session = GameSession::replay([0, 1, 2]).with_sort_order(SortOrder::Descending);
        session.reset();
        assert_eq!(session.history(), &[HistoryEntry::start()]);
        assert_eq!(session.pointer(), 0);
        assert_eq!(session.sort_order(), SortOrder::Descending);
    }

    #[test]
    fn test_move_list_respects_sort_order() {
        let mut session = GameSession::replay([4, 0]);
        session.jump_to(1).unwrap();

        let labels: Vec<_> = session
            .move_list()
            .into_iter()
            .map(|item| item.label().clone())
            .collect();
        assert_eq!(
            labels,
            vec![
                "Go to game start",
                "You are at move #1 at (2, 2)",
                "Go to move #2 at (1, 1)",
            ]
        );

        let before = session.history().to_vec();
        session.toggle_sort_order();
        let numbers: Vec<_> = session
            .move_list()
            .iter()
            .map(|item| *item.move_number())
            .collect();
        assert_eq!(numbers, vec![2, 1, 0]);
        assert_eq!(session.history(), before.as_slice());
    }
}
