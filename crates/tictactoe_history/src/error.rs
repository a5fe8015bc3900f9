//! Error types for the session controller.

use crate::position::Position;
use derive_more::{Display, Error};
use tracing::instrument;

/// Why a move was ignored.
///
/// Illegal moves are not errors: the controller drops them without touching
/// state and reports the reason so callers can log it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Display)]
pub enum IllegalMove {
    /// The current snapshot already has a completed line.
    #[display("Game is already won")]
    GameWon,
    /// The current snapshot is full with no winner.
    #[display("Game ended in a draw")]
    GameDrawn,
    /// The chosen square already holds a mark.
    #[display("Square {} is already occupied", _0)]
    SquareOccupied(Position),
    /// The index does not name a square.
    #[display("Position {} out of bounds (must be 0-8)", _0)]
    OutOfBounds(usize),
}

/// Specific history error conditions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Display)]
pub enum HistoryErrorKind {
    /// Jump target outside `0..len`.
    #[display("Move {} is outside history of length {}", requested, len)]
    InvalidIndex {
        /// The requested move number.
        requested: usize,
        /// History length at the time of the request.
        len: usize,
    },
}

/// History error with location tracking.
#[derive(Debug, Clone, Display, Error)]
#[display("History error: {} at {}:{}", kind, file, line)]
pub struct HistoryError {
    /// What went wrong.
    pub kind: HistoryErrorKind,
    /// Line number where error occurred.
    pub line: u32,
    /// Source file where error occurred.
    pub file: &'static str,
}

impl HistoryError {
    /// Creates a new history error with caller location tracking.
    #[track_caller]
    #[instrument]
    pub fn new(kind: HistoryErrorKind) -> Self {
        let loc = std::panic::Location::caller();
        Self {
            kind,
            line: loc.line(),
            file: loc.file(),
        }
    }

    /// Shorthand for [`HistoryErrorKind::InvalidIndex`].
    #[track_caller]
    pub fn invalid_index(requested: usize, len: usize) -> Self {
        Self::new(HistoryErrorKind::InvalidIndex { requested, len })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_history_error_records_caller() {
        let err = HistoryError::invalid_index(99, 3);
        assert_eq!(
            err.kind,
            HistoryErrorKind::InvalidIndex {
                requested: 99,
                len: 3
            }
        );
        assert!(err.file.ends_with("error.rs"));
        assert!(
            err.to_string()
                .starts_with("History error: Move 99 is outside history of length 3")
        );
    }

    #[test]
    fn test_illegal_move_messages() {
        assert_eq!(
            IllegalMove::SquareOccupied(Position::Center).to_string(),
            "Square Center is already occupied"
        );
        assert_eq!(
            IllegalMove::OutOfBounds(12).to_string(),
            "Position 12 out of bounds (must be 0-8)"
        );
    }
}
