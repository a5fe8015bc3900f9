//! Tic-tac-toe with move history.
//!
//! Two layers:
//!
//! - **Rules** ([`evaluate`], [`is_draw`]): pure functions of a board snapshot.
//! - **Session** ([`GameSession`]): the history of snapshots, a pointer into
//!   it, and the operations that play a move, jump, or reset.
//!
//! # Example
//!
//! ```
//! use tictactoe_history::{GameSession, Player};
//!
//! let mut session = GameSession::new();
//! for cell in [0, 4, 1, 5, 2] {
//!     session.apply_move(cell);
//! }
//! assert_eq!(session.status().winner(), Some(Player::X));
//!
//! // Rewind and play a different second move; the old future is discarded.
//! session.jump_to(1).unwrap();
//! session.apply_move(8);
//! assert_eq!(session.len(), 3);
//! ```

#![warn(missing_docs)]
#![forbid(unsafe_code)]

mod error;
mod history;
mod invariants;
mod position;
pub mod rules;
mod session;
mod types;

pub use error::{HistoryError, HistoryErrorKind, IllegalMove};
pub use history::{HistoryEntry, MoveListItem, SortOrder};
pub use invariants::{
    Invariant, InvariantSet, InvariantViolation, NoMovesAfterWin, PointerInRange,
    SessionInvariants, SingleMarkPerEntry, StartsEmpty,
};
pub use position::{Direction, Position};
pub use rules::{LINES, WinResult, evaluate, is_draw, is_full};
pub use session::{GameSession, MoveOutcome, Phase, Status};
pub use types::{Board, BoardParseError, Location, Player, Square};
