//! First-class invariants for a game session.
//!
//! Each invariant is a named predicate over [`GameSession`]. The controller
//! checks the full set after every mutation in debug builds, and tests can
//! check them against hand-built sessions.

use crate::position::Position;
use crate::rules::evaluate;
use crate::session::GameSession;
use crate::types::{Board, Location, Player, Square};

/// A logical property that must hold for a given state.
pub trait Invariant<S> {
    /// Checks if the invariant holds for the given state.
    fn holds(state: &S) -> bool;

    /// Human-readable description of the invariant.
    fn description() -> &'static str;
}

/// Violation of an invariant.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InvariantViolation {
    /// Description of the violated invariant.
    pub description: String,
}

impl InvariantViolation {
    /// Creates a new invariant violation.
    pub fn new(description: impl Into<String>) -> Self {
        Self {
            description: description.into(),
        }
    }
}

/// A set of invariants that can be checked together.
pub trait InvariantSet<S> {
    /// Checks all invariants in the set, collecting every violation.
    fn check_all(state: &S) -> Result<(), Vec<InvariantViolation>>;
}

macro_rules! impl_invariant_set {
    ($($inv:ident),+) => {
        impl<S, $($inv),+> InvariantSet<S> for ($($inv,)+)
        where
            $($inv: Invariant<S>),+
        {
            fn check_all(state: &S) -> Result<(), Vec<InvariantViolation>> {
                let violations: Vec<_> = [$(($inv::holds(state), $inv::description())),+]
                    .into_iter()
                    .filter(|(holds, _)| !holds)
                    .map(|(_, description)| InvariantViolation::new(description))
                    .collect();
                if violations.is_empty() {
                    Ok(())
                } else {
                    Err(violations)
                }
            }
        }
    };
}

impl_invariant_set!(I1, I2);
impl_invariant_set!(I1, I2, I3);
impl_invariant_set!(I1, I2, I3, I4);

/// Entry 0 is the empty board with no location.
pub struct StartsEmpty;

impl Invariant<GameSession> for StartsEmpty {
    fn holds(session: &GameSession) -> bool {
        session
            .history()
            .first()
            .is_some_and(|entry| *entry.board() == Board::new() && entry.location().is_none())
    }

    fn description() -> &'static str {
        "History starts with the empty board"
    }
}

/// Each entry adds exactly one mark for the right player, and records where.
pub struct SingleMarkPerEntry;

impl Invariant<GameSession> for SingleMarkPerEntry {
    fn holds(session: &GameSession) -> bool {
        session
            .history()
            .windows(2)
            .enumerate()
            .all(|(i, pair)| {
                let (prev, next) = (&pair[0], &pair[1]);
                let entry = i + 1;
                match prev.board().diff(next.board()).as_slice() {
                    [cell] => {
                        prev.board().get(*cell) == Some(Square::Empty)
                            && next.board().get(*cell)
                                == Some(Square::Occupied(Player::for_entry(entry)))
                            && *next.location()
                                == Position::from_index(*cell).map(Location::from)
                    }
                    _ => false,
                }
            })
    }

    fn description() -> &'static str {
        "Each entry adds one mark for the player whose turn it was"
    }
}

/// A won snapshot is always the last entry.
pub struct NoMovesAfterWin;

impl Invariant<GameSession> for NoMovesAfterWin {
    fn holds(session: &GameSession) -> bool {
        let history = session.history();
        history
            .iter()
            .take(history.len().saturating_sub(1))
            .all(|entry| evaluate(entry.board()).is_none())
    }

    fn description() -> &'static str {
        "No move follows a winning position"
    }
}

/// The pointer names an existing entry.
pub struct PointerInRange;

impl Invariant<GameSession> for PointerInRange {
    fn holds(session: &GameSession) -> bool {
        session.pointer() < session.len()
    }

    fn description() -> &'static str {
        "Pointer is within history"
    }
}

/// All session invariants as a composable set.
pub type SessionInvariants = (StartsEmpty, SingleMarkPerEntry, NoMovesAfterWin, PointerInRange);
