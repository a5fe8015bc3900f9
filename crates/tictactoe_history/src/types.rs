//! Core domain types for tic-tac-toe.

use crate::position::Position;
use derive_more::{Display, Error};
use serde::{Deserialize, Serialize};
use std::str::FromStr;
use tracing::instrument;

/// Player in the game.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Display)]
pub enum Player {
    /// Player X (goes first).
    X,
    /// Player O (goes second).
    O,
}

impl Player {
    /// Returns the opponent player.
    pub fn opponent(self) -> Self {
        match self {
            Player::X => Player::O,
            Player::O => Player::X,
        }
    }

    /// Returns the player whose turn it is when the history pointer is at `pointer`.
    ///
    /// Entry 0 is the empty board, so X moves from every even pointer.
    pub fn to_move_at(pointer: usize) -> Self {
        if pointer % 2 == 0 { Player::X } else { Player::O }
    }

    /// Returns the player who moved into history entry `entry` (`entry >= 1`).
    pub fn for_entry(entry: usize) -> Self {
        Self::to_move_at(entry + 1)
    }
}

/// A square on the tic-tac-toe board.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub enum Square {
    /// Empty square.
    #[default]
    Empty,
    /// Square occupied by a player.
    Occupied(Player),
}

impl Square {
    /// Returns the occupying player, if any.
    pub fn player(self) -> Option<Player> {
        match self {
            Square::Empty => None,
            Square::Occupied(player) => Some(player),
        }
    }

    /// Single-character rendering used by [`Board::display`] and the text codec.
    pub fn symbol(self) -> char {
        match self {
            Square::Empty => '.',
            Square::Occupied(Player::X) => 'X',
            Square::Occupied(Player::O) => 'O',
        }
    }
}

/// Immutable 3x3 board snapshot.
///
/// Moves never mutate a board; [`Board::with_mark`] returns the successor
/// snapshot so every history entry keeps its own copy.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Board {
    /// Squares in row-major order (0-8).
    squares: [Square; 9],
}

impl Board {
    /// Creates a new empty board.
    pub fn new() -> Self {
        Self {
            squares: [Square::Empty; 9],
        }
    }

    /// Creates a board from explicit squares.
    pub fn from_squares(squares: [Square; 9]) -> Self {
        Self { squares }
    }

    /// Gets the square at the given index (0-8).
    pub fn get(&self, index: usize) -> Option<Square> {
        self.squares.get(index).copied()
    }

    /// Gets the square at a typed position.
    pub fn square(&self, pos: Position) -> Square {
        self.squares[pos.to_index()]
    }

    /// Checks if the square at `index` is empty. Out-of-range indices are never empty.
    pub fn is_empty(&self, index: usize) -> bool {
        matches!(self.get(index), Some(Square::Empty))
    }

    /// Returns all squares as a slice.
    pub fn squares(&self) -> &[Square; 9] {
        &self.squares
    }

    /// Number of occupied squares.
    pub fn occupied_count(&self) -> usize {
        self.squares.iter().filter(|s| **s != Square::Empty).count()
    }

    /// Returns the successor snapshot with `player` placed at `pos`.
    ///
    /// The caller is responsible for checking that `pos` is empty.
    #[instrument(skip(self))]
    pub fn with_mark(&self, pos: Position, player: Player) -> Self {
        let mut squares = self.squares;
        squares[pos.to_index()] = Square::Occupied(player);
        Self { squares }
    }

    /// Indices at which `self` and `other` differ, ascending.
    pub fn diff(&self, other: &Board) -> Vec<usize> {
        self.squares
            .iter()
            .zip(other.squares.iter())
            .enumerate()
            .filter(|(_, (a, b))| a != b)
            .map(|(i, _)| i)
            .collect()
    }

    /// Formats the board as a human-readable string.
    ///
    /// Empty squares show their 1-based key so the grid doubles as a keypad hint.
    pub fn display(&self) -> String {
        let mut result = String::new();
        for row in 0..3 {
            for col in 0..3 {
                let pos = row * 3 + col;
                let symbol = match self.squares[pos] {
                    Square::Empty => (pos + 1).to_string(),
                    occupied => occupied.symbol().to_string(),
                };
                result.push_str(&symbol);
                if col < 2 {
                    result.push('|');
                }
            }
            if row < 2 {
                result.push_str("\n-+-+-\n");
            }
        }
        result
    }
}

impl Default for Board {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Display for Board {
    /// Compact `XO./...` notation, rows separated by `/`.
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        for (i, square) in self.squares.iter().enumerate() {
            if i > 0 && i % 3 == 0 {
                write!(f, "/")?;
            }
            write!(f, "{}", square.symbol())?;
        }
        Ok(())
    }
}

/// Error parsing a board from compact notation.
#[derive(Debug, Clone, PartialEq, Eq, Display, Error)]
pub enum BoardParseError {
    /// A character other than `X`, `O`, `.`, `-`, `/` or whitespace.
    #[display("Unexpected character {:?} in board", _0)]
    InvalidChar(#[error(not(source))] char),
    /// The notation did not contain exactly nine squares.
    #[display("Expected 9 squares, found {}", _0)]
    WrongLength(#[error(not(source))] usize),
}

impl FromStr for Board {
    type Err = BoardParseError;

    /// Parses `"XOX/XOO/OXX"`-style notation. `.` or `-` mark empty squares;
    /// `/` and whitespace are ignored.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let mut squares = Vec::with_capacity(9);
        for c in s.chars() {
            match c {
                'X' | 'x' => squares.push(Square::Occupied(Player::X)),
                'O' | 'o' => squares.push(Square::Occupied(Player::O)),
                '.' | '-' => squares.push(Square::Empty),
                '/' => {}
                c if c.is_whitespace() => {}
                other => return Err(BoardParseError::InvalidChar(other)),
            }
        }
        let squares: [Square; 9] = squares
            .try_into()
            .map_err(|v: Vec<Square>| BoardParseError::WrongLength(v.len()))?;
        Ok(Self { squares })
    }
}

/// 1-indexed row/column of a move, as shown to players.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Display)]
#[display("({row}, {col})")]
pub struct Location {
    /// Row, 1-3 from the top.
    pub row: u8,
    /// Column, 1-3 from the left.
    pub col: u8,
}

impl From<Position> for Location {
    fn from(pos: Position) -> Self {
        let index = pos.to_index();
        Self {
            row: (index / 3 + 1) as u8,
            col: (index % 3 + 1) as u8,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_turn_parity() {
        assert_eq!(Player::to_move_at(0), Player::X);
        assert_eq!(Player::to_move_at(1), Player::O);
        assert_eq!(Player::to_move_at(8), Player::X);
        assert_eq!(Player::for_entry(1), Player::X);
        assert_eq!(Player::for_entry(2), Player::O);
        assert_eq!(Player::for_entry(9), Player::X);
    }

    #[test]
    fn test_with_mark_leaves_original_untouched() {
        let board = Board::new();
        let next = board.with_mark(Position::Center, Player::X);
        assert_eq!(board, Board::new());
        assert_eq!(next.square(Position::Center), Square::Occupied(Player::X));
        assert_eq!(board.diff(&next), vec![4]);
    }

    #[test]
    fn test_parse_and_format() {
        let board: Board = "XOX/XOO/OXX".parse().unwrap();
        assert_eq!(board.to_string(), "XOX/XOO/OXX");
        assert_eq!(board.occupied_count(), 9);

        let board: Board = "x.. .o. ...".parse().unwrap();
        assert_eq!(board.to_string(), "X../.O./...");
    }

    #[test]
    fn test_parse_errors() {
        assert_eq!(
            "XOZ......".parse::<Board>(),
            Err(BoardParseError::InvalidChar('Z'))
        );
        assert_eq!(
            "XO".parse::<Board>(),
            Err(BoardParseError::WrongLength(2))
        );
    }

    #[test]
    fn test_display_grid() {
        let board: Board = "X../.O./...".parse().unwrap();
        assert_eq!(board.display(), "X|2|3\n-+-+-\n4|O|6\n-+-+-\n7|8|9");
    }

    #[test]
    fn test_location_is_one_indexed() {
        assert_eq!(Location::from(Position::TopLeft), Location { row: 1, col: 1 });
        assert_eq!(Location::from(Position::MiddleRight), Location { row: 2, col: 3 });
        assert_eq!(Location::from(Position::BottomCenter).to_string(), "(3, 2)");
    }
}
