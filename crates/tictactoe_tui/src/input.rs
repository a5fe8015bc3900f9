//! Key decoding for keyboard navigation.

use crossterm::event::KeyCode;
use tictactoe_history::Direction;

/// Arrow key to grid direction.
pub fn direction_for(key: KeyCode) -> Option<Direction> {
    match key {
        KeyCode::Up => Some(Direction::Up),
        KeyCode::Down => Some(Direction::Down),
        KeyCode::Left => Some(Direction::Left),
        KeyCode::Right => Some(Direction::Right),
        _ => None,
    }
}

/// Keypad digit `1`-`9` to board index `0`-`8`.
pub fn cell_for_digit(c: char) -> Option<usize> {
    match c.to_digit(10) {
        Some(d @ 1..=9) => Some(d as usize - 1),
        _ => None,
    }
}
