//! Game rules for tic-tac-toe.
//!
//! Pure functions of a single board snapshot. Nothing here knows about
//! history or whose turn it is; the session controller composes them.

pub mod draw;
pub mod win;

pub use draw::{is_draw, is_full};
pub use win::{LINES, WinResult, evaluate};
