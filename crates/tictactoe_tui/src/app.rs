//! Application state and key handling.
//!
//! `App` owns the game session plus the purely visual state around it
//! (cursor, focus, panel visibility). Everything shown about the game is
//! derived from the session at draw time.

use crate::config::TuiConfig;
use crate::input::{cell_for_digit, direction_for};
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use tictactoe_history::{GameSession, MoveListItem, MoveOutcome, Position};
use tracing::{debug, instrument, warn};

/// Which panel receives navigation keys.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Focus {
    /// Arrows move the board cursor.
    #[default]
    Board,
    /// Arrows move the history selection.
    History,
}

/// What the event loop should do after a key.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    /// Keep running.
    Continue,
    /// Leave the UI.
    Quit,
}

/// What a mouse click landed on.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Click {
    /// A board square.
    Cell(Position),
    /// A history row, by move number.
    HistoryRow(usize),
}

/// Main application state.
#[derive(Debug, Clone)]
pub struct App {
    session: GameSession,
    cursor: Position,
    focus: Focus,
    /// Move number highlighted in the history panel.
    selected_move: usize,
    show_history: bool,
    compact_width: u16,
}

impl App {
    /// Creates an application with a fresh session.
    #[instrument(skip(config))]
    pub fn new(config: &TuiConfig) -> Self {
        Self {
            session: GameSession::new().with_sort_order(*config.sort_order()),
            cursor: Position::Center,
            focus: Focus::Board,
            selected_move: 0,
            show_history: *config.show_history(),
            compact_width: *config.compact_width(),
        }
    }

    /// The game session.
    pub fn session(&self) -> &GameSession {
        &self.session
    }

    /// Board cursor.
    pub fn cursor(&self) -> Position {
        self.cursor
    }

    /// Focused panel.
    pub fn focus(&self) -> Focus {
        self.focus
    }

    /// Move number highlighted in the history panel.
    pub fn selected_move(&self) -> usize {
        self.selected_move
    }

    /// Whether the history panel is drawn.
    pub fn show_history(&self) -> bool {
        self.show_history
    }

    /// Width below which the layout stacks vertically.
    pub fn compact_width(&self) -> u16 {
        self.compact_width
    }

    /// Move list rows in display order.
    pub fn move_list(&self) -> Vec<MoveListItem> {
        self.session.move_list()
    }

    /// Row of the move list holding the selection.
    pub fn selected_row(&self) -> usize {
        self.move_list()
            .iter()
            .position(|item| *item.move_number() == self.selected_move)
            .unwrap_or(0)
    }

    /// Status line: whose turn or the result, plus where in history we are.
    pub fn status_line(&self) -> String {
        let status = self.session.status().to_string();
        if self.session.is_at_latest() {
            status
        } else {
            format!(
                "{} (viewing move {} of {})",
                status,
                self.session.pointer(),
                self.session.len() - 1
            )
        }
    }

    /// Handles one key press.
    #[instrument(skip(self), fields(focus = ?self.focus))]
    pub fn handle_key(&mut self, key: KeyEvent) -> Action {
        if key.modifiers.contains(KeyModifiers::CONTROL) && key.code == KeyCode::Char('c') {
            return Action::Quit;
        }

        let code = match key.code {
            KeyCode::Char(c) => KeyCode::Char(c.to_ascii_lowercase()),
            code => code,
        };
        match code {
            KeyCode::Char('q') | KeyCode::Esc => return Action::Quit,
            KeyCode::Tab | KeyCode::BackTab => self.toggle_focus(),
            KeyCode::Char('r') => self.reset(),
            KeyCode::Char('s') => {
                self.session.toggle_sort_order();
            }
            KeyCode::Char('h') => self.toggle_history(),
            KeyCode::Char('u') | KeyCode::Char('[') => {
                self.session.step_back();
                self.follow_pointer();
            }
            KeyCode::Char(']') => {
                self.session.step_forward();
                self.follow_pointer();
            }
            KeyCode::Enter | KeyCode::Char(' ') if self.focus == Focus::Board => {
                self.play(self.cursor.to_index());
            }
            KeyCode::Char(c) => {
                if let Some(cell) = cell_for_digit(c) {
                    self.play(cell);
                }
            }
            KeyCode::Enter => self.jump_to_selection(),
            code => self.navigate(code),
        }
        Action::Continue
    }

    /// Handles a left click: squares play, history rows jump.
    #[instrument(skip(self))]
    pub fn handle_click(&mut self, click: Click) {
        match click {
            Click::Cell(pos) => {
                self.focus = Focus::Board;
                self.play(pos.to_index());
            }
            Click::HistoryRow(move_number) => {
                self.selected_move = move_number;
                self.jump_to_selection();
            }
        }
    }

    fn navigate(&mut self, code: KeyCode) {
        let Some(direction) = direction_for(code) else {
            return;
        };
        match self.focus {
            Focus::Board => self.cursor = self.cursor.step(direction),
            Focus::History => match code {
                KeyCode::Up => self.move_selection(-1),
                KeyCode::Down => self.move_selection(1),
                _ => {}
            },
        }
    }

    fn move_selection(&mut self, delta: isize) {
        let rows = self.move_list();
        let last = rows.len().saturating_sub(1);
        let row = self.selected_row().saturating_add_signed(delta).min(last);
        if let Some(item) = rows.get(row) {
            self.selected_move = *item.move_number();
        }
    }

    fn play(&mut self, cell: usize) {
        if let Some(pos) = Position::from_index(cell) {
            self.cursor = pos;
        }
        match self.session.apply_move(cell) {
            MoveOutcome::Applied { .. } => self.follow_pointer(),
            MoveOutcome::Ignored(reason) => debug!(%reason, cell, "Move ignored"),
        }
    }

    fn jump_to_selection(&mut self) {
        if let Err(e) = self.session.jump_to(self.selected_move) {
            warn!(error = %e, "History selection out of range");
            self.follow_pointer();
        }
    }

    fn follow_pointer(&mut self) {
        self.selected_move = self.session.pointer();
    }

    fn toggle_focus(&mut self) {
        self.focus = match self.focus {
            Focus::Board if self.show_history => {
                self.follow_pointer();
                Focus::History
            }
            _ => Focus::Board,
        };
    }

    fn toggle_history(&mut self) {
        self.show_history = !self.show_history;
        if !self.show_history {
            self.focus = Focus::Board;
        }
    }

    /// Starts a new game; display preferences are kept.
    pub fn reset(&mut self) {
        self.session.reset();
        self.cursor = Position::Center;
        self.follow_pointer();
    }
}
