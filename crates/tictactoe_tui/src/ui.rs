//! Stateless UI rendering.
//!
//! Draws whatever [`App`] holds; nothing here mutates game state. The same
//! layout functions back [`hit_test`], so clicks land where things are drawn.

use crate::app::{App, Click, Focus};
use ratatui::{
    Frame,
    layout::{Alignment, Constraint, Direction, Layout, Position as ScreenPos, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, List, ListItem, ListState, Paragraph},
};
use std::rc::Rc;
use tictactoe_history::{Board, Player, Position, Square};

const BOARD_WIDTH: u16 = 40;
const BOARD_HEIGHT: u16 = 11;
const HISTORY_WIDTH: u16 = 36;

fn screen_chunks(area: Rect) -> Rc<[Rect]> {
    Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3), // Title
            Constraint::Min(0),    // Board and history
            Constraint::Length(3), // Status
            Constraint::Length(3), // Help
        ])
        .split(area)
}

/// Draws the main UI.
pub fn draw(frame: &mut Frame, app: &App) {
    let chunks = screen_chunks(frame.area());

    let title = Paragraph::new("Tic Tac Toe")
        .style(Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD))
        .alignment(Alignment::Center)
        .block(Block::default().borders(Borders::ALL));
    frame.render_widget(title, chunks[0]);

    draw_body(frame, chunks[1], app);

    let status = Paragraph::new(app.status_line())
        .style(Style::default().fg(Color::Yellow))
        .alignment(Alignment::Center)
        .block(Block::default().borders(Borders::ALL).title("Status"));
    frame.render_widget(status, chunks[2]);

    let help = Paragraph::new(help_text(app))
        .style(Style::default().fg(Color::DarkGray))
        .alignment(Alignment::Center)
        .block(Block::default().borders(Borders::ALL));
    frame.render_widget(help, chunks[3]);
}

fn help_text(app: &App) -> &'static str {
    match app.focus() {
        Focus::Board => "arrows+enter, 1-9 or click: move | u/]: back/forward | tab: history | s: sort | h: hide | r: restart | q: quit",
        Focus::History => "up/down: select | enter or click: jump | tab: board | s: sort | h: hide | r: restart | q: quit",
    }
}

/// Splits the body into board and history areas.
///
/// Wide terminals get the history panel beside the board; narrow ones stack it below.
pub fn body_layout(area: Rect, app: &App) -> (Rect, Option<Rect>) {
    if !app.show_history() {
        return (area, None);
    }
    if area.width >= app.compact_width() {
        let cols = Layout::default()
            .direction(Direction::Horizontal)
            .constraints([Constraint::Min(BOARD_WIDTH), Constraint::Length(HISTORY_WIDTH)])
            .split(area);
        (cols[0], Some(cols[1]))
    } else {
        let rows = Layout::default()
            .direction(Direction::Vertical)
            .constraints([Constraint::Length(BOARD_HEIGHT), Constraint::Min(3)])
            .split(area);
        (rows[0], Some(rows[1]))
    }
}

fn board_rows(area: Rect) -> Rc<[Rect]> {
    Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3),
            Constraint::Length(1),
            Constraint::Length(3),
            Constraint::Length(1),
            Constraint::Length(3),
        ])
        .split(center_rect(area, BOARD_WIDTH, BOARD_HEIGHT))
}

fn row_columns(area: Rect) -> Rc<[Rect]> {
    Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Length(12),
            Constraint::Length(1),
            Constraint::Length(12),
            Constraint::Length(1),
            Constraint::Length(12),
        ])
        .split(area)
}

/// Screen rectangle of every square, given the board's share of the body.
pub fn cell_areas(area: Rect) -> Vec<(Position, Rect)> {
    let rows = board_rows(area);
    (0..3)
        .flat_map(|row| {
            let cols = row_columns(rows[row * 2]);
            (0..3).filter_map(move |col| {
                Position::from_row_col(row, col).map(|pos| (pos, cols[col * 2]))
            })
        })
        .collect()
}

/// Maps a click at (`column`, `row`) on a screen of size `area` to what was drawn there.
///
/// History rows only respond while the whole list fits, since a scrolled
/// list's offset is not known here.
pub fn hit_test(area: Rect, app: &App, column: u16, row: u16) -> Option<Click> {
    let point = ScreenPos::new(column, row);
    let (board_area, history_area) = body_layout(screen_chunks(area)[1], app);

    if let Some((pos, _)) = cell_areas(board_area)
        .into_iter()
        .find(|(_, rect)| rect.contains(point))
    {
        return Some(Click::Cell(pos));
    }

    let inner = Block::default().borders(Borders::ALL).inner(history_area?);
    if !inner.contains(point) {
        return None;
    }
    let items = app.move_list();
    if items.len() > inner.height as usize {
        return None;
    }
    items
        .get((row - inner.y) as usize)
        .map(|item| Click::HistoryRow(*item.move_number()))
}

fn draw_body(frame: &mut Frame, area: Rect, app: &App) {
    let (board_area, history_area) = body_layout(area, app);
    draw_board(frame, board_area, app);
    if let Some(history_area) = history_area {
        draw_history(frame, history_area, app);
    }
}

fn draw_board(frame: &mut Frame, area: Rect, app: &App) {
    let board = app.session().current_board();
    let winning_line = app.session().status().winning_line();
    let cursor = (app.focus() == Focus::Board).then_some(app.cursor());

    let rows = board_rows(area);
    for separator in [rows[1], rows[3]] {
        draw_separator(frame, separator);
    }
    for row in [rows[0], rows[2], rows[4]] {
        let cols = row_columns(row);
        for separator in [cols[1], cols[3]] {
            draw_separator_vertical(frame, separator);
        }
    }
    for (pos, rect) in cell_areas(area) {
        draw_cell(frame, rect, board, winning_line, cursor, pos);
    }
}

/// Text and style for one square.
pub fn cell_style(
    board: &Board,
    winning_line: Option<[Position; 3]>,
    cursor: Option<Position>,
    pos: Position,
) -> (String, Style) {
    let (symbol, base_style) = match board.square(pos) {
        Square::Empty => (
            (pos.to_index() + 1).to_string(),
            Style::default().fg(Color::DarkGray),
        ),
        Square::Occupied(Player::X) => (
            "X".to_string(),
            Style::default().fg(Color::Red).add_modifier(Modifier::BOLD),
        ),
        Square::Occupied(Player::O) => (
            "O".to_string(),
            Style::default().fg(Color::Blue).add_modifier(Modifier::BOLD),
        ),
    };

    let style = if cursor == Some(pos) {
        base_style.bg(Color::White).fg(Color::Black)
    } else if winning_line.is_some_and(|line| line.contains(&pos)) {
        base_style.bg(Color::Green)
    } else {
        base_style
    };
    (symbol, style)
}

fn draw_cell(
    frame: &mut Frame,
    area: Rect,
    board: &Board,
    winning_line: Option<[Position; 3]>,
    cursor: Option<Position>,
    pos: Position,
) {
    let (symbol, style) = cell_style(board, winning_line, cursor, pos);
    let paragraph = Paragraph::new(Line::from(Span::styled(format!(" {} ", symbol), style)))
        .alignment(Alignment::Center);
    frame.render_widget(paragraph, area);
}

fn draw_history(frame: &mut Frame, area: Rect, app: &App) {
    let items: Vec<ListItem> = app
        .move_list()
        .into_iter()
        .map(|item| {
            let style = if *item.is_current() {
                Style::default().fg(Color::Yellow).add_modifier(Modifier::BOLD)
            } else {
                Style::default()
            };
            ListItem::new(Line::from(Span::styled(item.label().clone(), style)))
        })
        .collect();

    let focused = app.focus() == Focus::History;
    let border_style = if focused {
        Style::default().fg(Color::Cyan)
    } else {
        Style::default().fg(Color::DarkGray)
    };
    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(border_style)
        .title(format!("History ({})", app.session().sort_order().label()));

    let list = List::new(items)
        .block(block)
        .highlight_style(Style::default().add_modifier(Modifier::REVERSED))
        .highlight_symbol("> ");

    let mut state = ListState::default();
    if focused {
        state.select(Some(app.selected_row()));
    }
    frame.render_stateful_widget(list, area, &mut state);
}

fn draw_separator(frame: &mut Frame, area: Rect) {
    let sep = Paragraph::new("─".repeat(area.width as usize))
        .style(Style::default().fg(Color::DarkGray));
    frame.render_widget(sep, area);
}

fn draw_separator_vertical(frame: &mut Frame, area: Rect) {
    let sep = Paragraph::new("│").style(Style::default().fg(Color::DarkGray));
    frame.render_widget(sep, area);
}

fn center_rect(area: Rect, width: u16, height: u16) -> Rect {
    let vert = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length((area.height.saturating_sub(height)) / 2),
            Constraint::Length(height),
            Constraint::Min(0),
        ])
        .split(area);

    Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Length((area.width.saturating_sub(width)) / 2),
            Constraint::Length(width),
            Constraint::Min(0),
        ])
        .split(vert[1])[1]
}
