//! End-to-end scenarios for the session controller.

use tictactoe_history::{
    Board, GameSession, HistoryEntry, HistoryErrorKind, IllegalMove, MoveOutcome, Phase, Player,
    Position, evaluate, is_draw,
};

#[test]
fn test_top_row_win() {
    let session = GameSession::replay([0, 4, 1, 5, 2]);

    let win = evaluate(session.current_board()).expect("X holds the top row");
    assert_eq!(*win.winner(), Player::X);
    assert_eq!(win.indices(), [0, 1, 2]);
    assert!(matches!(session.status().phase(), Phase::Won(_)));
}

#[test]
fn test_full_board_draw() {
    let board: Board = "XOX/XOO/OXX".parse().unwrap();
    assert!(is_draw(&board));

    // The same final position reached through play: X0 O1 X2 O4 X3 O5 X7 O6 X8.
    let mut session = GameSession::replay([0, 1, 2, 4, 3, 5, 7, 6, 8]);
    assert_eq!(session.current_board(), &board);
    assert_eq!(session.len(), 10);

    let status = session.status();
    assert!(status.is_draw());
    assert_eq!(status.winner(), None);
    assert_eq!(status.to_string(), "Draw");

    let before = session.clone();
    assert_eq!(
        session.apply_move(0),
        MoveOutcome::Ignored(IllegalMove::GameDrawn)
    );
    assert_eq!(session, before);
}

#[test]
fn test_rewind_and_branch() {
    let mut session = GameSession::replay([0, 1, 2, 3, 4]);
    assert_eq!(session.len(), 6);
    assert_eq!(session.pointer(), 5);

    session.jump_to(2).unwrap();
    assert_eq!(session.pointer(), 2);
    assert_eq!(session.current_board().occupied_count(), 2);

    assert!(session.apply_move(5).is_applied());
    assert_eq!(session.len(), 4);
    assert_eq!(session.pointer(), 3);
    assert_eq!(
        session.current_board().square(Position::MiddleRight),
        tictactoe_history::Square::Occupied(Player::X)
    );
}

#[test]
fn test_jump_out_of_range_keeps_pointer() {
    let mut session = GameSession::replay([0, 1]);
    assert_eq!(session.len(), 3);

    let err = session.jump_to(99).unwrap_err();
    assert_eq!(
        err.kind,
        HistoryErrorKind::InvalidIndex {
            requested: 99,
            len: 3
        }
    );
    assert_eq!(session.pointer(), 2);
}

#[test]
fn test_jump_into_won_position_then_back_out() {
    let mut session = GameSession::replay([0, 4, 1, 5, 2]);
    assert!(session.status().is_over());

    session.jump_to(3).unwrap();
    assert!(!session.status().is_over());
    assert_eq!(session.mover(), Player::O);

    session.jump_to(5).unwrap();
    assert_eq!(session.status().winner(), Some(Player::X));
}

#[test]
fn test_reset_after_win() {
    let mut session = GameSession::replay([0, 4, 1, 5, 2]);
    session.reset();

    assert_eq!(session.history(), &[HistoryEntry::start()]);
    assert_eq!(session.pointer(), 0);
    assert_eq!(session.status().to_string(), "Next player: X");
    assert!(session.apply_move(8).is_applied());
}

#[test]
fn test_sessions_are_independent() {
    let mut a = GameSession::new();
    let b = GameSession::new();
    a.apply_move(4);
    assert_eq!(a.len(), 2);
    assert_eq!(b.len(), 1);
}

#[test]
fn test_session_serializes_history() {
    let session = GameSession::replay([4]);
    let json = serde_json::to_value(&session).unwrap();
    assert_eq!(json["pointer"], 1);
    assert_eq!(json["history"].as_array().unwrap().len(), 2);
    assert_eq!(json["history"][1]["location"]["row"], 2);
    assert_eq!(json["sort_order"], "ascending");
}
