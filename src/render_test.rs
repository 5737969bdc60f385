use super::*;
use board::{BoardSnapshot, Color, Piece, PieceKind};
use session::{GameStatus, RuleEngine, SessionState, ShakmatyEngine};

fn view(phase: Phase, local: Color, board: BoardSnapshot) -> SessionView {
    SessionView {
        phase,
        state: SessionState {
            board,
            turn: Color::White,
            in_check: None,
            room_exists: true,
            waiting_for_opponent: false,
            board_disabled: local != Color::White,
            game_status: None,
        },
        local_color: local,
        flipped: local == Color::Black,
        dragging: None,
        translation: None,
        hints: Vec::new(),
        notice: None,
    }
}

#[test]
fn white_sees_rank_eight_on_top() {
    let text = diagram(&view(Phase::Active, Color::White, ShakmatyEngine::new().snapshot()));
    let lines: Vec<&str> = text.lines().collect();
    assert_eq!(lines.len(), 9);
    assert_eq!(lines[0], "8  r  n  b  q  k  b  n  r ");
    assert_eq!(lines[7], "1  R  N  B  Q  K  B  N  R ");
    assert_eq!(lines[8], "   a  b  c  d  e  f  g  h ");
}

#[test]
fn black_sees_the_board_flipped() {
    let text = diagram(&view(Phase::Active, Color::Black, ShakmatyEngine::new().snapshot()));
    let lines: Vec<&str> = text.lines().collect();
    assert_eq!(lines[0], "1  R  N  B  K  Q  B  N  R ");
    assert_eq!(lines[8], "   h  g  f  e  d  c  b  a ");
}

#[test]
fn checked_king_is_bracketed() {
    let board = BoardSnapshot::from_pieces([("e1".parse().unwrap(), Piece::new(PieceKind::King, Color::White))]);
    let mut v = view(Phase::Active, Color::White, board);
    v.state.in_check = Some(Color::White);
    assert!(diagram(&v).lines().nth(7).unwrap().contains("[K]"));
    assert_eq!(status(&v), "Your move (white) - check");
}

#[test]
fn status_follows_lifecycle() {
    let empty = BoardSnapshot::empty();
    assert_eq!(status(&view(Phase::Connecting, Color::White, empty.clone())), "Joining room...");
    assert_eq!(status(&view(Phase::WaitingForOpponent, Color::White, empty.clone())), "Waiting for opponent...");
    assert_eq!(status(&view(Phase::Active, Color::Black, empty.clone())), "Opponent (white) to move");

    let mut ended = view(Phase::Ended, Color::Black, empty.clone());
    ended.state.game_status = Some(GameStatus::Draw);
    assert_eq!(status(&ended), "Game over: draw");

    let mut lost = view(Phase::Disconnected, Color::White, empty);
    assert_eq!(status(&lost), "Disconnected");
    lost.notice = Some("Connection lost".into());
    assert_eq!(status(&lost), "Connection lost");
}
