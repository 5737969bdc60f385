use super::*;
use crate::machine::SessionExit;
use crate::rules::fake::FreeEngine;
use board::{Color, MoveRequest, Piece, PieceKind};
use wire::{GameOverMessage, GameStatus, Inbound, MoveMessage, Outbound};

const SIZE: f64 = 100.0;

fn sq(name: &str) -> Square {
    name.parse().unwrap()
}

fn seat(color: Color) -> Seat {
    Seat { room_id: "room-1".into(), player_id: "player-1".into(), player_color: color }
}

/// Pixel center of `square` as the local player sees it.
fn center(table: &Table<FreeEngine>, square: &str) -> Point {
    let coord = board::geometry::square_to_coordinate(sq(square), table.flipped());
    Point::new(f64::from(coord.x) * SIZE + SIZE / 2.0, f64::from(coord.y) * SIZE + SIZE / 2.0)
}

fn seated(engine: FreeEngine, color: Color) -> Table<FreeEngine> {
    let mut table = Table::new(engine, seat(color), SIZE);
    table.handle(Event::Start);
    table.handle(Event::Inbound(Inbound::BothPlayersReady));
    table
}

fn press(table: &mut Table<FreeEngine>, square: &str) -> DragAction {
    let point = center(table, square);
    table.pointer_down(point, Button::Primary, Point::default())
}

fn drag(table: &mut Table<FreeEngine>, from: &str, to: &str) -> Result<Vec<Effect>, SnapBack> {
    press(table, from);
    let point = center(table, to);
    table.pointer_move(point);
    table.pointer_up()
}

#[test]
fn white_drags_lone_pawn_two_squares() {
    let engine = FreeEngine::new(Color::White).with("e2", PieceKind::Pawn, Color::White);
    let mut table = seated(engine, Color::White);

    let effects = drag(&mut table, "e2", "e4").unwrap();

    assert_eq!(
        effects,
        vec![Effect::Send(Outbound::Move(MoveMessage {
            room_id: "room-1".into(),
            player_id: "player-1".into(),
            mv: MoveRequest::with_queen(sq("e2"), sq("e4")),
        }))]
    );
    assert_eq!(table.state().board.piece_at(sq("e2")), None);
    assert_eq!(table.state().board.piece_at(sq("e4")), Some(Piece::new(PieceKind::Pawn, Color::White)));
    assert_eq!(table.state().turn, Color::Black);
    assert!(!table.drag().is_dragging());
}

#[test]
fn black_board_is_flipped_for_drags() {
    let mut table = seated(FreeEngine::kings_and_pawns(), Color::Black);
    assert!(table.flipped());
    table.handle(Event::Inbound(Inbound::MoveMade { mv: MoveRequest::new(sq("e2"), sq("e4")), color: Color::White }));

    // e7 sits at the bottom half of a flipped board.
    assert!(center(&table, "e7").y > 400.0);
    drag(&mut table, "e7", "e5").unwrap();
    assert_eq!(table.state().board.piece_at(sq("e5")), Some(Piece::new(PieceKind::Pawn, Color::Black)));
}

#[test]
fn black_drag_on_white_turn_is_ignored() {
    let mut table = seated(FreeEngine::kings_and_pawns(), Color::Black);
    assert_eq!(press(&mut table, "e7"), DragAction::None);
    assert_eq!(table.pointer_up(), Ok(Vec::new()));
    assert!(table.machine().engine().attempts.is_empty());
}

#[test]
fn opponent_piece_cannot_be_picked_up() {
    let mut table = seated(FreeEngine::kings_and_pawns(), Color::White);
    assert_eq!(press(&mut table, "e7"), DragAction::None);
    assert!(!table.drag().is_dragging());
}

#[test]
fn empty_square_and_secondary_button_do_nothing() {
    let mut table = seated(FreeEngine::kings_and_pawns(), Color::White);
    assert_eq!(press(&mut table, "d4"), DragAction::None);

    let point = center(&table, "e2");
    assert_eq!(table.pointer_down(point, Button::Secondary, Point::default()), DragAction::None);
    assert_eq!(table.pointer_down(Point::new(-5.0, 20.0), Button::Primary, Point::default()), DragAction::None);
}

#[test]
fn release_off_board_snaps_back() {
    let mut table = seated(FreeEngine::kings_and_pawns(), Color::White);
    press(&mut table, "e2");
    table.pointer_move(Point::new(450.0, 950.0));
    assert_eq!(table.pointer_up(), Err(SnapBack::OffBoard));
    assert_eq!(table.state().board.piece_at(sq("e2")), Some(Piece::new(PieceKind::Pawn, Color::White)));
}

#[test]
fn illegal_drop_snaps_back_without_sending() {
    let mut table = seated(FreeEngine::kings_and_pawns(), Color::White);
    let err = drag(&mut table, "e2", "e1").unwrap_err();
    assert_eq!(err, SnapBack::Rejected(MoveRejected::Illegal));
    assert_eq!(table.state().turn, Color::White);
}

#[test]
fn scroll_counts_toward_drop_square() {
    let mut table = seated(FreeEngine::kings_and_pawns(), Color::White);
    press(&mut table, "e2");
    table.scroll(Point::new(0.0, -200.0));
    table.pointer_up().unwrap();
    assert_eq!(table.state().board.piece_at(sq("e4")), Some(Piece::new(PieceKind::Pawn, Color::White)));
}

#[test]
fn blur_cancels_and_next_drag_starts_clean() {
    let mut table = seated(FreeEngine::kings_and_pawns(), Color::White);
    press(&mut table, "e2");
    let start = center(&table, "e2");
    table.pointer_move(Point::new(start.x + 90.0, start.y + 90.0));
    assert_eq!(table.blur(), DragAction::Cancelled);
    assert!(table.hints().is_empty());

    press(&mut table, "e2");
    assert_eq!(table.drag().translation(), Some(Point::default()));
    assert_eq!(table.pointer_up(), Err(SnapBack::Rejected(MoveRejected::Illegal)));
}

#[test]
fn hints_follow_the_dragged_piece() {
    let mut table = seated(FreeEngine::kings_and_pawns(), Color::White);
    assert!(table.hints().is_empty());
    press(&mut table, "e2");
    let start = center(&table, "e2");
    table.pointer_move(Point::new(start.x, start.y - 100.0));

    let hints = table.hints();
    assert!(hints.iter().any(|h| h.to == sq("e3") && h.hovered && !h.capture));
    assert!(hints.iter().any(|h| h.to == sq("e7") && h.capture && !h.hovered));
    assert!(!hints.iter().any(|h| h.to == sq("e1")));
    assert_eq!(hints.iter().filter(|h| h.hovered).count(), 1);
}

#[test]
fn game_over_drops_active_drag() {
    let mut table = seated(FreeEngine::kings_and_pawns(), Color::White);
    press(&mut table, "e2");
    let effects = table.handle(Event::Inbound(Inbound::GameOver(GameOverMessage { game_status: GameStatus::Draw })));
    assert!(effects.contains(&Effect::Exit(SessionExit::GameOver(GameStatus::Draw))));
    assert!(!table.drag().is_dragging());
    assert_eq!(table.pointer_up(), Ok(Vec::new()));
}

#[test]
fn submit_move_bypasses_drag() {
    let mut table = seated(FreeEngine::kings_and_pawns(), Color::White);
    assert_eq!(table.submit_move(MoveRequest::new(sq("e2"), sq("e3"))).unwrap().len(), 1);
    assert_eq!(table.submit_move(MoveRequest::new(sq("e3"), sq("e4"))), Err(MoveRejected::BoardDisabled));
}
