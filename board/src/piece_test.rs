use super::*;

fn sq(name: &str) -> Square {
    name.parse().unwrap()
}

#[test]
fn promotion_defaults_to_queen() {
    assert_eq!(Promotion::default(), Promotion::Queen);
}

#[test]
fn promotion_converts_to_piece_kind() {
    assert_eq!(PieceKind::from(Promotion::Knight), PieceKind::Knight);
    assert_eq!(PieceKind::from(Promotion::Queen), PieceKind::Queen);
}

#[test]
fn promotion_rejects_pawn_and_king_letters() {
    assert!(serde_json::from_str::<Promotion>("\"k\"").is_err());
    assert!(serde_json::from_str::<Promotion>("\"p\"").is_err());
    assert_eq!(serde_json::from_str::<Promotion>("\"r\"").unwrap(), Promotion::Rook);
}

#[test]
fn piece_symbol_case_follows_color() {
    assert_eq!(Piece::new(PieceKind::Knight, Color::White).symbol(), 'N');
    assert_eq!(Piece::new(PieceKind::Knight, Color::Black).symbol(), 'n');
}

#[test]
fn move_request_omits_missing_promotion_on_wire() {
    let mv = MoveRequest::new(sq("e2"), sq("e4"));
    let json = serde_json::to_value(mv).unwrap();
    assert_eq!(json, serde_json::json!({"from": "e2", "to": "e4"}));
}

#[test]
fn move_request_with_queen_carries_q() {
    let mv = MoveRequest::with_queen(sq("a7"), sq("a8"));
    let json = serde_json::to_value(mv).unwrap();
    assert_eq!(json, serde_json::json!({"from": "a7", "to": "a8", "promotion": "q"}));
}

#[test]
fn move_request_display_is_uci_like() {
    assert_eq!(MoveRequest::new(sq("g1"), sq("f3")).to_string(), "g1f3");
    assert_eq!(MoveRequest::with_queen(sq("b7"), sq("b8")).to_string(), "b7b8q");
}
