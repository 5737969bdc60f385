use super::*;

// =============================================================
// Square
// =============================================================

#[test]
fn square_parses_corners() {
    assert_eq!("a1".parse::<Square>(), Ok(Square::new(0, 0).unwrap()));
    assert_eq!("h8".parse::<Square>(), Ok(Square::new(7, 7).unwrap()));
    assert_eq!("e2".parse::<Square>(), Ok(Square::new(4, 1).unwrap()));
}

#[test]
fn square_rejects_malformed_text() {
    for bad in ["", "e", "e22", "i1", "a0", "a9", "E2", "2e", " e2"] {
        assert!(bad.parse::<Square>().is_err(), "{bad:?} should not parse");
    }
}

#[test]
fn square_new_rejects_out_of_range() {
    assert!(Square::new(8, 0).is_none());
    assert!(Square::new(0, 8).is_none());
}

#[test]
fn square_display_matches_name() {
    let sq: Square = "c7".parse().unwrap();
    assert_eq!(sq.to_string(), "c7");
    assert_eq!(sq.file_char(), 'c');
    assert_eq!(sq.rank_char(), '7');
}

#[test]
fn square_all_yields_64_distinct_squares() {
    let all: Vec<Square> = Square::all().collect();
    assert_eq!(all.len(), 64);
    let unique: std::collections::HashSet<_> = all.iter().copied().collect();
    assert_eq!(unique.len(), 64);
    assert_eq!(all[0].to_string(), "a1");
    assert_eq!(all[63].to_string(), "h8");
}

#[test]
fn square_serializes_as_string() {
    let sq: Square = "g5".parse().unwrap();
    assert_eq!(serde_json::to_string(&sq).unwrap(), "\"g5\"");
    let back: Square = serde_json::from_str("\"g5\"").unwrap();
    assert_eq!(back, sq);
}

#[test]
fn square_deserialize_rejects_bad_name() {
    assert!(serde_json::from_str::<Square>("\"z9\"").is_err());
    assert!(serde_json::from_str::<Square>("42").is_err());
}

// =============================================================
// Color
// =============================================================

#[test]
fn color_opposite_flips() {
    assert_eq!(Color::White.opposite(), Color::Black);
    assert_eq!(Color::Black.opposite(), Color::White);
}

#[test]
fn color_wire_letters() {
    assert_eq!(serde_json::to_string(&Color::White).unwrap(), "\"w\"");
    assert_eq!(serde_json::to_string(&Color::Black).unwrap(), "\"b\"");
    assert_eq!(serde_json::from_str::<Color>("\"b\"").unwrap(), Color::Black);
    assert!(serde_json::from_str::<Color>("\"white\"").is_err());
}

#[test]
fn color_parses_letter_and_word() {
    assert_eq!("w".parse::<Color>(), Ok(Color::White));
    assert_eq!("black".parse::<Color>(), Ok(Color::Black));
    assert!("red".parse::<Color>().is_err());
}

#[test]
fn only_black_seat_is_flipped() {
    assert!(!Color::White.is_flipped_seat());
    assert!(Color::Black.is_flipped_seat());
}
