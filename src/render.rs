//! Text rendering of a session view.

#[cfg(test)]
#[path = "render_test.rs"]
mod render_test;

use board::Square;
use board::consts::BOARD_DIM;
use board::geometry::coordinate_to_square;
use session::{Phase, SessionView};

/// Board diagram as the local player sees it, followed by a file legend.
///
/// Uppercase is white, lowercase is black, `.` is empty. A king in check is
/// bracketed.
pub fn diagram(view: &SessionView) -> String {
    let checked = view.state.checked_king();
    let mut out = String::new();
    for y in 0..i32::from(BOARD_DIM) {
        let mut rank = None;
        let mut cells = Vec::with_capacity(usize::from(BOARD_DIM));
        for x in 0..i32::from(BOARD_DIM) {
            let Some(square) = coordinate_to_square(x, y, view.flipped) else {
                continue;
            };
            rank = Some(square.rank_char());
            cells.push(cell(view, square, checked));
        }
        out.push(rank.unwrap_or(' '));
        out.push(' ');
        out.push_str(&cells.join(""));
        out.push('\n');
    }
    out.push_str("  ");
    for x in 0..i32::from(BOARD_DIM) {
        if let Some(square) = coordinate_to_square(x, 0, view.flipped) {
            out.push(' ');
            out.push(square.file_char());
            out.push(' ');
        }
    }
    out.push('\n');
    out
}

fn cell(view: &SessionView, square: Square, checked: Option<Square>) -> String {
    let symbol = view.state.board.piece_at(square).map_or('.', board::Piece::symbol);
    if checked == Some(square) { format!("[{symbol}]") } else { format!(" {symbol} ") }
}

/// One-line lifecycle status.
pub fn status(view: &SessionView) -> String {
    let you = view.local_color;
    match view.phase {
        Phase::Disconnected => view.notice.clone().unwrap_or_else(|| "Disconnected".to_owned()),
        Phase::Connecting => "Joining room...".to_owned(),
        Phase::WaitingForOpponent => "Waiting for opponent...".to_owned(),
        Phase::Active => {
            let mut line = if view.state.board_disabled {
                format!("Opponent ({}) to move", you.opposite())
            } else {
                format!("Your move ({you})")
            };
            if view.state.in_check.is_some() {
                line.push_str(" - check");
            }
            line
        }
        Phase::Ended => match view.state.game_status {
            Some(status) => format!("Game over: {status}"),
            None => "Game over".to_owned(),
        },
    }
}
