//! Typed input. A move like `e2e4` is played as a synthetic drag so it goes
//! through exactly the same gate and resolution as a pointer gesture.

#[cfg(test)]
#[path = "prompt_test.rs"]
mod prompt_test;

use board::geometry::square_to_coordinate;
use board::input::Button;
use board::{Point, Square};
use session::UiCommand;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Input {
    Move { from: Square, to: Square },
    Quit,
    Help,
    Empty,
    Unknown(String),
}

pub const HELP: &str = "type a move as origin and destination squares (e2e4), or `quit` to leave";

pub fn parse(line: &str) -> Input {
    let text = line.trim().to_ascii_lowercase();
    match text.as_str() {
        "" => return Input::Empty,
        "quit" | "exit" | "leave" => return Input::Quit,
        "help" | "?" => return Input::Help,
        _ => {}
    }
    let squares = text.replace(['-', ' '], "");
    if squares.len() == 4 && squares.is_ascii() {
        if let (Ok(from), Ok(to)) = (squares[..2].parse::<Square>(), squares[2..].parse::<Square>()) {
            return Input::Move { from, to };
        }
    }
    Input::Unknown(line.trim().to_owned())
}

/// Pixel center of `square` on a board with `square_size` squares.
fn center(square: Square, square_size: f64, flipped: bool) -> Point {
    let coord = square_to_coordinate(square, flipped);
    let half = square_size / 2.0;
    Point::new(f64::from(coord.x) * square_size + half, f64::from(coord.y) * square_size + half)
}

/// Press on `from`, move to `to`, release.
pub fn drag_commands(from: Square, to: Square, square_size: f64, flipped: bool) -> [UiCommand; 3] {
    [
        UiCommand::PointerDown {
            point: center(from, square_size, flipped),
            button: Button::Primary,
            scroll: Point::default(),
        },
        UiCommand::PointerMove(center(to, square_size, flipped)),
        UiCommand::PointerUp,
    ]
}
